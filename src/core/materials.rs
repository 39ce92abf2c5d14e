//! Material type registry
//!
//! An ordered, duplicate-free list of material type names backed by a
//! plain text file with one name per line. The registry never shrinks
//! below one entry, and exactly one entry is selected at any time.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Material types used when no material file exists yet
pub const DEFAULT_MATERIALS: [&str; 3] = ["Type A", "Type B", "Type C"];

/// Errors from registry mutations
#[derive(Debug, Error, Diagnostic)]
pub enum RegistryError {
    #[error("Material type already exists.")]
    #[diagnostic(code(stockroom::material::duplicate))]
    Duplicate { name: String },

    #[error("Cannot remove the only material type.")]
    #[diagnostic(
        code(stockroom::material::last_entry),
        help("add another material type before removing '{name}'")
    )]
    LastEntry { name: String },

    #[error("Material type names must fit on one line.")]
    #[diagnostic(
        code(stockroom::material::invalid_name),
        help("remove line breaks from the material type name")
    )]
    InvalidName { name: String },

    #[error("Unknown material type '{name}'.")]
    #[diagnostic(
        code(stockroom::material::unknown),
        help("run 'stockroom material list' to see the available types")
    )]
    Unknown { name: String },

    #[error("failed to access material file {path:?}: {source}")]
    #[diagnostic(code(stockroom::material::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result of an add request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddMaterial {
    /// The name was appended and the file rewritten
    Added,
    /// The prompt was dismissed or left blank; nothing changed
    Cancelled,
}

/// Snapshot of the registry for rendering a selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialChoices {
    pub entries: Vec<String>,
    pub selected: usize,
}

impl MaterialChoices {
    pub fn selected_name(&self) -> &str {
        &self.entries[self.selected]
    }
}

/// The persisted list of material types
#[derive(Debug)]
pub struct MaterialRegistry {
    path: PathBuf,
    entries: Vec<String>,
    selected: usize,
}

impl MaterialRegistry {
    /// Load the registry from `path`, or fall back to the defaults
    ///
    /// A missing file is not an error. An empty file is treated as missing
    /// so the registry still holds at least one entry.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let entries = match std::fs::read_to_string(path) {
            Ok(contents) => contents.lines().map(String::from).collect::<Vec<_>>(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(source) => {
                return Err(RegistryError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let entries = if entries.is_empty() {
            tracing::debug!(path = %path.display(), "no material file, using defaults");
            DEFAULT_MATERIALS.iter().map(|s| s.to_string()).collect()
        } else {
            tracing::debug!(path = %path.display(), count = entries.len(), "loaded material types");
            entries
        };

        Ok(Self {
            path: path.to_path_buf(),
            entries,
            selected: 0,
        })
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|e| e == name)
    }

    /// The currently selected material type
    pub fn selected(&self) -> &str {
        &self.entries[self.selected]
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render the current state for a selector control
    pub fn choices(&self) -> MaterialChoices {
        MaterialChoices {
            entries: self.entries.clone(),
            selected: self.selected,
        }
    }

    /// Make `name` the selected entry
    pub fn select(&mut self, name: &str) -> Result<(), RegistryError> {
        let idx = self.position(name)?;
        self.selected = idx;
        Ok(())
    }

    /// Append a new material type and persist
    ///
    /// `None` or a blank name is a cancelled prompt and changes nothing.
    pub fn add(&mut self, name: Option<&str>) -> Result<AddMaterial, RegistryError> {
        let name = match name {
            Some(n) if !n.trim().is_empty() => n,
            _ => return Ok(AddMaterial::Cancelled),
        };

        if name.contains(['\n', '\r']) {
            return Err(RegistryError::InvalidName {
                name: name.to_string(),
            });
        }

        if self.contains(name) {
            return Err(RegistryError::Duplicate {
                name: name.to_string(),
            });
        }

        self.entries.push(name.to_string());
        self.persist()?;
        tracing::info!(material = name, "added material type");
        Ok(AddMaterial::Added)
    }

    /// Remove a material type and persist
    ///
    /// The first remaining entry becomes the selection.
    pub fn remove(&mut self, name: &str) -> Result<(), RegistryError> {
        let idx = self.position(name)?;
        if self.entries.len() <= 1 {
            return Err(RegistryError::LastEntry {
                name: name.to_string(),
            });
        }

        self.entries.remove(idx);
        self.selected = 0;
        self.persist()?;
        tracing::info!(material = name, "removed material type");
        Ok(())
    }

    /// Overwrite the backing file with the current entries
    pub fn persist(&self) -> Result<(), RegistryError> {
        std::fs::write(&self.path, self.entries.join("\n")).map_err(|source| RegistryError::Io {
            path: self.path.clone(),
            source,
        })
    }

    fn position(&self, name: &str) -> Result<usize, RegistryError> {
        self.entries
            .iter()
            .position(|e| e == name)
            .ok_or_else(|| RegistryError::Unknown {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn registry_in(dir: &Path) -> MaterialRegistry {
        MaterialRegistry::load(&dir.join("material_types.txt")).unwrap()
    }

    #[test]
    fn test_load_defaults_when_missing() {
        let tmp = tempdir().unwrap();
        let reg = registry_in(tmp.path());
        assert_eq!(reg.entries(), DEFAULT_MATERIALS);
        assert_eq!(reg.selected(), "Type A");
        // Loading alone does not create the file
        assert!(!tmp.path().join("material_types.txt").exists());
    }

    #[test]
    fn test_load_reads_lines_in_order() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("material_types.txt");
        std::fs::write(&path, "Steel\nOak\nPVC\n").unwrap();

        let reg = MaterialRegistry::load(&path).unwrap();
        assert_eq!(reg.entries(), ["Steel", "Oak", "PVC"]);
    }

    #[test]
    fn test_empty_file_falls_back_to_defaults() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("material_types.txt");
        std::fs::write(&path, "").unwrap();

        let reg = MaterialRegistry::load(&path).unwrap();
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn test_add_persists() {
        let tmp = tempdir().unwrap();
        let mut reg = registry_in(tmp.path());

        assert_eq!(reg.add(Some("Brass")).unwrap(), AddMaterial::Added);
        let contents = std::fs::read_to_string(reg.path()).unwrap();
        assert_eq!(contents, "Type A\nType B\nType C\nBrass");
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let tmp = tempdir().unwrap();
        let mut reg = registry_in(tmp.path());

        reg.add(Some("X")).unwrap();
        let err = reg.add(Some("X")).unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));
        assert_eq!(reg.len(), 4);
    }

    #[test]
    fn test_add_rejects_line_breaks() {
        let tmp = tempdir().unwrap();
        let mut reg = registry_in(tmp.path());

        for name in ["Oak\nPine", "Oak\r", "Oak\r\nPine"] {
            let err = reg.add(Some(name)).unwrap_err();
            assert!(matches!(err, RegistryError::InvalidName { .. }));
        }
        assert_eq!(reg.len(), 3);

        reg.add(Some("Oak")).unwrap();
        let reloaded = registry_in(tmp.path());
        assert_eq!(reloaded.entries(), reg.entries());
    }

    #[test]
    fn test_add_cancelled_is_noop() {
        let tmp = tempdir().unwrap();
        let mut reg = registry_in(tmp.path());

        assert_eq!(reg.add(None).unwrap(), AddMaterial::Cancelled);
        assert_eq!(reg.add(Some("")).unwrap(), AddMaterial::Cancelled);
        assert_eq!(reg.add(Some("   ")).unwrap(), AddMaterial::Cancelled);
        assert_eq!(reg.len(), 3);
        assert!(!reg.path().exists());
    }

    #[test]
    fn test_remove_selects_first() {
        let tmp = tempdir().unwrap();
        let mut reg = registry_in(tmp.path());

        reg.select("Type B").unwrap();
        reg.remove("Type B").unwrap();
        assert_eq!(reg.entries(), ["Type A", "Type C"]);
        assert_eq!(reg.selected(), "Type A");

        let reloaded = registry_in(tmp.path());
        assert_eq!(reloaded.entries(), ["Type A", "Type C"]);
    }

    #[test]
    fn test_remove_last_rejected() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("material_types.txt");
        std::fs::write(&path, "Only").unwrap();

        let mut reg = MaterialRegistry::load(&path).unwrap();
        let err = reg.remove("Only").unwrap_err();
        assert!(matches!(err, RegistryError::LastEntry { .. }));
        assert_eq!(reg.entries(), ["Only"]);
    }

    #[test]
    fn test_select_unknown_rejected() {
        let tmp = tempdir().unwrap();
        let mut reg = registry_in(tmp.path());

        assert!(matches!(
            reg.select("Granite"),
            Err(RegistryError::Unknown { .. })
        ));
        assert_eq!(reg.selected(), "Type A");
    }

    #[test]
    fn test_persist_reload_preserves_order() {
        let tmp = tempdir().unwrap();
        let mut reg = registry_in(tmp.path());
        for name in ["Zinc", "Aluminium", "Copper"] {
            reg.add(Some(name)).unwrap();
        }

        let reloaded = registry_in(tmp.path());
        assert_eq!(reloaded.entries(), reg.entries());
    }

    #[test]
    fn test_choices_follow_mutations() {
        let tmp = tempdir().unwrap();
        let mut reg = registry_in(tmp.path());

        reg.select("Type C").unwrap();
        let before = reg.choices();
        assert_eq!(before.selected_name(), "Type C");

        reg.add(Some("Glass")).unwrap();
        assert_eq!(reg.choices().entries.len(), 4);
        assert_eq!(reg.choices().selected_name(), "Type C");

        reg.remove("Type C").unwrap();
        let after = reg.choices();
        assert_eq!(after.selected, 0);
        assert_eq!(after.entries, ["Type A", "Type B", "Glass"]);
    }
}
