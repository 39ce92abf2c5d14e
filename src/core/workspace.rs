//! Workspace discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::sheet::SheetFormat;

/// Name of the marker directory at the workspace root
pub const MARKER_DIR: &str = ".stockroom";

/// Represents a stockroom workspace
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Root directory of the workspace (parent of .stockroom/)
    root: PathBuf,
}

impl Workspace {
    /// Find the workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current = std::env::current_dir()
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find the workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        loop {
            if current.join(MARKER_DIR).is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new workspace at the given path
    pub fn init(path: &Path, format: SheetFormat) -> Result<Self, WorkspaceError> {
        let root = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        if root.join(MARKER_DIR).exists() {
            return Err(WorkspaceError::AlreadyExists(root));
        }

        Self::write_structure(root, format)
    }

    /// Initialize even if .stockroom/ exists, rewriting its config
    ///
    /// Existing material and inventory files are left alone.
    pub fn init_force(path: &Path, format: SheetFormat) -> Result<Self, WorkspaceError> {
        let root = path
            .canonicalize()
            .unwrap_or_else(|_| path.to_path_buf());

        Self::write_structure(root, format)
    }

    fn write_structure(root: PathBuf, format: SheetFormat) -> Result<Self, WorkspaceError> {
        let dir = root.join(MARKER_DIR);
        std::fs::create_dir_all(&dir).map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        std::fs::write(dir.join("config.yaml"), Self::default_config(format))
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        tracing::info!(root = %root.display(), %format, "initialized workspace");
        Ok(Self { root })
    }

    fn default_config(format: SheetFormat) -> String {
        format!(
            r#"# Stockroom workspace configuration
# Paths are relative to the workspace root.

# Material types, one per line
material_file: material_types.txt

# Inventory sheet (.xlsx or .csv)
inventory_file: inventory.{}

# Start each session with "Export to Excel" enabled
export: false
"#,
            format.extension()
        )
    }

    /// Get the workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .stockroom configuration directory
    pub fn config_dir(&self) -> PathBuf {
        self.root.join(MARKER_DIR)
    }

    /// Resolve a configured path against the workspace root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

/// Errors that can occur during workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("not a stockroom workspace (searched from {searched_from:?}). Run 'stockroom init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("stockroom workspace already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_workspace_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path(), SheetFormat::Xlsx).unwrap();

        assert!(ws.config_dir().is_dir());
        let config = std::fs::read_to_string(ws.config_dir().join("config.yaml")).unwrap();
        assert!(config.contains("inventory_file: inventory.xlsx"));
    }

    #[test]
    fn test_workspace_init_csv() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path(), SheetFormat::Csv).unwrap();

        let config = std::fs::read_to_string(ws.config_dir().join("config.yaml")).unwrap();
        assert!(config.contains("inventory_file: inventory.csv"));
    }

    #[test]
    fn test_workspace_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path(), SheetFormat::Xlsx).unwrap();

        let err = Workspace::init(tmp.path(), SheetFormat::Xlsx).unwrap_err();
        assert!(matches!(err, WorkspaceError::AlreadyExists(_)));
    }

    #[test]
    fn test_workspace_init_force_keeps_data() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path(), SheetFormat::Xlsx).unwrap();
        std::fs::write(tmp.path().join("material_types.txt"), "Oak").unwrap();

        Workspace::init_force(tmp.path(), SheetFormat::Csv).unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("material_types.txt")).unwrap(),
            "Oak"
        );
    }

    #[test]
    fn test_workspace_discover_finds_marker() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path(), SheetFormat::Xlsx).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let ws = Workspace::discover_from(&subdir).unwrap();
        assert_eq!(
            ws.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_workspace_discover_fails_without_marker() {
        let tmp = tempdir().unwrap();
        let err = Workspace::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::NotFound { .. }));
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path(), SheetFormat::Xlsx).unwrap();

        assert_eq!(
            ws.resolve(Path::new("inventory.xlsx")),
            ws.root().join("inventory.xlsx")
        );
        let abs = tmp.path().join("elsewhere.csv");
        assert_eq!(ws.resolve(&abs), abs);
    }
}
