//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::Workspace;

/// Default material file name, relative to the workspace root
pub const DEFAULT_MATERIAL_FILE: &str = "material_types.txt";

/// Default inventory file name, relative to the workspace root
pub const DEFAULT_INVENTORY_FILE: &str = "inventory.xlsx";

/// Stockroom configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Material types file
    pub material_file: Option<PathBuf>,

    /// Inventory sheet (.xlsx or .csv)
    pub inventory_file: Option<PathBuf>,

    /// Initial state of the export toggle
    pub export: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load(workspace: &Workspace) -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. Global user config (~/.config/stockroom/config.yaml)
        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        // 3. Workspace config (.stockroom/config.yaml)
        let workspace_path = workspace.config_dir().join("config.yaml");
        if let Some(local) = Self::read_file(&workspace_path) {
            config.merge(local);
        }

        // 4. Environment variables
        if let Ok(value) = std::env::var("STOCKROOM_EXPORT") {
            match parse_flag(&value) {
                Some(flag) => config.export = Some(flag),
                None => tracing::warn!(value = %value, "ignoring unrecognized STOCKROOM_EXPORT"),
            }
        }

        config
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "stockroom")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read config");
                return None;
            }
        };
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not parse config");
                None
            }
        }
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.material_file.is_some() {
            self.material_file = other.material_file;
        }
        if other.inventory_file.is_some() {
            self.inventory_file = other.inventory_file;
        }
        if other.export.is_some() {
            self.export = other.export;
        }
    }

    /// Absolute path of the material file
    pub fn material_path(&self, workspace: &Workspace) -> PathBuf {
        let rel = self
            .material_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MATERIAL_FILE));
        workspace.resolve(&rel)
    }

    /// Absolute path of the inventory sheet
    pub fn inventory_path(&self, workspace: &Workspace) -> PathBuf {
        let rel = self
            .inventory_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INVENTORY_FILE));
        workspace.resolve(&rel)
    }

    /// Initial export toggle state
    pub fn export(&self) -> bool {
        self.export.unwrap_or(false)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sheet::SheetFormat;
    use tempfile::tempdir;

    #[test]
    fn test_merge_prefers_other() {
        let mut base = Config {
            material_file: Some(PathBuf::from("a.txt")),
            inventory_file: None,
            export: Some(false),
        };
        base.merge(Config {
            material_file: None,
            inventory_file: Some(PathBuf::from("b.csv")),
            export: Some(true),
        });

        assert_eq!(base.material_file, Some(PathBuf::from("a.txt")));
        assert_eq!(base.inventory_file, Some(PathBuf::from("b.csv")));
        assert!(base.export());
    }

    #[test]
    fn test_defaults_resolve_in_workspace() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path(), SheetFormat::Xlsx).unwrap();
        let config = Config::default();

        assert_eq!(config.material_path(&ws), ws.root().join("material_types.txt"));
        assert_eq!(config.inventory_path(&ws), ws.root().join("inventory.xlsx"));
        assert!(!config.export());
    }

    #[test]
    fn test_workspace_config_is_read() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path(), SheetFormat::Csv).unwrap();

        let config = Config::read_file(&ws.config_dir().join("config.yaml")).unwrap();
        assert_eq!(config.inventory_file, Some(PathBuf::from("inventory.csv")));
        assert_eq!(config.material_file, Some(PathBuf::from("material_types.txt")));
        assert_eq!(config.export, Some(false));
    }

    #[test]
    fn test_bad_config_is_ignored() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "export: [not, a, bool]\n").unwrap();
        assert!(Config::read_file(&path).is_none());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("TRUE"), Some(true));
        assert_eq!(parse_flag(" 0 "), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
