//! Shared utilities for CLI commands

use miette::Result;

use crate::cli::GlobalOpts;
use crate::core::{Config, MaterialRegistry, Workspace};
use crate::form::{AppState, FormController};

/// Find the workspace from `--dir` or the current directory
pub fn discover_workspace(global: &GlobalOpts) -> Result<Workspace> {
    let found = match &global.dir {
        Some(dir) => Workspace::discover_from(dir),
        None => Workspace::discover(),
    };
    found.map_err(|e| miette::miette!("{}", e))
}

/// Discover the workspace, load config and open a form controller on it
pub fn open_form(global: &GlobalOpts) -> Result<FormController> {
    let workspace = discover_workspace(global)?;
    let config = Config::load(&workspace);
    let state = AppState::open(workspace, &config)?;
    Ok(FormController::new(state))
}

/// Open only the material registry, leaving the inventory file unread
pub fn open_registry(global: &GlobalOpts) -> Result<MaterialRegistry> {
    let workspace = discover_workspace(global)?;
    let config = Config::load(&workspace);
    Ok(MaterialRegistry::load(&config.material_path(&workspace))?)
}
