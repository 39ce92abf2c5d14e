//! Core module - workspace, configuration and the two persisted stores

pub mod config;
pub mod inventory;
pub mod materials;
pub mod sheet;
pub mod workspace;

pub use config::Config;
pub use inventory::{AddOutcome, AddReport, InventoryError, InventoryTable, ValidationError};
pub use materials::{AddMaterial, MaterialChoices, MaterialRegistry, RegistryError};
pub use sheet::{SheetError, SheetFormat};
pub use workspace::{Workspace, WorkspaceError};
