//! Form controller - maps user actions onto the registry and the table

use miette::Diagnostic;
use thiserror::Error;

use crate::core::{
    AddMaterial, AddOutcome, Config, InventoryError, InventoryTable, MaterialChoices,
    MaterialRegistry, RegistryError, SheetFormat, Workspace,
};
use crate::form::notice::Notice;

/// Errors surfaced by form actions
#[derive(Debug, Error, Diagnostic)]
pub enum FormError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Registry(#[from] RegistryError),
}

impl FormError {
    /// Convert to the error notice shown in the form
    pub fn to_notice(&self) -> Notice {
        Notice::error(self.to_string())
    }
}

/// Everything the program knows at runtime, owned by the controller
#[derive(Debug)]
pub struct AppState {
    pub workspace: Workspace,
    pub registry: MaterialRegistry,
    pub table: InventoryTable,
    /// "Export to Excel" toggle
    pub export: bool,
}

impl AppState {
    /// Load the registry and table for a workspace
    pub fn open(workspace: Workspace, config: &Config) -> Result<Self, FormError> {
        let registry = MaterialRegistry::load(&config.material_path(&workspace))?;
        let table = InventoryTable::load(&config.inventory_path(&workspace))?;

        tracing::debug!(
            root = %workspace.root().display(),
            materials = registry.len(),
            rows = table.rows().len(),
            "opened workspace"
        );

        Ok(Self {
            workspace,
            registry,
            table,
            export: config.export(),
        })
    }
}

/// Text input fields of the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub product_name: String,
    pub quantity: String,
    pub search: String,
}

/// Request/response glue between the surface and the stores
#[derive(Debug)]
pub struct FormController {
    state: AppState,
    pub fields: FormFields,
}

impl FormController {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            fields: FormFields::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Current selector contents
    pub fn materials(&self) -> MaterialChoices {
        self.state.registry.choices()
    }

    pub fn export(&self) -> bool {
        self.state.export
    }

    pub fn set_export(&mut self, export: bool) {
        self.state.export = export;
    }

    /// Flip the export toggle and return the new state
    pub fn toggle_export(&mut self) -> bool {
        self.state.export = !self.state.export;
        self.state.export
    }

    pub fn select_material(&mut self, name: &str) -> Result<(), FormError> {
        Ok(self.state.registry.select(name)?)
    }

    /// Add the entry described by the fields and the selected material
    ///
    /// Product name and quantity are cleared only on success.
    pub fn add_entry(&mut self) -> Result<Notice, FormError> {
        let material = self.state.registry.selected().to_string();
        let report = self.state.table.add_entry(
            &self.fields.product_name,
            &self.fields.quantity,
            &material,
            self.state.export,
        )?;

        let mut message = if report.exported {
            format!(
                "Entry added successfully and data exported to {}",
                self.sheet_label()
            )
        } else {
            "Entry added successfully".to_string()
        };

        if let AddOutcome::Accumulated {
            total,
            material_type,
        } = &report.outcome
        {
            message.push_str(&format!(
                "\nQuantity for '{}' ({}) is now {}",
                self.fields.product_name, material_type, total
            ));
        }

        self.fields.product_name.clear();
        self.fields.quantity.clear();
        Ok(Notice::info("Success", message))
    }

    /// Add a material type from a prompt answer
    ///
    /// `Ok(None)` means the prompt was cancelled and nothing happened.
    pub fn add_material(&mut self, input: Option<&str>) -> Result<Option<Notice>, FormError> {
        match self.state.registry.add(input)? {
            AddMaterial::Cancelled => Ok(None),
            AddMaterial::Added => Ok(Some(Notice::material_added(input.unwrap_or_default()))),
        }
    }

    /// Remove the selected material type
    pub fn remove_material(&mut self) -> Result<Notice, FormError> {
        let selected = self.state.registry.selected().to_string();
        self.state.registry.remove(&selected)?;
        Ok(Notice::material_removed(
            &selected,
            self.state.registry.selected(),
        ))
    }

    /// Search the inventory file with the search field
    ///
    /// Reloads the table from disk, so unexported entries disappear.
    pub fn search(&mut self) -> Result<Notice, FormError> {
        match self.state.table.search(&self.fields.search) {
            Ok(rows) if rows.is_empty() => {
                Ok(Notice::info("Search Result", "No matching entries found"))
            }
            Ok(rows) => {
                let message = format!(
                    "{} matching {} found",
                    rows.len(),
                    if rows.len() == 1 { "entry" } else { "entries" }
                );
                Ok(Notice::info("Search Result", message).with_rows(rows))
            }
            Err(InventoryError::NotFound { .. }) => {
                Ok(Notice::info("Search Result", "Inventory file not found"))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn sheet_label(&self) -> &'static str {
        SheetFormat::from_path(self.state.table.path())
            .map(|f| f.label())
            .unwrap_or("file")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::InventoryRecord;
    use crate::form::notice::NoticeLevel;
    use tempfile::{tempdir, TempDir};

    fn controller() -> (TempDir, FormController) {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path(), SheetFormat::Xlsx).unwrap();
        let state = AppState::open(ws, &Config::default()).unwrap();
        (tmp, FormController::new(state))
    }

    fn fill(form: &mut FormController, name: &str, qty: &str) {
        form.fields.product_name = name.to_string();
        form.fields.quantity = qty.to_string();
    }

    #[test]
    fn test_add_entry_clears_fields_on_success() {
        let (_tmp, mut form) = controller();
        fill(&mut form, "Widget", "5");

        let notice = form.add_entry().unwrap();
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.message, "Entry added successfully");
        assert!(form.fields.product_name.is_empty());
        assert!(form.fields.quantity.is_empty());
        assert!(!form.state().table.path().exists());
    }

    #[test]
    fn test_add_entry_keeps_fields_on_error() {
        let (_tmp, mut form) = controller();
        fill(&mut form, "Widget", "abc");

        let err = form.add_entry().unwrap_err();
        assert_eq!(err.to_notice().message, "Quantity must be a valid integer");
        assert_eq!(form.fields.product_name, "Widget");
        assert_eq!(form.fields.quantity, "abc");
        assert!(form.state().table.rows().is_empty());
    }

    #[test]
    fn test_add_entry_with_export() {
        let (_tmp, mut form) = controller();
        form.set_export(true);
        fill(&mut form, "Widget", "5");

        let notice = form.add_entry().unwrap();
        assert_eq!(
            notice.message,
            "Entry added successfully and data exported to Excel"
        );
        assert!(form.state().table.path().exists());
    }

    #[test]
    fn test_widget_scenario() {
        let (_tmp, mut form) = controller();
        assert_eq!(form.materials().entries, ["Type A", "Type B", "Type C"]);

        fill(&mut form, "Widget", "5");
        form.select_material("Type A").unwrap();
        form.add_entry().unwrap();

        fill(&mut form, "Widget", "3");
        form.select_material("Type B").unwrap();
        let notice = form.add_entry().unwrap();
        assert!(notice.message.contains("is now 8"));

        assert_eq!(
            form.state().table.rows(),
            [InventoryRecord::new("Widget", 8, "Type A")]
        );
    }

    #[test]
    fn test_duplicate_entry_notice() {
        let (_tmp, mut form) = controller();
        fill(&mut form, "Widget", "5");
        form.add_entry().unwrap();

        fill(&mut form, "Widget", "5");
        let err = form.add_entry().unwrap_err();
        let notice = err.to_notice();
        assert!(notice.is_error());
        assert_eq!(
            notice.message,
            "Product name already exists with the same material type."
        );
        assert_eq!(form.state().table.rows()[0].quantity, 5);
    }

    #[test]
    fn test_material_add_remove_notices() {
        let (_tmp, mut form) = controller();

        assert!(form.add_material(None).unwrap().is_none());
        assert!(form.add_material(Some("Brass")).unwrap().is_some());

        let err = form.add_material(Some("Brass")).unwrap_err();
        assert_eq!(err.to_notice().message, "Material type already exists.");

        form.select_material("Brass").unwrap();
        let notice = form.remove_material().unwrap();
        assert!(notice.message.contains("'Type A' is now selected"));
        assert_eq!(form.materials().selected_name(), "Type A");
    }

    #[test]
    fn test_remove_only_material_notice() {
        let (_tmp, mut form) = controller();
        form.remove_material().unwrap();
        form.remove_material().unwrap();

        let err = form.remove_material().unwrap_err();
        assert_eq!(
            err.to_notice().message,
            "Cannot remove the only material type."
        );
        assert_eq!(form.materials().entries, ["Type C"]);
    }

    #[test]
    fn test_search_notices() {
        let (_tmp, mut form) = controller();

        let notice = form.search().unwrap();
        assert_eq!(notice.message, "Inventory file not found");

        form.set_export(true);
        fill(&mut form, "Gear", "2");
        form.add_entry().unwrap();

        form.fields.search = "GEA".to_string();
        let notice = form.search().unwrap();
        assert_eq!(notice.message, "1 matching entry found");
        assert_eq!(notice.rows, vec![InventoryRecord::new("Gear", 2, "Type A")]);

        form.fields.search = "sprocket".to_string();
        let notice = form.search().unwrap();
        assert_eq!(notice.message, "No matching entries found");
        assert!(notice.rows.is_empty());
    }

    #[test]
    fn test_toggle_export() {
        let (_tmp, mut form) = controller();
        assert!(!form.export());
        assert!(form.toggle_export());
        assert!(!form.toggle_export());
    }
}
