//! Outcome notices shown to the user after each form action

use crate::entities::InventoryRecord;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A modal-style message produced by a form action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
    /// Search hits attached to a search result notice
    pub rows: Vec<InventoryRecord>,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
            rows: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: "Error".to_string(),
            message: message.into(),
            rows: Vec::new(),
        }
    }

    /// Confirmation for a newly added material type
    pub fn material_added(name: &str) -> Self {
        Self::info("Material Added", format!("Material type '{}' added.", name))
    }

    /// Confirmation for a removed material type and the new selection
    pub fn material_removed(removed: &str, selected: &str) -> Self {
        Self::info(
            "Material Removed",
            format!(
                "Material type '{}' removed. '{}' is now selected.",
                removed, selected
            ),
        )
    }

    pub fn with_rows(mut self, rows: Vec<InventoryRecord>) -> Self {
        self.rows = rows;
        self
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}
