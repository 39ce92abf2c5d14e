//! Inventory record - one row of the inventory table

use serde::{Deserialize, Serialize};

/// A single inventory row
///
/// Rows are keyed by the (product name, material type) pair. Quantity is
/// a plain signed integer; only integer-ness is checked on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryRecord {
    /// Product name (never empty for rows created by `add`)
    pub product_name: String,

    /// Quantity on hand
    pub quantity: i64,

    /// Material type category
    pub material_type: String,
}

impl InventoryRecord {
    pub fn new(
        product_name: impl Into<String>,
        quantity: i64,
        material_type: impl Into<String>,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            material_type: material_type.into(),
        }
    }

    /// Case-insensitive literal substring match on the product name
    ///
    /// An empty needle matches every row.
    pub fn name_contains(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        self.product_name
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }

    /// True if this row carries exactly the given name and material
    pub fn is_same_entry(&self, product_name: &str, material_type: &str) -> bool {
        self.product_name == product_name && self.material_type == material_type
    }
}
