//! Entity type definitions
//!
//! - [`InventoryRecord`] - a product row with quantity and material type

pub mod record;

pub use record::InventoryRecord;
