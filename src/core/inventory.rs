//! Inventory table
//!
//! Rows live in memory and are mirrored to the inventory sheet only on
//! export. Search always goes back to the sheet, so it sees the last
//! exported state rather than the current session's edits.

use miette::Diagnostic;
use std::num::IntErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::sheet::{self, SheetError};
use crate::entities::InventoryRecord;

/// Input rejected before touching the table
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ValidationError {
    #[error("Please fill in all fields")]
    #[diagnostic(code(stockroom::entry::missing_fields))]
    MissingFields,

    #[error("Quantity must be a valid integer")]
    #[diagnostic(
        code(stockroom::entry::quantity),
        help("got '{value}'; use a whole number such as 5 or -2")
    )]
    InvalidQuantity { value: String },

    #[error("Quantity is out of range")]
    #[diagnostic(
        code(stockroom::entry::quantity_range),
        help("got '{value}'; quantities must lie between -9223372036854775808 and 9223372036854775807")
    )]
    QuantityOutOfRange { value: String },
}

/// Errors from table operations
#[derive(Debug, Error, Diagnostic)]
pub enum InventoryError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Validation(#[from] ValidationError),

    #[error("Product name already exists with the same material type.")]
    #[diagnostic(
        code(stockroom::entry::duplicate),
        help("'{product_name}' is already recorded as '{material_type}'")
    )]
    Duplicate {
        product_name: String,
        material_type: String,
    },

    #[error("Inventory file not found")]
    #[diagnostic(code(stockroom::inventory::not_found))]
    NotFound { path: PathBuf },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Sheet(#[from] SheetError),
}

/// What `add_entry` did to the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new row was appended
    Inserted,
    /// The quantity was added to an existing row with the same name
    Accumulated {
        total: i64,
        /// Material type of the row that received the quantity
        material_type: String,
    },
}

/// Result of a successful add
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddReport {
    pub outcome: AddOutcome,
    /// True if the whole table was written to the inventory file
    pub exported: bool,
}

/// Parse a quantity field
///
/// Any sign is accepted and surrounding whitespace is ignored. Integers
/// beyond the `i64` range are rejected with
/// [`ValidationError::QuantityOutOfRange`] rather than the generic
/// "not an integer" error.
pub fn parse_quantity(text: &str) -> Result<i64, ValidationError> {
    text.trim().parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ValidationError::QuantityOutOfRange {
                value: text.to_string(),
            }
        }
        _ => ValidationError::InvalidQuantity {
            value: text.to_string(),
        },
    })
}

/// In-memory inventory with its backing sheet
#[derive(Debug)]
pub struct InventoryTable {
    path: PathBuf,
    rows: Vec<InventoryRecord>,
}

impl InventoryTable {
    /// Load rows from the sheet, or start empty if the file does not exist
    pub fn load(path: &Path) -> Result<Self, InventoryError> {
        let rows = if path.exists() {
            sheet::read_records(path)?
        } else {
            tracing::debug!(path = %path.display(), "no inventory file, starting empty");
            Vec::new()
        };

        Ok(Self {
            path: path.to_path_buf(),
            rows,
        })
    }

    pub fn rows(&self) -> &[InventoryRecord] {
        &self.rows
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a row or accumulate onto an existing one
    ///
    /// A second add for an existing product name with a different material
    /// type adds to the FIRST row carrying that name and leaves its material
    /// type untouched. Only an exact (name, material) match is a duplicate.
    pub fn add_entry(
        &mut self,
        product_name: &str,
        quantity_text: &str,
        material_type: &str,
        export: bool,
    ) -> Result<AddReport, InventoryError> {
        if product_name.is_empty() || quantity_text.is_empty() {
            return Err(ValidationError::MissingFields.into());
        }
        let quantity = parse_quantity(quantity_text)?;

        if self
            .rows
            .iter()
            .any(|r| r.is_same_entry(product_name, material_type))
        {
            return Err(InventoryError::Duplicate {
                product_name: product_name.to_string(),
                material_type: material_type.to_string(),
            });
        }

        let outcome = match self
            .rows
            .iter_mut()
            .find(|r| r.product_name == product_name)
        {
            Some(row) => {
                row.quantity = row.quantity.saturating_add(quantity);
                tracing::info!(
                    product = product_name,
                    material = %row.material_type,
                    total = row.quantity,
                    "accumulated quantity onto existing row"
                );
                AddOutcome::Accumulated {
                    total: row.quantity,
                    material_type: row.material_type.clone(),
                }
            }
            None => {
                self.rows
                    .push(InventoryRecord::new(product_name, quantity, material_type));
                tracing::info!(product = product_name, material = material_type, quantity, "inserted row");
                AddOutcome::Inserted
            }
        };

        if export {
            self.save()?;
        }

        Ok(AddReport {
            outcome,
            exported: export,
        })
    }

    /// Search the inventory file by product name
    ///
    /// Replaces the in-memory rows with the file contents first, discarding
    /// anything that was never exported. A missing file is `NotFound` and
    /// leaves the table untouched.
    pub fn search(&mut self, query: &str) -> Result<Vec<InventoryRecord>, InventoryError> {
        if !self.path.exists() {
            return Err(InventoryError::NotFound {
                path: self.path.clone(),
            });
        }

        self.reload()?;
        let matches: Vec<_> = self
            .rows
            .iter()
            .filter(|r| r.name_contains(query))
            .cloned()
            .collect();

        tracing::debug!(query, matches = matches.len(), "searched inventory");
        Ok(matches)
    }

    /// Replace the in-memory rows with the file contents
    pub fn reload(&mut self) -> Result<(), InventoryError> {
        self.rows = sheet::read_records(&self.path)?;
        Ok(())
    }

    /// Overwrite the inventory file with every row
    pub fn save(&self) -> Result<(), InventoryError> {
        sheet::write_records(&self.path, &self.rows)?;
        tracing::info!(path = %self.path.display(), rows = self.rows.len(), "exported inventory");
        Ok(())
    }
}
