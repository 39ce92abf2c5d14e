//! Spreadsheet codec for the inventory file
//!
//! The inventory is stored as a three-column sheet with the header row
//! `Product Name`, `Quantity`, `Material Type` and no index column. The
//! format follows the file extension:
//!
//! - `.xlsx` - Excel workbook (first worksheet is read, one sheet is written)
//! - `.csv` - comma-separated values
//!
//! Writes always replace the whole file.

use calamine::{open_workbook_auto, Data, Reader};
use miette::Diagnostic;
use rust_xlsxwriter::{Format, Workbook};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::entities::InventoryRecord;

/// Header names, in column order
pub const HEADERS: [&str; 3] = ["Product Name", "Quantity", "Material Type"];

/// Largest magnitude a workbook number cell holds exactly
const MAX_EXACT_NUMBER: u64 = 1 << 53;

/// On-disk format of the inventory file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Xlsx,
    Csv,
}

impl SheetFormat {
    /// Pick the format from a file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self, SheetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase());

        match ext.as_deref() {
            Some("xlsx") => Ok(SheetFormat::Xlsx),
            Some("csv") => Ok(SheetFormat::Csv),
            _ => Err(SheetError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Default file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "xlsx",
            SheetFormat::Csv => "csv",
        }
    }

    /// Human-readable name used in messages
    pub fn label(&self) -> &'static str {
        match self {
            SheetFormat::Xlsx => "Excel",
            SheetFormat::Csv => "CSV",
        }
    }
}

impl std::fmt::Display for SheetFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// Errors raised while reading or writing the inventory sheet
#[derive(Debug, Error, Diagnostic)]
pub enum SheetError {
    #[error("unsupported inventory file type: {path:?}")]
    #[diagnostic(
        code(stockroom::sheet::format),
        help("use a .xlsx or .csv file name for inventory_file")
    )]
    UnsupportedFormat { path: PathBuf },

    #[error("inventory file {path:?} has no '{column}' column")]
    #[diagnostic(code(stockroom::sheet::column))]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("inventory file {path:?} has no worksheet")]
    #[diagnostic(code(stockroom::sheet::empty))]
    NoWorksheet { path: PathBuf },

    #[error("row {row} of {path:?}: quantity '{value}' is not an integer")]
    #[diagnostic(code(stockroom::sheet::quantity))]
    BadQuantity {
        path: PathBuf,
        row: usize,
        value: String,
    },

    #[error("failed to read CSV: {0}")]
    #[diagnostic(code(stockroom::sheet::csv))]
    Csv(#[from] csv::Error),

    #[error("failed to read workbook: {0}")]
    #[diagnostic(code(stockroom::sheet::xlsx_read))]
    XlsxRead(#[from] calamine::Error),

    #[error("failed to write workbook: {0}")]
    #[diagnostic(code(stockroom::sheet::xlsx_write))]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Read every row of the inventory file
pub fn read_records(path: &Path) -> Result<Vec<InventoryRecord>, SheetError> {
    let rows = match SheetFormat::from_path(path)? {
        SheetFormat::Xlsx => read_xlsx_rows(path)?,
        SheetFormat::Csv => read_csv_rows(path)?,
    };

    let mut iter = rows.into_iter();
    let headers = match iter.next() {
        Some(h) => h,
        // A file without even a header row holds no records
        None => return Ok(Vec::new()),
    };
    let columns = ColumnMap::from_headers(&headers, path)?;

    let mut records = Vec::new();
    for (i, row) in iter.enumerate() {
        if row.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        // +2: one for the header, one for 1-based numbering
        records.push(columns.record(&row, i + 2, path)?);
    }

    tracing::debug!(path = %path.display(), rows = records.len(), "read inventory sheet");
    Ok(records)
}

/// Overwrite the inventory file with the given rows
pub fn write_records(path: &Path, records: &[InventoryRecord]) -> Result<(), SheetError> {
    match SheetFormat::from_path(path)? {
        SheetFormat::Xlsx => write_xlsx(path, records)?,
        SheetFormat::Csv => write_csv(path, records)?,
    }
    tracing::debug!(path = %path.display(), rows = records.len(), "wrote inventory sheet");
    Ok(())
}

/// Column positions resolved from the header row
struct ColumnMap {
    name: usize,
    quantity: usize,
    material: usize,
}

impl ColumnMap {
    fn from_headers(headers: &[String], path: &Path) -> Result<Self, SheetError> {
        let map: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let find = |column: &'static str| {
            map.get(&column.to_lowercase())
                .copied()
                .ok_or_else(|| SheetError::MissingColumn {
                    path: path.to_path_buf(),
                    column,
                })
        };

        Ok(Self {
            name: find(HEADERS[0])?,
            quantity: find(HEADERS[1])?,
            material: find(HEADERS[2])?,
        })
    }

    fn record(&self, row: &[String], row_number: usize, path: &Path) -> Result<InventoryRecord, SheetError> {
        let cell = |idx: usize| row.get(idx).map(String::as_str).unwrap_or("");

        let raw_quantity = cell(self.quantity).trim();
        let quantity = parse_cell_quantity(raw_quantity).ok_or_else(|| SheetError::BadQuantity {
            path: path.to_path_buf(),
            row: row_number,
            value: raw_quantity.to_string(),
        })?;

        Ok(InventoryRecord::new(
            cell(self.name),
            quantity,
            cell(self.material),
        ))
    }
}

/// Parse a stored quantity; integer-valued floats ("5.0") are accepted
fn parse_cell_quantity(raw: &str) -> Option<i64> {
    if let Ok(n) = raw.parse::<i64>() {
        return Some(n);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>, SheetError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(String::from).collect());
    }
    Ok(rows)
}

fn read_xlsx_rows(path: &Path) -> Result<Vec<Vec<String>>, SheetError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SheetError::NoWorksheet {
            path: path.to_path_buf(),
        })??;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect())
        .collect())
}

/// Render a workbook cell as the text the row parser expects
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            format!("{}", *f as i64)
        }
        other => other.to_string(),
    }
}

fn write_csv(path: &Path, records: &[InventoryRecord]) -> Result<(), SheetError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(HEADERS)?;
    for rec in records {
        writer.write_record([
            rec.product_name.as_str(),
            rec.quantity.to_string().as_str(),
            rec.material_type.as_str(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_xlsx(path: &Path, records: &[InventoryRecord]) -> Result<(), SheetError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    let header_format = Format::new().set_bold();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (i, rec) in records.iter().enumerate() {
        let row = (i as u32) + 1;
        worksheet.write_string(row, 0, &rec.product_name)?;
        // Beyond 2^53 a number cell rounds, so those quantities are stored as text
        if rec.quantity.unsigned_abs() > MAX_EXACT_NUMBER {
            worksheet.write_string(row, 1, rec.quantity.to_string())?;
        } else {
            worksheet.write_number(row, 1, rec.quantity as f64)?;
        }
        worksheet.write_string(row, 2, &rec.material_type)?;
    }

    worksheet.set_column_width(0, 24.0)?;
    worksheet.set_column_width(2, 18.0)?;

    workbook.save(path)?;
    Ok(())
}
