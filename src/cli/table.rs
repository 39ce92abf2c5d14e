//! Table formatting for inventory rows and material lists
//!
//! Every listing goes through [`render_records`] so `list`, `search` and the
//! interactive form print rows the same way.

use tabled::{builder::Builder, settings::Style};

use crate::cli::helpers::escape_csv;
use crate::cli::OutputFormat;
use crate::core::sheet::HEADERS;
use crate::entities::InventoryRecord;

/// Resolve `Auto` to a concrete format for stdout
pub fn resolve_format(format: OutputFormat) -> OutputFormat {
    match format {
        OutputFormat::Auto if console::Term::stdout().is_term() => OutputFormat::Table,
        OutputFormat::Auto => OutputFormat::Tsv,
        f => f,
    }
}

/// Render inventory rows in the requested format
///
/// The result has no trailing newline.
pub fn render_records(records: &[InventoryRecord], format: OutputFormat) -> String {
    match resolve_format(format) {
        OutputFormat::Json => {
            serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Csv => {
            let mut lines = vec![HEADERS.join(",")];
            lines.extend(records.iter().map(|r| {
                format!(
                    "{},{},{}",
                    escape_csv(&r.product_name),
                    r.quantity,
                    escape_csv(&r.material_type)
                )
            }));
            lines.join("\n")
        }
        OutputFormat::Tsv => records
            .iter()
            .map(|r| format!("{}\t{}\t{}", r.product_name, r.quantity, r.material_type))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Table | OutputFormat::Auto => {
            let mut builder = Builder::default();
            builder.push_record(HEADERS);
            for r in records {
                builder.push_record([
                    r.product_name.clone(),
                    r.quantity.to_string(),
                    r.material_type.clone(),
                ]);
            }
            builder.build().with(Style::rounded()).to_string()
        }
    }
}

/// Render material names, marking the selected one in table form
pub fn render_materials(names: &[String], selected: usize, format: OutputFormat) -> String {
    match resolve_format(format) {
        OutputFormat::Json => {
            serde_json::to_string_pretty(names).unwrap_or_else(|_| "[]".to_string())
        }
        OutputFormat::Csv => names
            .iter()
            .map(|n| escape_csv(n))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Tsv => names.join("\n"),
        OutputFormat::Table | OutputFormat::Auto => {
            let mut builder = Builder::default();
            builder.push_record(["", "Material Type"]);
            for (i, name) in names.iter().enumerate() {
                let mark = if i == selected { "*" } else { "" };
                builder.push_record([mark.to_string(), name.clone()]);
            }
            builder.build().with(Style::rounded()).to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<InventoryRecord> {
        vec![
            InventoryRecord::new("Widget", 8, "Type A"),
            InventoryRecord::new("Bolt, hex", 2, "Type B"),
        ]
    }

    #[test]
    fn test_tsv_rows() {
        let out = render_records(&rows(), OutputFormat::Tsv);
        assert_eq!(out, "Widget\t8\tType A\nBolt, hex\t2\tType B");
    }

    #[test]
    fn test_csv_has_header_and_escapes() {
        let out = render_records(&rows(), OutputFormat::Csv);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines[0], "Product Name,Quantity,Material Type");
        assert_eq!(lines[2], "\"Bolt, hex\",2,Type B");
    }

    #[test]
    fn test_json_rows() {
        let out = render_records(&rows(), OutputFormat::Json);
        let parsed: Vec<InventoryRecord> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed, rows());
    }

    #[test]
    fn test_table_contains_headers_and_values() {
        let out = render_records(&rows(), OutputFormat::Table);
        assert!(out.contains("Product Name"));
        assert!(out.contains("Material Type"));
        assert!(out.contains("Widget"));
        assert!(out.contains("Bolt, hex"));
    }

    #[test]
    fn test_materials_table_marks_selection() {
        let names = vec!["Type A".to_string(), "Type B".to_string()];
        let out = render_materials(&names, 1, OutputFormat::Table);
        let marked = out.lines().find(|l| l.contains("Type B")).unwrap();
        assert!(marked.contains('*'));
        assert_eq!(render_materials(&names, 0, OutputFormat::Tsv), "Type A\nType B");
    }
}
