//! Terminal rendering of form notices

use console::style;

use crate::cli::table::render_records;
use crate::cli::OutputFormat;
use crate::form::{Notice, NoticeLevel};

/// Build the boxed text block for a notice
///
/// Attached rows are appended below the box in `format`.
pub fn render_notice(notice: &Notice, format: OutputFormat) -> String {
    let (icon, title) = match notice.level {
        NoticeLevel::Info => (style("✓").green(), style(&notice.title).bold()),
        NoticeLevel::Error => (style("✗").red(), style(&notice.title).red().bold()),
    };

    let width = notice
        .message
        .lines()
        .map(|l| l.chars().count())
        .chain(std::iter::once(notice.title.chars().count() + 2))
        .max()
        .unwrap_or(0)
        + 2;

    let mut out = String::new();
    out.push_str(&format!("{} {}\n", icon, title));
    out.push_str(&format!("{}\n", style("─".repeat(width)).dim()));
    for line in notice.message.lines() {
        out.push_str(&format!("  {}\n", line));
    }
    out.push_str(&format!("{}", style("─".repeat(width)).dim()));

    if !notice.rows.is_empty() {
        out.push('\n');
        out.push_str(&render_records(&notice.rows, format));
    }
    out
}

/// Print a notice: info to stdout, errors to stderr
pub fn print_notice(notice: &Notice, format: OutputFormat) {
    let text = render_notice(notice, format);
    if notice.is_error() {
        eprintln!("{}", text);
    } else {
        println!("{}", text);
    }
}
