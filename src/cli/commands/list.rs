//! `stockroom list` command - Print every entry in the inventory file

use console::style;
use miette::Result;

use crate::cli::commands::utils::open_form;
use crate::cli::helpers::plural;
use crate::cli::table::{render_records, resolve_format};
use crate::cli::{GlobalOpts, OutputFormat};

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    /// Show only the number of entries
    #[arg(long)]
    pub count: bool,
}

pub fn run(args: ListArgs, global: &GlobalOpts) -> Result<()> {
    let form = open_form(global)?;
    let table = &form.state().table;
    let rows = table.rows();

    if args.count {
        println!("{}", rows.len());
        return Ok(());
    }

    if !table.path().exists() {
        println!("Inventory file not found");
        return Ok(());
    }

    if rows.is_empty() {
        println!("No entries found.");
        return Ok(());
    }

    let format = resolve_format(global.format);
    println!("{}", render_records(rows, format));

    if format == OutputFormat::Table && !global.quiet {
        println!(
            "{} {} in {}",
            style(rows.len()).cyan(),
            plural(rows.len(), "entry", "entries"),
            style(table.path().display()).dim()
        );
    }

    Ok(())
}
