//! `stockroom search` command - Search the inventory file by product name
//!
//! Always reads the inventory file, so only exported entries are found.

use miette::Result;

use crate::cli::commands::utils::open_form;
use crate::cli::notice::print_notice;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct SearchArgs {
    /// Text to look for in product names, case-insensitive (empty lists all)
    pub query: Option<String>,

    /// Show only the number of matches
    #[arg(long)]
    pub count: bool,
}

/// Run the search command
pub fn run(args: SearchArgs, global: &GlobalOpts) -> Result<()> {
    let mut form = open_form(global)?;
    form.fields.search = args.query.unwrap_or_default();

    let notice = form.search()?;

    if args.count {
        println!("{}", notice.rows.len());
        return Ok(());
    }

    print_notice(&notice, global.format);
    Ok(())
}
