//! `stockroom add` command - Add one inventory entry

use console::style;
use miette::Result;

use crate::cli::commands::utils::open_form;
use crate::cli::notice::print_notice;
use crate::cli::GlobalOpts;

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Product name
    pub name: String,

    /// Quantity (any whole number, negative allowed)
    #[arg(allow_hyphen_values = true)]
    pub quantity: String,

    /// Material type (default: first registered material type)
    #[arg(long, short = 'm')]
    pub material: Option<String>,

    /// Write the whole table to the inventory file after adding
    #[arg(long, short = 'e')]
    pub export: bool,
}

pub fn run(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut form = open_form(global)?;

    if let Some(material) = &args.material {
        form.select_material(material)?;
    }
    if args.export {
        form.set_export(true);
    }

    form.fields.product_name = args.name;
    form.fields.quantity = args.quantity;

    let notice = form.add_entry()?;
    print_notice(&notice, global.format);

    if !form.export() && !global.quiet {
        eprintln!(
            "{} Entry was not exported and is discarded when this command exits. Use {} to save it.",
            style("!").yellow(),
            style("--export").yellow()
        );
    }

    Ok(())
}
