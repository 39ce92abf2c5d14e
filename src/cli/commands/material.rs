//! `stockroom material` command - Material type management

use clap::Subcommand;
use console::style;
use miette::Result;

use crate::cli::commands::utils::open_registry;
use crate::cli::notice::print_notice;
use crate::cli::table::render_materials;
use crate::cli::GlobalOpts;
use crate::core::AddMaterial;
use crate::form::Notice;

#[derive(Subcommand, Debug)]
pub enum MaterialCommands {
    /// List material types in order (the first one is the default)
    List,

    /// Add a material type
    Add(AddArgs),

    /// Remove a material type
    #[command(visible_alias = "rm")]
    Remove(RemoveArgs),
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// Name of the new material type
    pub name: String,
}

#[derive(clap::Args, Debug)]
pub struct RemoveArgs {
    /// Material type to remove
    pub name: String,
}

pub fn run(cmd: MaterialCommands, global: &GlobalOpts) -> Result<()> {
    match cmd {
        MaterialCommands::List => run_list(global),
        MaterialCommands::Add(args) => run_add(args, global),
        MaterialCommands::Remove(args) => run_remove(args, global),
    }
}

fn run_list(global: &GlobalOpts) -> Result<()> {
    let registry = open_registry(global)?;
    let choices = registry.choices();
    println!(
        "{}",
        render_materials(&choices.entries, choices.selected, global.format)
    );
    Ok(())
}

fn run_add(args: AddArgs, global: &GlobalOpts) -> Result<()> {
    let mut registry = open_registry(global)?;
    match registry.add(Some(&args.name))? {
        AddMaterial::Added => print_notice(&Notice::material_added(&args.name), global.format),
        AddMaterial::Cancelled => println!(
            "{} Material name is empty; nothing added",
            style("!").yellow()
        ),
    }
    Ok(())
}

fn run_remove(args: RemoveArgs, global: &GlobalOpts) -> Result<()> {
    let mut registry = open_registry(global)?;
    registry.remove(&args.name)?;
    let notice = Notice::material_removed(&args.name, registry.selected());
    print_notice(&notice, global.format);
    Ok(())
}
