//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs, completions::CompletionsArgs, form::FormArgs, init::InitArgs, list::ListArgs,
    material::MaterialCommands, search::SearchArgs,
};

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Stockroom inventory entry tool")]
#[command(long_about = "Record inventory entries (product, quantity, material type) into a spreadsheet, search them, and manage material types.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format for listings
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Only log errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Workspace root (default: auto-detect by finding .stockroom/)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new stockroom workspace
    Init(InitArgs),

    /// Open the interactive entry form
    Form(FormArgs),

    /// Add a single inventory entry
    Add(AddArgs),

    /// Search the inventory file by product name
    Search(SearchArgs),

    /// List every entry in the inventory file
    List(ListArgs),

    /// Material type management
    #[command(subcommand)]
    Material(MaterialCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table on a terminal, tsv when piped
    #[default]
    Auto,
    /// Boxed table
    Table,
    /// Tab-separated values (for piping)
    Tsv,
    /// CSV format (for spreadsheets)
    Csv,
    /// JSON format (for programming)
    Json,
}
