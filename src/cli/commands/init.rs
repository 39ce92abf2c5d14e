//! `stockroom init` command - Initialize a new workspace

use clap::ValueEnum;
use console::style;
use miette::{IntoDiagnostic, Result};

use crate::core::sheet::SheetFormat;
use crate::core::workspace::{Workspace, WorkspaceError};

/// Inventory file format choice
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CliSheetFormat {
    /// Excel workbook (inventory.xlsx)
    Xlsx,
    /// Comma-separated values (inventory.csv)
    Csv,
}

impl From<CliSheetFormat> for SheetFormat {
    fn from(f: CliSheetFormat) -> Self {
        match f {
            CliSheetFormat::Xlsx => SheetFormat::Xlsx,
            CliSheetFormat::Csv => SheetFormat::Csv,
        }
    }
}

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: std::path::PathBuf,

    /// Inventory file format
    #[arg(long, short = 's', value_enum, default_value = "xlsx")]
    pub sheet: CliSheetFormat,

    /// Rewrite the workspace config even if .stockroom/ already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs) -> Result<()> {
    let path = if args.path.as_os_str() == "." {
        std::env::current_dir().into_diagnostic()?
    } else {
        args.path.clone()
    };

    if !path.exists() {
        std::fs::create_dir_all(&path).into_diagnostic()?;
        println!(
            "{} Created directory {}",
            style("✓").green(),
            style(path.display()).cyan()
        );
    }

    let format = SheetFormat::from(args.sheet);
    let workspace = if args.force {
        Workspace::init_force(&path, format)
    } else {
        Workspace::init(&path, format)
    };

    match workspace {
        Ok(ws) => {
            println!(
                "{} Initialized stockroom workspace at {}",
                style("✓").green(),
                style(ws.root().display()).cyan()
            );
            println!();
            println!("Next steps:");
            println!(
                "  {} Open the entry form",
                style("stockroom form").yellow()
            );
            println!(
                "  {} Add and export one entry",
                style("stockroom add Widget 5 --export").yellow()
            );
            println!(
                "  {} Manage material types",
                style("stockroom material list").yellow()
            );
            Ok(())
        }
        Err(WorkspaceError::AlreadyExists(path)) => {
            println!(
                "{} Stockroom workspace already exists at {}",
                style("!").yellow(),
                style(path.display()).cyan()
            );
            println!();
            println!(
                "Use {} to reinitialize",
                style("stockroom init --force").yellow()
            );
            Ok(())
        }
        Err(e) => Err(miette::miette!("{}", e)),
    }
}
