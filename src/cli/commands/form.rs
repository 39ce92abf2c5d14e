//! `stockroom form` command - Interactive entry form
//!
//! A prompt loop standing in for the desktop form: product name and
//! quantity fields, a material selector with add/remove, an export toggle,
//! and search. The header and selector are re-rendered from the registry
//! on every pass, so they always reflect the latest mutation.

use console::{style, Term};
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::cli::commands::utils::open_form;
use crate::cli::helpers::truncate_str;
use crate::cli::notice::print_notice;
use crate::cli::GlobalOpts;
use crate::core::SheetFormat;
use crate::form::{FormController, FormError, Notice};

#[derive(clap::Args, Debug)]
pub struct FormArgs {
    /// Start the session with export enabled
    #[arg(long, short = 'e')]
    pub export: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    AddEntry,
    SelectMaterial,
    AddMaterial,
    RemoveMaterial,
    ToggleExport,
    Search,
    ShowTable,
    Quit,
}

impl Action {
    const ALL: [Action; 8] = [
        Action::AddEntry,
        Action::SelectMaterial,
        Action::AddMaterial,
        Action::RemoveMaterial,
        Action::ToggleExport,
        Action::Search,
        Action::ShowTable,
        Action::Quit,
    ];

    fn label(&self, form: &FormController) -> String {
        match self {
            Action::AddEntry => "Add Entry".to_string(),
            Action::SelectMaterial => "Select Material".to_string(),
            Action::AddMaterial => "Add Material".to_string(),
            Action::RemoveMaterial => {
                format!("Remove Material ({})", form.materials().selected_name())
            }
            Action::ToggleExport => format!(
                "Export to {} [{}]",
                export_label(form),
                if form.export() { "x" } else { " " }
            ),
            Action::Search => "Search".to_string(),
            Action::ShowTable => "Show Session Table".to_string(),
            Action::Quit => "Quit".to_string(),
        }
    }
}

pub fn run(args: FormArgs, global: &GlobalOpts) -> Result<()> {
    if !Term::stdout().is_term() {
        return Err(miette::miette!(
            "the entry form needs an interactive terminal; use 'stockroom add' or 'stockroom search' instead"
        ));
    }

    let mut form = open_form(global)?;
    if args.export {
        form.set_export(true);
    }
    let theme = ColorfulTheme::default();

    loop {
        print_header(&form);

        let labels: Vec<String> = Action::ALL.iter().map(|a| a.label(&form)).collect();
        let picked = Select::with_theme(&theme)
            .with_prompt("Action")
            .items(&labels)
            .default(0)
            .interact_opt()
            .into_diagnostic()?;

        let action = picked.map(|i| Action::ALL[i]).unwrap_or(Action::Quit);
        if action == Action::Quit {
            break;
        }

        if let Some(notice) = perform(action, &mut form, &theme)? {
            println!();
            print_notice(&notice, global.format);
        }
    }

    tracing::debug!("form session closed");
    Ok(())
}

/// Run one action; prompt failures abort the session, form errors become notices
fn perform(
    action: Action,
    form: &mut FormController,
    theme: &ColorfulTheme,
) -> Result<Option<Notice>> {
    let notice = match action {
        Action::AddEntry => {
            form.fields.product_name = prompt_text(theme, "Product Name", &form.fields.product_name)?;
            form.fields.quantity = prompt_text(theme, "Quantity", &form.fields.quantity)?;
            Some(into_notice(form.add_entry()))
        }
        Action::SelectMaterial => {
            let choices = form.materials();
            let labels: Vec<String> = choices
                .entries
                .iter()
                .map(|name| truncate_str(name, 40))
                .collect();
            let picked = Select::with_theme(theme)
                .with_prompt("Material Type")
                .items(&labels)
                .default(choices.selected)
                .interact_opt()
                .into_diagnostic()?;
            match picked {
                Some(i) => form.select_material(&choices.entries[i]).err().map(|e| e.to_notice()),
                None => None,
            }
        }
        Action::AddMaterial => {
            let name = prompt_text(theme, "Enter the name of the new material type", "")?;
            match form.add_material(Some(&name)) {
                Ok(notice) => notice,
                Err(e) => Some(e.to_notice()),
            }
        }
        Action::RemoveMaterial => Some(into_notice(form.remove_material())),
        Action::ToggleExport => {
            form.toggle_export();
            None
        }
        Action::Search => {
            form.fields.search = prompt_text(theme, "Search", &form.fields.search)?;
            Some(into_notice(form.search()))
        }
        Action::ShowTable => {
            let rows = form.state().table.rows().to_vec();
            let message = if rows.is_empty() {
                "The table is empty".to_string()
            } else {
                format!("{} rows in this session (unexported rows included)", rows.len())
            };
            Some(Notice::info("Session Table", message).with_rows(rows))
        }
        Action::Quit => None,
    };
    Ok(notice)
}

fn into_notice(result: std::result::Result<Notice, FormError>) -> Notice {
    result.unwrap_or_else(|e| e.to_notice())
}

fn prompt_text(theme: &ColorfulTheme, prompt: &str, initial: &str) -> Result<String> {
    Input::<String>::with_theme(theme)
        .with_prompt(prompt)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()
}

fn export_label(form: &FormController) -> &'static str {
    SheetFormat::from_path(form.state().table.path())
        .map(|f| f.label())
        .unwrap_or("file")
}

/// Render the form state: workspace, selector contents and export toggle
fn print_header(form: &FormController) {
    let choices = form.materials();
    let materials: Vec<String> = choices
        .entries
        .iter()
        .enumerate()
        .map(|(i, name)| {
            if i == choices.selected {
                style(format!("[{}]", name)).cyan().bold().to_string()
            } else {
                style(name).dim().to_string()
            }
        })
        .collect();

    println!();
    println!(
        "{} Inventory Management - {}",
        style("◆").cyan(),
        style(form.state().workspace.root().display()).dim()
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  Material Type: {}", materials.join(" "));
    println!(
        "  Export to {}: {}",
        export_label(form),
        if form.export() {
            style("on").green()
        } else {
            style("off").dim()
        }
    );
    if !form.fields.product_name.is_empty() || !form.fields.quantity.is_empty() {
        println!(
            "  Pending: {} x {}",
            style(&form.fields.product_name).yellow(),
            style(&form.fields.quantity).yellow()
        );
    }
    println!();
}
