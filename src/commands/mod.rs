mod chart;
mod child;
mod config_cmd;
mod measure;
mod transfer;
mod units_cmd;

pub use chart::ChartCommand;
pub use child::ChildCommand;
pub use config_cmd::ConfigCommand;
pub use measure::MeasureCommand;
pub use transfer::{ExportCommand, ImportCommand};
pub use units_cmd::UnitsCommand;

use clap::ValueEnum;
use sprouttrack_core::{Child, Document};
use std::io::{self, Write};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Asks for explicit confirmation before a destructive action.
pub(crate) fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Resolves the target child: an explicit identifier when given,
/// otherwise the current selection.
pub(crate) fn resolve_child<'a>(
    doc: &'a Document,
    identifier: Option<&str>,
) -> Result<&'a Child, String> {
    match identifier {
        Some(identifier) => doc
            .find_child(identifier)
            .ok_or_else(|| format!("Child not found: {}", identifier)),
        None => doc
            .selected_child()
            .ok_or_else(|| "No child selected. Add a child first.".to_string()),
    }
}
