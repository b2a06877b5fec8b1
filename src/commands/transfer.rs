use chrono::NaiveDate;
use clap::Args;
use std::fs;
use std::path::PathBuf;

use super::confirm;
use sprouttrack_core::{export_json, import_json, Store};

/// Default backup file name, matching the historical export name.
const EXPORT_FILE: &str = "sprouttrack-backup.json";

#[derive(Args)]
pub struct ExportCommand {
    /// Output file (default: sprouttrack-backup.json)
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

impl ExportCommand {
    pub fn run(&self, store: &Store) -> Result<(), Box<dyn std::error::Error>> {
        let doc = store.state();
        let json = export_json(doc)?;
        let path = self
            .output
            .clone()
            .unwrap_or_else(|| PathBuf::from(EXPORT_FILE));
        fs::write(&path, json)?;
        println!(
            "Exported {} child(ren) to {}",
            doc.children.len(),
            path.display()
        );
        Ok(())
    }
}

#[derive(Args)]
pub struct ImportCommand {
    /// JSON backup file to import
    pub file: PathBuf,

    /// Skip confirmation prompt
    #[arg(long, short)]
    pub force: bool,
}

impl ImportCommand {
    pub fn run(&self, store: &mut Store, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
        let raw = fs::read_to_string(&self.file)?;
        // Validation happens before any state is touched; a bad file
        // leaves the current document unmodified.
        let incoming = import_json(&raw, today)?;

        if !self.force {
            let prompt = format!(
                "Replace all current data with {} child(ren) from {}?",
                incoming.children.len(),
                self.file.display()
            );
            if !confirm(&prompt)? {
                println!("Import cancelled.");
                return Ok(());
            }
        }

        store.replace(incoming);
        println!("Import successful.");
        Ok(())
    }
}
