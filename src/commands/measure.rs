use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::{confirm, resolve_child, OutputFormat};
use sprouttrack_core::{
    apply_range_filter, display_value, enrich, in_to_cm, lb_to_kg, sanitize_number, unit_labels,
    Measurement, RangeWindow, Store, Units, ValueKind,
};

#[derive(Args)]
pub struct MeasureCommand {
    #[command(subcommand)]
    pub command: MeasureSubcommand,
}

#[derive(Subcommand)]
pub enum MeasureSubcommand {
    /// Record a measurement (merges into an existing entry on the same date)
    Add {
        /// Date of the measurement (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Weight in the current display units (kg or lb)
        #[arg(long)]
        weight: Option<String>,

        /// Height in the current display units (cm or in)
        #[arg(long)]
        height: Option<String>,

        /// Head circumference in the current display units (cm or in)
        #[arg(long)]
        head: Option<String>,

        /// Free-text notes
        #[arg(long, default_value = "")]
        notes: String,

        /// Child id or name (default: selected child)
        #[arg(long)]
        child: Option<String>,
    },

    /// List measurements
    List {
        /// Time window
        #[arg(long, short, default_value = "all")]
        range: RangeWindow,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Child id or name (default: selected child)
        #[arg(long)]
        child: Option<String>,
    },

    /// Delete a single measurement
    Delete {
        /// Measurement id
        id: String,

        /// Child id or name (default: selected child)
        #[arg(long)]
        child: Option<String>,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Remove all measurements for a child
    Clear {
        /// Child id or name (default: selected child)
        #[arg(long)]
        child: Option<String>,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl MeasureCommand {
    pub fn run(&self, store: &mut Store, today: NaiveDate) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MeasureSubcommand::Add {
                date,
                weight,
                height,
                head,
                notes,
                child,
            } => {
                let date = date.unwrap_or(today);
                let weight = weight.as_deref().and_then(sanitize_number);
                let height = height.as_deref().and_then(sanitize_number);
                let head = head.as_deref().and_then(sanitize_number);

                if weight.is_none() && height.is_none() && head.is_none() {
                    return Err("Enter at least one measurement value".into());
                }

                let (child_id, child_name) = {
                    let target = resolve_child(store.state(), child.as_deref())?;
                    (target.id.clone(), target.name.clone())
                };

                // Inputs arrive in display units; storage is always metric
                let (weight_kg, height_cm, head_cm) = match store.state().units {
                    Units::Metric => (weight, height, head),
                    Units::Imperial => (
                        weight.map(lb_to_kg),
                        height.map(in_to_cm),
                        head.map(in_to_cm),
                    ),
                };

                store.update(|doc| {
                    let mut entry = Measurement::new(date).with_notes(notes);
                    entry.weight_kg = weight_kg;
                    entry.height_cm = height_cm;
                    entry.head_cm = head_cm;
                    if let Some(target) = doc.find_child_mut(&child_id) {
                        target.upsert_measurement(entry);
                    }
                });

                println!("Recorded measurement for {} on {}", child_name, date);
                Ok(())
            }

            MeasureSubcommand::List {
                range,
                format,
                child,
            } => {
                let doc = store.state();
                let target = resolve_child(doc, child.as_deref())?;
                let rows = apply_range_filter(enrich(target), *range, today);

                if rows.is_empty() {
                    println!("No measurements yet.");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&rows)?);
                    }
                    OutputFormat::Text => {
                        let (weight_unit, length_unit) = unit_labels(doc.units);
                        println!(
                            "{:<12}  {:<8}  {:>10}  {:>10}  {:>10}  {:>6}  NOTES",
                            "DATE",
                            "AGE",
                            format!("WT ({})", weight_unit),
                            format!("HT ({})", length_unit),
                            format!("HD ({})", length_unit),
                            "BMI"
                        );
                        println!("{}", "-".repeat(72));
                        for row in &rows {
                            println!(
                                "{:<12}  {:<8}  {:>10}  {:>10}  {:>10}  {:>6}  {}",
                                row.date.to_string(),
                                row.age,
                                display_value(ValueKind::Weight, row.weight_kg, doc.units),
                                display_value(ValueKind::Length, row.height_cm, doc.units),
                                display_value(ValueKind::Length, row.head_cm, doc.units),
                                row.bmi,
                                row.notes
                            );
                        }
                        println!("\nTotal: {} measurement(s) for {}", rows.len(), target.name);
                    }
                }
                Ok(())
            }

            MeasureSubcommand::Delete { id, child, force } => {
                let child_id = {
                    let target = resolve_child(store.state(), child.as_deref())?;
                    if target.find_measurement(id).is_none() {
                        return Err(format!("Measurement not found: {}", id).into());
                    }
                    target.id.clone()
                };

                if !force && !confirm("Delete this entry?")? {
                    println!("Deletion cancelled.");
                    return Ok(());
                }

                store.update(|doc| {
                    if let Some(target) = doc.find_child_mut(&child_id) {
                        target.delete_measurement(id);
                    }
                });
                println!("Deleted measurement {}", id);
                Ok(())
            }

            MeasureSubcommand::Clear { child, force } => {
                let (child_id, child_name, count) = {
                    let target = resolve_child(store.state(), child.as_deref())?;
                    (target.id.clone(), target.name.clone(), target.measurements.len())
                };

                if !force {
                    let prompt = format!(
                        "Remove all {} measurement(s) for {}?",
                        count, child_name
                    );
                    if !confirm(&prompt)? {
                        println!("Clear cancelled.");
                        return Ok(());
                    }
                }

                store.update(|doc| {
                    if let Some(target) = doc.find_child_mut(&child_id) {
                        target.clear_measurements();
                    }
                });
                println!("Removed all measurements for {}", child_name);
                Ok(())
            }
        }
    }
}
