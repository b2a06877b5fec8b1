use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::{confirm, OutputFormat};
use sprouttrack_core::{enrich, Child, Sex, Store, DEFAULT_COLOR};

#[derive(Args)]
pub struct ChildCommand {
    #[command(subcommand)]
    pub command: ChildSubcommand,
}

#[derive(Subcommand)]
pub enum ChildSubcommand {
    /// Add a child (becomes the selected child)
    Add {
        /// Name of the child
        name: String,

        /// Birthdate (YYYY-MM-DD)
        #[arg(long)]
        birthdate: NaiveDate,

        /// Sex
        #[arg(long, default_value = "unspecified")]
        sex: Sex,

        /// Avatar color (hex)
        #[arg(long, default_value = DEFAULT_COLOR)]
        color: String,
    },

    /// List all children
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show a child's details
    Show {
        /// Child id or name
        identifier: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Update an existing child (measurements are preserved)
    Update {
        /// Child id or name
        identifier: String,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New birthdate (YYYY-MM-DD)
        #[arg(long)]
        birthdate: Option<NaiveDate>,

        /// New sex
        #[arg(long)]
        sex: Option<Sex>,

        /// New avatar color (hex)
        #[arg(long)]
        color: Option<String>,
    },

    /// Delete a child and all of its measurements
    Delete {
        /// Child id or name
        identifier: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Select the child that commands act on by default
    Select {
        /// Child id or name
        identifier: String,
    },
}

impl ChildCommand {
    pub fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ChildSubcommand::Add {
                name,
                birthdate,
                sex,
                color,
            } => {
                if name.trim().is_empty() {
                    return Err("Child name cannot be empty".into());
                }

                let child = Child::new(name, *birthdate)
                    .with_sex(*sex)
                    .with_color(color.clone());
                let shown = child.clone();
                store.update(|doc| doc.upsert_child(child));

                println!("Added child:");
                println!("{}", shown);
                Ok(())
            }

            ChildSubcommand::List { format } => {
                let doc = store.state();
                if doc.children.is_empty() {
                    println!("No children yet. Add one with `sprouttrack child add`.");
                    return Ok(());
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&doc.children)?);
                    }
                    OutputFormat::Text => {
                        println!("{:<40}  {:<20}  {:<12}  SEX", "ID", "NAME", "BORN");
                        println!("{}", "-".repeat(84));
                        for child in &doc.children {
                            let marker = if doc.selected_child_id.as_deref() == Some(&child.id) {
                                "*"
                            } else {
                                " "
                            };
                            println!(
                                "{:<40}  {:<20}  {:<12}  {} {}",
                                child.id, child.name, child.birthdate, child.sex, marker
                            );
                        }
                        println!("\nTotal: {} child(ren), * = selected", doc.children.len());
                    }
                }
                Ok(())
            }

            ChildSubcommand::Show { identifier, format } => {
                let child = match store.state().find_child(identifier) {
                    Some(c) => c,
                    None => return Err(format!("Child not found: {}", identifier).into()),
                };

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(child)?);
                    }
                    OutputFormat::Text => {
                        println!("{}", child);
                        if let Some(latest) = enrich(child).last() {
                            println!("Last measured: {} (age {})", latest.date, latest.age);
                        }
                    }
                }
                Ok(())
            }

            ChildSubcommand::Update {
                identifier,
                name,
                birthdate,
                sex,
                color,
            } => {
                let has_updates =
                    name.is_some() || birthdate.is_some() || sex.is_some() || color.is_some();
                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let updated = store.update(|doc| {
                    let child = match doc.find_child_mut(identifier) {
                        Some(c) => c,
                        None => return Err(format!("Child not found: {}", identifier)),
                    };
                    if let Some(new_name) = name {
                        child.name = Child::normalize_name(new_name)
                            .ok_or_else(|| "Child name cannot be empty".to_string())?;
                    }
                    if let Some(new_birthdate) = birthdate {
                        child.birthdate = *new_birthdate;
                    }
                    if let Some(new_sex) = sex {
                        child.sex = *new_sex;
                    }
                    if let Some(new_color) = color {
                        child.color = new_color.clone();
                    }
                    Ok(child.clone())
                })?;

                println!("Updated child:");
                println!("{}", updated);
                Ok(())
            }

            ChildSubcommand::Delete { identifier, force } => {
                let child = match store.state().find_child(identifier) {
                    Some(c) => c.clone(),
                    None => return Err(format!("Child not found: {}", identifier).into()),
                };

                if !force {
                    let prompt = format!(
                        "Delete '{}' and all {} measurement(s)? This cannot be undone.",
                        child.name,
                        child.measurements.len()
                    );
                    if !confirm(&prompt)? {
                        println!("Deletion cancelled.");
                        return Ok(());
                    }
                }

                store.update(|doc| doc.delete_child(&child.id));
                println!("Deleted child: {}", child.name);
                Ok(())
            }

            ChildSubcommand::Select { identifier } => {
                let child = match store.state().find_child(identifier) {
                    Some(c) => c.clone(),
                    None => return Err(format!("Child not found: {}", identifier).into()),
                };
                store.update(|doc| doc.select_child(&child.id));
                println!("Selected child: {}", child.name);
                Ok(())
            }
        }
    }
}
