use clap::{Args, Subcommand};

use sprouttrack_core::{unit_labels, Store, Units};

#[derive(Args)]
pub struct UnitsCommand {
    #[command(subcommand)]
    pub command: UnitsSubcommand,
}

#[derive(Subcommand)]
pub enum UnitsSubcommand {
    /// Show the current display units
    Show,

    /// Set the display units (stored values stay metric)
    Set {
        /// metric or imperial
        units: Units,
    },
}

impl UnitsCommand {
    pub fn run(&self, store: &mut Store) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            UnitsSubcommand::Show => {
                let units = store.state().units;
                let (weight, length) = unit_labels(units);
                println!("{} (weight: {}, length: {})", units, weight, length);
                Ok(())
            }
            UnitsSubcommand::Set { units } => {
                store.update(|doc| doc.set_units(*units));
                println!("Display units set to {}", units);
                Ok(())
            }
        }
    }
}
