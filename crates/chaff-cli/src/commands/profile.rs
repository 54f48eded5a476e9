use chaff_core::{ProfileGenerator, Schedule, Store};
use chrono::Local;
use clap::Subcommand;

use super::common;

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Generate and install a new profile (clears history and statistics)
    Generate {
        /// Seed for reproducible generation
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show the current profile
    Show,
    /// Show the weekly activity schedule derived from the current profile
    Schedule,
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut scheduler = common::open_scheduler()?;

    match action {
        ProfileAction::Generate { seed } => {
            let mut generator = ProfileGenerator::new(seed);
            let profile = generator.generate(Local::now().timestamp());
            scheduler.install_profile(&profile)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
        ProfileAction::Show => match scheduler.store().load_profile()? {
            Some(profile) => println!("{}", serde_json::to_string_pretty(&profile)?),
            None => {
                eprintln!("no profile; run `chaff profile generate` first");
                std::process::exit(1);
            }
        },
        ProfileAction::Schedule => match scheduler.store().load_profile()? {
            Some(profile) => {
                let schedule = Schedule::from_profile(&profile);
                println!("{}", serde_json::to_string_pretty(&schedule)?);
            }
            None => {
                eprintln!("no profile; run `chaff profile generate` first");
                std::process::exit(1);
            }
        },
    }
    Ok(())
}
