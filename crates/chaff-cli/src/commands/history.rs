use chaff_core::{SqliteStore, Store};
use clap::Subcommand;

use super::common;

#[derive(Subcommand)]
pub enum HistoryAction {
    /// Show the most recent activities
    Show {
        /// Number of entries to print
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Clear history and reset statistics
    Clear,
}

pub fn run(action: HistoryAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        HistoryAction::Show { limit } => {
            let store = SqliteStore::open()?;
            let history = store.load_history()?;
            let start = history.len().saturating_sub(limit);
            println!("{}", serde_json::to_string_pretty(&history[start..])?);
        }
        HistoryAction::Clear => {
            let mut scheduler = common::open_scheduler()?;
            scheduler.clear_history()?;
            println!("history cleared");
        }
    }
    Ok(())
}
