use chaff_core::{SimulationConfig, SqliteStore, Store};
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value
    Get {
        /// Config key (e.g. "enabled", "noise_level")
        key: String,
    },
    /// Set a config value; a running daemon picks it up on its next tick
    Set {
        /// Config key
        key: String,
        /// New value
        value: String,
    },
    /// List all config values
    List,
    /// Reset config to defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;

    match action {
        ConfigAction::Get { key } => {
            let config = store.load_config()?;
            match config.get(&key) {
                Some(value) => println!("{value}"),
                None => {
                    eprintln!("unknown key: {key}");
                    std::process::exit(1);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = store.load_config()?;
            config.set(&key, &value)?;
            store.save_config(&config)?;
            println!("ok");
        }
        ConfigAction::List => {
            let config = store.load_config()?;
            let json = serde_json::to_string_pretty(&config)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            store.save_config(&SimulationConfig::default())?;
            println!("config reset to defaults");
        }
    }
    Ok(())
}
