use chaff_core::{SqliteStore, Store};

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let statistics = store.load_statistics()?;
    println!("{}", serde_json::to_string_pretty(&statistics)?);
    Ok(())
}
