use chaff_core::Event;
use chrono::Local;

use super::common;

/// Force one simulation tick against the shared store. Still subject to
/// the enabled flag, profile presence and schedule gating.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut scheduler = common::open_scheduler()?;
    match scheduler.simulate_now(Local::now())? {
        Some(Event::ActivitySimulated { activity, .. }) => {
            println!("{}", serde_json::to_string_pretty(&activity)?);
        }
        _ => {
            println!("no activity emitted (disabled, no profile, or outside schedule)");
        }
    }
    Ok(())
}
