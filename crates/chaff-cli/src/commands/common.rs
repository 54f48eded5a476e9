use chaff_core::{ActivitySimulator, ManualTimers, Scheduler, SqliteStore};

/// Scheduler over the shared on-disk store for one-shot commands.
/// Registrations land in recording timers; only the daemon runs real ones.
pub fn open_scheduler(
) -> Result<Scheduler<SqliteStore, ActivitySimulator, ManualTimers>, Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    Ok(Scheduler::new(
        store,
        ActivitySimulator::new(),
        ManualTimers::new(),
    ))
}
