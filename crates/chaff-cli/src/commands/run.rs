//! Foreground daemon: drives the scheduler off real timers until
//! interrupted.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chaff_core::{
    ActivitySimulator, Scheduler, SqliteStore, TokioTimers, DAILY_RESET, SIMULATE_TICK,
};
use chrono::Local;

/// Upper bound on one tick's work; a tick past this is logged and its
/// result discarded.
const TICK_DEADLINE: Duration = Duration::from_secs(5);

type DaemonScheduler = Scheduler<SqliteStore, ActivitySimulator, TokioTimers>;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(daemon())
}

async fn daemon() -> Result<(), Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    let (timers, mut fired) = TokioTimers::new();
    let mut scheduler = Scheduler::new(store, ActivitySimulator::new(), timers);
    scheduler.init(Local::now())?;
    let scheduler = Arc::new(Mutex::new(scheduler));

    tracing::info!("chaff daemon started");
    loop {
        tokio::select! {
            alarm = fired.recv() => {
                let Some(alarm) = alarm else { break };
                dispatch(&scheduler, alarm).await;
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                let mut sched = lock(&scheduler);
                sched.stop();
                break;
            }
        }
    }
    Ok(())
}

/// Run one alarm's handler on the blocking pool under the scheduler lock,
/// bounded by [`TICK_DEADLINE`].
async fn dispatch(scheduler: &Arc<Mutex<DaemonScheduler>>, alarm: String) {
    let scheduler = Arc::clone(scheduler);
    let tick = tokio::task::spawn_blocking(move || {
        let mut sched = lock(&scheduler);
        let now = Local::now();
        match alarm.as_str() {
            SIMULATE_TICK => sched.on_timer_tick(now).map(|_| ()),
            DAILY_RESET => sched.on_daily_tick(now).map(|_| ()),
            other => {
                tracing::warn!(alarm = other, "unknown alarm fired");
                Ok(())
            }
        }
    });

    match tokio::time::timeout(TICK_DEADLINE, tick).await {
        Ok(Ok(Ok(()))) => {}
        Ok(Ok(Err(e))) => tracing::warn!(error = %e, "tick failed"),
        Ok(Err(e)) => tracing::warn!(error = %e, "tick task panicked"),
        Err(_) => tracing::warn!("tick exceeded deadline, skipping"),
    }
}

fn lock(scheduler: &Arc<Mutex<DaemonScheduler>>) -> std::sync::MutexGuard<'_, DaemonScheduler> {
    scheduler.lock().unwrap_or_else(|e| e.into_inner())
}
