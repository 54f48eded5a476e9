//! Timer service contract and implementations.
//!
//! The scheduler registers named alarms and reacts when they fire; it
//! never sleeps itself. [`TokioTimers`] delivers fires as alarm names over
//! a channel for a driving loop to consume. [`ManualTimers`] records
//! registrations so tests can assert on cadence and fire ticks by hand.

use std::collections::HashMap;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Periodic simulation tick alarm.
pub const SIMULATE_TICK: &str = "simulate-tick";
/// Daily statistics-reset/profile-age alarm.
pub const DAILY_RESET: &str = "daily-reset";

pub trait TimerService {
    /// Register (or replace) a periodic alarm firing every `interval_min`
    /// minutes, first fire one interval from now.
    fn register_periodic(&mut self, name: &str, interval_min: u64);

    /// Register (or replace) a one-shot alarm at `when_epoch_ms`.
    fn register_one_shot(&mut self, name: &str, when_epoch_ms: i64);

    /// Cancel a pending alarm; unknown names are a no-op.
    fn cancel(&mut self, name: &str);
}

/// Tokio-backed timers. Each alarm is a spawned task sending its name
/// into the channel; `cancel` aborts the task, so no fire can be observed
/// after cancellation returns.
pub struct TokioTimers {
    fired: mpsc::UnboundedSender<String>,
    tasks: HashMap<String, JoinHandle<()>>,
}

impl TokioTimers {
    /// Create the service and the receiving end of the fire channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<String>) {
        let (fired, receiver) = mpsc::unbounded_channel();
        (
            Self {
                fired,
                tasks: HashMap::new(),
            },
            receiver,
        )
    }
}

impl TimerService for TokioTimers {
    fn register_periodic(&mut self, name: &str, interval_min: u64) {
        self.cancel(name);
        let tx = self.fired.clone();
        let alarm = name.to_string();
        let period = std::time::Duration::from_secs(interval_min.max(1) * 60);
        let handle = tokio::spawn(async move {
            loop {
                tokio::time::sleep(period).await;
                if tx.send(alarm.clone()).is_err() {
                    break;
                }
            }
        });
        self.tasks.insert(name.to_string(), handle);
    }

    fn register_one_shot(&mut self, name: &str, when_epoch_ms: i64) {
        self.cancel(name);
        let tx = self.fired.clone();
        let alarm = name.to_string();
        let delay_ms = (when_epoch_ms - Utc::now().timestamp_millis()).max(0) as u64;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
            let _ = tx.send(alarm);
        });
        self.tasks.insert(name.to_string(), handle);
    }

    fn cancel(&mut self, name: &str) {
        if let Some(handle) = self.tasks.remove(name) {
            handle.abort();
        }
    }
}

/// A registration recorded by [`ManualTimers`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Periodic { interval_min: u64 },
    OneShot { when_epoch_ms: i64 },
}

/// Recording timer service: registrations are kept, nothing ever fires on
/// its own. Used by tests and by one-shot command invocations that don't
/// run a timer loop.
#[derive(Debug, Default)]
pub struct ManualTimers {
    alarms: HashMap<String, Registration>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn periodic_interval(&self, name: &str) -> Option<u64> {
        match self.alarms.get(name) {
            Some(Registration::Periodic { interval_min }) => Some(*interval_min),
            _ => None,
        }
    }

    pub fn one_shot_at(&self, name: &str) -> Option<i64> {
        match self.alarms.get(name) {
            Some(Registration::OneShot { when_epoch_ms }) => Some(*when_epoch_ms),
            _ => None,
        }
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.alarms.contains_key(name)
    }
}

impl TimerService for ManualTimers {
    fn register_periodic(&mut self, name: &str, interval_min: u64) {
        self.alarms
            .insert(name.to_string(), Registration::Periodic { interval_min });
    }

    fn register_one_shot(&mut self, name: &str, when_epoch_ms: i64) {
        self.alarms
            .insert(name.to_string(), Registration::OneShot { when_epoch_ms });
    }

    fn cancel(&mut self, name: &str) {
        self.alarms.remove(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_timers_record_and_cancel() {
        let mut timers = ManualTimers::new();
        timers.register_periodic(SIMULATE_TICK, 15);
        assert_eq!(timers.periodic_interval(SIMULATE_TICK), Some(15));

        timers.register_periodic(SIMULATE_TICK, 30);
        assert_eq!(timers.periodic_interval(SIMULATE_TICK), Some(30));

        timers.cancel(SIMULATE_TICK);
        assert!(!timers.is_registered(SIMULATE_TICK));
        timers.cancel(SIMULATE_TICK); // idempotent
    }

    #[tokio::test]
    async fn tokio_one_shot_fires_once() {
        let (mut timers, mut fired) = TokioTimers::new();
        timers.register_one_shot("test", Utc::now().timestamp_millis() + 10);
        let name = fired.recv().await.unwrap();
        assert_eq!(name, "test");
    }

    #[tokio::test]
    async fn tokio_cancel_prevents_fire() {
        let (mut timers, mut fired) = TokioTimers::new();
        timers.register_one_shot("test", Utc::now().timestamp_millis() + 50);
        timers.cancel("test");
        tokio::time::sleep(std::time::Duration::from_millis(120)).await;
        assert!(fired.try_recv().is_err());
    }
}
