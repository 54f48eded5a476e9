//! # Chaff Core Library
//!
//! Core business logic for chaff, a background activity simulator that
//! masks real browsing patterns behind a stream of synthetic, profile-
//! driven activity. All operations are available via a standalone CLI
//! binary; any richer surface is a thin layer over this same library.
//!
//! ## Architecture
//!
//! - **Scheduler**: A wall-clock state machine that owns no threads;
//!   timer fires are delivered by the embedding loop
//! - **Storage**: SQLite-backed key/value records (config, profile,
//!   statistics, capped history)
//! - **Profiles**: Seeded synthetic personas with demographics,
//!   interests and a weekly activity schedule
//! - **Activities**: Profile-weighted synthetic browsing events with
//!   plausible URLs and titles
//!
//! ## Key Components
//!
//! - [`Scheduler`]: Decides when to emit activity and folds it into
//!   statistics and history
//! - [`SqliteStore`]: Record persistence
//! - [`ProfileGenerator`] / [`ActivitySimulator`]: Synthetic content
//! - [`control`]: JSON request/response surface shared by CLI and
//!   embedders

pub mod activity;
pub mod config;
pub mod control;
pub mod error;
pub mod events;
pub mod profile;
pub mod schedule;
pub mod scheduler;
pub mod stats;
pub mod storage;
pub mod timers;

pub use activity::{
    ActivityGenerator, ActivitySimulator, ActivityType, BrowsingActivity, FixedGenerator,
};
pub use config::{PrivacyMode, SimulationConfig};
pub use error::{CoreError, StoreError};
pub use events::Event;
pub use profile::{Profile, ProfileGenerator};
pub use schedule::{DayOfWeek, Schedule, TimePattern};
pub use scheduler::{Scheduler, SchedulerState, BASE_INTERVAL_MIN, MIN_INTERVAL_MIN};
pub use stats::{Statistics, HISTORY_CAP};
pub use storage::{MemoryStore, SqliteStore, Store};
pub use timers::{ManualTimers, TimerService, TokioTimers, DAILY_RESET, SIMULATE_TICK};
