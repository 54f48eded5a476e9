//! Simulation scheduler.
//!
//! A two-state (Stopped/Running) wall-clock state machine. It owns no
//! threads: timer fires and control requests are delivered by whoever
//! owns the scheduler, and that owner serializes them (the daemon wraps
//! the scheduler in a mutex), so two ticks can never interleave their
//! read-modify-write of statistics and history.
//!
//! ## Lifecycle
//!
//! ```text
//! Stopped -> start() -> Running -> stop() -> Stopped
//! ```
//!
//! `start` registers the periodic tick at `max(5, 15 / noise_level)`
//! minutes and performs one immediate tick. Failures inside a tick are
//! logged and swallowed; a lost tick is never retried.

use chrono::{DateTime, Datelike, Local, Timelike, Utc};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityGenerator;
use crate::config::SimulationConfig;
use crate::error::Result;
use crate::events::Event;
use crate::profile::Profile;
use crate::schedule::DayOfWeek;
use crate::stats::{self, Statistics};
use crate::storage::Store;
use crate::timers::{TimerService, DAILY_RESET, SIMULATE_TICK};

/// Base cadence at full noise, in minutes.
pub const BASE_INTERVAL_MIN: u64 = 15;
/// Hard cadence floor, in minutes.
pub const MIN_INTERVAL_MIN: u64 = 5;
/// Guard rail against a zero noise level before dividing.
const NOISE_FLOOR: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulerState {
    Stopped,
    Running,
}

/// The one scheduler instance of a process. Construct once at startup,
/// tear down with [`Scheduler::stop`] at the end.
pub struct Scheduler<S, G, T> {
    store: S,
    generator: G,
    timers: T,
    state: SchedulerState,
    interval_min: u64,
    rng: Pcg64,
}

impl<S, G, T> Scheduler<S, G, T>
where
    S: Store,
    G: ActivityGenerator,
    T: TimerService,
{
    pub fn new(store: S, generator: G, timers: T) -> Self {
        Self {
            store,
            generator,
            timers,
            state: SchedulerState::Stopped,
            interval_min: BASE_INTERVAL_MIN,
            rng: Pcg64::from_entropy(),
        }
    }

    /// Seed the schedule-gating draw, for deterministic tests.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = Pcg64::seed_from_u64(seed);
        self
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Current periodic tick interval in minutes.
    pub fn interval_min(&self) -> u64 {
        self.interval_min
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tick interval for a noise level: `max(5, 15 / noise)` minutes,
    /// with the noise level clamped away from zero first. Out-of-range
    /// noise above 1.0 is let through and caught by the 5-minute floor.
    pub fn tick_interval_min(noise_level: f64) -> u64 {
        let noise = if noise_level.is_finite() && noise_level > 0.0 {
            noise_level.max(NOISE_FLOOR)
        } else {
            NOISE_FLOOR
        };
        let interval = (BASE_INTERVAL_MIN as f64 / noise).round() as u64;
        interval.max(MIN_INTERVAL_MIN)
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Arm the daily alarm and auto-start when enabled with a profile.
    /// Called once at process startup.
    pub fn init(&mut self, now: DateTime<Local>) -> Result<()> {
        self.timers
            .register_one_shot(DAILY_RESET, stats::next_midnight_epoch_ms(now));
        let config = self.store.load_config()?;
        if config.enabled && self.store.load_profile()?.is_some() {
            self.start(now)?;
        }
        Ok(())
    }

    /// Transition Stopped -> Running. A missing profile makes this a
    /// logged no-op; an already-running scheduler is left alone.
    pub fn start(&mut self, now: DateTime<Local>) -> Result<Option<Event>> {
        if self.state == SchedulerState::Running {
            tracing::debug!("simulation already running");
            return Ok(None);
        }

        let config = self.store.load_config()?;
        if self.store.load_profile()?.is_none() {
            tracing::warn!("no profile found, cannot start simulation");
            return Ok(None);
        }

        self.interval_min = Self::tick_interval_min(config.noise_level);
        self.timers.register_periodic(SIMULATE_TICK, self.interval_min);
        self.state = SchedulerState::Running;
        tracing::info!(
            interval_min = self.interval_min,
            "starting activity simulation"
        );

        // One immediate tick; per tick failure semantics it cannot fail
        // the start itself.
        if let Err(e) = self.run_tick(now) {
            tracing::warn!(error = %e, "initial simulation tick failed");
        }

        Ok(Some(Event::SimulationStarted {
            interval_min: self.interval_min,
            at: now.with_timezone(&Utc),
        }))
    }

    /// Cancel the periodic tick and transition to Stopped. Idempotent:
    /// stopping a stopped scheduler is a quiet no-op.
    pub fn stop(&mut self) -> Option<Event> {
        self.timers.cancel(SIMULATE_TICK);
        if self.state == SchedulerState::Stopped {
            return None;
        }
        self.state = SchedulerState::Stopped;
        tracing::info!("stopping activity simulation");
        Some(Event::SimulationStopped { at: Utc::now() })
    }

    /// Persist a new configuration and reconcile the run state with it.
    /// A changed noise level while running re-registers the periodic
    /// timer at the recomputed interval.
    pub fn on_config_changed(
        &mut self,
        config: SimulationConfig,
        now: DateTime<Local>,
    ) -> Result<()> {
        self.store.save_config(&config)?;

        if config.enabled {
            match self.state {
                SchedulerState::Stopped => {
                    self.start(now)?;
                }
                SchedulerState::Running => {
                    let interval = Self::tick_interval_min(config.noise_level);
                    if interval != self.interval_min {
                        self.interval_min = interval;
                        self.timers.register_periodic(SIMULATE_TICK, interval);
                        tracing::info!(interval_min = interval, "re-registered simulation timer");
                    }
                }
            }
        } else if self.state == SchedulerState::Running {
            self.stop();
        }
        Ok(())
    }

    // ── Ticks ────────────────────────────────────────────────────────

    /// Periodic timer fire. No-op when Stopped (a fire that raced a
    /// cancellation).
    pub fn on_timer_tick(&mut self, now: DateTime<Local>) -> Result<Option<Event>> {
        if self.state == SchedulerState::Stopped {
            return Ok(None);
        }
        self.run_tick(now)
    }

    /// Forced tick outside the timer cadence. Still subject to the
    /// enabled flag, profile presence and schedule gating.
    pub fn simulate_now(&mut self, now: DateTime<Local>) -> Result<Option<Event>> {
        self.run_tick(now)
    }

    fn run_tick(&mut self, now: DateTime<Local>) -> Result<Option<Event>> {
        let config = self.store.load_config()?;
        if !config.enabled {
            return Ok(None);
        }
        let Some(profile) = self.store.load_profile()? else {
            return Ok(None);
        };

        if config.respect_schedule && !self.should_act(&profile, now) {
            tracing::debug!("outside schedule window, skipping tick");
            return Ok(None);
        }

        // One simulated action per tick, covering one interval's worth
        // of time.
        let duration_hours = self.interval_min as f64 / 60.0;
        let activities = self
            .generator
            .generate(&profile, duration_hours, now.with_timezone(&Utc))?;
        let Some(activity) = activities.into_iter().next() else {
            return Ok(None);
        };

        // History and statistics are written back-to-back under the
        // owner's lock; a reader can only be behind by one store write.
        let mut history = self.store.load_history()?;
        stats::append_capped(&mut history, activity.clone());
        self.store.save_history(&history)?;

        let mut statistics = self.store.load_statistics()?;
        statistics.apply(&activity, stats::local_day_start(now));
        self.store.save_statistics(&statistics)?;

        tracing::info!(
            activity_type = ?activity.activity_type,
            url = %activity.url,
            "simulated activity"
        );
        Ok(Some(Event::ActivitySimulated {
            activity,
            at: now.with_timezone(&Utc),
        }))
    }

    /// Schedule-window gate: inside an active hour range for the current
    /// local weekday, then weighted by the day's activity intensity
    /// (an intensity of 0.6 keeps roughly 60% of in-window ticks).
    fn should_act(&mut self, profile: &Profile, now: DateTime<Local>) -> bool {
        let schedule = self.generator.schedule(profile);
        let day = DayOfWeek::from(now.weekday());
        let hour = now.hour() as u8;
        if !schedule.is_active_at(day, hour) {
            return false;
        }
        self.rng.gen::<f32>() < schedule.intensity_for(day)
    }

    /// Midnight pass: zero today's counter, refresh profile age, re-arm
    /// the alarm for the following midnight.
    pub fn on_daily_tick(&mut self, now: DateTime<Local>) -> Result<Option<Event>> {
        let mut statistics = self.store.load_statistics()?;
        statistics.reset_today();
        if let Some(profile) = self.store.load_profile()? {
            statistics.recompute_profile_age(&profile, now.timestamp());
        }
        self.store.save_statistics(&statistics)?;

        self.timers
            .register_one_shot(DAILY_RESET, stats::next_midnight_epoch_ms(now));
        tracing::info!("daily statistics reset");
        Ok(Some(Event::DailyReset {
            at: now.with_timezone(&Utc),
        }))
    }

    // ── Record maintenance ───────────────────────────────────────────

    /// Clear history and zero statistics together.
    pub fn clear_history(&mut self) -> Result<()> {
        self.store.save_history(&[])?;
        self.store.save_statistics(&Statistics::default())?;
        Ok(())
    }

    /// Install a freshly generated profile; history and statistics start
    /// over with it.
    pub fn install_profile(&mut self, profile: &Profile) -> Result<Event> {
        self.store.save_profile(profile)?;
        self.clear_history()?;
        tracing::info!(profile_id = %profile.id, "installed new profile");
        Ok(Event::ProfileInstalled {
            profile_id: profile.id.clone(),
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ActivityType, BrowsingActivity, FixedGenerator};
    use crate::error::CoreError;
    use crate::profile::ProfileGenerator;
    use crate::storage::MemoryStore;
    use crate::timers::ManualTimers;

    type TestScheduler = Scheduler<MemoryStore, FixedGenerator, ManualTimers>;

    fn sample_activity() -> BrowsingActivity {
        BrowsingActivity {
            activity_type: ActivityType::Search,
            url: "https://example.com/search?q=rust".into(),
            title: "rust - Search".into(),
            duration_seconds: 10,
            timestamp: 0,
            interest_category: None,
        }
    }

    fn scheduler_with(enabled: bool, profile: bool) -> TestScheduler {
        let store = MemoryStore::new();
        let mut config = SimulationConfig::default();
        config.enabled = enabled;
        config.respect_schedule = false;
        store.save_config(&config).unwrap();
        if profile {
            let p = ProfileGenerator::new(Some(42)).generate(Local::now().timestamp());
            store.save_profile(&p).unwrap();
        }
        Scheduler::new(
            store,
            FixedGenerator::returning(vec![sample_activity()]),
            ManualTimers::new(),
        )
        .with_rng_seed(1)
    }

    #[test]
    fn interval_computation() {
        assert_eq!(TestScheduler::tick_interval_min(1.0), 15);
        assert_eq!(TestScheduler::tick_interval_min(0.5), 30);
        assert_eq!(TestScheduler::tick_interval_min(0.1), 150);
        // Anything below the floor clamps to 5.
        assert_eq!(TestScheduler::tick_interval_min(4.0), 5);
        // Zero noise is guarded, not a division by zero.
        assert_eq!(TestScheduler::tick_interval_min(0.0), 300);
        assert_eq!(TestScheduler::tick_interval_min(f64::NAN), 300);
    }

    #[test]
    fn start_registers_timer_and_ticks_once() {
        let mut sched = scheduler_with(true, true);
        let event = sched.start(Local::now()).unwrap();
        assert!(matches!(event, Some(Event::SimulationStarted { .. })));
        assert_eq!(sched.state(), SchedulerState::Running);
        assert_eq!(sched.timers.periodic_interval(SIMULATE_TICK), Some(30));

        // The immediate tick landed in history and statistics.
        assert_eq!(sched.store.load_history().unwrap().len(), 1);
        assert_eq!(sched.store.load_statistics().unwrap().total_activities, 1);
    }

    #[test]
    fn start_without_profile_is_a_noop() {
        let mut sched = scheduler_with(true, false);
        let event = sched.start(Local::now()).unwrap();
        assert!(event.is_none());
        assert_eq!(sched.state(), SchedulerState::Stopped);
        assert!(!sched.timers.is_registered(SIMULATE_TICK));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut sched = scheduler_with(true, true);
        assert!(sched.stop().is_none());
        assert_eq!(sched.state(), SchedulerState::Stopped);

        sched.start(Local::now()).unwrap();
        assert!(sched.stop().is_some());
        assert!(sched.stop().is_none());
        assert!(!sched.timers.is_registered(SIMULATE_TICK));
    }

    #[test]
    fn tick_while_disabled_has_no_effect() {
        let mut sched = scheduler_with(false, true);
        let event = sched.simulate_now(Local::now()).unwrap();
        assert!(event.is_none());
        assert!(sched.store.load_history().unwrap().is_empty());
        assert_eq!(sched.store.load_statistics().unwrap().total_activities, 0);
    }

    #[test]
    fn timer_tick_while_stopped_is_ignored() {
        let mut sched = scheduler_with(true, true);
        let event = sched.on_timer_tick(Local::now()).unwrap();
        assert!(event.is_none());
        assert!(sched.store.load_history().unwrap().is_empty());
    }

    #[test]
    fn noise_change_while_running_reregisters() {
        let mut sched = scheduler_with(true, true);
        sched.start(Local::now()).unwrap();
        assert_eq!(sched.timers.periodic_interval(SIMULATE_TICK), Some(30));

        let mut config = sched.store.load_config().unwrap();
        config.noise_level = 1.0;
        sched.on_config_changed(config, Local::now()).unwrap();
        assert_eq!(sched.state(), SchedulerState::Running);
        assert_eq!(sched.timers.periodic_interval(SIMULATE_TICK), Some(15));
        assert_eq!(sched.interval_min(), 15);
    }

    #[test]
    fn config_toggle_starts_and_stops() {
        let mut sched = scheduler_with(false, true);
        let mut config = sched.store.load_config().unwrap();

        config.enabled = true;
        sched.on_config_changed(config.clone(), Local::now()).unwrap();
        assert_eq!(sched.state(), SchedulerState::Running);

        config.enabled = false;
        sched.on_config_changed(config, Local::now()).unwrap();
        assert_eq!(sched.state(), SchedulerState::Stopped);
        assert!(!sched.timers.is_registered(SIMULATE_TICK));
    }

    #[test]
    fn generator_failure_leaves_state_intact() {
        let store = MemoryStore::new();
        let mut config = SimulationConfig::default();
        config.enabled = true;
        config.respect_schedule = false;
        store.save_config(&config).unwrap();
        store
            .save_profile(&ProfileGenerator::new(Some(42)).generate(0))
            .unwrap();

        let mut sched =
            Scheduler::new(store, FixedGenerator::failing(), ManualTimers::new());
        sched.start(Local::now()).unwrap();
        // The failed initial tick was swallowed; we are still Running.
        assert_eq!(sched.state(), SchedulerState::Running);

        let result = sched.simulate_now(Local::now());
        assert!(matches!(result, Err(CoreError::Generator(_))));
        assert_eq!(sched.state(), SchedulerState::Running);
        assert!(sched.store.load_history().unwrap().is_empty());
        assert_eq!(sched.store.load_statistics().unwrap().total_activities, 0);
    }

    #[test]
    fn store_failure_mid_tick_leaves_state_consistent() {
        let mut sched = scheduler_with(true, true);
        sched.start(Local::now()).unwrap();
        assert_eq!(sched.store.load_history().unwrap().len(), 1);

        sched.store.set_fail_writes(true);
        let result = sched.simulate_now(Local::now());
        assert!(matches!(result, Err(CoreError::Store(_))));
        // Still Running; history and statistics stay a consistent pair.
        assert_eq!(sched.state(), SchedulerState::Running);
        assert_eq!(sched.store.load_history().unwrap().len(), 1);
        assert_eq!(sched.store.load_statistics().unwrap().total_activities, 1);

        sched.store.set_fail_writes(false);
        sched.on_timer_tick(Local::now()).unwrap();
        assert_eq!(sched.store.load_history().unwrap().len(), 2);
        assert_eq!(sched.store.load_statistics().unwrap().total_activities, 2);
    }

    #[test]
    fn daily_tick_resets_today_and_rearms() {
        let mut sched = scheduler_with(true, true);
        sched.start(Local::now()).unwrap();
        assert_eq!(sched.store.load_statistics().unwrap().activities_today, 1);

        let event = sched.on_daily_tick(Local::now()).unwrap();
        assert!(matches!(event, Some(Event::DailyReset { .. })));
        let statistics = sched.store.load_statistics().unwrap();
        assert_eq!(statistics.activities_today, 0);
        assert_eq!(statistics.total_activities, 1);
        assert!(sched.timers.one_shot_at(DAILY_RESET).is_some());
    }

    #[test]
    fn daily_tick_recomputes_profile_age() {
        let store = MemoryStore::new();
        store.save_config(&SimulationConfig::default()).unwrap();
        let now = Local::now();
        let mut profile = ProfileGenerator::new(Some(42)).generate(0);
        profile.created_at = now.timestamp() - 3 * 86_400;
        store.save_profile(&profile).unwrap();

        let mut sched = Scheduler::new(
            store,
            FixedGenerator::returning(vec![]),
            ManualTimers::new(),
        );
        sched.on_daily_tick(now).unwrap();
        assert_eq!(sched.store.load_statistics().unwrap().profile_age_days, 3);
    }

    #[test]
    fn clear_history_zeroes_both_records() {
        let mut sched = scheduler_with(true, true);
        sched.start(Local::now()).unwrap();
        sched.simulate_now(Local::now()).unwrap();
        assert!(sched.store.load_statistics().unwrap().total_activities > 0);

        sched.clear_history().unwrap();
        assert!(sched.store.load_history().unwrap().is_empty());
        assert_eq!(sched.store.load_statistics().unwrap(), Statistics::default());
    }

    #[test]
    fn install_profile_resets_records() {
        let mut sched = scheduler_with(true, true);
        sched.start(Local::now()).unwrap();
        assert!(!sched.store.load_history().unwrap().is_empty());

        let fresh = ProfileGenerator::new(Some(9)).generate(Local::now().timestamp());
        sched.install_profile(&fresh).unwrap();
        assert!(sched.store.load_history().unwrap().is_empty());
        assert_eq!(sched.store.load_statistics().unwrap(), Statistics::default());
        assert_eq!(sched.store.load_profile().unwrap().unwrap().id, fresh.id);
    }

    #[test]
    fn empty_generator_output_is_a_quiet_tick() {
        let store = MemoryStore::new();
        let mut config = SimulationConfig::default();
        config.enabled = true;
        config.respect_schedule = false;
        store.save_config(&config).unwrap();
        store
            .save_profile(&ProfileGenerator::new(Some(42)).generate(0))
            .unwrap();

        let mut sched = Scheduler::new(
            store,
            FixedGenerator::returning(vec![]),
            ManualTimers::new(),
        );
        sched.start(Local::now()).unwrap();
        let event = sched.simulate_now(Local::now()).unwrap();
        assert!(event.is_none());
        assert!(sched.store.load_history().unwrap().is_empty());
    }

    /// Generator whose schedule has no active windows at all.
    struct NeverActive(FixedGenerator);

    impl ActivityGenerator for NeverActive {
        fn generate(
            &mut self,
            profile: &Profile,
            duration_hours: f64,
            now: chrono::DateTime<Utc>,
        ) -> Result<Vec<BrowsingActivity>, CoreError> {
            self.0.generate(profile, duration_hours, now)
        }

        fn schedule(&self, _profile: &Profile) -> crate::schedule::Schedule {
            crate::schedule::Schedule {
                time_patterns: Vec::new(),
                timezone_offset: 0,
            }
        }
    }

    #[test]
    fn out_of_window_tick_is_skipped() {
        let store = MemoryStore::new();
        let mut config = SimulationConfig::default();
        config.enabled = true;
        config.respect_schedule = true;
        store.save_config(&config).unwrap();
        store
            .save_profile(&ProfileGenerator::new(Some(42)).generate(0))
            .unwrap();

        let mut sched = Scheduler::new(
            store,
            NeverActive(FixedGenerator::returning(vec![sample_activity()])),
            ManualTimers::new(),
        );
        let event = sched.simulate_now(Local::now()).unwrap();
        assert!(event.is_none());
        // The generator was never consulted and nothing was persisted.
        assert_eq!(sched.generator.0.calls, 0);
        assert!(sched.store.load_history().unwrap().is_empty());
        assert_eq!(sched.store.load_statistics().unwrap().total_activities, 0);
    }

    #[test]
    fn init_autostarts_when_enabled_with_profile() {
        let mut sched = scheduler_with(true, true);
        sched.init(Local::now()).unwrap();
        assert_eq!(sched.state(), SchedulerState::Running);
        assert!(sched.timers.one_shot_at(DAILY_RESET).is_some());

        let mut idle = scheduler_with(false, true);
        idle.init(Local::now()).unwrap();
        assert_eq!(idle.state(), SchedulerState::Stopped);
        assert!(idle.timers.one_shot_at(DAILY_RESET).is_some());
    }
}
