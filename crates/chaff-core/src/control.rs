//! Control surface: a small JSON request/response protocol shared by the
//! CLI subcommands and any embedding surface. Every request is handled
//! synchronously against the scheduler.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::activity::{ActivityGenerator, BrowsingActivity};
use crate::config::SimulationConfig;
use crate::error::{CoreError, Result};
use crate::events::Event;
use crate::profile::{Profile, ProfileGenerator};
use crate::scheduler::Scheduler;
use crate::stats::Statistics;
use crate::storage::Store;
use crate::timers::TimerService;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Request {
    GetConfig,
    SetConfig { config: SimulationConfig },
    GenerateProfile { seed: Option<u64> },
    GetCurrentProfile,
    GetStatistics,
    SimulateNow,
    ClearHistory,
}

impl Request {
    /// Parse a request from its JSON encoding. A well-formed envelope
    /// with an unrecognized `kind` maps to
    /// [`CoreError::UnsupportedOperation`] rather than a bare parse error.
    pub fn from_json(json: &str) -> Result<Self> {
        match serde_json::from_str::<Self>(json) {
            Ok(request) => Ok(request),
            Err(e) => {
                if let Ok(value) = serde_json::from_str::<serde_json::Value>(json) {
                    if let Some(kind) = value.get("kind").and_then(|k| k.as_str()) {
                        if !KNOWN_KINDS.contains(&kind) {
                            return Err(CoreError::UnsupportedOperation(kind.to_string()));
                        }
                    }
                }
                Err(e.into())
            }
        }
    }
}

const KNOWN_KINDS: [&str; 7] = [
    "get_config",
    "set_config",
    "generate_profile",
    "get_current_profile",
    "get_statistics",
    "simulate_now",
    "clear_history",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Response {
    Config {
        config: SimulationConfig,
    },
    Profile {
        profile: Option<Profile>,
    },
    Statistics {
        statistics: Statistics,
        history_len: usize,
    },
    Simulated {
        activity: Option<BrowsingActivity>,
    },
    Ack,
}

/// Dispatch one request against the scheduler. `now` is the caller's
/// clock so tests can pin it.
pub fn handle<S, G, T>(
    scheduler: &mut Scheduler<S, G, T>,
    request: Request,
    now: DateTime<Local>,
) -> Result<Response>
where
    S: Store,
    G: ActivityGenerator,
    T: TimerService,
{
    match request {
        Request::GetConfig => Ok(Response::Config {
            config: scheduler.store().load_config()?,
        }),
        Request::SetConfig { config } => {
            scheduler.on_config_changed(config, now)?;
            Ok(Response::Ack)
        }
        Request::GenerateProfile { seed } => {
            let profile = ProfileGenerator::new(seed).generate(now.timestamp());
            scheduler.install_profile(&profile)?;
            Ok(Response::Profile {
                profile: Some(profile),
            })
        }
        Request::GetCurrentProfile => Ok(Response::Profile {
            profile: scheduler.store().load_profile()?,
        }),
        Request::GetStatistics => Ok(Response::Statistics {
            statistics: scheduler.store().load_statistics()?,
            history_len: scheduler.store().load_history()?.len(),
        }),
        Request::SimulateNow => {
            let event = scheduler.simulate_now(now)?;
            let activity = match event {
                Some(Event::ActivitySimulated { activity, .. }) => Some(activity),
                _ => None,
            };
            Ok(Response::Simulated { activity })
        }
        Request::ClearHistory => {
            scheduler.clear_history()?;
            Ok(Response::Ack)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::FixedGenerator;
    use crate::storage::MemoryStore;
    use crate::timers::ManualTimers;

    fn scheduler() -> Scheduler<MemoryStore, FixedGenerator, ManualTimers> {
        Scheduler::new(
            MemoryStore::new(),
            FixedGenerator::returning(vec![]),
            ManualTimers::new(),
        )
    }

    #[test]
    fn parses_known_requests() {
        assert!(matches!(
            Request::from_json("{\"kind\":\"get_config\"}").unwrap(),
            Request::GetConfig
        ));
        assert!(matches!(
            Request::from_json("{\"kind\":\"generate_profile\",\"seed\":7}").unwrap(),
            Request::GenerateProfile { seed: Some(7) }
        ));
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        let err = Request::from_json("{\"kind\":\"export_history\"}").unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedOperation(k) if k == "export_history"));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        let err = Request::from_json("{not json").unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));
    }

    #[test]
    fn generate_profile_installs_and_returns() {
        let mut sched = scheduler();
        let now = Local::now();
        let response = handle(&mut sched, Request::GenerateProfile { seed: Some(42) }, now).unwrap();
        let Response::Profile {
            profile: Some(profile),
        } = response
        else {
            panic!("expected a profile response");
        };
        assert_eq!(
            sched.store().load_profile().unwrap().unwrap().id,
            profile.id
        );
    }

    #[test]
    fn statistics_report_history_length() {
        let mut sched = scheduler();
        let response = handle(&mut sched, Request::GetStatistics, Local::now()).unwrap();
        let Response::Statistics {
            statistics,
            history_len,
        } = response
        else {
            panic!("expected a statistics response");
        };
        assert_eq!(statistics, Statistics::default());
        assert_eq!(history_len, 0);
    }

    #[test]
    fn set_config_persists() {
        let mut sched = scheduler();
        let mut config = SimulationConfig::default();
        config.noise_level = 0.25;
        handle(&mut sched, Request::SetConfig { config }, Local::now()).unwrap();
        assert_eq!(sched.store().load_config().unwrap().noise_level, 0.25);
    }
}
