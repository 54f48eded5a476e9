//! Scheduler lifecycle events, for logging and embedding surfaces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::activity::BrowsingActivity;

/// Every observable state change in the scheduler produces an Event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    SimulationStarted {
        interval_min: u64,
        at: DateTime<Utc>,
    },
    SimulationStopped {
        at: DateTime<Utc>,
    },
    /// One synthetic activity was generated and accounted.
    ActivitySimulated {
        activity: BrowsingActivity,
        at: DateTime<Utc>,
    },
    /// The midnight pass reset today's counter and refreshed profile age.
    DailyReset {
        at: DateTime<Utc>,
    },
    /// A new profile was installed; history and statistics were cleared.
    ProfileInstalled {
        profile_id: String,
        at: DateTime<Utc>,
    },
}
