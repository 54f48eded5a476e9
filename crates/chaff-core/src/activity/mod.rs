//! Synthetic browsing activities and their generation contract.
//!
//! The scheduler only decides *when* to ask for activity; *what* gets
//! produced is behind [`ActivityGenerator`]. Production code uses
//! [`ActivitySimulator`]; tests inject the deterministic
//! [`FixedGenerator`].

mod simulator;
mod urls;

pub use simulator::ActivitySimulator;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::profile::{InterestCategory, Profile};
use crate::schedule::Schedule;

/// One synthetic browsing event. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowsingActivity {
    pub activity_type: ActivityType,
    pub url: String,
    pub title: String,
    pub duration_seconds: u32,
    /// Unix seconds.
    pub timestamp: i64,
    pub interest_category: Option<InterestCategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    Search,
    PageVisit,
    VideoWatch,
    Shopping,
    SocialMedia,
    News,
    Research,
}

/// Produces candidate activities and schedules for a profile.
pub trait ActivityGenerator {
    /// Generate zero or more activities covering `duration_hours` starting
    /// at `now`. Callers take the first element only.
    fn generate(
        &mut self,
        profile: &Profile,
        duration_hours: f64,
        now: DateTime<Utc>,
    ) -> Result<Vec<BrowsingActivity>, CoreError>;

    /// Derive the profile's weekly activity schedule.
    fn schedule(&self, profile: &Profile) -> Schedule;
}

/// Deterministic generator stand-in for tests: replays a fixed queue of
/// activities (or a forced failure) and counts invocations.
#[derive(Debug, Default)]
pub struct FixedGenerator {
    activities: Vec<BrowsingActivity>,
    pub fail: bool,
    pub calls: usize,
}

impl FixedGenerator {
    pub fn returning(activities: Vec<BrowsingActivity>) -> Self {
        Self {
            activities,
            fail: false,
            calls: 0,
        }
    }

    pub fn failing() -> Self {
        Self {
            activities: Vec::new(),
            fail: true,
            calls: 0,
        }
    }
}

impl ActivityGenerator for FixedGenerator {
    fn generate(
        &mut self,
        _profile: &Profile,
        _duration_hours: f64,
        now: DateTime<Utc>,
    ) -> Result<Vec<BrowsingActivity>, CoreError> {
        self.calls += 1;
        if self.fail {
            return Err(CoreError::Generator("forced failure".into()));
        }
        let mut activities = self.activities.clone();
        for activity in &mut activities {
            activity.timestamp = now.timestamp();
        }
        Ok(activities)
    }

    fn schedule(&self, profile: &Profile) -> Schedule {
        Schedule::from_profile(profile)
    }
}
