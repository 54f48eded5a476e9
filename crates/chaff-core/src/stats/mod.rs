//! Statistics aggregation and bounded activity history.
//!
//! Every mutation here operates on a whole record that the caller read
//! from the store and writes back as a whole; ticks are serialized by the
//! scheduler's owner, so there are no partial-field races to defend
//! against. Functions take the day boundary as a plain timestamp to stay
//! pure and clock-independent.

use std::collections::BTreeMap;

use chrono::{DateTime, Days, Local, LocalResult, TimeZone};
use serde::{Deserialize, Serialize};

use crate::activity::{ActivityType, BrowsingActivity};
use crate::profile::Profile;

/// Maximum retained history entries; oldest evicted first.
pub const HISTORY_CAP: usize = 1000;

/// Rolling usage statistics, one of the four persisted records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_activities: u64,
    pub activities_today: u64,
    pub profile_age_days: u64,
    /// Unix seconds of the most recent activity.
    pub last_activity: Option<i64>,
    pub activity_by_type: BTreeMap<ActivityType, u64>,
}

impl Statistics {
    /// Fold one activity into the record. `day_start` is the unix-seconds
    /// start of the current local day.
    pub fn apply(&mut self, activity: &BrowsingActivity, day_start: i64) {
        self.total_activities += 1;
        self.last_activity = Some(activity.timestamp);
        if activity.timestamp >= day_start {
            self.activities_today += 1;
        }
        *self
            .activity_by_type
            .entry(activity.activity_type)
            .or_insert(0) += 1;
    }

    /// Zero `activities_today` only; everything else is untouched.
    pub fn reset_today(&mut self) {
        self.activities_today = 0;
    }

    /// Set `profile_age_days` to whole days elapsed since profile
    /// creation, clamped to zero for clocks that ran backwards.
    pub fn recompute_profile_age(&mut self, profile: &Profile, now_ts: i64) {
        let age_seconds = (now_ts - profile.created_at).max(0);
        self.profile_age_days = (age_seconds / 86_400) as u64;
    }
}

/// Append to history, then trim from the front down to [`HISTORY_CAP`].
pub fn append_capped(history: &mut Vec<BrowsingActivity>, activity: BrowsingActivity) {
    history.push(activity);
    if history.len() > HISTORY_CAP {
        let overflow = history.len() - HISTORY_CAP;
        history.drain(..overflow);
    }
}

/// Unix seconds at the most recent local midnight.
pub fn local_day_start(now: DateTime<Local>) -> i64 {
    let Some(midnight) = now.date_naive().and_hms_opt(0, 0, 0) else {
        return now.timestamp();
    };
    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.timestamp(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp(),
        // A DST gap swallowed midnight; fall back to the current instant.
        LocalResult::None => now.timestamp(),
    }
}

/// Epoch milliseconds of the next local midnight, for the daily alarm.
///
/// Goes through calendar arithmetic rather than adding 86 400 seconds:
/// on a 25-hour DST fall-back day the fixed offset would land at 23:00,
/// in the past for any late-evening caller.
pub fn next_midnight_epoch_ms(now: DateTime<Local>) -> i64 {
    let tomorrow = now.date_naive() + Days::new(1);
    let Some(midnight) = tomorrow.and_hms_opt(0, 0, 0) else {
        return (now.timestamp() + 86_400) * 1000;
    };
    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        // A DST gap swallowed midnight; arm a full day out instead.
        LocalResult::None => (now.timestamp() + 86_400) * 1000,
    }
}
