//! Production activity generator.
//!
//! Spreads activities over the requested window at a per-hour rate set by
//! the profile's activity level, choosing activity types weighted by
//! browsing style and destinations by interest.

use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use super::urls::UrlGenerator;
use super::{ActivityGenerator, ActivityType, BrowsingActivity};
use crate::error::CoreError;
use crate::profile::{ActivityLevel, BrowsingStyle, Profile};
use crate::schedule::Schedule;

pub struct ActivitySimulator {
    rng: Pcg64,
    urls: UrlGenerator,
}

impl Default for ActivitySimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivitySimulator {
    pub fn new() -> Self {
        Self {
            rng: Pcg64::from_entropy(),
            urls: UrlGenerator,
        }
    }

    /// Seeded variant for reproducible output.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
            urls: UrlGenerator,
        }
    }

    fn activities_per_hour(level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Low => 1.5,
            ActivityLevel::Medium => 4.0,
            ActivityLevel::High => 8.0,
            ActivityLevel::VeryHigh => 15.0,
        }
    }

    fn single_activity(&mut self, profile: &Profile, timestamp: i64) -> BrowsingActivity {
        let interest = profile.interests.choose(&mut self.rng).copied();
        let activity_type = self.choose_activity_type(profile.browsing_style);
        let (url, title) = self.urls.generate(activity_type, interest, &mut self.rng);
        let duration_seconds = self.duration_for(activity_type);

        BrowsingActivity {
            activity_type,
            url,
            title,
            duration_seconds,
            timestamp,
            interest_category: interest,
        }
    }

    fn choose_activity_type(&mut self, style: BrowsingStyle) -> ActivityType {
        let roll = self.rng.gen_range(0..=100);
        match style {
            // Researchers live in searches and reference pages.
            BrowsingStyle::Researcher => match roll {
                0..=40 => ActivityType::Search,
                41..=75 => ActivityType::Research,
                76..=85 => ActivityType::PageVisit,
                86..=92 => ActivityType::News,
                _ => ActivityType::VideoWatch,
            },
            // Focused users stay on fewer pages, longer.
            BrowsingStyle::Focused => match roll {
                0..=60 => ActivityType::PageVisit,
                61..=75 => ActivityType::Research,
                76..=85 => ActivityType::Search,
                _ => ActivityType::News,
            },
            BrowsingStyle::Explorer => match roll {
                0..=30 => ActivityType::PageVisit,
                31..=45 => ActivityType::Search,
                46..=60 => ActivityType::VideoWatch,
                61..=75 => ActivityType::SocialMedia,
                76..=85 => ActivityType::Shopping,
                _ => ActivityType::News,
            },
            BrowsingStyle::Casual => match roll {
                0..=25 => ActivityType::SocialMedia,
                26..=45 => ActivityType::VideoWatch,
                46..=60 => ActivityType::PageVisit,
                61..=75 => ActivityType::News,
                76..=85 => ActivityType::Shopping,
                _ => ActivityType::Search,
            },
        }
    }

    fn duration_for(&mut self, activity_type: ActivityType) -> u32 {
        // Mean dwell times in seconds.
        let mean = match activity_type {
            ActivityType::Search => 10.0,
            ActivityType::PageVisit => 120.0,
            ActivityType::VideoWatch => 480.0,
            ActivityType::Shopping => 180.0,
            ActivityType::SocialMedia => 240.0,
            ActivityType::News => 90.0,
            ActivityType::Research => 300.0,
        };
        (mean * (0.5 + self.rng.gen::<f64>() * 1.5)) as u32
    }
}

impl ActivityGenerator for ActivitySimulator {
    fn generate(
        &mut self,
        profile: &Profile,
        duration_hours: f64,
        now: DateTime<Utc>,
    ) -> Result<Vec<BrowsingActivity>, CoreError> {
        if !(duration_hours.is_finite() && duration_hours > 0.0) {
            return Err(CoreError::Generator(format!(
                "invalid duration: {duration_hours}"
            )));
        }

        let per_hour = Self::activities_per_hour(profile.activity_level);
        // A short tick window still yields one candidate; per-tick cadence
        // is the scheduler's job, not ours.
        let total = (duration_hours * per_hour).ceil() as usize;
        let base_time = now.timestamp();
        let window_secs = (duration_hours * 3600.0) as i64;

        let mut activities = Vec::with_capacity(total);
        for _ in 0..total {
            let offset = self.rng.gen_range(0..window_secs.max(1));
            let activity = self.single_activity(profile, base_time + offset);
            activities.push(activity);
        }
        activities.sort_by_key(|a| a.timestamp);

        Ok(activities)
    }

    fn schedule(&self, profile: &Profile) -> Schedule {
        Schedule::from_profile(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileGenerator;

    fn test_profile() -> Profile {
        ProfileGenerator::new(Some(42)).generate(0)
    }

    #[test]
    fn generates_sorted_activities() {
        let profile = test_profile();
        let mut sim = ActivitySimulator::with_seed(42);
        let activities = sim.generate(&profile, 1.0, Utc::now()).unwrap();
        assert!(!activities.is_empty());
        for pair in activities.windows(2) {
            assert!(pair[1].timestamp >= pair[0].timestamp);
        }
    }

    #[test]
    fn short_window_still_yields_a_candidate() {
        let profile = test_profile();
        let mut sim = ActivitySimulator::with_seed(42);
        let activities = sim.generate(&profile, 0.25, Utc::now()).unwrap();
        assert!(!activities.is_empty());
    }

    #[test]
    fn durations_are_bounded() {
        let profile = test_profile();
        let mut sim = ActivitySimulator::with_seed(7);
        for _ in 0..100 {
            let d = sim.duration_for(ActivityType::VideoWatch);
            assert!(d > 0);
            assert!(d < 3600);
        }
    }

    #[test]
    fn rejects_nonpositive_duration() {
        let profile = test_profile();
        let mut sim = ActivitySimulator::with_seed(1);
        assert!(sim.generate(&profile, 0.0, Utc::now()).is_err());
        assert!(sim.generate(&profile, f64::NAN, Utc::now()).is_err());
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let profile = test_profile();
        let now = Utc::now();
        let a = ActivitySimulator::with_seed(9)
            .generate(&profile, 1.0, now)
            .unwrap();
        let b = ActivitySimulator::with_seed(9)
            .generate(&profile, 1.0, now)
            .unwrap();
        assert_eq!(a.len(), b.len());
        assert_eq!(a[0].url, b[0].url);
    }
}
