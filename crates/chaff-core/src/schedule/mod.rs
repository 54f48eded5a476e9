//! Activity schedules derived from a profile.
//!
//! A schedule answers one question for the scheduler: should synthetic
//! activity happen at this weekday and hour, and with what intensity.
//! Hour ranges may wrap past midnight (a student's 18:00-02:00 evening).

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::profile::{ActivityLevel, OccupationCategory, Profile};

/// When activities should occur for a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub time_patterns: Vec<TimePattern>,
    pub timezone_offset: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimePattern {
    pub day_of_week: DayOfWeek,
    pub active_hours: Vec<HourRange>,
    /// 0.0 to 1.0; probability weight applied to in-window ticks.
    pub activity_intensity: f32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HourRange {
    pub start_hour: u8,
    pub end_hour: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(day: Weekday) -> Self {
        match day {
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
            Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

const WEEK: [DayOfWeek; 7] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
    DayOfWeek::Sunday,
];

impl Schedule {
    /// Derive a weekly schedule from a profile.
    pub fn from_profile(profile: &Profile) -> Self {
        let time_patterns = WEEK
            .iter()
            .enumerate()
            .map(|(i, &day)| Self::day_pattern(profile, day, i >= 5))
            .collect();

        Schedule {
            time_patterns,
            timezone_offset: 0,
        }
    }

    fn day_pattern(profile: &Profile, day_of_week: DayOfWeek, is_weekend: bool) -> TimePattern {
        let active_hours = match profile.demographics.occupation_category {
            OccupationCategory::Student => {
                if is_weekend {
                    vec![HourRange::new(10, 14), HourRange::new(18, 2)]
                } else {
                    vec![HourRange::new(8, 10), HourRange::new(15, 23)]
                }
            }
            OccupationCategory::Technology => {
                if is_weekend {
                    vec![HourRange::new(9, 12), HourRange::new(14, 22)]
                } else {
                    vec![
                        HourRange::new(7, 9),
                        HourRange::new(12, 13),
                        HourRange::new(17, 23),
                    ]
                }
            }
            OccupationCategory::Retired => vec![
                HourRange::new(7, 11),
                HourRange::new(14, 17),
                HourRange::new(19, 21),
            ],
            _ => {
                if is_weekend {
                    vec![HourRange::new(9, 13), HourRange::new(16, 22)]
                } else {
                    vec![
                        HourRange::new(7, 9),
                        HourRange::new(12, 13),
                        HourRange::new(18, 22),
                    ]
                }
            }
        };

        let activity_intensity = match profile.activity_level {
            ActivityLevel::Low => 0.3,
            ActivityLevel::Medium => 0.6,
            ActivityLevel::High => 0.85,
            ActivityLevel::VeryHigh => 1.0,
        };

        TimePattern {
            day_of_week,
            active_hours,
            activity_intensity,
        }
    }

    /// Whether `hour` on `day` falls inside an active window.
    pub fn is_active_at(&self, day: DayOfWeek, hour: u8) -> bool {
        self.time_patterns
            .iter()
            .filter(|p| p.day_of_week == day)
            .any(|p| p.active_hours.iter().any(|r| r.contains(hour)))
    }

    /// Intensity weight for `day`; 0.0 when the day has no pattern.
    pub fn intensity_for(&self, day: DayOfWeek) -> f32 {
        self.time_patterns
            .iter()
            .find(|p| p.day_of_week == day)
            .map(|p| p.activity_intensity)
            .unwrap_or(0.0)
    }
}

impl HourRange {
    pub fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Half-open containment; ranges with `end < start` wrap past midnight.
    pub fn contains(&self, hour: u8) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProfileGenerator;

    #[test]
    fn schedule_covers_every_day() {
        let profile = ProfileGenerator::new(Some(42)).generate(0);
        let schedule = Schedule::from_profile(&profile);
        assert_eq!(schedule.time_patterns.len(), 7);
        for day in WEEK {
            assert!(schedule.intensity_for(day) > 0.0);
        }
    }

    #[test]
    fn hour_range_containment() {
        let range = HourRange::new(9, 17);
        assert!(range.contains(10));
        assert!(range.contains(9));
        assert!(!range.contains(17));
        assert!(!range.contains(18));
    }

    #[test]
    fn hour_range_wraps_midnight() {
        let night = HourRange::new(22, 2);
        assert!(night.contains(23));
        assert!(night.contains(1));
        assert!(!night.contains(12));
    }

    #[test]
    fn retired_profiles_are_never_active_overnight() {
        let mut profile = ProfileGenerator::new(Some(42)).generate(0);
        profile.demographics.occupation_category = OccupationCategory::Retired;
        let schedule = Schedule::from_profile(&profile);
        assert!(!schedule.is_active_at(DayOfWeek::Wednesday, 3));
        assert!(schedule.is_active_at(DayOfWeek::Wednesday, 8));
    }
}
