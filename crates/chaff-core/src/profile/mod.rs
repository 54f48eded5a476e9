//! Fictional browsing profiles.
//!
//! A profile is generated once and then immutable; the scheduler and the
//! statistics aggregator only ever read it. Replacing the profile wholesale
//! resets history and statistics.

mod generator;

pub use generator::ProfileGenerator;

use serde::{Deserialize, Serialize};

/// A fictional browsing profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    pub demographics: Demographics,
    pub interests: Vec<InterestCategory>,
    pub browsing_style: BrowsingStyle,
    pub activity_level: ActivityLevel,
    /// Unix seconds.
    pub created_at: i64,
}

impl Profile {
    /// Check that the profile is internally consistent.
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty()
            && !self.interests.is_empty()
            && self.interests.len() <= 10
            && self.demographics.age >= 18
            && self.demographics.age <= 100
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Demographics {
    pub age: u8,
    pub gender: Gender,
    pub location_type: LocationType,
    pub occupation_category: OccupationCategory,
    pub education_level: EducationLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    PreferNotToSay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationType {
    Urban,
    Suburban,
    Rural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OccupationCategory {
    Technology,
    Healthcare,
    Education,
    Finance,
    Creative,
    Service,
    Trades,
    Retired,
    Student,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EducationLevel {
    HighSchool,
    SomeCollege,
    Bachelor,
    Master,
    Doctorate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InterestCategory {
    Technology,
    Gaming,
    Sports,
    Fitness,
    Cooking,
    Travel,
    Fashion,
    Music,
    Movies,
    Books,
    Art,
    Science,
    Politics,
    News,
    Finance,
    HomeImprovement,
    Gardening,
    Photography,
    Programming,
    DataScience,
}

impl InterestCategory {
    /// Every category, for sampling.
    pub const ALL: [InterestCategory; 20] = [
        InterestCategory::Technology,
        InterestCategory::Gaming,
        InterestCategory::Sports,
        InterestCategory::Fitness,
        InterestCategory::Cooking,
        InterestCategory::Travel,
        InterestCategory::Fashion,
        InterestCategory::Music,
        InterestCategory::Movies,
        InterestCategory::Books,
        InterestCategory::Art,
        InterestCategory::Science,
        InterestCategory::Politics,
        InterestCategory::News,
        InterestCategory::Finance,
        InterestCategory::HomeImprovement,
        InterestCategory::Gardening,
        InterestCategory::Photography,
        InterestCategory::Programming,
        InterestCategory::DataScience,
    ];
}

/// How the profile moves through the web.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrowsingStyle {
    /// Few tabs, deep reading.
    Focused,
    /// Many tabs, broad browsing.
    Explorer,
    /// Lots of searches, academic.
    Researcher,
    /// Mix of everything.
    Casual,
}

/// Roughly how many activities per day the profile produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}
