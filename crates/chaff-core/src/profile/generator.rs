//! Seeded profile generation.
//!
//! Demographics drive everything downstream: occupation shapes interests,
//! interests shape browsing style, age and occupation shape activity level.
//! A fixed seed reproduces the same profile byte for byte (ids included),
//! which the test suite relies on.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

use super::{
    ActivityLevel, BrowsingStyle, Demographics, EducationLevel, Gender, InterestCategory,
    LocationType, OccupationCategory, Profile,
};

const FIRST_NAMES_MALE: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Christopher", "Daniel", "Matthew", "Anthony",
];

const FIRST_NAMES_FEMALE: &[&str] = &[
    "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan", "Jessica", "Sarah",
    "Karen", "Nancy", "Lisa", "Margaret",
];

const FIRST_NAMES_NEUTRAL: &[&str] = &[
    "Alex", "Jordan", "Taylor", "Casey", "Riley", "Morgan", "Avery", "Quinn", "Sam", "Charlie",
    "Jamie", "Drew",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin",
];

pub struct ProfileGenerator {
    rng: Pcg64,
}

impl ProfileGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => Pcg64::seed_from_u64(s),
            None => Pcg64::from_entropy(),
        };
        Self { rng }
    }

    /// Generate a profile created at `created_at` (unix seconds).
    pub fn generate(&mut self, created_at: i64) -> Profile {
        let demographics = self.demographics();
        let interests = self.interests(&demographics);
        let browsing_style = self.browsing_style(&interests);
        let activity_level = self.activity_level(&demographics);

        Profile {
            id: self.profile_id(),
            name: self.full_name(&demographics),
            demographics,
            interests,
            browsing_style,
            activity_level,
            created_at,
        }
    }

    fn profile_id(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        uuid::Builder::from_random_bytes(bytes)
            .into_uuid()
            .to_string()
    }

    fn full_name(&mut self, demographics: &Demographics) -> String {
        let pool = match demographics.gender {
            Gender::Male => FIRST_NAMES_MALE,
            Gender::Female => FIRST_NAMES_FEMALE,
            Gender::NonBinary | Gender::PreferNotToSay => FIRST_NAMES_NEUTRAL,
        };
        let first = pool.choose(&mut self.rng).copied().unwrap_or("Alex");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Smith");
        format!("{first} {last}")
    }

    fn demographics(&mut self) -> Demographics {
        let age = self.rng.gen_range(18..=75);

        let gender = match self.rng.gen_range(0..=100) {
            0..=48 => Gender::Male,
            49..=97 => Gender::Female,
            98 => Gender::NonBinary,
            _ => Gender::PreferNotToSay,
        };

        let location_type = match self.rng.gen_range(0..=100) {
            0..=49 => LocationType::Urban,
            50..=84 => LocationType::Suburban,
            _ => LocationType::Rural,
        };

        let occupation_category = match age {
            18..=22 => OccupationCategory::Student,
            65.. => {
                if self.rng.gen_bool(0.7) {
                    OccupationCategory::Retired
                } else {
                    self.working_occupation()
                }
            }
            _ => self.working_occupation(),
        };

        let education_level = match age {
            18..=21 => {
                if self.rng.gen_bool(0.7) {
                    EducationLevel::HighSchool
                } else {
                    EducationLevel::SomeCollege
                }
            }
            22..=24 => match self.rng.gen_range(0..=100) {
                0..=30 => EducationLevel::SomeCollege,
                31..=80 => EducationLevel::Bachelor,
                _ => EducationLevel::Master,
            },
            _ => match self.rng.gen_range(0..=100) {
                0..=20 => EducationLevel::HighSchool,
                21..=40 => EducationLevel::SomeCollege,
                41..=75 => EducationLevel::Bachelor,
                76..=95 => EducationLevel::Master,
                _ => EducationLevel::Doctorate,
            },
        };

        Demographics {
            age,
            gender,
            location_type,
            occupation_category,
            education_level,
        }
    }

    fn working_occupation(&mut self) -> OccupationCategory {
        const WORKING: &[OccupationCategory] = &[
            OccupationCategory::Technology,
            OccupationCategory::Healthcare,
            OccupationCategory::Education,
            OccupationCategory::Finance,
            OccupationCategory::Creative,
            OccupationCategory::Service,
            OccupationCategory::Trades,
        ];
        WORKING
            .choose(&mut self.rng)
            .copied()
            .unwrap_or(OccupationCategory::Service)
    }

    fn interests(&mut self, demographics: &Demographics) -> Vec<InterestCategory> {
        let occupation_interests: &[InterestCategory] = match demographics.occupation_category {
            OccupationCategory::Technology => &[
                InterestCategory::Technology,
                InterestCategory::Programming,
                InterestCategory::DataScience,
            ],
            OccupationCategory::Healthcare => {
                &[InterestCategory::Fitness, InterestCategory::Science]
            }
            OccupationCategory::Education => &[InterestCategory::Books, InterestCategory::Science],
            OccupationCategory::Finance => &[InterestCategory::Finance, InterestCategory::News],
            OccupationCategory::Creative => &[
                InterestCategory::Art,
                InterestCategory::Music,
                InterestCategory::Photography,
            ],
            OccupationCategory::Student => &[
                InterestCategory::Gaming,
                InterestCategory::Movies,
                InterestCategory::Music,
            ],
            OccupationCategory::Retired => &[
                InterestCategory::Gardening,
                InterestCategory::Travel,
                InterestCategory::Cooking,
            ],
            _ => &[InterestCategory::News],
        };

        let mut interests: Vec<InterestCategory> = Vec::new();
        let take = self.rng.gen_range(1..=occupation_interests.len().min(2));
        interests.extend(
            occupation_interests
                .choose_multiple(&mut self.rng, take)
                .copied(),
        );

        let extra = self.rng.gen_range(2..=5);
        for interest in InterestCategory::ALL.choose_multiple(&mut self.rng, extra) {
            if !interests.contains(interest) {
                interests.push(*interest);
            }
        }

        interests
    }

    fn browsing_style(&mut self, interests: &[InterestCategory]) -> BrowsingStyle {
        // Tech-savvy profiles lean explorer/researcher, academic ones
        // researcher/focused.
        if interests.contains(&InterestCategory::Technology)
            || interests.contains(&InterestCategory::Programming)
        {
            return if self.rng.gen_bool(0.6) {
                BrowsingStyle::Explorer
            } else {
                BrowsingStyle::Researcher
            };
        }

        if interests.contains(&InterestCategory::Science)
            || interests.contains(&InterestCategory::DataScience)
        {
            return if self.rng.gen_bool(0.5) {
                BrowsingStyle::Researcher
            } else {
                BrowsingStyle::Focused
            };
        }

        match self.rng.gen_range(0..=100) {
            0..=25 => BrowsingStyle::Focused,
            26..=50 => BrowsingStyle::Explorer,
            51..=70 => BrowsingStyle::Researcher,
            _ => BrowsingStyle::Casual,
        }
    }

    fn activity_level(&mut self, demographics: &Demographics) -> ActivityLevel {
        let age_factor = match demographics.age {
            18..=25 => 0.8,
            26..=35 => 0.7,
            36..=50 => 0.5,
            51..=65 => 0.3,
            _ => 0.2,
        };

        let occupation_factor = match demographics.occupation_category {
            OccupationCategory::Technology | OccupationCategory::Student => 0.2,
            _ => 0.0,
        };

        let score = self.rng.gen::<f32>() + age_factor + occupation_factor;
        match score {
            x if x < 0.5 => ActivityLevel::Low,
            x if x < 1.0 => ActivityLevel::Medium,
            x if x < 1.5 => ActivityLevel::High,
            _ => ActivityLevel::VeryHigh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_profile_is_valid() {
        let mut gen = ProfileGenerator::new(Some(42));
        let profile = gen.generate(1_700_000_000);
        assert!(profile.is_valid());
        assert!(!profile.name.is_empty());
        assert_eq!(profile.created_at, 1_700_000_000);
    }

    #[test]
    fn same_seed_same_profile() {
        let a = ProfileGenerator::new(Some(7)).generate(0);
        let b = ProfileGenerator::new(Some(7)).generate(0);
        assert_eq!(a.id, b.id);
        assert_eq!(a.name, b.name);
        assert_eq!(a.interests, b.interests);
    }

    #[test]
    fn different_seeds_differ() {
        let a = ProfileGenerator::new(Some(1)).generate(0);
        let b = ProfileGenerator::new(Some(2)).generate(0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn young_profiles_are_students() {
        for seed in 0..50 {
            let p = ProfileGenerator::new(Some(seed)).generate(0);
            if p.demographics.age <= 22 {
                assert_eq!(
                    p.demographics.occupation_category,
                    OccupationCategory::Student
                );
            }
        }
    }
}
