//! Weighted-coverage scoring

use crate::processing::taxonomy::JobProfile;
use crate::processing::text_processor::name_key;
use std::collections::{BTreeSet, HashSet};

/// Weight mass covered by the detected skills, out of the profile total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coverage {
    pub covered_weight: u32,
    pub total_weight: u32,
}

impl Coverage {
    /// `round(100 * covered / total)` with halves rounded up, clamped to 0..=100.
    pub fn score(&self) -> u8 {
        if self.total_weight == 0 {
            return 0;
        }
        let covered = self.covered_weight.min(self.total_weight) as u64;
        let total = self.total_weight as u64;
        let rounded = (200 * covered + total) / (2 * total);
        rounded.min(100) as u8
    }
}

/// Turns a profile and a set of detected skills into a 0-100 fit score.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreCalculator;

impl ScoreCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn coverage(&self, profile: &JobProfile, detected: &BTreeSet<String>) -> Coverage {
        let detected_keys: HashSet<String> = detected.iter().map(|s| name_key(s)).collect();
        let covered_weight = profile
            .skills
            .iter()
            .filter(|s| detected_keys.contains(&s.skill.key()))
            .map(|s| s.weight as u32)
            .sum();

        Coverage {
            covered_weight,
            total_weight: profile.total_weight(),
        }
    }

    pub fn score(&self, profile: &JobProfile, detected: &BTreeSet<String>) -> u8 {
        self.coverage(profile, detected).score()
    }
}
