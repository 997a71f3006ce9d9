//! Rule-based improvement suggestions

use crate::config::ScoringConfig;
use std::collections::BTreeMap;

/// Derives an ordered list of suggestions from the missing skills and the score.
///
/// Rules fire in a fixed order and each adds at most one entry:
/// 1. any missing skills: name the highest-weight ones (ties alphabetical);
/// 2. score below the diversity threshold: broaden demonstrated experience;
/// 3. score below the restructure threshold: restructure the resume.
#[derive(Debug, Clone)]
pub struct RecommendationGenerator {
    max_listed_missing: usize,
    diversity_threshold: u8,
    restructure_threshold: u8,
}

impl Default for RecommendationGenerator {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl RecommendationGenerator {
    pub fn new(max_listed_missing: usize, diversity_threshold: u8, restructure_threshold: u8) -> Self {
        Self {
            max_listed_missing,
            diversity_threshold,
            restructure_threshold,
        }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new(
            config.max_listed_missing,
            config.diversity_threshold,
            config.restructure_threshold,
        )
    }

    pub fn recommend(&self, missing_skills: &BTreeMap<String, u8>, score: u8) -> Vec<String> {
        let mut recommendations = Vec::new();

        let top_missing = self.top_missing(missing_skills);
        if !top_missing.is_empty() {
            recommendations.push(format!(
                "Consider adding experience with: {}. These are high-value skills in your target domain.",
                top_missing.join(", ")
            ));
        }

        if score < self.diversity_threshold {
            recommendations.push(
                "Highlight more projects/work experiences to demonstrate skill diversity.".to_string(),
            );
        }

        if score < self.restructure_threshold {
            recommendations.push(
                "Reorganize your resume to surface technical skills near the top and quantify achievements (e.g., 'Improved performance by 30%')."
                    .to_string(),
            );
        }

        recommendations
    }

    /// Highest-weight missing skills, ties broken by name.
    pub fn top_missing<'a>(&self, missing_skills: &'a BTreeMap<String, u8>) -> Vec<&'a str> {
        let mut ranked: Vec<(&String, &u8)> = missing_skills.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(self.max_listed_missing)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}
