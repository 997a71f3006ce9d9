//! Analysis entry point: resolve the profile, detect skills, score and recommend

use crate::config::ScoringConfig;
use crate::error::{Result, ResumeFitError};
use crate::processing::extractor::SkillExtractor;
use crate::processing::recommendations::RecommendationGenerator;
use crate::processing::scoring::ScoreCalculator;
use crate::processing::taxonomy::{JobProfile, JobResolution, SkillTaxonomy};
use crate::processing::text_processor::TextProcessor;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Result of one analysis. Created per request and owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Weighted coverage of the resolved profile, 0-100.
    pub score: u8,
    /// Profile skills found in the resume, with their weights.
    pub matched_skills: BTreeMap<String, u8>,
    /// Important profile skills not found in the resume.
    pub missing_skills: BTreeMap<String, u8>,
    pub recommendations: Vec<String>,
    /// Title of the resolved profile ("General" for the fallback).
    pub target_job: String,
}

impl AnalysisResult {
    /// Skills as (name, weight) pairs, heaviest first, ties by name.
    pub fn ranked(skills: &BTreeMap<String, u8>) -> Vec<(&str, u8)> {
        let mut ranked: Vec<(&str, u8)> = skills.iter().map(|(n, w)| (n.as_str(), *w)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    pub fn matched_weight(&self) -> u32 {
        self.matched_skills.values().map(|w| *w as u32).sum()
    }
}

/// Sequences taxonomy lookup, detection, scoring and recommendation.
///
/// Holds only immutable state, so one analyzer can serve concurrent requests
/// behind a shared reference.
pub struct ResumeAnalyzer {
    taxonomy: Arc<SkillTaxonomy>,
    extractors: HashMap<String, SkillExtractor>,
    calculator: ScoreCalculator,
    recommender: RecommendationGenerator,
    importance_threshold: u8,
    processor: TextProcessor,
}

impl ResumeAnalyzer {
    /// Build an analyzer with one precompiled extractor per profile.
    pub fn new(taxonomy: Arc<SkillTaxonomy>, scoring: &ScoringConfig) -> Result<Self> {
        let mut extractors = HashMap::new();
        for profile in taxonomy.profiles() {
            let extractor = SkillExtractor::new(profile.skills.iter().map(|s| &s.skill))?;
            debug!(
                "Compiled extractor for '{}': {} skills, {} patterns",
                profile.title,
                extractor.vocabulary_size(),
                extractor.pattern_count()
            );
            extractors.insert(profile.id.clone(), extractor);
        }

        Ok(Self {
            taxonomy,
            extractors,
            calculator: ScoreCalculator::new(),
            recommender: RecommendationGenerator::from_config(scoring),
            importance_threshold: scoring.importance_threshold,
            processor: TextProcessor::new(),
        })
    }

    /// Analyzer over the built-in taxonomy with default scoring settings.
    pub fn with_defaults() -> Result<Self> {
        Self::new(Arc::new(SkillTaxonomy::builtin()), &ScoringConfig::default())
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Analyze with lenient job resolution.
    pub fn analyze(&self, resume_text: &str, target_job: Option<&str>) -> Result<AnalysisResult> {
        self.analyze_with(resume_text, target_job, JobResolution::Lenient)
    }

    pub fn analyze_with(
        &self,
        resume_text: &str,
        target_job: Option<&str>,
        resolution: JobResolution,
    ) -> Result<AnalysisResult> {
        if self.processor.is_blank(resume_text) {
            return Err(ResumeFitError::EmptyInput);
        }

        let profile = self.taxonomy.resolve_with(target_job, resolution)?;
        debug!("Analyzing resume against '{}'", profile.title);

        let detected = match self.extractors.get(&profile.id) {
            Some(extractor) => extractor.detect(resume_text),
            None => SkillExtractor::new(profile.skills.iter().map(|s| &s.skill))?.detect(resume_text),
        };
        debug!("Detected {} of {} skills", detected.len(), profile.skills.len());

        let (matched_skills, missing_skills) = self.partition(profile, &detected);
        let score = self.calculator.score(profile, &detected);
        let recommendations = self.recommender.recommend(&missing_skills, score);
        debug!("Score {} with {} recommendations", score, recommendations.len());

        Ok(AnalysisResult {
            score,
            matched_skills,
            missing_skills,
            recommendations,
            target_job: profile.title.clone(),
        })
    }

    /// Split profile skills into matched (detected) and missing (undetected, important).
    fn partition(
        &self,
        profile: &JobProfile,
        detected: &std::collections::BTreeSet<String>,
    ) -> (BTreeMap<String, u8>, BTreeMap<String, u8>) {
        let mut matched = BTreeMap::new();
        let mut missing = BTreeMap::new();

        for skill in &profile.skills {
            if detected.contains(skill.name()) {
                matched.insert(skill.name().to_string(), skill.weight);
            } else if skill.weight >= self.importance_threshold {
                missing.insert(skill.name().to_string(), skill.weight);
            }
        }

        (matched, missing)
    }
}
