//! Report wrapper around an analysis result

use crate::processing::analyzer::AnalysisResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An analysis result plus the context it was produced in, for human-facing output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub result: AnalysisResult,
    pub metadata: ReportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub tool_version: String,
    /// Resume file analyzed, when the text came from a file.
    pub resume_file: Option<String>,
    /// Job label as the user typed it, before resolution.
    pub requested_job: Option<String>,
    /// Sum of every skill weight in the resolved profile.
    pub profile_weight: u32,
}

impl AnalysisReport {
    pub fn new(result: AnalysisResult, profile_weight: u32) -> Self {
        Self {
            result,
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                resume_file: None,
                requested_job: None,
                profile_weight,
            },
        }
    }

    pub fn with_resume_file(mut self, resume_file: impl Into<String>) -> Self {
        self.metadata.resume_file = Some(resume_file.into());
        self
    }

    pub fn with_requested_job(mut self, requested_job: Option<&str>) -> Self {
        self.metadata.requested_job = requested_job.map(|j| j.to_string());
        self
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.result.score)
    }

    /// True when the user asked for a job that resolved to the general profile.
    pub fn fell_back_to_general(&self) -> bool {
        let requested = self
            .metadata
            .requested_job
            .as_deref()
            .map(str::trim)
            .filter(|j| !j.is_empty());
        match requested {
            Some(job) => {
                self.result.target_job == crate::processing::taxonomy::GENERAL_PROFILE_TITLE
                    && !job.eq_ignore_ascii_case("general")
            }
            None => false,
        }
    }
}

/// Display band for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    Excellent,
    VeryGood,
    Good,
    Fair,
    BelowAverage,
    Poor,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => ScoreBand::Excellent,
            80..=89 => ScoreBand::VeryGood,
            70..=79 => ScoreBand::Good,
            60..=69 => ScoreBand::Fair,
            50..=59 => ScoreBand::BelowAverage,
            _ => ScoreBand::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::VeryGood => "Very Good",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::BelowAverage => "Below Average",
            ScoreBand::Poor => "Poor",
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "score-excellent",
            ScoreBand::VeryGood | ScoreBand::Good => "score-good",
            ScoreBand::Fair => "score-fair",
            ScoreBand::BelowAverage | ScoreBand::Poor => "score-poor",
        }
    }
}
