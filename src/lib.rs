//! Resume-to-job fit scoring library

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod processing;
pub mod output;

pub use config::Config;
pub use error::{Result, ResumeFitError};
pub use processing::analyzer::{AnalysisResult, ResumeAnalyzer};
pub use processing::taxonomy::{JobProfile, JobResolution, Skill, SkillTaxonomy, WeightedSkill};
