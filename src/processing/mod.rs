//! Skill taxonomy, detection, scoring and recommendation

pub mod text_processor;
pub mod taxonomy;
pub mod extractor;
pub mod scoring;
pub mod recommendations;
pub mod analyzer;
