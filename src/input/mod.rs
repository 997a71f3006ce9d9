//! Document input: file type detection, validation and text extraction.
//! Sits in front of the analysis engine, which only ever sees plain text.

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
