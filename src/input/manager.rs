//! Input manager: validates uploaded resumes and hands back plain text

use crate::config::InputConfig;
use crate::error::{Result, ResumeFitError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{
    DocxExtractor, MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor,
};
use log::{debug, info};
use std::path::Path;

/// Enforces the extension allow-list and size ceiling, then extracts text.
pub struct InputManager {
    max_file_size: u64,
    allowed_extensions: Vec<String>,
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

impl InputManager {
    pub fn new() -> Self {
        Self::from_config(&InputConfig::default())
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self {
            max_file_size: config.max_file_size_bytes,
            allowed_extensions: config
                .allowed_extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .collect(),
        }
    }

    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    pub async fn extract_text(&self, path: &Path) -> Result<String> {
        if !path.exists() {
            return Err(ResumeFitError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let extension = self.check_extension(path)?;

        let size = tokio::fs::metadata(path).await?.len();
        self.check_size(size)?;

        info!("Reading resume: {}", path.display());
        let bytes = tokio::fs::read(path).await?;
        self.extract_from_bytes(&bytes, Some(&extension))
    }

    /// Extract text from an in-memory upload, e.g. a multipart body.
    pub fn extract_from_bytes(&self, bytes: &[u8], extension: Option<&str>) -> Result<String> {
        self.check_size(bytes.len() as u64)?;

        let file_type = FileType::detect(extension, bytes);
        debug!("Detected file type {:?} ({} bytes)", file_type, bytes.len());

        match file_type {
            FileType::Pdf => PdfExtractor.extract(bytes),
            FileType::Docx => DocxExtractor.extract(bytes),
            FileType::Text => PlainTextExtractor.extract(bytes),
            FileType::Markdown => MarkdownExtractor.extract(bytes),
            FileType::Unknown => Err(ResumeFitError::UnsupportedFormat(format!(
                "content does not match declared type '{}'",
                extension.unwrap_or("unknown")
            ))),
        }
    }

    fn check_extension(&self, path: &Path) -> Result<String> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .ok_or_else(|| {
                ResumeFitError::UnsupportedFormat(format!("File has no extension: {}", path.display()))
            })?;

        if self.allowed_extensions.contains(&extension) {
            Ok(extension)
        } else {
            Err(ResumeFitError::UnsupportedFormat(format!(
                "Unsupported file extension: .{}. Allowed: {}",
                extension,
                self.allowed_extensions.join(", ")
            )))
        }
    }

    fn check_size(&self, size: u64) -> Result<()> {
        if size > self.max_file_size {
            return Err(ResumeFitError::FileTooLarge {
                size,
                limit: self.max_file_size,
            });
        }
        Ok(())
    }
}
