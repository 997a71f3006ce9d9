//! Configuration management for resume-fit

use crate::error::{Result, ResumeFitError};
use crate::processing::taxonomy::{SkillTaxonomy, MAX_WEIGHT, MIN_WEIGHT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Reference upload ceiling: 5 MiB.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Missing skills below this weight are not reported as missing.
    pub importance_threshold: u8,
    /// How many missing skills the first recommendation names.
    pub max_listed_missing: usize,
    /// Scores below this suggest broadening demonstrated experience.
    pub diversity_threshold: u8,
    /// Scores below this suggest restructuring the resume.
    pub restructure_threshold: u8,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// TOML taxonomy to use instead of the built-in one.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub max_file_size_bytes: u64,
    pub allowed_extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub color_output: bool,
    pub pretty_json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            importance_threshold: 3,
            max_listed_missing: 3,
            diversity_threshold: 70,
            restructure_threshold: 60,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            allowed_extensions: ["pdf", "docx", "txt", "md"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            color_output: true,
            pretty_json: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first use.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config = Self::from_toml_str(&content)?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| ResumeFitError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(config_path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Overwrite the file at `config_path` with defaults without reading it,
    /// so an unparseable or invalid file can always be repaired.
    pub fn reset(config_path: &Path) -> Result<Self> {
        let config = Self::default();
        config.save_to(config_path)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| ResumeFitError::Configuration(format!("Failed to serialize config: {}", e)))
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-fit")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;
        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&scoring.importance_threshold) {
            return Err(ResumeFitError::Configuration(format!(
                "scoring.importance_threshold must be within {}..={}, got {}",
                MIN_WEIGHT, MAX_WEIGHT, scoring.importance_threshold
            )));
        }
        for (key, value) in [
            ("scoring.diversity_threshold", scoring.diversity_threshold),
            ("scoring.restructure_threshold", scoring.restructure_threshold),
        ] {
            if value > 100 {
                return Err(ResumeFitError::Configuration(format!(
                    "{} must be within 0..=100, got {}",
                    key, value
                )));
            }
        }
        if self.input.max_file_size_bytes == 0 {
            return Err(ResumeFitError::Configuration(
                "input.max_file_size_bytes must be greater than zero".to_string(),
            ));
        }
        if self.input.allowed_extensions.is_empty() {
            return Err(ResumeFitError::Configuration(
                "input.allowed_extensions must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured taxonomy file, or the built-in taxonomy.
    pub fn load_taxonomy(&self) -> Result<SkillTaxonomy> {
        match &self.taxonomy.path {
            Some(path) => SkillTaxonomy::load(path),
            None => Ok(SkillTaxonomy::builtin()),
        }
    }
}
