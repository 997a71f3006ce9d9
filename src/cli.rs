//! CLI interface for resume-fit

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-fit")]
#[command(about = "Score a resume against a target job profile")]
#[command(long_about = "Detect the skills a job profile cares about in a resume, compute a weighted 0-100 fit score, and suggest what to improve")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against a job profile
    Analyze {
        /// Path to resume file (PDF, DOCX, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Target job title or id; omit to use the general profile
        #[arg(short, long)]
        job: Option<String>,

        /// Fail on an unknown job instead of falling back to the general profile
        #[arg(long)]
        strict: bool,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Include extra detail in console output
        #[arg(short, long)]
        detailed: bool,
    },

    /// List the known job profiles
    Jobs {
        /// Show each profile's skill weights
        #[arg(long)]
        skills: bool,
    },

    /// Skill taxonomy commands
    Taxonomy {
        #[command(subcommand)]
        action: TaxonomyAction,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum TaxonomyAction {
    /// Write the active taxonomy as TOML
    Export {
        /// Destination file; stdout when omitted
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Validate a taxonomy file
    Check {
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        "html" => Ok(OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}
