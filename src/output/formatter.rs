//! Output formatters: console, JSON, Markdown and HTML

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Result, ResumeFitError};
use crate::output::report::{AnalysisReport, ScoreBand};
use crate::processing::analyzer::AnalysisResult;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering an analysis report
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Colored terminal output
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// The bare analysis result as JSON, for API consumers
pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Dispatches a report to the formatter for the requested format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Fit Report: {{ target_job }}</title>
    {% if include_styles %}
    <style>
        body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif; line-height: 1.6; color: #333; max-width: 820px; margin: 0 auto; padding: 20px; background: #f8f9fa; }
        .container { background: white; padding: 30px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
        .header { text-align: center; border-bottom: 3px solid #007acc; padding-bottom: 16px; }
        .score-badge { display: inline-block; padding: 6px 14px; border-radius: 20px; font-weight: bold; color: white; margin-left: 10px; }
        .score-excellent { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-fair { background: #ffc107; color: #000; }
        .score-poor { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 8px; }
        .skills { display: flex; flex-wrap: wrap; gap: 8px; list-style: none; padding: 0; }
        .skills li { padding: 4px 10px; border-radius: 12px; background: #e9ecef; }
        .matched li { border-left: 4px solid #28a745; }
        .missing li { border-left: 4px solid #dc3545; }
        .notice { background: #fff3cd; padding: 10px; border-radius: 6px; }
        .metadata { background: #e9ecef; padding: 12px; border-radius: 6px; margin-top: 30px; font-size: 0.9em; color: #6c757d; }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Fit Report</h1>
            <p>Target job: <strong>{{ target_job }}</strong></p>
        </div>
        {% if fell_back %}
        <p class="notice">No job profile matched "{{ requested_job }}"; scored against the general profile.</p>
        {% endif %}

        <div class="section">
            <h2>Fit Score</h2>
            <h3>{{ score }}% <span class="score-badge {{ score_class }}">{{ score_label }}</span></h3>
            <p>Covered skill weight: {{ covered_weight }} of {{ total_weight }}</p>
        </div>

        <div class="section">
            <h2>Matched Skills</h2>
            {% if matched.is_empty() %}
            <p>No profile skills were found in the resume.</p>
            {% else %}
            <ul class="skills matched">
                {% for skill in matched %}<li>{{ skill.name }} ({{ skill.weight }})</li>{% endfor %}
            </ul>
            {% endif %}
        </div>

        <div class="section">
            <h2>Missing Important Skills</h2>
            {% if missing.is_empty() %}
            <p>No important skills are missing.</p>
            {% else %}
            <ul class="skills missing">
                {% for skill in missing %}<li>{{ skill.name }} ({{ skill.weight }})</li>{% endfor %}
            </ul>
            {% endif %}
        </div>

        {% if !recommendations.is_empty() %}
        <div class="section">
            <h2>Recommendations</h2>
            <ol>
                {% for rec in recommendations %}<li>{{ rec }}</li>
                {% endfor %}
            </ol>
        </div>
        {% endif %}

        <div class="metadata">
            <p>Generated by resume-fit v{{ version }} at {{ generated_at }}</p>
            {% if !resume_file.is_empty() %}<p>Resume: {{ resume_file }}</p>{% endif %}
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    target_job: String,
    requested_job: String,
    fell_back: bool,
    score: u8,
    score_class: String,
    score_label: String,
    covered_weight: u32,
    total_weight: u32,
    matched: Vec<HtmlSkill>,
    missing: Vec<HtmlSkill>,
    recommendations: Vec<String>,
    version: String,
    generated_at: String,
    resume_file: String,
}

#[derive(Debug, Clone)]
struct HtmlSkill {
    name: String,
    weight: u8,
}

fn html_skills(skills: &std::collections::BTreeMap<String, u8>) -> Vec<HtmlSkill> {
    AnalysisResult::ranked(skills)
        .into_iter()
        .map(|(name, weight)| HtmlSkill {
            name: name.to_string(),
            weight,
        })
        .collect()
}

fn format_timestamp(report: &AnalysisReport) -> String {
    report
        .metadata
        .generated_at
        .format("%Y-%m-%d %H:%M:%S UTC")
        .to_string()
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, band: ScoreBand) -> String {
        let color = match band {
            ScoreBand::Excellent => Color::Green,
            ScoreBand::VeryGood => Color::BrightGreen,
            ScoreBand::Good => Color::Yellow,
            ScoreBand::Fair => Color::BrightYellow,
            ScoreBand::BelowAverage => Color::Red,
            ScoreBand::Poor => Color::BrightRed,
        };
        let label = band.label().to_uppercase();

        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME FIT ANALYSIS", 1));
        output.push_str(&format!(
            "Target job: {}\n",
            self.colorize(&result.target_job, Color::Cyan)
        ));
        if report.fell_back_to_general() {
            output.push_str(&self.colorize(
                &format!(
                    "No job profile matched '{}'; scored against the general profile.\n",
                    report.metadata.requested_job.as_deref().unwrap_or_default()
                ),
                Color::Yellow,
            ));
        }

        output.push_str(&self.format_header("Fit Score", 2));
        output.push_str(&format!(
            "{}% {}\n",
            result.score,
            self.format_score_badge(report.score_band())
        ));
        output.push_str(&format!(
            "Covered skill weight: {} of {}\n",
            result.matched_weight(),
            report.metadata.profile_weight
        ));

        output.push_str(&self.format_header("Matched Skills", 2));
        if result.matched_skills.is_empty() {
            output.push_str("  (none)\n");
        }
        for (name, weight) in AnalysisResult::ranked(&result.matched_skills) {
            output.push_str(&format!("  ✓ {} ({})\n", self.colorize(name, Color::Green), weight));
        }

        output.push_str(&self.format_header("Missing Important Skills", 2));
        if result.missing_skills.is_empty() {
            output.push_str("  (none)\n");
        }
        for (name, weight) in AnalysisResult::ranked(&result.missing_skills) {
            output.push_str(&format!("  ✗ {} ({})\n", self.colorize(name, Color::Red), weight));
        }

        if !result.recommendations.is_empty() {
            output.push_str(&self.format_header("Recommendations", 2));
            for (i, rec) in result.recommendations.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, rec));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 3));
            output.push_str("Weights: 5 = critical ... 1 = nice-to-have\n");
            if let Some(file) = &report.metadata.resume_file {
                output.push_str(&format!("Resume: {}\n", file));
            }
            output.push_str(&format!("Generated: {}\n", format_timestamp(report)));
        }

        output.push_str(&format!(
            "\n{}\n",
            self.colorize(
                &format!("Generated by resume-fit v{}", report.metadata.tool_version),
                Color::BrightBlack
            )
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(&report.result)?)
        } else {
            Ok(serde_json::to_string(&report.result)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn skill_table(skills: &std::collections::BTreeMap<String, u8>) -> String {
        let mut table = String::from("| Skill | Weight |\n|-------|--------|\n");
        for (name, weight) in AnalysisResult::ranked(skills) {
            table.push_str(&format!("| {} | {} |\n", name, weight));
        }
        table.push('\n');
        table
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&format!("# Resume Fit Report: {}\n\n", result.target_job));

        if self.include_metadata {
            output.push_str(&format!("**Generated:** {}", format_timestamp(report)));
            if let Some(file) = &report.metadata.resume_file {
                let name = Path::new(file)
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| file.clone());
                output.push_str(&format!(" | **Resume:** `{}`", name));
            }
            output.push_str("\n\n");
        }

        if report.fell_back_to_general() {
            output.push_str(&format!(
                "> No job profile matched \"{}\"; scored against the general profile.\n\n",
                report.metadata.requested_job.as_deref().unwrap_or_default()
            ));
        }

        output.push_str("## Fit Score\n\n");
        output.push_str(&format!(
            "**{}%** ({}), covering {} of {} skill weight\n\n",
            result.score,
            report.score_band().label(),
            result.matched_weight(),
            report.metadata.profile_weight
        ));

        output.push_str("## Matched Skills\n\n");
        if result.matched_skills.is_empty() {
            output.push_str("_None of the profile skills were found._\n\n");
        } else {
            output.push_str(&Self::skill_table(&result.matched_skills));
        }

        output.push_str("## Missing Important Skills\n\n");
        if result.missing_skills.is_empty() {
            output.push_str("_No important skills are missing._\n\n");
        } else {
            output.push_str(&Self::skill_table(&result.missing_skills));
        }

        if !result.recommendations.is_empty() {
            output.push_str("## Recommendations\n\n");
            for (i, rec) in result.recommendations.iter().enumerate() {
                output.push_str(&format!("{}. {}\n", i + 1, rec));
            }
            output.push('\n');
        }

        if self.include_metadata {
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*Generated by resume-fit v{}*\n",
                report.metadata.tool_version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &AnalysisReport) -> HtmlTemplate {
        let result = &report.result;
        let band = report.score_band();

        HtmlTemplate {
            include_styles: self.include_styles,
            target_job: result.target_job.clone(),
            requested_job: report.metadata.requested_job.clone().unwrap_or_default(),
            fell_back: report.fell_back_to_general(),
            score: result.score,
            score_class: band.css_class().to_string(),
            score_label: band.label().to_string(),
            covered_weight: result.matched_weight(),
            total_weight: report.metadata.profile_weight,
            matched: html_skills(&result.matched_skills),
            missing: html_skills(&result.missing_skills),
            recommendations: result.recommendations.clone(),
            version: report.metadata.tool_version.clone(),
            generated_at: format_timestamp(report),
            resume_file: report.metadata.resume_file.clone().unwrap_or_default(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeFitError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::from_config(&OutputConfig::default(), false)
    }

    pub fn from_config(config: &OutputConfig, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(config.color_output, detailed),
            json_formatter: JsonFormatter::new(config.pretty_json),
            markdown_formatter: MarkdownFormatter::new(true),
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: OutputFormat) -> Result<String> {
        let formatter: &dyn OutputFormatter = match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
            OutputFormat::Html => &self.html_formatter,
        };
        debug_assert_eq!(formatter.supports_format(), format);
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };

    format!("{}_fit{}.{}", base_name, timestamp_suffix, extension)
}
