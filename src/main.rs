//! resume-fit: score a resume against a target job profile

use clap::Parser;
use log::{error, info};
use resume_fit::cli::{self, Cli, Commands, ConfigAction, TaxonomyAction};
use resume_fit::config::Config;
use resume_fit::input::InputManager;
use resume_fit::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use resume_fit::output::AnalysisReport;
use resume_fit::processing::taxonomy::JobResolution;
use resume_fit::processing::text_processor::preview;
use resume_fit::{ResumeAnalyzer, ResumeFitError, Result, SkillTaxonomy};
use std::path::Path;
use std::process;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);

    // Reset must work even when the current file does not load
    if let Commands::Config {
        action: Some(ConfigAction::Reset),
    } = cli.command
    {
        match Config::reset(&config_path) {
            Ok(_) => println!("Configuration reset: {}", config_path.display()),
            Err(e) => {
                error!("Failed to reset configuration: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, &config_path).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: &Path) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            strict,
            output,
            save,
            detailed,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(ResumeFitError::InvalidInput)?,
                None => config.output.format,
            };

            let taxonomy = Arc::new(config.load_taxonomy()?);
            let analyzer = ResumeAnalyzer::new(taxonomy, &config.scoring)?;

            let input_manager = InputManager::from_config(&config.input);
            let resume_text = input_manager.extract_text(&resume).await?;
            info!("Extracted {} characters from {}", resume_text.len(), resume.display());
            if detailed {
                println!("Resume preview: {}\n", preview(&resume_text, 200).replace('\n', " "));
            }

            let resolution = if strict {
                JobResolution::Strict
            } else {
                JobResolution::Lenient
            };
            let result = analyzer.analyze_with(&resume_text, job.as_deref(), resolution)?;
            let profile_weight = analyzer
                .taxonomy()
                .profiles()
                .find(|p| p.title == result.target_job)
                .map(|p| p.total_weight())
                .unwrap_or_default();

            let report = AnalysisReport::new(result, profile_weight)
                .with_resume_file(resume.to_string_lossy())
                .with_requested_job(job.as_deref());

            let generator = ReportGenerator::from_config(&config.output, detailed);
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(output_format, &resume.to_string_lossy(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)?;
                    println!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Jobs { skills } => {
            let taxonomy = config.load_taxonomy()?;
            for job in taxonomy.jobs() {
                println!("{} ({}) - total weight {}", job.title, job.id, job.total_weight());
                if skills {
                    for skill in &job.skills {
                        println!("    {:<20} {}", skill.name(), skill.weight);
                    }
                }
            }
            println!(
                "{} ({}) - {} skills, used when no job matches",
                taxonomy.general().title,
                taxonomy.general().id,
                taxonomy.general().skills.len()
            );
        }

        Commands::Taxonomy { action } => match action {
            TaxonomyAction::Export { out } => {
                let content = config.load_taxonomy()?.to_toml_string()?;
                match out {
                    Some(path) => {
                        save_report_to_file(&content, &path)?;
                        println!("Taxonomy written to {}", path.display());
                    }
                    None => print!("{}", content),
                }
            }
            TaxonomyAction::Check { file } => {
                let taxonomy = SkillTaxonomy::load(&file)?;
                println!(
                    "{} is valid: {} job profiles, {} skills",
                    file.display(),
                    taxonomy.jobs().len(),
                    taxonomy.general().skills.len()
                );
            }
        },

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => print!("{}", config.to_toml_string()?),
            ConfigAction::Reset => {
                Config::reset(config_path)?;
                println!("Configuration reset: {}", config_path.display());
            }
            ConfigAction::Path => println!("{}", config_path.display()),
        },
    }

    Ok(())
}
