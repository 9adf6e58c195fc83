//! resume-scorer: score a resume against a job description

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info};
use resume_scorer::cli::{self, Cli, Commands, ConfigAction, JobSource};
use resume_scorer::config::{Config, OutputFormat};
use resume_scorer::input::InputManager;
use resume_scorer::output::formatter::{save_report_to_file, ReportGenerator};
use resume_scorer::processing::analyzer::AnalysisEngine;
use resume_scorer::processing::document::{AnalysisRequest, InputSource};
use resume_scorer::ResumeScorerError;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level)
    ).init();

    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let config = match Config::load_from(&config_path) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, config_path).await {
        match e.downcast_ref::<ResumeScorerError>() {
            Some(ResumeScorerError::MissingInput(reason)) => {
                eprintln!("{} {}", "⚠️  Please provide both a resume and a job description:".red(), reason);
            }
            _ => error!("Command failed: {:#}", e),
        }
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: PathBuf) -> anyhow::Result<()> {
    match command {
        Commands::Analyze {
            resume,
            job,
            output,
            save,
            show_text,
        } => {
            let output_format = match output {
                Some(format) => cli::parse_output_format(&format)
                    .map_err(ResumeScorerError::InvalidInput)?,
                None => config.output.format,
            };
            let show_text = show_text || config.output.show_text;

            if let Some(path) = &resume {
                cli::validate_file_extension(path, cli::RESUME_EXTENSIONS)
                    .map_err(|e| ResumeScorerError::InvalidInput(format!("Resume file: {}", e)))?;
            }
            if let Some(path) = &job.job {
                cli::validate_file_extension(path, cli::JOB_EXTENSIONS)
                    .map_err(|e| ResumeScorerError::InvalidInput(format!("Job description file: {}", e)))?;
            }

            let save = cli::resolve_save_path(save, output_format, resume.as_deref());
            let request = AnalysisRequest::new(resume.map(InputSource::File), job_source(job));
            debug!("Analysis request: {:?}", request);

            let engine = AnalysisEngine::from_config(&config)
                .context("Failed to initialize analysis engine")?;

            let spinner = if output_format == OutputFormat::Console {
                analysis_spinner()
            } else {
                ProgressBar::hidden()
            };
            let result = engine.run(&request, &InputManager::new()).await;
            spinner.finish_and_clear();
            let report = result?;

            let generator = ReportGenerator::with_options(
                config.output.color_output && save.is_none(),
                show_text,
                config.output.preview_chars,
            );
            let rendered = generator.generate_report(&report, output_format)?;

            match save {
                Some(path) => {
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("File: {}", config_path.display());
                println!("Output Format: {:?}", config.output.format);
                println!("Color Output: {}", config.output.color_output);
                println!("Show Text: {}", config.output.show_text);
                println!("Preview Characters: {}", config.output.preview_chars);
                match &config.processing.extra_stop_words_file {
                    Some(path) => println!("Extra Stop Words: {}", path.display()),
                    None => println!("Extra Stop Words: none (built-in English list only)"),
                }
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                Config::default()
                    .save_to(&config_path)
                    .with_context(|| format!("Failed to write {}", config_path.display()))?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => println!("{}", config_path.display()),
        },
    }

    Ok(())
}

fn job_source(job: JobSource) -> Option<InputSource> {
    match (job.job, job.job_text) {
        (Some(path), _) => Some(InputSource::File(path)),
        (None, Some(text)) => Some(InputSource::Inline(text)),
        (None, None) => None,
    }
}

fn analysis_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message("Analyzing resume...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
