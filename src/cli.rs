//! CLI interface for the resume scorer

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "resume-scorer")]
#[command(about = "Score how well a resume matches a job description")]
#[command(long_about = "Compare a resume against a job description using TF-IDF cosine similarity and list the job keywords the resume is missing")]
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
    /// Score a resume against a job description
    Analyze {
        /// Path to resume file (PDF, TXT, MD)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        #[command(flatten)]
        job: JobSource,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file; without a path, a name derived from the resume is used
        #[arg(short, long, num_args = 0..=1)]
        save: Option<Option<PathBuf>>,

        /// Include the full extracted resume and job description text
        #[arg(long)]
        show_text: bool,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

/// Where the job description comes from. Both are optional at parse time so
/// that a missing description is reported by the analysis itself.
#[derive(Args, Debug, Clone, Default)]
#[group(multiple = false)]
pub struct JobSource {
    /// Path to job description file (TXT, MD)
    #[arg(short, long)]
    pub job: Option<PathBuf>,

    /// Job description text given inline
    #[arg(long)]
    pub job_text: Option<String>,
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

/// Resume file extensions accepted by `analyze`
pub const RESUME_EXTENSIONS: &[&str] = &["pdf", "txt", "md", "markdown"];

/// Job description file extensions accepted by `analyze`
pub const JOB_EXTENSIONS: &[&str] = &["txt", "md", "markdown"];

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown, html", format)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

/// Where `--save` writes: the given path, or a suggested timestamped name in
/// the working directory when the flag has no value.
pub fn resolve_save_path(
    save: Option<Option<PathBuf>>,
    format: crate::config::OutputFormat,
    resume: Option<&Path>,
) -> Option<PathBuf> {
    match save? {
        Some(path) => Some(path),
        None => {
            let resume_name = resume
                .and_then(|path| path.to_str())
                .unwrap_or("resume");
            Some(PathBuf::from(crate::output::formatter::suggest_filename(
                format,
                resume_name,
                true,
            )))
        }
    }
}
