//! CLI interface for the skill matcher

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "skill-matcher")]
#[command(about = "Taxonomy-based resume and job description skill matcher")]
#[command(long_about = "Extract canonical skills from a resume and a job description, compare them per category and estimate the seniority each document signals")]
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
    /// Compare a resume with a job description
    Align {
        /// Path to resume file (TXT, MD)
        #[arg(short, long, conflicts_with = "resume_text")]
        resume: Option<PathBuf>,

        /// Resume text given inline
        #[arg(long)]
        resume_text: Option<String>,

        /// Path to job description file (TXT, MD)
        #[arg(short, long, conflicts_with = "job_text")]
        job: Option<PathBuf>,

        /// Job description text given inline
        #[arg(long)]
        job_text: Option<String>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Disable colored console output
        #[arg(long)]
        no_color: bool,
    },

    /// List the skills found in a single document
    Keywords {
        /// Path to document file (TXT, MD)
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Document text given inline
        #[arg(short, long)]
        text: Option<String>,

        /// Number of skills to show
        #[arg(long)]
        top: Option<usize>,
    },

    /// Inspect the loaded skill taxonomy
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
    /// List categories and their skills
    Show {
        /// Only show this category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show counts of categories, skills and aliases
    Stats,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("pdf").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        let allowed = ["txt", "md"];
        assert!(validate_file_extension(Path::new("cv.TXT"), &allowed).is_ok());
        assert!(validate_file_extension(Path::new("cv.pdf"), &allowed).is_err());
        assert!(validate_file_extension(Path::new("cv"), &allowed).is_err());
    }

    #[test]
    fn test_align_accepts_inline_text() {
        let cli = Cli::try_parse_from([
            "skill-matcher",
            "align",
            "--resume-text",
            "python",
            "--job-text",
            "rust",
            "--output",
            "json",
        ])
        .unwrap();

        match cli.command {
            Commands::Align { resume_text, job, output, .. } => {
                assert_eq!(resume_text.as_deref(), Some("python"));
                assert!(job.is_none());
                assert_eq!(output.as_deref(), Some("json"));
            }
            _ => panic!("expected align"),
        }
    }

    #[test]
    fn test_align_rejects_path_and_text_together() {
        let parsed = Cli::try_parse_from([
            "skill-matcher",
            "align",
            "--resume",
            "cv.txt",
            "--resume-text",
            "python",
        ]);
        assert!(parsed.is_err());
    }
}
