//! Skill matcher: taxonomy-based resume and job description comparison

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use log::{error, info, warn};
use skill_matcher::cli::{self, Cli, Commands, ConfigAction, TaxonomyAction};
use skill_matcher::config::{Config, OutputFormat};
use skill_matcher::input::resolve_document;
use skill_matcher::output::formatter::{save_report_to_file, suggest_filename, ReportGenerator};
use skill_matcher::output::labels::display_category;
use skill_matcher::output::report::AnalysisReport;
use skill_matcher::AnalysisEngine;
use std::path::Path;
use std::process;

const DOCUMENT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown"];

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let loaded = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config, cli.config.as_deref()).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config, config_path: Option<&Path>) -> Result<()> {
    match command {
        Commands::Align {
            resume,
            resume_text,
            job,
            job_text,
            detailed,
            output,
            save,
            no_color,
        } => {
            info!("Starting skill match analysis");

            for path in [&resume, &job].into_iter().flatten() {
                cli::validate_file_extension(path, DOCUMENT_EXTENSIONS)
                    .map_err(anyhow::Error::msg)
                    .with_context(|| format!("Cannot read {}", path.display()))?;
            }

            let output_format = match output {
                Some(format) => cli::parse_output_format(&format).map_err(anyhow::Error::msg)?,
                None => config.output.format,
            };

            let resume_content = resolve_document(resume.as_deref(), resume_text.as_deref(), "resume")
                .await
                .context("Failed to load resume")?;
            let job_content = resolve_document(job.as_deref(), job_text.as_deref(), "job description")
                .await
                .context("Failed to load job description")?;

            let engine = AnalysisEngine::from_config(&config);
            if engine.taxonomy().is_empty() {
                warn!("Skill taxonomy is empty; every score will be zero");
            }

            let result = engine.analyze(&resume_content, &job_content);
            let report = AnalysisReport::new(
                &engine,
                result,
                &source_label(resume.as_deref()),
                &source_label(job.as_deref()),
            );

            // Saved files never carry color codes
            let use_colors = config.output.color_output && !no_color && save.is_none();
            let generator = ReportGenerator::with_options(
                use_colors,
                detailed || config.output.detailed,
                true,
                true,
            );
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(target) => {
                    let file_path = if target.is_dir() {
                        let resume_name = source_label(resume.as_deref());
                        target.join(suggest_filename(&output_format, &resume_name, true))
                    } else {
                        target
                    };
                    save_report_to_file(&rendered, &file_path)
                        .with_context(|| format!("Failed to save report to {}", file_path.display()))?;
                    println!("✅ Report saved to {}", file_path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Keywords { file, text, top } => {
            if let Some(path) = &file {
                cli::validate_file_extension(path, DOCUMENT_EXTENSIONS).map_err(anyhow::Error::msg)?;
            }
            let content = resolve_document(file.as_deref(), text.as_deref(), "document")
                .await
                .context("Failed to load document")?;

            let engine = AnalysisEngine::from_config(&config);
            let mut counts = engine.extract_keywords(&content);
            if let Some(top) = top {
                counts.truncate(top);
            }

            if counts.is_empty() {
                println!("No skills found.");
                return Ok(());
            }

            println!("🔤 Skills ({})", engine.tokenizer().detect_language(&content));
            for (i, keyword) in counts.iter().enumerate() {
                let category = engine
                    .taxonomy()
                    .category_of(&keyword.keyword)
                    .map(display_category)
                    .unwrap_or_default();
                println!("  {}. {} x{} [{}]", i + 1, keyword.keyword, keyword.count, category);
            }
        }

        Commands::Taxonomy { action } => {
            let engine = AnalysisEngine::from_config(&config);
            let taxonomy = engine.taxonomy();

            match action {
                TaxonomyAction::Show { category } => match category {
                    Some(category) => {
                        let key = category.trim().to_lowercase();
                        let skills = taxonomy
                            .category_skills(&key)
                            .with_context(|| format!("Unknown category: {}", category))?;
                        println!("{}", display_category(&key).bold());
                        for skill in skills {
                            println!("  • {}", skill);
                        }
                    }
                    None => {
                        for (key, skills) in taxonomy.categories() {
                            println!("{} ({})", display_category(key).bold(), key);
                            let names: Vec<&str> = skills.iter().map(String::as_str).collect();
                            println!("  {}", names.join(", "));
                        }
                    }
                },

                TaxonomyAction::Stats => {
                    let stats = taxonomy.stats();
                    println!("📚 Taxonomy: {}", config.sources.taxonomy_path.display());
                    println!("  Categories: {}", stats.categories);
                    println!("  Skills: {}", stats.skills);
                    println!("  Aliases: {}", stats.aliases);
                    println!("  Dropped aliases: {}", stats.dropped_aliases);

                    let signals = engine.detector().signals();
                    println!("🎚️  Level signals: {}", config.sources.level_signals_path.display());
                    println!("  Signals: {}", signals.len());
                    println!("  Skipped patterns: {}", signals.skipped_patterns());
                }
            }
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("Taxonomy: {}", config.sources.taxonomy_path.display());
                println!("Level signals: {}", config.sources.level_signals_path.display());
                println!("\nMatching:");
                println!("  Top keywords: {}", config.matching.top_keywords);
                println!("  Recommendation limit: {}", config.matching.recommendation_limit);
                println!("  Default language: {}", config.matching.default_language);
                println!("  Short tokens: {}", config.matching.short_token_allowlist.join(", "));
                println!("\nOutput:");
                println!("  Format: {}", format_name(&config.output.format));
                println!("  Detailed: {}", config.output.detailed);
                println!("  Colors: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                match config_path {
                    Some(path) => default_config.save_to(path)?,
                    None => default_config.save()?,
                }
                default_config.install_default_sources()?;
                println!("✅ Configuration reset successfully!");
            }

            Some(ConfigAction::Path) => {
                let path = config_path.map(Path::to_path_buf).unwrap_or_else(Config::config_path);
                println!("{}", path.display());
            }
        },
    }

    Ok(())
}

fn source_label(path: Option<&Path>) -> String {
    path.map(|p| p.display().to_string())
        .unwrap_or_else(|| "inline".to_string())
}

fn format_name(format: &OutputFormat) -> &'static str {
    match format {
        OutputFormat::Console => "console",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "markdown",
    }
}
