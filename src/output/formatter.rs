//! Output formatters: colored console, JSON and Markdown

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::labels::display_category;
use crate::output::report::AnalysisReport;
use crate::processing::analyzer::{KeywordSummary, MatchVerdict};
use crate::processing::keywords::KeywordCount;
use crate::processing::seniority::SeniorityScore;
use crate::taxonomy::{SeniorityLevel, SignalSource};
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting analysis reports
pub trait OutputFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

/// JSON formatter for structured consumers
pub struct JsonFormatter {
    pretty: bool,
}

/// Markdown formatter for sharing reports
pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

fn format_counts(counts: &[KeywordCount], limit: usize) -> String {
    counts
        .iter()
        .take(limit)
        .map(|k| format!("{} ({})", k.keyword, k.count))
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_level(level: &SeniorityScore) -> String {
    let scores = SeniorityLevel::ALL
        .iter()
        .map(|l| format!("{} {}", l, level.score(*l)))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} ({})", level.predicted, scores)
}

/// The counts behind a document's top keywords.
fn top_counts(summary: &KeywordSummary) -> String {
    format_counts(&summary.counts, summary.top.len())
}

fn format_signal(signal: &SignalSource) -> String {
    match signal {
        SignalSource::Phrase(phrase) => format!("\"{}\"", phrase),
        SignalSource::Regex(pattern) => format!("/{}/", pattern),
    }
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
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, verdict: MatchVerdict) -> String {
        let (badge, color) = match verdict {
            MatchVerdict::Excellent => ("EXCELLENT", Color::Green),
            MatchVerdict::Good => ("GOOD", Color::BrightGreen),
            MatchVerdict::Partial => ("PARTIAL", Color::Yellow),
            MatchVerdict::Low => ("LOW", Color::Red),
        };

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_evidence(&self, label: &str, level: &SeniorityScore) -> String {
        let mut output = String::new();
        for hit in &level.evidence {
            output.push_str(&format!(
                "    {} {} -> {} (x{})\n",
                label,
                format_signal(&hit.signal),
                hit.level,
                hit.count
            ));
        }
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str(&self.format_header("SKILL MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Generated: {} | Taxonomy: {} categories, {} skills\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.taxonomy.categories,
            report.metadata.taxonomy.skills
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Match: {:.2}% {}\n",
            result.match_percent,
            self.format_score_badge(result.verdict)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&result.result_text, Color::Cyan)));
        output.push_str(&format!("Job level: {}\n", format_level(&result.jd_level)));
        output.push_str(&format!("Resume level: {}\n", format_level(&result.cv_level)));

        if !result.has_skills() {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize("No skills detected in either document.", Color::Yellow)
            ));
            return Ok(output);
        }

        output.push_str(&self.format_header("Categories", 2));
        for category in &result.categories {
            let score = match category.score {
                Some(score) => format!("{:.2}%", score),
                None => "not required".to_string(),
            };
            output.push_str(&format!(
                "{} [{}]\n",
                self.colorize(&display_category(&category.category), Color::White),
                score
            ));
            output.push_str(&format!(
                "  matched: {}\n",
                self.colorize(&join_or_dash(&category.matched), Color::Green)
            ));
            output.push_str(&format!(
                "  missing: {}\n",
                self.colorize(&join_or_dash(&category.missing), Color::Red)
            ));
            output.push_str(&format!("  extra:   {}\n", join_or_dash(&category.extra)));
        }

        if !result.recommendations.is_empty() {
            output.push_str(&self.format_header("Recommendations", 2));
            for (i, recommendation) in result.recommendations.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, recommendation));
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Keywords", 3));
            output.push_str(&format!(
                "Resume ({}): {}\n",
                result.cv_keywords.language,
                format_counts(&result.cv_keywords.counts, usize::MAX)
            ));
            output.push_str(&format!(
                "Job ({}): {}\n",
                result.jd_keywords.language,
                format_counts(&result.jd_keywords.counts, usize::MAX)
            ));

            output.push_str(&self.format_header("Seniority Evidence", 3));
            output.push_str(&self.format_evidence("job", &result.jd_level));
            output.push_str(&self.format_evidence("resume", &result.cv_level));
        }

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
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
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

    fn markdown_score_badge(verdict: MatchVerdict) -> &'static str {
        match verdict {
            MatchVerdict::Excellent => "🟢 Excellent",
            MatchVerdict::Good => "🔵 Good",
            MatchVerdict::Partial => "🟡 Partial",
            MatchVerdict::Low => "🔴 Low",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &AnalysisReport) -> Result<String> {
        let result = &report.result;
        let mut output = String::new();

        output.push_str("# Skill Match Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Resume:** `{}` | **Job:** `{}`\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.resume_source,
                report.metadata.job_source
            ));
        }

        output.push_str("## Summary\n\n");
        output.push_str(&format!(
            "**Overall Match:** {:.2}% {}\n\n",
            result.match_percent,
            Self::markdown_score_badge(result.verdict)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", result.result_text));
        output.push_str(&format!("**Job level:** {}  \n", format_level(&result.jd_level)));
        output.push_str(&format!("**Resume level:** {}\n\n", format_level(&result.cv_level)));

        if !result.categories.is_empty() {
            output.push_str("## Categories\n\n");
            output.push_str("| Category | Score | Matched | Missing | Extra |\n");
            output.push_str("|----------|-------|---------|---------|-------|\n");
            for category in &result.categories {
                let score = category
                    .score
                    .map(|s| format!("{:.2}%", s))
                    .unwrap_or_else(|| "-".to_string());
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} |\n",
                    display_category(&category.category),
                    score,
                    join_or_dash(&category.matched),
                    join_or_dash(&category.missing),
                    join_or_dash(&category.extra)
                ));
            }
            output.push('\n');
        }

        if !result.recommendations.is_empty() {
            output.push_str("## Recommendations\n\n");
            for recommendation in &result.recommendations {
                output.push_str(&format!("- {}\n", recommendation));
            }
            output.push('\n');
        }

        output.push_str("## Keywords\n\n");
        output.push_str(&format!("- **Resume:** {}\n", top_counts(&result.cv_keywords)));
        output.push_str(&format!("- **Job:** {}\n", top_counts(&result.jd_keywords)));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatters(&self) -> [&dyn OutputFormatter; 3] {
        [&self.console_formatter, &self.json_formatter, &self.markdown_formatter]
    }

    pub fn generate_report(&self, report: &AnalysisReport, format: &OutputFormat) -> Result<String> {
        let formatter = self
            .formatters()
            .into_iter()
            .find(|f| f.supports_format() == *format)
            .unwrap_or(&self.console_formatter as &dyn OutputFormatter);
        formatter.format_report(report)
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("{}_skills{}.txt", base_name, timestamp_suffix),
        OutputFormat::Json => format!("{}_skills{}.json", base_name, timestamp_suffix),
        OutputFormat::Markdown => format!("{}_skills{}.md", base_name, timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::analyzer::{AnalysisEngine, AnalysisOptions};
    use crate::taxonomy::{LevelSignals, Taxonomy};

    fn report() -> AnalysisReport {
        let taxonomy = Taxonomy::from_json_str(
            r#"{ "programming_languages": { "skills": ["python", "go", "rust"] } }"#,
        )
        .unwrap();
        let signals = LevelSignals::from_json_str(r#"{ "senior": { "phrases": ["lead a team of"] } }"#).unwrap();
        let engine = AnalysisEngine::new(taxonomy, signals, AnalysisOptions::default());
        let result = engine.analyze("Python and Go", "Rust and Python, lead a team of three");
        AnalysisReport::new(&engine, result, "resume.txt", "job.txt")
    }

    #[test]
    fn test_console_without_colors() {
        let output = ConsoleFormatter::new(false, true).format_report(&report()).unwrap();

        assert!(output.contains("Overall Match: 50.00% [PARTIAL]"));
        assert!(output.contains("Programming Languages [50.00%]"));
        assert!(output.contains("missing: rust"));
        assert!(output.contains("job \"lead a team of\" -> senior (x1)"));
    }

    #[test]
    fn test_json_round_trips_result() {
        let report = report();
        let json = JsonFormatter::new(false).format_report(&report).unwrap();
        let parsed: AnalysisReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.result, report.result);
    }

    #[test]
    fn test_markdown_table() {
        let output = MarkdownFormatter::new(false).format_report(&report()).unwrap();

        assert!(output.contains("| Programming Languages | 50.00% | python | rust | go |"));
        assert!(output.contains("- Add or highlight experience with rust."));
        assert!(!output.contains("**Generated:**"));
    }

    #[test]
    fn test_badges_follow_verdict_near_band_edge() {
        let mut report = report();
        report.result.match_percent = 89.5;
        report.result.verdict = MatchVerdict::from_score(89.5);
        report.result.result_text = report.result.verdict.description().to_string();

        let console = ConsoleFormatter::new(false, false).format_report(&report).unwrap();
        assert!(console.contains("Overall Match: 89.50% [GOOD]"));
        assert!(!console.contains("EXCELLENT"));

        let markdown = MarkdownFormatter::new(false).format_report(&report).unwrap();
        assert!(markdown.contains("**Overall Match:** 89.50% 🔵 Good"));
    }

    #[test]
    fn test_markdown_keywords_respect_top_count() {
        let taxonomy = Taxonomy::from_json_str(
            r#"{ "programming_languages": { "skills": ["python", "go", "rust"] } }"#,
        )
        .unwrap();
        let options = AnalysisOptions {
            top_keywords: 1,
            ..AnalysisOptions::default()
        };
        let engine = AnalysisEngine::new(taxonomy, LevelSignals::empty(), options);
        let result = engine.analyze("rust rust python go", "python");
        let report = AnalysisReport::new(&engine, result, "resume.txt", "job.txt");

        let output = MarkdownFormatter::new(false).format_report(&report).unwrap();
        assert!(output.contains("- **Resume:** rust (2)\n"));
    }

    #[test]
    fn test_generator_dispatches_on_supported_format() {
        let report = report();
        let generator = ReportGenerator::with_options(false, false, false, false);

        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));
        let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# Skill Match Report"));
        let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
        assert!(console.contains("SKILL MATCH ANALYSIS"));
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Json, "cv/jane_doe.txt", false),
            "jane_doe_skills.json"
        );
    }
}
