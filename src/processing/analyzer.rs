//! Analysis engine: tokenizes both documents once and assembles the
//! comparison, keyword and seniority results into one [`AnalysisResult`]

use crate::config::Config;
use crate::processing::comparator::{CategoryBreakdown, CategoryComparator};
use crate::processing::keywords::{rank_keywords, KeywordCount, KeywordExtractor};
use crate::processing::seniority::{SeniorityDetector, SeniorityScore};
use crate::processing::tokenizer::{TokenSequence, Tokenizer, TokenizerOptions};
use crate::taxonomy::{LevelSignals, Taxonomy};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub const DEFAULT_TOP_KEYWORDS: usize = 20;
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    pub top_keywords: usize,
    pub recommendation_limit: usize,
    pub tokenizer: TokenizerOptions,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_keywords: DEFAULT_TOP_KEYWORDS,
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
            tokenizer: TokenizerOptions::default(),
        }
    }
}

impl From<&Config> for AnalysisOptions {
    fn from(config: &Config) -> Self {
        Self {
            top_keywords: config.matching.top_keywords,
            recommendation_limit: config.matching.recommendation_limit,
            tokenizer: TokenizerOptions {
                short_token_allowlist: config.matching.short_token_allowlist.clone(),
                default_language: config.matching.default_language.clone(),
            },
        }
    }
}

/// Qualitative band for the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchVerdict {
    Excellent,
    Good,
    Partial,
    Low,
}

impl MatchVerdict {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            MatchVerdict::Excellent
        } else if score >= 70.0 {
            MatchVerdict::Good
        } else if score >= 50.0 {
            MatchVerdict::Partial
        } else {
            MatchVerdict::Low
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            MatchVerdict::Excellent => "Excellent match: strong overlap across core skills.",
            MatchVerdict::Good => "Good match: solid overlap with a few areas to improve.",
            MatchVerdict::Partial => "Partial match: several gaps to address for a better fit.",
            MatchVerdict::Low => "Low alignment: consider tailoring your CV toward the role.",
        }
    }
}

impl fmt::Display for MatchVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Keywords found in one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordSummary {
    /// The most frequent skills, capped at the configured count.
    pub top: Vec<String>,
    /// Every distinct skill in ranked order.
    pub all: Vec<String>,
    pub counts: Vec<KeywordCount>,
    pub language: String,
}

impl KeywordSummary {
    fn from_sequence(sequence: &TokenSequence, top_n: usize) -> Self {
        let counts = rank_keywords(&sequence.tokens);
        let all: Vec<String> = counts.iter().map(|k| k.keyword.clone()).collect();
        Self {
            top: all.iter().take(top_n).cloned().collect(),
            all,
            counts,
            language: sequence.language.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Overall match percentage, 0-100 with two decimals.
    pub match_percent: f64,
    pub categories: Vec<CategoryBreakdown>,
    pub category_scores: BTreeMap<String, f64>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub extra_keywords: Vec<String>,
    pub cv_keywords: KeywordSummary,
    pub jd_keywords: KeywordSummary,
    pub cv_level: SeniorityScore,
    pub jd_level: SeniorityScore,
    pub verdict: MatchVerdict,
    pub result_text: String,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    pub fn has_skills(&self) -> bool {
        !self.cv_keywords.all.is_empty() || !self.jd_keywords.all.is_empty()
    }
}

/// One suggestion per missing keyword, in sorted order.
pub fn build_recommendations(missing_keywords: &[String], limit: usize) -> Vec<String> {
    missing_keywords
        .iter()
        .take(limit)
        .map(|kw| format!("Add or highlight experience with {}.", kw))
        .collect()
}

/// Main analysis engine. Built once from the taxonomy and level signals,
/// then shared read-only across any number of concurrent analyses.
pub struct AnalysisEngine {
    taxonomy: Arc<Taxonomy>,
    tokenizer: Tokenizer,
    detector: SeniorityDetector,
    options: AnalysisOptions,
}

impl AnalysisEngine {
    pub fn new(taxonomy: Taxonomy, signals: LevelSignals, options: AnalysisOptions) -> Self {
        let taxonomy = Arc::new(taxonomy);
        let tokenizer = Tokenizer::with_options(Arc::clone(&taxonomy), options.tokenizer.clone());
        info!(
            "Analysis engine ready: {} skills, {} phrase patterns, {} seniority signals",
            taxonomy.skill_count(),
            tokenizer.phrases().len(),
            signals.len()
        );
        Self {
            taxonomy,
            tokenizer,
            detector: SeniorityDetector::new(signals),
            options,
        }
    }

    /// Build the engine from the configured sources. Missing or corrupt
    /// sources yield an engine that reports zero matches.
    pub fn from_config(config: &Config) -> Self {
        let taxonomy = Taxonomy::load_or_empty(&config.sources.taxonomy_path);
        let signals = LevelSignals::load_or_empty(&config.sources.level_signals_path);
        Self::new(taxonomy, signals, AnalysisOptions::from(config))
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }

    pub fn detector(&self) -> &SeniorityDetector {
        &self.detector
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Ranked skill counts for a single document, capped at the
    /// configured keyword count.
    pub fn extract_keywords(&self, text: &str) -> Vec<KeywordCount> {
        let (_, mut counts) = KeywordExtractor::new(&self.tokenizer).extract_all_keywords(text);
        counts.truncate(self.options.top_keywords);
        counts
    }

    /// Compare a resume against a job description. Both texts may be empty.
    pub fn analyze(&self, cv_text: &str, jd_text: &str) -> AnalysisResult {
        let cv_tokens = self.tokenizer.tokenize(cv_text, None);
        let jd_tokens = self.tokenizer.tokenize(jd_text, None);
        debug!(
            "Resume: {} skill tokens ({}), job description: {} skill tokens ({})",
            cv_tokens.len(),
            cv_tokens.language,
            jd_tokens.len(),
            jd_tokens.language
        );

        let comparison =
            CategoryComparator::new(&self.taxonomy).compare(&cv_tokens.tokens, &jd_tokens.tokens);

        let verdict = MatchVerdict::from_score(comparison.overall);
        let recommendations =
            build_recommendations(&comparison.missing_keywords, self.options.recommendation_limit);

        AnalysisResult {
            match_percent: comparison.overall,
            categories: comparison.categories,
            category_scores: comparison.category_scores,
            matched_keywords: comparison.matched_keywords,
            missing_keywords: comparison.missing_keywords,
            extra_keywords: comparison.extra_keywords,
            cv_keywords: KeywordSummary::from_sequence(&cv_tokens, self.options.top_keywords),
            jd_keywords: KeywordSummary::from_sequence(&jd_tokens, self.options.top_keywords),
            cv_level: self.detector.detect(cv_text),
            jd_level: self.detector.detect(jd_text),
            verdict,
            result_text: verdict.description().to_string(),
            recommendations,
        }
    }
}
