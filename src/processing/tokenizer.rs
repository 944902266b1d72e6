//! Skill tokenization: text in, canonical skill tokens out

use crate::processing::normalize::{is_numeric, normalize_word, strip_trailing_punctuation};
use crate::processing::phrase::PhraseSet;
use crate::taxonomy::Taxonomy;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;
use whatlang::Lang;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Short tokens that survive the minimum-length filter.
pub const DEFAULT_SHORT_TOKENS: &[&str] = &["go", "r", "c", "c#", "c++"];

/// Words that show up in every job posting and never denote a skill.
const NOISE_TERMS: &[&str] = &[
    "experience", "years", "year", "education", "degree", "bachelor", "master", "phd",
    "responsibilities", "requirements", "skills", "technologies", "stack", "tools",
    "benefits", "perks", "culture", "opportunity", "position", "role", "candidate",
    "company", "environment", "team", "work", "working", "projects", "project",
    "preferred", "required", "knowledge", "familiarity", "understanding",
    "junior", "senior", "entry", "mid", "expert",
];

const MIN_TOKEN_LENGTH: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerOptions {
    pub short_token_allowlist: Vec<String>,
    pub default_language: String,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            short_token_allowlist: DEFAULT_SHORT_TOKENS.iter().map(|s| s.to_string()).collect(),
            default_language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

/// Canonical skill tokens of one document, duplicates preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSequence {
    pub tokens: Vec<String>,
    pub language: String,
}

impl TokenSequence {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }
}

pub struct Tokenizer {
    taxonomy: Arc<Taxonomy>,
    phrases: PhraseSet,
    word_regex: Regex,
    noise_terms: HashSet<&'static str>,
    short_tokens: HashSet<String>,
    default_language: String,
}

impl Tokenizer {
    pub fn new(taxonomy: Arc<Taxonomy>) -> Self {
        Self::with_options(taxonomy, TokenizerOptions::default())
    }

    pub fn with_options(taxonomy: Arc<Taxonomy>, options: TokenizerOptions) -> Self {
        let phrases = PhraseSet::compile(&taxonomy);

        // Letters, digits and the symbols that keep "c#", "c++", "node.js" whole
        let word_regex = Regex::new(r"[\p{L}\p{N}#+.]+").expect("Invalid word regex");

        let short_tokens = options
            .short_token_allowlist
            .iter()
            .map(|t| normalize_word(t))
            .filter(|t| !t.is_empty())
            .collect();

        Self {
            taxonomy,
            phrases,
            word_regex,
            noise_terms: NOISE_TERMS.iter().copied().collect(),
            short_tokens,
            default_language: options.default_language,
        }
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn phrases(&self) -> &PhraseSet {
        &self.phrases
    }

    /// Tokenize a document into canonical skills. Phrase-derived tokens come
    /// first in text order, followed by single-word tokens in text order.
    pub fn tokenize(&self, text: &str, language: Option<&str>) -> TokenSequence {
        let language = match language {
            Some(lang) => lang.to_string(),
            None => self.detect_language(text),
        };

        if text.trim().is_empty() {
            return TokenSequence {
                tokens: Vec::new(),
                language,
            };
        }

        let normalized = normalize_word(text);
        let replaced = self.phrases.apply(&normalized);
        let (phrase_tokens, residual) = self.phrases.extract(&replaced);

        // Phrase matches are explicit taxonomy entries, so the length filter
        // only applies to single words.
        let mut tokens: Vec<String> = phrase_tokens
            .into_iter()
            .filter(|t| self.taxonomy.is_canonical(t))
            .collect();

        for raw in self.word_regex.find_iter(&residual) {
            if let Some(canonical) = self.canonicalize_token(raw.as_str()) {
                tokens.push(canonical.to_string());
            }
        }

        debug!("Tokenized {} characters into {} skill tokens", text.len(), tokens.len());

        TokenSequence { tokens, language }
    }

    /// Resolve one raw token to its canonical skill, if it is one.
    pub fn canonicalize_token<'a>(&'a self, raw: &str) -> Option<&'a str> {
        let token = normalize_word(strip_trailing_punctuation(raw));
        if token.is_empty() || self.noise_terms.contains(token.as_str()) || is_numeric(&token) {
            return None;
        }
        let canonical = self.taxonomy.resolve(&token)?;
        self.is_admissible(canonical).then_some(canonical)
    }

    /// A canonical skill is emitted unless it is too short and not allow-listed.
    fn is_admissible(&self, canonical: &str) -> bool {
        if !self.taxonomy.is_canonical(canonical) {
            return false;
        }
        canonical.graphemes(true).count() >= MIN_TOKEN_LENGTH || self.short_tokens.contains(canonical)
    }

    /// Best-effort language tag. Advisory only; never changes tokenization.
    pub fn detect_language(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return self.default_language.clone();
        }
        match whatlang::detect(text) {
            Some(info) => language_tag(info.lang()),
            None => self.default_language.clone(),
        }
    }
}

/// Two-letter tags for common languages, ISO 639-3 for the rest.
fn language_tag(lang: Lang) -> String {
    let tag = match lang {
        Lang::Eng => "en",
        Lang::Deu => "de",
        Lang::Fra => "fr",
        Lang::Spa => "es",
        Lang::Ita => "it",
        Lang::Por => "pt",
        Lang::Nld => "nl",
        Lang::Pol => "pl",
        Lang::Rus => "ru",
        Lang::Ukr => "uk",
        Lang::Tur => "tr",
        Lang::Swe => "sv",
        Lang::Dan => "da",
        Lang::Fin => "fi",
        Lang::Ces => "cs",
        Lang::Jpn => "ja",
        Lang::Cmn => "zh",
        Lang::Kor => "ko",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        other => other.code(),
    };
    tag.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokenizer() -> Tokenizer {
        let taxonomy = Taxonomy::from_json_str(
            r#"{
                "languages": {
                    "skills": ["python", "go", "rust", "c#", "c++", "r", "javascript", "ai"],
                    "aliases": { "golang": "go", "js": "javascript", "py": "python" }
                },
                "web": {
                    "skills": ["node.js", "react"],
                    "aliases": { "reactjs": "react" }
                },
                "data_science_ml": {
                    "skills": ["ml", "mle"],
                    "aliases": {
                        "machine learning": "ml",
                        "machine learning engineer": "mle"
                    }
                },
                "noise": { "skills": ["team", "2024"] }
            }"#,
        )
        .unwrap();
        Tokenizer::new(Arc::new(taxonomy))
    }

    fn tokens(text: &str) -> Vec<String> {
        tokenizer().tokenize(text, Some("en")).tokens
    }

    #[test]
    fn test_scenario_tokens() {
        assert_eq!(tokens("I use Python and Go daily"), vec!["python", "go"]);
        assert_eq!(tokens("Looking for Rust and Python expert"), vec!["rust", "python"]);
    }

    #[test]
    fn test_alias_resolution() {
        assert_eq!(tokens("Golang"), vec!["go"]);
        assert_eq!(tokens("js"), vec!["javascript"]);
        assert_eq!(tokens("ReactJS."), vec!["react"]);
    }

    #[test]
    fn test_symbol_tokens_survive() {
        assert_eq!(tokens("C#, C++ and Node.js."), vec!["node.js", "c#", "c++"]);
        assert_eq!(tokens("stats in R"), vec!["r"]);
    }

    #[test]
    fn test_longest_match_precedence() {
        assert_eq!(tokens("machine learning engineer"), vec!["mle"]);
        assert_eq!(tokens("machine-learning"), vec!["ml"]);
    }

    #[test]
    fn test_noise_numeric_and_short_filtered() {
        // "team" and "2024" are registered skills but never emitted
        assert!(tokens("team of 2024 engineers").is_empty());
        // "ai" is canonical but short and not allow-listed
        assert!(tokens("AI research").is_empty());
    }

    #[test]
    fn test_overlapping_aliases_keep_longest_skill() {
        let taxonomy = Taxonomy::from_json_str(
            r#"{
                "ci_cd_tooling": {
                    "skills": ["ci/cd", "continuous deployment"],
                    "aliases": {
                        "continuous delivery": "ci/cd",
                        "cd pipeline": "continuous deployment"
                    }
                }
            }"#,
        )
        .unwrap();
        let tokenizer = Tokenizer::new(Arc::new(taxonomy));

        let sequence = tokenizer.tokenize("Continuous delivery pipeline", Some("en"));
        assert_eq!(sequence.tokens, vec!["ci/cd"]);
    }

    #[test]
    fn test_phrase_tokens_come_first() {
        assert_eq!(
            tokens("Python for machine learning"),
            vec!["ml".to_string(), "python".to_string()]
        );
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = tokenizer();
        let sequence = tokenizer.tokenize("   \n\t", None);

        assert!(sequence.is_empty());
        assert_eq!(sequence.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_language_hint_is_kept() {
        let sequence = tokenizer().tokenize("Python", Some("de"));
        assert_eq!(sequence.language, "de");
    }

    #[test]
    fn test_language_detection() {
        let tokenizer = tokenizer();
        let english = "We are looking for an engineer who enjoys building reliable backend services \
                       and writing clear documentation for the rest of the organisation.";
        assert_eq!(tokenizer.detect_language(english), "en");
    }
}
