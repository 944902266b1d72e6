//! Seniority level signals
//!
//! The level-signals document maps a level key to literal phrases and regex
//! patterns that count as evidence for that level:
//!
//! ```json
//! { "sr": { "phrases": ["lead a team of"], "regex": ["\\b\\d{2}\\+? years\\b"] } }
//! ```
//!
//! Level keys are folded onto the four [`SeniorityLevel`]s through a fixed
//! synonym table. Patterns are compiled once at load time; malformed ones are
//! skipped.

use crate::error::{Result, SkillMatchError};
use crate::processing::normalize::normalize_word;
use crate::processing::phrase::word_bounded;
use log::{debug, info, warn};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeniorityLevel {
    Entry,
    Mid,
    Senior,
    Expert,
}

/// Synonyms accepted as level keys in the signals document.
const LEVEL_SYNONYMS: &[(&str, SeniorityLevel)] = &[
    ("entry", SeniorityLevel::Entry),
    ("junior", SeniorityLevel::Entry),
    ("jr", SeniorityLevel::Entry),
    ("mid", SeniorityLevel::Mid),
    ("mid-level", SeniorityLevel::Mid),
    ("mid level", SeniorityLevel::Mid),
    ("intermediate", SeniorityLevel::Mid),
    ("regular", SeniorityLevel::Mid),
    ("professional", SeniorityLevel::Mid),
    ("senior", SeniorityLevel::Senior),
    ("sr", SeniorityLevel::Senior),
    ("expert", SeniorityLevel::Expert),
    ("principal", SeniorityLevel::Expert),
    ("architect", SeniorityLevel::Expert),
];

impl SeniorityLevel {
    /// Fixed ordering used for argmax tie-breaks.
    pub const ALL: [SeniorityLevel; 4] = [
        SeniorityLevel::Entry,
        SeniorityLevel::Mid,
        SeniorityLevel::Senior,
        SeniorityLevel::Expert,
    ];

    /// Fold a level key from the signals document onto a level.
    pub fn from_key(key: &str) -> Option<Self> {
        let key = normalize_word(key);
        LEVEL_SYNONYMS
            .iter()
            .find(|(synonym, _)| *synonym == key)
            .map(|(_, level)| *level)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SeniorityLevel::Entry => "entry",
            SeniorityLevel::Mid => "mid",
            SeniorityLevel::Senior => "senior",
            SeniorityLevel::Expert => "expert",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            SeniorityLevel::Entry => 0,
            SeniorityLevel::Mid => 1,
            SeniorityLevel::Senior => 2,
            SeniorityLevel::Expert => 3,
        }
    }
}

impl Default for SeniorityLevel {
    fn default() -> Self {
        SeniorityLevel::Mid
    }
}

impl fmt::Display for SeniorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLevelSignals {
    #[serde(default)]
    pub phrases: Option<Vec<String>>,
    #[serde(default)]
    pub regex: Option<Vec<String>>,
}

pub type RawLevelDocument = BTreeMap<String, Option<RawLevelSignals>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "source", rename_all = "lowercase")]
pub enum SignalSource {
    Phrase(String),
    Regex(String),
}

/// A single compiled signal.
#[derive(Debug, Clone)]
pub struct LevelSignal {
    pub level: SeniorityLevel,
    pub source: SignalSource,
    matcher: Regex,
}

impl LevelSignal {
    /// Compile a literal phrase into a word-bounded matcher.
    pub fn phrase(level: SeniorityLevel, phrase: &str) -> Option<Self> {
        let phrase = normalize_word(phrase);
        if phrase.is_empty() {
            return None;
        }
        let pattern = word_bounded(&regex::escape(&phrase), &phrase);
        let matcher = Regex::new(&pattern).ok()?;
        Some(Self {
            level,
            source: SignalSource::Phrase(phrase),
            matcher,
        })
    }

    /// Compile a user supplied pattern, case-insensitive.
    pub fn pattern(level: SeniorityLevel, pattern: &str) -> Result<Self> {
        let matcher = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| SkillMatchError::Pattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self {
            level,
            source: SignalSource::Regex(pattern.to_string()),
            matcher,
        })
    }

    /// Signal strength in a normalized document: phrases count once,
    /// patterns count every non-overlapping match.
    pub fn count(&self, document: &str) -> usize {
        match self.source {
            SignalSource::Phrase(_) => usize::from(self.matcher.is_match(document)),
            SignalSource::Regex(_) => self.matcher.find_iter(document).count(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LevelSignals {
    signals: Vec<LevelSignal>,
    skipped_patterns: usize,
}

impl LevelSignals {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_raw(raw: &RawLevelDocument) -> Self {
        let mut level_signals = Self::empty();

        for (key, payload) in raw {
            let Some(level) = SeniorityLevel::from_key(key) else {
                debug!("Ignoring unknown seniority level key '{}'", key);
                continue;
            };
            let Some(payload) = payload else { continue };

            for phrase in payload.phrases.iter().flatten() {
                if let Some(signal) = LevelSignal::phrase(level, phrase) {
                    level_signals.signals.push(signal);
                }
            }
            for pattern in payload.regex.iter().flatten() {
                match LevelSignal::pattern(level, pattern) {
                    Ok(signal) => level_signals.signals.push(signal),
                    Err(e) => {
                        warn!("Skipping seniority signal: {}", e);
                        level_signals.skipped_patterns += 1;
                    }
                }
            }
        }

        info!(
            "Loaded {} seniority signals ({} malformed patterns skipped)",
            level_signals.signals.len(),
            level_signals.skipped_patterns
        );

        level_signals
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawLevelDocument = serde_json::from_str(json)?;
        Ok(Self::from_raw(&raw))
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SkillMatchError::Configuration(format!(
                "Level signals file does not exist: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load a signals file, degrading to an empty signal set on failure.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(signals) => signals,
            Err(e) => {
                warn!("Using empty seniority signals ({}): {}", path.display(), e);
                Self::empty()
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelSignal> {
        self.signals.iter()
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn skipped_patterns(&self) -> usize {
        self.skipped_patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_key_folding() {
        assert_eq!(SeniorityLevel::from_key("SR"), Some(SeniorityLevel::Senior));
        assert_eq!(SeniorityLevel::from_key("Junior"), Some(SeniorityLevel::Entry));
        assert_eq!(SeniorityLevel::from_key("mid-level"), Some(SeniorityLevel::Mid));
        assert_eq!(SeniorityLevel::from_key("principal"), Some(SeniorityLevel::Expert));
        assert_eq!(SeniorityLevel::from_key("wizard"), None);
    }

    #[test]
    fn test_malformed_pattern_is_skipped() {
        let json = r#"{
            "senior": { "phrases": ["Lead a team of"], "regex": ["(unclosed", "\\bmentor(ed|ing)?\\b"] },
            "unknown": { "phrases": ["anything"] },
            "expert": null
        }"#;
        let signals = LevelSignals::from_json_str(json).unwrap();

        assert_eq!(signals.len(), 2);
        assert_eq!(signals.skipped_patterns(), 1);
        assert!(signals.iter().all(|s| s.level == SeniorityLevel::Senior));
    }

    #[test]
    fn test_phrase_signal_counts_once() {
        let signal = LevelSignal::phrase(SeniorityLevel::Senior, "Lead a team of").unwrap();
        let document = "i lead a team of five. i also lead a team of interns.";

        assert_eq!(signal.count(document), 1);
        assert_eq!(signal.count("misleading a team of"), 0);
    }

    #[test]
    fn test_regex_signal_counts_matches() {
        let signal = LevelSignal::pattern(SeniorityLevel::Expert, r"\barchitect(ed)?\b").unwrap();

        assert_eq!(signal.count("architected systems as an architect"), 2);
    }

    #[test]
    fn test_missing_file_degrades_to_empty() {
        let signals = LevelSignals::load_or_empty(Path::new("/nonexistent/levels.json"));
        assert!(signals.is_empty());
    }
}
