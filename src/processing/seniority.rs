//! Seniority level detection from phrase and pattern signals

use crate::processing::normalize::normalize_word;
use crate::taxonomy::{LevelSignals, SeniorityLevel, SignalSource};
use serde::{Deserialize, Serialize};

/// A signal that fired, kept as evidence for the prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalHit {
    pub level: SeniorityLevel,
    pub signal: SignalSource,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeniorityScore {
    pub entry: usize,
    pub mid: usize,
    pub senior: usize,
    pub expert: usize,
    pub predicted: SeniorityLevel,
    pub evidence: Vec<SignalHit>,
}

impl SeniorityScore {
    fn from_counts(counts: [usize; 4], evidence: Vec<SignalHit>) -> Self {
        Self {
            entry: counts[0],
            mid: counts[1],
            senior: counts[2],
            expert: counts[3],
            predicted: predict(&counts),
            evidence,
        }
    }

    pub fn score(&self, level: SeniorityLevel) -> usize {
        match level {
            SeniorityLevel::Entry => self.entry,
            SeniorityLevel::Mid => self.mid,
            SeniorityLevel::Senior => self.senior,
            SeniorityLevel::Expert => self.expert,
        }
    }

    pub fn total(&self) -> usize {
        self.entry + self.mid + self.senior + self.expert
    }
}

impl Default for SeniorityScore {
    fn default() -> Self {
        Self::from_counts([0; 4], Vec::new())
    }
}

/// Argmax over the fixed level order; the earliest level wins ties and an
/// all-zero score predicts `mid`.
fn predict(counts: &[usize; 4]) -> SeniorityLevel {
    let mut best = SeniorityLevel::default();
    let mut best_score = 0;
    for level in SeniorityLevel::ALL {
        let score = counts[level.index()];
        if score > best_score {
            best = level;
            best_score = score;
        }
    }
    best
}

pub struct SeniorityDetector {
    signals: LevelSignals,
}

impl SeniorityDetector {
    pub fn new(signals: LevelSignals) -> Self {
        Self { signals }
    }

    pub fn signals(&self) -> &LevelSignals {
        &self.signals
    }

    pub fn detect(&self, text: &str) -> SeniorityScore {
        let document = normalize_word(text);
        let mut counts = [0usize; 4];
        let mut evidence = Vec::new();

        if document.is_empty() {
            return SeniorityScore::default();
        }

        for signal in self.signals.iter() {
            let count = signal.count(&document);
            if count == 0 {
                continue;
            }
            counts[signal.level.index()] += count;
            evidence.push(SignalHit {
                level: signal.level,
                signal: signal.source.clone(),
                count,
            });
        }

        SeniorityScore::from_counts(counts, evidence)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detector() -> SeniorityDetector {
        let signals = LevelSignals::from_json_str(
            r#"{
                "junior": { "phrases": ["graduate", "internship"] },
                "mid": { "phrases": ["independently"] },
                "sr": { "phrases": ["lead a team of"], "regex": ["\\b(?:[5-9]|1\\d)\\+? years\\b"] },
                "principal": { "phrases": ["architecture"], "regex": ["[unclosed"] }
            }"#,
        )
        .unwrap();
        SeniorityDetector::new(signals)
    }

    #[test]
    fn test_single_senior_phrase() {
        let score = detector().detect("You will Lead a team of engineers.");

        assert_eq!(score.senior, 1);
        assert_eq!(score.entry + score.mid + score.expert, 0);
        assert_eq!(score.predicted, SeniorityLevel::Senior);
        assert_eq!(score.evidence.len(), 1);
        assert_eq!(
            score.evidence[0].signal,
            SignalSource::Phrase("lead a team of".to_string())
        );
    }

    #[test]
    fn test_regex_signals_count_every_match() {
        let score = detector().detect("8 years of Rust, 10+ years of C++");

        assert_eq!(score.senior, 2);
        assert_eq!(score.predicted, SeniorityLevel::Senior);
    }

    #[test]
    fn test_defaults_to_mid_without_signals() {
        let score = detector().detect("Write code and ship features.");

        assert_eq!(score.total(), 0);
        assert_eq!(score.predicted, SeniorityLevel::Mid);
        assert!(score.evidence.is_empty());

        let empty = SeniorityDetector::new(LevelSignals::empty()).detect("lead a team of five");
        assert_eq!(empty.predicted, SeniorityLevel::Mid);
    }

    #[test]
    fn test_ties_resolve_to_earlier_level() {
        let score = detector().detect("graduate role, working independently");

        assert_eq!(score.entry, 1);
        assert_eq!(score.mid, 1);
        assert_eq!(score.predicted, SeniorityLevel::Entry);
    }

    #[test]
    fn test_score_by_level() {
        let score = detector().detect("Graduate internship, 6 years of Go");

        assert_eq!(score.score(SeniorityLevel::Entry), 2);
        assert_eq!(score.score(SeniorityLevel::Senior), 1);
        assert_eq!(score.score(SeniorityLevel::Expert), 0);
        assert_eq!(score.predicted, SeniorityLevel::Entry);
    }

    #[test]
    fn test_empty_text() {
        let score = detector().detect("");
        assert_eq!(score, SeniorityScore::default());
    }
}
