//! Frequency-ranked skill keywords

use crate::processing::tokenizer::Tokenizer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Count canonical tokens and rank them by frequency. Equal counts keep
/// first-appearance order.
pub fn rank_keywords(tokens: &[String]) -> Vec<KeywordCount> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<KeywordCount> = Vec::new();

    for token in tokens {
        match positions.get(token.as_str()) {
            Some(&index) => counts[index].count += 1,
            None => {
                positions.insert(token, counts.len());
                counts.push(KeywordCount {
                    keyword: token.clone(),
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// The `top_n` most frequent keywords.
pub fn top_keywords(tokens: &[String], top_n: usize) -> Vec<String> {
    rank_keywords(tokens)
        .into_iter()
        .take(top_n)
        .map(|k| k.keyword)
        .collect()
}

pub struct KeywordExtractor<'a> {
    tokenizer: &'a Tokenizer,
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(tokenizer: &'a Tokenizer) -> Self {
        Self { tokenizer }
    }

    /// Tokenize `text` and return its `top_n` most frequent canonical skills.
    pub fn extract_keywords(&self, text: &str, top_n: usize) -> Vec<String> {
        top_keywords(&self.canonical_tokens(text), top_n)
    }

    /// Every distinct canonical skill in ranked order, plus the counts.
    pub fn extract_all_keywords(&self, text: &str) -> (Vec<String>, Vec<KeywordCount>) {
        let ranked = rank_keywords(&self.canonical_tokens(text));
        let keywords = ranked.iter().map(|k| k.keyword.clone()).collect();
        (keywords, ranked)
    }

    fn canonical_tokens(&self, text: &str) -> Vec<String> {
        let taxonomy = self.tokenizer.taxonomy();
        self.tokenizer
            .tokenize(text, None)
            .tokens
            .into_iter()
            .filter(|t| taxonomy.is_canonical(t))
            .collect()
    }
}
