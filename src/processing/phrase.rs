//! Multi-word alias detection
//!
//! Aliases joined by connectors ("ci/cd", "machine learning", "node.js") are
//! compiled into connector-tolerant patterns and substituted with
//! placeholder tokens before the word scan. Patterns are applied longest
//! alias first so "machine learning engineer" claims its span before
//! "machine learning" can.

use crate::taxonomy::Taxonomy;
use log::{debug, warn};
use regex::{NoExpand, Regex, RegexBuilder};
use std::collections::HashMap;

/// Matches any run of connector characters between alias parts.
const CONNECTOR_CLASS: &str = r"[\s_/.\-]+";

/// Placeholder-looking spans left in substituted text.
const PLACEHOLDER_PATTERN: &str = r"__(\S+?)__";

fn is_connector(c: char) -> bool {
    c.is_whitespace() || matches!(c, '_' | '/' | '.' | '-')
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Wrap a pattern body in `\b` anchors, but only on sides where the literal
/// starts or ends with a word character. An anchor next to a symbol
/// (`c++`, `.net`) would never match.
pub fn word_bounded(body: &str, literal: &str) -> String {
    let leading = literal.chars().next().is_some_and(is_word_char);
    let trailing = literal.chars().last().is_some_and(is_word_char);
    format!(
        "{}{}{}",
        if leading { r"\b" } else { "" },
        body,
        if trailing { r"\b" } else { "" }
    )
}

/// Placeholder token for the `index`-th distinct canonical skill. Only word
/// characters, so no `\b`-anchored pattern can match inside one.
pub fn placeholder_for(index: usize) -> String {
    format!("__ph{}__", index)
}

#[derive(Debug, Clone)]
pub struct PhrasePattern {
    pub alias: String,
    pub canonical: String,
    pub placeholder: String,
    matcher: Regex,
}

impl PhrasePattern {
    /// Compile a pattern for an alias. Returns `None` for aliases that are a
    /// single part after splitting on connectors; those are handled by the
    /// word scan. The placeholder is assigned once the whole set is ordered.
    pub fn compile(alias: &str, canonical: &str) -> Option<Self> {
        if !alias.chars().any(is_connector) {
            return None;
        }
        let parts: Vec<&str> = alias.split(is_connector).filter(|p| !p.is_empty()).collect();
        if parts.len() < 2 {
            return None;
        }

        let body = parts
            .iter()
            .map(|part| regex::escape(part))
            .collect::<Vec<_>>()
            .join(CONNECTOR_CLASS);
        let literal = parts.join(" ");
        let pattern = word_bounded(&body, &literal);

        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(matcher) => Some(Self {
                alias: alias.to_string(),
                canonical: canonical.to_string(),
                placeholder: String::new(),
                matcher,
            }),
            Err(e) => {
                warn!("Skipping phrase alias '{}': {}", alias, e);
                None
            }
        }
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }
}

/// The ordered phrase patterns for one taxonomy plus the placeholder table
/// used to decode them again.
#[derive(Debug, Clone)]
pub struct PhraseSet {
    patterns: Vec<PhrasePattern>,
    placeholders: HashMap<String, String>,
    placeholder_regex: Regex,
}

impl PhraseSet {
    pub fn compile(taxonomy: &Taxonomy) -> Self {
        let mut patterns: Vec<PhrasePattern> = taxonomy
            .aliases()
            .filter_map(|(alias, canonical)| PhrasePattern::compile(alias, canonical))
            .collect();

        // Longest alias first; ties by alias text so the order never depends
        // on hash iteration.
        patterns.sort_by(|a, b| {
            b.alias
                .chars()
                .count()
                .cmp(&a.alias.chars().count())
                .then_with(|| a.alias.cmp(&b.alias))
        });

        // One placeholder per canonical skill, numbered in pattern order
        let mut by_canonical: HashMap<String, String> = HashMap::new();
        let mut placeholders = HashMap::new();
        for pattern in &mut patterns {
            let next = by_canonical.len();
            let placeholder = by_canonical
                .entry(pattern.canonical.clone())
                .or_insert_with(|| placeholder_for(next))
                .clone();
            placeholders.insert(placeholder.clone(), pattern.canonical.clone());
            pattern.placeholder = placeholder;
        }

        debug!("Compiled {} phrase patterns", patterns.len());

        Self {
            patterns,
            placeholders,
            placeholder_regex: Regex::new(PLACEHOLDER_PATTERN).expect("Invalid placeholder regex"),
        }
    }

    pub fn patterns(&self) -> &[PhrasePattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Substitute every phrase occurrence with its placeholder, longest
    /// aliases first.
    pub fn apply(&self, text: &str) -> String {
        let mut replaced = text.to_string();
        for pattern in &self.patterns {
            if pattern.is_match(&replaced) {
                replaced = pattern
                    .matcher
                    .replace_all(&replaced, NoExpand(&pattern.placeholder))
                    .into_owned();
            }
        }
        replaced
    }

    /// Decode a placeholder back to its canonical skill name.
    pub fn decode(&self, placeholder: &str) -> Option<&str> {
        self.placeholders.get(placeholder).map(String::as_str)
    }

    /// Pull placeholders out of substituted text. Returns the decoded
    /// canonical names in text order and the text with every
    /// placeholder-looking span blanked out.
    pub fn extract(&self, replaced: &str) -> (Vec<String>, String) {
        let mut canonical = Vec::new();
        for found in self.placeholder_regex.find_iter(replaced) {
            match self.decode(found.as_str()) {
                Some(name) => canonical.push(name.to_string()),
                None => debug!("Ignoring unknown placeholder '{}'", found.as_str()),
            }
        }
        let residual = self.placeholder_regex.replace_all(replaced, " ").into_owned();
        (canonical, residual)
    }
}
