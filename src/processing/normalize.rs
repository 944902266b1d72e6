//! Text normalization shared by the taxonomy loader and the tokenizer
//!
//! Normalization is the single source of truth for equality: two spellings
//! that normalize to the same string are the same skill.

use unicode_normalization::UnicodeNormalization;

/// Characters removed from the end of a raw token before lookup.
const TRAILING_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '?', ')', ']', '}', '>', '"', '\'', '\u{201D}', '\u{2019}',
];

/// NFKC fold, trim and lowercase.
pub fn normalize_word(text: &str) -> String {
    text.trim().to_lowercase().nfkc().collect()
}

/// Strip trailing punctuation left over from sentence structure
/// (`"python,"` -> `"python"`, `"node.js."` -> `"node.js"`).
pub fn strip_trailing_punctuation(token: &str) -> &str {
    token.trim_end_matches(TRAILING_PUNCTUATION)
}

/// True when the token consists only of decimal digits.
pub fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_numeric())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_word() {
        assert_eq!(normalize_word("  Python "), "python");
        assert_eq!(normalize_word("KUBERNETES"), "kubernetes");
        // Fullwidth letters fold to ASCII under NFKC
        assert_eq!(normalize_word("\u{FF32}\u{FF55}\u{FF53}\u{FF54}"), "rust");
        assert_eq!(normalize_word(""), "");
    }

    #[test]
    fn test_strip_trailing_punctuation() {
        assert_eq!(strip_trailing_punctuation("python,"), "python");
        assert_eq!(strip_trailing_punctuation("node.js."), "node.js");
        assert_eq!(strip_trailing_punctuation("c++)"), "c++");
        assert_eq!(strip_trailing_punctuation(".net"), ".net");
    }

    #[test]
    fn test_is_numeric() {
        assert!(is_numeric("2024"));
        assert!(!is_numeric("k8s"));
        assert!(!is_numeric(""));
    }
}
