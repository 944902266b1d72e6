//! Per-category comparison of resume and job description skills
//!
//! Scores reflect coverage of the job description: each category the JD
//! mentions gets `|matched| / |JD skills in category| * 100`, and the overall
//! score is the mean over those categories only. Categories that appear only
//! in the resume report their extras but are never scored.

use crate::taxonomy::Taxonomy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub extra: Vec<String>,
    /// `None` when the category only appears on the resume side.
    pub score: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Every category seen on either side, in key order.
    pub categories: Vec<CategoryBreakdown>,
    pub category_scores: BTreeMap<String, f64>,
    pub overall: f64,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub extra_keywords: Vec<String>,
}

impl ComparisonResult {
    pub fn category(&self, key: &str) -> Option<&CategoryBreakdown> {
        self.categories.iter().find(|c| c.category == key)
    }
}

/// Group canonical tokens by their taxonomy category.
pub fn bucket_by_category(tokens: &[String], taxonomy: &Taxonomy) -> BTreeMap<String, BTreeSet<String>> {
    let mut buckets: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
    for token in tokens {
        if let Some(category) = taxonomy.category_of(token) {
            buckets
                .entry(category.to_string())
                .or_default()
                .insert(token.clone());
        }
    }
    buckets
}

pub struct CategoryComparator<'a> {
    taxonomy: &'a Taxonomy,
}

impl<'a> CategoryComparator<'a> {
    pub fn new(taxonomy: &'a Taxonomy) -> Self {
        Self { taxonomy }
    }

    pub fn compare(&self, cv_tokens: &[String], jd_tokens: &[String]) -> ComparisonResult {
        let cv_buckets = bucket_by_category(cv_tokens, self.taxonomy);
        let jd_buckets = bucket_by_category(jd_tokens, self.taxonomy);
        let empty = BTreeSet::new();

        let keys: BTreeSet<&String> = cv_buckets.keys().chain(jd_buckets.keys()).collect();

        let mut categories = Vec::with_capacity(keys.len());
        let mut category_scores = BTreeMap::new();
        let mut matched_keywords = BTreeSet::new();
        let mut missing_keywords = BTreeSet::new();
        let mut extra_keywords = BTreeSet::new();

        for key in keys {
            let cv_skills = cv_buckets.get(key).unwrap_or(&empty);
            let jd_skills = jd_buckets.get(key);

            let matched: Vec<String> = match jd_skills {
                Some(jd) => cv_skills.intersection(jd).cloned().collect(),
                None => Vec::new(),
            };
            let missing: Vec<String> = match jd_skills {
                Some(jd) => jd.difference(cv_skills).cloned().collect(),
                None => Vec::new(),
            };
            let extra: Vec<String> = cv_skills
                .difference(jd_skills.unwrap_or(&empty))
                .cloned()
                .collect();

            let score = jd_skills.map(|jd| {
                let total = jd.len().max(1) as f64;
                round2(matched.len() as f64 / total * 100.0)
            });
            if let Some(score) = score {
                category_scores.insert(key.clone(), score);
            }

            matched_keywords.extend(matched.iter().cloned());
            missing_keywords.extend(missing.iter().cloned());
            extra_keywords.extend(extra.iter().cloned());

            categories.push(CategoryBreakdown {
                category: key.clone(),
                matched,
                missing,
                extra,
                score,
            });
        }

        let overall = if category_scores.is_empty() {
            0.0
        } else {
            round2(category_scores.values().sum::<f64>() / category_scores.len() as f64)
        };

        ComparisonResult {
            categories,
            category_scores,
            overall,
            matched_keywords: matched_keywords.into_iter().collect(),
            missing_keywords: missing_keywords.into_iter().collect(),
            extra_keywords: extra_keywords.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> Taxonomy {
        Taxonomy::from_json_str(
            r#"{
                "languages": { "skills": ["python", "go", "rust"] },
                "cloud": { "skills": ["aws", "gcp", "azure"] },
                "databases": { "skills": ["postgresql", "redis"] }
            }"#,
        )
        .unwrap()
    }

    fn owned(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_scenario_comparison() {
        let taxonomy = taxonomy();
        let comparator = CategoryComparator::new(&taxonomy);
        let result = comparator.compare(&owned(&["python", "go"]), &owned(&["rust", "python"]));

        let languages = result.category("languages").unwrap();
        assert_eq!(languages.matched, vec!["python"]);
        assert_eq!(languages.missing, vec!["rust"]);
        assert_eq!(languages.extra, vec!["go"]);
        assert_eq!(languages.score, Some(50.0));
        assert_eq!(result.overall, 50.0);
    }

    #[test]
    fn test_cv_only_category_is_not_scored() {
        let taxonomy = taxonomy();
        let comparator = CategoryComparator::new(&taxonomy);
        let result = comparator.compare(
            &owned(&["python", "redis", "postgresql"]),
            &owned(&["python", "aws"]),
        );

        let databases = result.category("databases").unwrap();
        assert_eq!(databases.extra, vec!["postgresql", "redis"]);
        assert_eq!(databases.score, None);
        assert!(!result.category_scores.contains_key("databases"));

        // languages 100, cloud 0
        assert_eq!(result.category_scores["languages"], 100.0);
        assert_eq!(result.category_scores["cloud"], 0.0);
        assert_eq!(result.overall, 50.0);
        assert_eq!(result.extra_keywords, vec!["postgresql", "redis"]);
    }

    #[test]
    fn test_empty_cv_misses_everything() {
        let taxonomy = taxonomy();
        let comparator = CategoryComparator::new(&taxonomy);
        let result = comparator.compare(&[], &owned(&["rust", "aws", "gcp"]));

        assert_eq!(result.missing_keywords, vec!["aws", "gcp", "rust"]);
        assert!(result.matched_keywords.is_empty());
        assert!(result.category_scores.values().all(|s| *s == 0.0));
        assert_eq!(result.overall, 0.0);
    }

    #[test]
    fn test_nothing_scored_gives_zero() {
        let taxonomy = taxonomy();
        let comparator = CategoryComparator::new(&taxonomy);
        let result = comparator.compare(&owned(&["python"]), &[]);

        assert!(result.category_scores.is_empty());
        assert_eq!(result.overall, 0.0);
    }

    #[test]
    fn test_scores_are_rounded_and_bounded() {
        let taxonomy = taxonomy();
        let comparator = CategoryComparator::new(&taxonomy);
        let result = comparator.compare(&owned(&["aws"]), &owned(&["aws", "gcp", "azure"]));

        assert_eq!(result.category_scores["cloud"], 33.33);
        for score in result.category_scores.values() {
            assert!((0.0..=100.0).contains(score));
        }
    }

    #[test]
    fn test_compare_is_idempotent() {
        let taxonomy = taxonomy();
        let comparator = CategoryComparator::new(&taxonomy);
        let cv = owned(&["go", "python", "redis", "go"]);
        let jd = owned(&["rust", "redis", "aws"]);

        assert_eq!(comparator.compare(&cv, &jd), comparator.compare(&cv, &jd));
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(50.0), 50.0);
        assert_eq!(round2(0.0), 0.0);
    }
}
