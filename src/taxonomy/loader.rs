//! Skill taxonomy loading and index construction
//!
//! The taxonomy document maps a category key to its canonical skills and an
//! alias table:
//!
//! ```json
//! {
//!   "programming_languages": {
//!     "skills": ["Python", "Go"],
//!     "aliases": { "golang": "go", "py": "python" }
//!   }
//! }
//! ```
//!
//! Loading builds three read-only indexes: category -> canonical skills,
//! alias -> canonical skill (canonical names map to themselves) and
//! canonical skill -> category. A [`Taxonomy`] is built once at startup and
//! shared by reference with every analysis.

use crate::error::{Result, SkillMatchError};
use crate::processing::normalize::normalize_word;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

/// One category entry as it appears in the taxonomy document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCategory {
    #[serde(default)]
    pub skills: Option<Vec<String>>,
    #[serde(default)]
    pub aliases: Option<BTreeMap<String, String>>,
}

/// The taxonomy document. `null` category entries are tolerated.
pub type RawTaxonomy = BTreeMap<String, Option<RawCategory>>;

#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    categories: BTreeMap<String, BTreeSet<String>>,
    alias_index: HashMap<String, String>,
    skill_category: HashMap<String, String>,
    dropped_aliases: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyStats {
    pub categories: usize,
    pub skills: usize,
    pub aliases: usize,
    pub dropped_aliases: usize,
}

impl Taxonomy {
    /// A taxonomy with no categories. Every analysis against it yields zero matches.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the indexes from an already parsed document.
    pub fn from_raw(raw: &RawTaxonomy) -> Self {
        let mut taxonomy = Self::empty();

        let mut entries: Vec<(String, Option<&RawCategory>)> = raw
            .iter()
            .map(|(name, entry)| (normalize_word(name), entry.as_ref()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        // Canonical skills are registered across all categories first so
        // alias targets can point into any category.
        for (category, entry) in &entries {
            let category = category.clone();
            if category.is_empty() {
                debug!("Skipping taxonomy category with empty name");
                continue;
            }
            let skills = taxonomy.categories.entry(category.clone()).or_default();

            let names = entry.and_then(|e| e.skills.as_ref());
            for name in names.into_iter().flatten() {
                let canonical = normalize_word(name);
                if canonical.is_empty() {
                    continue;
                }
                if let Some(owner) = taxonomy.skill_category.get(&canonical) {
                    if owner != &category {
                        debug!(
                            "Skill '{}' already registered under '{}', ignoring duplicate in '{}'",
                            canonical, owner, category
                        );
                    }
                    continue;
                }
                skills.insert(canonical.clone());
                taxonomy.skill_category.insert(canonical.clone(), category.clone());
                taxonomy.alias_index.insert(canonical.clone(), canonical);
            }
        }

        for (_, entry) in &entries {
            let aliases = entry.and_then(|e| e.aliases.as_ref());
            for (alias, target) in aliases.into_iter().flatten() {
                let alias = normalize_word(alias);
                let target = normalize_word(target);
                if alias.is_empty() || !taxonomy.skill_category.contains_key(&target) {
                    debug!("Dropping unresolvable alias '{}' -> '{}'", alias, target);
                    taxonomy.dropped_aliases += 1;
                    continue;
                }
                if taxonomy.skill_category.contains_key(&alias) && alias != target {
                    debug!("Alias '{}' shadows a canonical skill, keeping the skill", alias);
                    taxonomy.dropped_aliases += 1;
                    continue;
                }
                taxonomy.alias_index.insert(alias, target);
            }
        }

        info!(
            "Loaded taxonomy: {} categories, {} skills, {} aliases ({} dropped)",
            taxonomy.categories.len(),
            taxonomy.skill_category.len(),
            taxonomy.alias_count(),
            taxonomy.dropped_aliases
        );

        taxonomy
    }

    /// Parse a JSON taxonomy document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawTaxonomy = serde_json::from_str(json)?;
        Ok(Self::from_raw(&raw))
    }

    /// Read and parse a JSON taxonomy file.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SkillMatchError::Taxonomy(format!(
                "Taxonomy file does not exist: {}",
                path.display()
            )));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Load a taxonomy file, degrading to an empty taxonomy when the file is
    /// missing or corrupt.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::from_path(path) {
            Ok(taxonomy) => taxonomy,
            Err(e) => {
                warn!("Using empty taxonomy ({}): {}", path.display(), e);
                Self::empty()
            }
        }
    }

    /// Resolve a normalized alias or canonical name to its canonical skill.
    pub fn resolve(&self, alias: &str) -> Option<&str> {
        self.alias_index.get(alias).map(String::as_str)
    }

    pub fn category_of(&self, skill: &str) -> Option<&str> {
        self.skill_category.get(skill).map(String::as_str)
    }

    pub fn is_canonical(&self, skill: &str) -> bool {
        self.skill_category.contains_key(skill)
    }

    pub fn category_skills(&self, category: &str) -> Option<&BTreeSet<String>> {
        self.categories.get(category)
    }

    /// Categories in key order.
    pub fn categories(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.categories.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Every alias (including self-mapped canonical names) with its target.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.alias_index.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of aliases that are not canonical names themselves.
    pub fn alias_count(&self) -> usize {
        self.alias_index.len() - self.skill_category.len()
    }

    pub fn skill_count(&self) -> usize {
        self.skill_category.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skill_category.is_empty()
    }

    pub fn stats(&self) -> TaxonomyStats {
        TaxonomyStats {
            categories: self.categories.len(),
            skills: self.skill_count(),
            aliases: self.alias_count(),
            dropped_aliases: self.dropped_aliases,
        }
    }
}
