//! Configuration management for the skill matcher

use crate::error::{Result, SkillMatchError};
use crate::processing::analyzer::{DEFAULT_RECOMMENDATION_LIMIT, DEFAULT_TOP_KEYWORDS};
use crate::processing::tokenizer::{DEFAULT_LANGUAGE, DEFAULT_SHORT_TOKENS};
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Bundled default documents, written next to the config on first run.
const DEFAULT_TAXONOMY: &str = include_str!("../config/skills_taxonomy.json");
const DEFAULT_LEVEL_SIGNALS: &str = include_str!("../config/level_signals.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub sources: SourceConfig,
    pub matching: MatchingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub taxonomy_path: PathBuf,
    pub level_signals_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchingConfig {
    pub top_keywords: usize,
    pub recommendation_limit: usize,
    pub default_language: String,
    pub short_token_allowlist: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        let base_dir = Self::base_dir();

        Self {
            sources: SourceConfig {
                taxonomy_path: base_dir.join("skills_taxonomy.json"),
                level_signals_path: base_dir.join("level_signals.json"),
            },
            matching: MatchingConfig {
                top_keywords: DEFAULT_TOP_KEYWORDS,
                recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
                default_language: DEFAULT_LANGUAGE.to_string(),
                short_token_allowlist: DEFAULT_SHORT_TOKENS.iter().map(|s| s.to_string()).collect(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, creating it with defaults (and the
    /// bundled taxonomy documents) when absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                SkillMatchError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            config.install_default_sources()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            SkillMatchError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Write the bundled taxonomy and level-signal documents to the
    /// configured paths unless files already exist there.
    pub fn install_default_sources(&self) -> Result<()> {
        for (path, content) in [
            (&self.sources.taxonomy_path, DEFAULT_TAXONOMY),
            (&self.sources.level_signals_path, DEFAULT_LEVEL_SIGNALS),
        ] {
            if path.exists() {
                continue;
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, content)?;
            info!("Installed default source: {}", path.display());
        }
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        Self::base_dir().join("config.toml")
    }

    fn base_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("skill-matcher")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_sources_parse() {
        let taxonomy = crate::taxonomy::Taxonomy::from_json_str(DEFAULT_TAXONOMY).unwrap();
        assert!(!taxonomy.is_empty());

        let signals = crate::taxonomy::LevelSignals::from_json_str(DEFAULT_LEVEL_SIGNALS).unwrap();
        assert!(!signals.is_empty());
        assert_eq!(signals.skipped_patterns(), 0);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.matching.top_keywords = 7;
        config.output.format = OutputFormat::Json;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_corrupt_config_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "sources = [").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(SkillMatchError::Configuration(_))
        ));
    }

    #[test]
    fn test_install_default_sources_keeps_existing_files() {
        let dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.sources.taxonomy_path = dir.path().join("skills_taxonomy.json");
        config.sources.level_signals_path = dir.path().join("level_signals.json");
        std::fs::write(&config.sources.taxonomy_path, "{}").unwrap();

        config.install_default_sources().unwrap();

        let taxonomy = std::fs::read_to_string(&config.sources.taxonomy_path).unwrap();
        assert_eq!(taxonomy, "{}");
        assert!(config.sources.level_signals_path.exists());
    }
}
