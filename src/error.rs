//! Error handling for the skill matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkillMatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Taxonomy error: {0}")]
    Taxonomy(String),

    #[error("Invalid signal pattern '{pattern}': {reason}")]
    Pattern { pattern: String, reason: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, SkillMatchError>;
