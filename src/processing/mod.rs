//! Text normalization, skill tokenization and analysis

pub mod normalize;
pub mod phrase;
pub mod tokenizer;
pub mod keywords;
pub mod comparator;
pub mod seniority;
pub mod analyzer;
