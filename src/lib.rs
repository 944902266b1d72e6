//! Skill matcher library: taxonomy-driven skill extraction and
//! resume/job description comparison

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod taxonomy;

pub use config::Config;
pub use error::{Result, SkillMatchError};
pub use processing::analyzer::{AnalysisEngine, AnalysisResult};
