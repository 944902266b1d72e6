//! Skill taxonomy and seniority signal configuration

pub mod levels;
pub mod loader;

pub use levels::{LevelSignal, LevelSignals, SeniorityLevel, SignalSource};
pub use loader::{Taxonomy, TaxonomyStats};
