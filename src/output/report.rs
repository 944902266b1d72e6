//! Report wrapper around an analysis result

use crate::processing::analyzer::{AnalysisEngine, AnalysisResult};
use crate::taxonomy::TaxonomyStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,
    pub result: AnalysisResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub resume_source: String,
    pub job_source: String,
    pub taxonomy: TaxonomyStats,
    pub seniority_signals: usize,
    pub tool_version: String,
}

impl AnalysisReport {
    pub fn new(engine: &AnalysisEngine, result: AnalysisResult, resume_source: &str, job_source: &str) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at: Utc::now(),
                resume_source: resume_source.to_string(),
                job_source: job_source.to_string(),
                taxonomy: engine.taxonomy().stats(),
                seniority_signals: engine.detector().signals().len(),
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
            },
            result,
        }
    }
}
