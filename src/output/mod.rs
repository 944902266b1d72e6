//! Report rendering

pub mod formatter;
pub mod labels;
pub mod report;
