//! Input handling
//! Reads plain-text documents for the command line; format extraction
//! (PDF, DOCX, RTF) happens before text reaches this crate.

pub mod file_detector;
pub mod reader;

pub use reader::{read_document, resolve_document};
