//! Reading already-decoded documents from disk

use crate::error::{Result, SkillMatchError};
use crate::input::file_detector::FileType;
use log::info;
use std::path::Path;
use tokio::fs;

/// Read a plain-text or markdown document. Invalid UTF-8 sequences are
/// replaced rather than rejected; markdown is passed through as text.
pub async fn read_document(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(SkillMatchError::InvalidInput(format!(
            "File does not exist: {}",
            path.display()
        )));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| {
            SkillMatchError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

    let file_type = FileType::from_extension(extension);
    if !file_type.is_supported() {
        return Err(SkillMatchError::UnsupportedFormat(format!(
            "Unsupported file type for: {} (extract the text first)",
            path.display()
        )));
    }

    info!("Reading {:?} document: {}", file_type, path.display());
    let bytes = fs::read(path).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Pick inline text over a file path; one of the two must be given. Both
/// are returned exactly as given.
pub async fn resolve_document(path: Option<&Path>, inline: Option<&str>, label: &str) -> Result<String> {
    match (inline, path) {
        (Some(text), _) => Ok(text.to_string()),
        (None, Some(path)) => read_document(path).await,
        (None, None) => Err(SkillMatchError::InvalidInput(format!(
            "You must provide either a {} file or {} text",
            label, label
        ))),
    }
}
