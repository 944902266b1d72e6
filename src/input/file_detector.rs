//! File type detection

#[derive(Debug, Clone, PartialEq)]
pub enum FileType {
    Text,
    Markdown,
    Unknown,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "txt" | "text" => FileType::Text,
            "md" | "markdown" => FileType::Markdown,
            _ => FileType::Unknown,
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, FileType::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(FileType::from_extension("TXT"), FileType::Text);
        assert_eq!(FileType::from_extension("md"), FileType::Markdown);
        assert_eq!(FileType::from_extension("pdf"), FileType::Unknown);
        assert!(!FileType::from_extension("docx").is_supported());
    }
}
