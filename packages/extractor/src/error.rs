//! Error types for the extractor.
//!
//! `Config` errors are fatal and abort a run before any input file is read.
//! Every other variant is raised while processing a single file and is
//! recorded by the batch driver without stopping the batch.

use thiserror::Error;

/// Main error type for the extractor library.
#[derive(Debug, Error)]
pub enum ExtractorError {
    /// Bad database identifier or unusable input/output directory.
    #[error("Configuration error: {0}")]
    Config(String),

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),

    /// File bytes are not valid in the declared encoding, or the encoding is unknown.
    #[error("Cannot decode {context} as {encoding}")]
    Decode { encoding: String, context: String },

    /// Expected element is absent from the document structure.
    #[error("Missing required XML element: {element} in {context}")]
    MissingElement { element: String, context: String },

    /// Child tag could not be resolved by name during metadata traversal.
    #[error("Tag <{tag_name}> not found under <{parent}>")]
    TagNotFound { tag_name: String, parent: String },

    /// Markup serialization failed.
    #[error("XML serialization failed: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Some files of a batch failed and the caller asked to treat that as an error.
    #[error("{failed} of {total} files could not be processed")]
    IncompleteBatch { failed: usize, total: usize },
}

impl ExtractorError {
    /// Whether this error aborts the whole run rather than a single file.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type alias for extractor operations.
pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ExtractorError::Config("The database Foo is not supported".to_string());
        assert_eq!(
            err.to_string(),
            "Configuration error: The database Foo is not supported"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn test_missing_element_display() {
        let err = ExtractorError::MissingElement {
            element: "BLOC_TEXTUEL".to_string(),
            context: "<TEXTE>".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing required XML element: BLOC_TEXTUEL in <TEXTE>"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_decode_display() {
        let err = ExtractorError::Decode {
            encoding: "UTF-8".to_string(),
            context: "JA_1.xml".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot decode JA_1.xml as UTF-8");
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_tag_not_found_display() {
        let err = ExtractorError::TagNotFound {
            tag_name: "DATE_DEC".to_string(),
            parent: "META".to_string(),
        };
        assert_eq!(err.to_string(), "Tag <DATE_DEC> not found under <META>");
    }

    #[test]
    fn test_incomplete_batch_display() {
        let err = ExtractorError::IncompleteBatch {
            failed: 2,
            total: 10,
        };
        assert_eq!(err.to_string(), "2 of 10 files could not be processed");
        assert!(!err.is_fatal());
    }
}
