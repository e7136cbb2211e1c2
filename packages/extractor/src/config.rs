//! Configuration constants and validation functions for the extractor.

use std::path::{Path, PathBuf};

use crate::error::{ExtractorError, Result};
use crate::types::SchemaId;

/// Extension of the input files picked up from the input directory.
pub const XML_EXTENSION: &str = "xml";

/// Extension of the plain-text files written by the text pipeline.
pub const TEXT_EXTENSION: &str = "txt";

/// Suffix of the combined metadata file (`<SchemaId>_meta_data.json`).
pub const METADATA_FILE_SUFFIX: &str = "_meta_data.json";

/// Default log file of the metadata pipeline.
pub const DEFAULT_METADATA_LOG: &str = "meta_data_extraction.log";

/// Default log file of the text pipeline.
pub const DEFAULT_TEXT_LOG: &str = "text_extraction.log";

/// Default log filter when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Timestamp format of log lines.
pub const LOG_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Validate a database identifier.
///
/// # Returns
/// * `Ok(SchemaId)` for `CAPP`, `JuriCa` or `Ariane`
/// * `Err(ExtractorError::Config)` for anything else
///
/// # Examples
/// ```
/// use decisions_extractor::config::validate_database;
///
/// assert!(validate_database("Ariane").is_ok());
/// assert!(validate_database("Foo").is_err());
/// ```
pub fn validate_database(name: &str) -> Result<SchemaId> {
    name.parse()
}

/// Validate that a path exists and is a directory.
///
/// # Arguments
/// * `path` - Directory to check
/// * `role` - Human-readable role used in the error ("input", "output")
pub fn validate_directory(path: &Path, role: &str) -> Result<()> {
    if !path.exists() {
        return Err(ExtractorError::Config(format!(
            "The {role} path {} does not exist",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(ExtractorError::Config(format!(
            "The {role} path {} is not a directory",
            path.display()
        )));
    }
    Ok(())
}

/// Path of the combined metadata JSON for a database.
///
/// # Examples
/// ```
/// use std::path::Path;
/// use decisions_extractor::config::metadata_output_path;
/// use decisions_extractor::types::SchemaId;
///
/// let path = metadata_output_path(Path::new("out"), SchemaId::JuriCa);
/// assert_eq!(path, Path::new("out/JuriCa_meta_data.json"));
/// ```
pub fn metadata_output_path(output_dir: &Path, schema: SchemaId) -> PathBuf {
    output_dir.join(format!("{}{METADATA_FILE_SUFFIX}", schema.as_str()))
}

/// Path of the plain-text output for one input file.
///
/// Uses the input file stem, so `decision.xml` becomes `decision.txt`.
pub fn text_output_path(output_dir: &Path, input_file: &Path) -> PathBuf {
    let stem = input_file
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_dir.join(format!("{stem}.{TEXT_EXTENSION}"))
}

/// Whether a path looks like an input XML file.
///
/// The extension must be exactly `xml`; `.XML` and extension-less files
/// are ignored.
pub fn is_xml_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == XML_EXTENSION)
}
