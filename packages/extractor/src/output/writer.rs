//! Writers for extraction results.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

use crate::config::{metadata_output_path, text_output_path};
use crate::error::Result;
use crate::types::{MetadataRecord, SchemaId};

/// JSON layout of the metadata file: `", "` and `": "` separators on one
/// line, and every character outside printable ASCII escaped as `\uXXXX`.
struct AsciiJsonFormatter;

impl Formatter for AsciiJsonFormatter {
    fn begin_array_value<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        first: bool,
    ) -> io::Result<()> {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W: ?Sized + Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + Write>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()> {
        for c in fragment.chars() {
            if (' '..='~').contains(&c) {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

/// Serialize metadata records as a JSON array of flat objects.
///
/// # Examples
/// ```
/// use decisions_extractor::output::generate_metadata_json;
/// use decisions_extractor::types::MetadataRecord;
///
/// let mut record = MetadataRecord::new();
/// record.insert("Juridiction", "Conseil d'État");
/// record.insert("Numero_Dossier", "312345");
///
/// let json = generate_metadata_json(&[record]).unwrap();
/// assert_eq!(
///     json,
///     r#"[{"Juridiction": "Conseil d'\u00c9tat", "Numero_Dossier": "312345"}]"#
/// );
/// ```
pub fn generate_metadata_json(records: &[MetadataRecord]) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, AsciiJsonFormatter);
    records.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

/// Save the metadata of a whole batch as `<SchemaId>_meta_data.json`.
///
/// # Returns
/// Path to the saved file
pub fn save_metadata_json(
    records: &[MetadataRecord],
    schema: SchemaId,
    output_dir: &Path,
) -> Result<PathBuf> {
    let output_file = metadata_output_path(output_dir, schema);
    let content = generate_metadata_json(records)?;
    write_atomic(&output_file, &content)?;
    Ok(output_file)
}

/// Save the normalized text of one input file as `<stem>.txt`.
///
/// # Returns
/// Path to the saved file
pub fn save_text(text: &str, input_file: &Path, output_dir: &Path) -> Result<PathBuf> {
    let output_file = text_output_path(output_dir, input_file);
    write_atomic(&output_file, text)?;
    Ok(output_file)
}

/// Write a file through a temp file, sync and rename.
///
/// A failed write never leaves a truncated result behind.
fn write_atomic(output_file: &Path, content: &str) -> Result<()> {
    let file_name = output_file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = output_file.with_file_name(format!(".{file_name}.tmp"));

    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if output_file.exists() {
        fs::remove_file(output_file)?;
    }

    fs::rename(&temp_file, output_file)?;

    Ok(())
}
