//! Reading decision files from disk and parsing them into DOM trees.

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use roxmltree::{Document, ParsingOptions};

use crate::error::{ExtractorError, Result};

/// Number of leading bytes inspected for an XML declaration.
const DECLARATION_PROBE_LEN: usize = 256;

/// Encoding attribute of the XML declaration.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DECLARED_ENCODING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*<\?xml[^>]*?encoding\s*=\s*["']([A-Za-z0-9._-]+)["']"#)
        .expect("valid regex")
});

/// Encodings decoded byte-per-code-point.
///
/// `encoding_rs` maps these labels to windows-1252, which would turn C1
/// bytes into punctuation instead of keeping them as U+0080..U+009F.
const LATIN1_LABELS: [&str; 4] = ["iso-8859-1", "iso8859-1", "latin-1", "latin1"];

/// Read an XML file and decode it to a string.
///
/// Files declaring a Latin-1 encoding are decoded byte by byte, so stray
/// Windows-1252 bytes (like 0x80 for the euro sign) survive as the matching
/// C1 code points and can be repaired later.
pub fn load_xml(path: &Path) -> Result<String> {
    let bytes = fs::read(path)?;
    decode_xml_bytes(&bytes, &path.display().to_string())
}

/// Decode raw XML bytes according to their byte order mark or declaration.
///
/// A byte order mark wins over the declaration. Without either, the bytes
/// must be UTF-8. Malformed sequences are never replaced.
///
/// # Arguments
/// * `bytes` - Raw file content
/// * `context` - Description of the source used in errors
///
/// # Errors
/// `Decode` if the declared encoding is unknown or the bytes are not valid
/// in the selected encoding.
pub fn decode_xml_bytes(bytes: &[u8], context: &str) -> Result<String> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(encoding, &bytes[bom_len..], context);
    }

    match declared_encoding(bytes) {
        Some(label) if LATIN1_LABELS.contains(&label.as_str()) => {
            Ok(bytes.iter().copied().map(char::from).collect())
        }
        Some(label) => {
            let encoding =
                Encoding::for_label(label.as_bytes()).ok_or_else(|| ExtractorError::Decode {
                    encoding: label.clone(),
                    context: context.to_string(),
                })?;
            decode_with(encoding, bytes, context)
        }
        None => decode_with(UTF_8, bytes, context),
    }
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8], context: &str) -> Result<String> {
    encoding
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
        .ok_or_else(|| ExtractorError::Decode {
            encoding: encoding.name().to_string(),
            context: context.to_string(),
        })
}

/// Lowercased encoding label from the XML declaration, if any.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(DECLARATION_PROBE_LEN)];
    let head = String::from_utf8_lossy(head);
    DECLARED_ENCODING
        .captures(&head)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase())
}

/// Parse XML text into a document tree.
///
/// DTDs are allowed since several court-record exports start with a
/// DOCTYPE declaration.
pub fn parse_document(text: &str) -> Result<Document<'_>> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    Ok(Document::parse_with_options(text, options)?)
}
