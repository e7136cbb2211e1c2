//! Batch driver that runs an extraction over a directory of decision files.
//!
//! Every file is processed independently. A failing file is logged and left
//! out of the output; only listing the input directory or writing the
//! combined metadata file aborts a batch.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use indicatif::ProgressBar;

use crate::config::is_xml_file;
use crate::error::{ExtractorError, Result};
use crate::metadata::extract_metadata;
use crate::output::{save_metadata_json, save_text};
use crate::text::extract_text;
use crate::types::{MetadataRecord, SchemaId};
use crate::xml::{load_xml, parse_document};

/// A file that could not be processed.
#[derive(Debug)]
pub struct FileFailure {
    /// File name, relative to the input directory.
    pub file: String,

    /// Cause of the failure.
    pub error: ExtractorError,
}

/// Outcome of a batch run.
#[derive(Debug)]
pub struct BatchReport {
    /// When the batch started.
    pub started_at: DateTime<Local>,

    /// Files processed successfully, in processing order.
    pub succeeded: Vec<String>,

    /// Files that failed, in processing order.
    pub failures: Vec<FileFailure>,

    /// Files written by the batch.
    pub outputs: Vec<PathBuf>,
}

impl BatchReport {
    fn new() -> Self {
        Self {
            started_at: Local::now(),
            succeeded: Vec::new(),
            failures: Vec::new(),
            outputs: Vec::new(),
        }
    }

    /// Number of files the batch looked at.
    #[must_use]
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failures.len()
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// List the XML files of a directory, sorted by path.
///
/// Subdirectories and files whose extension is not exactly `xml` are skipped.
pub fn list_xml_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_xml_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Read, parse and extract the metadata record of one file.
pub fn metadata_for_file(path: &Path, schema: SchemaId) -> Result<MetadataRecord> {
    let xml = load_xml(path)?;
    let doc = parse_document(&xml)?;
    extract_metadata(doc.root_element(), schema)
}

/// Read, parse and extract the normalized body text of one file.
pub fn text_for_file(path: &Path, schema: SchemaId) -> Result<String> {
    let xml = load_xml(path)?;
    let doc = parse_document(&xml)?;
    extract_text(doc.root_element(), schema)
}

/// Extract the metadata of every XML file in `input_dir`.
///
/// Records of the successful files are written, in file order, to
/// `<output_dir>/<SchemaId>_meta_data.json` once the whole batch is done.
pub fn run_metadata_batch(
    input_dir: &Path,
    output_dir: &Path,
    schema: SchemaId,
    progress: &ProgressBar,
) -> Result<BatchReport> {
    let files = list_xml_files(input_dir)?;
    let (records, mut report) = process_files(&files, progress, |file| {
        let record = metadata_for_file(file, schema)?;
        tracing::info!(file = %display_name(file), fields = record.len(), "File successfully read");
        Ok(record)
    });

    let output_file = save_metadata_json(&records, schema, output_dir)?;
    tracing::info!(
        output = %output_file.display(),
        records = records.len(),
        "Metadata file written"
    );
    report.outputs.push(output_file);

    Ok(report)
}

/// Extract the body text of every XML file in `input_dir`.
///
/// Each successful file gets its own `<output_dir>/<stem>.txt`.
pub fn run_text_batch(
    input_dir: &Path,
    output_dir: &Path,
    schema: SchemaId,
    progress: &ProgressBar,
) -> Result<BatchReport> {
    let files = list_xml_files(input_dir)?;
    let (outputs, mut report) = process_files(&files, progress, |file| {
        let text = text_for_file(file, schema)?;
        let output_file = save_text(&text, file, output_dir)?;
        tracing::info!(file = %display_name(file), "Text of file successfully extracted");
        Ok(output_file)
    });
    report.outputs = outputs;

    Ok(report)
}

/// Run `process` on each file, collecting successes and logging failures.
fn process_files<T>(
    files: &[PathBuf],
    progress: &ProgressBar,
    mut process: impl FnMut(&Path) -> Result<T>,
) -> (Vec<T>, BatchReport) {
    let mut report = BatchReport::new();
    let mut results = Vec::with_capacity(files.len());

    progress.set_length(files.len() as u64);
    for file in files {
        let name = display_name(file);
        progress.set_message(name.clone());

        match process(file) {
            Ok(result) => {
                results.push(result);
                report.succeeded.push(name);
            }
            Err(error) => {
                tracing::error!(file = %name, error = %error, "Problem processing the file");
                report.failures.push(FileFailure { file: name, error });
            }
        }
        progress.inc(1);
    }

    (results, report)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
