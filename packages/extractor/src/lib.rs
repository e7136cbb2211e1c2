//! Decisions Extractor - Extract metadata and text from court decision XML.
//!
//! This crate handles batches of XML exports from three French court-record
//! databases (CAPP, JuriCa and Ariane), each with its own schema. It provides
//! two independent pipelines:
//!
//! - metadata harvesting: flatten a document's tag tree into a leaf-tag → text
//!   record, leaving out the decision body;
//! - text extraction: locate the decision body, serialize it and clean the
//!   markup and mis-encoded characters into plain text.
//!
//! # Example
//!
//! ```
//! use decisions_extractor::{extract_metadata, extract_text, parse_document, SchemaId};
//!
//! let xml = "<DOCUMENT><NUM_ARRET>12/345</NUM_ARRET>\
//!            <TEXTE_ARRET>LA COUR,<br/>statuant &amp;amp; jugeant</TEXTE_ARRET></DOCUMENT>";
//! let doc = parse_document(xml).unwrap();
//!
//! let record = extract_metadata(doc.root_element(), SchemaId::JuriCa).unwrap();
//! assert_eq!(record.get("NUM_ARRET"), Some("12/345"));
//!
//! let text = extract_text(doc.root_element(), SchemaId::JuriCa).unwrap();
//! assert_eq!(text, "LA COUR,statuant & jugeant");
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, validation and output paths
//! - [`types`]: Database identifiers and metadata records
//! - [`error`]: Error types and Result alias
//! - [`xml`]: XML loading, navigation and serialization
//! - [`metadata`]: Metadata harvesting
//! - [`text`]: Body location and text normalization
//! - [`output`]: JSON and text writers
//! - [`batch`]: Directory batch driver
//! - [`logging`]: File-backed log sink
//! - [`cli`]: Command-line interface

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod metadata;
pub mod output;
pub mod text;
pub mod types;
pub mod xml;

// Re-export main functions
pub use batch::{run_metadata_batch, run_text_batch, BatchReport, FileFailure};
pub use metadata::extract_metadata;
pub use text::{extract_text, locate_body, normalize};
pub use xml::parse_document;

// Re-export commonly used items
pub use config::validate_database;
pub use error::{ExtractorError, Result};
pub use types::{MetadataRecord, SchemaId};
