//! Output generation: combined metadata JSON and per-decision text files.

mod writer;

pub use writer::{generate_metadata_json, save_metadata_json, save_text};
