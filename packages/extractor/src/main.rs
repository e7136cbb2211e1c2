//! CLI entry point for the extractor.
//!
//! Logging is configured per command by the CLI, which installs a
//! file-backed subscriber for the duration of the batch.

use decisions_extractor::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
