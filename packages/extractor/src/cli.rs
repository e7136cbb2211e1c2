//! Command-line interface for the extractor.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::batch::{run_metadata_batch, run_text_batch, BatchReport};
use crate::config::{
    validate_database, validate_directory, DEFAULT_METADATA_LOG, DEFAULT_TEXT_LOG,
};
use crate::error::{ExtractorError, Result};
use crate::logging::file_subscriber;

/// Decisions Extractor - Extract metadata and text from court decision XML exports.
#[derive(Parser)]
#[command(name = "decisions-extractor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Flatten the metadata of every XML file into one JSON array.
    Metadata(BatchArgs),

    /// Write the cleaned body text of every XML file to a .txt file.
    Text(BatchArgs),
}

/// Arguments shared by both pipelines.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Folder containing the *.xml files
    pub input_dir: PathBuf,

    /// Existing folder receiving the results
    pub output_dir: PathBuf,

    /// Source database: CAPP, JuriCa or Ariane
    pub database: String,

    /// Log file (default: meta_data_extraction.log or text_extraction.log)
    #[arg(short, long)]
    pub log_file: Option<PathBuf>,

    /// Exit with an error status when any file could not be processed
    #[arg(long)]
    pub fail_on_error: bool,
}

/// Which extraction a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pipeline {
    Metadata,
    Text,
}

impl Pipeline {
    fn default_log_file(self) -> &'static str {
        match self {
            Self::Metadata => DEFAULT_METADATA_LOG,
            Self::Text => DEFAULT_TEXT_LOG,
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Metadata => "Metadata extraction",
            Self::Text => "Text extraction",
        }
    }
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Metadata(args) => extract_command(Pipeline::Metadata, &args),
        Commands::Text(args) => extract_command(Pipeline::Text, &args),
    }
}

/// Execute an extraction command.
fn extract_command(pipeline: Pipeline, args: &BatchArgs) -> Result<()> {
    // Validate everything before touching any input file
    let schema = validate_database(&args.database)?;
    validate_directory(&args.input_dir, "input")?;
    validate_directory(&args.output_dir, "output")?;

    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(pipeline.default_log_file()));
    let subscriber = file_subscriber(&log_file)?;

    println!(
        "{} of the folder {} ({})",
        style(pipeline.title()).bold(),
        style(args.input_dir.display()).cyan(),
        style(schema).green()
    );
    println!();

    let pb = ProgressBar::new(0);
    #[allow(clippy::expect_used)] // Static template string that is guaranteed to be valid
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{bar:40.green/white} {pos}/{len} {wide_msg}")
            .expect("valid template"),
    );

    let report = tracing::subscriber::with_default(subscriber, || match pipeline {
        Pipeline::Metadata => run_metadata_batch(&args.input_dir, &args.output_dir, schema, &pb),
        Pipeline::Text => run_text_batch(&args.input_dir, &args.output_dir, schema, &pb),
    });
    pb.finish_and_clear();
    let report = report?;

    print_summary(pipeline, &report, &args.output_dir, &log_file);

    if args.fail_on_error && report.has_failures() {
        return Err(ExtractorError::IncompleteBatch {
            failed: report.failures.len(),
            total: report.total(),
        });
    }

    Ok(())
}

fn print_summary(pipeline: Pipeline, report: &BatchReport, output_dir: &Path, log_file: &Path) {
    let elapsed = chrono::Local::now() - report.started_at;

    println!(
        "  Files: {} processed, {} in {:.1}s",
        style(report.succeeded.len()).green(),
        if report.has_failures() {
            style(format!("{} failed", report.failures.len()))
                .yellow()
                .bold()
        } else {
            style("0 failed".to_string())
        },
        elapsed.num_milliseconds() as f64 / 1000.0
    );
    if report.has_failures() {
        println!("  Details: {}", log_file.display());
    }
    println!();

    match pipeline {
        Pipeline::Metadata => {
            for output in &report.outputs {
                println!("{} {}", style("Saved to:").green().bold(), output.display());
            }
        }
        Pipeline::Text => println!(
            "{} {}",
            style("Files written in:").green().bold(),
            output_dir.display()
        ),
    }
}
