// src/main.rs
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ref_extractor::config::{ExtractorConfig, TitleSplitPolicy};
use ref_extractor::input::ArgumentPicker;
use ref_extractor::storage::OutputFormat;
use ref_extractor::utils::{self, AppError};
use ref_extractor::{ReportMode, RunOptions};

/// Command Line Interface for the reference standards extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Report file format (default: xlsx for `master`, csv otherwise)
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Directory for the report (default: beside the input)
    #[arg(short, long, global = true)]
    output_dir: Option<PathBuf>,

    /// How titles without an "(edition)" prefix are split
    #[arg(long, value_enum, global = true)]
    title_split: Option<TitleSplitPolicy>,

    /// Skip section files whose name starts with this division prefix (repeatable)
    #[arg(long = "exclude-division", value_name = "PREFIX", global = true)]
    exclude_divisions: Vec<String>,

    /// JSON file overriding tag names, extensions and other extraction settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug mode - verbose logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Export every organization and standard in a folder's MASTER.REF
    Master {
        /// Folder holding MASTER.REF (prompted for when omitted)
        dir: Option<PathBuf>,
    },
    /// Export the references of one section file, with header and order column
    Section {
        /// .SEC or .REF file (prompted for when omitted)
        file: Option<PathBuf>,
    },
    /// Export the references of every section file in a folder
    Sections {
        /// Folder of .SEC files (prompted for when omitted)
        dir: Option<PathBuf>,
    },
    /// Export the organizations cited by every section file in a folder
    Orgs {
        /// Folder of .SEC files (prompted for when omitted)
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<(), AppError> {
    // 1. Parse CLI Arguments
    let args = Args::parse();

    // 2. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging(if args.debug { "debug" } else { "info" });
    tracing::debug!("Starting with args: {:?}", args);

    // 3. Build configuration: defaults, then config file, then flags
    let mut config = match &args.config {
        Some(path) => ExtractorConfig::from_json_file(path)?,
        None => ExtractorConfig::default(),
    };
    if let Some(policy) = args.title_split {
        config.title_split = policy;
    }
    config.exclude_divisions.extend(args.exclude_divisions.iter().cloned());

    // 4. Resolve mode and input
    let (mode, path) = match args.command {
        Command::Master { dir } => (ReportMode::MasterIndex, dir),
        Command::Section { file } => (ReportMode::SingleSection, file),
        Command::Sections { dir } => (ReportMode::SectionBatch, dir),
        Command::Orgs { dir } => (ReportMode::OrganizationBatch, dir),
    };
    let mut picker = ArgumentPicker::from_arg(path);
    let options = RunOptions {
        format: args.format,
        output_dir: args.output_dir,
    };

    // 5. Extract and write the report
    let summary = ref_extractor::run(mode, &mut picker, &config, &options)?;

    tracing::info!(
        "Processing finished. Rows: {}, Documents: {}, Skipped: {}, Report: {}",
        summary.rows,
        summary.processed,
        summary.skipped,
        summary.output.display()
    );

    Ok(())
}
