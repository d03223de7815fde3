// src/app.rs
use std::path::{Path, PathBuf};

use crate::config::ExtractorConfig;
use crate::input::{list_input_files, FilePicker, PickKind};
use crate::pipeline::Pipeline;
use crate::report::{ReportMode, ReportTable};
use crate::storage::{OutputFormat, OutputName, StorageManager};
use crate::utils::AppError;

const MASTER_REPORT_STEM: &str = "reference_output";
const STANDARDS_REPORT_TITLE: &str = "Reference Standards Report";
const ORGS_REPORT_TITLE: &str = "Reference Orgs Report";

#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Report file format; `None` picks the mode's default.
    pub format: Option<OutputFormat>,
    /// Where reports go; defaults to the input's folder.
    pub output_dir: Option<PathBuf>,
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub rows: usize,
    pub processed: usize,
    pub skipped: usize,
}

/// Picks the input for `mode`, extracts, and writes the report.
pub fn run(
    mode: ReportMode,
    picker: &mut dyn FilePicker,
    config: &ExtractorConfig,
    options: &RunOptions,
) -> Result<RunSummary, AppError> {
    let pipeline = Pipeline::new(config, mode);

    match mode {
        ReportMode::MasterIndex => {
            let dir = picker.pick(PickKind::Directory)?;
            let master = dir.join(&config.master_file_name);
            tracing::info!("Reading master index {}", master.display());

            let mut table = ReportTable::new(mode);
            table.records = pipeline.process_file(&master)?;
            let name = OutputName::Fixed(MASTER_REPORT_STEM.to_string());
            save(&table, &dir, &name, options, 1, 0)
        }
        ReportMode::SingleSection => {
            let file = picker.pick(PickKind::File)?;
            let table = pipeline.run_single(&file, &config.single_extensions)?;
            let dir = match file.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            save(&table, &dir, &OutputName::SameStemAs(file.clone()), options, 1, 0)
        }
        ReportMode::SectionBatch | ReportMode::OrganizationBatch => {
            let dir = picker.pick(PickKind::Directory)?;
            let files = list_input_files(&dir, &config.section_extensions, config)?;
            tracing::info!("Scanning {} section files in {}", files.len(), dir.display());

            let report = pipeline.run_batch(&files);
            if report.processed == 0 && !report.skipped.is_empty() {
                tracing::warn!("None of the {} section files could be processed", report.skipped.len());
            }

            let title = if mode == ReportMode::SectionBatch {
                STANDARDS_REPORT_TITLE
            } else {
                ORGS_REPORT_TITLE
            };
            let name = OutputName::Timestamped(title.to_string());
            save(&report.table, &dir, &name, options, report.processed, report.skipped.len())
        }
    }
}

fn save(
    table: &ReportTable,
    input_dir: &Path,
    name: &OutputName,
    options: &RunOptions,
    processed: usize,
    skipped: usize,
) -> Result<RunSummary, AppError> {
    let out_dir = options.output_dir.as_deref().unwrap_or(input_dir);
    let format = options.format.unwrap_or_else(|| OutputFormat::default_for(table.mode));
    let storage = StorageManager::new(out_dir, format)?;
    let output = storage.save_report(table, name)?;

    Ok(RunSummary {
        output,
        rows: table.len(),
        processed,
        skipped,
    })
}
