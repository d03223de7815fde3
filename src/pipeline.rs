// src/pipeline.rs
use std::path::{Path, PathBuf};

use crate::config::ExtractorConfig;
use crate::extractors::{ReferenceExtractor, Scope, SectionMetadataReader, SplitTitle, TitleSplitter};
use crate::input::{parse_document, read_document_text};
use crate::report::{FlatRecord, RecordAssembler, ReportMode, ReportTable};
use crate::utils::error::ExtractError;

/// A document left out of a batch, and why.
#[derive(Debug)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: ExtractError,
}

/// Outcome of a batch run: the concatenated table plus what was skipped.
#[derive(Debug)]
pub struct BatchReport {
    pub table: ReportTable,
    pub processed: usize,
    pub skipped: Vec<SkippedDocument>,
}

/// Load, extract, split and assemble for one report mode.
pub struct Pipeline<'c> {
    config: &'c ExtractorConfig,
    assembler: RecordAssembler,
    splitter: TitleSplitter,
}

impl<'c> Pipeline<'c> {
    pub fn new(config: &'c ExtractorConfig, mode: ReportMode) -> Self {
        Self {
            config,
            assembler: RecordAssembler::new(mode),
            splitter: TitleSplitter::new(config.title_split),
        }
    }

    pub fn mode(&self) -> ReportMode {
        self.assembler.mode()
    }

    /// Rows for one document's text. Any error means the whole document yields nothing.
    pub fn process_text(&self, text: &str) -> Result<Vec<FlatRecord>, ExtractError> {
        let document = parse_document(text)?;
        let extractor = ReferenceExtractor::new(self.config);

        if self.mode() == ReportMode::MasterIndex {
            let entries = extractor.extract(&document, Scope::MasterIndex)?;
            return Ok(self.assembler.assemble_master(&entries));
        }

        let metadata = SectionMetadataReader::new(self.config).read(&document)?;

        if self.mode() == ReportMode::OrganizationBatch {
            let organizations = extractor.organizations(document.root_element());
            return Ok(self.assembler.assemble_organizations(&organizations, &metadata));
        }

        let entries = extractor.extract(&document, Scope::whole_section(&document))?;
        let split_titles: Vec<SplitTitle> = entries
            .iter()
            .map(|entry| self.splitter.split(&entry.raw_title))
            .collect();
        Ok(self.assembler.assemble_section(&entries, &split_titles, &metadata))
    }

    pub fn process_file(&self, path: &Path) -> Result<Vec<FlatRecord>, ExtractError> {
        let text = read_document_text(path)?;
        self.process_text(&text)
    }

    /// Single-file run; fails fast on an unsupported or invalid document.
    pub fn run_single(&self, path: &Path, extensions: &[String]) -> Result<ReportTable, ExtractError> {
        if !ExtractorConfig::has_extension(path, extensions) {
            return Err(ExtractError::UnsupportedFile(path.to_path_buf()));
        }

        let mut table = ReportTable::new(self.mode());
        table.records = self.process_file(path)?;
        tracing::info!("Extracted {} rows from {}", table.len(), path.display());
        Ok(table)
    }

    /// Runs every file in order; a failing document is skipped and recorded.
    pub fn run_batch(&self, files: &[PathBuf]) -> BatchReport {
        let mut report = BatchReport {
            table: ReportTable::new(self.mode()),
            processed: 0,
            skipped: Vec::new(),
        };

        for path in files {
            match self.process_file(path) {
                Ok(rows) => {
                    tracing::debug!("{}: {} rows", path.display(), rows.len());
                    report.table.records.extend(rows);
                    report.processed += 1;
                }
                Err(reason) => {
                    tracing::warn!("Skipping {}: {}", path.display(), reason);
                    report.skipped.push(SkippedDocument {
                        path: path.clone(),
                        reason,
                    });
                }
            }
        }

        tracing::info!(
            "Batch finished. Processed: {}, Skipped: {}, Rows: {}",
            report.processed,
            report.skipped.len(),
            report.table.len()
        );
        report
    }
}
