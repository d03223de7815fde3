// src/report/mod.rs
use serde::Serialize;

use crate::extractors::{ReferenceEntry, SectionMetadata, SplitTitle};

/// Report layout; decides columns, header and ordinal numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportMode {
    /// Whole master index: `Organization, Standard, Title`.
    MasterIndex,
    /// One section file, with header and a 1-based `Order` column.
    SingleSection,
    /// Every section in a folder, no header, 0-based index per document.
    SectionBatch,
    /// Organizations cited by every section in a folder.
    OrganizationBatch,
}

impl ReportMode {
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            ReportMode::MasterIndex => &["Organization", "Standard", "Title"],
            ReportMode::SingleSection => {
                &["Order", "Section", "Name", "Version", "Standard", "Edition", "Title"]
            }
            ReportMode::SectionBatch => {
                &["index", "Section", "Name", "Version", "Standard", "Edition", "Title"]
            }
            ReportMode::OrganizationBatch => &["index", "Section", "Name", "Version", "Organization"],
        }
    }

    pub fn emits_header(self) -> bool {
        matches!(self, ReportMode::MasterIndex | ReportMode::SingleSection)
    }

    fn first_ordinal(self) -> usize {
        match self {
            ReportMode::SingleSection => 1,
            _ => 0,
        }
    }
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum FlatRecord {
    Master {
        organization: String,
        standard: String,
        title: String,
    },
    Section {
        ordinal: usize,
        section: String,
        name: String,
        version: String,
        standard: String,
        edition: String,
        title: String,
    },
    Organization {
        ordinal: usize,
        section: String,
        name: String,
        version: String,
        organization: String,
    },
}

impl FlatRecord {
    /// Cell values in column order.
    pub fn cells(&self) -> Vec<String> {
        match self {
            FlatRecord::Master { organization, standard, title } => {
                vec![organization.clone(), standard.clone(), title.clone()]
            }
            FlatRecord::Section { ordinal, section, name, version, standard, edition, title } => vec![
                ordinal.to_string(),
                section.clone(),
                name.clone(),
                version.clone(),
                standard.clone(),
                edition.clone(),
                title.clone(),
            ],
            FlatRecord::Organization { ordinal, section, name, version, organization } => vec![
                ordinal.to_string(),
                section.clone(),
                name.clone(),
                version.clone(),
                organization.clone(),
            ],
        }
    }

    /// Leading ordinal column, if the layout has one.
    pub fn ordinal(&self) -> Option<usize> {
        match self {
            FlatRecord::Master { .. } => None,
            FlatRecord::Section { ordinal, .. } | FlatRecord::Organization { ordinal, .. } => Some(*ordinal),
        }
    }
}

/// Rows sharing one column schema, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    pub mode: ReportMode,
    pub records: Vec<FlatRecord>,
}

impl ReportTable {
    pub fn new(mode: ReportMode) -> Self {
        Self { mode, records: Vec::new() }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        self.mode.columns()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Joins extracted references with section metadata into rows for one mode.
pub struct RecordAssembler {
    mode: ReportMode,
}

impl RecordAssembler {
    pub fn new(mode: ReportMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// Master-index rows keep the raw, unsplit title.
    pub fn assemble_master(&self, entries: &[ReferenceEntry]) -> Vec<FlatRecord> {
        entries
            .iter()
            .map(|entry| FlatRecord::Master {
                organization: entry.organization.clone().unwrap_or_default(),
                standard: entry.reference_id.clone(),
                title: entry.raw_title.clone(),
            })
            .collect()
    }

    /// Section rows, one per entry; `split_titles[i]` belongs to `entries[i]`.
    pub fn assemble_section(
        &self,
        entries: &[ReferenceEntry],
        split_titles: &[SplitTitle],
        metadata: &SectionMetadata,
    ) -> Vec<FlatRecord> {
        debug_assert_eq!(entries.len(), split_titles.len());
        let first = self.mode.first_ordinal();

        entries
            .iter()
            .zip(split_titles)
            .enumerate()
            .map(|(i, (entry, split))| FlatRecord::Section {
                ordinal: first + i,
                section: metadata.section_number.clone(),
                name: metadata.section_title.clone(),
                version: metadata.section_version.clone(),
                standard: entry.reference_id.clone(),
                edition: split.edition.clone(),
                title: split.title.clone(),
            })
            .collect()
    }

    pub fn assemble_organizations(
        &self,
        organizations: &[String],
        metadata: &SectionMetadata,
    ) -> Vec<FlatRecord> {
        let first = self.mode.first_ordinal();

        organizations
            .iter()
            .enumerate()
            .map(|(i, organization)| FlatRecord::Organization {
                ordinal: first + i,
                section: metadata.section_number.clone(),
                name: metadata.section_title.clone(),
                version: metadata.section_version.clone(),
                organization: organization.clone(),
            })
            .collect()
    }
}
