// src/config.rs
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::AppError;

/// Tag vocabulary of section and master-index documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagNames {
    pub section_number: String,
    pub section_title: String,
    pub section_version: String,
    pub reference_group: String,
    pub organization: String,
    pub reference_id: String,
    pub reference_title: String,
}

impl Default for TagNames {
    fn default() -> Self {
        Self {
            section_number: "SCN".to_string(),
            section_title: "STL".to_string(),
            section_version: "DTE".to_string(),
            reference_group: "REF".to_string(),
            organization: "ORG".to_string(),
            reference_id: "RID".to_string(),
            reference_title: "RTL".to_string(),
        }
    }
}

/// How a title without a closing parenthesis is split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TitleSplitPolicy {
    /// Reproduces historical reports: edition is the whole title,
    /// title loses its first character.
    #[default]
    Legacy,
    /// Empty edition, title left untouched.
    Corrected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub tags: TagNames,
    /// Characters dropped from the front of the section-number text ("SECTION ").
    pub section_prefix_len: usize,
    /// Extensions scanned by the batch modes (lowercase, no dot).
    pub section_extensions: Vec<String>,
    /// Extensions accepted by single-section mode.
    pub single_extensions: Vec<String>,
    pub master_file_name: String,
    pub title_split: TitleSplitPolicy,
    /// File-stem prefixes skipped in batch modes, e.g. "01" for Division 01.
    pub exclude_divisions: Vec<String>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            tags: TagNames::default(),
            section_prefix_len: 8,
            section_extensions: vec!["sec".to_string()],
            single_extensions: vec!["sec".to_string(), "ref".to_string()],
            master_file_name: "MASTER.REF".to_string(),
            title_split: TitleSplitPolicy::Legacy,
            exclude_divisions: Vec::new(),
        }
    }
}

impl ExtractorConfig {
    /// Loads overrides from a JSON file; absent keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, AppError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw).map_err(|e| {
            AppError::Config(format!("Invalid config file '{}': {}", path.display(), e))
        })?;
        tracing::debug!("Loaded configuration overrides from {}", path.display());
        Ok(config)
    }

    /// True when `path` has one of `extensions`, compared case-insensitively.
    pub fn has_extension(path: &Path, extensions: &[String]) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    pub fn is_excluded(&self, path: &Path) -> bool {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        self.exclude_divisions
            .iter()
            .any(|prefix| !prefix.is_empty() && stem.starts_with(prefix.as_str()))
    }
}
