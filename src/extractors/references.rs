// src/extractors/references.rs

// --- Imports ---
use roxmltree::{Document, Node};
use serde::Serialize;

use crate::config::ExtractorConfig;
use crate::extractors::xml::{element_text, find_child, find_children, find_nested};
use crate::utils::error::ExtractError;

// --- Data Structures ---
/// One cited standard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceEntry {
    pub organization: Option<String>, // Only populated for master-index groups
    pub reference_id: String,         // e.g., "ASTM C94/C94M"
    pub raw_title: String,            // e.g., "(2024) Standard Specification for Ready-Mixed Concrete"
}

/// Where to look for references in a document.
#[derive(Debug, Clone, Copy)]
pub enum Scope<'a, 'input> {
    /// Whole document: every top-level reference group carries one
    /// organization and its (id, title) pairs.
    MasterIndex,
    /// One section subtree: all ids and titles nested below it are a single
    /// positionally paired list.
    Section(Node<'a, 'input>),
}

impl<'a, 'input> Scope<'a, 'input> {
    /// Section scope rooted at the document element.
    pub fn whole_section(document: &'a Document<'input>) -> Self {
        Scope::Section(document.root_element())
    }
}

/// Pairs two sequences by position, refusing to truncate when their lengths differ.
pub fn zip_exact<L, R>(
    left: Vec<L>,
    right: Vec<R>,
    context: &str,
) -> Result<Vec<(L, R)>, ExtractError> {
    if left.len() != right.len() {
        return Err(ExtractError::LengthMismatch {
            context: context.to_string(),
            ids: left.len(),
            titles: right.len(),
        });
    }
    Ok(left.into_iter().zip(right).collect())
}

// --- Main Extractor Structure ---
pub struct ReferenceExtractor<'c> {
    config: &'c ExtractorConfig,
}

impl<'c> ReferenceExtractor<'c> {
    pub fn new(config: &'c ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extracts reference entries within `scope`, in document order.
    ///
    /// Fails with `LengthMismatch` when ids and titles cannot be paired one to
    /// one, and in section scope with `MissingField` when a title element is
    /// empty; callers skip the whole document in either case.
    pub fn extract<'a, 'input: 'a>(
        &self,
        document: &'a Document<'input>,
        scope: Scope<'a, 'input>,
    ) -> Result<Vec<ReferenceEntry>, ExtractError> {
        match scope {
            Scope::MasterIndex => self.extract_master_index(document),
            Scope::Section(root) => self.extract_section(root),
        }
    }

    fn extract_master_index(&self, document: &Document) -> Result<Vec<ReferenceEntry>, ExtractError> {
        let tags = &self.config.tags;
        let mut entries = Vec::new();

        for (group_no, group) in find_children(document.root_element(), &tags.reference_group).enumerate() {
            let organization = find_child(group, &tags.organization).map(|org| element_text(org).to_string());
            if organization.is_none() {
                tracing::debug!("Reference group #{} has no <{}>", group_no + 1, tags.organization);
            }

            let ids: Vec<&str> = find_children(group, &tags.reference_id).map(element_text).collect();
            let titles: Vec<&str> = find_children(group, &tags.reference_title).map(element_text).collect();
            let context = format!(
                "<{}> group #{} ({})",
                tags.reference_group,
                group_no + 1,
                organization.as_deref().unwrap_or("no organization")
            );

            for (id, title) in zip_exact(ids, titles, &context)? {
                entries.push(ReferenceEntry {
                    organization: organization.clone(),
                    reference_id: id.to_string(),
                    raw_title: title.to_string(),
                });
            }
        }

        tracing::debug!("Extracted {} master-index references", entries.len());
        Ok(entries)
    }

    fn extract_section(&self, root: Node) -> Result<Vec<ReferenceEntry>, ExtractError> {
        let tags = &self.config.tags;
        let ids: Vec<&str> = find_nested(root, &tags.reference_id).map(element_text).collect();
        // A title without text cannot be split into edition and title.
        let titles: Vec<&str> = find_nested(root, &tags.reference_title)
            .enumerate()
            .map(|(i, node)| {
                node.text().ok_or_else(|| ExtractError::MissingField {
                    field: tags.reference_title.clone(),
                    context: format!("empty reference title #{}", i + 1),
                })
            })
            .collect::<Result<_, _>>()?;
        let context = format!("<{}> section", root.tag_name().name());

        let entries: Vec<ReferenceEntry> = zip_exact(ids, titles, &context)?
            .into_iter()
            .map(|(id, title)| ReferenceEntry {
                organization: None,
                reference_id: id.to_string(),
                raw_title: title.to_string(),
            })
            .collect();

        tracing::debug!("Extracted {} section references", entries.len());
        Ok(entries)
    }

    /// Every organization occurrence nested below `root`, independent of reference pairing.
    pub fn organizations(&self, root: Node) -> Vec<String> {
        find_nested(root, &self.config.tags.organization)
            .map(|org| element_text(org).to_string())
            .collect()
    }
}
