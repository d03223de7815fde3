// src/extractors/metadata.rs
use roxmltree::{Document, Node};
use serde::Serialize;

use crate::config::ExtractorConfig;
use crate::extractors::xml::{element_text, find_child};
use crate::utils::error::ExtractError;

/// Identifying fields of one specification section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMetadata {
    pub section_number: String,
    pub section_title: String,
    pub section_version: String,
}

pub struct SectionMetadataReader<'c> {
    config: &'c ExtractorConfig,
}

impl<'c> SectionMetadataReader<'c> {
    pub fn new(config: &'c ExtractorConfig) -> Self {
        Self { config }
    }

    /// Reads section number, title and version from the root's direct children.
    /// Any absent field, or a section number without text, means the document is not a section.
    pub fn read(&self, document: &Document) -> Result<SectionMetadata, ExtractError> {
        let tags = &self.config.tags;
        let number = self
            .required(document, &tags.section_number)?
            .text()
            .ok_or_else(|| ExtractError::MissingField {
                field: tags.section_number.clone(),
                context: "empty section number".to_string(),
            })?;

        Ok(SectionMetadata {
            section_number: number.chars().skip(self.config.section_prefix_len).collect(),
            section_title: element_text(self.required(document, &tags.section_title)?).to_string(),
            section_version: element_text(self.required(document, &tags.section_version)?).to_string(),
        })
    }

    fn required<'a, 'input>(
        &self,
        document: &'a Document<'input>,
        tag: &str,
    ) -> Result<Node<'a, 'input>, ExtractError> {
        let root = document.root_element();
        find_child(root, tag).ok_or_else(|| ExtractError::MissingField {
            field: tag.to_string(),
            context: format!("<{}> root", root.tag_name().name()),
        })
    }
}
