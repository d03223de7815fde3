// src/extractors/mod.rs
pub mod metadata;
pub mod references;
pub mod title;
pub mod xml;

// Re-export key extraction types for convenience
pub use metadata::{SectionMetadata, SectionMetadataReader};
pub use references::{zip_exact, ReferenceEntry, ReferenceExtractor, Scope};
pub use title::{SplitTitle, TitleSplitter};
