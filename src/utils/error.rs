// src/utils/error.rs
use std::path::PathBuf;
use thiserror::Error;

// Errors raised while turning one document into reference rows.
// In batch modes every variant means "skip this document".
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parsing error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("Missing required field <{field}> in {context}")]
    MissingField { field: String, context: String },

    #[error("Reference lists differ in length in {context}: {ids} ids, {titles} titles")]
    LengthMismatch {
        context: String,
        ids: usize,
        titles: usize,
    },

    #[error("Unsupported file type: {}", .0.display())]
    UnsupportedFile(PathBuf),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
