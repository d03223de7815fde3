// src/input/mod.rs
pub mod loader;
pub mod picker;

pub use loader::{list_input_files, parse_document, read_document_text};
pub use picker::{ArgumentPicker, FilePicker, PickKind, PromptPicker};
