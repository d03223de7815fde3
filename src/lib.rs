//! Extracts reference-standard citations from specification section files
//! (`.SEC`) and the master reference index (`MASTER.REF`) into flat
//! CSV or JSON reports.

pub mod app;
pub mod config;
pub mod extractors;
pub mod input;
pub mod pipeline;
pub mod report;
pub mod storage;
pub mod utils;

pub use app::{run, RunOptions, RunSummary};
pub use config::{ExtractorConfig, TitleSplitPolicy};
pub use pipeline::{BatchReport, Pipeline, SkippedDocument};
pub use report::{FlatRecord, ReportMode, ReportTable};
pub use utils::AppError;
