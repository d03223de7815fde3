// src/storage/mod.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use rust_xlsxwriter::Workbook;

use crate::report::{ReportMode, ReportTable};
use crate::utils::error::StorageError;

/// File format of a written report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Csv,
    Json,
    Xlsx,
}

impl OutputFormat {
    /// The master index goes to a spreadsheet, everything else to CSV.
    pub fn default_for(mode: ReportMode) -> Self {
        match mode {
            ReportMode::MasterIndex => OutputFormat::Xlsx,
            _ => OutputFormat::Csv,
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Xlsx => "xlsx",
        }
    }

    pub fn writer(self) -> Box<dyn TableWriter> {
        match self {
            OutputFormat::Csv => Box::new(CsvTableWriter),
            OutputFormat::Json => Box::new(JsonTableWriter),
            OutputFormat::Xlsx => Box::new(XlsxTableWriter),
        }
    }
}

/// Persists a report table to a path.
pub trait TableWriter {
    fn write(&self, table: &ReportTable, path: &Path) -> Result<(), StorageError>;
}

/// Comma-separated output with minimal quoting and `\n` line endings.
pub struct CsvTableWriter;

impl CsvTableWriter {
    pub fn render(table: &ReportTable) -> String {
        let mut out = String::new();
        if table.mode.emits_header() {
            push_csv_line(&mut out, table.columns().iter().copied());
        }
        for record in &table.records {
            let cells = record.cells();
            push_csv_line(&mut out, cells.iter().map(String::as_str));
        }
        out
    }
}

impl TableWriter for CsvTableWriter {
    fn write(&self, table: &ReportTable, path: &Path) -> Result<(), StorageError> {
        let mut file = fs::File::create(path)?;
        file.write_all(Self::render(table).as_bytes())?;
        Ok(())
    }
}

fn push_csv_line<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&csv_field(cell));
    }
    out.push('\n');
}

/// Quotes a field only when it holds a delimiter, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Pretty JSON array of objects keyed by column name.
pub struct JsonTableWriter;

impl JsonTableWriter {
    pub fn render(table: &ReportTable) -> Result<String, StorageError> {
        let columns = table.columns();
        let rows: Vec<serde_json::Value> = table
            .records
            .iter()
            .map(|record| {
                let object: serde_json::Map<String, serde_json::Value> = columns
                    .iter()
                    .zip(record.cells())
                    .map(|(column, cell)| (column.to_string(), serde_json::Value::String(cell)))
                    .collect();
                serde_json::Value::Object(object)
            })
            .collect();

        serde_json::to_string_pretty(&rows).map_err(|e| StorageError::SerializationError(e.to_string()))
    }
}

impl TableWriter for JsonTableWriter {
    fn write(&self, table: &ReportTable, path: &Path) -> Result<(), StorageError> {
        fs::write(path, Self::render(table)?)?;
        Ok(())
    }
}

/// Single-sheet workbook; ordinal columns are written as numbers.
pub struct XlsxTableWriter;

impl TableWriter for XlsxTableWriter {
    fn write(&self, table: &ReportTable, path: &Path) -> Result<(), StorageError> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let mut row: u32 = 0;

        if table.mode.emits_header() {
            for (col, name) in (0u16..).zip(table.columns()) {
                worksheet.write_string(row, col, *name)?;
            }
            row += 1;
        }

        for record in &table.records {
            for (col, cell) in (0u16..).zip(record.cells()) {
                match record.ordinal() {
                    Some(ordinal) if col == 0 => worksheet.write_number(row, col, ordinal as f64)?,
                    _ => worksheet.write_string(row, col, cell)?,
                };
            }
            row += 1;
        }

        workbook.save(path)?;
        Ok(())
    }
}

/// How the report file is named.
#[derive(Debug, Clone)]
pub enum OutputName {
    /// Fixed file stem, e.g. "reference_output".
    Fixed(String),
    /// Same stem as the input file.
    SameStemAs(PathBuf),
    /// Title followed by a generation timestamp, e.g. "Reference Standards Report 20240131 142501".
    Timestamped(String),
}

/// Builds the report path inside `dir`.
pub fn output_path(dir: &Path, name: &OutputName, format: OutputFormat, now: DateTime<Local>) -> PathBuf {
    let stem = match name {
        OutputName::Fixed(stem) => stem.clone(),
        OutputName::SameStemAs(input) => input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "report".to_string()),
        OutputName::Timestamped(title) => format!("{} {}", title, now.format("%Y%m%d %H%M%S")),
    };
    dir.join(format!("{}.{}", stem, format.extension()))
}

pub struct StorageManager {
    base_dir: PathBuf,
    format: OutputFormat,
}

impl StorageManager {
    /// Creates a new StorageManager writing into `base_dir`, creating it if needed.
    pub fn new<P: AsRef<Path>>(base_dir: P, format: OutputFormat) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path, format })
    }

    /// Writes the table and returns where it went.
    pub fn save_report(&self, table: &ReportTable, name: &OutputName) -> Result<PathBuf, StorageError> {
        let path = output_path(&self.base_dir, name, self.format, Local::now());
        self.format.writer().write(table, &path)?;

        tracing::info!("Saved {} rows to {}", table.len(), path.display());
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::FlatRecord;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn master_table() -> ReportTable {
        ReportTable {
            mode: ReportMode::MasterIndex,
            records: vec![
                FlatRecord::Master {
                    organization: "ACI INTERNATIONAL (ACI)".to_string(),
                    standard: "ACI 301".to_string(),
                    title: "(2020) Specifications, Concrete".to_string(),
                },
                FlatRecord::Master {
                    organization: String::new(),
                    standard: "UL 94".to_string(),
                    title: "The \"Flammability\" Test".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_csv_with_header_and_quoting() {
        let csv = CsvTableWriter::render(&master_table());
        assert_eq!(
            csv,
            "Organization,Standard,Title\n\
             ACI INTERNATIONAL (ACI),ACI 301,\"(2020) Specifications, Concrete\"\n\
             ,UL 94,\"The \"\"Flammability\"\" Test\"\n"
        );
    }

    #[test]
    fn test_csv_batch_has_no_header() {
        let table = ReportTable {
            mode: ReportMode::OrganizationBatch,
            records: vec![FlatRecord::Organization {
                ordinal: 0,
                section: "03 30 00".to_string(),
                name: "CONCRETE".to_string(),
                version: "05/23".to_string(),
                organization: "ACI".to_string(),
            }],
        };
        assert_eq!(CsvTableWriter::render(&table), "0,03 30 00,CONCRETE,05/23,ACI\n");
    }

    #[test]
    fn test_json_keys_are_columns() {
        let json = JsonTableWriter::render(&master_table()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed[0]["Standard"], "ACI 301");
        assert_eq!(parsed[1]["Organization"], "");
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_xlsx_workbook_reads_back() {
        use calamine::{open_workbook, Data, Reader, Xlsx};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference_output.xlsx");
        XlsxTableWriter.write(&master_table(), &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        assert_eq!(range.height(), 3);
        assert_eq!(range.get_value((0, 0)), Some(&Data::String("Organization".to_string())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::String("ACI 301".to_string())));
        assert_eq!(
            range.get_value((2, 2)),
            Some(&Data::String("The \"Flammability\" Test".to_string()))
        );
    }

    #[test]
    fn test_xlsx_ordinal_is_numeric_without_header() {
        use calamine::{open_workbook, Data, Reader, Xlsx};

        let table = ReportTable {
            mode: ReportMode::OrganizationBatch,
            records: vec![FlatRecord::Organization {
                ordinal: 0,
                section: "03 30 00".to_string(),
                name: "CONCRETE".to_string(),
                version: "05/23".to_string(),
                organization: "ACI".to_string(),
            }],
        };
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orgs.xlsx");
        XlsxTableWriter.write(&table, &path).unwrap();

        let mut workbook: Xlsx<_> = open_workbook(&path).unwrap();
        let range = workbook.worksheet_range("Sheet1").unwrap();
        assert_eq!(range.height(), 1);
        assert_eq!(range.get_value((0, 0)), Some(&Data::Float(0.0)));
        assert_eq!(range.get_value((0, 4)), Some(&Data::String("ACI".to_string())));
    }

    #[test]
    fn test_default_formats() {
        assert_eq!(OutputFormat::default_for(ReportMode::MasterIndex), OutputFormat::Xlsx);
        assert_eq!(OutputFormat::default_for(ReportMode::SectionBatch), OutputFormat::Csv);
        assert_eq!(OutputFormat::default_for(ReportMode::SingleSection), OutputFormat::Csv);
    }

    #[test]
    fn test_output_names() {
        let now = Local.with_ymd_and_hms(2024, 1, 31, 14, 25, 1).unwrap();
        let dir = Path::new("out");

        assert_eq!(
            output_path(dir, &OutputName::Timestamped("Reference Standards Report".to_string()), OutputFormat::Csv, now),
            dir.join("Reference Standards Report 20240131 142501.csv")
        );
        assert_eq!(
            output_path(dir, &OutputName::SameStemAs(PathBuf::from("specs/03 30 00.SEC")), OutputFormat::Json, now),
            dir.join("03 30 00.json")
        );
        assert_eq!(
            output_path(dir, &OutputName::Fixed("reference_output".to_string()), OutputFormat::Csv, now),
            dir.join("reference_output.csv")
        );
    }

    #[test]
    fn test_storage_manager_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("reports"), OutputFormat::Csv).unwrap();
        let path = storage
            .save_report(&master_table(), &OutputName::Fixed("reference_output".to_string()))
            .unwrap();
        let written = fs::read_to_string(path).unwrap();
        assert!(written.starts_with("Organization,Standard,Title\n"));
    }
}
