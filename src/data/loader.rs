// ============================================================
// Layer 4 — Dataset Loader
// ============================================================
// Loads the labelled pitch dataset from a tabular file.
//
// Supported formats:
//   .xlsx / .xlsm / .xls / .ods → calamine (first worksheet)
//   .csv                        → csv crate
//
// Either way the file is first read into a plain table
// (header row + string rows), then turned into PitchRecords:
//
//   1. Normalise every header ("Company Name" → "company_name")
//   2. Locate the company_name and company_pitch columns
//   3. Skip rows with an empty company name
//
// Pitch cells are kept exactly as stored; the quality gate must
// see the same text the spreadsheet holds.
//
// A missing column or an unreadable file is an error; the
// classifier stage treats it as fatal.
//
// Reference: calamine crate documentation
//            csv crate documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Reader};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::data::preprocessor::Preprocessor;
use crate::domain::pitch::PitchRecord;
use crate::domain::traits::PitchSource;

pub const COMPANY_NAME_COLUMN: &str = "company_name";
pub const COMPANY_PITCH_COLUMN: &str = "company_pitch";

/// Structural problems with a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("unsupported dataset format '{0}' (expected .xlsx, .xls, .ods or .csv)")]
    UnsupportedFormat(String),

    #[error("workbook '{0}' has no worksheets")]
    NoWorksheet(String),

    #[error("dataset has no header row")]
    Empty,

    #[error("missing column '{column}' (found: {found})")]
    MissingColumn { column: &'static str, found: String },
}

/// Loads pitch records from a spreadsheet or CSV file.
/// Implements the PitchSource trait from Layer 3.
pub struct DatasetLoader {
    path: PathBuf,
}

impl DatasetLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PitchSource for DatasetLoader {
    fn load_all(&self) -> Result<Vec<PitchRecord>> {
        let extension = self.path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        let (headers, rows) = match extension.as_str() {
            "xlsx" | "xlsm" | "xls" | "ods" => read_workbook(&self.path)?,
            "csv" => read_csv(&self.path)?,
            other => return Err(DatasetError::UnsupportedFormat(other.to_string()).into()),
        };

        let records = records_from_table(&headers, rows)
            .with_context(|| format!("Invalid dataset '{}'", self.path.display()))?;

        tracing::info!(
            "Loaded {} pitches from '{}'",
            records.len(),
            self.path.display()
        );
        Ok(records)
    }
}

type Table = (Vec<String>, Vec<Vec<String>>);

/// Read the first worksheet of a workbook into a header row and data rows.
fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Cannot open workbook '{}'", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DatasetError::NoWorksheet(path.display().to_string()))?
        .with_context(|| format!("Cannot read first worksheet of '{}'", path.display()))?;

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect::<Vec<String>>());

    let headers = rows.next().ok_or(DatasetError::Empty)?;
    Ok((headers, rows.collect()))
}

/// Read a CSV file with a header row. Ragged rows are allowed.
fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Cannot open CSV '{}'", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("Cannot read CSV header of '{}'", path.display()))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("Malformed row in '{}'", path.display()))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok((headers, rows))
}

/// Convert a raw table into pitch records.
pub fn records_from_table(
    headers: &[String],
    rows:    impl IntoIterator<Item = Vec<String>>,
) -> Result<Vec<PitchRecord>, DatasetError> {
    if headers.is_empty() {
        return Err(DatasetError::Empty);
    }

    let prep = Preprocessor::new();
    let keys: Vec<String> = headers.iter().map(|h| prep.normalize_header(h)).collect();

    let column = |name: &'static str| {
        keys.iter()
            .position(|k| k == name)
            .ok_or_else(|| DatasetError::MissingColumn {
                column: name,
                found:  keys.join(", "),
            })
    };
    let name_idx  = column(COMPANY_NAME_COLUMN)?;
    let pitch_idx = column(COMPANY_PITCH_COLUMN)?;

    let mut records = Vec::new();
    for (line, row) in rows.into_iter().enumerate() {
        let name = row.get(name_idx).map(|n| prep.clean(n)).unwrap_or_default();
        if name.is_empty() {
            tracing::warn!("Skipping row {}: empty company name", line + 2);
            continue;
        }
        let pitch = row.get(pitch_idx).cloned().unwrap_or_default();
        records.push(PitchRecord::new(name, pitch));
    }
    Ok(records)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_headers_are_normalised() {
        let headers = strings(&["Company Name", " Company Pitch ", "Label"]);
        let rows = vec![strings(&["Acme", "We sell rockets.", "1"])];
        let records = records_from_table(&headers, rows).unwrap();
        assert_eq!(records, vec![PitchRecord::new("Acme", "We sell rockets.")]);
    }

    #[test]
    fn test_missing_pitch_column() {
        let headers = strings(&["company_name", "description"]);
        let err = records_from_table(&headers, Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::MissingColumn { column: COMPANY_PITCH_COLUMN, .. }
        ));
    }

    #[test]
    fn test_rows_without_name_are_skipped() {
        let headers = strings(&["company_name", "company_pitch"]);
        let rows = vec![
            strings(&["", "orphan pitch."]),
            strings(&["Beta"]),
            strings(&["  Gamma ", "Gamma pitch."]),
        ];
        let records = records_from_table(&headers, rows).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], PitchRecord::new("Beta", ""));
        assert_eq!(records[1].company_name, "Gamma");
    }

    #[test]
    fn test_pitch_cell_is_stored_verbatim() {
        let headers = strings(&["company_name", "company_pitch"]);
        let cell = "Great\x01idea\x01for\x01all\x01farmers everywhere in the valley.\u{200B}\r\n";
        let rows = vec![strings(&["Acme", cell])];
        let records = records_from_table(&headers, rows).unwrap();
        assert_eq!(records[0].company_pitch.as_bytes(), cell.as_bytes());
        assert!(crate::domain::quality::is_gibberish(&records[0].company_pitch));
    }

    #[test]
    fn test_load_csv_file() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("pitches.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "Company Name,Company Pitch").unwrap();
        writeln!(f, "Acme,\"We build reusable rockets, cheaply.\"").unwrap();
        writeln!(f, "Zeta,We will replace every bank on Earth by Friday!").unwrap();
        drop(f);

        let records = DatasetLoader::new(&path).load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].company_pitch, "We build reusable rockets, cheaply.");
        assert_eq!(records[1].company_name, "Zeta");
    }

    #[test]
    fn test_unsupported_extension() {
        let err = DatasetLoader::new("pitches.json").load_all().unwrap_err();
        assert!(err.to_string().contains("unsupported dataset format"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(DatasetLoader::new(dir.path().join("nope.xlsx")).load_all().is_err());
        assert!(DatasetLoader::new(dir.path().join("nope.csv")).load_all().is_err());
    }
}
