use super::dates::from_spreadsheet_serial;
use super::table::{Cell, RawTable};
use super::IngestError;
use calamine::{open_workbook_auto, Data, Reader};
use std::io::Read;
use std::path::Path;

/// File formats the loaders understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpreadsheetFormat {
    Csv,
    Workbook,
}

impl SpreadsheetFormat {
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xlsm" | "xls" | "ods" => Some(Self::Workbook),
            _ => None,
        }
    }
}

pub(crate) fn read_path(path: &Path) -> Result<RawTable, IngestError> {
    match SpreadsheetFormat::from_path(path) {
        Some(SpreadsheetFormat::Csv) => {
            let file = std::fs::File::open(path)?;
            read_csv(file)
        }
        Some(SpreadsheetFormat::Workbook) => read_workbook(path),
        None => Err(IngestError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}

pub(crate) fn read_csv<R: Read>(reader: R) -> Result<RawTable, IngestError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader
        .headers()?
        .iter()
        .map(str::to_string)
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        rows.push(
            record
                .iter()
                .map(|value| {
                    if value.is_empty() {
                        Cell::Empty
                    } else {
                        Cell::Text(value.to_string())
                    }
                })
                .collect(),
        );
    }

    Ok(RawTable { headers, rows })
}

/// Reads the first worksheet of a workbook. The first row is the header.
pub(crate) fn read_workbook(path: &Path) -> Result<RawTable, IngestError> {
    let workbook_error = |message: String| IngestError::Workbook {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| workbook_error(e.to_string()))?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| workbook_error(format!("sheet '{}': {}", sheet_name, e)))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(RawTable::default());
    };

    let headers = header.iter().map(header_text).collect();
    let rows = rows
        .map(|row| row.iter().map(workbook_cell).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

fn workbook_cell(cell: &Data) -> Cell {
    match cell {
        Data::Empty => Cell::Empty,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => {
            if s.trim().is_empty() {
                Cell::Empty
            } else {
                Cell::Text(s.clone())
            }
        }
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Float(f) => Cell::Number(*f),
        Data::Bool(b) => Cell::Text(b.to_string()),
        Data::DateTime(dt) => from_spreadsheet_serial(dt.as_f64())
            .map(Cell::DateTime)
            .unwrap_or(Cell::Empty),
        Data::Error(_) => Cell::Empty,
    }
}
