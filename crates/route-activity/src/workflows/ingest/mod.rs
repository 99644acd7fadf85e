//! Spreadsheet ingestion: reading CSV or workbook files, canonicalizing their
//! headers and dates, and turning rows into typed records.

mod dates;
mod directory;
mod normalizer;
mod parser;
mod reader;
pub mod schema;
mod table;

pub use dates::{from_spreadsheet_serial, parse_day_first, DateEncoding};
pub use directory::DataDirectory;
pub use normalizer::HeaderStyle;
pub use reader::SpreadsheetFormat;
pub use schema::SourceSchema;
pub use table::{Cell, RawTable, Table};

use crate::workflows::activity::{
    ActivityInputs, ClientRecord, OffRouteRecord, SkippedRows, VisitRecord,
};
use crate::workflows::daily::DailyActivityRecord;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("unable to open workbook {}: {message}", path.display())]
    Workbook { path: PathBuf, message: String },
    #[error("workbook {} has no worksheets", path.display())]
    EmptyWorkbook { path: PathBuf },
    #[error(
        "unsupported spreadsheet format for {} (expected .csv, .xlsx, .xls or .ods)",
        path.display()
    )]
    UnsupportedFormat { path: PathBuf },
    #[error(
        "{source_name} input is missing required column '{column}' (found: {})",
        found.join(", ")
    )]
    MissingColumn {
        source_name: &'static str,
        column: String,
        found: Vec<String>,
    },
    #[error(
        "{source_name} input has no date column (accepted: {}; found: {})",
        accepted.join(", "),
        found.join(", ")
    )]
    MissingDateColumn {
        source_name: &'static str,
        accepted: Vec<String>,
        found: Vec<String>,
    },
}

/// Records parsed from one source plus the rows that could not be keyed.
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Loaded<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: 0,
        }
    }
}

type ParseFn<T> = fn(&Table, &SourceSchema) -> Result<Loaded<T>, IngestError>;

fn load_table<T>(
    raw: RawTable,
    schema: &SourceSchema,
    parse: ParseFn<T>,
) -> Result<Loaded<T>, IngestError> {
    let table = normalizer::normalize_table(raw, schema.header_style, schema.renames);
    let loaded = parse(&table, schema)?;

    if loaded.skipped > 0 {
        warn!(
            source = schema.name,
            skipped = loaded.skipped,
            "rows skipped while parsing"
        );
    }
    debug!(
        source = schema.name,
        rows = table.len(),
        records = loaded.records.len(),
        "source parsed"
    );
    Ok(loaded)
}

/// Entry points for each input kind, from a file path or a CSV reader.
pub struct SpreadsheetLoader;

impl SpreadsheetLoader {
    pub fn roster_from_path<P: AsRef<Path>>(path: P) -> Result<Loaded<ClientRecord>, IngestError> {
        load_table(
            reader::read_path(path.as_ref())?,
            &schema::ROSTER,
            parser::parse_roster,
        )
    }

    pub fn roster_from_reader<R: Read>(reader: R) -> Result<Loaded<ClientRecord>, IngestError> {
        load_table(reader::read_csv(reader)?, &schema::ROSTER, parser::parse_roster)
    }

    pub fn visits_from_path<P: AsRef<Path>>(path: P) -> Result<Loaded<VisitRecord>, IngestError> {
        load_table(reader::read_path(path.as_ref())?, &schema::VISITS, parser::parse_visits)
    }

    pub fn visits_from_reader<R: Read>(reader: R) -> Result<Loaded<VisitRecord>, IngestError> {
        load_table(reader::read_csv(reader)?, &schema::VISITS, parser::parse_visits)
    }

    pub fn off_route_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Loaded<OffRouteRecord>, IngestError> {
        load_table(
            reader::read_path(path.as_ref())?,
            &schema::OFF_ROUTE,
            parser::parse_off_route,
        )
    }

    pub fn off_route_from_reader<R: Read>(
        reader: R,
    ) -> Result<Loaded<OffRouteRecord>, IngestError> {
        load_table(
            reader::read_csv(reader)?,
            &schema::OFF_ROUTE,
            parser::parse_off_route,
        )
    }

    pub fn daily_activity_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Loaded<DailyActivityRecord>, IngestError> {
        load_table(
            reader::read_path(path.as_ref())?,
            &schema::DAILY_ACTIVITY,
            parser::parse_daily_activity,
        )
    }

    pub fn daily_activity_from_reader<R: Read>(
        reader: R,
    ) -> Result<Loaded<DailyActivityRecord>, IngestError> {
        load_table(
            reader::read_csv(reader)?,
            &schema::DAILY_ACTIVITY,
            parser::parse_daily_activity,
        )
    }

    /// Loads all three reconciliation sources. Any fatal error aborts before
    /// a partial input set is returned.
    pub fn activity_inputs(
        roster_path: &Path,
        visits_path: &Path,
        off_route_path: &Path,
    ) -> Result<ActivityInputs, IngestError> {
        let roster = Self::roster_from_path(roster_path)?;
        let visits = Self::visits_from_path(visits_path)?;
        let off_route = Self::off_route_from_path(off_route_path)?;
        Ok(assemble_inputs(roster, visits, off_route))
    }
}

pub fn assemble_inputs(
    roster: Loaded<ClientRecord>,
    visits: Loaded<VisitRecord>,
    off_route: Loaded<OffRouteRecord>,
) -> ActivityInputs {
    ActivityInputs {
        skipped: SkippedRows {
            visits: visits.skipped,
            off_route: off_route.skipped,
        },
        roster: roster.records,
        visits: visits.records,
        off_route: off_route.records,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Cursor;

    #[test]
    fn roster_headers_are_renamed_and_numeric_ids_kept_as_keys() {
        let csv = "Empresa,Cliente,Vendedor,Ruta\nAloma,1001,Perez,12\nAloma,,Perez,12\n";
        let loaded =
            SpreadsheetLoader::roster_from_reader(Cursor::new(csv)).expect("roster loads");

        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.records.len(), 2, "rows without a client id are kept");
        let record = &loaded.records[0];
        assert_eq!(record.client_id.as_str(), "1001");
        assert_eq!(record.route.as_str(), "12");
        assert!(loaded.records[1].client_id.is_blank());
    }

    #[test]
    fn visit_evidence_is_read_from_any_column() {
        let csv = "Unnamed: 0,Cliente,Sector,Fecha,Visitado,Hora Venta,Hora Motivo,F/H Foto\n\
0,C1,V1,01/12/2025,SI,,,\n\
1,C2,V1,02/12/2025,No,,,02/12/2025 10:00\n\
2,C3,V1,03/12/2025,no,,,\n";
        let loaded = SpreadsheetLoader::visits_from_reader(Cursor::new(csv)).expect("visits load");

        let flags: Vec<bool> = loaded.records.iter().map(VisitRecord::had_action).collect();
        assert_eq!(flags, vec![true, true, false]);
        assert_eq!(
            loaded.records[0].visited_on,
            NaiveDate::from_ymd_opt(2025, 12, 1)
        );
        assert_eq!(loaded.records[0].salesperson.as_str(), "V1");
    }

    #[test]
    fn missing_evidence_columns_mean_no_evidence() {
        let csv = "Cliente,Vendedor,Fecha\nC1,V1,01/12/2025\n";
        let loaded = SpreadsheetLoader::visits_from_reader(Cursor::new(csv)).expect("visits load");
        assert!(!loaded.records[0].had_action());
    }

    #[test]
    fn missing_date_column_is_fatal_and_named() {
        let csv = "Cliente,Importe\nC1,100\n";
        let err = SpreadsheetLoader::off_route_from_reader(Cursor::new(csv))
            .expect_err("date column required");
        match &err {
            IngestError::MissingDateColumn { accepted, .. } => {
                assert_eq!(accepted, &vec!["fecha".to_string()]);
            }
            other => panic!("expected missing date column, got {other:?}"),
        }
        assert!(err.to_string().contains("no date column"));
    }

    #[test]
    fn unparseable_dates_become_undated_records() {
        let csv = "Cliente,Fecha\nC1,01/12/2025\nC2,sin dato\n";
        let loaded = SpreadsheetLoader::off_route_from_reader(Cursor::new(csv)).expect("loads");
        assert_eq!(loaded.records.len(), 2);
        assert!(loaded.records[1].sold_on.is_none());
    }

    #[test]
    fn missing_roster_column_is_reported() {
        let csv = "Empresa,Cliente,Ruta\nAloma,C1,R1\n";
        let err = SpreadsheetLoader::roster_from_reader(Cursor::new(csv))
            .expect_err("vendedor required");
        assert!(matches!(
            err,
            IngestError::MissingColumn { ref column, .. } if column == "vendedor"
        ));
    }

    #[test]
    fn missing_files_propagate_io_errors() {
        let err = SpreadsheetLoader::roster_from_path("./does-not-exist.csv")
            .expect_err("expected io error");
        assert!(matches!(err, IngestError::Io(_)));
    }
}
