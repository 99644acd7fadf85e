use super::table::{parse_number, Cell};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

const DAY_FIRST_DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// Two-digit years go first: `%Y` would otherwise read "25" as year 25.
const DAY_FIRST_DATE_FORMATS: &[&str] = &[
    "%d/%m/%y", "%d-%m-%y", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d",
];

/// How the values of a date column are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateEncoding {
    Native,
    SpreadsheetSerial,
    DayFirstText,
}

impl DateEncoding {
    /// Picks the encoding for a whole column from its non-empty cells.
    pub fn infer<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        let mut all_native = true;
        let mut all_numeric = true;
        let mut seen = false;

        for cell in cells.into_iter().filter(|cell| !cell.is_empty()) {
            seen = true;
            match cell {
                Cell::DateTime(_) => all_numeric = false,
                Cell::Number(_) => all_native = false,
                Cell::Text(value) => {
                    all_native = false;
                    if parse_number(value).is_none() {
                        all_numeric = false;
                    }
                }
                Cell::Empty => {}
            }
        }

        if !seen {
            Self::DayFirstText
        } else if all_native {
            Self::Native
        } else if all_numeric {
            Self::SpreadsheetSerial
        } else {
            Self::DayFirstText
        }
    }

    fn decode(self, cell: &Cell) -> Option<NaiveDate> {
        match (self, cell) {
            (_, Cell::Empty) => None,
            (Self::Native, Cell::DateTime(value)) => Some(value.date()),
            (Self::SpreadsheetSerial, _) => cell
                .as_number()
                .and_then(from_spreadsheet_serial)
                .map(|value| value.date()),
            (_, Cell::DateTime(value)) => Some(value.date()),
            (_, Cell::Text(value)) => parse_day_first(value).map(|value| value.date()),
            (_, Cell::Number(_)) => None,
        }
    }
}

/// Decodes a date column using a single encoding for every row. Values that
/// cannot be decoded become `None`.
pub fn parse_date_column(cells: &[&Cell]) -> Vec<Option<NaiveDate>> {
    let encoding = DateEncoding::infer(cells.iter().copied());
    cells.iter().map(|cell| encoding.decode(cell)).collect()
}

/// Converts a spreadsheet day offset (epoch 1899-12-30) into a timestamp.
pub fn from_spreadsheet_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let whole_days = serial.trunc() as i64;
    let seconds = (serial.fract() * 86_400.0).round() as i64;
    epoch
        .checked_add_signed(Duration::days(whole_days))?
        .checked_add_signed(Duration::seconds(seconds))
}

pub fn parse_day_first(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }

    for format in DAY_FIRST_DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }

    for format in DAY_FIRST_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}
