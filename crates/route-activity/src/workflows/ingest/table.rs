use chrono::NaiveDateTime;

/// A single spreadsheet value as delivered by the reader.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cell {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    DateTime(NaiveDateTime),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(value) => value.trim().is_empty(),
            Cell::Number(value) => value.is_nan(),
            Cell::DateTime(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => {
                let trimmed = value.trim();
                (!trimmed.is_empty()).then_some(trimmed)
            }
            _ => None,
        }
    }

    /// Renders the cell as a join key. Whole numbers lose their fractional
    /// part so `12345.0` from a workbook matches `"12345"` from a CSV.
    pub fn as_key(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(_) => self.as_text().map(str::to_string),
            Cell::Number(value) if value.is_nan() => None,
            Cell::Number(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                Some(format!("{}", *value as i64))
            }
            Cell::Number(value) => Some(value.to_string()),
            Cell::DateTime(value) => Some(value.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) if !value.is_nan() => Some(*value),
            Cell::Text(_) => self.as_text().and_then(parse_number),
            _ => None,
        }
    }
}

pub(crate) fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|number| number.is_finite())
}

/// Header row plus data rows, exactly as read from the source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

/// A table whose headers have been canonicalized. Cells are addressed by
/// canonical column name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub(crate) fn new(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(Vec::as_slice)
    }

    /// Returns every value of a column. Short rows yield `Cell::Empty`.
    pub fn column_cells(&self, index: usize) -> Vec<&Cell> {
        self.rows
            .iter()
            .map(|row| row.get(index).unwrap_or(&EMPTY_CELL))
            .collect()
    }
}

pub(crate) fn cell_at(row: &[Cell], index: Option<usize>) -> &Cell {
    index.and_then(|index| row.get(index)).unwrap_or(&EMPTY_CELL)
}
