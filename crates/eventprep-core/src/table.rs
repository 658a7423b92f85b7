use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A typed cell value.
///
/// Raw CSV fields enter as `Text` (or `Null` when empty); type
/// normalization rewrites the typed columns in place.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Null,
    Text(String),
    Int(i64),
    Float(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Cell::Int(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Cell::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Cell::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Render the cell for CSV output. Nulls become empty fields, dates use
    /// `%Y-%m-%d`, booleans render as `true`/`false`.
    pub fn to_csv(&self) -> String {
        match self {
            Cell::Null => String::new(),
            Cell::Text(value) => value.clone(),
            Cell::Int(value) => value.to_string(),
            Cell::Float(value) => value.to_string(),
            Cell::Date(value) => value.format("%Y-%m-%d").to_string(),
            Cell::Bool(value) => value.to_string(),
        }
    }
}

/// An in-memory table with named columns and typed rows.
///
/// Invariant: every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn cell(&self, row: usize, column: usize) -> &Cell {
        &self.rows[row][column]
    }

    /// Append a column with one cell per row.
    pub fn push_column(&mut self, name: &str, cells: Vec<Cell>) {
        debug_assert_eq!(cells.len(), self.rows.len());
        self.columns.push(name.to_string());
        for (row, cell) in self.rows.iter_mut().zip(cells) {
            row.push(cell);
        }
    }

    /// Insert a column at `index`, filling every row with a copy of `fill`.
    pub fn insert_column(&mut self, index: usize, name: &str, fill: Cell) {
        self.columns.insert(index, name.to_string());
        for row in &mut self.rows {
            row.insert(index, fill.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_rendering_is_deterministic() {
        assert_eq!(Cell::Null.to_csv(), "");
        assert_eq!(Cell::Text("Battles".into()).to_csv(), "Battles");
        assert_eq!(Cell::Int(-1).to_csv(), "-1");
        assert_eq!(Cell::Bool(true).to_csv(), "true");
        let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        assert_eq!(Cell::Date(date).to_csv(), "2023-06-15");
    }

    #[test]
    fn insert_column_fills_every_row() {
        let mut table = Table::new(vec!["a".into(), "b".into()]);
        table.push_row(vec![Cell::Int(1), Cell::Int(2)]);
        table.push_row(vec![Cell::Int(3), Cell::Int(4)]);
        table.insert_column(1, "period", Cell::Text("pre_war".into()));
        assert_eq!(table.columns, vec!["a", "period", "b"]);
        assert_eq!(table.cell(0, 1), &Cell::Text("pre_war".into()));
        assert_eq!(table.cell(1, 2), &Cell::Int(4));
    }
}
