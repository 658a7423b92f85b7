use std::path::Path;

use eventprep_core::{Cell, Error, Table};

use crate::errors::CleanError;

/// Read a raw window CSV into a table of text cells.
///
/// Empty fields become `Null`. Rows shorter than the header are padded
/// with `Null` so the table invariant holds. A missing file is fatal
/// before any transformation runs.
pub fn load_window_csv(path: &Path) -> Result<Table, CleanError> {
    if !path.exists() {
        return Err(Error::MissingSource(path.to_path_buf()).into());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let columns = reader
        .headers()?
        .iter()
        .map(|header| header.to_string())
        .collect::<Vec<_>>();

    let mut table = Table::new(columns);
    for result in reader.records() {
        let record = result?;
        let mut row = Vec::with_capacity(table.column_count());
        for index in 0..table.column_count() {
            let field = record.get(index).unwrap_or_default();
            if field.is_empty() {
                row.push(Cell::Null);
            } else {
                row.push(Cell::Text(field.to_string()));
            }
        }
        table.push_row(row);
    }

    Ok(table)
}
