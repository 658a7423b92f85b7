use chrono::NaiveDate;
use eventprep_core::{Cell, Error, Table, WindowLabel};

use crate::errors::CleanError;
use crate::model::FallbackEvent;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Normalize the typed columns of an enforced window table in place.
///
/// `event_date` parses strictly and aborts the run on failure; the
/// numeric columns fall back to documented defaults (0 for fatalities,
/// -1 for the precision codes), with every substitution recorded.
pub fn normalize_types(
    table: &mut Table,
    window: WindowLabel,
    fallbacks: &mut Vec<FallbackEvent>,
) -> Result<(), CleanError> {
    normalize_dates(table, window)?;
    normalize_numeric(table, window, "fatalities", 0, fallbacks);
    normalize_numeric(table, window, "geo_precision", -1, fallbacks);
    normalize_numeric(table, window, "time_precision", -1, fallbacks);
    normalize_year(table);
    Ok(())
}

fn normalize_dates(table: &mut Table, window: WindowLabel) -> Result<(), CleanError> {
    let Some(index) = table.column_index("event_date") else {
        return Ok(());
    };
    for (row_index, row) in table.rows.iter_mut().enumerate() {
        let raw = match &row[index] {
            Cell::Text(value) => value.as_str(),
            Cell::Null => "",
            Cell::Date(_) => continue,
            other => {
                return Err(Error::DateParse {
                    window,
                    row: row_index as u64,
                    value: other.to_csv(),
                }
                .into());
            }
        };
        match NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT) {
            Ok(date) => row[index] = Cell::Date(date),
            Err(_) => {
                return Err(Error::DateParse {
                    window,
                    row: row_index as u64,
                    value: raw.to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}

fn normalize_numeric(
    table: &mut Table,
    window: WindowLabel,
    column: &str,
    default: i64,
    fallbacks: &mut Vec<FallbackEvent>,
) {
    let Some(index) = table.column_index(column) else {
        return;
    };
    for (row_index, row) in table.rows.iter_mut().enumerate() {
        let parsed = match &row[index] {
            Cell::Int(_) => continue,
            Cell::Text(value) => parse_integer(value),
            _ => None,
        };
        match parsed {
            Some(value) => row[index] = Cell::Int(value),
            None => {
                fallbacks.push(FallbackEvent {
                    window,
                    column: column.to_string(),
                    row: row_index as u64,
                    raw: match &row[index] {
                        Cell::Text(value) => value.clone(),
                        _ => String::new(),
                    },
                    substituted: default,
                });
                row[index] = Cell::Int(default);
            }
        }
    }
}

// `year` is advisory: unparsable values become null, without a recorded
// substitution, and the temporal pass skips null years.
fn normalize_year(table: &mut Table) {
    let Some(index) = table.column_index("year") else {
        return;
    };
    for row in &mut table.rows {
        if let Cell::Text(value) = &row[index] {
            row[index] = match parse_integer(value) {
                Some(year) => Cell::Int(year),
                None => Cell::Null,
            };
        }
    }
}

/// Best-effort integer parse: integer literals first, then float
/// literals truncated toward zero (sources emit e.g. `2.0`).
pub fn parse_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .map(|value| value.trunc() as i64)
}
