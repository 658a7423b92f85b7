use eventprep_core::{Cell, Table, WindowLabel};

use crate::model::{FatalityStats, Finding};

/// Fatalities baseline pass: total, median, and the zero-fatality share
/// per window, over the values that parse as numbers.
pub fn check_fatalities(
    windows: &[(WindowLabel, Table)],
    findings: &mut Vec<Finding>,
) -> Vec<FatalityStats> {
    windows
        .iter()
        .map(|(label, table)| fatalities_for(*label, table, findings))
        .collect()
}

fn fatalities_for(
    window: WindowLabel,
    table: &Table,
    findings: &mut Vec<Finding>,
) -> FatalityStats {
    let events = table.row_count() as u64;
    let Some(index) = table.column_index("fatalities") else {
        findings.push(Finding {
            code: "missing_column".to_string(),
            window: Some(window),
            column: Some("fatalities".to_string()),
            message: format!("column fatalities missing from {window}"),
            row_index: None,
            example: None,
        });
        return FatalityStats {
            window,
            events,
            total_fatalities: 0.0,
            median_fatalities: 0.0,
            pct_zero_fatalities: 0.0,
        };
    };

    let mut values: Vec<f64> = table
        .rows
        .iter()
        .filter_map(|row| match &row[index] {
            Cell::Int(value) => Some(*value as f64),
            Cell::Float(value) => Some(*value),
            Cell::Text(value) => value.trim().parse::<f64>().ok(),
            _ => None,
        })
        .collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let zero_count = values.iter().filter(|value| **value == 0.0).count() as u64;
    FatalityStats {
        window,
        events,
        total_fatalities: values.iter().sum(),
        median_fatalities: median(&values),
        pct_zero_fatalities: if events > 0 {
            zero_count as f64 / events as f64 * 100.0
        } else {
            0.0
        },
    }
}

fn median(sorted: &[f64]) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}
