use eventprep_core::{Cell, FIXED_COLUMN_COUNT, Table, WindowLabel};

use crate::model::CleanWarning;

/// Tag each window with its `period` label and concatenate the windows in
/// fixed order, preserving per-window row order.
///
/// The `period` column lands directly after the fixed schema, ahead of
/// the other derived columns. The row-conservation postcondition is
/// checked, not assumed; a violation surfaces as a warning that feeds the
/// readiness checklist.
pub fn merge_windows(
    windows: Vec<(WindowLabel, Table)>,
    warnings: &mut Vec<CleanWarning>,
) -> Table {
    let expected: usize = windows.iter().map(|(_, table)| table.row_count()).sum();

    let mut merged: Option<Table> = None;
    for label in WindowLabel::ALL {
        let Some((_, mut table)) = windows
            .iter()
            .find(|(candidate, _)| *candidate == label)
            .cloned()
        else {
            continue;
        };
        table.insert_column(
            FIXED_COLUMN_COUNT,
            "period",
            Cell::Text(label.as_str().to_string()),
        );
        match &mut merged {
            None => merged = Some(table),
            Some(target) => target.rows.extend(table.rows),
        }
    }

    let merged = merged.unwrap_or_else(|| Table::new(Vec::new()));
    if merged.row_count() != expected {
        warnings.push(CleanWarning {
            code: "rows_dropped".to_string(),
            window: None,
            message: format!(
                "merged table has {} rows but windows sum to {}",
                merged.row_count(),
                expected
            ),
        });
    }

    merged
}
