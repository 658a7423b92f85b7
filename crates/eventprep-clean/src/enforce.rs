use eventprep_core::{Cell, EventSchema, Table, WindowLabel};

use crate::model::CleanWarning;

/// Project a raw table onto the fixed schema.
///
/// Columns come out in exact schema order. Missing schema columns are
/// created all-null and named in a warning; extra raw columns are dropped
/// silently. No row is removed.
pub fn enforce_schema(
    raw: &Table,
    schema: &EventSchema,
    window: WindowLabel,
    warnings: &mut Vec<CleanWarning>,
) -> (Table, Vec<String>) {
    let positions: Vec<Option<usize>> = schema
        .columns
        .iter()
        .map(|col| raw.column_index(&col.name))
        .collect();

    let missing: Vec<String> = schema
        .columns
        .iter()
        .zip(&positions)
        .filter(|(_, position)| position.is_none())
        .map(|(col, _)| col.name.clone())
        .collect();

    if !missing.is_empty() {
        warnings.push(CleanWarning {
            code: "missing_columns".to_string(),
            window: Some(window),
            message: format!("{} missing columns: {}", window, missing.join(", ")),
        });
    }

    let mut table = Table::new(schema.column_names());
    for raw_row in &raw.rows {
        let row = positions
            .iter()
            .map(|position| match position {
                Some(index) => raw_row[*index].clone(),
                None => Cell::Null,
            })
            .collect();
        table.push_row(row);
    }

    (table, missing)
}
