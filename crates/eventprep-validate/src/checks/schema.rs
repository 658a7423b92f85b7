use std::collections::BTreeSet;

use chrono::NaiveDate;
use eventprep_core::{Cell, Table, WindowLabel};

use crate::model::{CellKind, Finding, KindMismatch, SchemaComparison, SchemaConsistency};

/// Compare every window against the first-loaded one: exact,
/// order-sensitive column-list equality, plus inferred value kinds for
/// columns present in both. Never raises.
pub fn check_schema_consistency(
    windows: &[(WindowLabel, Table)],
    findings: &mut Vec<Finding>,
) -> SchemaConsistency {
    let (reference, reference_table) = match windows.first() {
        Some((label, table)) => (*label, table),
        None => {
            return SchemaConsistency {
                reference: WindowLabel::PreWar,
                comparisons: Vec::new(),
                consistent: true,
            };
        }
    };

    let mut comparisons = Vec::new();
    for (label, table) in windows.iter().skip(1) {
        comparisons.push(compare(
            reference,
            reference_table,
            *label,
            table,
            findings,
        ));
    }

    let consistent = comparisons
        .iter()
        .all(|cmp| cmp.columns_match && cmp.kind_mismatches.is_empty());

    SchemaConsistency {
        reference,
        comparisons,
        consistent,
    }
}

fn compare(
    reference: WindowLabel,
    reference_table: &Table,
    window: WindowLabel,
    table: &Table,
    findings: &mut Vec<Finding>,
) -> SchemaComparison {
    let columns_match = table.columns == reference_table.columns;

    let reference_set: BTreeSet<&String> = reference_table.columns.iter().collect();
    let current_set: BTreeSet<&String> = table.columns.iter().collect();
    let missing_columns: Vec<String> = reference_set
        .difference(&current_set)
        .map(|name| (*name).clone())
        .collect();
    let extra_columns: Vec<String> = current_set
        .difference(&reference_set)
        .map(|name| (*name).clone())
        .collect();

    if !columns_match {
        findings.push(Finding {
            code: "column_list_mismatch".to_string(),
            window: Some(window),
            column: None,
            message: format!(
                "column list differs from {reference}: {} missing, {} extra",
                missing_columns.len(),
                extra_columns.len()
            ),
            row_index: None,
            example: missing_columns.first().cloned().or_else(|| extra_columns.first().cloned()),
        });
    }

    let mut kind_mismatches = Vec::new();
    for column in reference_set.intersection(&current_set) {
        let reference_kind = infer_column_kind(reference_table, column);
        let observed_kind = infer_column_kind(table, column);
        if reference_kind != observed_kind
            && reference_kind != CellKind::Empty
            && observed_kind != CellKind::Empty
        {
            findings.push(Finding {
                code: "kind_mismatch".to_string(),
                window: Some(window),
                column: Some((*column).clone()),
                message: format!(
                    "inferred kind differs from {reference}: {reference_kind:?} vs {observed_kind:?}"
                ),
                row_index: None,
                example: None,
            });
            kind_mismatches.push(KindMismatch {
                column: (*column).clone(),
                reference: reference_kind,
                observed: observed_kind,
            });
        }
    }

    SchemaComparison {
        window,
        columns_match,
        missing_columns,
        extra_columns,
        kind_mismatches,
    }
}

/// Infer the value kind of a raw column, ignoring nulls. Mixed integer
/// and float values unify to `Float`; anything else mixed is `Text`.
pub fn infer_column_kind(table: &Table, column: &str) -> CellKind {
    let Some(index) = table.column_index(column) else {
        return CellKind::Empty;
    };
    let mut kind = CellKind::Empty;
    for row in &table.rows {
        let observed = match &row[index] {
            Cell::Null => continue,
            Cell::Int(_) => CellKind::Integer,
            Cell::Float(_) => CellKind::Float,
            Cell::Date(_) => CellKind::Date,
            Cell::Bool(_) => CellKind::Text,
            Cell::Text(value) => classify(value),
        };
        kind = match (kind, observed) {
            (CellKind::Empty, next) => next,
            (current, CellKind::Empty) => current,
            (current, next) if current == next => current,
            (CellKind::Integer, CellKind::Float) | (CellKind::Float, CellKind::Integer) => {
                CellKind::Float
            }
            _ => return CellKind::Text,
        };
    }
    kind
}

fn classify(value: &str) -> CellKind {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return CellKind::Empty;
    }
    if trimmed.parse::<i64>().is_ok() {
        return CellKind::Integer;
    }
    if trimmed.parse::<f64>().is_ok() {
        return CellKind::Float;
    }
    if NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok() {
        return CellKind::Date;
    }
    CellKind::Text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut table = Table::new(columns.iter().map(|name| name.to_string()).collect());
        for row in rows {
            table.push_row(
                row.iter()
                    .map(|value| {
                        if value.is_empty() {
                            Cell::Null
                        } else {
                            Cell::Text(value.to_string())
                        }
                    })
                    .collect(),
            );
        }
        table
    }

    #[test]
    fn identical_windows_are_consistent() {
        let a = table(&["id", "fatalities"], &[&["A", "3"]]);
        let b = table(&["id", "fatalities"], &[&["B", "4"]]);
        let mut findings = Vec::new();
        let result = check_schema_consistency(
            &[(WindowLabel::PreWar, a), (WindowLabel::WarPeriod, b)],
            &mut findings,
        );
        assert!(result.consistent);
        assert_eq!(result.reference, WindowLabel::PreWar);
        assert!(findings.is_empty());
    }

    #[test]
    fn missing_and_extra_columns_are_reported() {
        let a = table(&["id", "fatalities"], &[&["A", "3"]]);
        let b = table(&["id", "tags"], &[&["B", "crowd"]]);
        let mut findings = Vec::new();
        let result = check_schema_consistency(
            &[(WindowLabel::PreWar, a), (WindowLabel::WeekBefore, b)],
            &mut findings,
        );
        assert!(!result.consistent);
        let cmp = &result.comparisons[0];
        assert_eq!(cmp.missing_columns, vec!["fatalities".to_string()]);
        assert_eq!(cmp.extra_columns, vec!["tags".to_string()]);
        assert!(findings.iter().any(|f| f.code == "column_list_mismatch"));
    }

    #[test]
    fn kind_mismatch_is_detected_for_shared_columns() {
        let a = table(&["fatalities"], &[&["3"], &["4"]]);
        let b = table(&["fatalities"], &[&["many"], &["4"]]);
        let mut findings = Vec::new();
        let result = check_schema_consistency(
            &[(WindowLabel::PreWar, a), (WindowLabel::WarPeriod, b)],
            &mut findings,
        );
        let cmp = &result.comparisons[0];
        assert_eq!(cmp.kind_mismatches.len(), 1);
        assert_eq!(cmp.kind_mismatches[0].reference, CellKind::Integer);
        assert_eq!(cmp.kind_mismatches[0].observed, CellKind::Text);
    }

    #[test]
    fn integer_and_float_unify_to_float() {
        let t = table(&["latitude"], &[&["15"], &["15.5"]]);
        assert_eq!(infer_column_kind(&t, "latitude"), CellKind::Float);
    }
}
