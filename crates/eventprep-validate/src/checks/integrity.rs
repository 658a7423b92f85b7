use std::collections::HashMap;

use eventprep_core::{Cell, Table, WindowLabel};

use crate::model::{ColumnNullCount, Finding, IntegrityStats};

/// Per-window completeness check: row/column counts, duplicate primary
/// keys, per-column null tallies, and the observed raw date range.
pub fn check_integrity(
    windows: &[(WindowLabel, Table)],
    findings: &mut Vec<Finding>,
) -> Vec<IntegrityStats> {
    windows
        .iter()
        .map(|(label, table)| integrity_for(*label, table, findings))
        .collect()
}

fn integrity_for(
    window: WindowLabel,
    table: &Table,
    findings: &mut Vec<Finding>,
) -> IntegrityStats {
    let duplicate_event_ids = duplicate_key_count(table, "event_id_cnty");
    if duplicate_event_ids > 0 {
        findings.push(Finding {
            code: "duplicate_keys".to_string(),
            window: Some(window),
            column: Some("event_id_cnty".to_string()),
            message: format!("{duplicate_event_ids} duplicate event_id_cnty value(s)"),
            row_index: None,
            example: None,
        });
    }

    let mut null_counts = Vec::new();
    for (index, column) in table.columns.iter().enumerate() {
        let nulls = table
            .rows
            .iter()
            .filter(|row| row[index].is_null())
            .count() as u64;
        if nulls > 0 {
            null_counts.push(ColumnNullCount {
                column: column.clone(),
                nulls,
            });
        }
    }

    let (min_event_date, max_event_date) = raw_date_range(table);

    IntegrityStats {
        window,
        rows: table.row_count() as u64,
        columns: table.column_count() as u64,
        duplicate_event_ids,
        min_event_date,
        max_event_date,
        null_counts,
    }
}

/// Occurrences beyond the first of each key value. Null ids form their
/// own group, so repeated missing keys are duplicates too.
fn duplicate_key_count(table: &Table, column: &str) -> u64 {
    let Some(index) = table.column_index(column) else {
        return 0;
    };
    let mut nulls: u64 = 0;
    let mut seen: HashMap<&str, u64> = HashMap::new();
    for row in &table.rows {
        match &row[index] {
            Cell::Text(value) => *seen.entry(value.as_str()).or_insert(0) += 1,
            Cell::Null => nulls += 1,
            _ => {}
        }
    }
    seen.values().map(|count| count - 1).sum::<u64>() + nulls.saturating_sub(1)
}

// ISO dates order lexicographically, so min/max over the raw text is the
// observed range without committing to a parse here.
fn raw_date_range(table: &Table) -> (Option<String>, Option<String>) {
    let Some(index) = table.column_index("event_date") else {
        return (None, None);
    };
    let mut min: Option<&str> = None;
    let mut max: Option<&str> = None;
    for row in &table.rows {
        if let Cell::Text(value) = &row[index] {
            min = Some(min.map_or(value.as_str(), |current| current.min(value)));
            max = Some(max.map_or(value.as_str(), |current| current.max(value)));
        }
    }
    (min.map(str::to_string), max.map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_table(ids: &[&str], dates: &[&str]) -> Table {
        let mut table = Table::new(vec!["event_id_cnty".into(), "event_date".into()]);
        for (id, date) in ids.iter().zip(dates) {
            let id_cell = if id.is_empty() {
                Cell::Null
            } else {
                Cell::Text(id.to_string())
            };
            table.push_row(vec![id_cell, Cell::Text(date.to_string())]);
        }
        table
    }

    #[test]
    fn duplicates_count_occurrences_beyond_the_first() {
        let table = raw_table(
            &["A", "B", "A", "A", ""],
            &["2023-01-01", "2023-01-02", "2023-01-03", "2023-01-04", "2023-01-05"],
        );
        let mut findings = Vec::new();
        let stats = check_integrity(&[(WindowLabel::PreWar, table)], &mut findings);
        assert_eq!(stats[0].duplicate_event_ids, 2);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, "duplicate_keys");
    }

    #[test]
    fn repeated_null_ids_count_as_duplicates() {
        let table = raw_table(
            &["A", "", "", ""],
            &["2023-01-01", "2023-01-02", "2023-01-03", "2023-01-04"],
        );
        let mut findings = Vec::new();
        let stats = check_integrity(&[(WindowLabel::WarPeriod, table)], &mut findings);
        assert_eq!(stats[0].duplicate_event_ids, 2);
        assert!(findings.iter().any(|f| f.code == "duplicate_keys"));
    }

    #[test]
    fn null_counts_only_report_affected_columns() {
        let table = raw_table(&["A", ""], &["2023-01-01", "2023-01-02"]);
        let mut findings = Vec::new();
        let stats = check_integrity(&[(WindowLabel::WeekBefore, table)], &mut findings);
        assert_eq!(stats[0].null_counts.len(), 1);
        assert_eq!(stats[0].null_counts[0].column, "event_id_cnty");
        assert_eq!(stats[0].null_counts[0].nulls, 1);
        assert_eq!(stats[0].min_event_date.as_deref(), Some("2023-01-01"));
        assert_eq!(stats[0].max_event_date.as_deref(), Some("2023-01-02"));
    }
}
