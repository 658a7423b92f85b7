use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use eventprep_core::{Cell, PipelineConfig, Table, WindowLabel};

use eventprep_clean::types::parse_integer;

use crate::model::{Finding, TemporalStats};

/// Temporal sanity pass: observed date range per window, dates outside
/// the window's declared bounds, `year` column disagreement with
/// `event_date`, and the `time_precision` distribution.
///
/// Unlike the cleaner, an unparsable date here is a finding, not a fatal
/// error; validation is advisory by contract.
pub fn check_temporal_sanity(
    windows: &[(WindowLabel, Table)],
    config: &PipelineConfig,
    findings: &mut Vec<Finding>,
) -> Vec<TemporalStats> {
    windows
        .iter()
        .map(|(label, table)| temporal_for(*label, table, config, findings))
        .collect()
}

fn temporal_for(
    window: WindowLabel,
    table: &Table,
    config: &PipelineConfig,
    findings: &mut Vec<Finding>,
) -> TemporalStats {
    let bounds = config.bounds(window);
    let date_index = table.column_index("event_date");
    let year_index = table.column_index("year");

    if date_index.is_none() {
        findings.push(missing_column(window, "event_date"));
    }

    let mut min_date: Option<NaiveDate> = None;
    let mut max_date: Option<NaiveDate> = None;
    let mut out_of_window_rows = 0;
    let mut out_of_window_example = None;
    let mut year_mismatch_rows = 0;
    let mut unparsable_dates = 0;
    let mut unparsable_example = None;

    if let Some(date_index) = date_index {
        for row in &table.rows {
            let raw = match &row[date_index] {
                Cell::Text(value) => value.trim(),
                Cell::Null => "",
                Cell::Date(date) => {
                    observe(*date, &mut min_date, &mut max_date);
                    continue;
                }
                _ => "",
            };
            let date = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => date,
                Err(_) => {
                    unparsable_dates += 1;
                    unparsable_example.get_or_insert_with(|| raw.to_string());
                    continue;
                }
            };
            observe(date, &mut min_date, &mut max_date);

            if !bounds.contains(date) {
                out_of_window_rows += 1;
                out_of_window_example.get_or_insert_with(|| date.to_string());
            }

            if let Some(year_index) = year_index {
                if let Some(year) = row[year_index]
                    .as_int()
                    .or_else(|| row[year_index].as_text().and_then(parse_integer))
                {
                    if year != i64::from(date.year()) {
                        year_mismatch_rows += 1;
                    }
                }
            }
        }
    }

    if unparsable_dates > 0 {
        findings.push(Finding {
            code: "unparsable_date".to_string(),
            window: Some(window),
            column: Some("event_date".to_string()),
            message: format!("{unparsable_dates} unparsable event_date value(s)"),
            row_index: None,
            example: unparsable_example,
        });
    }
    if out_of_window_rows > 0 {
        findings.push(Finding {
            code: "out_of_window".to_string(),
            window: Some(window),
            column: Some("event_date".to_string()),
            message: format!(
                "{out_of_window_rows} event(s) outside the declared {window} range"
            ),
            row_index: None,
            example: out_of_window_example,
        });
    }
    if year_mismatch_rows > 0 {
        findings.push(Finding {
            code: "year_mismatch".to_string(),
            window: Some(window),
            column: Some("year".to_string()),
            message: format!(
                "{year_mismatch_rows} row(s) where year disagrees with event_date"
            ),
            row_index: None,
            example: None,
        });
    }

    let time_precision_counts = precision_distribution(table, window, findings);

    TemporalStats {
        window,
        min_date,
        max_date,
        out_of_window_rows,
        year_mismatch_rows,
        unparsable_dates,
        time_precision_counts,
    }
}

fn observe(date: NaiveDate, min: &mut Option<NaiveDate>, max: &mut Option<NaiveDate>) {
    *min = Some(min.map_or(date, |current| current.min(date)));
    *max = Some(max.map_or(date, |current| current.max(date)));
}

fn precision_distribution(
    table: &Table,
    window: WindowLabel,
    findings: &mut Vec<Finding>,
) -> BTreeMap<i64, u64> {
    let mut counts = BTreeMap::new();
    let Some(index) = table.column_index("time_precision") else {
        findings.push(missing_column(window, "time_precision"));
        return counts;
    };
    for row in &table.rows {
        let code = match &row[index] {
            Cell::Int(value) => Some(*value),
            Cell::Text(value) => parse_integer(value),
            _ => None,
        };
        if let Some(code) = code {
            *counts.entry(code).or_insert(0) += 1;
        }
    }
    counts
}

fn missing_column(window: WindowLabel, column: &str) -> Finding {
    Finding {
        code: "missing_column".to_string(),
        window: Some(window),
        column: Some(column.to_string()),
        message: format!("column {column} missing from {window}"),
        row_index: None,
        example: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(dates: &[&str], years: &[&str], precisions: &[&str]) -> Table {
        let mut table = Table::new(vec![
            "event_date".into(),
            "year".into(),
            "time_precision".into(),
        ]);
        for ((date, year), precision) in dates.iter().zip(years).zip(precisions) {
            table.push_row(vec![
                Cell::Text(date.to_string()),
                Cell::Text(year.to_string()),
                Cell::Text(precision.to_string()),
            ]);
        }
        table
    }

    #[test]
    fn week_before_date_outside_bounds_is_flagged() {
        let config = PipelineConfig::default();
        let t = table(
            &["2023-04-12", "2023-04-20"],
            &["2023", "2023"],
            &["1", "1"],
        );
        let mut findings = Vec::new();
        let stats =
            check_temporal_sanity(&[(WindowLabel::WeekBefore, t)], &config, &mut findings);
        assert_eq!(stats[0].out_of_window_rows, 1);
        let finding = findings.iter().find(|f| f.code == "out_of_window").unwrap();
        assert_eq!(finding.window, Some(WindowLabel::WeekBefore));
        assert_eq!(finding.example.as_deref(), Some("2023-04-20"));
    }

    #[test]
    fn year_disagreement_is_counted_and_null_years_skipped() {
        let config = PipelineConfig::default();
        let mut t = table(&["2023-04-12", "2023-04-13"], &["2022", "x"], &["1", "2"]);
        t.rows[1][1] = Cell::Null;
        let mut findings = Vec::new();
        let stats =
            check_temporal_sanity(&[(WindowLabel::WeekBefore, t)], &config, &mut findings);
        assert_eq!(stats[0].year_mismatch_rows, 1);
        assert!(findings.iter().any(|f| f.code == "year_mismatch"));
    }

    #[test]
    fn unparsable_dates_are_findings_not_errors() {
        let config = PipelineConfig::default();
        let t = table(&["not-a-date", "2023-04-16"], &["2023", "2023"], &["1", "3"]);
        let mut findings = Vec::new();
        let stats =
            check_temporal_sanity(&[(WindowLabel::WarPeriod, t)], &config, &mut findings);
        assert_eq!(stats[0].unparsable_dates, 1);
        assert_eq!(stats[0].min_date, NaiveDate::from_ymd_opt(2023, 4, 16));
        assert!(findings.iter().any(|f| f.code == "unparsable_date"));
    }

    #[test]
    fn time_precision_distribution_is_collected() {
        let config = PipelineConfig::default();
        let t = table(
            &["2023-04-16", "2023-04-17", "2023-04-18"],
            &["2023", "2023", "2023"],
            &["1", "1", "3"],
        );
        let mut findings = Vec::new();
        let stats = check_temporal_sanity(&[(WindowLabel::WarPeriod, t)], &config, &mut findings);
        assert_eq!(stats[0].time_precision_counts.get(&1), Some(&2));
        assert_eq!(stats[0].time_precision_counts.get(&3), Some(&1));
    }
}
