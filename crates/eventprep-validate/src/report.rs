use crate::model::{Finding, ValidationReport};

/// Render a deterministic markdown report from validation metrics and
/// findings.
pub fn render_report(
    report: &ValidationReport,
    findings: &[Finding],
    max_examples: usize,
) -> String {
    let mut lines = Vec::new();

    lines.push("# Eventprep Validation Report".to_string());
    lines.push(String::new());
    lines.push("## Run summary".to_string());
    lines.push(format!("- run_id: {}", report.run_id));
    lines.push(format!("- metrics_version: {}", report.metrics_version));
    lines.push(format!("- findings: {}", report.findings_total));
    lines.push(String::new());

    lines.push("## Integrity".to_string());
    lines.push("| window | rows | columns | duplicate keys | date range |".to_string());
    lines.push("| --- | --- | --- | --- | --- |".to_string());
    for stats in &report.integrity {
        let range = match (&stats.min_event_date, &stats.max_event_date) {
            (Some(min), Some(max)) => format!("{min} to {max}"),
            _ => "-".to_string(),
        };
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            stats.window, stats.rows, stats.columns, stats.duplicate_event_ids, range
        ));
    }
    for stats in &report.integrity {
        if stats.null_counts.is_empty() {
            continue;
        }
        lines.push(format!("- {} null counts:", stats.window));
        for null in &stats.null_counts {
            lines.push(format!("  - {}: {}", null.column, null.nulls));
        }
    }
    lines.push(String::new());

    lines.push("## Schema consistency".to_string());
    lines.push(format!("- reference window: {}", report.schema.reference));
    if report.schema.consistent {
        lines.push("- schema appears consistent across windows".to_string());
    }
    for cmp in &report.schema.comparisons {
        let status = if cmp.columns_match { "OK" } else { "MISMATCH" };
        lines.push(format!(
            "- {} vs {}: column list {}",
            cmp.window, report.schema.reference, status
        ));
        if !cmp.missing_columns.is_empty() {
            lines.push(format!("  - missing: {}", cmp.missing_columns.join(", ")));
        }
        if !cmp.extra_columns.is_empty() {
            lines.push(format!("  - extra: {}", cmp.extra_columns.join(", ")));
        }
        for mismatch in &cmp.kind_mismatches {
            lines.push(format!(
                "  - kind mismatch in {}: {:?} vs {:?}",
                mismatch.column, mismatch.reference, mismatch.observed
            ));
        }
    }
    lines.push(String::new());

    lines.push("## Temporal sanity".to_string());
    lines.push(
        "| window | range | out of window | year mismatch | unparsable |".to_string(),
    );
    lines.push("| --- | --- | --- | --- | --- |".to_string());
    for stats in &report.temporal {
        let range = match (stats.min_date, stats.max_date) {
            (Some(min), Some(max)) => format!("{min} to {max}"),
            _ => "-".to_string(),
        };
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            stats.window,
            range,
            stats.out_of_window_rows,
            stats.year_mismatch_rows,
            stats.unparsable_dates
        ));
    }
    for stats in &report.temporal {
        if stats.time_precision_counts.is_empty() {
            continue;
        }
        let distribution = stats
            .time_precision_counts
            .iter()
            .map(|(code, count)| format!("{code}={count}"))
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!(
            "- {} time_precision distribution: {}",
            stats.window, distribution
        ));
    }
    lines.push(String::new());

    lines.push("## Spatial precision".to_string());
    lines.push("| window | geo=1 | geo=2 | geo=3 |".to_string());
    lines.push("| --- | --- | --- | --- |".to_string());
    for stats in &report.spatial {
        let mut cells = Vec::new();
        for code in [1, 2, 3] {
            let share = stats.shares.iter().find(|share| share.code == code);
            cells.push(match share {
                Some(share) => format!("{} ({:.1}%)", share.count, share.pct),
                None => "-".to_string(),
            });
        }
        lines.push(format!(
            "| {} | {} | {} | {} |",
            stats.window, cells[0], cells[1], cells[2]
        ));
    }
    lines.push(String::new());

    lines.push("## Fatalities baseline".to_string());
    lines.push("| window | events | total | median | zero share |".to_string());
    lines.push("| --- | --- | --- | --- | --- |".to_string());
    for stats in &report.fatalities {
        lines.push(format!(
            "| {} | {} | {} | {} | {:.1}% |",
            stats.window,
            stats.events,
            stats.total_fatalities,
            stats.median_fatalities,
            stats.pct_zero_fatalities
        ));
    }
    lines.push(String::new());

    if !findings.is_empty() {
        lines.push("## Top findings".to_string());
        for finding in findings.iter().take(max_examples) {
            let window = finding
                .window
                .map(|window| format!(" [{window}]"))
                .unwrap_or_default();
            let example = finding
                .example
                .as_ref()
                .map(|value| format!(" example={value}"))
                .unwrap_or_default();
            lines.push(format!(
                "- {}{}: {}{}",
                finding.code, window, finding.message, example
            ));
        }
        lines.push(String::new());
    }

    lines.push("## Data readiness summary".to_string());
    lines.push(
        "- Is the data usable for spatial analysis? See the spatial precision shares."
            .to_string(),
    );
    lines.push(
        "- Is the data comparable across the three periods? See the schema consistency section."
            .to_string(),
    );
    lines.push("- Issues to address in cleaning:".to_string());
    lines.push("  1. Assess dominance of low-precision geo codes (geo_precision > 1).".to_string());
    lines.push("  2. Verify time_precision consistency across periods.".to_string());
    lines.push(
        "  3. Validate fatality outliers and zero-fatality reporting rates.".to_string(),
    );
    lines.join("\n")
}
