use eventprep_core::{Cell, Table, WindowLabel};

use eventprep_clean::types::parse_integer;

use crate::model::{Finding, PrecisionShare, SpatialStats};

/// Spatial precision pass: percentage share of geo_precision codes 1, 2
/// and 3 per window.
pub fn check_spatial_precision(
    windows: &[(WindowLabel, Table)],
    findings: &mut Vec<Finding>,
) -> Vec<SpatialStats> {
    windows
        .iter()
        .map(|(label, table)| spatial_for(*label, table, findings))
        .collect()
}

fn spatial_for(window: WindowLabel, table: &Table, findings: &mut Vec<Finding>) -> SpatialStats {
    let Some(index) = table.column_index("geo_precision") else {
        findings.push(Finding {
            code: "missing_column".to_string(),
            window: Some(window),
            column: Some("geo_precision".to_string()),
            message: format!("column geo_precision missing from {window}"),
            row_index: None,
            example: None,
        });
        return SpatialStats {
            window,
            shares: Vec::new(),
        };
    };

    let total = table.row_count();
    let shares = [1_i64, 2, 3]
        .into_iter()
        .map(|code| {
            let count = table
                .rows
                .iter()
                .filter(|row| cell_code(&row[index]) == Some(code))
                .count() as u64;
            let pct = if total > 0 {
                count as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            PrecisionShare { code, count, pct }
        })
        .collect();

    SpatialStats { window, shares }
}

fn cell_code(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Int(value) => Some(*value),
        Cell::Text(value) => parse_integer(value),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shares_are_percentages_of_all_rows() {
        let mut table = Table::new(vec!["geo_precision".into()]);
        for code in ["1", "1", "2", "3", "junk"] {
            table.push_row(vec![Cell::Text(code.into())]);
        }
        let mut findings = Vec::new();
        let stats = check_spatial_precision(&[(WindowLabel::PreWar, table)], &mut findings);
        let shares = &stats[0].shares;
        assert_eq!(shares[0].count, 2);
        assert!((shares[0].pct - 40.0).abs() < 1e-9);
        assert_eq!(shares[1].count, 1);
        assert_eq!(shares[2].count, 1);
        assert!(findings.is_empty());
    }

    #[test]
    fn missing_geo_precision_column_is_a_finding() {
        let table = Table::new(vec!["event_id_cnty".into()]);
        let mut findings = Vec::new();
        let stats = check_spatial_precision(&[(WindowLabel::WarPeriod, table)], &mut findings);
        assert!(stats[0].shares.is_empty());
        assert_eq!(findings[0].code, "missing_column");
    }
}
