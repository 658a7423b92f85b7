use eventprep_core::{Cell, Table};

const BATTLES: &str = "Battles";
const VIOLENCE_AGAINST_CIVILIANS: &str = "Violence Against Civilians";

/// Append the derived analytic columns to a normalized window table.
///
/// Pure per-row computation over the normalized fields. The geo flags are
/// mutually exclusive; the sentinel -1 yields false on both sides of each
/// pair. `month` truncates `event_date` to a `YYYY-MM` grouping key.
pub fn derive_flags(table: &mut Table) {
    let geo = table.column_index("geo_precision");
    let time = table.column_index("time_precision");
    let date = table.column_index("event_date");
    let event_type = table.column_index("event_type");

    let rows = table.row_count();
    let mut high_geo = Vec::with_capacity(rows);
    let mut low_geo = Vec::with_capacity(rows);
    let mut exact_time = Vec::with_capacity(rows);
    let mut estimated_time = Vec::with_capacity(rows);
    let mut month = Vec::with_capacity(rows);
    let mut is_battle = Vec::with_capacity(rows);
    let mut is_vac = Vec::with_capacity(rows);

    for row in &table.rows {
        let geo_code = geo.and_then(|index| row[index].as_int());
        high_geo.push(Cell::Bool(geo_code == Some(1)));
        low_geo.push(Cell::Bool(geo_code.is_some_and(|code| code >= 2)));

        let time_code = time.and_then(|index| row[index].as_int());
        exact_time.push(Cell::Bool(time_code == Some(1)));
        estimated_time.push(Cell::Bool(time_code.is_some_and(|code| code > 1)));

        month.push(match date.and_then(|index| row[index].as_date()) {
            Some(day) => Cell::Text(day.format("%Y-%m").to_string()),
            None => Cell::Null,
        });

        let category = event_type.and_then(|index| row[index].as_text());
        is_battle.push(Cell::Bool(category == Some(BATTLES)));
        is_vac.push(Cell::Bool(category == Some(VIOLENCE_AGAINST_CIVILIANS)));
    }

    table.push_column("high_geo", high_geo);
    table.push_column("low_geo", low_geo);
    table.push_column("exact_time", exact_time);
    table.push_column("estimated_time", estimated_time);
    table.push_column("month", month);
    table.push_column("is_battle", is_battle);
    table.push_column("is_vac", is_vac);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixture() -> Table {
        let mut table = Table::new(vec![
            "event_date".into(),
            "event_type".into(),
            "geo_precision".into(),
            "time_precision".into(),
        ]);
        let date = NaiveDate::from_ymd_opt(2023, 6, 15).unwrap();
        table.push_row(vec![
            Cell::Date(date),
            Cell::Text("Battles".into()),
            Cell::Int(1),
            Cell::Int(1),
        ]);
        table.push_row(vec![
            Cell::Date(date),
            Cell::Text("Violence Against Civilians".into()),
            Cell::Int(3),
            Cell::Int(2),
        ]);
        table.push_row(vec![
            Cell::Date(date),
            Cell::Text("Riots".into()),
            Cell::Int(-1),
            Cell::Int(-1),
        ]);
        table
    }

    #[test]
    fn geo_flags_are_mutually_exclusive() {
        let mut table = fixture();
        derive_flags(&mut table);
        let high = table.column_index("high_geo").unwrap();
        let low = table.column_index("low_geo").unwrap();
        for row in &table.rows {
            assert!(!(row[high] == Cell::Bool(true) && row[low] == Cell::Bool(true)));
        }
        assert_eq!(table.cell(0, high), &Cell::Bool(true));
        assert_eq!(table.cell(1, low), &Cell::Bool(true));
    }

    #[test]
    fn sentinel_precision_yields_false_on_both_sides() {
        let mut table = fixture();
        derive_flags(&mut table);
        let high = table.column_index("high_geo").unwrap();
        let low = table.column_index("low_geo").unwrap();
        let exact = table.column_index("exact_time").unwrap();
        let estimated = table.column_index("estimated_time").unwrap();
        assert_eq!(table.cell(2, high), &Cell::Bool(false));
        assert_eq!(table.cell(2, low), &Cell::Bool(false));
        assert_eq!(table.cell(2, exact), &Cell::Bool(false));
        assert_eq!(table.cell(2, estimated), &Cell::Bool(false));
    }

    #[test]
    fn month_truncates_to_year_month() {
        let mut table = fixture();
        derive_flags(&mut table);
        let month = table.column_index("month").unwrap();
        assert_eq!(table.cell(0, month), &Cell::Text("2023-06".into()));
    }

    #[test]
    fn event_type_flags_match_exact_categories() {
        let mut table = fixture();
        derive_flags(&mut table);
        let battle = table.column_index("is_battle").unwrap();
        let vac = table.column_index("is_vac").unwrap();
        assert_eq!(table.cell(0, battle), &Cell::Bool(true));
        assert_eq!(table.cell(0, vac), &Cell::Bool(false));
        assert_eq!(table.cell(1, vac), &Cell::Bool(true));
        assert_eq!(table.cell(2, battle), &Cell::Bool(false));
    }
}
