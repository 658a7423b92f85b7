use eventprep_core::{CATEGORICAL_COLUMNS, Cell, Table};

/// Normalize the free-text categorical columns in place: trim ends,
/// collapse interior whitespace runs, title-case each word. Null cells
/// stay null rather than becoming a stringified placeholder.
pub fn normalize_categoricals(table: &mut Table) {
    for column in CATEGORICAL_COLUMNS {
        let Some(index) = table.column_index(column) else {
            continue;
        };
        for row in &mut table.rows {
            if let Cell::Text(value) = &row[index] {
                row[index] = Cell::Text(title_case(value));
            }
        }
    }
}

/// `"  rebel   group "` becomes `"Rebel Group"`. The first alphabetic
/// character of each word is uppercased, so leading punctuation is
/// skipped: `"(rsf)"` becomes `"(Rsf)"`.
pub fn title_case(input: &str) -> String {
    input
        .split_whitespace()
        .map(capitalize_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut seen_alpha = false;
    for ch in word.chars() {
        if !seen_alpha && ch.is_alphabetic() {
            seen_alpha = true;
            out.extend(ch.to_uppercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_trims_collapses_and_capitalizes() {
        assert_eq!(title_case("  rebel   group "), "Rebel Group");
        assert_eq!(title_case("VIOLENCE AGAINST CIVILIANS"), "Violence Against Civilians");
        assert_eq!(title_case("battles"), "Battles");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn title_case_capitalizes_past_leading_punctuation() {
        assert_eq!(
            title_case("rapid support forces (rsf)"),
            "Rapid Support Forces (Rsf)"
        );
        assert_eq!(title_case("'ad-din"), "'Ad-din");
        assert_eq!(title_case("123"), "123");
    }

    #[test]
    fn only_categorical_columns_are_touched() {
        let mut table = Table::new(vec!["actor1".into(), "notes".into()]);
        table.push_row(vec![
            Cell::Text("  military FORCES ".into()),
            Cell::Text("  raw NOTES ".into()),
        ]);
        normalize_categoricals(&mut table);
        assert_eq!(table.cell(0, 0), &Cell::Text("Military Forces".into()));
        assert_eq!(table.cell(0, 1), &Cell::Text("  raw NOTES ".into()));
    }

    #[test]
    fn null_cells_stay_null() {
        let mut table = Table::new(vec!["event_type".into()]);
        table.push_row(vec![Cell::Null]);
        normalize_categoricals(&mut table);
        assert_eq!(table.cell(0, 0), &Cell::Null);
    }
}
