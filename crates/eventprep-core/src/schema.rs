use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Semantic kind of a schema column, used by type normalization and the
/// schema-consistency validator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    Text,
    Integer,
    Float,
    Date,
    Categorical,
}

/// A named column with its semantic kind.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ColumnSpec {
    pub name: String,
    pub kind: ColumnKind,
}

/// Ordered column contract every cleaned record must expose.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EventSchema {
    pub columns: Vec<ColumnSpec>,
}

/// Number of columns in the fixed event schema.
pub const FIXED_COLUMN_COUNT: usize = 30;

/// Free-text columns normalized (trim + title-case) before merge.
pub const CATEGORICAL_COLUMNS: [&str; 6] = [
    "event_type",
    "sub_event_type",
    "admin1",
    "admin2",
    "actor1",
    "actor2",
];

/// Derived columns appended after the fixed schema, in output order.
pub const DERIVED_COLUMNS: [&str; 8] = [
    "period",
    "high_geo",
    "low_geo",
    "exact_time",
    "estimated_time",
    "month",
    "is_battle",
    "is_vac",
];

impl EventSchema {
    /// The fixed 30-column conflict-event schema, identical across all
    /// windows. Immutable process-wide configuration.
    pub fn fixed() -> Self {
        use ColumnKind::*;
        let columns = [
            ("event_id_cnty", Text),
            ("event_date", Date),
            ("year", Integer),
            ("time_precision", Integer),
            ("disorder_type", Text),
            ("event_type", Categorical),
            ("sub_event_type", Categorical),
            ("actor1", Categorical),
            ("assoc_actor_1", Text),
            ("inter1", Text),
            ("actor2", Categorical),
            ("assoc_actor_2", Text),
            ("inter2", Text),
            ("interaction", Text),
            ("civilian_targeting", Text),
            ("iso", Text),
            ("region", Text),
            ("country", Text),
            ("admin1", Categorical),
            ("admin2", Categorical),
            ("admin3", Text),
            ("location", Text),
            ("latitude", Float),
            ("longitude", Float),
            ("geo_precision", Integer),
            ("source", Text),
            ("source_scale", Text),
            ("notes", Text),
            ("fatalities", Integer),
            ("tags", Text),
            ("timestamp", Text),
        ]
        .into_iter()
        .map(|(name, kind)| ColumnSpec {
            name: name.to_string(),
            kind,
        })
        .collect();
        Self { columns }
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|col| col.name.clone()).collect()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_schema_has_thirty_columns_in_contract_order() {
        let schema = EventSchema::fixed();
        assert_eq!(schema.columns.len(), FIXED_COLUMN_COUNT);
        assert_eq!(schema.columns[0].name, "event_id_cnty");
        assert_eq!(schema.columns[1].name, "event_date");
        assert_eq!(schema.columns[24].name, "geo_precision");
        assert_eq!(schema.columns[28].name, "fatalities");
        assert_eq!(schema.columns[29].name, "timestamp");
    }

    #[test]
    fn categorical_columns_are_part_of_the_fixed_schema() {
        let schema = EventSchema::fixed();
        for name in CATEGORICAL_COLUMNS {
            assert!(schema.contains(name), "missing categorical column {name}");
            let position = schema.position(name).unwrap();
            assert_eq!(schema.columns[position].kind, ColumnKind::Categorical);
        }
    }

    #[test]
    fn derived_columns_are_not_part_of_the_fixed_schema() {
        let schema = EventSchema::fixed();
        for name in DERIVED_COLUMNS {
            assert!(!schema.contains(name), "{name} must stay derived-only");
        }
    }
}
