use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use eventprep_core::WindowLabel;

/// Options for the validation engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOptions {
    /// Output directory for artifacts; defaults next to the configured
    /// output table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<PathBuf>,
    /// Limit the number of findings listed in the rendered report.
    pub max_examples: usize,
    /// Emit `findings.json` with the full list of findings.
    pub write_findings: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            out_dir: None,
            max_examples: 20,
            write_findings: false,
        }
    }
}

/// Structured validation finding. Always advisory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

/// Inferred value kind of a raw column, used by the schema-consistency
/// pass. `Empty` means the column held no non-null values.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Empty,
    Integer,
    Float,
    Date,
    Text,
}

/// Per-column null tally; only columns with nulls are reported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnNullCount {
    pub column: String,
    pub nulls: u64,
}

/// Per-window completeness and duplication metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntegrityStats {
    pub window: WindowLabel,
    pub rows: u64,
    pub columns: u64,
    pub duplicate_event_ids: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_event_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_event_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub null_counts: Vec<ColumnNullCount>,
}

/// A column whose inferred kind disagrees with the reference window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindMismatch {
    pub column: String,
    pub reference: CellKind,
    pub observed: CellKind,
}

/// Comparison of one window against the reference window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaComparison {
    pub window: WindowLabel,
    pub columns_match: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra_columns: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub kind_mismatches: Vec<KindMismatch>,
}

/// Result of the schema-consistency pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConsistency {
    pub reference: WindowLabel,
    pub comparisons: Vec<SchemaComparison>,
    pub consistent: bool,
}

/// Per-window temporal sanity metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemporalStats {
    pub window: WindowLabel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_date: Option<NaiveDate>,
    pub out_of_window_rows: u64,
    pub year_mismatch_rows: u64,
    pub unparsable_dates: u64,
    pub time_precision_counts: BTreeMap<i64, u64>,
}

/// Share of one geo-precision code within a window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrecisionShare {
    pub code: i64,
    pub count: u64,
    pub pct: f64,
}

/// Per-window spatial precision shares for codes 1..=3.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpatialStats {
    pub window: WindowLabel,
    pub shares: Vec<PrecisionShare>,
}

/// Per-window fatality baseline metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FatalityStats {
    pub window: WindowLabel,
    pub events: u64,
    pub total_fatalities: f64,
    pub median_fatalities: f64,
    pub pct_zero_fatalities: f64,
}

/// Machine-readable metrics for a validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub metrics_version: String,
    pub run_id: String,
    pub integrity: Vec<IntegrityStats>,
    pub schema: SchemaConsistency,
    pub temporal: Vec<TemporalStats>,
    pub spatial: Vec<SpatialStats>,
    pub fatalities: Vec<FatalityStats>,
    pub findings_total: u64,
}
