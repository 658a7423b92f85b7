use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use eventprep_core::WindowLabel;

/// Options for the cleaning engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanOptions {
    /// Override for the configured output path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_path: Option<PathBuf>,
    /// Emit `cleaning_report.json` next to the output table.
    pub write_report: bool,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            out_path: None,
            write_report: true,
        }
    }
}

/// Recoverable cleaning diagnostic (schema gaps, merge postcondition).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanWarning {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window: Option<WindowLabel>,
    pub message: String,
}

/// A silent numeric substitution: an unparsable value replaced by its
/// documented default. Recorded for tests and the report, never warned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackEvent {
    pub window: WindowLabel,
    pub column: String,
    pub row: u64,
    pub raw: String,
    pub substituted: i64,
}

/// Per-window summary after normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowReport {
    pub window: WindowLabel,
    pub rows: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_columns: Vec<String>,
}

/// Final readiness checklist: an explicit gate, not a fatal check.
/// Downstream consumers may proceed on `ready == false` but are warned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Readiness {
    pub no_rows_dropped: bool,
    pub derived_columns_present: bool,
    pub ready: bool,
}

/// Report for a cleaning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningReport {
    pub run_id: String,
    pub windows: Vec<WindowReport>,
    pub total_rows: u64,
    pub pct_high_geo: f64,
    pub pct_exact_time: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<CleanWarning>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallbacks: Vec<FallbackEvent>,
    pub readiness: Readiness,
}
