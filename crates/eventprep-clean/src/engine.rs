use std::path::PathBuf;
use std::time::Instant;

use tracing::{info, warn};

use eventprep_core::{
    DERIVED_COLUMNS, EventSchema, FIXED_COLUMN_COUNT, PipelineConfig, Table, WindowLabel,
};

use crate::categorical::normalize_categoricals;
use crate::enforce::enforce_schema;
use crate::errors::CleanError;
use crate::flags::derive_flags;
use crate::loader::load_window_csv;
use crate::merge::merge_windows;
use crate::model::{CleanOptions, CleanWarning, CleaningReport, Readiness, WindowReport};
use crate::output::write_table_csv;
use crate::types::normalize_types;

/// Result of a cleaning run.
#[derive(Debug, Clone)]
pub struct CleaningResult {
    pub output_path: PathBuf,
    pub report_path: Option<PathBuf>,
    pub bytes_written: u64,
    pub report: CleaningReport,
    pub table: Table,
}

/// Entry point for cleaning and merging the three window extracts.
#[derive(Debug, Clone, Default)]
pub struct CleaningEngine {
    options: CleanOptions,
}

impl CleaningEngine {
    pub fn new(options: CleanOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, config: &PipelineConfig) -> Result<CleaningResult, CleanError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        let schema = EventSchema::fixed();

        let mut warnings = Vec::new();
        let mut fallbacks = Vec::new();
        let mut window_reports = Vec::new();
        let mut windows = Vec::new();

        info!(run_id = %run_id, "cleaning started");

        for label in WindowLabel::ALL {
            let path = &config.window(label).path;
            let raw = load_window_csv(path)?;
            let (mut table, missing_columns) =
                enforce_schema(&raw, &schema, label, &mut warnings);
            normalize_types(&mut table, label, &mut fallbacks)?;
            normalize_categoricals(&mut table);
            derive_flags(&mut table);

            info!(
                window = %label,
                rows = table.row_count(),
                missing_columns = missing_columns.len(),
                "window cleaned"
            );
            window_reports.push(WindowReport {
                window: label,
                rows: table.row_count() as u64,
                missing_columns,
            });
            windows.push((label, table));
        }

        let merged = merge_windows(windows, &mut warnings);
        let total_rows = merged.row_count() as u64;

        let readiness = readiness(&merged, &warnings);
        if !readiness.ready {
            warn!(
                no_rows_dropped = readiness.no_rows_dropped,
                derived_columns_present = readiness.derived_columns_present,
                "merged table is not ready for aggregation"
            );
        }

        let report = CleaningReport {
            run_id: run_id.clone(),
            windows: window_reports,
            total_rows,
            pct_high_geo: flag_share(&merged, "high_geo"),
            pct_exact_time: flag_share(&merged, "exact_time"),
            warnings,
            fallbacks,
            readiness,
        };

        let output_path = self
            .options
            .out_path
            .clone()
            .unwrap_or_else(|| config.output_path.clone());
        if let Some(parent) = output_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let bytes_written = write_table_csv(&output_path, &merged)?;

        let report_path = if self.options.write_report {
            let path = output_path
                .parent()
                .map(|parent| parent.join("cleaning_report.json"))
                .unwrap_or_else(|| PathBuf::from("cleaning_report.json"));
            std::fs::write(&path, serde_json::to_vec_pretty(&report)?)?;
            Some(path)
        } else {
            None
        };

        info!(
            run_id = %run_id,
            total_rows,
            bytes_written,
            duration_ms = start.elapsed().as_millis() as u64,
            ready = report.readiness.ready,
            "cleaning finished"
        );

        Ok(CleaningResult {
            output_path,
            report_path,
            bytes_written,
            report,
            table: merged,
        })
    }
}

fn readiness(merged: &Table, warnings: &[CleanWarning]) -> Readiness {
    let no_rows_dropped = !warnings.iter().any(|warning| warning.code == "rows_dropped");
    let derived_columns_present = merged.column_count() == FIXED_COLUMN_COUNT + DERIVED_COLUMNS.len()
        && merged.columns[FIXED_COLUMN_COUNT..]
            .iter()
            .zip(DERIVED_COLUMNS)
            .all(|(column, expected)| column == expected);
    Readiness {
        no_rows_dropped,
        derived_columns_present,
        ready: no_rows_dropped && derived_columns_present,
    }
}

fn flag_share(table: &Table, column: &str) -> f64 {
    if table.row_count() == 0 {
        return 0.0;
    }
    let Some(index) = table.column_index(column) else {
        return 0.0;
    };
    let hits = table
        .rows
        .iter()
        .filter(|row| row[index].as_bool() == Some(true))
        .count();
    hits as f64 / table.row_count() as f64 * 100.0
}
