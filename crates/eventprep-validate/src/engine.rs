use std::path::PathBuf;
use std::time::Instant;

use tracing::info;

use eventprep_clean::loader::load_window_csv;
use eventprep_core::{CONTRACT_VERSION, PipelineConfig, WindowLabel};

use crate::checks::{
    check_fatalities, check_integrity, check_schema_consistency, check_spatial_precision,
    check_temporal_sanity,
};
use crate::errors::ValidateError;
use crate::model::{Finding, ValidationOptions, ValidationReport};
use crate::report::render_report;

/// Result of a validation run.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub out_dir: PathBuf,
    pub metrics_path: PathBuf,
    pub report_path: PathBuf,
    pub findings_path: Option<PathBuf>,
    pub report: ValidationReport,
    pub rendered: String,
    pub findings: Vec<Finding>,
}

/// Runs the five diagnostic passes over the raw window tables.
///
/// Findings never fail the run; only missing source files and artifact
/// I/O propagate as errors.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    options: ValidationOptions,
}

impl ValidationEngine {
    pub fn new(options: ValidationOptions) -> Self {
        Self { options }
    }

    pub fn run(&self, config: &PipelineConfig) -> Result<ValidationResult, ValidateError> {
        let start = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();
        info!(run_id = %run_id, "validation started");

        let mut windows = Vec::new();
        for label in WindowLabel::ALL {
            let path = &config.window(label).path;
            let table = load_window_csv(path)?;
            info!(window = %label, rows = table.row_count(), "window loaded");
            windows.push((label, table));
        }

        let mut findings = Vec::new();
        let integrity = check_integrity(&windows, &mut findings);
        let schema = check_schema_consistency(&windows, &mut findings);
        let temporal = check_temporal_sanity(&windows, config, &mut findings);
        let spatial = check_spatial_precision(&windows, &mut findings);
        let fatalities = check_fatalities(&windows, &mut findings);

        let report = ValidationReport {
            metrics_version: CONTRACT_VERSION.to_string(),
            run_id: run_id.clone(),
            integrity,
            schema,
            temporal,
            spatial,
            fatalities,
            findings_total: findings.len() as u64,
        };
        let rendered = render_report(&report, &findings, self.options.max_examples);

        let out_dir = self.options.out_dir.clone().unwrap_or_else(|| {
            config
                .output_path
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."))
        });
        std::fs::create_dir_all(&out_dir)?;

        let metrics_path = out_dir.join("validation_metrics.json");
        std::fs::write(&metrics_path, serde_json::to_vec_pretty(&report)?)?;

        let report_path = out_dir.join("validation_report.md");
        std::fs::write(&report_path, rendered.as_bytes())?;

        let findings_path = if self.options.write_findings {
            let path = out_dir.join("findings.json");
            std::fs::write(&path, serde_json::to_vec_pretty(&findings)?)?;
            Some(path)
        } else {
            None
        };

        info!(
            run_id = %run_id,
            findings = report.findings_total,
            duration_ms = start.elapsed().as_millis() as u64,
            "validation finished"
        );

        Ok(ValidationResult {
            out_dir,
            metrics_path,
            report_path,
            findings_path,
            report,
            rendered,
            findings,
        })
    }
}
