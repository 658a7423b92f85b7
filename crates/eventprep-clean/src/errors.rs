use thiserror::Error;

/// Errors emitted by the cleaning engine.
#[derive(Debug, Error)]
pub enum CleanError {
    #[error(transparent)]
    Core(#[from] eventprep_core::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
