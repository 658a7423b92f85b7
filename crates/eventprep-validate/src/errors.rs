use thiserror::Error;

/// Errors emitted by the validation engine. Validation findings are never
/// errors; only loading and artifact I/O can fail.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Core(#[from] eventprep_core::Error),
    #[error(transparent)]
    Load(#[from] eventprep_clean::CleanError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
