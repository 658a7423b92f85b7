//! Advisory validation suite for the windowed conflict-event extracts.
//!
//! Five independent, read-only diagnostic passes over the raw per-window
//! tables: integrity, schema consistency, temporal sanity, spatial
//! precision, and the fatalities baseline. Passes never mutate data and
//! never abort the pipeline; they produce structured findings rendered to
//! a deterministic markdown report and a machine-readable metrics file.

pub mod checks;
pub mod engine;
pub mod errors;
pub mod model;
pub mod report;

pub use engine::{ValidationEngine, ValidationResult};
pub use errors::ValidateError;
pub use model::{Finding, ValidationOptions, ValidationReport};
