//! Cleaning pipeline for windowed conflict-event extracts.
//!
//! Per window: load → enforce the fixed schema → normalize types →
//! normalize categoricals → derive analytic flags; then merge the windows
//! into one analysis-ready table and write it as CSV together with a
//! structured cleaning report. Cleaning always completes regardless of
//! validator findings; only a missing source file or an unparsable
//! `event_date` aborts the run.

pub mod categorical;
pub mod engine;
pub mod enforce;
pub mod errors;
pub mod flags;
pub mod loader;
pub mod merge;
pub mod model;
pub mod output;
pub mod types;

pub use engine::{CleaningEngine, CleaningResult};
pub use errors::CleanError;
pub use model::{
    CleanOptions, CleanWarning, CleaningReport, FallbackEvent, Readiness, WindowReport,
};
