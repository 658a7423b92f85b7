//! Core contracts shared across the eventprep crates.
//!
//! This crate defines the fixed conflict-event schema, the in-memory table
//! model, window labels and bounds, and the pipeline configuration passed
//! into the cleaning and validation engines.

pub mod config;
pub mod error;
pub mod schema;
pub mod table;
pub mod window;

pub use config::{PipelineConfig, WindowSpec};
pub use error::{Error, Result};
pub use schema::{
    CATEGORICAL_COLUMNS, ColumnKind, ColumnSpec, DERIVED_COLUMNS, EventSchema, FIXED_COLUMN_COUNT,
};
pub use table::{Cell, Table};
pub use window::{WindowBounds, WindowLabel};

/// Current contract version for pipeline artifacts (reports, metrics).
pub const CONTRACT_VERSION: &str = "0.1";
