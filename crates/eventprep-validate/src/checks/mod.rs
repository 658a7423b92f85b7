//! The five read-only diagnostic passes.

pub mod fatalities;
pub mod integrity;
pub mod schema;
pub mod spatial;
pub mod temporal;

pub use fatalities::check_fatalities;
pub use integrity::check_integrity;
pub use schema::check_schema_consistency;
pub use spatial::check_spatial_precision;
pub use temporal::check_temporal_sanity;
