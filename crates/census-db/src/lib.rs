//! One-shot census snapshot builder.
//!
//! Serializes every manifold of the engine's census into a single-table
//! SQLite store: `census(id, name, volume, chernsimons, triangulation)`.

pub mod builder;
pub mod errors;
pub mod schema;

pub use builder::{build_census, insert_row, BuildSummary, CensusRow, FailedRow};
pub use errors::DatabaseError;
pub use schema::{create_census, open_census, CENSUS_SCHEMA};
