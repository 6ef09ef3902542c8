//! Row construction and batch insertion.

use std::fmt::Write as _;

use manifold_kernel::ManifoldEngine;
use rusqlite::{params, Connection};
use tracing::{info, instrument, warn};

use crate::errors::DatabaseError;

/// One census row, ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct CensusRow {
    pub name: String,
    pub volume: f64,
    /// Stored as SQL `NULL` when absent.
    pub chern_simons: Option<f64>,
    pub triangulation: Vec<u8>,
}

impl CensusRow {
    /// Read a manifold's name, invariants and serialized triangulation from the engine.
    pub fn from_engine(engine: &dyn ManifoldEngine, name: &str) -> Result<Self, DatabaseError> {
        let record = engine.record(name)?;
        Ok(Self {
            volume: record.volume,
            chern_simons: engine.chern_simons(name)?,
            triangulation: engine.to_bytes(name)?,
            name: record.name,
        })
    }

    /// The triangulation as a SQL hexadecimal blob literal, e.g. `X'4D4B01'`.
    pub fn triangulation_literal(&self) -> String {
        let mut out = String::with_capacity(3 + 2 * self.triangulation.len());
        out.push_str("X'");
        for byte in &self.triangulation {
            let _ = write!(out, "{byte:02X}");
        }
        out.push('\'');
        out
    }

    /// Insert statement for this row; the blob is inlined as a hex literal.
    pub fn insert_query(&self) -> String {
        format!(
            "INSERT INTO census (name, volume, chernsimons, triangulation) VALUES (?1, ?2, ?3, {})",
            self.triangulation_literal()
        )
    }
}

/// A row that could not be written.
#[derive(Debug, Clone)]
pub struct FailedRow {
    pub name: String,
    pub query: Option<String>,
    pub error: String,
}

/// Outcome of a census build.
#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    pub inserted: usize,
    pub failed: Vec<FailedRow>,
}

/// Insert one row.
pub fn insert_row(conn: &Connection, row: &CensusRow) -> Result<(), DatabaseError> {
    conn.execute(
        &row.insert_query(),
        params![row.name, row.volume, row.chern_simons],
    )?;
    Ok(())
}

/// Insert every census manifold of `engine` into the `census` table.
///
/// A row that fails is reported in the summary; the rest of the batch is
/// still written and committed.
#[instrument(skip(conn, engine))]
pub fn build_census(
    conn: &mut Connection,
    engine: &dyn ManifoldEngine,
) -> Result<BuildSummary, DatabaseError> {
    let tx = conn.transaction()?;
    let mut summary = BuildSummary::default();

    for name in engine.census() {
        let row = match CensusRow::from_engine(engine, &name) {
            Ok(row) => row,
            Err(e) => {
                warn!(%name, error = %e, "could not read manifold");
                summary.failed.push(FailedRow {
                    name,
                    query: None,
                    error: e.to_string(),
                });
                continue;
            }
        };
        match insert_row(&tx, &row) {
            Ok(()) => summary.inserted += 1,
            Err(e) => {
                warn!(%name, error = %e, "insert failed");
                summary.failed.push(FailedRow {
                    name,
                    query: Some(row.insert_query()),
                    error: e.to_string(),
                });
            }
        }
    }

    tx.commit()?;
    info!(
        inserted = summary.inserted,
        failed = summary.failed.len(),
        "census build complete"
    );
    Ok(summary)
}
