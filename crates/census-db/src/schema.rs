use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::errors::DatabaseError;

/// The single census table.
pub const CENSUS_SCHEMA: &str = "
CREATE TABLE census (
 id integer primary key,
 name text,
 volume real,
 chernsimons real,
 triangulation blob)
";

/// Create the census table. Fails if the table is already there.
pub fn create_census(conn: &Connection) -> Result<(), DatabaseError> {
    let existing: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'census'",
            [],
            |row| row.get(0),
        )
        .optional()?;
    if existing.is_some() {
        return Err(DatabaseError::TableExists);
    }
    conn.execute_batch(CENSUS_SCHEMA)?;
    Ok(())
}

/// Open a fresh database file and create the census table in it.
///
/// Refuses to touch a file that already exists.
pub fn open_census(path: &Path) -> Result<Connection, DatabaseError> {
    if path.exists() {
        return Err(DatabaseError::AlreadyExists {
            path: path.display().to_string(),
        });
    }
    let conn = Connection::open(path)?;
    create_census(&conn)?;
    Ok(conn)
}
