//! Tests for the census snapshot builder.

use census_db::*;
use manifold_kernel::census_kernel::decode_header;
use manifold_kernel::CensusKernel;
use rusqlite::Connection;

fn memory_census() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    create_census(&conn).unwrap();
    conn
}

#[test]
fn build_writes_one_row_per_manifold() {
    let mut conn = memory_census();
    let summary = build_census(&mut conn, &CensusKernel::new()).unwrap();
    assert_eq!(summary.inserted, 4);
    assert!(summary.failed.is_empty(), "failures: {:?}", summary.failed);

    let count: i64 = conn
        .query_row("SELECT count(*) FROM census", [], |r| r.get(0))
        .unwrap();
    assert_eq!(count, 4);
}

#[test]
fn ids_are_assigned_in_census_order() {
    let mut conn = memory_census();
    build_census(&mut conn, &CensusKernel::new()).unwrap();
    let mut stmt = conn.prepare("SELECT name FROM census ORDER BY id").unwrap();
    let names: Vec<String> = stmt
        .query_map([], |r| r.get(0))
        .unwrap()
        .map(|r| r.unwrap())
        .collect();
    assert_eq!(names, vec!["m003", "m004", "m125", "m129"]);
}

#[test]
fn missing_chern_simons_stored_as_null() {
    let mut conn = memory_census();
    build_census(&mut conn, &CensusKernel::new()).unwrap();
    let cs: Option<f64> = conn
        .query_row(
            "SELECT chernsimons FROM census WHERE name = 'm003'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(cs, None);
    let cs: Option<f64> = conn
        .query_row(
            "SELECT chernsimons FROM census WHERE name = 'm004'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(cs, Some(0.0));
}

#[test]
fn blob_decodes_to_engine_bytes() {
    let mut conn = memory_census();
    build_census(&mut conn, &CensusKernel::new()).unwrap();
    let blob: Vec<u8> = conn
        .query_row(
            "SELECT triangulation FROM census WHERE name = 'm125'",
            [],
            |r| r.get(0),
        )
        .unwrap();
    let header = decode_header(&blob).unwrap();
    assert_eq!(header.name, "m125");
    assert_eq!(header.num_tetrahedra, 4);
}

#[test]
fn failed_row_is_reported_without_aborting_batch() {
    let mut conn = memory_census();
    conn.execute_batch(
        "CREATE TRIGGER reject_m125 BEFORE INSERT ON census
         WHEN NEW.name = 'm125'
         BEGIN SELECT RAISE(ABORT, 'rejected'); END;",
    )
    .unwrap();

    let summary = build_census(&mut conn, &CensusKernel::new()).unwrap();
    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].name, "m125");
    assert!(summary.failed[0]
        .query
        .as_deref()
        .is_some_and(|q| q.contains("X'")));
}

#[test]
fn table_cannot_be_created_twice() {
    let conn = memory_census();
    assert!(matches!(create_census(&conn), Err(DatabaseError::TableExists)));
}

#[test]
fn existing_file_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("census.sqlite");
    let conn = open_census(&path).unwrap();
    drop(conn);
    assert!(matches!(
        open_census(&path),
        Err(DatabaseError::AlreadyExists { .. })
    ));
}
