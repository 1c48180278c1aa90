use shoply_core::db::migrations::latest_version;
use shoply_core::db::{open_store, open_store_in_memory, DbError};
use shoply_core::{
    Ledger, LedgerRepository, RepoError, SqliteLedgerRepository, StockService, LEDGER_STORE_KEY,
};
use rusqlite::Connection;

fn sample_ledger() -> Ledger {
    let mut ledger = Ledger::new();
    ledger.add_item("Rice Bag", "Grains", 25000.0, 10).unwrap();
    ledger.add_item("Palm Oil", "Cooking", 1850.5, 12).unwrap();
    ledger.record_sale(0, 3).unwrap();
    ledger
}

#[test]
fn open_store_applies_migrations() {
    let conn = open_store_in_memory().unwrap();

    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_store'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn opening_store_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_store(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn save_then_load_round_trips_items_in_order() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteLedgerRepository::try_new(&conn).unwrap();

    let ledger = sample_ledger();
    repo.save(&ledger).unwrap();

    let loaded = repo.load().unwrap().unwrap();
    assert_eq!(loaded, ledger);
    assert_eq!(loaded.items()[0].name, "Rice Bag");
    assert_eq!(loaded.items()[1].price, 1850.5);
}

#[test]
fn load_returns_none_when_nothing_was_saved() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteLedgerRepository::try_new(&conn).unwrap();

    assert!(repo.load().unwrap().is_none());
}

#[test]
fn persisted_blob_tracks_every_mutation() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteLedgerRepository::try_new(&conn).unwrap();

    let mut ledger = Ledger::new();
    ledger.add_item("Rice Bag", "Grains", 25000.0, 10).unwrap();
    repo.save(&ledger).unwrap();
    assert_eq!(repo.load().unwrap().unwrap(), ledger);

    ledger.record_sale(0, 4).unwrap();
    repo.save(&ledger).unwrap();
    assert_eq!(repo.load().unwrap().unwrap(), ledger);

    ledger.reset();
    repo.save(&ledger).unwrap();
    assert_eq!(repo.load().unwrap().unwrap(), ledger);
}

#[test]
fn clear_removes_persisted_state() {
    let conn = open_store_in_memory().unwrap();
    let repo = SqliteLedgerRepository::try_new(&conn).unwrap();

    repo.save(&sample_ledger()).unwrap();
    repo.clear().unwrap();

    assert!(repo.load().unwrap().is_none());
    repo.clear().unwrap();
}

#[test]
fn file_backed_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shoply.db");
    let ledger = sample_ledger();

    {
        let conn = open_store(&path).unwrap();
        let repo = SqliteLedgerRepository::try_new(&conn).unwrap();
        repo.save(&ledger).unwrap();
    }

    let conn = open_store(&path).unwrap();
    let repo = SqliteLedgerRepository::try_new(&conn).unwrap();
    assert_eq!(repo.load().unwrap().unwrap(), ledger);
}

#[test]
fn malformed_blob_surfaces_as_serialization_error() {
    let conn = open_store_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2);",
        [LEDGER_STORE_KEY, "not json at all"],
    )
    .unwrap();

    let repo = SqliteLedgerRepository::try_new(&conn).unwrap();
    assert!(matches!(
        repo.load(),
        Err(RepoError::Serialization(_))
    ));
}

#[test]
fn well_formed_blob_with_invalid_items_surfaces_as_invalid_data() {
    let conn = open_store_in_memory().unwrap();
    let oversold =
        r#"[{"name":"Rice Bag","category":"Grains","price":25000.0,"quantity":2,"sold":5}]"#;
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2);",
        [LEDGER_STORE_KEY, oversold],
    )
    .unwrap();

    let repo = SqliteLedgerRepository::try_new(&conn).unwrap();
    assert!(matches!(repo.load(), Err(RepoError::InvalidData(_))));
}

#[test]
fn service_open_recovers_corrupt_state_to_empty_ledger() {
    let conn = open_store_in_memory().unwrap();
    conn.execute(
        "INSERT INTO kv_store (key, value) VALUES (?1, ?2);",
        [LEDGER_STORE_KEY, "{broken"],
    )
    .unwrap();

    let repo = SqliteLedgerRepository::try_new(&conn).unwrap();
    let service = StockService::open(repo);
    assert!(service.ledger().is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteLedgerRepository::try_new(&conn) {
        Err(RepoError::UninitializedStore {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized store error"),
    }
}

#[test]
fn repository_rejects_connection_without_store_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    assert!(matches!(
        SqliteLedgerRepository::try_new(&conn),
        Err(RepoError::MissingStoreTable("kv_store"))
    ));
}
