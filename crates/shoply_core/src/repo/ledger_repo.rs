//! Ledger repository contract and SQLite key-value implementation.
//!
//! # Responsibility
//! - Persist the whole ledger as one serialized blob under a fixed key.
//! - Round-trip the blob exactly: same items, same order, same numbers.
//!
//! # Invariants
//! - `load` re-validates deserialized items and surfaces corruption as
//!   `InvalidData` rather than handing out a broken ledger.
//! - `save` always writes the full ledger; there are no partial updates.

use crate::db::{migrations::latest_version, DbError};
use crate::model::ledger::Ledger;
use crate::model::stock_item::StockItem;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed key addressing the serialized ledger in the key-value store.
pub const LEDGER_STORE_KEY: &str = "stocks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for ledger persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    Serialization(serde_json::Error),
    InvalidData(String),
    UninitializedStore {
        expected_version: u32,
        actual_version: u32,
    },
    MissingStoreTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "ledger blob is not valid JSON: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted ledger data: {message}"),
            Self::UninitializedStore {
                expected_version,
                actual_version,
            } => write!(
                f,
                "store schema version {actual_version} does not match expected {expected_version}; \
                 open the connection through `open_store`"
            ),
            Self::MissingStoreTable(table) => write!(f, "store table `{table}` is missing"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_) => None,
            Self::UninitializedStore { .. } => None,
            Self::MissingStoreTable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Opaque persistence contract for the ledger.
pub trait LedgerRepository {
    /// Loads the persisted ledger, or `None` when nothing was ever saved.
    fn load(&self) -> RepoResult<Option<Ledger>>;
    /// Replaces the persisted ledger with the given state.
    fn save(&self, ledger: &Ledger) -> RepoResult<()>;
    /// Removes the persisted ledger entirely.
    fn clear(&self) -> RepoResult<()>;
}

/// SQLite-backed ledger repository over the `kv_store` table.
pub struct SqliteLedgerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteLedgerRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// Rejects connections that did not go through store bootstrap, so a
    /// misrouted connection fails here instead of at first query.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedStore {
                expected_version,
                actual_version,
            });
        }

        let table_present: u32 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'kv_store';",
            [],
            |row| row.get(0),
        )?;
        if table_present == 0 {
            return Err(RepoError::MissingStoreTable("kv_store"));
        }

        Ok(Self { conn })
    }
}

impl LedgerRepository for SqliteLedgerRepository<'_> {
    fn load(&self) -> RepoResult<Option<Ledger>> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [LEDGER_STORE_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(blob) = blob else {
            return Ok(None);
        };

        let items: Vec<StockItem> = serde_json::from_str(&blob)?;
        let ledger = Ledger::from_items(items)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;
        Ok(Some(ledger))
    }

    fn save(&self, ledger: &Ledger) -> RepoResult<()> {
        let blob = serde_json::to_string(ledger.items())?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![LEDGER_STORE_KEY, blob],
        )?;
        Ok(())
    }

    fn clear(&self) -> RepoResult<()> {
        self.conn.execute(
            "DELETE FROM kv_store WHERE key = ?1;",
            [LEDGER_STORE_KEY],
        )?;
        Ok(())
    }
}
