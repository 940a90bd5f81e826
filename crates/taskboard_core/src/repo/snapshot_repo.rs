//! Snapshot repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Save, load and clear one board snapshot per storage key.
//! - Keep the JSON payload encoding inside the repository boundary.
//!
//! # Invariants
//! - Storage keys are trimmed and must not be blank.
//! - `save` replaces any previous payload stored under the same key.
//! - Loaded payloads pass snapshot validation before they are returned.

use crate::board::snapshot::{BoardSnapshot, SnapshotError};
use crate::db::migrations::latest_version;
use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key used when the caller does not configure one.
pub const DEFAULT_STORAGE_KEY: &str = "taskboard";

/// Result type used by snapshot repository operations.
pub type SnapshotRepoResult<T> = Result<T, SnapshotRepoError>;

/// Errors from snapshot repository operations.
#[derive(Debug)]
pub enum SnapshotRepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Stored payload could not be encoded or decoded.
    Snapshot(SnapshotError),
    /// Storage key is blank after trim.
    InvalidStorageKey,
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
}

impl Display for SnapshotRepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Snapshot(err) => write!(f, "{err}"),
            Self::InvalidStorageKey => write!(f, "storage key must not be blank"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "snapshot repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "snapshot repository requires table `{table}`")
            }
        }
    }
}

impl Error for SnapshotRepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Snapshot(err) => Some(err),
            Self::InvalidStorageKey => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for SnapshotRepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SnapshotRepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<SnapshotError> for SnapshotRepoError {
    fn from(value: SnapshotError) -> Self {
        Self::Snapshot(value)
    }
}

/// Durable storage for board snapshots.
pub trait SnapshotRepository {
    /// Stores `snapshot` under `storage_key`, replacing any previous payload.
    fn save(&self, storage_key: &str, snapshot: &BoardSnapshot) -> SnapshotRepoResult<()>;
    /// Loads the snapshot stored under `storage_key`, if any.
    fn load(&self, storage_key: &str) -> SnapshotRepoResult<Option<BoardSnapshot>>;
    /// Removes the snapshot under `storage_key`; returns whether one existed.
    fn clear(&self, storage_key: &str) -> SnapshotRepoResult<bool>;
}

/// SQLite-backed snapshot repository.
pub struct SqliteSnapshotRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSnapshotRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> SnapshotRepoResult<Self> {
        ensure_snapshot_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl SnapshotRepository for SqliteSnapshotRepository<'_> {
    fn save(&self, storage_key: &str, snapshot: &BoardSnapshot) -> SnapshotRepoResult<()> {
        let key = normalize_storage_key(storage_key)?;
        let payload = snapshot.to_json()?;
        self.conn.execute(
            "INSERT INTO board_snapshots (storage_key, payload, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(storage_key) DO UPDATE SET
                payload = excluded.payload,
                updated_at = excluded.updated_at;",
            params![key, payload],
        )?;
        Ok(())
    }

    fn load(&self, storage_key: &str) -> SnapshotRepoResult<Option<BoardSnapshot>> {
        let key = normalize_storage_key(storage_key)?;
        let payload: Option<String> = self
            .conn
            .query_row(
                "SELECT payload
                 FROM board_snapshots
                 WHERE storage_key = ?1;",
                [key],
                |row| row.get(0),
            )
            .optional()?;

        match payload {
            Some(payload) => Ok(Some(BoardSnapshot::from_json(&payload)?)),
            None => Ok(None),
        }
    }

    fn clear(&self, storage_key: &str) -> SnapshotRepoResult<bool> {
        let key = normalize_storage_key(storage_key)?;
        let removed = self.conn.execute(
            "DELETE FROM board_snapshots WHERE storage_key = ?1;",
            [key],
        )?;
        Ok(removed > 0)
    }
}

/// Trims a storage key and rejects blank input.
pub fn normalize_storage_key(storage_key: &str) -> SnapshotRepoResult<&str> {
    let trimmed = storage_key.trim();
    if trimmed.is_empty() {
        return Err(SnapshotRepoError::InvalidStorageKey);
    }
    Ok(trimmed)
}

fn ensure_snapshot_connection_ready(conn: &Connection) -> SnapshotRepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(SnapshotRepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'board_snapshots'
        );",
        [],
        |row| row.get(0),
    )?;
    if exists != 1 {
        return Err(SnapshotRepoError::MissingRequiredTable("board_snapshots"));
    }
    Ok(())
}
