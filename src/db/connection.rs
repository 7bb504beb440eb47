//! Database connection management.

use crate::error::{Error, Result};
use rusqlite::{Connection as SqliteConnection, OptionalExtension, Transaction};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default database filename, created in the working directory.
pub const DEFAULT_DB_FILE: &str = "XYZGym.sqlite";

/// Path to the gym database file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbPath {
    path: PathBuf,
}

impl DbPath {
    /// Create a DbPath with the default filename.
    pub fn default_path() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_FILE),
        }
    }

    /// Create a DbPath from a path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path as a reference.
    pub fn as_path(&self) -> &Path {
        &self.path
    }

    /// Check if the database file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl Default for DbPath {
    fn default() -> Self {
        Self::default_path()
    }
}

/// Database connection wrapper.
///
/// Every connection is opened with foreign key enforcement switched on,
/// since SQLite leaves it off by default.
pub struct Connection {
    conn: SqliteConnection,
}

impl Connection {
    /// Open a connection to the database at the given path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "opening database");
        let conn = SqliteConnection::open(path)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        debug!(journal_mode = %mode, "database opened");
        Ok(Self { conn })
    }

    /// Open the database described by a DbPath.
    pub fn open_path(path: &DbPath) -> Result<Self> {
        Self::open(path.as_path())
    }

    /// Open an in-memory database for testing.
    pub fn open_in_memory() -> Result<Self> {
        let conn = SqliteConnection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }

    /// Begin a new transaction.
    pub fn transaction(&mut self) -> Result<Transaction<'_>> {
        self.conn.transaction().map_err(Error::from)
    }

    /// Execute a statement and return the number of rows affected.
    pub fn execute<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<usize> {
        self.conn.execute(sql, params).map_err(Error::from)
    }

    /// Execute several semicolon-separated statements.
    pub fn execute_batch(&self, sql: &str) -> Result<()> {
        self.conn.execute_batch(sql).map_err(Error::from)
    }

    /// Query a single row.
    pub fn query_row<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<T>
    where
        P: rusqlite::Params,
        F: FnOnce(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        self.conn.query_row(sql, params, f).map_err(Error::from)
    }

    /// Query a single row that may not exist.
    pub fn query_opt<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Option<T>>
    where
        P: rusqlite::Params,
        F: FnOnce(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        self.conn
            .query_row(sql, params, f)
            .optional()
            .map_err(Error::from)
    }

    /// Query multiple rows.
    pub fn query<T, P, F>(&self, sql: &str, params: P, f: F) -> Result<Vec<T>>
    where
        P: rusqlite::Params,
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, f)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Check whether a query returns at least one row.
    pub fn exists<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<bool> {
        let mut stmt = self.conn.prepare(sql)?;
        stmt.exists(params).map_err(Error::from)
    }

    /// Check if a table exists.
    pub fn table_exists(&self, table_name: &str) -> Result<bool> {
        self.exists(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table_name],
        )
    }

    /// Count the rows of a table. The name must come from a trusted list.
    pub fn row_count(&self, table_name: &str) -> Result<i64> {
        self.query_row(
            &format!("SELECT COUNT(*) FROM \"{table_name}\""),
            [],
            |row| row.get(0),
        )
    }

    /// Get the last inserted row id.
    pub fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema::Schema;

    #[test]
    fn test_db_path_default() {
        let path = DbPath::default_path();
        assert_eq!(path.as_path(), Path::new("XYZGym.sqlite"));
        assert_eq!(DbPath::default(), path);
    }

    #[test]
    fn test_db_path_exists() {
        let path = DbPath::new("nonexistent.sqlite");
        assert!(!path.exists());

        let temp = tempfile::NamedTempFile::new().unwrap();
        let existing = DbPath::new(temp.path());
        assert!(existing.exists());
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        let fk: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(fk, 1);
    }

    #[test]
    fn test_open_file_enables_wal() {
        let dir = tempfile::TempDir::new().unwrap();
        let conn = Connection::open(dir.path().join("gym.sqlite")).unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_table_exists_and_row_count() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert!(!conn.table_exists("Member").unwrap());

        Schema::init(&mut conn).unwrap();
        assert!(conn.table_exists("Member").unwrap());
        assert_eq!(conn.row_count("Member").unwrap(), 0);
    }

    #[test]
    fn test_transaction_rollback() {
        let mut conn = Connection::open_in_memory().unwrap();
        Schema::init(&mut conn).unwrap();

        {
            let tx = conn.transaction().unwrap();
            tx.execute(
                "INSERT INTO MembershipPlan (planType, cost) VALUES (?1, ?2)",
                rusqlite::params!["Monthly", 49.99],
            )
            .unwrap();
            drop(tx);
        }

        assert_eq!(conn.row_count("MembershipPlan").unwrap(), 0);
    }

    #[test]
    fn test_query_opt() {
        let mut conn = Connection::open_in_memory().unwrap();
        Schema::init(&mut conn).unwrap();

        let missing: Option<i64> = conn
            .query_opt("SELECT planID FROM MembershipPlan WHERE planID = 1", [], |r| {
                r.get(0)
            })
            .unwrap();
        assert!(missing.is_none());
    }
}
