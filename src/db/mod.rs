//! Database layer for gymdb.
//!
//! Handles the SQLite connection, the table definitions, seed data and the
//! SQL script export.

mod connection;
pub mod fixtures;
pub mod schema;
pub mod script;

pub use connection::{Connection, DbPath, DEFAULT_DB_FILE};
pub use fixtures::{FixtureTable, Fixtures, SeedValue};
pub use schema::{ForeignKeyViolation, Schema, TableDef};
