//! Gym repository - typed access to the gym tables.
//!
//! Writes are validated before they reach SQLite so callers get a typed
//! error instead of a bare constraint failure. The schema constraints stay
//! authoritative: anything slipping past validation is still rejected by
//! the engine and surfaces as [`Error::Db`].

mod billing;
mod classes;
mod equipment;
mod members;

use crate::db::{Connection, DbPath, Schema};
use crate::error::{Error, Result};
use tracing::debug;

/// Repository over an initialized gym database.
pub struct GymRepository {
    conn: Connection,
}

impl GymRepository {
    /// Wrap an already opened connection. The schema must exist.
    pub fn new(conn: Connection) -> Result<Self> {
        Schema::ensure_initialized(&conn)?;
        Ok(Self { conn })
    }

    /// Open the database file at `path`.
    pub fn open(path: &DbPath) -> Result<Self> {
        if !path.exists() {
            return Err(Error::NotInitialized);
        }
        Self::new(Connection::open_path(path)?)
    }

    /// Open an in-memory database with a fresh, empty schema.
    pub fn open_in_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        Schema::init(&mut conn)?;
        Ok(Self { conn })
    }

    /// Get the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Consume the repository and return its connection.
    pub fn into_inner(self) -> Connection {
        self.conn
    }

    /// Check whether `table` holds a row whose `key` column equals `id`.
    /// Table and column names come from this module only.
    fn row_exists(&self, table: &str, key: &str, id: i64) -> Result<bool> {
        debug!(table, id, "checking existence");
        self.conn
            .exists(&format!("SELECT 1 FROM {table} WHERE {key} = ?1"), [id])
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::core::{ClassType, EquipmentType, NewClass, NewEquipment, NewMember};
    use chrono::NaiveDate;
    use rusqlite::params;

    pub fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    /// Repository with one instructor, two gyms and two plans.
    pub fn setup_repo() -> GymRepository {
        let repo = GymRepository::open_in_memory().unwrap();
        let conn = repo.conn();
        conn.execute(
            "INSERT INTO Instructor (name, specialty) VALUES (?1, ?2)",
            params!["Nina Patel", "Yoga"],
        )
        .unwrap();
        conn.execute("INSERT INTO GymFacility (location) VALUES ('Downtown')", [])
            .unwrap();
        conn.execute("INSERT INTO GymFacility (location) VALUES ('Northside')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO MembershipPlan (planType, cost) VALUES ('Monthly', 49.99)",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO MembershipPlan (planType, cost) VALUES ('Annual', 499.99)",
            [],
        )
        .unwrap();
        repo
    }

    pub fn new_member(email: &str) -> NewMember {
        NewMember {
            name: "Alice Johnson".to_string(),
            email: email.to_string(),
            phone: Some("555-0101".to_string()),
            address: Some("12 Oak Street".to_string()),
            age: 28,
            membership_start: date("2025-01-01"),
            membership_end: date("2025-12-31"),
        }
    }

    pub fn new_class(name: &str) -> NewClass {
        NewClass {
            name: name.to_string(),
            class_type: ClassType::Yoga,
            duration: 60,
            capacity: 20,
            instructor_id: 1,
            gym_id: 1,
        }
    }

    pub fn new_equipment(name: &str) -> NewEquipment {
        NewEquipment {
            name: name.to_string(),
            equipment_type: EquipmentType::Cardio,
            quantity: 4,
            gym_id: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_requires_schema() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(matches!(
            GymRepository::new(conn),
            Err(Error::NotInitialized)
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = DbPath::new(dir.path().join("missing.sqlite"));
        assert!(matches!(
            GymRepository::open(&path),
            Err(Error::NotInitialized)
        ));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_initialized_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = DbPath::new(dir.path().join("gym.sqlite"));
        {
            let mut conn = Connection::open_path(&path).unwrap();
            Schema::init(&mut conn).unwrap();
        }
        let repo = GymRepository::open(&path).unwrap();
        assert!(repo.list_members().unwrap().is_empty());
    }
}
