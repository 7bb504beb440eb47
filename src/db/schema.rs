//! Table definitions and schema lifecycle.

use crate::db::Connection;
use crate::error::{Error, Result};
use serde::Serialize;
use tracing::info;

/// A table name together with its `CREATE TABLE` statement.
#[derive(Debug, Clone, Copy)]
pub struct TableDef {
    pub name: &'static str,
    pub ddl: &'static str,
}

const MEMBER: TableDef = TableDef {
    name: "Member",
    ddl: "CREATE TABLE Member (
    memberID INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    phone TEXT,
    address TEXT,
    age INTEGER NOT NULL CHECK (age >= 15),
    membershipStartDate TEXT NOT NULL,
    membershipEndDate TEXT NOT NULL,
    CHECK (membershipEndDate > membershipStartDate)
)",
};

const INSTRUCTOR: TableDef = TableDef {
    name: "Instructor",
    ddl: "CREATE TABLE Instructor (
    instructorID INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    specialty TEXT,
    phone TEXT,
    email TEXT
)",
};

const GYM_FACILITY: TableDef = TableDef {
    name: "GymFacility",
    ddl: "CREATE TABLE GymFacility (
    gymID INTEGER PRIMARY KEY AUTOINCREMENT,
    location TEXT NOT NULL,
    phone TEXT,
    manager TEXT
)",
};

const MEMBERSHIP_PLAN: TableDef = TableDef {
    name: "MembershipPlan",
    ddl: "CREATE TABLE MembershipPlan (
    planID INTEGER PRIMARY KEY AUTOINCREMENT,
    planType TEXT NOT NULL CHECK (planType IN ('Monthly', 'Annual')),
    cost REAL NOT NULL
)",
};

const CLASS: TableDef = TableDef {
    name: "Class",
    ddl: "CREATE TABLE Class (
    classID INTEGER PRIMARY KEY AUTOINCREMENT,
    className TEXT NOT NULL,
    classType TEXT NOT NULL CHECK (classType IN ('Yoga', 'Zumba', 'HIIT', 'Weights')),
    duration INTEGER NOT NULL,
    classCapacity INTEGER NOT NULL,
    instructorID INTEGER NOT NULL,
    gymID INTEGER NOT NULL,
    FOREIGN KEY (instructorID) REFERENCES Instructor(instructorID),
    FOREIGN KEY (gymID) REFERENCES GymFacility(gymID)
)",
};

const EQUIPMENT: TableDef = TableDef {
    name: "Equipment",
    ddl: "CREATE TABLE Equipment (
    equipmentID INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    classType TEXT NOT NULL CHECK (classType IN ('Cardio', 'Strength', 'Flexibility', 'Recovery')),
    quantity INTEGER NOT NULL CHECK (quantity > 0),
    gymID INTEGER NOT NULL,
    FOREIGN KEY (gymID) REFERENCES GymFacility(gymID)
)",
};

const PAYMENT: TableDef = TableDef {
    name: "Payment",
    ddl: "CREATE TABLE Payment (
    paymentID INTEGER PRIMARY KEY AUTOINCREMENT,
    memberID INTEGER NOT NULL,
    planID INTEGER NOT NULL,
    amountPaid REAL NOT NULL,
    paymentDate TEXT NOT NULL,
    FOREIGN KEY (memberID) REFERENCES Member(memberID) ON DELETE CASCADE,
    FOREIGN KEY (planID) REFERENCES MembershipPlan(planID)
)",
};

const ATTENDS: TableDef = TableDef {
    name: "Attends",
    ddl: "CREATE TABLE Attends (
    memberID INTEGER NOT NULL,
    classID INTEGER NOT NULL,
    attendanceDate TEXT NOT NULL,
    PRIMARY KEY (memberID, classID, attendanceDate),
    FOREIGN KEY (memberID) REFERENCES Member(memberID) ON DELETE CASCADE,
    FOREIGN KEY (classID) REFERENCES Class(classID)
)",
};

/// Indexes on the foreign key columns of the child tables.
const INDEXES: [&str; 7] = [
    "CREATE INDEX idx_class_instructor ON Class(instructorID)",
    "CREATE INDEX idx_class_gym ON Class(gymID)",
    "CREATE INDEX idx_equipment_gym ON Equipment(gymID)",
    "CREATE INDEX idx_payment_member ON Payment(memberID)",
    "CREATE INDEX idx_payment_plan ON Payment(planID)",
    "CREATE INDEX idx_attends_class ON Attends(classID)",
    "CREATE INDEX idx_attends_date ON Attends(attendanceDate)",
];

/// A row whose foreign key points at a missing parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyViolation {
    pub table: String,
    pub rowid: Option<i64>,
    pub parent: String,
}

/// Schema management.
pub struct Schema;

impl Schema {
    /// Tables in creation order: parents before children.
    pub const TABLES: [TableDef; 8] = [
        MEMBER,
        INSTRUCTOR,
        GYM_FACILITY,
        MEMBERSHIP_PLAN,
        CLASS,
        EQUIPMENT,
        PAYMENT,
        ATTENDS,
    ];

    /// Index statements created after the tables.
    pub fn indexes() -> &'static [&'static str] {
        &INDEXES
    }

    /// Table names in creation order.
    pub fn table_names() -> impl DoubleEndedIterator<Item = &'static str> {
        let tables: &'static [TableDef] = &Self::TABLES;
        tables.iter().map(|t| t.name)
    }

    /// Create all tables and indexes.
    ///
    /// Returns an error if any of the tables already exists.
    pub fn init(conn: &mut Connection) -> Result<()> {
        for name in Self::table_names() {
            if conn.table_exists(name)? {
                return Err(Error::AlreadyInitialized);
            }
        }

        let tx = conn.transaction()?;
        create_all(&tx)?;
        tx.commit()?;

        info!(tables = Self::TABLES.len(), "schema created");
        Ok(())
    }

    /// Check that every table of the schema exists.
    pub fn is_initialized(conn: &Connection) -> bool {
        Self::table_names().all(|name| conn.table_exists(name).unwrap_or(false))
    }

    /// Return an error unless the schema exists.
    pub fn ensure_initialized(conn: &Connection) -> Result<()> {
        if Self::is_initialized(conn) {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    /// Drop every table, children first, and reset the autoincrement sequence.
    pub fn drop_all(conn: &mut Connection) -> Result<()> {
        let tx = conn.transaction()?;
        for name in Self::table_names().rev() {
            tx.execute(&format!("DROP TABLE IF EXISTS {name}"), [])?;
        }
        let has_sequence = tx
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'sqlite_sequence'")?
            .exists([])?;
        if has_sequence {
            tx.execute("DELETE FROM sqlite_sequence", [])?;
        }
        tx.commit()?;

        info!("schema dropped");
        Ok(())
    }

    /// Drop and recreate the schema, leaving every table empty.
    ///
    /// Safe to run on an empty, partially created, or populated database.
    pub fn reset(conn: &mut Connection) -> Result<()> {
        Self::drop_all(conn)?;
        Self::init(conn)
    }

    /// Row count for each table, in creation order.
    pub fn row_counts(conn: &Connection) -> Result<Vec<(&'static str, i64)>> {
        Self::ensure_initialized(conn)?;
        Self::table_names()
            .map(|name| Ok((name, conn.row_count(name)?)))
            .collect()
    }

    /// Rows whose foreign keys do not resolve, as reported by SQLite.
    pub fn foreign_key_violations(conn: &Connection) -> Result<Vec<ForeignKeyViolation>> {
        conn.query("PRAGMA foreign_key_check", [], |row| {
            Ok(ForeignKeyViolation {
                table: row.get(0)?,
                rowid: row.get(1)?,
                parent: row.get(2)?,
            })
        })
    }
}

fn create_all(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    for table in &Schema::TABLES {
        conn.execute(table.ddl, [])?;
    }
    for index in Schema::indexes() {
        conn.execute(index, [])?;
    }
    Ok(())
}
