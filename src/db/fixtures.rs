//! Seed data: five rows per table with mutually consistent foreign keys.
//!
//! Rows carry explicit ids so that child rows can reference their parents
//! independent of insertion history.

use crate::db::{Connection, Schema};
use crate::error::{Error, Result};
use rusqlite::types::{Null, ToSql, ToSqlOutput};
use tracing::info;

/// A literal value in a seed row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeedValue {
    Int(i64),
    Real(f64),
    Text(&'static str),
    Null,
}

impl SeedValue {
    /// Render as an SQL literal.
    pub fn to_sql_literal(&self) -> String {
        match self {
            SeedValue::Int(v) => v.to_string(),
            SeedValue::Real(v) => format!("{v:?}"),
            SeedValue::Text(v) => format!("'{}'", v.replace('\'', "''")),
            SeedValue::Null => "NULL".to_string(),
        }
    }
}

impl ToSql for SeedValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match *self {
            SeedValue::Int(v) => ToSqlOutput::from(v),
            SeedValue::Real(v) => ToSqlOutput::from(v),
            SeedValue::Text(v) => ToSqlOutput::from(v),
            SeedValue::Null => ToSqlOutput::from(Null),
        })
    }
}

/// Seed rows for one table.
#[derive(Debug, Clone, Copy)]
pub struct FixtureTable {
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub rows: &'static [&'static [SeedValue]],
}

impl FixtureTable {
    /// `INSERT` statement with one positional placeholder per column.
    pub fn insert_sql(&self) -> String {
        let placeholders = (1..=self.columns.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({placeholders})",
            self.table,
            self.columns.join(", ")
        )
    }

    /// One `INSERT ... VALUES (...)` statement per row, literals inlined.
    pub fn insert_statements(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| {
                let values = row
                    .iter()
                    .map(SeedValue::to_sql_literal)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "INSERT INTO {} ({}) VALUES ({values});",
                    self.table,
                    self.columns.join(", ")
                )
            })
            .collect()
    }
}

use SeedValue::{Int, Real, Text};

const MEMBERS: FixtureTable = FixtureTable {
    table: "Member",
    columns: &[
        "memberID",
        "name",
        "email",
        "phone",
        "address",
        "age",
        "membershipStartDate",
        "membershipEndDate",
    ],
    rows: &[
        &[Int(1), Text("Alice Johnson"), Text("alice.johnson@example.com"), Text("555-0101"), Text("12 Oak Street"), Int(28), Text("2025-01-01"), Text("2025-12-31")],
        &[Int(2), Text("Brian Smith"), Text("brian.smith@example.com"), Text("555-0102"), Text("34 Pine Avenue"), Int(35), Text("2025-02-01"), Text("2025-03-01")],
        &[Int(3), Text("Carla Gomez"), Text("carla.gomez@example.com"), Text("555-0103"), Text("56 Maple Road"), Int(19), Text("2025-01-15"), Text("2026-01-15")],
        &[Int(4), Text("David O'Neil"), Text("david.oneil@example.com"), Text("555-0104"), Text("78 Birch Lane"), Int(42), Text("2025-03-01"), Text("2025-04-01")],
        &[Int(5), Text("Emma Brown"), Text("emma.brown@example.com"), Text("555-0105"), Text("90 Cedar Court"), Int(15), Text("2025-01-10"), Text("2026-01-10")],
    ],
};

const INSTRUCTORS: FixtureTable = FixtureTable {
    table: "Instructor",
    columns: &["instructorID", "name", "specialty", "phone", "email"],
    rows: &[
        &[Int(1), Text("Sarah Lin"), Text("Yoga"), Text("555-0201"), Text("sarah.lin@xyzgym.com")],
        &[Int(2), Text("Marcus Reed"), Text("HIIT"), Text("555-0202"), Text("marcus.reed@xyzgym.com")],
        &[Int(3), Text("Lena Park"), Text("Zumba"), Text("555-0203"), Text("lena.park@xyzgym.com")],
        &[Int(4), Text("Tom Becker"), Text("Weights"), Text("555-0204"), Text("tom.becker@xyzgym.com")],
        &[Int(5), Text("Nina Patel"), Text("Yoga"), Text("555-0205"), Text("nina.patel@xyzgym.com")],
    ],
};

const GYMS: FixtureTable = FixtureTable {
    table: "GymFacility",
    columns: &["gymID", "location", "phone", "manager"],
    rows: &[
        &[Int(1), Text("Downtown"), Text("555-0301"), Text("Olivia Grant")],
        &[Int(2), Text("Northside"), Text("555-0302"), Text("Ethan Cole")],
        &[Int(3), Text("Westfield"), Text("555-0303"), Text("Maya Singh")],
        &[Int(4), Text("Riverside"), Text("555-0304"), Text("Lucas Meyer")],
        &[Int(5), Text("Eastgate"), Text("555-0305"), Text("Grace Kim")],
    ],
};

const PLANS: FixtureTable = FixtureTable {
    table: "MembershipPlan",
    columns: &["planID", "planType", "cost"],
    rows: &[
        &[Int(1), Text("Monthly"), Real(49.99)],
        &[Int(2), Text("Annual"), Real(499.99)],
        &[Int(3), Text("Monthly"), Real(29.99)],
        &[Int(4), Text("Annual"), Real(299.99)],
        &[Int(5), Text("Monthly"), Real(79.99)],
    ],
};

const CLASSES: FixtureTable = FixtureTable {
    table: "Class",
    columns: &[
        "classID",
        "className",
        "classType",
        "duration",
        "classCapacity",
        "instructorID",
        "gymID",
    ],
    rows: &[
        &[Int(1), Text("Morning Flow"), Text("Yoga"), Int(60), Int(20), Int(1), Int(1)],
        &[Int(2), Text("Cardio Blast"), Text("HIIT"), Int(45), Int(15), Int(2), Int(2)],
        &[Int(3), Text("Dance Party"), Text("Zumba"), Int(50), Int(25), Int(3), Int(3)],
        &[Int(4), Text("Power Lifting"), Text("Weights"), Int(60), Int(10), Int(4), Int(4)],
        &[Int(5), Text("Evening Stretch"), Text("Yoga"), Int(30), Int(20), Int(5), Int(5)],
    ],
};

const EQUIPMENT: FixtureTable = FixtureTable {
    table: "Equipment",
    columns: &["equipmentID", "name", "classType", "quantity", "gymID"],
    rows: &[
        &[Int(1), Text("Treadmill"), Text("Cardio"), Int(10), Int(1)],
        &[Int(2), Text("Dumbbell Set"), Text("Strength"), Int(20), Int(2)],
        &[Int(3), Text("Yoga Mat"), Text("Flexibility"), Int(30), Int(3)],
        &[Int(4), Text("Foam Roller"), Text("Recovery"), Int(15), Int(4)],
        &[Int(5), Text("Rowing Machine"), Text("Cardio"), Int(5), Int(5)],
    ],
};

const PAYMENTS: FixtureTable = FixtureTable {
    table: "Payment",
    columns: &["paymentID", "memberID", "planID", "amountPaid", "paymentDate"],
    rows: &[
        &[Int(1), Int(1), Int(2), Real(499.99), Text("2025-01-01")],
        &[Int(2), Int(2), Int(1), Real(49.99), Text("2025-02-01")],
        &[Int(3), Int(3), Int(4), Real(299.99), Text("2025-01-15")],
        &[Int(4), Int(4), Int(5), Real(79.99), Text("2025-03-01")],
        &[Int(5), Int(5), Int(3), Real(29.99), Text("2025-01-10")],
    ],
};

const ATTENDS: FixtureTable = FixtureTable {
    table: "Attends",
    columns: &["memberID", "classID", "attendanceDate"],
    rows: &[
        &[Int(1), Int(1), Text("2025-03-03")],
        &[Int(2), Int(2), Text("2025-02-10")],
        &[Int(3), Int(3), Text("2025-03-05")],
        &[Int(4), Int(4), Text("2025-03-10")],
        &[Int(5), Int(1), Text("2025-03-03")],
    ],
};

/// Fixture loader.
pub struct Fixtures;

impl Fixtures {
    /// Seed rows for every table, parents first.
    pub const TABLES: [FixtureTable; 8] = [
        MEMBERS,
        INSTRUCTORS,
        GYMS,
        PLANS,
        CLASSES,
        EQUIPMENT,
        PAYMENTS,
        ATTENDS,
    ];

    /// Insert every seed row in a single transaction.
    ///
    /// The schema must exist and all tables must be empty. Returns the number
    /// of rows inserted.
    pub fn load(conn: &mut Connection) -> Result<usize> {
        Schema::ensure_initialized(conn)?;
        for fixture in &Self::TABLES {
            if conn.row_count(fixture.table)? > 0 {
                return Err(Error::NotEmpty(fixture.table));
            }
        }

        let tx = conn.transaction()?;
        let mut inserted = 0;
        for fixture in &Self::TABLES {
            let mut stmt = tx.prepare(&fixture.insert_sql())?;
            for row in fixture.rows {
                inserted += stmt.execute(rusqlite::params_from_iter(row.iter()))?;
            }
        }
        tx.commit()?;

        info!(rows = inserted, "fixtures loaded");
        Ok(inserted)
    }
}
