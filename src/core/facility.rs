//! Instructors and gym facilities.

use rusqlite::Row;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: i64,
    pub name: String,
    pub specialty: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl Instructor {
    pub const COLUMNS: &'static str = "instructorID, name, specialty, phone, email";

    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("instructorID")?,
            name: row.get("name")?,
            specialty: row.get("specialty")?,
            phone: row.get("phone")?,
            email: row.get("email")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GymFacility {
    pub id: i64,
    pub location: String,
    pub phone: Option<String>,
    pub manager: Option<String>,
}

impl GymFacility {
    pub const COLUMNS: &'static str = "gymID, location, phone, manager";

    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("gymID")?,
            location: row.get("location")?,
            phone: row.get("phone")?,
            manager: row.get("manager")?,
        })
    }
}
