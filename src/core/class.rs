//! Class and attendance models.

use crate::core::ClassType;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A scheduled group activity led by an instructor at a gym.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub class_type: ClassType,
    /// Length in minutes.
    pub duration: i64,
    pub capacity: i64,
    pub instructor_id: i64,
    pub gym_id: i64,
}

impl Class {
    pub const COLUMNS: &'static str =
        "classID, className, classType, duration, classCapacity, instructorID, gymID";

    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("classID")?,
            name: row.get("className")?,
            class_type: row.get("classType")?,
            duration: row.get("duration")?,
            capacity: row.get("classCapacity")?,
            instructor_id: row.get("instructorID")?,
            gym_id: row.get("gymID")?,
        })
    }
}

/// Input for creating or replacing a class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClass {
    pub name: String,
    pub class_type: ClassType,
    pub duration: i64,
    pub capacity: i64,
    pub instructor_id: i64,
    pub gym_id: i64,
}

impl NewClass {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyField("class name"));
        }
        if self.duration <= 0 {
            return Err(Error::NotPositive {
                field: "duration",
                value: self.duration as f64,
            });
        }
        if self.capacity <= 0 {
            return Err(Error::NotPositive {
                field: "capacity",
                value: self.capacity as f64,
            });
        }
        Ok(())
    }
}

/// A class with the number of attendance records pointing at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassAttendance {
    pub id: i64,
    pub name: String,
    pub class_type: ClassType,
    pub duration: i64,
    pub capacity: i64,
    pub attendees: i64,
}

impl ClassAttendance {
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("classID")?,
            name: row.get("className")?,
            class_type: row.get("classType")?,
            duration: row.get("duration")?,
            capacity: row.get("classCapacity")?,
            attendees: row.get("attendees")?,
        })
    }
}

/// One row of the Attends join table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attendance {
    pub member_id: i64,
    pub class_id: i64,
    pub date: NaiveDate,
}

impl Attendance {
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            member_id: row.get("memberID")?,
            class_id: row.get("classID")?,
            date: row.get("attendanceDate")?,
        })
    }
}

/// A member who attended a given class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub member_id: i64,
    pub name: String,
    pub email: String,
    pub date: NaiveDate,
}

impl RosterEntry {
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            member_id: row.get("memberID")?,
            name: row.get("name")?,
            email: row.get("email")?,
            date: row.get("attendanceDate")?,
        })
    }
}
