//! Error types for gymdb.

use chrono::NaiveDate;
use std::io;

/// Result type alias for gymdb operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for gymdb.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database error, including constraint violations raised by SQLite.
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database not initialized. Run `gymdb init` first")]
    NotInitialized,

    #[error("Database schema already exists. Use `gymdb reset` to recreate it")]
    AlreadyInitialized,

    /// Fixtures can only be loaded into empty tables.
    #[error("Table {0} already contains rows")]
    NotEmpty(&'static str),

    #[error("Member #{0} not found")]
    MemberNotFound(i64),

    #[error("Class #{0} not found")]
    ClassNotFound(i64),

    #[error("Equipment #{0} not found")]
    EquipmentNotFound(i64),

    #[error("Instructor #{0} not found")]
    InstructorNotFound(i64),

    #[error("Gym #{0} not found")]
    GymNotFound(i64),

    #[error("Membership plan #{0} not found")]
    PlanNotFound(i64),

    #[error("Invalid class type: {0} (expected one of Yoga, Zumba, HIIT, Weights)")]
    InvalidClassType(String),

    #[error("Invalid equipment type: {0} (expected one of Cardio, Strength, Flexibility, Recovery)")]
    InvalidEquipmentType(String),

    #[error("Invalid plan type: {0} (expected Monthly or Annual)")]
    InvalidPlanType(String),

    #[error("Members must be at least 15 years old, got {0}")]
    MemberTooYoung(i64),

    #[error("Membership end date {end} must be later than start date {start}")]
    InvalidMembershipPeriod { start: NaiveDate, end: NaiveDate },

    #[error("Email {0} is already associated with an existing member")]
    DuplicateEmail(String),

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("{0} cannot be empty")]
    EmptyField(&'static str),

    #[error("Cannot move the attendees of class #{0} onto itself")]
    SameClass(i64),

    /// Class still referenced by attendance rows.
    #[error("Class #{id} has {count} attendance record(s). Move them with --move-to first")]
    ClassHasAttendees { id: i64, count: i64 },
}

impl Error {
    /// True when the underlying SQLite error is a constraint violation.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::Db(rusqlite::Error::SqliteFailure(e, _))
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

/// Format a list of ids as a comma-separated string with # prefix.
pub fn format_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| format!("#{id}"))
        .collect::<Vec<_>>()
        .join(", ")
}
