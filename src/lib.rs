//! # gymdb - XYZ Gym database
//!
//! The relational schema of a gym (members, classes, instructors, facilities,
//! equipment, plans, payments and attendance) stored in SQLite, with seed
//! fixtures, a typed repository and a command-line front end.

pub mod cli;
pub mod core;
pub mod db;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Class, ClassType, Equipment, EquipmentType, GymRepository, Member, MembershipPlan, Payment,
    PlanType,
};
pub use crate::db::{Connection, DbPath, Fixtures, Schema};
pub use crate::error::{Error, Result};
