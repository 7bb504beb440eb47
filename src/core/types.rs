//! Checked enumerations stored as text columns.
//!
//! Each variant maps to exactly one string accepted by the matching
//! `CHECK (... IN (...))` clause of the schema.

use crate::error::Error;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a group class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassType {
    Yoga,
    Zumba,
    #[serde(rename = "HIIT")]
    Hiit,
    Weights,
}

impl ClassType {
    pub const ALL: [ClassType; 4] = [
        ClassType::Yoga,
        ClassType::Zumba,
        ClassType::Hiit,
        ClassType::Weights,
    ];

    /// Convert to string for database storage.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassType::Yoga => "Yoga",
            ClassType::Zumba => "Zumba",
            ClassType::Hiit => "HIIT",
            ClassType::Weights => "Weights",
        }
    }
}

impl FromStr for ClassType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Yoga" => Ok(ClassType::Yoga),
            "Zumba" => Ok(ClassType::Zumba),
            "HIIT" => Ok(ClassType::Hiit),
            "Weights" => Ok(ClassType::Weights),
            _ => Err(Error::InvalidClassType(s.to_string())),
        }
    }
}

/// Category of a piece of equipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentType {
    Cardio,
    Strength,
    Flexibility,
    Recovery,
}

impl EquipmentType {
    pub const ALL: [EquipmentType; 4] = [
        EquipmentType::Cardio,
        EquipmentType::Strength,
        EquipmentType::Flexibility,
        EquipmentType::Recovery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentType::Cardio => "Cardio",
            EquipmentType::Strength => "Strength",
            EquipmentType::Flexibility => "Flexibility",
            EquipmentType::Recovery => "Recovery",
        }
    }
}

impl FromStr for EquipmentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cardio" => Ok(EquipmentType::Cardio),
            "Strength" => Ok(EquipmentType::Strength),
            "Flexibility" => Ok(EquipmentType::Flexibility),
            "Recovery" => Ok(EquipmentType::Recovery),
            _ => Err(Error::InvalidEquipmentType(s.to_string())),
        }
    }
}

/// Billing period of a membership plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanType {
    Monthly,
    Annual,
}

impl PlanType {
    pub const ALL: [PlanType; 2] = [PlanType::Monthly, PlanType::Annual];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Monthly => "Monthly",
            PlanType::Annual => "Annual",
        }
    }
}

impl FromStr for PlanType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Monthly" => Ok(PlanType::Monthly),
            "Annual" => Ok(PlanType::Annual),
            _ => Err(Error::InvalidPlanType(s.to_string())),
        }
    }
}

macro_rules! text_column {
    ($($ty:ty),+) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ToSql for $ty {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl FromSql for $ty {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e: Error| FromSqlError::Other(Box::new(e)))
            }
        }
    )+};
}

text_column!(ClassType, EquipmentType, PlanType);
