//! Member model.

use crate::error::{Error, Result};
use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Minimum age accepted for a member.
pub const MIN_MEMBER_AGE: i64 = 15;

/// A gym customer holding a time-bounded membership.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub age: i64,
    pub membership_start: NaiveDate,
    pub membership_end: NaiveDate,
}

impl Member {
    pub const COLUMNS: &'static str = "memberID, name, email, phone, address, age, \
         membershipStartDate, membershipEndDate";

    /// Create a Member from a row selected with [`Member::COLUMNS`].
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("memberID")?,
            name: row.get("name")?,
            email: row.get("email")?,
            phone: row.get("phone")?,
            address: row.get("address")?,
            age: row.get("age")?,
            membership_start: row.get("membershipStartDate")?,
            membership_end: row.get("membershipEndDate")?,
        })
    }

    /// Whether the membership covers the given day.
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.membership_start <= day && day <= self.membership_end
    }
}

/// Input for creating or replacing a member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub age: i64,
    pub membership_start: NaiveDate,
    pub membership_end: NaiveDate,
}

impl NewMember {
    /// Check the rules the Member table enforces, before touching the database.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(Error::EmptyField("email"));
        }
        if self.age < MIN_MEMBER_AGE {
            return Err(Error::MemberTooYoung(self.age));
        }
        if self.membership_end <= self.membership_start {
            return Err(Error::InvalidMembershipPeriod {
                start: self.membership_start,
                end: self.membership_end,
            });
        }
        Ok(())
    }
}

/// A member together with a plan they paid for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberPlan {
    pub member_id: i64,
    pub name: String,
    pub email: String,
    pub age: i64,
    pub plan_id: i64,
    pub plan_type: crate::core::PlanType,
}

impl MemberPlan {
    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            member_id: row.get("memberID")?,
            name: row.get("name")?,
            email: row.get("email")?,
            age: row.get("age")?,
            plan_id: row.get("planID")?,
            plan_type: row.get("planType")?,
        })
    }
}
