//! Membership plans and payments.

use crate::core::PlanType;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// A priced subscription tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MembershipPlan {
    pub id: i64,
    pub plan_type: PlanType,
    pub cost: f64,
}

impl MembershipPlan {
    pub const COLUMNS: &'static str = "planID, planType, cost";

    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("planID")?,
            plan_type: row.get("planType")?,
            cost: row.get("cost")?,
        })
    }
}

/// A payment a member made for a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub member_id: i64,
    pub plan_id: i64,
    pub amount_paid: f64,
    pub payment_date: NaiveDate,
}

impl Payment {
    pub const COLUMNS: &'static str = "paymentID, memberID, planID, amountPaid, paymentDate";

    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("paymentID")?,
            member_id: row.get("memberID")?,
            plan_id: row.get("planID")?,
            amount_paid: row.get("amountPaid")?,
            payment_date: row.get("paymentDate")?,
        })
    }
}

/// Payment details without the member, used when registering a new member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentDetails {
    pub plan_id: i64,
    pub amount_paid: f64,
    pub payment_date: NaiveDate,
}

impl PaymentDetails {
    pub fn validate(&self) -> Result<()> {
        check_amount(self.amount_paid)
    }

    /// Attach the paying member.
    pub fn for_member(self, member_id: i64) -> NewPayment {
        NewPayment {
            member_id,
            plan_id: self.plan_id,
            amount_paid: self.amount_paid,
            payment_date: self.payment_date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub member_id: i64,
    pub plan_id: i64,
    pub amount_paid: f64,
    pub payment_date: NaiveDate,
}

impl NewPayment {
    pub fn validate(&self) -> Result<()> {
        check_amount(self.amount_paid)
    }
}

fn check_amount(amount: f64) -> Result<()> {
    if amount.is_nan() || amount <= 0.0 {
        return Err(Error::NotPositive {
            field: "amount paid",
            value: amount,
        });
    }
    Ok(())
}
