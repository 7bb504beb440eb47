use super::GymRepository;
use crate::core::{GymFacility, Instructor, MembershipPlan, NewPayment, Payment};
use crate::error::{Error, Result};
use rusqlite::params;
use tracing::info;

impl GymRepository {
    pub fn list_plans(&self) -> Result<Vec<MembershipPlan>> {
        self.conn.query(
            &format!(
                "SELECT {} FROM MembershipPlan ORDER BY planID",
                MembershipPlan::COLUMNS
            ),
            [],
            MembershipPlan::from_row,
        )
    }

    pub fn get_plan(&self, id: i64) -> Result<MembershipPlan> {
        self.conn
            .query_opt(
                &format!(
                    "SELECT {} FROM MembershipPlan WHERE planID = ?1",
                    MembershipPlan::COLUMNS
                ),
                [id],
                MembershipPlan::from_row,
            )?
            .ok_or(Error::PlanNotFound(id))
    }

    pub fn plan_exists(&self, id: i64) -> Result<bool> {
        self.row_exists("MembershipPlan", "planID", id)
    }

    pub fn plan_ids(&self) -> Result<Vec<i64>> {
        self.conn
            .query("SELECT planID FROM MembershipPlan ORDER BY planID", [], |r| {
                r.get(0)
            })
    }

    pub fn add_payment(&mut self, payment: &NewPayment) -> Result<Payment> {
        payment.validate()?;
        if !self.member_exists(payment.member_id)? {
            return Err(Error::MemberNotFound(payment.member_id));
        }
        if !self.plan_exists(payment.plan_id)? {
            return Err(Error::PlanNotFound(payment.plan_id));
        }

        self.conn.execute(
            "INSERT INTO Payment (memberID, planID, amountPaid, paymentDate)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                payment.member_id,
                payment.plan_id,
                payment.amount_paid,
                payment.payment_date,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!(payment_id = id, member_id = payment.member_id, "payment recorded");
        self.get_payment(id)
    }

    pub fn get_payment(&self, id: i64) -> Result<Payment> {
        self.conn.query_row(
            &format!("SELECT {} FROM Payment WHERE paymentID = ?1", Payment::COLUMNS),
            [id],
            Payment::from_row,
        )
    }

    pub fn list_payments(&self) -> Result<Vec<Payment>> {
        self.conn.query(
            &format!("SELECT {} FROM Payment ORDER BY paymentID", Payment::COLUMNS),
            [],
            Payment::from_row,
        )
    }

    pub fn list_instructors(&self) -> Result<Vec<Instructor>> {
        self.conn.query(
            &format!(
                "SELECT {} FROM Instructor ORDER BY instructorID",
                Instructor::COLUMNS
            ),
            [],
            Instructor::from_row,
        )
    }

    pub fn instructor_exists(&self, id: i64) -> Result<bool> {
        self.row_exists("Instructor", "instructorID", id)
    }

    pub fn list_gyms(&self) -> Result<Vec<GymFacility>> {
        self.conn.query(
            &format!("SELECT {} FROM GymFacility ORDER BY gymID", GymFacility::COLUMNS),
            [],
            GymFacility::from_row,
        )
    }

    pub fn gym_exists(&self, id: i64) -> Result<bool> {
        self.row_exists("GymFacility", "gymID", id)
    }
}
