use super::GymRepository;
use crate::core::{Member, MemberPlan, NewMember, Payment, PaymentDetails};
use crate::error::{Error, Result};
use rusqlite::params;
use tracing::info;

impl GymRepository {
    /// Insert a new member.
    pub fn add_member(&mut self, member: &NewMember) -> Result<Member> {
        member.validate()?;
        if self.email_exists(&member.email)? {
            return Err(Error::DuplicateEmail(member.email.clone()));
        }

        self.conn.execute(
            "INSERT INTO Member (name, email, phone, address, age, membershipStartDate, membershipEndDate)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                member.name,
                member.email,
                member.phone,
                member.address,
                member.age,
                member.membership_start,
                member.membership_end,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!(member_id = id, email = %member.email, "member added");
        self.get_member(id)
    }

    /// Insert a member together with their first payment, atomically.
    pub fn register_member(
        &mut self,
        member: &NewMember,
        payment: PaymentDetails,
    ) -> Result<(Member, Payment)> {
        member.validate()?;
        payment.validate()?;
        if self.email_exists(&member.email)? {
            return Err(Error::DuplicateEmail(member.email.clone()));
        }
        if !self.plan_exists(payment.plan_id)? {
            return Err(Error::PlanNotFound(payment.plan_id));
        }

        let (member_id, payment_id) = {
            let tx = self.conn.transaction()?;
            tx.execute(
                "INSERT INTO Member (name, email, phone, address, age, membershipStartDate, membershipEndDate)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    member.name,
                    member.email,
                    member.phone,
                    member.address,
                    member.age,
                    member.membership_start,
                    member.membership_end,
                ],
            )?;
            let member_id = tx.last_insert_rowid();

            let payment = payment.for_member(member_id);
            tx.execute(
                "INSERT INTO Payment (memberID, planID, amountPaid, paymentDate)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    payment.member_id,
                    payment.plan_id,
                    payment.amount_paid,
                    payment.payment_date,
                ],
            )?;
            let payment_id = tx.last_insert_rowid();
            tx.commit()?;
            (member_id, payment_id)
        };

        info!(member_id, payment_id, "member registered");
        Ok((self.get_member(member_id)?, self.get_payment(payment_id)?))
    }

    /// Replace every field of an existing member.
    pub fn update_member(&mut self, id: i64, member: &NewMember) -> Result<Member> {
        if !self.member_exists(id)? {
            return Err(Error::MemberNotFound(id));
        }
        member.validate()?;

        let taken = self.conn.exists(
            "SELECT 1 FROM Member WHERE email = ?1 AND memberID != ?2",
            params![member.email, id],
        )?;
        if taken {
            return Err(Error::DuplicateEmail(member.email.clone()));
        }

        self.conn.execute(
            "UPDATE Member
             SET name = ?1, email = ?2, phone = ?3, address = ?4, age = ?5,
                 membershipStartDate = ?6, membershipEndDate = ?7
             WHERE memberID = ?8",
            params![
                member.name,
                member.email,
                member.phone,
                member.address,
                member.age,
                member.membership_start,
                member.membership_end,
                id,
            ],
        )?;

        info!(member_id = id, "member updated");
        self.get_member(id)
    }

    /// Delete a member. Their payments and attendance go with them.
    pub fn delete_member(&mut self, id: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM Member WHERE memberID = ?1", [id])?;
        if deleted == 0 {
            return Err(Error::MemberNotFound(id));
        }
        info!(member_id = id, "member deleted");
        Ok(())
    }

    pub fn get_member(&self, id: i64) -> Result<Member> {
        self.conn
            .query_opt(
                &format!("SELECT {} FROM Member WHERE memberID = ?1", Member::COLUMNS),
                [id],
                Member::from_row,
            )?
            .ok_or(Error::MemberNotFound(id))
    }

    pub fn list_members(&self) -> Result<Vec<Member>> {
        self.conn.query(
            &format!("SELECT {} FROM Member ORDER BY memberID", Member::COLUMNS),
            [],
            Member::from_row,
        )
    }

    pub fn member_exists(&self, id: i64) -> Result<bool> {
        self.row_exists("Member", "memberID", id)
    }

    pub fn email_exists(&self, email: &str) -> Result<bool> {
        self.conn
            .exists("SELECT 1 FROM Member WHERE email = ?1", [email])
    }

    /// Members joined with the plans they paid for, one row per payment.
    pub fn members_with_plans(&self) -> Result<Vec<MemberPlan>> {
        self.conn.query(
            "SELECT m.memberID, m.name, m.email, m.age, mp.planID, mp.planType
             FROM Member m
             JOIN Payment p ON m.memberID = p.memberID
             JOIN MembershipPlan mp ON p.planID = mp.planID
             ORDER BY m.memberID, p.paymentDate",
            [],
            MemberPlan::from_row,
        )
    }
}
