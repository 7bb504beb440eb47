use super::GymRepository;
use crate::core::{Attendance, Class, ClassAttendance, NewClass, RosterEntry};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use rusqlite::params;
use tracing::info;

impl GymRepository {
    pub fn add_class(&mut self, class: &NewClass) -> Result<Class> {
        class.validate()?;
        self.check_class_refs(class)?;

        self.conn.execute(
            "INSERT INTO Class (className, classType, duration, classCapacity, instructorID, gymID)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                class.name,
                class.class_type,
                class.duration,
                class.capacity,
                class.instructor_id,
                class.gym_id,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!(class_id = id, name = %class.name, "class added");
        self.get_class(id)
    }

    pub fn update_class(&mut self, id: i64, class: &NewClass) -> Result<Class> {
        if !self.class_exists(id)? {
            return Err(Error::ClassNotFound(id));
        }
        class.validate()?;
        self.check_class_refs(class)?;

        self.conn.execute(
            "UPDATE Class
             SET className = ?1, classType = ?2, duration = ?3, classCapacity = ?4,
                 instructorID = ?5, gymID = ?6
             WHERE classID = ?7",
            params![
                class.name,
                class.class_type,
                class.duration,
                class.capacity,
                class.instructor_id,
                class.gym_id,
                id,
            ],
        )?;

        info!(class_id = id, "class updated");
        self.get_class(id)
    }

    /// Delete a class nobody has attended.
    pub fn delete_class(&mut self, id: i64) -> Result<()> {
        if !self.class_exists(id)? {
            return Err(Error::ClassNotFound(id));
        }
        let count = self.class_attendee_count(id)?;
        if count > 0 {
            return Err(Error::ClassHasAttendees { id, count });
        }

        self.conn
            .execute("DELETE FROM Class WHERE classID = ?1", [id])?;
        info!(class_id = id, "class deleted");
        Ok(())
    }

    /// Re-point every attendance record of class `from` to class `to`.
    ///
    /// Records that would duplicate an existing `(member, to, date)` row are
    /// dropped. Returns the number of records moved.
    pub fn move_attendees(&mut self, from: i64, to: i64) -> Result<usize> {
        self.check_move(from, to)?;

        let tx = self.conn.transaction()?;
        let moved = move_attendees_in(&tx, from, to)?;
        tx.commit()?;

        info!(from, to, moved, "attendees moved");
        Ok(moved)
    }

    /// Move the attendees of `id` to `to`, then delete `id`, atomically.
    pub fn delete_class_moving_attendees(&mut self, id: i64, to: i64) -> Result<usize> {
        self.check_move(id, to)?;

        let tx = self.conn.transaction()?;
        let moved = move_attendees_in(&tx, id, to)?;
        tx.execute("DELETE FROM Class WHERE classID = ?1", [id])?;
        tx.commit()?;

        info!(class_id = id, to, moved, "class deleted after moving attendees");
        Ok(moved)
    }

    pub fn get_class(&self, id: i64) -> Result<Class> {
        self.conn
            .query_opt(
                &format!("SELECT {} FROM Class WHERE classID = ?1", Class::COLUMNS),
                [id],
                Class::from_row,
            )?
            .ok_or(Error::ClassNotFound(id))
    }

    pub fn list_classes(&self) -> Result<Vec<Class>> {
        self.conn.query(
            &format!("SELECT {} FROM Class ORDER BY classID", Class::COLUMNS),
            [],
            Class::from_row,
        )
    }

    pub fn class_exists(&self, id: i64) -> Result<bool> {
        self.row_exists("Class", "classID", id)
    }

    /// Number of attendance records referencing a class.
    pub fn class_attendee_count(&self, id: i64) -> Result<i64> {
        self.conn.query_row(
            "SELECT COUNT(*) FROM Attends WHERE classID = ?1",
            [id],
            |row| row.get(0),
        )
    }

    /// Every class with its attendance count, including classes with none.
    pub fn classes_with_attendance(&self) -> Result<Vec<ClassAttendance>> {
        self.conn.query(
            "SELECT c.classID, c.className, c.classType, c.duration, c.classCapacity,
                    COUNT(a.memberID) AS attendees
             FROM Class c
             LEFT JOIN Attends a ON c.classID = a.classID
             GROUP BY c.classID
             ORDER BY c.classID",
            [],
            ClassAttendance::from_row,
        )
    }

    /// Members who attended a class, earliest attendance first.
    pub fn class_roster(&self, id: i64) -> Result<Vec<RosterEntry>> {
        if !self.class_exists(id)? {
            return Err(Error::ClassNotFound(id));
        }
        self.conn.query(
            "SELECT m.memberID, m.name, m.email, a.attendanceDate
             FROM Member m
             INNER JOIN Attends a ON m.memberID = a.memberID
             WHERE a.classID = ?1
             ORDER BY a.attendanceDate, m.memberID",
            [id],
            RosterEntry::from_row,
        )
    }

    /// Record that a member attended a class on a day.
    pub fn record_attendance(
        &mut self,
        member_id: i64,
        class_id: i64,
        date: NaiveDate,
    ) -> Result<Attendance> {
        if !self.member_exists(member_id)? {
            return Err(Error::MemberNotFound(member_id));
        }
        if !self.class_exists(class_id)? {
            return Err(Error::ClassNotFound(class_id));
        }

        self.conn.execute(
            "INSERT INTO Attends (memberID, classID, attendanceDate) VALUES (?1, ?2, ?3)",
            params![member_id, class_id, date],
        )?;

        info!(member_id, class_id, %date, "attendance recorded");
        Ok(Attendance {
            member_id,
            class_id,
            date,
        })
    }

    pub fn list_attendance(&self) -> Result<Vec<Attendance>> {
        self.conn.query(
            "SELECT memberID, classID, attendanceDate FROM Attends
             ORDER BY attendanceDate, classID, memberID",
            [],
            Attendance::from_row,
        )
    }

    fn check_class_refs(&self, class: &NewClass) -> Result<()> {
        if !self.instructor_exists(class.instructor_id)? {
            return Err(Error::InstructorNotFound(class.instructor_id));
        }
        if !self.gym_exists(class.gym_id)? {
            return Err(Error::GymNotFound(class.gym_id));
        }
        Ok(())
    }

    fn check_move(&self, from: i64, to: i64) -> Result<()> {
        if from == to {
            return Err(Error::SameClass(from));
        }
        for id in [from, to] {
            if !self.class_exists(id)? {
                return Err(Error::ClassNotFound(id));
            }
        }
        Ok(())
    }
}

fn move_attendees_in(conn: &rusqlite::Connection, from: i64, to: i64) -> rusqlite::Result<usize> {
    let moved = conn.execute(
        "UPDATE OR IGNORE Attends SET classID = ?1 WHERE classID = ?2",
        params![to, from],
    )?;
    // rows left behind were already present on the target class
    conn.execute("DELETE FROM Attends WHERE classID = ?1", [from])?;
    Ok(moved)
}
