use super::GymRepository;
use crate::core::{Equipment, NewEquipment};
use crate::error::{Error, Result};
use rusqlite::params;
use tracing::info;

impl GymRepository {
    pub fn add_equipment(&mut self, item: &NewEquipment) -> Result<Equipment> {
        item.validate()?;
        if !self.gym_exists(item.gym_id)? {
            return Err(Error::GymNotFound(item.gym_id));
        }

        self.conn.execute(
            "INSERT INTO Equipment (name, classType, quantity, gymID) VALUES (?1, ?2, ?3, ?4)",
            params![item.name, item.equipment_type, item.quantity, item.gym_id],
        )?;

        let id = self.conn.last_insert_rowid();
        info!(equipment_id = id, name = %item.name, "equipment added");
        self.get_equipment(id)
    }

    pub fn update_equipment(&mut self, id: i64, item: &NewEquipment) -> Result<Equipment> {
        if !self.equipment_exists(id)? {
            return Err(Error::EquipmentNotFound(id));
        }
        item.validate()?;
        if !self.gym_exists(item.gym_id)? {
            return Err(Error::GymNotFound(item.gym_id));
        }

        self.conn.execute(
            "UPDATE Equipment SET name = ?1, classType = ?2, quantity = ?3, gymID = ?4
             WHERE equipmentID = ?5",
            params![item.name, item.equipment_type, item.quantity, item.gym_id, id],
        )?;

        info!(equipment_id = id, "equipment updated");
        self.get_equipment(id)
    }

    pub fn delete_equipment(&mut self, id: i64) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM Equipment WHERE equipmentID = ?1", [id])?;
        if deleted == 0 {
            return Err(Error::EquipmentNotFound(id));
        }
        info!(equipment_id = id, "equipment deleted");
        Ok(())
    }

    pub fn get_equipment(&self, id: i64) -> Result<Equipment> {
        self.conn
            .query_opt(
                &format!(
                    "SELECT {} FROM Equipment WHERE equipmentID = ?1",
                    Equipment::COLUMNS
                ),
                [id],
                Equipment::from_row,
            )?
            .ok_or(Error::EquipmentNotFound(id))
    }

    pub fn list_equipment(&self) -> Result<Vec<Equipment>> {
        self.conn.query(
            &format!(
                "SELECT {} FROM Equipment ORDER BY equipmentID",
                Equipment::COLUMNS
            ),
            [],
            Equipment::from_row,
        )
    }

    pub fn equipment_exists(&self, id: i64) -> Result<bool> {
        self.row_exists("Equipment", "equipmentID", id)
    }
}
