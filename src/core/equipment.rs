//! Equipment model.

use crate::core::EquipmentType;
use crate::error::{Error, Result};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

/// Equipment stocked at a gym.
///
/// The category lives in the `classType` column of the Equipment table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub id: i64,
    pub name: String,
    pub equipment_type: EquipmentType,
    pub quantity: i64,
    pub gym_id: i64,
}

impl Equipment {
    pub const COLUMNS: &'static str = "equipmentID, name, classType, quantity, gymID";

    pub fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("equipmentID")?,
            name: row.get("name")?,
            equipment_type: row.get("classType")?,
            quantity: row.get("quantity")?,
            gym_id: row.get("gymID")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEquipment {
    pub name: String,
    pub equipment_type: EquipmentType,
    pub quantity: i64,
    pub gym_id: i64,
}

impl NewEquipment {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::EmptyField("equipment name"));
        }
        if self.quantity <= 0 {
            return Err(Error::NotPositive {
                field: "quantity",
                value: self.quantity as f64,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        let mut item = NewEquipment {
            name: "Treadmill".to_string(),
            equipment_type: EquipmentType::Cardio,
            quantity: 1,
            gym_id: 1,
        };
        assert!(item.validate().is_ok());

        item.quantity = 0;
        assert!(matches!(
            item.validate(),
            Err(Error::NotPositive {
                field: "quantity",
                ..
            })
        ));
    }
}
