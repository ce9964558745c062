use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "devices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub device_id: i32,
    pub dev_eui: String,
    #[sea_orm(unique)]
    pub code: String,
    pub description: Option<String>,
    pub zone_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::zones::Entity",
        from = "Column::ZoneId",
        to = "super::zones::Column::ZoneId"
    )]
    Zone,
    #[sea_orm(has_many = "super::device_sensors::Entity")]
    DeviceSensors,
    #[sea_orm(has_many = "super::sensor_readings::Entity")]
    SensorReadings,
}

impl Related<super::zones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Zone.def()
    }
}

impl Related<super::device_sensors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeviceSensors.def()
    }
}

impl Related<super::sensor_readings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SensorReadings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
