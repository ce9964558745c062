use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sensors")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub sensor_id: i32,
    pub sensor_type: String,
    pub unit: Option<String>,
    pub sensor_model: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::device_sensors::Entity")]
    DeviceSensors,
}

impl Related<super::device_sensors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DeviceSensors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
