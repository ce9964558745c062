use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;

/// Device directory row with its zone and optional plant
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct DeviceSummary {
    pub device_id: i32,
    pub dev_eui: String,
    pub code: String,
    pub description: Option<String>,
    pub zone_code: String,
    pub zone_label: Option<String>,
    /// Null when the zone has no plant assigned
    pub plant_name: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DevicesResponse {
    pub devices: Vec<DeviceSummary>,
    pub count: usize,
}

/// Sensor assignment on a device, joined to the sensor catalog
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct DeviceSensor {
    pub device_sensor_id: i32,
    pub sensor_label: Option<String>,
    pub sensor_order: i32,
    pub sensor_type: String,
    pub unit: Option<String>,
    pub sensor_model: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeviceSensorsResponse {
    pub device_code: String,
    pub sensors: Vec<DeviceSensor>,
}
