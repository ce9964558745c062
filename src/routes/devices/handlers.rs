use axum::{
    extract::{Path, State},
    Json,
};
use sea_orm::{
    ColumnTrait, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

use crate::common::AppState;
use crate::entity::{device_sensors, devices, plants, sensors, zones};
use crate::error::{ApiError, ApiResult};

use super::types::{DeviceSensor, DeviceSensorsResponse, DeviceSummary, DevicesResponse};

/// Device directory with zone and plant context
#[utoipa::path(
    get,
    path = "/api/devices",
    responses(
        (status = 200, description = "Devices retrieved successfully", body = DevicesResponse),
        (status = 401, description = "Missing or invalid API key"),
    ),
    tag = "devices"
)]
pub async fn list_devices(State(state): State<AppState>) -> ApiResult<Json<DevicesResponse>> {
    if state.config.use_dummy_data {
        let devices_list = vec![DeviceSummary {
            device_id: 1,
            dev_eui: "demo".to_string(),
            code: "HZ1".to_string(),
            description: Some("Hydroponic Controller".to_string()),
            zone_code: "HZ1".to_string(),
            zone_label: Some("Hydro 1".to_string()),
            plant_name: Some("Hidroponik".to_string()),
        }];
        let count = devices_list.len();
        return Ok(Json(DevicesResponse {
            devices: devices_list,
            count,
        }));
    }

    let db = state.require_db()?;
    let devices_list = devices::Entity::find()
        .select_only()
        .column(devices::Column::DeviceId)
        .column(devices::Column::DevEui)
        .column(devices::Column::Code)
        .column(devices::Column::Description)
        .column(zones::Column::ZoneCode)
        .column(zones::Column::ZoneLabel)
        .column_as(plants::Column::Name, "plant_name")
        .join(JoinType::InnerJoin, devices::Relation::Zone.def())
        .join(JoinType::LeftJoin, zones::Relation::Plant.def())
        .order_by_asc(devices::Column::Code)
        .into_model::<DeviceSummary>()
        .all(db)
        .await?;

    let count = devices_list.len();
    Ok(Json(DevicesResponse {
        devices: devices_list,
        count,
    }))
}

/// Sensors attached to one device, in display order
#[utoipa::path(
    get,
    path = "/api/devices/{device_code}/sensors",
    params(
        ("device_code" = String, Path, description = "Device code"),
    ),
    responses(
        (status = 200, description = "Sensors retrieved successfully", body = DeviceSensorsResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Device not found or no sensors"),
    ),
    tag = "devices"
)]
pub async fn list_device_sensors(
    State(state): State<AppState>,
    Path(device_code): Path<String>,
) -> ApiResult<Json<DeviceSensorsResponse>> {
    if state.config.use_dummy_data {
        return Ok(Json(DeviceSensorsResponse {
            device_code,
            sensors: vec![
                DeviceSensor {
                    device_sensor_id: 1,
                    sensor_label: Some("pH".to_string()),
                    sensor_order: 1,
                    sensor_type: "pH".to_string(),
                    unit: Some(String::new()),
                    sensor_model: Some("HX".to_string()),
                },
                DeviceSensor {
                    device_sensor_id: 2,
                    sensor_label: Some("TDS".to_string()),
                    sensor_order: 2,
                    sensor_type: "TDS".to_string(),
                    unit: Some("ppm".to_string()),
                    sensor_model: Some("HX".to_string()),
                },
                DeviceSensor {
                    device_sensor_id: 3,
                    sensor_label: Some("Temperature".to_string()),
                    sensor_order: 3,
                    sensor_type: "Temperature".to_string(),
                    unit: Some("°C".to_string()),
                    sensor_model: Some("DS18B20".to_string()),
                },
            ],
        }));
    }

    let db = state.require_db()?;
    let sensors_list = device_sensors::Entity::find()
        .select_only()
        .column(device_sensors::Column::DeviceSensorId)
        .column(device_sensors::Column::SensorLabel)
        .column(device_sensors::Column::SensorOrder)
        .column(sensors::Column::SensorType)
        .column(sensors::Column::Unit)
        .column(sensors::Column::SensorModel)
        .join(JoinType::InnerJoin, device_sensors::Relation::Device.def())
        .join(JoinType::InnerJoin, device_sensors::Relation::Sensor.def())
        .filter(devices::Column::Code.eq(&device_code))
        .order_by_asc(device_sensors::Column::SensorOrder)
        .into_model::<DeviceSensor>()
        .all(db)
        .await?;

    // The source data cannot distinguish an unknown device from one with
    // no sensor assignments; both answer 404
    if sensors_list.is_empty() {
        return Err(ApiError::NotFound(
            "Device not found or no sensors".to_string(),
        ));
    }

    Ok(Json(DeviceSensorsResponse {
        device_code,
        sensors: sensors_list,
    }))
}
