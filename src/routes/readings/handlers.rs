use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Statement,
};

use crate::common::AppState;
use crate::entity::{devices, sensor_readings};
use crate::error::{ApiError, ApiResult};

use super::types::{
    DailyAverage, DailyAveragesResponse, DeviceLatestResponse, IntervalReadingsResponse,
    LatestReading, LatestReadingsResponse, ReadingSample,
};

/// Most recent reading per device across the fleet
#[utoipa::path(
    get,
    path = "/api/latest-readings",
    responses(
        (status = 200, description = "Latest reading per device", body = LatestReadingsResponse),
        (status = 401, description = "Missing or invalid API key"),
    ),
    tag = "readings"
)]
pub async fn list_latest_readings(
    State(state): State<AppState>,
) -> ApiResult<Json<LatestReadingsResponse>> {
    if state.config.use_dummy_data {
        let readings = vec![LatestReading {
            reading_id: 1,
            zone_code: "HZ1".to_string(),
            encoded_data: "01F400C8012C".to_string(),
            timestamp: sample_timestamp(22, 8),
        }];
        let count = readings.len();
        return Ok(Json(LatestReadingsResponse {
            status: "success".to_string(),
            count,
            readings,
        }));
    }

    let db = state.require_db()?;
    let readings = LatestReading::find_by_statement(Statement::from_string(
        sea_orm::DatabaseBackend::Postgres,
        r"
        SELECT DISTINCT ON (d.device_id)
            sr.reading_id,
            z.zone_code,
            sr.encoded_data,
            sr.timestamp
        FROM sensor_readings sr
        JOIN devices d ON sr.device_id = d.device_id
        JOIN zones z ON d.zone_id = z.zone_id
        ORDER BY d.device_id, sr.timestamp DESC
        ",
    ))
    .all(db)
    .await?;

    let count = readings.len();
    Ok(Json(LatestReadingsResponse {
        status: "success".to_string(),
        count,
        readings,
    }))
}

/// Most recent reading for one device
#[utoipa::path(
    get,
    path = "/api/latest-readings/{device_code}",
    params(
        ("device_code" = String, Path, description = "Device code"),
    ),
    responses(
        (status = 200, description = "Latest reading retrieved", body = DeviceLatestResponse),
        (status = 401, description = "Missing or invalid API key"),
        (status = 404, description = "Device not found"),
    ),
    tag = "readings"
)]
pub async fn get_device_latest(
    State(state): State<AppState>,
    Path(device_code): Path<String>,
) -> ApiResult<Json<DeviceLatestResponse>> {
    if state.config.use_dummy_data {
        return Ok(Json(DeviceLatestResponse {
            status: "success".to_string(),
            device_code,
            reading: ReadingSample {
                encoded_data: "01F400C8012C".to_string(),
                timestamp: sample_timestamp(22, 8),
            },
        }));
    }

    let db = state.require_db()?;
    let reading = sensor_readings::Entity::find()
        .join(JoinType::InnerJoin, sensor_readings::Relation::Device.def())
        .filter(devices::Column::Code.eq(&device_code))
        .order_by_desc(sensor_readings::Column::Timestamp)
        .one(db)
        .await?
        .ok_or_else(|| ApiError::NotFound("Device not found".to_string()))?;

    Ok(Json(DeviceLatestResponse {
        status: "success".to_string(),
        device_code,
        reading: ReadingSample {
            encoded_data: reading.encoded_data,
            timestamp: reading.timestamp.with_timezone(&Utc),
        },
    }))
}

/// Last 24 hours for one device, ordered by 4-hour bucket
///
/// An unknown device code yields an empty list, not a 404.
#[utoipa::path(
    get,
    path = "/api/{device_code}/24",
    params(
        ("device_code" = String, Path, description = "Device code"),
    ),
    responses(
        (status = 200, description = "Readings from the last 24 hours", body = IntervalReadingsResponse),
        (status = 401, description = "Missing or invalid API key"),
    ),
    tag = "readings"
)]
pub async fn get_device_readings_24h(
    State(state): State<AppState>,
    Path(device_code): Path<String>,
) -> ApiResult<Json<IntervalReadingsResponse>> {
    if state.config.use_dummy_data {
        return Ok(Json(IntervalReadingsResponse {
            status: "success".to_string(),
            device_code,
            interval: "4h".to_string(),
            readings: vec![
                ReadingSample {
                    encoded_data: "01F400BE012C".to_string(),
                    timestamp: sample_timestamp(22, 8),
                },
                ReadingSample {
                    encoded_data: "01F400C00128".to_string(),
                    timestamp: sample_timestamp(22, 4),
                },
            ],
        }));
    }

    let db = state.require_db()?;
    // date_bin pins each reading to its 4-hour window
    let readings = ReadingSample::find_by_statement(Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Postgres,
        r"
        SELECT sr.encoded_data, sr.timestamp
        FROM sensor_readings sr
        JOIN devices d ON sr.device_id = d.device_id
        WHERE d.code = $1
          AND sr.timestamp >= NOW() - INTERVAL '24 HOURS'
        ORDER BY date_bin('4 hours', sr.timestamp, TIMESTAMPTZ '2000-01-01'), sr.timestamp DESC
        ",
        [device_code.clone().into()],
    ))
    .all(db)
    .await?;

    Ok(Json(IntervalReadingsResponse {
        status: "success".to_string(),
        device_code,
        interval: "4h".to_string(),
        readings,
    }))
}

/// Last 7 days for one device, averaged per calendar day
///
/// The average casts the encoded payload to numeric; devices whose payloads
/// are not decimal strings fail the cast and surface as a 500.
#[utoipa::path(
    get,
    path = "/api/{device_code}/7",
    params(
        ("device_code" = String, Path, description = "Device code"),
    ),
    responses(
        (status = 200, description = "Daily averages from the last 7 days", body = DailyAveragesResponse),
        (status = 401, description = "Missing or invalid API key"),
    ),
    tag = "readings"
)]
pub async fn get_device_readings_7d(
    State(state): State<AppState>,
    Path(device_code): Path<String>,
) -> ApiResult<Json<DailyAveragesResponse>> {
    if state.config.use_dummy_data {
        return Ok(Json(DailyAveragesResponse {
            status: "success".to_string(),
            device_code,
            interval: "1d".to_string(),
            readings: vec![
                DailyAverage {
                    day: "2025-09-22".to_string(),
                    avg_encoded: 500.5,
                    sample_time: sample_timestamp(22, 8),
                },
                DailyAverage {
                    day: "2025-09-21".to_string(),
                    avg_encoded: 485.2,
                    sample_time: sample_timestamp(21, 8),
                },
            ],
        }));
    }

    let db = state.require_db()?;
    let readings = DailyAverage::find_by_statement(Statement::from_sql_and_values(
        sea_orm::DatabaseBackend::Postgres,
        r"
        SELECT
            to_char(date_trunc('day', sr.timestamp), 'YYYY-MM-DD') AS day,
            (AVG((sr.encoded_data)::numeric))::float8 AS avg_encoded,
            MIN(sr.timestamp) AS sample_time
        FROM sensor_readings sr
        JOIN devices d ON sr.device_id = d.device_id
        WHERE d.code = $1
          AND sr.timestamp >= NOW() - INTERVAL '7 DAYS'
        GROUP BY date_trunc('day', sr.timestamp)
        ORDER BY day DESC
        LIMIT 7
        ",
        [device_code.clone().into()],
    ))
    .all(db)
    .await?;

    Ok(Json(DailyAveragesResponse {
        status: "success".to_string(),
        device_code,
        interval: "1d".to_string(),
        readings,
    }))
}

// Fixed reference instants for the canned demo payloads.
fn sample_timestamp(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, day, hour, 0, 0)
        .single()
        .expect("valid demo timestamp")
}
