use chrono::{DateTime, Utc};
use sea_orm::FromQueryResult;
use serde::Serialize;
use utoipa::ToSchema;

/// Latest stored reading for one device, joined to its zone
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct LatestReading {
    pub reading_id: i32,
    pub zone_code: String,
    pub encoded_data: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LatestReadingsResponse {
    pub status: String,
    pub count: usize,
    pub readings: Vec<LatestReading>,
}

/// One reading reduced to payload and time
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct ReadingSample {
    pub encoded_data: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeviceLatestResponse {
    pub status: String,
    pub device_code: String,
    pub reading: ReadingSample,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IntervalReadingsResponse {
    pub status: String,
    pub device_code: String,
    /// Bucket width, always "4h"
    pub interval: String,
    pub readings: Vec<ReadingSample>,
}

/// Daily aggregate of the numeric interpretation of the encoded payload
#[derive(Debug, Serialize, FromQueryResult, ToSchema)]
pub struct DailyAverage {
    pub day: String,
    pub avg_encoded: f64,
    pub sample_time: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DailyAveragesResponse {
    pub status: String,
    pub device_code: String,
    /// Bucket width, always "1d"
    pub interval: String,
    pub readings: Vec<DailyAverage>,
}
