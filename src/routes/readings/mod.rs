mod handlers;
mod types;

pub use handlers::{
    get_device_latest, get_device_readings_24h, get_device_readings_7d, list_latest_readings,
};
pub use types::{
    DailyAverage, DailyAveragesResponse, DeviceLatestResponse, IntervalReadingsResponse,
    LatestReading, LatestReadingsResponse, ReadingSample,
};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_get_device_latest, __path_get_device_readings_24h, __path_get_device_readings_7d,
    __path_list_latest_readings,
};
