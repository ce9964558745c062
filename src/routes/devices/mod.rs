mod handlers;
mod types;

pub use handlers::{list_device_sensors, list_devices};
pub use types::{DeviceSensor, DeviceSensorsResponse, DeviceSummary, DevicesResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{__path_list_device_sensors, __path_list_devices};
