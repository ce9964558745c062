pub mod device_sensors;
pub mod devices;
pub mod plants;
pub mod sensor_readings;
pub mod sensors;
pub mod zones;
