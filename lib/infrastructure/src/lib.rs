mod monitoring;
pub mod mqtt;

pub use monitoring::{EnvFilterConfig, MonitoringConfig};
pub use mqtt::MqttConfig;
