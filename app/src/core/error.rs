use super::climate::ClimateProperty;

pub type Result<T> = std::result::Result<T, ClimateError>;

#[derive(Debug, thiserror::Error)]
pub enum ClimateError {
    #[error("Device {device_id} doesn't provide a data point to set the {property}")]
    PropertyUnsupported { property: ClimateProperty, device_id: String },
    #[error("Error sending commands to device {device_id}")]
    Transport {
        device_id: String,
        #[source]
        source: anyhow::Error,
    },
}
