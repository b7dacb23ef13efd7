use config::{Config, ConfigBuilder, ConfigError, Environment, File, builder::DefaultState};
use infrastructure::{MonitoringConfig, MqttConfig};
use serde::Deserialize;

use crate::adapter::tuya::InstructionType;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub monitoring: MonitoringConfig,
    pub tuya: TuyaSettings,
    //Informational for the dry run, no client is connected
    #[serde(default)]
    pub mqtt: Option<MqttConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TuyaSettings {
    #[serde(default)]
    pub instruction_type: InstructionType,
    //JSON dump of the devices of the cloud session
    pub device_file: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::build(Config::builder().add_source(File::with_name("config.toml")))
    }

    //Keys contain underscores, so nested environment keys are separated by two of them
    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let builder = builder.add_source(Environment::default().separator("__").list_separator(","));

        let s = builder.build()?;
        s.try_deserialize()
    }
}
