use std::sync::Arc;

use anyhow::Context;
use tuya_climate::adapter::tuya::{ClimatePlatform, DeviceManager, LoggingCommandSender};
use tuya_climate::settings::Settings;

pub fn main() -> anyhow::Result<()> {
    let settings = Settings::new().context("Error reading configuration")?;

    settings
        .monitoring
        .init()
        .map_err(|e| anyhow::anyhow!("Error initializing monitoring: {}", e))?;

    if let Some(mqtt) = &settings.mqtt {
        let options = mqtt.options();
        tracing::info!(
            "MQTT broker {:?} with client id {} configured, not connecting in dry run",
            options.broker_address(),
            options.client_id()
        );
    }

    let manager = DeviceManager::load_json(&settings.tuya.device_file)?;
    let platform = ClimatePlatform::setup(&manager, Arc::new(LoggingCommandSender), settings.tuya.instruction_type);

    if platform.entities().is_empty() {
        tracing::warn!("No climate devices found in {}", settings.tuya.device_file);
    }

    for entity in platform.entities() {
        let state = serde_json::to_string(&entity.state())
            .with_context(|| format!("Error serializing state of {}", entity.device_id()))?;
        tracing::info!(entity = %entity.unique_id(), state = %state, "Climate entity {}", entity.name());
    }

    Ok(())
}
