use std::sync::Arc;

use crate::core::CommandSender;

use super::climate::{TuyaClimateEntity, climate_description};
use super::device::{DeviceManager, InstructionType};

/// Climate entities of all supported devices of one cloud session.
pub struct ClimatePlatform {
    sender: Arc<dyn CommandSender>,
    instruction_type: InstructionType,
    entities: Vec<TuyaClimateEntity>,
}

impl ClimatePlatform {
    /// Creates entities for all devices already known to the session.
    pub fn setup(manager: &DeviceManager, sender: Arc<dyn CommandSender>, instruction_type: InstructionType) -> Self {
        let mut platform = Self {
            sender,
            instruction_type,
            entities: vec![],
        };

        platform.on_devices_discovered(manager, &manager.device_ids());
        platform
    }

    /// Handles the "new devices" signal of the session. Returns the entities created for it.
    pub fn on_devices_discovered(&mut self, manager: &DeviceManager, device_ids: &[String]) -> &[TuyaClimateEntity] {
        let known = self.entities.len();

        for device_id in device_ids {
            if self.entities.iter().any(|e| e.device_id() == device_id) {
                tracing::debug!("Climate entity for {} already exists", device_id);
                continue;
            }

            let Some(device) = manager.get(device_id) else {
                tracing::warn!("Discovered device {} is unknown to the device manager", device_id);
                continue;
            };

            let Some(description) = climate_description(&device.category) else {
                continue;
            };

            tracing::info!("Adding climate entity for {} ({})", device.name, device.category);
            self.entities.push(TuyaClimateEntity::new(
                device,
                self.sender.clone(),
                description,
                self.instruction_type,
            ));
        }

        &self.entities[known..]
    }

    pub fn entities(&self) -> &[TuyaClimateEntity] {
        &self.entities
    }

    pub fn entity(&self, device_id: &str) -> Option<&TuyaClimateEntity> {
        self.entities.iter().find(|e| e.device_id() == device_id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::device::test::device;
    use super::super::sender::test::RecordingCommandSender;
    use super::*;

    fn manager() -> DeviceManager {
        DeviceManager::new([
            device(json!({"id": "ac", "name": "Air conditioner", "category": "kt"})),
            device(json!({"id": "plug", "name": "Plug", "category": "cz"})),
            device(json!({"id": "trv", "name": "Radiator valve", "category": "wkf"})),
        ])
    }

    #[test]
    fn sets_up_supported_categories_only() {
        let platform = ClimatePlatform::setup(
            &manager(),
            Arc::new(RecordingCommandSender::default()),
            InstructionType::Standard,
        );

        let ids: Vec<&str> = platform.entities().iter().map(|e| e.device_id()).collect();
        assert_eq!(ids, vec!["ac", "trv"]);
        assert_eq!(platform.entity("trv").unwrap().unique_id(), "tuya.trv");
        assert!(platform.entity("plug").is_none());
    }

    #[test]
    fn adds_only_new_devices_on_discovery() {
        let mut manager = manager();
        let mut platform = ClimatePlatform::setup(
            &manager,
            Arc::new(RecordingCommandSender::default()),
            InstructionType::Standard,
        );

        manager.insert(device(json!({"id": "heater", "name": "Heater", "category": "qn"})));

        let added = platform.on_devices_discovered(
            &manager,
            &["ac".to_string(), "heater".to_string(), "ghost".to_string()],
        );

        assert_eq!(added.len(), 1);
        assert_eq!(added[0].name(), "Heater");
        assert_eq!(platform.entities().len(), 3);
    }
}
