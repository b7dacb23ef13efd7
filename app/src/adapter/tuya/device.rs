use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::dpcode::{DpCode, DpType};

/// Raw data point values as last reported by the cloud, keyed by code.
pub type StatusSnapshot = HashMap<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPointDescriptor {
    pub code: String,
    #[serde(rename = "type")]
    pub dp_type: DpType,
    //JSON encoded type data, e.g. {"min":50,"max":350,"scale":1,"step":5}
    #[serde(default)]
    pub values: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum InstructionType {
    #[default]
    Standard,
    #[serde(rename = "DP Instructions")]
    DpInstructions,
}

/// Device object as kept by the Tuya SDK. `function` lists the data points that can be
/// written, `status_range` the ones that are only reported.
#[derive(Debug, Deserialize)]
pub struct TuyaDevice {
    pub id: String,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub function: HashMap<String, DataPointDescriptor>,
    #[serde(default)]
    pub status_range: HashMap<String, DataPointDescriptor>,
    //Standard code -> code published by devices using DP instructions
    #[serde(default)]
    pub code_aliases: HashMap<String, String>,
    #[serde(default)]
    status: RwLock<StatusSnapshot>,
}

impl TuyaDevice {
    pub fn code_for(&self, code: DpCode, instruction_type: InstructionType) -> &str {
        match instruction_type {
            InstructionType::DpInstructions => self
                .code_aliases
                .get(code.code())
                .map(String::as_str)
                .unwrap_or(code.code()),
            InstructionType::Standard => code.code(),
        }
    }

    pub fn has_function(&self, code: &str) -> bool {
        self.function.contains_key(code)
    }

    pub fn has_status(&self, code: &str) -> bool {
        self.status().contains_key(code)
    }

    pub fn status_value(&self, code: &str) -> Option<Value> {
        self.status().get(code).cloned()
    }

    pub fn status_bool(&self, code: &str) -> Option<bool> {
        self.status().get(code).and_then(Value::as_bool)
    }

    pub fn status_str(&self, code: &str) -> Option<String> {
        self.status().get(code).and_then(Value::as_str).map(str::to_owned)
    }

    pub fn status_f64(&self, code: &str) -> Option<f64> {
        self.status().get(code).and_then(Value::as_f64)
    }

    /// Applies a status report pushed by the cloud.
    pub fn update_status(&self, updates: impl IntoIterator<Item = (String, Value)>) {
        let mut status = self.status.write().unwrap_or_else(PoisonError::into_inner);
        for (code, value) in updates {
            tracing::trace!("Status update of {}: {} = {}", self.id, code, value);
            status.insert(code, value);
        }
    }

    fn status(&self) -> RwLockReadGuard<'_, StatusSnapshot> {
        self.status.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// All devices known to the cloud session, keyed by device id.
#[derive(Debug, Default)]
pub struct DeviceManager {
    devices: BTreeMap<String, Arc<TuyaDevice>>,
}

impl DeviceManager {
    pub fn new(devices: impl IntoIterator<Item = TuyaDevice>) -> Self {
        let mut manager = Self::default();
        for device in devices {
            manager.insert(device);
        }
        manager
    }

    /// Loads a JSON array of device objects as dumped from the cloud API.
    pub fn load_json(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Error reading device file {}", path.display()))?;
        let devices: Vec<TuyaDevice> =
            serde_json::from_str(&content).with_context(|| format!("Error parsing device file {}", path.display()))?;

        tracing::info!("Loaded {} devices from {}", devices.len(), path.display());
        Ok(Self::new(devices))
    }

    pub fn insert(&mut self, device: TuyaDevice) -> Arc<TuyaDevice> {
        let device = Arc::new(device);
        self.devices.insert(device.id.clone(), device.clone());
        device
    }

    pub fn get(&self, device_id: &str) -> Option<Arc<TuyaDevice>> {
        self.devices.get(device_id).cloned()
    }

    pub fn device_ids(&self) -> Vec<String> {
        self.devices.keys().cloned().collect()
    }
}


#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::test::device;
    use super::*;

    fn aliased_device() -> TuyaDevice {
        device(json!({
            "id": "bf01",
            "name": "Living room thermostat",
            "category": "wk",
            "function": {
                "temp_set": {"code": "temp_set", "type": "Integer", "values": "{\"min\":50,\"max\":350,\"scale\":1,\"step\":5}"}
            },
            "code_aliases": {"temp_set": "settemp"},
            "status": {"switch": true, "temp_set": 215, "mode": "auto"}
        }))
    }

    #[test]
    fn aliases_only_apply_to_dp_instructions() {
        let device = aliased_device();

        assert_eq!(device.code_for(DpCode::TempSet, InstructionType::Standard), "temp_set");
        assert_eq!(device.code_for(DpCode::TempSet, InstructionType::DpInstructions), "settemp");
        assert_eq!(device.code_for(DpCode::Mode, InstructionType::DpInstructions), "mode");
    }

    #[test]
    fn typed_status_access() {
        let device = aliased_device();

        assert_eq!(device.status_bool("switch"), Some(true));
        assert_eq!(device.status_f64("temp_set"), Some(215.0));
        assert_eq!(device.status_str("mode"), Some("auto".to_string()));
        assert_eq!(device.status_bool("mode"), None);
        assert_eq!(device.status_value("missing"), None);
    }

    #[test]
    fn status_updates_are_visible_to_readers() {
        let device = aliased_device();

        device.update_status([("temp_set".to_string(), json!(225)), ("eco".to_string(), json!(true))]);

        assert_eq!(device.status_f64("temp_set"), Some(225.0));
        assert!(device.has_status("eco"));
    }

    #[test]
    fn manager_lists_devices_in_id_order() {
        let manager = DeviceManager::new([
            device(json!({"id": "b", "name": "B", "category": "kt"})),
            device(json!({"id": "a", "name": "A", "category": "qn"})),
        ]);

        assert_eq!(manager.device_ids(), vec!["a", "b"]);
        assert_eq!(manager.get("a").map(|d| d.category.clone()), Some("qn".to_string()));
        assert!(manager.get("c").is_none());
    }

    #[test]
    fn keeps_devices_with_unknown_data_point_types() {
        let devices: Vec<TuyaDevice> = serde_json::from_value(json!([{
            "id": "bf02",
            "name": "Heater",
            "category": "qn",
            "function": {
                "switch": {"code": "switch", "type": "Boolean", "values": "{}"},
                "schedule": {"code": "schedule", "type": "Float", "values": "{}"}
            }
        }]))
        .unwrap();

        assert_eq!(devices[0].function["schedule"].dp_type, DpType::Unknown);
        assert!(devices[0].has_function("switch"));
    }

    #[test]
    fn loading_missing_file_fails_with_path() {
        let error = DeviceManager::load_json("/nonexistent/devices.json").unwrap_err();
        assert!(error.to_string().contains("/nonexistent/devices.json"));
    }
}
