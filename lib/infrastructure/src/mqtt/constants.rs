//! Names and defaults shared by the MQTT integration: config keys, attribute keys,
//! default topics and payloads, and the entity platforms set up through MQTT discovery.

use serde::Serialize;

pub const ATTR_DISCOVERY_HASH: &str = "discovery_hash";
pub const ATTR_DISCOVERY_PAYLOAD: &str = "discovery_payload";
pub const ATTR_DISCOVERY_TOPIC: &str = "discovery_topic";
pub const ATTR_PAYLOAD: &str = "payload";
pub const ATTR_QOS: &str = "qos";
pub const ATTR_RETAIN: &str = "retain";
pub const ATTR_TOPIC: &str = "topic";

pub const CONF_AVAILABILITY: &str = "availability";
pub const CONF_BROKER: &str = "broker";
pub const CONF_BIRTH_MESSAGE: &str = "birth_message";
pub const CONF_COMMAND_TEMPLATE: &str = "command_template";
pub const CONF_COMMAND_TOPIC: &str = "command_topic";
pub const CONF_DISCOVERY_PREFIX: &str = "discovery_prefix";
pub const CONF_ENCODING: &str = "encoding";
pub const CONF_KEEPALIVE: &str = "keepalive";
pub const CONF_PAYLOAD: &str = "payload";
pub const CONF_QOS: &str = ATTR_QOS;
pub const CONF_RETAIN: &str = ATTR_RETAIN;
pub const CONF_STATE_TOPIC: &str = "state_topic";
pub const CONF_STATE_VALUE_TEMPLATE: &str = "state_value_template";
pub const CONF_TOPIC: &str = "topic";
pub const CONF_WILL_MESSAGE: &str = "will_message";

pub const CONF_CERTIFICATE: &str = "certificate";
pub const CONF_CLIENT_KEY: &str = "client_key";
pub const CONF_CLIENT_CERT: &str = "client_cert";
pub const CONF_TLS_INSECURE: &str = "tls_insecure";
pub const CONF_TLS_VERSION: &str = "tls_version";

pub const CONFIG_ENTRY_IS_SETUP: &str = "mqtt_config_entry_is_setup";
pub const DATA_MQTT: &str = "mqtt";
pub const DATA_MQTT_SUBSCRIPTIONS_TO_RESTORE: &str = "mqtt_client_subscriptions";
pub const DATA_MQTT_DISCOVERY_REGISTRY_HOOKS: &str = "mqtt_discovery_registry_hooks";
pub const DATA_MQTT_CONFIG: &str = "mqtt_config";
pub const MQTT_DATA_DEVICE_TRACKER_LEGACY: &str = "mqtt_device_tracker_legacy";
pub const DATA_MQTT_RELOAD_DISPATCHERS: &str = "mqtt_reload_dispatchers";
pub const DATA_MQTT_RELOAD_ENTRY: &str = "mqtt_reload_entry";
pub const DATA_MQTT_RELOAD_NEEDED: &str = "mqtt_reload_needed";
pub const DATA_MQTT_UPDATED_CONFIG: &str = "mqtt_updated_config";

pub const DEFAULT_PREFIX: &str = "homeassistant";
pub const DEFAULT_BIRTH_WILL_TOPIC: &str = "homeassistant/status";
pub const DEFAULT_DISCOVERY: bool = true;
pub const DEFAULT_ENCODING: &str = "utf-8";
pub const DEFAULT_QOS: u8 = 0;
pub const DEFAULT_PAYLOAD_AVAILABLE: &str = "online";
pub const DEFAULT_PAYLOAD_NOT_AVAILABLE: &str = "offline";
pub const DEFAULT_RETAIN: bool = false;

/// Published by the client once connected.
pub const DEFAULT_BIRTH: StatusMessage = StatusMessage {
    topic: DEFAULT_BIRTH_WILL_TOPIC,
    payload: DEFAULT_PAYLOAD_AVAILABLE,
    qos: DEFAULT_QOS,
    retain: DEFAULT_RETAIN,
};

/// Registered with the broker as last will.
pub const DEFAULT_WILL: StatusMessage = StatusMessage {
    topic: DEFAULT_BIRTH_WILL_TOPIC,
    payload: DEFAULT_PAYLOAD_NOT_AVAILABLE,
    qos: DEFAULT_QOS,
    retain: DEFAULT_RETAIN,
};

pub const DOMAIN: &str = "mqtt";

pub const MQTT_CONNECTED: &str = "mqtt_connected";
pub const MQTT_DISCONNECTED: &str = "mqtt_disconnected";

pub const PAYLOAD_EMPTY_JSON: &str = "{}";
pub const PAYLOAD_NONE: &str = "None";

pub const PROTOCOL_31: &str = "3.1";
pub const PROTOCOL_311: &str = "3.1.1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub topic: &'static str,
    pub payload: &'static str,
    pub qos: u8,
    pub retain: bool,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Platform {
    AlarmControlPanel,
    BinarySensor,
    Button,
    Camera,
    Climate,
    DeviceTracker,
    Cover,
    Fan,
    Humidifier,
    Light,
    Lock,
    Number,
    Select,
    Scene,
    Sensor,
    Siren,
    Switch,
    Vacuum,
}

pub const PLATFORMS: [Platform; 18] = [
    Platform::AlarmControlPanel,
    Platform::BinarySensor,
    Platform::Button,
    Platform::Camera,
    Platform::Climate,
    Platform::DeviceTracker,
    Platform::Cover,
    Platform::Fan,
    Platform::Humidifier,
    Platform::Light,
    Platform::Lock,
    Platform::Number,
    Platform::Select,
    Platform::Scene,
    Platform::Sensor,
    Platform::Siren,
    Platform::Switch,
    Platform::Vacuum,
];

//device trackers are set up once and never reloaded
pub const RELOADABLE_PLATFORMS: [Platform; 17] = [
    Platform::AlarmControlPanel,
    Platform::BinarySensor,
    Platform::Button,
    Platform::Camera,
    Platform::Climate,
    Platform::Cover,
    Platform::Fan,
    Platform::Humidifier,
    Platform::Light,
    Platform::Lock,
    Platform::Number,
    Platform::Scene,
    Platform::Select,
    Platform::Sensor,
    Platform::Siren,
    Platform::Switch,
    Platform::Vacuum,
];

#[cfg(test)]
mod tests {
    use assert_json_diff::assert_json_eq;
    use serde_json::json;
    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn birth_and_will_share_status_topic() {
        assert_eq!(DEFAULT_BIRTH_WILL_TOPIC, format!("{}/status", DEFAULT_PREFIX));
        assert_eq!(DEFAULT_BIRTH.topic, DEFAULT_WILL.topic);
    }

    #[test]
    fn will_message_shape() {
        assert_json_eq!(
            DEFAULT_WILL,
            json!({
                "topic": "homeassistant/status",
                "payload": "offline",
                "qos": 0,
                "retain": false
            })
        );
    }

    #[test]
    fn every_platform_is_set_up() {
        assert_eq!(Platform::iter().count(), PLATFORMS.len());
        for platform in Platform::iter() {
            assert!(PLATFORMS.contains(&platform), "{} missing", platform);
        }
    }

    #[test]
    fn only_device_tracker_is_not_reloadable() {
        let not_reloadable: Vec<Platform> = PLATFORMS
            .iter()
            .filter(|p| !RELOADABLE_PLATFORMS.contains(p))
            .copied()
            .collect();

        assert_eq!(not_reloadable, vec![Platform::DeviceTracker]);
    }

    #[test]
    fn platform_names() {
        assert_eq!(Platform::AlarmControlPanel.to_string(), "alarm_control_panel");
        assert_eq!(Platform::Climate.as_ref(), "climate");
        assert_eq!(serde_json::to_value(Platform::DeviceTracker).unwrap(), json!("device_tracker"));
    }
}
