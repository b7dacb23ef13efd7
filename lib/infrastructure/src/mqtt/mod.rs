pub mod constants;

use std::time::Duration;

use rumqttc::{LastWill, MqttOptions, QoS};
use serde::Deserialize;

use constants::{DEFAULT_WILL, StatusMessage};

const DEFAULT_KEEPALIVE_SECS: u64 = 60;

#[derive(Debug, Deserialize, Clone)]
pub struct MqttConfig {
    host: String,
    port: u16,
    client_id: String,
    #[serde(default = "default_keepalive")]
    keepalive: u64,
}

fn default_keepalive() -> u64 {
    DEFAULT_KEEPALIVE_SECS
}

impl MqttConfig {
    pub fn options(&self) -> MqttOptions {
        let mut options = MqttOptions::new(&self.client_id, &self.host, self.port);
        options.set_keep_alive(Duration::from_secs(self.keepalive));
        options.set_last_will(DEFAULT_WILL.into());
        options
    }
}

impl From<StatusMessage> for LastWill {
    fn from(message: StatusMessage) -> Self {
        LastWill::new(message.topic, message.payload, qos(message.qos), message.retain)
    }
}

fn qos(level: u8) -> QoS {
    match level {
        0 => QoS::AtMostOnce,
        1 => QoS::AtLeastOnce,
        _ => QoS::ExactlyOnce,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> MqttConfig {
        serde_json::from_value(serde_json::json!({
            "host": "broker.local",
            "port": 1883,
            "client_id": "tuya-climate"
        }))
        .unwrap()
    }

    #[test]
    fn keepalive_defaults_to_one_minute() {
        let options = config().options();

        assert_eq!(options.keep_alive(), Duration::from_secs(60));
        assert_eq!(options.broker_address(), ("broker.local".to_string(), 1883));
        assert_eq!(options.client_id(), "tuya-climate");
    }

    #[test]
    fn registers_offline_status_as_last_will() {
        let will = config().options().last_will().unwrap();

        assert_eq!(will.topic, "homeassistant/status");
        assert_eq!(will.message.as_ref(), b"offline");
        assert_eq!(will.qos, QoS::AtMostOnce);
        assert!(!will.retain);
    }

    #[test]
    fn maps_qos_levels() {
        assert_eq!(qos(0), QoS::AtMostOnce);
        assert_eq!(qos(1), QoS::AtLeastOnce);
        assert_eq!(qos(2), QoS::ExactlyOnce);
    }
}
