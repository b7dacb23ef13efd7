//! Climate entity vocabulary of the host automation framework.

use serde::{Deserialize, Serialize};

pub const PRESET_NONE: &str = "none";
pub const PRESET_ECO: &str = "eco";

pub const DEFAULT_MIN_TEMP: f64 = 7.0;
pub const DEFAULT_MAX_TEMP: f64 = 35.0;
pub const DEFAULT_TEMPERATURE_STEP: f64 = 1.0;
pub const DEFAULT_MIN_HUMIDITY: i64 = 30;
pub const DEFAULT_MAX_HUMIDITY: i64 = 99;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum HvacMode {
    Off,
    Heat,
    Cool,
    HeatCool,
    Auto,
    Dry,
    FanOnly,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SwingMode {
    Off,
    On,
    Both,
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "°C")]
    #[strum(serialize = "°C")]
    Celsius,
    #[serde(rename = "°F")]
    #[strum(serialize = "°F")]
    Fahrenheit,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ClimateFeature: u32 {
        const TARGET_TEMPERATURE = 1;
        const TARGET_TEMPERATURE_RANGE = 2;
        const TARGET_HUMIDITY = 4;
        const FAN_MODE = 8;
        const PRESET_MODE = 16;
        const SWING_MODE = 32;
        const AUX_HEAT = 64;
    }
}

impl ClimateFeature {
    pub fn names(&self) -> Vec<String> {
        self.iter_names().map(|(name, _)| name.to_lowercase()).collect()
    }
}

/// Settable properties of a climate entity, used to report unsupported writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum ClimateProperty {
    #[display("target temperature")]
    TargetTemperature,
    #[display("target humidity")]
    TargetHumidity,
    #[display("preset mode")]
    PresetMode,
    #[display("fan mode")]
    FanMode,
    #[display("swing mode")]
    SwingMode,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn hvac_mode_names() {
        assert_eq!(HvacMode::HeatCool.to_string(), "heat_cool");
        assert_eq!(HvacMode::from_str("fan_only").unwrap(), HvacMode::FanOnly);
        assert_eq!(serde_json::to_value(HvacMode::Dry).unwrap(), serde_json::json!("dry"));
    }

    #[test]
    fn feature_names() {
        let features = ClimateFeature::TARGET_TEMPERATURE | ClimateFeature::SWING_MODE;
        assert_eq!(features.names(), vec!["target_temperature", "swing_mode"]);
    }

    #[test]
    fn temperature_unit_symbols() {
        assert_eq!(TemperatureUnit::Celsius.to_string(), "°C");
        assert_eq!(serde_json::to_value(TemperatureUnit::Fahrenheit).unwrap(), serde_json::json!("°F"));
    }
}
