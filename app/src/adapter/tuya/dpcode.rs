use serde::{Deserialize, Serialize};

/// Data point codes of the Tuya standard instruction set used by climate devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::IntoStaticStr, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum DpCode {
    #[strum(serialize = "c_f")]
    CF,
    Eco,
    FanSpeedEnum,
    HumidityCurrent,
    HumiditySet,
    Mode,
    Shake,
    Swing,
    Switch,
    SwitchHorizontal,
    SwitchVertical,
    TempCurrent,
    TempCurrentF,
    TempSet,
    TempSetF,
    TempUnitConvert,
    UpperTemp,
    UpperTempF,
    Windspeed,
}

impl DpCode {
    pub fn code(self) -> &'static str {
        self.into()
    }
}

/// Value type a data point is declared with, in the vendor's spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum DpType {
    Bitmap,
    Boolean,
    Enum,
    Integer,
    Json,
    Raw,
    String,
    //Types introduced by the vendor later on, never bound to a climate property
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_standard_instruction_set() {
        assert_eq!(DpCode::CF.code(), "c_f");
        assert_eq!(DpCode::TempCurrentF.code(), "temp_current_f");
        assert_eq!(DpCode::FanSpeedEnum.code(), "fan_speed_enum");
        assert_eq!(DpCode::SwitchHorizontal.to_string(), "switch_horizontal");
    }

    #[test]
    fn parses_vendor_type_names() {
        let dp_type: DpType = serde_json::from_str("\"Integer\"").unwrap();
        assert_eq!(dp_type, DpType::Integer);
    }

    #[test]
    fn unexpected_vendor_type_is_unknown() {
        let dp_type: DpType = serde_json::from_str("\"Float\"").unwrap();
        assert_eq!(dp_type, DpType::Unknown);
    }
}
