use std::collections::HashMap;

use super::device::{DataPointDescriptor, InstructionType, TuyaDevice};
use super::dpcode::{DpCode, DpType};
use super::type_data::{EnumTypeData, IntegerTypeData};

#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedDataPoint {
    Code(String),
    Integer(IntegerTypeData),
    Enum(EnumTypeData),
}

/// Looks up which of a device's data points backs a logical capability.
pub struct DataPointResolver<'a> {
    device: &'a TuyaDevice,
    instruction_type: InstructionType,
}

impl<'a> DataPointResolver<'a> {
    pub fn new(device: &'a TuyaDevice, instruction_type: InstructionType) -> Self {
        Self {
            device,
            instruction_type,
        }
    }

    pub fn instruction_type(&self) -> InstructionType {
        self.instruction_type
    }

    pub fn code(&self, code: DpCode) -> &'a str {
        self.device.code_for(code, self.instruction_type)
    }

    /// Returns the first candidate the device declares. Candidate order always wins over
    /// writability: `prefer_function` only decides which declaration of the same candidate
    /// is looked at first. Declarations of another type than `required_type` are skipped.
    pub fn resolve(
        &self,
        candidates: &[DpCode],
        required_type: Option<DpType>,
        prefer_function: bool,
    ) -> Option<ResolvedDataPoint> {
        let order: [&HashMap<String, DataPointDescriptor>; 2] = if prefer_function {
            [&self.device.function, &self.device.status_range]
        } else {
            [&self.device.status_range, &self.device.function]
        };

        for candidate in candidates {
            let code = self.code(*candidate);

            for declarations in order {
                let Some(descriptor) = declarations.get(code) else {
                    continue;
                };

                match required_type {
                    None => return Some(ResolvedDataPoint::Code(code.to_string())),
                    Some(required) if required != descriptor.dp_type => continue,
                    Some(DpType::Integer) => match IntegerTypeData::from_json(code, &descriptor.values) {
                        Ok(data) => return Some(ResolvedDataPoint::Integer(data)),
                        Err(e) => tracing::warn!("Ignoring integer data point {} of {}: {:?}", code, self.device.id, e),
                    },
                    Some(DpType::Enum) => match EnumTypeData::from_json(code, &descriptor.values) {
                        Ok(data) => return Some(ResolvedDataPoint::Enum(data)),
                        Err(e) => tracing::warn!("Ignoring enum data point {} of {}: {:?}", code, self.device.id, e),
                    },
                    Some(_) => return Some(ResolvedDataPoint::Code(code.to_string())),
                }
            }
        }

        None
    }

    pub fn find_code(&self, candidates: &[DpCode], prefer_function: bool) -> Option<String> {
        match self.resolve(candidates, None, prefer_function) {
            Some(ResolvedDataPoint::Code(code)) => Some(code),
            _ => None,
        }
    }

    pub fn find_integer(&self, candidates: &[DpCode], prefer_function: bool) -> Option<IntegerTypeData> {
        match self.resolve(candidates, Some(DpType::Integer), prefer_function) {
            Some(ResolvedDataPoint::Integer(data)) => Some(data),
            _ => None,
        }
    }

    pub fn find_enum(&self, candidates: &[DpCode], prefer_function: bool) -> Option<EnumTypeData> {
        match self.resolve(candidates, Some(DpType::Enum), prefer_function) {
            Some(ResolvedDataPoint::Enum(data)) => Some(data),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::device::test::device;
    use super::*;

    const TEMP_SET_VALUES: &str = r#"{"min":50,"max":350,"scale":1,"step":5}"#;

    fn thermostat(function: serde_json::Value, status_range: serde_json::Value) -> TuyaDevice {
        device(json!({
            "id": "bf01",
            "name": "Thermostat",
            "category": "wk",
            "function": function,
            "status_range": status_range,
            "code_aliases": {"temp_set": "settemp"}
        }))
    }

    #[test]
    fn falls_back_to_later_candidate() {
        let device = thermostat(
            json!({"temp_set": {"code": "temp_set", "type": "Integer", "values": TEMP_SET_VALUES}}),
            json!({}),
        );
        let resolver = DataPointResolver::new(&device, InstructionType::Standard);

        let data = resolver.find_integer(&[DpCode::TempSetF, DpCode::TempSet], true).unwrap();
        assert_eq!(data.code, "temp_set");
        assert_eq!(data.step, 5);
    }

    #[test]
    fn candidate_order_beats_writability() {
        let device = thermostat(
            json!({"temp_set": {"code": "temp_set", "type": "Integer", "values": TEMP_SET_VALUES}}),
            json!({"temp_set_f": {"code": "temp_set_f", "type": "Integer", "values": r#"{"min":40,"max":95}"#}}),
        );
        let resolver = DataPointResolver::new(&device, InstructionType::Standard);

        let data = resolver.find_integer(&[DpCode::TempSetF, DpCode::TempSet], true).unwrap();
        assert_eq!(data.code, "temp_set_f");
    }

    #[test]
    fn prefers_function_declaration_of_same_candidate() {
        let device = thermostat(
            json!({"mode": {"code": "mode", "type": "Enum", "values": r#"{"range":["auto","cold"]}"#}}),
            json!({"mode": {"code": "mode", "type": "Enum", "values": r#"{"range":["auto"]}"#}}),
        );
        let resolver = DataPointResolver::new(&device, InstructionType::Standard);

        assert_eq!(resolver.find_enum(&[DpCode::Mode], true).unwrap().range, vec!["auto", "cold"]);
        assert_eq!(resolver.find_enum(&[DpCode::Mode], false).unwrap().range, vec!["auto"]);
    }

    #[test]
    fn skips_declarations_of_other_type() {
        let device = thermostat(
            json!({"fan_speed_enum": {"code": "fan_speed_enum", "type": "String", "values": "{}"}}),
            json!({"windspeed": {"code": "windspeed", "type": "Enum", "values": r#"{"range":["1","2"]}"#}}),
        );
        let resolver = DataPointResolver::new(&device, InstructionType::Standard);

        let data = resolver.find_enum(&[DpCode::FanSpeedEnum, DpCode::Windspeed], true).unwrap();
        assert_eq!(data.code, "windspeed");
        assert!(resolver.find_integer(&[DpCode::FanSpeedEnum], true).is_none());
    }

    #[test]
    fn skips_unparsable_type_data() {
        let device = thermostat(
            json!({"temp_set": {"code": "temp_set", "type": "Integer", "values": r#"{"min":5}"#}}),
            json!({}),
        );
        let resolver = DataPointResolver::new(&device, InstructionType::Standard);

        assert!(resolver.find_integer(&[DpCode::TempSet], true).is_none());
    }

    #[test]
    fn untyped_lookup_returns_code() {
        let device = thermostat(json!({"switch": {"code": "switch", "type": "Boolean"}}), json!({}));
        let resolver = DataPointResolver::new(&device, InstructionType::Standard);

        assert_eq!(resolver.find_code(&[DpCode::Switch], true), Some("switch".to_string()));
        assert_eq!(resolver.find_code(&[DpCode::Shake, DpCode::Swing], true), None);
        assert_eq!(
            resolver.resolve(&[DpCode::Switch], Some(DpType::Boolean), false),
            Some(ResolvedDataPoint::Code("switch".to_string()))
        );
    }

    #[test]
    fn dp_instructions_use_device_aliases() {
        let device = thermostat(
            json!({"settemp": {"code": "settemp", "type": "Integer", "values": TEMP_SET_VALUES}}),
            json!({}),
        );

        let standard = DataPointResolver::new(&device, InstructionType::Standard);
        assert!(standard.find_integer(&[DpCode::TempSet], true).is_none());

        let dp_instructions = DataPointResolver::new(&device, InstructionType::DpInstructions);
        assert_eq!(dp_instructions.find_integer(&[DpCode::TempSet], true).unwrap().code, "settemp");
    }
}
