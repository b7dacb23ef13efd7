use std::collections::HashMap;

use crate::adapter::tuya::device::TuyaDevice;
use crate::adapter::tuya::dpcode::DpCode;
use crate::adapter::tuya::resolver::DataPointResolver;
use crate::adapter::tuya::type_data::{EnumTypeData, IntegerTypeData};
use crate::core::climate::{
    ClimateFeature, DEFAULT_MAX_HUMIDITY, DEFAULT_MAX_TEMP, DEFAULT_MIN_HUMIDITY, DEFAULT_MIN_TEMP,
    DEFAULT_TEMPERATURE_STEP, HvacMode, SwingMode, TemperatureUnit,
};

use super::description::{ClimateDescription, HvacModeTable, PresetStrategy};

/// Data points backing each climate property of one device, resolved once when the
/// entity is created.
#[derive(Debug, Clone)]
pub struct ClimateBinding {
    pub temperature_unit: TemperatureUnit,
    pub current_temperature: Option<IntegerTypeData>,
    pub target_temperature: Option<IntegerTypeData>,
    pub current_humidity: Option<IntegerTypeData>,
    pub target_humidity: Option<IntegerTypeData>,
    pub mode: Option<EnumTypeData>,
    pub fan: Option<EnumTypeData>,
    pub eco: Option<String>,
    pub features: ClimateFeature,
    pub hvac_modes: Vec<HvacMode>,
    pub hvac_to_tuya: HashMap<HvacMode, String>,
    pub hvac_table: HvacModeTable,
    pub preset_modes: Vec<String>,
    pub fan_modes: Vec<String>,
    pub swing_modes: Vec<SwingMode>,
    pub min_temp: f64,
    pub max_temp: f64,
    pub target_temperature_step: f64,
    pub min_humidity: i64,
    pub max_humidity: i64,
}

impl ClimateBinding {
    pub fn resolve(device: &TuyaDevice, resolver: &DataPointResolver, description: &ClimateDescription) -> Self {
        let mut binding = Self {
            temperature_unit: TemperatureUnit::Celsius,
            current_temperature: None,
            target_temperature: None,
            current_humidity: None,
            target_humidity: None,
            mode: None,
            fan: None,
            eco: None,
            features: ClimateFeature::empty(),
            hvac_modes: vec![],
            hvac_to_tuya: HashMap::new(),
            hvac_table: HvacModeTable::new(description, resolver.instruction_type()),
            preset_modes: vec![],
            fan_modes: vec![],
            swing_modes: vec![],
            min_temp: DEFAULT_MIN_TEMP,
            max_temp: DEFAULT_MAX_TEMP,
            target_temperature_step: DEFAULT_TEMPERATURE_STEP,
            min_humidity: DEFAULT_MIN_HUMIDITY,
            max_humidity: DEFAULT_MAX_HUMIDITY,
        };

        binding.resolve_temperatures(device, resolver);
        binding.resolve_hvac_modes(device, resolver, description);
        binding.resolve_humidity(resolver);
        binding.resolve_fan(resolver);
        binding.resolve_swing(resolver);
        binding.resolve_eco(resolver, description);

        binding
    }

    fn resolve_temperatures(&mut self, device: &TuyaDevice, resolver: &DataPointResolver) {
        let preferred_unit = preferred_temperature_unit(device, resolver);

        let celsius = resolver.find_integer(&[DpCode::TempCurrent, DpCode::UpperTemp], false);
        let fahrenheit = resolver.find_integer(&[DpCode::TempCurrentF, DpCode::UpperTempF], false);
        if let Some((unit, data)) = select_unit(preferred_unit, celsius, fahrenheit) {
            self.temperature_unit = unit;
            self.current_temperature = Some(data);
        }

        let celsius = resolver.find_integer(&[DpCode::TempSet], true);
        let fahrenheit = resolver.find_integer(&[DpCode::TempSetF], true);
        self.target_temperature = select_unit(preferred_unit, celsius, fahrenheit).map(|(_, data)| data);

        if let Some(data) = &self.target_temperature {
            self.features |= ClimateFeature::TARGET_TEMPERATURE | ClimateFeature::PRESET_MODE;
            self.min_temp = data.min_scaled();
            self.max_temp = data.max_scaled();
            self.target_temperature_step = data.step_scaled();
        }
    }

    fn resolve_hvac_modes(
        &mut self,
        device: &TuyaDevice,
        resolver: &DataPointResolver,
        description: &ClimateDescription,
    ) {
        if let Some(mode) = resolver.find_enum(&[DpCode::Mode], true) {
            self.hvac_modes = vec![HvacMode::Off];
            let mut unknown_modes = vec![];

            for tuya_mode in &mode.range {
                match self.hvac_table.to_hvac_mode(tuya_mode) {
                    Some(hvac_mode) => {
                        self.hvac_to_tuya.insert(hvac_mode, tuya_mode.clone());
                        self.add_hvac_mode(hvac_mode);
                    }
                    None => {
                        tracing::info!(
                            "Unknown HVAC mode '{}' of device {}, offering it as preset",
                            tuya_mode,
                            device.name
                        );
                        unknown_modes.push(tuya_mode.clone());
                    }
                }
            }

            if !unknown_modes.is_empty() {
                self.add_hvac_mode(description.switch_only_hvac_mode);
                self.preset_modes = unknown_modes;
                self.features |= ClimateFeature::PRESET_MODE;
            }

            self.mode = Some(mode);
        } else if resolver.find_code(&[DpCode::Switch], true).is_some() {
            self.hvac_modes = vec![HvacMode::Off, description.switch_only_hvac_mode];
        }

        tracing::debug!("HVAC modes of {} are {:?}", device.name, self.hvac_modes);
    }

    fn resolve_humidity(&mut self, resolver: &DataPointResolver) {
        if let Some(data) = resolver.find_integer(&[DpCode::HumiditySet], true) {
            self.features |= ClimateFeature::TARGET_HUMIDITY;
            self.min_humidity = data.min_scaled() as i64;
            self.max_humidity = data.max_scaled() as i64;
            self.target_humidity = Some(data);
        }

        self.current_humidity = resolver.find_integer(&[DpCode::HumidityCurrent], false);
    }

    fn resolve_fan(&mut self, resolver: &DataPointResolver) {
        if let Some(data) = resolver.find_enum(&[DpCode::FanSpeedEnum, DpCode::Windspeed], true) {
            self.features |= ClimateFeature::FAN_MODE;
            self.fan_modes = data.range.clone();
            self.fan = Some(data);
        }
    }

    fn resolve_swing(&mut self, resolver: &DataPointResolver) {
        let swing_codes = [DpCode::Shake, DpCode::Swing, DpCode::SwitchHorizontal, DpCode::SwitchVertical];
        if resolver.find_code(&swing_codes, true).is_none() {
            return;
        }

        self.features |= ClimateFeature::SWING_MODE;
        self.swing_modes = vec![SwingMode::Off];

        if resolver.find_code(&[DpCode::Shake, DpCode::Swing], true).is_some() {
            self.swing_modes.push(SwingMode::On);
        }
        if resolver.find_code(&[DpCode::SwitchHorizontal], true).is_some() {
            self.swing_modes.push(SwingMode::Horizontal);
        }
        if resolver.find_code(&[DpCode::SwitchVertical], true).is_some() {
            self.swing_modes.push(SwingMode::Vertical);
        }
    }

    fn resolve_eco(&mut self, resolver: &DataPointResolver, description: &ClimateDescription) {
        if description.preset_strategy != PresetStrategy::Eco {
            return;
        }

        self.eco = resolver.find_code(&[DpCode::Eco], true);
        if self.eco.is_some() {
            self.features |= ClimateFeature::PRESET_MODE;
        }
    }

    fn add_hvac_mode(&mut self, hvac_mode: HvacMode) {
        if !self.hvac_modes.contains(&hvac_mode) {
            self.hvac_modes.push(hvac_mode);
        }
    }
}

//With both units available, the device setting decides. Celsius otherwise.
fn preferred_temperature_unit(device: &TuyaDevice, resolver: &DataPointResolver) -> TemperatureUnit {
    let has_both = |celsius: DpCode, fahrenheit: DpCode| {
        device.has_status(resolver.code(celsius)) && device.has_status(resolver.code(fahrenheit))
    };

    if !has_both(DpCode::TempCurrent, DpCode::TempCurrentF) && !has_both(DpCode::TempSet, DpCode::TempSetF) {
        return TemperatureUnit::Celsius;
    }

    let set_to_fahrenheit = [DpCode::CF, DpCode::TempUnitConvert]
        .into_iter()
        .filter_map(|code| device.status_str(resolver.code(code)))
        .any(|unit| unit.to_lowercase().contains('f'));

    if set_to_fahrenheit {
        TemperatureUnit::Fahrenheit
    } else {
        TemperatureUnit::Celsius
    }
}

//The preferred unit if available, the other one otherwise
fn select_unit(
    preferred: TemperatureUnit,
    celsius: Option<IntegerTypeData>,
    fahrenheit: Option<IntegerTypeData>,
) -> Option<(TemperatureUnit, IntegerTypeData)> {
    match (preferred, celsius, fahrenheit) {
        (TemperatureUnit::Fahrenheit, _, Some(f)) | (_, None, Some(f)) => Some((TemperatureUnit::Fahrenheit, f)),
        (_, Some(c), _) => Some((TemperatureUnit::Celsius, c)),
        (_, None, None) => None,
    }
}
