mod binding;
mod description;

use std::sync::Arc;

use serde::Serialize;

use crate::adapter::tuya::device::{InstructionType, TuyaDevice};
use crate::adapter::tuya::dpcode::DpCode;
use crate::adapter::tuya::resolver::DataPointResolver;
use crate::adapter::tuya::type_data::SCALE_BASE;
use crate::core::climate::{
    ClimateFeature, ClimateProperty, HvacMode, PRESET_ECO, PRESET_NONE, SwingMode, TemperatureUnit,
};
use crate::core::{ClimateError, CommandSender, DpCommand, Result};

pub use binding::ClimateBinding;
pub use description::{ClimateDescription, HvacModeTable, PresetStrategy, climate_description};

/// Climate entity of a Tuya air conditioner, heater or thermostat.
pub struct TuyaClimateEntity {
    device: Arc<TuyaDevice>,
    sender: Arc<dyn CommandSender>,
    description: &'static ClimateDescription,
    instruction_type: InstructionType,
    binding: ClimateBinding,
}

/// Everything the entity reports, at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClimateState {
    pub hvac_mode: HvacMode,
    pub hvac_modes: Vec<HvacMode>,
    pub temperature_unit: TemperatureUnit,
    pub current_temperature: Option<f64>,
    pub target_temperature: Option<f64>,
    pub min_temp: f64,
    pub max_temp: f64,
    pub target_temperature_step: f64,
    pub current_humidity: Option<i64>,
    pub target_humidity: Option<i64>,
    pub min_humidity: i64,
    pub max_humidity: i64,
    pub preset_mode: Option<String>,
    pub preset_modes: Option<Vec<String>>,
    pub fan_mode: Option<String>,
    pub fan_modes: Vec<String>,
    pub swing_mode: SwingMode,
    pub swing_modes: Vec<SwingMode>,
    pub supported_features: Vec<String>,
}

impl TuyaClimateEntity {
    pub fn new(
        device: Arc<TuyaDevice>,
        sender: Arc<dyn CommandSender>,
        description: &'static ClimateDescription,
        instruction_type: InstructionType,
    ) -> Self {
        tracing::debug!("Creating climate entity for {} with instruction type {:?}", device.id, instruction_type);

        let resolver = DataPointResolver::new(&device, instruction_type);
        let binding = ClimateBinding::resolve(&device, &resolver, description);

        Self {
            device,
            sender,
            description,
            instruction_type,
            binding,
        }
    }

    pub fn unique_id(&self) -> String {
        format!("tuya.{}", self.device.id)
    }

    pub fn device_id(&self) -> &str {
        &self.device.id
    }

    pub fn name(&self) -> &str {
        &self.device.name
    }

    pub fn binding(&self) -> &ClimateBinding {
        &self.binding
    }

    pub fn supported_features(&self) -> ClimateFeature {
        self.binding.features
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.binding.temperature_unit
    }

    pub fn hvac_modes(&self) -> &[HvacMode] {
        &self.binding.hvac_modes
    }

    pub fn fan_modes(&self) -> &[String] {
        &self.binding.fan_modes
    }

    pub fn swing_modes(&self) -> &[SwingMode] {
        &self.binding.swing_modes
    }

    pub fn current_temperature(&self) -> Option<f64> {
        let data = self.binding.current_temperature.as_ref()?;
        let mut temperature = self.device.status_f64(&data.code)?;

        //Scale 0 with a step other than 1 means the device reports tenths of a degree anyway
        if data.scale == 0 && data.step != 1 {
            temperature /= SCALE_BASE;
        }

        Some(data.scale_value(temperature))
    }

    pub fn target_temperature(&self) -> Option<f64> {
        let data = self.binding.target_temperature.as_ref()?;
        let temperature = self.device.status_f64(&data.code)?;

        Some(data.scale_value(temperature))
    }

    pub fn current_humidity(&self) -> Option<i64> {
        let data = self.binding.current_humidity.as_ref()?;
        let humidity = self.device.status_f64(&data.code)?;

        Some(data.scale_value(humidity).round() as i64)
    }

    pub fn target_humidity(&self) -> Option<i64> {
        let data = self.binding.target_humidity.as_ref()?;
        let humidity = self.device.status_f64(&data.code)?;

        Some(data.scale_value(humidity).round() as i64)
    }

    pub fn hvac_mode(&self) -> HvacMode {
        let switch = self.device.status_bool(self.code(DpCode::Switch));

        if switch == Some(false) {
            return HvacMode::Off;
        }

        if !self.device.has_function(self.code(DpCode::Mode)) {
            return match switch {
                Some(true) => self.description.switch_only_hvac_mode,
                _ => HvacMode::Off,
            };
        }

        let mode = self.device.status_str(self.code(DpCode::Mode));
        match (mode.and_then(|m| self.binding.hvac_table.to_hvac_mode(&m)), switch) {
            (Some(hvac_mode), _) => hvac_mode,
            //Mode is a preset, device is still on
            (None, Some(true)) => self.description.switch_only_hvac_mode,
            (None, _) => HvacMode::Off,
        }
    }

    pub fn preset_modes(&self) -> Option<Vec<String>> {
        match &self.binding.eco {
            Some(_) => Some(vec![PRESET_NONE.to_string(), PRESET_ECO.to_string()]),
            None if self.binding.preset_modes.is_empty() => None,
            None => Some(self.binding.preset_modes.clone()),
        }
    }

    pub fn preset_mode(&self) -> Option<String> {
        if let Some(eco) = &self.binding.eco {
            let preset = match self.device.status_bool(eco) {
                Some(true) => PRESET_ECO,
                _ => PRESET_NONE,
            };
            return Some(preset.to_string());
        }

        let mode_code = self.code(DpCode::Mode);
        if !self.device.has_function(mode_code) {
            return None;
        }

        self.device
            .status_str(mode_code)
            .filter(|mode| !self.binding.hvac_table.is_known(mode))
    }

    pub fn fan_mode(&self) -> Option<String> {
        let data = self.binding.fan.as_ref()?;
        self.device.status_str(&data.code)
    }

    pub fn swing_mode(&self) -> SwingMode {
        let is_on = |code: DpCode| self.device.status_bool(self.code(code)).unwrap_or(false);

        if is_on(DpCode::Shake) || is_on(DpCode::Swing) {
            return SwingMode::On;
        }

        match (is_on(DpCode::SwitchHorizontal), is_on(DpCode::SwitchVertical)) {
            (true, true) => SwingMode::Both,
            (true, false) => SwingMode::Horizontal,
            (false, true) => SwingMode::Vertical,
            (false, false) => SwingMode::Off,
        }
    }

    pub fn state(&self) -> ClimateState {
        ClimateState {
            hvac_mode: self.hvac_mode(),
            hvac_modes: self.binding.hvac_modes.clone(),
            temperature_unit: self.binding.temperature_unit,
            current_temperature: self.current_temperature(),
            target_temperature: self.target_temperature(),
            min_temp: self.binding.min_temp,
            max_temp: self.binding.max_temp,
            target_temperature_step: self.binding.target_temperature_step,
            current_humidity: self.current_humidity(),
            target_humidity: self.target_humidity(),
            min_humidity: self.binding.min_humidity,
            max_humidity: self.binding.max_humidity,
            preset_mode: self.preset_mode(),
            preset_modes: self.preset_modes(),
            fan_mode: self.fan_mode(),
            fan_modes: self.binding.fan_modes.clone(),
            swing_mode: self.swing_mode(),
            swing_modes: self.binding.swing_modes.clone(),
            supported_features: self.binding.features.names(),
        }
    }

    pub fn set_target_temperature(&self, temperature: f64) -> Result<()> {
        let data = self
            .binding
            .target_temperature
            .as_ref()
            .ok_or_else(|| self.unsupported(ClimateProperty::TargetTemperature))?;

        self.send(vec![DpCommand::new(&data.code, data.scale_value_back(temperature))])
    }

    pub fn set_target_humidity(&self, humidity: i64) -> Result<()> {
        let data = self
            .binding
            .target_humidity
            .as_ref()
            .ok_or_else(|| self.unsupported(ClimateProperty::TargetHumidity))?;

        self.send(vec![DpCommand::new(&data.code, data.scale_value_back(humidity as f64))])
    }

    pub fn set_hvac_mode(&self, hvac_mode: HvacMode) -> Result<()> {
        let mut commands = vec![DpCommand::new(self.code(DpCode::Switch), hvac_mode != HvacMode::Off)];

        if let Some(tuya_mode) = self.binding.hvac_to_tuya.get(&hvac_mode) {
            commands.push(DpCommand::new(self.code(DpCode::Mode), tuya_mode.as_str()));
        }

        self.send(commands)
    }

    pub fn set_preset_mode(&self, preset_mode: &str) -> Result<()> {
        if let Some(eco) = &self.binding.eco {
            if preset_mode != PRESET_NONE && preset_mode != PRESET_ECO {
                tracing::warn!("Ignoring unsupported preset '{}' of {}", preset_mode, self.device.id);
                return Ok(());
            }

            return self.send(vec![DpCommand::new(eco, preset_mode == PRESET_ECO)]);
        }

        let mode = self
            .binding
            .mode
            .as_ref()
            .ok_or_else(|| self.unsupported(ClimateProperty::PresetMode))?;

        self.send(vec![DpCommand::new(&mode.code, preset_mode)])
    }

    pub fn set_fan_mode(&self, fan_mode: &str) -> Result<()> {
        let data = self
            .binding
            .fan
            .as_ref()
            .ok_or_else(|| self.unsupported(ClimateProperty::FanMode))?;

        self.send(vec![DpCommand::new(&data.code, fan_mode)])
    }

    pub fn set_swing_mode(&self, swing_mode: SwingMode) -> Result<()> {
        if !self.binding.features.contains(ClimateFeature::SWING_MODE) {
            return Err(self.unsupported(ClimateProperty::SwingMode));
        }

        //All at once, codes the device doesn't have are ignored
        let on = swing_mode == SwingMode::On;
        self.send(vec![
            DpCommand::new(self.code(DpCode::Shake), on),
            DpCommand::new(self.code(DpCode::Swing), on),
            DpCommand::new(
                self.code(DpCode::SwitchVertical),
                matches!(swing_mode, SwingMode::Both | SwingMode::Vertical),
            ),
            DpCommand::new(
                self.code(DpCode::SwitchHorizontal),
                matches!(swing_mode, SwingMode::Both | SwingMode::Horizontal),
            ),
        ])
    }

    /// Turns the device on, retaining the current HVAC mode if there is a real switch.
    pub fn turn_on(&self) -> Result<()> {
        let switch = self.code(DpCode::Switch);
        if self.device.has_function(switch) {
            return self.send(vec![DpCommand::new(switch, true)]);
        }

        let fallback = [HvacMode::HeatCool, HvacMode::Heat, HvacMode::Cool]
            .into_iter()
            .find(|mode| self.binding.hvac_modes.contains(mode));

        match fallback {
            Some(mode) => self.set_hvac_mode(mode),
            None => {
                tracing::debug!("No HVAC mode to turn on {}", self.device.id);
                Ok(())
            }
        }
    }

    pub fn turn_off(&self) -> Result<()> {
        let switch = self.code(DpCode::Switch);
        if self.device.has_function(switch) {
            return self.send(vec![DpCommand::new(switch, false)]);
        }

        if self.binding.hvac_modes.contains(&HvacMode::Off) {
            return self.set_hvac_mode(HvacMode::Off);
        }

        tracing::debug!("No HVAC mode to turn off {}", self.device.id);
        Ok(())
    }

    fn code(&self, code: DpCode) -> &str {
        self.device.code_for(code, self.instruction_type)
    }

    fn unsupported(&self, property: ClimateProperty) -> ClimateError {
        ClimateError::PropertyUnsupported {
            property,
            device_id: self.device.id.clone(),
        }
    }

    fn send(&self, commands: Vec<DpCommand>) -> Result<()> {
        tracing::debug!("Sending {:?} to {}", commands, self.device.id);

        self.sender
            .send_commands(&self.device.id, &commands)
            .map_err(|source| ClimateError::Transport {
                device_id: self.device.id.clone(),
                source,
            })
    }
}
