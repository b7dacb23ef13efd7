use crate::adapter::tuya::device::InstructionType;
use crate::core::climate::HvacMode;

/// How a device category exposes presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetStrategy {
    /// Mode values without an HVAC mode counterpart are offered as presets.
    UnknownModes,
    /// An `eco` switch toggles between the `none` and `eco` presets, if the device has one.
    Eco,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClimateDescription {
    pub key: &'static str,
    //HVAC mode reported when the device is on but has no (known) mode
    pub switch_only_hvac_mode: HvacMode,
    pub preset_strategy: PresetStrategy,
}

static CLIMATE_DESCRIPTIONS: [ClimateDescription; 5] = [
    // Air conditioner
    // https://developer.tuya.com/en/docs/iot/categorykt?id=Kaiuz0z71ov2n
    ClimateDescription {
        key: "kt",
        switch_only_hvac_mode: HvacMode::Cool,
        preset_strategy: PresetStrategy::UnknownModes,
    },
    // Heater
    // https://developer.tuya.com/en/docs/iot/f?id=K9gf46epy4j82
    ClimateDescription {
        key: "qn",
        switch_only_hvac_mode: HvacMode::Heat,
        preset_strategy: PresetStrategy::UnknownModes,
    },
    // Heater
    // https://developer.tuya.com/en/docs/iot/categoryrs?id=Kaiuz0nfferyx
    ClimateDescription {
        key: "rs",
        switch_only_hvac_mode: HvacMode::Heat,
        preset_strategy: PresetStrategy::UnknownModes,
    },
    // Thermostat
    // https://developer.tuya.com/en/docs/iot/f?id=K9gf45ld5l0t9
    ClimateDescription {
        key: "wk",
        switch_only_hvac_mode: HvacMode::HeatCool,
        preset_strategy: PresetStrategy::Eco,
    },
    // Thermostatic radiator valve
    ClimateDescription {
        key: "wkf",
        switch_only_hvac_mode: HvacMode::Heat,
        preset_strategy: PresetStrategy::Eco,
    },
];

pub fn climate_description(category: &str) -> Option<&'static ClimateDescription> {
    CLIMATE_DESCRIPTIONS.iter().find(|d| d.key == category)
}

const TUYA_HVAC_TO_HA: [(&str, HvacMode); 8] = [
    ("auto", HvacMode::HeatCool),
    ("cold", HvacMode::Cool),
    ("freeze", HvacMode::Cool),
    ("heat", HvacMode::Heat),
    ("hot", HvacMode::Heat),
    ("manual", HvacMode::HeatCool),
    ("wet", HvacMode::Dry),
    ("wind", HvacMode::FanOnly),
];

/// Translation of Tuya mode values to HVAC modes. The shared base table is never
/// changed; category specific values live in the per-entity overrides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HvacModeTable {
    overrides: Vec<(&'static str, HvacMode)>,
}

impl HvacModeTable {
    pub fn new(description: &ClimateDescription, instruction_type: InstructionType) -> Self {
        let overrides = match (instruction_type, description.key) {
            //Thermostats on DP instructions report their mode as "0"/"1"
            (InstructionType::DpInstructions, "wk") => vec![("0", HvacMode::Auto), ("1", HvacMode::HeatCool)],
            _ => vec![],
        };

        Self { overrides }
    }

    pub fn to_hvac_mode(&self, tuya_mode: &str) -> Option<HvacMode> {
        self.overrides
            .iter()
            .chain(TUYA_HVAC_TO_HA.iter())
            .find(|(mode, _)| *mode == tuya_mode)
            .map(|(_, hvac_mode)| *hvac_mode)
    }

    pub fn is_known(&self, tuya_mode: &str) -> bool {
        self.to_hvac_mode(tuya_mode).is_some()
    }
}
