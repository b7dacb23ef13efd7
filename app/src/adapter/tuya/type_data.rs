use anyhow::{bail, ensure};
use serde::Deserialize;

/// Base of the power-of-ten scale of integer data points.
pub const SCALE_BASE: f64 = 10.0;

/// Type data of an integer data point. Values are transmitted as raw integers and
/// divided by `10^scale` for display.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerTypeData {
    pub code: String,
    pub min: i64,
    pub max: i64,
    pub scale: u32,
    pub step: i64,
    pub unit: Option<String>,
}

#[derive(Deserialize)]
struct IntegerValues {
    min: i64,
    max: i64,
    #[serde(default)]
    scale: i64,
    #[serde(default = "default_step")]
    step: i64,
    unit: Option<String>,
}

fn default_step() -> i64 {
    1
}

impl IntegerTypeData {
    pub fn from_json(code: &str, values: &str) -> anyhow::Result<Self> {
        let values: IntegerValues = serde_json::from_str(values)?;

        ensure!(values.scale >= 0, "Negative scale {} of {}", values.scale, code);
        ensure!(values.min <= values.max, "Min {} above max {} of {}", values.min, values.max, code);
        ensure!(values.step > 0, "Non-positive step {} of {}", values.step, code);

        Ok(Self {
            code: code.to_string(),
            min: values.min,
            max: values.max,
            scale: values.scale as u32,
            step: values.step,
            unit: values.unit,
        })
    }

    pub fn min_scaled(&self) -> f64 {
        self.scale_value(self.min as f64)
    }

    pub fn max_scaled(&self) -> f64 {
        self.scale_value(self.max as f64)
    }

    pub fn step_scaled(&self) -> f64 {
        self.scale_value(self.step as f64)
    }

    pub fn scale_value(&self, raw: f64) -> f64 {
        raw / self.divisor()
    }

    //No clamping to min/max, out of range values are left to the device to reject
    pub fn scale_value_back(&self, scaled: f64) -> i64 {
        let step = self.step as f64;
        ((scaled * self.divisor() / step).round() * step) as i64
    }

    fn divisor(&self) -> f64 {
        SCALE_BASE.powi(self.scale as i32)
    }
}

/// Type data of an enum data point: the permitted values in device order.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumTypeData {
    pub code: String,
    pub range: Vec<String>,
}

#[derive(Deserialize)]
struct EnumValues {
    range: Vec<String>,
}

impl EnumTypeData {
    pub fn from_json(code: &str, values: &str) -> anyhow::Result<Self> {
        let values: EnumValues = serde_json::from_str(values)?;

        if values.range.is_empty() {
            bail!("Empty range of {}", code);
        }

        Ok(Self {
            code: code.to_string(),
            range: values.range,
        })
    }
}
