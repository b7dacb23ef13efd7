use serde::Serialize;
use serde_json::Value;

/// A single data point write, the unit of an outbound command batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DpCommand {
    pub code: String,
    pub value: Value,
}

impl DpCommand {
    pub fn new(code: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            code: code.into(),
            value: value.into(),
        }
    }
}

pub trait CommandSender {
    //Submits the whole batch in one request. Codes the device doesn't have are ignored by the cloud.
    fn send_commands(&self, device_id: &str, commands: &[DpCommand]) -> anyhow::Result<()>;
}
