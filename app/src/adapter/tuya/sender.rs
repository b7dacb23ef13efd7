use crate::core::{CommandSender, DpCommand};

/// Sender for dry runs: commands are only logged.
#[derive(Debug, Default)]
pub struct LoggingCommandSender;

impl CommandSender for LoggingCommandSender {
    fn send_commands(&self, device_id: &str, commands: &[DpCommand]) -> anyhow::Result<()> {
        let payload = serde_json::to_string(commands)?;
        tracing::info!(device_id, commands = %payload, "Not sending commands, dry run");
        Ok(())
    }
}
