pub mod climate;
pub mod device;
pub mod discovery;
pub mod dpcode;
pub mod resolver;
pub mod sender;
pub mod type_data;

pub use climate::{ClimateState, TuyaClimateEntity};
pub use device::{DeviceManager, InstructionType, TuyaDevice};
pub use discovery::ClimatePlatform;
pub use sender::LoggingCommandSender;
