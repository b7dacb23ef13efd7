pub mod climate;
pub mod command;
pub mod error;

pub use command::{CommandSender, DpCommand};
pub use error::{ClimateError, Result};
