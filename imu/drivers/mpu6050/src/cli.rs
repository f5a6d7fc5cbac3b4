use crate::port::{SerialConfig, DEFAULT_BAUD_RATE, DEFAULT_PORT, DEFAULT_TIMEOUT_MS};
use std::time::Duration;

/// Serial connection flags shared by the command-line tools.
#[derive(clap::Args, Debug, Clone)]
pub struct SerialArgs {
    /// Serial device the MPU6050 is attached to
    #[arg(long, default_value = DEFAULT_PORT)]
    pub port: String,

    #[arg(long, default_value_t = DEFAULT_BAUD_RATE)]
    pub baud_rate: u32,

    /// Read timeout in milliseconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_MS)]
    pub timeout_ms: u64,
}

impl SerialArgs {
    pub fn to_config(&self) -> SerialConfig {
        SerialConfig {
            port: self.port.clone(),
            baud_rate: self.baud_rate,
            timeout: Duration::from_millis(self.timeout_ms),
        }
    }
}
