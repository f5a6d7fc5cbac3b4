use imu::{ImuError, LineSource};
use serialport::SerialPort;
use std::io::{self, BufRead, BufReader};
use std::time::Duration;
use tracing::{debug, info};

pub const DEFAULT_PORT: &str = "/dev/ttyACM0";
pub const DEFAULT_BAUD_RATE: u32 = 115_200;
pub const DEFAULT_TIMEOUT_MS: u64 = 100;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(DEFAULT_TIMEOUT_MS);

#[derive(Debug, Clone, PartialEq)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    /// Upper bound on a single blocking read.
    pub timeout: Duration,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            port: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD_RATE,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Newline-delimited reader over a serial device.
pub struct SerialLineSource {
    name: String,
    port: Option<BufReader<Box<dyn SerialPort>>>,
}

impl SerialLineSource {
    pub fn open(config: &SerialConfig) -> Result<Self, ImuError> {
        let port = serialport::new(&config.port, config.baud_rate)
            .timeout(config.timeout)
            .open()
            .map_err(|e| describe_open_failure(&config.port, e))?;

        info!(
            port = %config.port,
            baud_rate = config.baud_rate,
            timeout_ms = config.timeout.as_millis() as u64,
            "Opened serial port"
        );

        Ok(Self::from_port(&config.port, port))
    }

    /// Wraps a port that is already open and configured.
    pub fn from_port(name: &str, port: Box<dyn SerialPort>) -> Self {
        SerialLineSource {
            name: name.to_string(),
            port: Some(BufReader::new(port)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

// Lists what the OS does see so a wrong device path is easy to spot.
fn describe_open_failure(port: &str, error: serialport::Error) -> ImuError {
    let available = match serialport::available_ports() {
        Ok(ports) if !ports.is_empty() => ports
            .iter()
            .map(|p| p.port_name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        _ => "none".to_string(),
    };

    ImuError::SerialError(serialport::Error::new(
        error.kind(),
        format!("{}: {} (available ports: {})", port, error.description, available),
    ))
}

impl LineSource for SerialLineSource {
    fn has_pending(&mut self) -> Result<bool, ImuError> {
        let port = self.port.as_mut().ok_or(ImuError::Closed)?;
        if !port.buffer().is_empty() {
            return Ok(true);
        }
        Ok(port.get_ref().bytes_to_read()? > 0)
    }

    fn read_line(&mut self) -> Result<Vec<u8>, ImuError> {
        let port = self.port.as_mut().ok_or(ImuError::Closed)?;
        let mut line = Vec::new();
        match port.read_until(b'\n', &mut line) {
            Ok(0) => Err(ImuError::Disconnected(format!(
                "{} reached end of stream",
                self.name
            ))),
            Ok(_) => Ok(line),
            Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                debug!(partial_bytes = line.len(), "Serial read timed out");
                Ok(line)
            }
            Err(e) => Err(ImuError::ReadError(e)),
        }
    }

    fn close(&mut self) {
        if self.port.take().is_some() {
            info!(port = %self.name, "Closed serial port");
        }
    }

    fn is_closed(&self) -> bool {
        self.port.is_none()
    }
}

impl Drop for SerialLineSource {
    fn drop(&mut self) {
        self.close();
    }
}
