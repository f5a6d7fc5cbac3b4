use std::fmt;

// --- Orientation ---

/// Yaw, pitch and roll as reported by the sensor, in degrees.
///
/// Values are passed through raw: no wrapping into a fixed range and no
/// smoothing. The triple only ever changes as a whole via [`replace`].
///
/// [`replace`]: OrientationState::replace
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OrientationState {
    /// Rotation about the Z axis (deg)
    pub yaw: f64,
    /// Rotation about the Y axis (deg)
    pub pitch: f64,
    /// Rotation about the X axis (deg)
    pub roll: f64,
}

impl OrientationState {
    pub fn new(yaw: f64, pitch: f64, roll: f64) -> Self {
        OrientationState { yaw, pitch, roll }
    }

    /// Replaces all three angles at once.
    pub fn replace(&mut self, next: OrientationState) {
        *self = next;
    }
}

impl fmt::Display for OrientationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "yaw={} pitch={} roll={}", self.yaw, self.pitch, self.roll)
    }
}

// --- Standard Error Type ---

#[derive(Debug, thiserror::Error)]
pub enum ImuError {
    /// Opening or configuring the serial device failed
    #[error("Serial error: {0}")]
    SerialError(#[from] serialport::Error),
    /// Reading from the device failed for a reason other than a timeout
    #[error("Read error: {0}")]
    ReadError(#[from] std::io::Error),
    /// The device stopped producing data (unplugged, stream ended)
    #[error("Device disconnected: {0}")]
    Disconnected(String),
    /// The source was already closed
    #[error("Line source is closed")]
    Closed,
}

// --- Line Source ---

/// A newline-delimited byte stream coming from a sensor.
///
/// Implementations own the underlying connection. `close` releases it and
/// must be safe to call more than once.
pub trait LineSource {
    /// Whether unread bytes are waiting. Must not block.
    fn has_pending(&mut self) -> Result<bool, ImuError>;

    /// Reads one raw line, including its terminator if one arrived before
    /// the read timeout. A timeout yields whatever bytes were received.
    fn read_line(&mut self) -> Result<Vec<u8>, ImuError>;

    fn close(&mut self);

    fn is_closed(&self) -> bool;
}
