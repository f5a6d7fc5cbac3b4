pub mod cli;
pub mod port;
pub mod protocol;
pub mod reader;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use imu::{ImuError, LineSource, OrientationState};
pub use port::*;
pub use protocol::{decode_lossy, parse_line};
pub use reader::{InputReader, Poll};
