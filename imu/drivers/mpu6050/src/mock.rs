use imu::{ImuError, LineSource};
use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// In-memory [`LineSource`] that replays a fixed script of lines and
/// failures. Used for running without a device attached.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: VecDeque<Result<Vec<u8>, io::ErrorKind>>,
    closed: bool,
    close_calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = Self::new();
        for line in lines {
            source.push_line(line.as_ref());
        }
        source
    }

    /// Queues a line terminated the way the firmware terminates it.
    pub fn push_line(&mut self, line: &str) {
        let mut raw = line.as_bytes().to_vec();
        raw.extend_from_slice(b"\r\n");
        self.script.push_back(Ok(raw));
    }

    pub fn push_raw(&mut self, raw: Vec<u8>) {
        self.script.push_back(Ok(raw));
    }

    /// Queues a read that fails with `kind`.
    pub fn push_failure(&mut self, kind: io::ErrorKind) {
        self.script.push_back(Err(kind));
    }

    /// Shared count of `close` calls, readable after the source is moved.
    pub fn close_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.close_calls)
    }
}

impl LineSource for ScriptedSource {
    fn has_pending(&mut self) -> Result<bool, ImuError> {
        if self.closed {
            return Err(ImuError::Closed);
        }
        Ok(!self.script.is_empty())
    }

    fn read_line(&mut self) -> Result<Vec<u8>, ImuError> {
        if self.closed {
            return Err(ImuError::Closed);
        }
        match self.script.pop_front() {
            Some(Ok(raw)) => Ok(raw),
            Some(Err(kind)) => Err(ImuError::ReadError(io::Error::new(
                kind,
                "scripted read failure",
            ))),
            None => Ok(Vec::new()),
        }
    }

    fn close(&mut self) {
        self.closed = true;
        self.close_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}
