use crate::protocol::{decode_lossy, parse_line};
use imu::{ImuError, LineSource, OrientationState};
use tracing::{debug, info, trace};

/// What a single [`InputReader::poll`] did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Poll {
    /// No bytes were waiting.
    Idle,
    /// A line arrived but was not a well-formed reading.
    Ignored,
    /// A reading replaced the orientation.
    Updated(OrientationState),
}

/// Pulls lines off a [`LineSource`] and applies well-formed readings.
pub struct InputReader<L> {
    source: L,
    lines_received: u64,
    lines_accepted: u64,
}

impl<L: LineSource> InputReader<L> {
    pub fn new(source: L) -> Self {
        InputReader {
            source,
            lines_received: 0,
            lines_accepted: 0,
        }
    }

    /// Reads at most one line. Returns `Idle` without blocking when the
    /// source has nothing pending; only connection failures are errors.
    pub fn poll(&mut self, state: &mut OrientationState) -> Result<Poll, ImuError> {
        if !self.source.has_pending()? {
            return Ok(Poll::Idle);
        }

        let raw = self.source.read_line()?;
        Ok(self.apply(&raw, state))
    }

    /// Feeds one raw line through decoding and parsing.
    pub fn apply(&mut self, raw: &[u8], state: &mut OrientationState) -> Poll {
        let text = decode_lossy(raw);
        let line = text.trim();
        self.lines_received += 1;
        debug!(line, "Received line");

        match parse_line(line) {
            Some(next) => {
                state.replace(next);
                self.lines_accepted += 1;
                Poll::Updated(next)
            }
            None => {
                trace!(line, "Ignoring line");
                Poll::Ignored
            }
        }
    }

    /// Closes the source if it is still open.
    pub fn close(&mut self) {
        if self.source.is_closed() {
            return;
        }
        self.source.close();
        info!(
            received = self.lines_received,
            accepted = self.lines_accepted,
            "Input reader closed"
        );
    }

    pub fn is_closed(&self) -> bool {
        self.source.is_closed()
    }

    pub fn lines_received(&self) -> u64 {
        self.lines_received
    }

    pub fn lines_accepted(&self) -> u64 {
        self.lines_accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::ScriptedSource;
    use std::io;

    fn drain(reader: &mut InputReader<ScriptedSource>, state: &mut OrientationState) {
        while reader.poll(state).unwrap() != Poll::Idle {}
    }

    #[test]
    fn idle_when_nothing_pending() {
        let mut reader = InputReader::new(ScriptedSource::new());
        let mut state = OrientationState::new(4.0, 5.0, 6.0);
        assert_eq!(reader.poll(&mut state).unwrap(), Poll::Idle);
        assert_eq!(state, OrientationState::new(4.0, 5.0, 6.0));
        assert_eq!(reader.lines_received(), 0);
    }

    #[test]
    fn well_formed_line_updates_state() {
        let mut reader = InputReader::new(ScriptedSource::from_lines(["ypr\t10.5\t-3.25\t180.0"]));
        let mut state = OrientationState::default();
        let expected = OrientationState::new(10.5, -3.25, 180.0);
        assert_eq!(reader.poll(&mut state).unwrap(), Poll::Updated(expected));
        assert_eq!(state, expected);
    }

    #[test]
    fn malformed_lines_leave_state_untouched() {
        let before = OrientationState::new(7.0, 8.0, 9.0);
        for line in [
            "ypr\t1\t2",
            "ypr\t1\tx\t3",
            "ypr\t1\t2\t3\t4",
            "YPR\t1\t2\t3",
            "\t1\t2\t3",
            "",
        ] {
            let mut reader = InputReader::new(ScriptedSource::from_lines([line]));
            let mut state = before;
            assert_eq!(reader.poll(&mut state).unwrap(), Poll::Ignored, "{:?}", line);
            assert_eq!(state, before, "{:?}", line);
        }
    }

    #[test]
    fn noise_after_valid_update_keeps_last_reading() {
        let mut source = ScriptedSource::from_lines(["ypr\t-1.5\t2.5\t90"]);
        for _ in 0..50 {
            source.push_line("ypr\tnan?\t1\t1");
            source.push_line("ypr\t1\t1");
            source.push_raw(b"\xff\xfe\n".to_vec());
        }
        let mut reader = InputReader::new(source);
        let mut state = OrientationState::default();
        drain(&mut reader, &mut state);
        assert_eq!(state, OrientationState::new(-1.5, 2.5, 90.0));
        assert_eq!(reader.lines_received(), 151);
        assert_eq!(reader.lines_accepted(), 1);
    }

    #[test]
    fn mixed_stream_keeps_only_complete_reading() {
        let mut reader = InputReader::new(ScriptedSource::from_lines([
            "noise",
            "ypr\t1\t2",
            "ypr\t1\t2\t3",
            "garbage\t1\t2\t3",
        ]));
        let mut state = OrientationState::default();
        drain(&mut reader, &mut state);
        assert_eq!(state, OrientationState::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn invalid_bytes_inside_reading_are_dropped() {
        let mut source = ScriptedSource::new();
        source.push_raw(b"ypr\t1\xff2\t3\t4\r\n".to_vec());
        let mut reader = InputReader::new(source);
        let mut state = OrientationState::default();
        reader.poll(&mut state).unwrap();
        assert_eq!(state, OrientationState::new(12.0, 3.0, 4.0));
    }

    #[test]
    fn read_failure_propagates() {
        let mut source = ScriptedSource::from_lines(["ypr\t1\t2\t3"]);
        source.push_failure(io::ErrorKind::BrokenPipe);
        let mut reader = InputReader::new(source);
        let mut state = OrientationState::default();
        reader.poll(&mut state).unwrap();
        let err = reader.poll(&mut state).unwrap_err();
        assert!(matches!(err, ImuError::ReadError(_)));
        assert_eq!(state, OrientationState::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn close_reaches_source_once() {
        let source = ScriptedSource::new();
        let closes = source.close_counter();
        let mut reader = InputReader::new(source);
        reader.close();
        reader.close();
        assert!(reader.is_closed());
        assert_eq!(closes.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn poll_after_close_is_an_error() {
        let mut reader = InputReader::new(ScriptedSource::from_lines(["ypr\t1\t2\t3"]));
        reader.close();
        let mut state = OrientationState::default();
        assert!(matches!(reader.poll(&mut state), Err(ImuError::Closed)));
    }
}
