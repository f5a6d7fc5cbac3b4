use std::thread;
use std::time::{Duration, Instant};
use tracing::trace;

pub const TARGET_FPS: u32 = 60;

pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, duration: Duration);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Caps a loop at a fixed rate: consecutive ticks are at least one period
/// apart. A frame that overruns its period is not made up later.
#[derive(Debug)]
pub struct FramePacer {
    period: Duration,
    last_tick: Option<Instant>,
    late_frames: u64,
}

impl FramePacer {
    pub fn new(fps: u32) -> Self {
        FramePacer {
            // Rounded up so the loop never exceeds `fps`.
            period: Duration::from_nanos(1_000_000_000u64.div_ceil(u64::from(fps.max(1)))),
            last_tick: None,
            late_frames: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn late_frames(&self) -> u64 {
        self.late_frames
    }

    /// Sleeps out the rest of the current period and returns how long it slept.
    pub fn tick<C: Clock + ?Sized>(&mut self, clock: &C) -> Duration {
        let mut slept = Duration::ZERO;
        if let Some(last) = self.last_tick {
            let elapsed = clock.now().saturating_duration_since(last);
            if elapsed < self.period {
                slept = self.period - elapsed;
                clock.sleep(slept);
            } else if elapsed > self.period {
                self.late_frames += 1;
                trace!(overrun = ?(elapsed - self.period), "Frame missed its deadline");
            }
        }
        self.last_tick = Some(clock.now());
        slept
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(TARGET_FPS)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::Clock;
    use std::cell::Cell;
    use std::time::{Duration, Instant};

    /// Clock that only moves when told to, or when slept on.
    #[derive(Debug)]
    pub struct ManualClock {
        start: Instant,
        now: Cell<Instant>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            let start = Instant::now();
            ManualClock {
                start,
                now: Cell::new(start),
            }
        }

        pub fn advance(&self, duration: Duration) {
            self.now.set(self.now.get() + duration);
        }

        pub fn elapsed(&self) -> Duration {
            self.now.get() - self.start
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.now.get()
        }

        fn sleep(&self, duration: Duration) {
            self.advance(duration);
        }
    }
}
