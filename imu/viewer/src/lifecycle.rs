use crate::camera::base_view;
use crate::mesh::CUBE;
use crate::pacing::{Clock, FramePacer};
use crate::render::draw_frame;
use crate::surface::Surface;
use crate::transform::TransformStack;
use imu::{ImuError, LineSource, OrientationState};
use mpu6050_ypr::InputReader;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Starting,
    Running,
    Closing,
    Closed,
}

#[derive(Debug)]
pub enum ShutdownReason {
    /// The window was closed or Escape was pressed.
    UserQuit,
    /// The interrupt flag was raised (Ctrl+C).
    Interrupted,
    /// The sensor connection failed.
    Failed(ImuError),
}

impl ShutdownReason {
    pub fn is_error(&self) -> bool {
        matches!(self, ShutdownReason::Failed(_))
    }
}

#[derive(Debug)]
pub struct RunSummary {
    pub reason: ShutdownReason,
    pub frames: u64,
    /// Orientation shown on the last frame.
    pub state: OrientationState,
}

/// Owns the sensor reader and the display for the whole session and
/// guarantees both are released exactly once, however the session ends.
pub struct Visualizer<S: Surface, L: LineSource, C: Clock> {
    surface: S,
    reader: InputReader<L>,
    clock: C,
    pacer: FramePacer,
    stack: TransformStack,
    state: OrientationState,
    interrupt: Arc<AtomicBool>,
    phase: Phase,
    frames: u64,
}

impl<S: Surface, L: LineSource, C: Clock> Visualizer<S, L, C> {
    /// Opens the sensor first, then the display. If the sensor cannot be
    /// opened no display is created.
    ///
    /// `interrupt` may be raised at any point, including while the
    /// resources are still opening; the loop stops before its first frame.
    pub fn start<FL, FS>(
        open_source: FL,
        open_surface: FS,
        clock: C,
        interrupt: Arc<AtomicBool>,
    ) -> Result<Self, ImuError>
    where
        FL: FnOnce() -> Result<L, ImuError>,
        FS: FnOnce() -> S,
    {
        debug!(phase = ?Phase::Starting, "Opening sensor connection");
        let source = open_source().map_err(|e| {
            error!(error = %e, "Failed to open sensor connection");
            e
        })?;
        debug!(phase = ?Phase::Starting, "Opening display");
        let surface = open_surface();
        Ok(Self::new(surface, InputReader::new(source), clock, interrupt))
    }

    /// Wraps resources that are already open. Stays in `Starting` until
    /// the first frame runs.
    pub fn new(
        surface: S,
        reader: InputReader<L>,
        clock: C,
        interrupt: Arc<AtomicBool>,
    ) -> Self {
        Visualizer {
            surface,
            reader,
            clock,
            pacer: FramePacer::default(),
            stack: TransformStack::with_base(base_view()),
            state: OrientationState::default(),
            interrupt,
            phase: Phase::Starting,
            frames: 0,
        }
    }

    fn begin(&mut self) {
        if self.phase == Phase::Starting {
            self.phase = Phase::Running;
            debug!(phase = ?self.phase, "Visualizer running");
        }
    }

    /// Flag that stops the loop at the start of the next frame when set.
    pub fn interrupt_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupt)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &OrientationState {
        &self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn reader(&self) -> &InputReader<L> {
        &self.reader
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Runs one frame. Returns why the loop should stop, if it should.
    pub fn step(&mut self) -> Option<ShutdownReason> {
        self.begin();
        if self.interrupt.load(Ordering::SeqCst) {
            return Some(ShutdownReason::Interrupted);
        }
        if self.surface.poll_quit() {
            return Some(ShutdownReason::UserQuit);
        }
        if let Err(e) = self.reader.poll(&mut self.state) {
            return Some(ShutdownReason::Failed(e));
        }

        draw_frame(&mut self.surface, &mut self.stack, &self.state, &CUBE);
        if !self.surface.present() {
            return Some(ShutdownReason::UserQuit);
        }

        self.frames += 1;
        if self.frames % 300 == 0 {
            debug!(
                frames = self.frames,
                late = self.pacer.late_frames(),
                orientation = %self.state,
                "Render heartbeat"
            );
        }

        self.pacer.tick(&self.clock);
        None
    }

    /// Loops until quit, interrupt or a connection failure, then shuts down.
    pub fn run(mut self) -> RunSummary {
        self.begin();
        let reason = if self.phase == Phase::Running {
            loop {
                if let Some(reason) = self.step() {
                    break reason;
                }
            }
        } else {
            ShutdownReason::UserQuit
        };

        match &reason {
            ShutdownReason::Failed(e) => error!(error = %e, "Sensor connection failed"),
            other => info!(reason = ?other, frames = self.frames, "Stopping"),
        }

        self.shutdown();
        RunSummary {
            reason,
            frames: self.frames,
            state: self.state,
        }
    }

    /// Releases the display and closes the sensor connection. Runs once;
    /// later calls do nothing.
    pub fn shutdown(&mut self) {
        if matches!(self.phase, Phase::Closing | Phase::Closed) {
            return;
        }
        self.phase = Phase::Closing;
        self.surface.release();
        self.reader.close();
        self.phase = Phase::Closed;
        debug!(phase = ?self.phase, "Visualizer closed");
    }
}

impl<S: Surface, L: LineSource, C: Clock> Drop for Visualizer<S, L, C> {
    fn drop(&mut self) {
        self.shutdown();
    }
}
