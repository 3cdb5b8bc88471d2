use crate::target::FrameTarget;
use boxfall_common::ClearColor;
use boxfall_kernel::{FallState, QUAD_VERTEX_COUNT};

/// Where the driver is in its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Waiting for the host to report an empty event queue.
    Idle,
    /// Inside `render_frame`.
    Rendering,
}

/// One stage of a frame that talks to the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    Clear,
    UploadTransform,
    Draw,
    Present,
}

/// Outcome of one `render_frame` call.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub offset: f32,
    /// Steps whose target call failed, in frame order.
    pub failed: Vec<FrameStep>,
}

impl FrameReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Drives the falling box one frame at a time.
///
/// The host calls `render_frame` each time its event queue runs dry. Target
/// errors are logged and counted, never returned: the animation keeps going
/// whatever the backend does.
#[derive(Debug)]
pub struct FrameDriver {
    fall: FallState,
    clear_color: ClearColor,
    state: DriverState,
    failed_steps: u64,
}

impl FrameDriver {
    pub fn new(fall_rate: f32, clear_color: ClearColor) -> Self {
        Self {
            fall: FallState::new(fall_rate),
            clear_color,
            state: DriverState::Idle,
            failed_steps: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn fall(&self) -> &FallState {
        &self.fall
    }

    /// Total failed target calls since start.
    pub fn failed_steps(&self) -> u64 {
        self.failed_steps
    }

    /// Render one frame: clear, advance the offset, upload the transform,
    /// draw the quad, present.
    pub fn render_frame<T: FrameTarget>(&mut self, target: &mut T) -> FrameReport {
        self.state = DriverState::Rendering;
        let mut failed = Vec::new();

        let cleared = target.clear(self.clear_color);
        self.note(FrameStep::Clear, cleared, &mut failed);

        self.fall.advance();
        let transform = self.fall.transform();

        let uploaded = target.upload_transform(&transform);
        self.note(FrameStep::UploadTransform, uploaded, &mut failed);

        let drawn = target.draw(QUAD_VERTEX_COUNT);
        self.note(FrameStep::Draw, drawn, &mut failed);

        let presented = target.present();
        self.note(FrameStep::Present, presented, &mut failed);

        self.state = DriverState::Idle;
        FrameReport {
            frame: self.fall.frame(),
            offset: self.fall.offset(),
            failed,
        }
    }

    fn note<E: std::fmt::Display>(
        &mut self,
        step: FrameStep,
        result: Result<(), E>,
        failed: &mut Vec<FrameStep>,
    ) {
        if let Err(e) = result {
            tracing::warn!(frame = self.fall.frame(), ?step, "frame step failed: {e}");
            self.failed_steps += 1;
            failed.push(step);
        }
    }
}
