use boxfall_common::ClearColor;
use glam::Mat4;
use thiserror::Error;

/// Something a frame can be rendered into.
///
/// Calls arrive in frame order: `clear`, `upload_transform`, `draw`,
/// `present`. A failing call does not stop the later ones; implementations
/// should make a call harmless when an earlier one in the same frame failed.
pub trait FrameTarget {
    type Error: std::fmt::Display;

    /// Start a frame by clearing the render target.
    fn clear(&mut self, color: ClearColor) -> Result<(), Self::Error>;

    /// Make the model transform visible to the next draw.
    fn upload_transform(&mut self, transform: &Mat4) -> Result<(), Self::Error>;

    /// Draw `vertex_count` vertices of the bound geometry.
    fn draw(&mut self, vertex_count: u32) -> Result<(), Self::Error>;

    /// Hand the finished frame to the display.
    fn present(&mut self) -> Result<(), Self::Error>;
}

#[derive(Debug, Error, PartialEq)]
pub enum TextTargetError {
    #[error("{0} called outside a frame")]
    NoFrame(&'static str),
}

/// Text target: writes one line per frame describing what would be drawn.
///
/// Useful for CLI output, logging, and testing the driver without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextTarget {
    out: String,
    pending: Option<String>,
    frames: u64,
}

impl DebugTextTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything presented so far.
    pub fn output(&self) -> &str {
        &self.out
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl FrameTarget for DebugTextTarget {
    type Error = TextTargetError;

    fn clear(&mut self, color: ClearColor) -> Result<(), TextTargetError> {
        self.pending = Some(format!(
            "clear=({:.3}, {:.3}, {:.3}, {:.3})",
            color.r, color.g, color.b, color.a
        ));
        Ok(())
    }

    fn upload_transform(&mut self, transform: &Mat4) -> Result<(), TextTargetError> {
        let line = self
            .pending
            .as_mut()
            .ok_or(TextTargetError::NoFrame("upload_transform"))?;
        let t = transform.w_axis;
        line.push_str(&format!(" translate=({:.4}, {:.4}, {:.4})", t.x, t.y, t.z));
        Ok(())
    }

    fn draw(&mut self, vertex_count: u32) -> Result<(), TextTargetError> {
        let line = self
            .pending
            .as_mut()
            .ok_or(TextTargetError::NoFrame("draw"))?;
        line.push_str(&format!(" draw={vertex_count}"));
        Ok(())
    }

    fn present(&mut self) -> Result<(), TextTargetError> {
        let line = self.pending.take().ok_or(TextTargetError::NoFrame("present"))?;
        self.frames += 1;
        self.out.push_str(&format!("[{:>6}] {line}\n", self.frames));
        Ok(())
    }
}
