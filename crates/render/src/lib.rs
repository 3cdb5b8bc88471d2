//! Frame driver: renderer-agnostic sequencing of one frame.
//!
//! # Invariants
//! - A frame is always clear, advance, upload, draw, present, in that order.
//! - Per-frame failures never stop the loop and never stop the offset.
//!
//! The `FrameTarget` trait is what a backend implements; `DebugTextTarget`
//! records frames as text for the CLI and for tests.

mod driver;
mod target;

pub use driver::{DriverState, FrameDriver, FrameReport, FrameStep};
pub use target::{DebugTextTarget, FrameTarget, TextTargetError};

pub fn crate_info() -> &'static str {
    "boxfall-render v0.1.0"
}
