//! wgpu render backend for the falling box.
//!
//! `GpuContext` owns the device, queue and window surface. `QuadRenderer`
//! owns the quad's vertex buffer, the transform uniform and the pipeline.
//! `SurfaceTarget` ties the two together as a `FrameTarget` for one frame.
//!
//! # Invariants
//! - The surface is configured once, at the start-up size.
//! - The vertex buffer is written once; only the uniform changes per frame.

mod context;
mod error;
mod renderer;
mod shaders;

pub use context::GpuContext;
pub use error::{FrameError, InitializationError};
pub use renderer::{QuadRenderer, SurfaceTarget};
