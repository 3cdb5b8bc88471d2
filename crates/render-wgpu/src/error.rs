use thiserror::Error;

/// Start-up failures. Any of these aborts the program.
#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("failed to create window surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no hardware adapter can present to this window")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    NoDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture format")]
    NoSurfaceFormat,
    #[error("failed to create vertex buffer: {0}")]
    VertexBuffer(String),
}

/// Per-frame failures. The frame driver logs these and carries on.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("could not acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}
