use crate::error::InitializationError;
use boxfall_common::BoxConfig;
use std::sync::Arc;
use winit::window::Window;

/// Device limit tiers, tried in order. The first is what a full desktop GPU
/// offers; the second accepts older, downlevel hardware.
const LIMIT_PREFERENCES: [(&str, fn() -> wgpu::Limits); 2] = [
    ("default", wgpu::Limits::default),
    ("downlevel", wgpu::Limits::downlevel_defaults),
];

/// Device, queue and presentation surface for one window.
pub struct GpuContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
}

impl GpuContext {
    /// Create a hardware device and configure the window surface.
    ///
    /// There is no retry and no software fallback: failing here is fatal.
    pub fn new(window: Arc<Window>, config: &BoxConfig) -> Result<Self, InitializationError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or(InitializationError::NoAdapter)?;

        let (device, queue) = request_device(&adapter)?;

        let caps = surface.get_capabilities(&adapter);
        let format =
            pick_surface_format(&caps.formats).ok_or(InitializationError::NoSurfaceFormat)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: config.width.max(1),
            height: config.height.max(1),
            present_mode: present_mode(config.vsync),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        let adapter_info = adapter.get_info();
        tracing::info!(
            adapter = %adapter_info.name,
            backend = adapter_info.backend.to_str(),
            ?format,
            "graphics context ready"
        );

        Ok(Self {
            surface,
            device,
            queue,
            config: surface_config,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }

    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Current back buffer.
    ///
    /// A lost or outdated surface is reconfigured at the start-up size and
    /// asked once more; window resizes are otherwise ignored.
    pub fn acquire_frame(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        match self.surface.get_current_texture() {
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                tracing::debug!("surface {e}, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture()
            }
            other => other,
        }
    }
}

fn request_device(
    adapter: &wgpu::Adapter,
) -> Result<(wgpu::Device, wgpu::Queue), InitializationError> {
    let mut last_error = None;
    for (tier, limits) in LIMIT_PREFERENCES {
        let attempt = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("boxfall_device"),
                required_features: wgpu::Features::empty(),
                required_limits: limits(),
                memory_hints: Default::default(),
            },
            None,
        ));
        match attempt {
            Ok(pair) => {
                tracing::debug!(tier, "device created");
                return Ok(pair);
            }
            Err(e) => {
                tracing::warn!(tier, "device request rejected: {e}");
                last_error = Some(e);
            }
        }
    }
    Err(last_error.map_or(InitializationError::NoAdapter, InitializationError::NoDevice))
}

/// Prefer a plain UNORM format so the clear colour is written as given,
/// without an sRGB encode.
fn pick_surface_format(formats: &[wgpu::TextureFormat]) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .find(|f| !f.is_srgb())
        .or_else(|| formats.first())
        .copied()
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::AutoVsync
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn prefers_linear_format() {
        let formats = [TextureFormat::Bgra8UnormSrgb, TextureFormat::Bgra8Unorm];
        assert_eq!(
            pick_surface_format(&formats),
            Some(TextureFormat::Bgra8Unorm)
        );
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba8UnormSrgb];
        assert_eq!(
            pick_surface_format(&formats),
            Some(TextureFormat::Rgba8UnormSrgb)
        );
        assert_eq!(pick_surface_format(&[]), None);
    }

    #[test]
    fn vsync_maps_to_present_mode() {
        assert_eq!(present_mode(true), wgpu::PresentMode::AutoVsync);
        assert_eq!(present_mode(false), wgpu::PresentMode::AutoNoVsync);
    }

    #[test]
    fn limit_preferences_go_from_full_to_downlevel() {
        let full = (LIMIT_PREFERENCES[0].1)();
        let down = (LIMIT_PREFERENCES[1].1)();
        assert!(full.max_texture_dimension_2d >= down.max_texture_dimension_2d);
    }
}
