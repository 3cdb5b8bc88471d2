use anyhow::{Context, Result};
use boxfall_common::BoxConfig;
use boxfall_render::FrameDriver;
use boxfall_render_wgpu::{GpuContext, InitializationError, QuadRenderer, SurfaceTarget};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "boxfall-desktop", about = "Render the falling box in a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Offset added to the box position every frame
    #[arg(long, default_value_t = BoxConfig::DEFAULT_FALL_RATE, allow_negative_numbers = true)]
    fall_rate: f32,

    /// Window width in pixels
    #[arg(long, default_value_t = BoxConfig::DEFAULT_WIDTH)]
    width: u32,

    /// Window height in pixels
    #[arg(long, default_value_t = BoxConfig::DEFAULT_HEIGHT)]
    height: u32,

    /// Present as fast as possible instead of waiting for vblank
    #[arg(long)]
    no_vsync: bool,
}

impl Cli {
    fn config(&self) -> BoxConfig {
        BoxConfig {
            width: self.width,
            height: self.height,
            fall_rate: self.fall_rate,
            vsync: !self.no_vsync,
            ..BoxConfig::default()
        }
    }
}

#[derive(Debug, Error)]
enum StartupError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error(transparent)]
    Graphics(#[from] InitializationError),
}

/// Everything that exists once start-up succeeded.
struct Scene {
    quad: QuadRenderer,
    gpu: GpuContext,
    window: Arc<Window>,
}

struct BoxApp {
    config: BoxConfig,
    driver: FrameDriver,
    scene: Option<Scene>,
    startup_error: Option<StartupError>,
}

impl BoxApp {
    fn new(config: BoxConfig) -> Self {
        let driver = FrameDriver::new(config.fall_rate, config.clear_color);
        Self {
            config,
            driver,
            scene: None,
            startup_error: None,
        }
    }

    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Scene, StartupError> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.as_str())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height))
            .with_visible(false);
        #[cfg(target_os = "windows")]
        let attrs = {
            use winit::platform::windows::WindowAttributesExtWindows;
            attrs.with_class_name(self.config.window_class.as_str())
        };
        let window = Arc::new(event_loop.create_window(attrs)?);

        let gpu = GpuContext::new(window.clone(), &self.config)?;
        let quad = QuadRenderer::new(gpu.device(), gpu.surface_format())?;

        Ok(Scene { quad, gpu, window })
    }

    /// Zero after a normal close, one if start-up failed.
    fn exit_status(&self) -> u8 {
        if self.startup_error.is_some() { 1 } else { 0 }
    }
}

impl ApplicationHandler for BoxApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.scene.is_some() || self.startup_error.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(scene) => {
                scene.window.set_visible(true);
                tracing::info!(
                    width = self.config.width,
                    height = self.config.height,
                    fall_rate = self.config.fall_rate,
                    "window open"
                );
                self.scene = Some(scene);
            }
            Err(e) => {
                tracing::error!("initialization failed: {e}");
                show_init_failure();
                self.startup_error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let Some(scene) = &self.scene else {
                    return;
                };
                let mut target = SurfaceTarget::new(&scene.gpu, &scene.quad);
                let report = self.driver.render_frame(&mut target);
                tracing::trace!(frame = report.frame, offset = report.offset, "frame");
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        // Queue empty: render again.
        if let Some(scene) = &self.scene {
            scene.window.request_redraw();
        }
    }
}

fn show_init_failure() {
    rfd::MessageDialog::new()
        .set_level(rfd::MessageLevel::Error)
        .set_title("Error")
        .set_description("Initialization failed")
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = cli.config();
    config.validate().context("invalid configuration")?;

    tracing::info!("boxfall-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = BoxApp::new(config);
    event_loop.run_app(&mut app)?;

    tracing::info!(
        frames = app.driver.fall().frame(),
        offset = app.driver.fall().offset(),
        failed_steps = app.driver.failed_steps(),
        "boxfall-desktop exiting"
    );

    Ok(ExitCode::from(app.exit_status()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["boxfall-desktop"]);
        assert_eq!(cli.config(), BoxConfig::default());
    }

    #[test]
    fn cli_overrides() {
        let cli = Cli::parse_from([
            "boxfall-desktop",
            "--fall-rate",
            "-0.01",
            "--width",
            "320",
            "--no-vsync",
        ]);
        let cfg = cli.config();
        assert_eq!(cfg.fall_rate, -0.01);
        assert_eq!(cfg.width, 320);
        assert_eq!(cfg.height, BoxConfig::DEFAULT_HEIGHT);
        assert!(!cfg.vsync);
    }

    #[test]
    fn clean_run_exits_zero() {
        let app = BoxApp::new(BoxConfig::default());
        assert_eq!(app.exit_status(), 0);
    }

    #[test]
    fn failed_startup_exits_one() {
        let mut app = BoxApp::new(BoxConfig::default());
        app.startup_error = Some(StartupError::Graphics(InitializationError::NoAdapter));
        assert_eq!(app.exit_status(), 1);
    }
}
