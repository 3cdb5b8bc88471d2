use crate::types::ClearColor;
use thiserror::Error;

/// Errors raised when a configuration cannot drive a window.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("window size must be non-zero, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
    #[error("fall rate must be finite, got {0}")]
    NonFiniteRate(f32),
}

/// Start-up configuration for the falling box.
///
/// Defaults keep the demo's sizes and rates: an 800x600 window, a
/// cornflower-blue background, and an offset step of 0.001 per frame. The
/// window title and class are renamed after the program rather than the
/// graphics API the demo was written against.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxConfig {
    pub title: String,
    /// Window class name; only meaningful on Windows.
    pub window_class: String,
    pub width: u32,
    pub height: u32,
    /// Offset added to the box translation every rendered frame.
    pub fall_rate: f32,
    pub clear_color: ClearColor,
    /// Synchronise presentation with the display refresh.
    pub vsync: bool,
}

impl BoxConfig {
    pub const DEFAULT_TITLE: &'static str = "Box Falling";
    pub const DEFAULT_WINDOW_CLASS: &'static str = "BoxFallWindowClass";
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 600;
    pub const DEFAULT_FALL_RATE: f32 = 0.001;

    /// Check the invariants the renderer relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroSize {
                width: self.width,
                height: self.height,
            });
        }
        if !self.fall_rate.is_finite() {
            return Err(ConfigError::NonFiniteRate(self.fall_rate));
        }
        Ok(())
    }
}

impl Default for BoxConfig {
    fn default() -> Self {
        Self {
            title: Self::DEFAULT_TITLE.into(),
            window_class: Self::DEFAULT_WINDOW_CLASS.into(),
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            fall_rate: Self::DEFAULT_FALL_RATE,
            clear_color: ClearColor::default(),
            vsync: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_demo_values() {
        let cfg = BoxConfig::default();
        assert_eq!(cfg.width, 800);
        assert_eq!(cfg.height, 600);
        assert_eq!(cfg.fall_rate, 0.001);
        assert_eq!(cfg.title, "Box Falling");
        assert_eq!(cfg.window_class, "BoxFallWindowClass");
        assert!(cfg.vsync);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_size_rejected() {
        let cfg = BoxConfig {
            height: 0,
            ..BoxConfig::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::ZeroSize {
                width: 800,
                height: 0
            })
        );
    }

    #[test]
    fn nan_rate_rejected() {
        let cfg = BoxConfig {
            fall_rate: f32::NAN,
            ..BoxConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(ConfigError::NonFiniteRate(_))));
    }

    #[test]
    fn negative_rate_is_allowed() {
        // A negative rate just moves the box the other way.
        let cfg = BoxConfig {
            fall_rate: -0.002,
            ..BoxConfig::default()
        };
        assert!(cfg.validate().is_ok());
    }
}
