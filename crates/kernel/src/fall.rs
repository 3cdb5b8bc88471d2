use glam::{Mat4, Vec3};

/// Vertical drift of the box.
///
/// The offset grows by `rate` every frame with no clamp or wraparound, so with
/// a positive rate the box eventually leaves the screen and never comes back.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FallState {
    offset: f32,
    rate: f32,
    frame: u64,
}

impl FallState {
    /// Start at offset 0, frame 0.
    pub fn new(rate: f32) -> Self {
        Self {
            offset: 0.0,
            rate,
            frame: 0,
        }
    }

    /// Current vertical offset.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Offset step per frame.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Number of frames advanced so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Step one frame and return the new offset.
    pub fn advance(&mut self) -> f32 {
        self.offset += self.rate;
        self.frame += 1;
        tracing::trace!(frame = self.frame, offset = self.offset, "advanced");
        self.offset
    }

    /// Model transform for the current offset: a pure translation along Y.
    pub fn transform(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, self.offset, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_rest() {
        let s = FallState::new(0.001);
        assert_eq!(s.offset(), 0.0);
        assert_eq!(s.frame(), 0);
        assert_eq!(s.transform(), Mat4::IDENTITY);
    }

    #[test]
    fn advance_is_monotonic() {
        let mut s = FallState::new(0.001);
        let mut last = s.offset();
        for _ in 0..1000 {
            let next = s.advance();
            assert!(next > last);
            last = next;
        }
        assert_eq!(s.frame(), 1000);
        assert!((s.offset() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn offset_is_unbounded() {
        let mut s = FallState::new(0.5);
        for _ in 0..100 {
            s.advance();
        }
        // Well past the [-1, 1] clip range; nothing resets it.
        assert!(s.offset() > 10.0);
    }

    #[test]
    fn transform_translates_y_only() {
        let mut s = FallState::new(0.25);
        s.advance();
        s.advance();
        let t = s.transform();
        let p = t.transform_point3(Vec3::new(0.1, -0.1, 0.0));
        assert!((p.x - 0.1).abs() < 1e-6);
        assert!((p.y - 0.4).abs() < 1e-6);
        assert_eq!(p.z, 0.0);
    }

    #[test]
    fn zero_rate_still_counts_frames() {
        let mut s = FallState::new(0.0);
        s.advance();
        assert_eq!(s.offset(), 0.0);
        assert_eq!(s.frame(), 1);
    }
}
