/// Linear RGBA colour used to clear the render target each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClearColor {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl ClearColor {
    /// Cornflower blue, the classic "nothing drawn yet" colour.
    pub const CORNFLOWER_BLUE: Self = Self::rgba(0.392, 0.584, 0.929, 1.0);

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for ClearColor {
    fn default() -> Self {
        Self::CORNFLOWER_BLUE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_cornflower_blue() {
        let c = ClearColor::default();
        assert_eq!(c, ClearColor::CORNFLOWER_BLUE);
        assert_eq!(c.to_array(), [0.392, 0.584, 0.929, 1.0]);
    }

    #[test]
    fn cornflower_is_opaque() {
        assert_eq!(ClearColor::CORNFLOWER_BLUE.a, 1.0);
    }
}
