/// RGBA color in linear space with values in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    pub const fn transparent() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Convert sRGB color (0-255) to linear space
    /// Uses proper sRGB gamma correction (ITU-R BT.709)
    #[inline]
    pub const fn from_srgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        const fn srgb_to_linear(c: u8) -> f32 {
            let x = c as f32 / 255.0;
            if x <= 0.04045 {
                x / 12.92
            } else {
                // Polynomial approximation of ((x + 0.055) / 1.055)^2.4
                let t = (x + 0.055) / 1.055;
                t * t * (0.5870 * t + 0.4130)
            }
        }

        Self::new(
            srgb_to_linear(r),
            srgb_to_linear(g),
            srgb_to_linear(b),
            a as f32 / 255.0,
        )
    }

    /// with alpha builder method taking f32
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.a = alpha;
        self
    }

    /// A color with zero alpha paints nothing, whatever its channels say.
    pub fn is_transparent(&self) -> bool {
        self.a <= 0.0
    }
}

impl Default for Color {
    /// Labels draw black text unless told otherwise.
    fn default() -> Self {
        css::BLACK
    }
}

/// CSS color constants
pub mod css {
    use super::Color;

    pub const BLACK: Color = Color::from_srgba(0, 0, 0, 255);
    pub const BLUE: Color = Color::from_srgba(0, 0, 255, 255);
    pub const NAVY: Color = Color::from_srgba(0, 0, 128, 255);
    pub const RED: Color = Color::from_srgba(255, 0, 0, 255);
    pub const WHITE: Color = Color::from_srgba(255, 255, 255, 255);
    pub const YELLOW: Color = Color::from_srgba(255, 255, 0, 255);
}
