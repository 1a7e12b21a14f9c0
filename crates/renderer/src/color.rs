//! Colors and the two-entry display colormap.

/// Color value in RGBA format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Grey level in `[0, 1]`, 0 being black.
    pub fn grey(level: f32) -> Self {
        let v = (level.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::rgb(v, v, v)
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 {
            return None;
        }

        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

        Some(Self::rgb(r, g, b))
    }

    /// Same color with its alpha scaled by `alpha`.
    pub fn with_alpha(self, alpha: f32) -> Self {
        let a = (self.a as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba(self.to_array())
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

pub const WHITE: Color = Color::rgb(255, 255, 255);
pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const RED: Color = Color::rgb(255, 0, 0);

/// "in oceans"
pub const OCEAN_BLUE: Color = Color::rgb(0x2c, 0x7f, 0xb8);
/// "on continent"
pub const CONTINENT_YELLOW: Color = Color::rgb(0xed, 0xf8, 0xb1);
/// Grey 0.95 painted over masked (oceanic) cells.
pub const OCEAN_MASK: Color = Color::rgb(242, 242, 242);
/// Grey 0.1
pub const COASTLINE: Color = Color::rgb(26, 26, 26);
pub const GRIDLINE: Color = Color::rgb(128, 128, 128);
/// Grey 0.8, used for legend frames.
pub const LEGEND_EDGE: Color = Color::rgb(204, 204, 204);

/// A listed colormap over the value range `[0, 1]`.
///
/// Value `v` picks entry `floor(v * n)`, clamped to the last entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    colors: Vec<Color>,
}

impl Colormap {
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors }
    }

    /// Ocean blue for 0, continent yellow for 1.
    pub fn bicolor() -> Self {
        Self::new(vec![OCEAN_BLUE, CONTINENT_YELLOW])
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color for a display value; `None` for NaN.
    pub fn color_for(&self, value: f32) -> Option<Color> {
        if value.is_nan() || self.colors.is_empty() {
            return None;
        }
        let n = self.colors.len();
        let idx = (value.clamp(0.0, 1.0) * n as f32).floor() as usize;
        self.colors.get(idx.min(n - 1)).copied()
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::bicolor()
    }
}
