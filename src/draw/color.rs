//! RGBA color type and the named palette accepted by the config file.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use doodle_assist::draw::Color;
/// let red = Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 };
/// assert_eq!(red, Color::opaque(1.0, 0.0, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component
    pub r: f64,
    /// Green component
    pub g: f64,
    /// Blue component
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Fully opaque color from RGB components.
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Converts 0-255 channel values (as written in the config file).
    pub fn from_rgb8(rgb: [u8; 3]) -> Self {
        Self::opaque(
            rgb[0] as f64 / 255.0,
            rgb[1] as f64 / 255.0,
            rgb[2] as f64 / 255.0,
        )
    }
}

pub const RED: Color = Color::opaque(1.0, 0.0, 0.0);
pub const GREEN: Color = Color::opaque(0.0, 1.0, 0.0);
pub const BLUE: Color = Color::opaque(0.0, 0.0, 1.0);
pub const YELLOW: Color = Color::opaque(1.0, 1.0, 0.0);
pub const ORANGE: Color = Color::opaque(1.0, 0.5, 0.0);
pub const PINK: Color = Color::opaque(1.0, 0.0, 1.0);
pub const WHITE: Color = Color::opaque(1.0, 1.0, 1.0);
pub const BLACK: Color = Color::opaque(0.0, 0.0, 0.0);
