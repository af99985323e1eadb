//! Drawing style types shared between the interpreter and canvas backends

use crate::CanvasError;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse a six-digit hex color such as `"000000"` or `"#1a2b3c"`.
    pub fn from_hex(hex: &str) -> Result<Self, CanvasError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(CanvasError::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0);
        Ok(Self::from_rgb(channel(0), channel(2), channel(4)))
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Horizontal text alignment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    /// Coerce a caller-supplied token to an alignment.
    ///
    /// Unrecognized tokens fall back to `Left`.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "center" => Align::Center,
            "right" => Align::Right,
            _ => Align::Left,
        }
    }
}

/// Font style token selecting a family variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// Coerce a caller-supplied token to a style.
    ///
    /// Unrecognized tokens fall back to `Normal`.
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "bold" => FontStyle::Bold,
            "italic" => FontStyle::Italic,
            "bold_italic" | "bold-italic" => FontStyle::BoldItalic,
            _ => FontStyle::Normal,
        }
    }
}

/// Fully resolved text appearance for one drawing call
#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Registered font family name
    pub family: String,
    /// Font size in points
    pub size: f64,
    /// Variant selector
    pub style: FontStyle,
    /// Fill color
    pub color: Color,
}

impl TextStyle {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            style: FontStyle::Normal,
            color: Color::black(),
        }
    }
}

/// Appearance hints for barcode rendering
#[derive(Debug, Clone, PartialEq)]
pub struct BarcodeStyle {
    /// Width in points of the narrowest module
    pub xdim: f64,
    /// Bar height in points (linear codes only)
    pub height: f64,
    /// Module fill color
    pub color: Color,
}

impl Default for BarcodeStyle {
    fn default() -> Self {
        Self {
            xdim: 1.0,
            height: 50.0,
            color: Color::black(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("000000").unwrap(), Color::black());
        assert_eq!(Color::from_hex("ffffff").unwrap(), Color::white());
        assert_eq!(
            Color::from_hex("#ff0000").unwrap(),
            Color::from_rgb(255, 0, 0)
        );
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Color::from_hex("fff").is_err());
        assert!(Color::from_hex("zzzzzz").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn test_align_tokens() {
        assert_eq!(Align::from_token("center"), Align::Center);
        assert_eq!(Align::from_token("RIGHT"), Align::Right);
        assert_eq!(Align::from_token("left"), Align::Left);
        assert_eq!(Align::from_token("justify"), Align::Left);
    }

    #[test]
    fn test_style_tokens() {
        assert_eq!(FontStyle::from_token("bold"), FontStyle::Bold);
        assert_eq!(FontStyle::from_token("bold-italic"), FontStyle::BoldItalic);
        assert_eq!(FontStyle::from_token("bold_italic"), FontStyle::BoldItalic);
        assert_eq!(FontStyle::from_token("oblique"), FontStyle::Normal);
    }

    #[test]
    fn test_barcode_style_defaults() {
        let style = BarcodeStyle::default();
        assert_eq!(style.xdim, 1.0);
        assert_eq!(style.height, 50.0);
        assert_eq!(style.color, Color::black());
    }
}
