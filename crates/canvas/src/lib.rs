//! Canvas abstraction - the drawing surface fieldstamp renders onto
//!
//! This crate defines the collaborator interface between the rule
//! interpreter and a concrete page renderer:
//! - The [`Canvas`] trait (text metrics, text/image/barcode placement)
//! - Shared drawing types ([`Color`], [`Align`], [`FontStyle`], [`TextStyle`],
//!   [`BarcodeStyle`], [`Modules`])
//!
//! The default PDF-backed implementation lives in the `pdf-canvas` crate;
//! tests drive the interpreter against recording mocks instead.

mod modules;
mod style;

pub use modules::{dark_runs, Modules};
pub use style::{Align, BarcodeStyle, Color, FontStyle, TextStyle};

use std::path::Path;
use thiserror::Error;

/// Errors that can occur on a drawing surface
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Render error: {0}")]
    RenderError(String),
}

/// Result type for canvas operations
pub type Result<T> = std::result::Result<T, CanvasError>;

/// A mutable page surface accumulating drawing side effects.
///
/// Coordinates are in points with the origin at the top-left of the page;
/// implementations convert to their native coordinate system. Font and color
/// always arrive as explicit parameters, so a canvas carries no current
/// drawing state between calls.
pub trait Canvas {
    /// Width in points of `text` rendered with `style`.
    fn text_width(&self, text: &str, style: &TextStyle) -> Result<f64>;

    /// Place `text` with its left edge at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> Result<()>;

    /// Place the image file at `path` with its top-left corner at `(x, y)`.
    ///
    /// Missing dimensions are derived from the image's aspect ratio, or its
    /// natural pixel size when both are absent.
    fn draw_image(
        &mut self,
        path: &Path,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<()>;

    /// Render an encoded barcode pattern with its top-left corner at `(x, y)`.
    fn draw_barcode(&mut self, code: &Modules, x: f64, y: f64, style: &BarcodeStyle) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_align_default() {
        assert_eq!(Align::default(), Align::Left);
    }

    #[test]
    fn test_error_display() {
        let err = CanvasError::FontNotFound("Times-Roman".to_string());
        assert_eq!(err.to_string(), "Font not found: Times-Roman");
    }
}
