//! PDF canvas - the default drawing surface for fieldstamp
//!
//! Implements [`canvas::Canvas`] over a freshly constructed single-page
//! `lopdf` document:
//! - Page size and layout orientation configured at construction, with an
//!   optional template image drawn before any field rendering
//! - TrueType font families with style variants, measured via `ttf-parser`
//!   and embedded as Identity-H Type0 fonts
//! - JPEG and PNG images (DCTDecode passthrough and Flate re-encoding)
//! - Barcodes as filled rectangle runs
//!
//! ```ignore
//! use pdf_canvas::{DocumentOptions, PdfCanvas};
//!
//! let mut canvas = PdfCanvas::new(DocumentOptions::default())?;
//! canvas.add_font("Times-Roman", std::fs::read("LiberationSerif-Regular.ttf")?)?;
//! // ... hand it to a fieldstamp Generator ...
//! canvas.save("out.pdf")?;
//! ```

mod document;
mod font;
mod image;
mod ops;

pub use document::{DocumentOptions, Layout, PageSize, PdfCanvas, TemplateImage};
pub use font::{FontData, FontFamily, FontFamilyBuilder};
pub use image::ImageXObject;

pub use canvas::{CanvasError, Result};
