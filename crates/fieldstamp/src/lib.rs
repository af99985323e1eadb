//! fieldstamp - declarative field stamping onto a page canvas
//!
//! A rule set maps record fields to drawing instructions; a [`Generator`]
//! interprets those rules once per data record, placing each resolved field
//! value onto a [`canvas::Canvas`] as text, a barcode, or an image.
//!
//! ```ignore
//! use fieldstamp::{Generator, RuleSet};
//! use pdf_canvas::PdfCanvas;
//!
//! let rules = RuleSet::load(r#"{ "name": [10, 700, { "type": "text", "align": "right" }] }"#)?;
//! let mut generator = Generator::new(rules, canvas);
//! generator.generate(&record)?;
//! let canvas = generator.into_canvas();
//! ```
//!
//! Rule sources are JSON: a mapping from field name to one draw instruction
//! `[x, y, options?]` or a sequence of them. Option defaults, the supported
//! option keys, and the primitive set are documented on
//! [`options::ResolvedOptions`].

pub mod align;
pub mod options;
pub mod record;
pub mod ruleset;

mod generate;

pub use align::aligned_x;
pub use generate::Generator;
pub use options::ResolvedOptions;
pub use record::{Attrs, Chain, Record};
pub use ruleset::{Instruction, Rule, RuleSet};

use thiserror::Error;

/// Errors that can occur while loading rules or generating a document
#[derive(Debug, Error)]
pub enum Error {
    #[error("rule source is empty; pass a rule file path or an inline JSON mapping")]
    EmptyRules,

    #[error("Failed to parse rule set: {0}")]
    Rules(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No drawing primitive named '{0}' (expected text, barcode or image)")]
    UnknownPrimitive(String),

    #[error("Symbology error: {0}")]
    Symbology(#[from] symbology::SymbologyError),

    #[error("Canvas error: {0}")]
    Canvas(#[from] canvas::CanvasError),
}

/// Result type for fieldstamp operations
pub type Result<T> = std::result::Result<T, Error>;
