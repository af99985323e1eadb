//! Symbology registry - symbolic barcode names to concrete encoders
//!
//! Maps lowercase snake-case symbology keys (`"code_128"`, `"qr_code"`, ...)
//! to encoder factories. Linear codes are encoded by the `barcoders` crate,
//! QR codes by the `qrcode` crate; both are adapted to the renderer-agnostic
//! [`canvas::Modules`] pattern so any canvas backend can draw them.
//!
//! Supported keys: `bookland`, `code_128`, `code_25`, `code_25_interleaved`,
//! `code_39`, `code_93`, `ean_13`, `ean_8`, `qr_code`. The remaining keys of
//! the table (`code_25_iata`, `data_matrix`, `gs1_128`, `pdf_417`,
//! `upc_supplemental`) are recognized but have no encoder linked into this
//! build and resolve to [`SymbologyError::Unavailable`].

mod encoders;

use canvas::Modules;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised while resolving or constructing a barcode encoder
#[derive(Debug, Error)]
pub enum SymbologyError {
    #[error(
        "Symbology '{0}' is not defined. See the symbology table in the \
         `symbology` crate documentation for the available keys."
    )]
    NotDefined(String),

    #[error(
        "Symbology '{0}' has no encoder in this build. See \
         https://docs.rs/barcoders for the encoders available to link."
    )]
    Unavailable(String),

    #[error("Cannot encode payload as {symbology}: {reason}")]
    InvalidData { symbology: String, reason: String },
}

/// Result type for symbology operations
pub type Result<T> = std::result::Result<T, SymbologyError>;

/// A constructed barcode encoder holding its encoded module pattern.
pub trait Encoder: std::fmt::Debug {
    /// The encoded pattern, ready for a canvas to draw.
    fn modules(&self) -> &Modules;
}

/// Constructs an [`Encoder`] from the text to encode.
///
/// Construction validates the payload against the symbology's alphabet and
/// fails with [`SymbologyError::InvalidData`] on a mismatch.
pub type EncoderFactory = fn(&str) -> Result<Box<dyn Encoder>>;

static REGISTRY: Lazy<HashMap<&'static str, EncoderFactory>> = Lazy::new(|| {
    let mut table: HashMap<&'static str, EncoderFactory> = HashMap::new();
    table.insert("bookland", encoders::bookland);
    table.insert("code_128", encoders::code_128);
    table.insert("code_25", encoders::code_25);
    table.insert("code_25_interleaved", encoders::code_25_interleaved);
    table.insert("code_39", encoders::code_39);
    table.insert("code_93", encoders::code_93);
    table.insert("ean_13", encoders::ean_13);
    table.insert("ean_8", encoders::ean_8);
    table.insert("qr_code", encoders::qr_code);
    table
});

/// Keys the original symbology table names whose encoders are not linked in.
const UNAVAILABLE: &[&str] = &[
    "code_25_iata",
    "data_matrix",
    "gs1_128",
    "pdf_417",
    "upc_supplemental",
];

/// Resolve a symbology key to its encoder factory.
pub fn resolve(key: &str) -> Result<EncoderFactory> {
    if let Some(factory) = REGISTRY.get(key) {
        return Ok(*factory);
    }

    if UNAVAILABLE.contains(&key) {
        Err(SymbologyError::Unavailable(key.to_string()))
    } else {
        Err(SymbologyError::NotDefined(key.to_string()))
    }
}

/// Resolve `key` and construct an encoder for `data` in one step.
pub fn encode(key: &str, data: &str) -> Result<Box<dyn Encoder>> {
    resolve(key)?(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_key() {
        assert!(resolve("qr_code").is_ok());
        assert!(resolve("code_128").is_ok());
        assert!(resolve("ean_13").is_ok());
    }

    #[test]
    fn test_resolve_unknown_key() {
        match resolve("not_a_real_code") {
            Err(SymbologyError::NotDefined(key)) => assert_eq!(key, "not_a_real_code"),
            other => panic!("expected NotDefined, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_unavailable_key() {
        match resolve("data_matrix") {
            Err(SymbologyError::Unavailable(key)) => assert_eq!(key, "data_matrix"),
            other => panic!("expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_not_defined_carries_hint() {
        let message = resolve("not_a_real_code").unwrap_err().to_string();
        assert!(message.contains("not_a_real_code"));
        assert!(message.contains("symbology table"));
    }

    #[test]
    fn test_encode_qr() {
        let encoder = encode("qr_code", "https://example.com").unwrap();
        match encoder.modules() {
            Modules::Grid { size, dark } => {
                assert!(*size >= 21);
                assert_eq!(dark.len(), size * size);
            }
            other => panic!("expected grid, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_code_128() {
        let encoder = encode("code_128", "12345").unwrap();
        match encoder.modules() {
            Modules::Linear(bars) => {
                assert!(!bars.is_empty());
                assert!(bars.iter().any(|&b| b));
            }
            other => panic!("expected linear, got {other:?}"),
        }
    }

    #[test]
    fn test_encode_invalid_payload() {
        // EAN-13 only accepts digits
        match encode("ean_13", "not-digits") {
            Err(SymbologyError::InvalidData { symbology, .. }) => {
                assert_eq!(symbology, "ean_13")
            }
            other => panic!("expected InvalidData, got {other:?}"),
        }
    }
}
