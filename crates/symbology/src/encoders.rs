//! Encoder adapters over the barcode libraries

use crate::{Encoder, Result, SymbologyError};
use barcoders::sym::code128::Code128;
use barcoders::sym::code39::Code39;
use barcoders::sym::code93::Code93;
use barcoders::sym::ean13::EAN13;
use barcoders::sym::ean8::EAN8;
use barcoders::sym::tf::TF;
use canvas::Modules;
use qrcode::{EcLevel, QrCode};

/// An encoder that has already produced its module pattern.
#[derive(Debug)]
struct Encoded(Modules);

impl Encoder for Encoded {
    fn modules(&self) -> &Modules {
        &self.0
    }
}

fn invalid(symbology: &str, reason: impl ToString) -> SymbologyError {
    SymbologyError::InvalidData {
        symbology: symbology.to_string(),
        reason: reason.to_string(),
    }
}

/// barcoders emits one byte per module, 1 for bar and 0 for space.
fn linear(encoded: Vec<u8>) -> Box<dyn Encoder> {
    Box::new(Encoded(Modules::Linear(
        encoded.into_iter().map(|module| module == 1).collect(),
    )))
}

pub(crate) fn code_39(data: &str) -> Result<Box<dyn Encoder>> {
    let code = Code39::new(data).map_err(|e| invalid("code_39", e))?;
    Ok(linear(code.encode()))
}

pub(crate) fn code_93(data: &str) -> Result<Box<dyn Encoder>> {
    let code = Code93::new(data).map_err(|e| invalid("code_93", e))?;
    Ok(linear(code.encode()))
}

pub(crate) fn code_128(data: &str) -> Result<Box<dyn Encoder>> {
    // Code 128 payloads start with a character-set selector; set B covers
    // the widest range of printable characters.
    let prefixed = format!("\u{0181}{data}");
    let code = Code128::new(&prefixed).map_err(|e| invalid("code_128", e))?;
    Ok(linear(code.encode()))
}

pub(crate) fn code_25(data: &str) -> Result<Box<dyn Encoder>> {
    let code = TF::standard(data).map_err(|e| invalid("code_25", e))?;
    Ok(linear(code.encode()))
}

pub(crate) fn code_25_interleaved(data: &str) -> Result<Box<dyn Encoder>> {
    let code = TF::interleaved(data).map_err(|e| invalid("code_25_interleaved", e))?;
    Ok(linear(code.encode()))
}

pub(crate) fn ean_13(data: &str) -> Result<Box<dyn Encoder>> {
    let code = EAN13::new(data).map_err(|e| invalid("ean_13", e))?;
    Ok(linear(code.encode()))
}

pub(crate) fn ean_8(data: &str) -> Result<Box<dyn Encoder>> {
    let code = EAN8::new(data).map_err(|e| invalid("ean_8", e))?;
    Ok(linear(code.encode()))
}

/// Bookland: an ISBN rendered as an EAN-13 in the 978 prefix range.
pub(crate) fn bookland(data: &str) -> Result<Box<dyn Encoder>> {
    let digits: String = data
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == 'X' || *c == 'x')
        .collect();

    // EAN13 recomputes the check digit from the first 12 positions.
    let payload = match digits.len() {
        // ISBN-10: drop the ISBN check digit before prefixing
        10 => format!("978{}", &digits[..9]),
        // Bare 9-digit ISBN body
        9 => format!("978{digits}"),
        // ISBN-13 / EAN form
        13 => digits[..12].to_string(),
        _ => {
            return Err(invalid(
                "bookland",
                "ISBN must contain 9, 10 or 13 digits",
            ))
        }
    };

    let code = EAN13::new(&payload).map_err(|e| invalid("bookland", e))?;
    Ok(linear(code.encode()))
}

pub(crate) fn qr_code(data: &str) -> Result<Box<dyn Encoder>> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::M)
        .map_err(|e| invalid("qr_code", e))?;

    let size = code.width();
    let dark = code
        .to_colors()
        .into_iter()
        .map(|color| color == qrcode::Color::Dark)
        .collect();

    Ok(Box::new(Encoded(Modules::Grid { size, dark })))
}
