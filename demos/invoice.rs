//! Renders a small invoice onto an A4 page.
//!
//! Usage: cargo run --example invoice -- <font.ttf> [out.pdf]

use anyhow::{Context, Result};
use fieldstamp::{Generator, RuleSet};
use pdf_canvas::{DocumentOptions, PdfCanvas};
use serde_json::json;

const RULES: &str = r#"{
    "invoice_number": [555, 60, { "align": "right", "size": 16, "style": "bold" }],
    "issued_on":      [555, 80, { "align": "right", "color": "555555" }],
    "customer":       [40, 140, { "size": 14 }],
    "address":        [40, 158, { "color": "555555" }],
    "description":    [40, 240],
    "total":          [[555, 240, { "align": "right" }],
                       [555, 700, { "align": "right", "size": 18, "style": "bold" }]],
    "payment_code":   [40, 640, { "type": "barcode", "symbology": "qr_code", "xdim": 2 }]
}"#;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let font_path = args
        .next()
        .context("usage: invoice <font.ttf> [out.pdf]")?;
    let out_path = args.next().unwrap_or_else(|| "invoice.pdf".to_string());

    let mut canvas = PdfCanvas::new(DocumentOptions::default())?;
    canvas.add_font("Times-Roman", &std::fs::read(&font_path)?)?;

    let record = json!({
        "invoice_number": "INV-2025-0042",
        "issued_on": "2025-06-01",
        "customer": "ACME Corp.",
        "address": "1 Rocket Road, Coyote Flats",
        "description": "Consulting services, May 2025",
        "total": "1,250.00",
        "payment_code": "https://pay.example.com/INV-2025-0042"
    });

    let mut generator = Generator::new(RuleSet::load(RULES)?, canvas);
    generator.generate(&record)?;

    let mut canvas = generator.into_canvas();
    canvas.save(&out_path)?;
    println!("wrote {out_path}");

    Ok(())
}
