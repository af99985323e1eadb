//! Renders a 4x6" shipping label with a Code 128 tracking barcode.
//!
//! Usage: cargo run --example shipping_label -- <font.ttf> [out.pdf]

use anyhow::{Context, Result};
use fieldstamp::{Generator, RuleSet};
use pdf_canvas::{DocumentOptions, PageSize, PdfCanvas};
use serde_json::json;

const RULES: &str = r#"{
    "recipient":   [20, 40, { "size": 14, "style": "bold" }],
    "street":      [20, 60],
    "city":        [20, 78],
    "service":     [268, 40, { "align": "right", "color": "aa0000" }],
    "tracking":    [[34, 330, { "type": "barcode", "symbology": "code_128",
                                "xdim": 1.5, "height": 60 }],
                    [144, 350, { "align": "center", "size": 10 }]]
}"#;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let font_path = args
        .next()
        .context("usage: shipping_label <font.ttf> [out.pdf]")?;
    let out_path = args.next().unwrap_or_else(|| "label.pdf".to_string());

    let mut canvas = PdfCanvas::new(DocumentOptions {
        page_size: PageSize::Custom(288.0, 432.0), // 4x6 inches
        ..Default::default()
    })?;
    canvas.add_font("Times-Roman", &std::fs::read(&font_path)?)?;

    let record = json!({
        "recipient": "Jordan Reyes",
        "street": "74 Harbor Lane",
        "city": "Porttown, OR 97035",
        "service": "PRIORITY",
        "tracking": "4200970351234567"
    });

    let mut generator = Generator::new(RuleSet::load(RULES)?, canvas);
    generator.generate(&record)?;

    let mut canvas = generator.into_canvas();
    canvas.save(&out_path)?;
    println!("wrote {out_path}");

    Ok(())
}
