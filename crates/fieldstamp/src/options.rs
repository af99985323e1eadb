//! Drawing-option resolution
//!
//! Merges caller-supplied options against the documented defaults,
//! normalizes key and token casing, and preserves unrecognized keys for
//! type-specific primitives to read.

use crate::record::value_to_string;
use canvas::{Align, BarcodeStyle, CanvasError, Color, FontStyle, TextStyle};
use serde_json::{Map, Value};

/// Fully resolved drawing options for one instruction.
///
/// Defaults: `style=normal`, `size=12`, `align=left`, `format=false`,
/// `font="Times-Roman"`, `type=text`, `color="000000"`, `fixed=false`.
/// `format` and `fixed` are carried for rule compatibility; no primitive
/// currently consumes them.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOptions {
    pub style: FontStyle,
    pub size: f64,
    pub align: Align,
    pub format: bool,
    pub font: String,
    /// The primitive to dispatch to (`type` in rule sources)
    pub kind: String,
    /// Fill color as a six-digit hex string
    pub color: String,
    pub fixed: bool,
    /// Unrecognized keys, preserved as supplied (e.g. `symbology`, `width`,
    /// `height`, `xdim`)
    pub extra: Map<String, Value>,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            style: FontStyle::Normal,
            size: 12.0,
            align: Align::Left,
            format: false,
            font: "Times-Roman".to_string(),
            kind: "text".to_string(),
            color: "000000".to_string(),
            fixed: false,
            extra: Map::new(),
        }
    }
}

/// Merge caller options over the defaults.
///
/// Keys are canonicalized to lowercase with any symbol-style leading colon
/// stripped, so `":Style"`, `"Style"` and `"style"` all address the same
/// option. Never fails; `None` is an empty mapping.
pub fn resolve(caller: Option<&Map<String, Value>>) -> ResolvedOptions {
    let mut resolved = ResolvedOptions::default();

    let Some(caller) = caller else {
        return resolved;
    };

    for (key, value) in caller {
        let key = key.trim().trim_start_matches(':').to_ascii_lowercase();
        match key.as_str() {
            "style" => resolved.style = FontStyle::from_token(&value_to_string(value)),
            "size" => {
                if let Some(size) = number_like(value) {
                    resolved.size = size;
                }
            }
            "align" => resolved.align = Align::from_token(&value_to_string(value)),
            "format" => resolved.format = truthy(value),
            "font" => resolved.font = value_to_string(value),
            "type" => resolved.kind = value_to_string(value).to_ascii_lowercase(),
            "color" => resolved.color = value_to_string(value),
            "fixed" => resolved.fixed = truthy(value),
            _ => {
                resolved.extra.insert(key, value.clone());
            }
        }
    }

    resolved
}

impl ResolvedOptions {
    /// The `symbology` passthrough key, if supplied.
    pub fn symbology(&self) -> Option<String> {
        self.extra.get("symbology").map(value_to_string)
    }

    /// A numeric passthrough key such as `width`, `height` or `xdim`.
    pub fn dimension(&self, key: &str) -> Option<f64> {
        self.extra.get(key).and_then(number_like)
    }

    /// Text appearance for the canvas, with the color parsed.
    pub fn text_style(&self) -> Result<TextStyle, CanvasError> {
        Ok(TextStyle {
            family: self.font.clone(),
            size: self.size,
            style: self.style,
            color: Color::from_hex(&self.color)?,
        })
    }

    /// Barcode appearance for the canvas, honoring passthrough hints.
    pub fn barcode_style(&self) -> Result<BarcodeStyle, CanvasError> {
        let defaults = BarcodeStyle::default();
        Ok(BarcodeStyle {
            xdim: self.dimension("xdim").unwrap_or(defaults.xdim),
            height: self.dimension("height").unwrap_or(defaults.height),
            color: Color::from_hex(&self.color)?,
        })
    }
}

/// A number, or a string that parses as one.
fn number_like(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Loose boolean coercion for flag options.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().unwrap_or(0.0) != 0.0,
        Value::String(s) => !s.is_empty() && s != "false",
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn options(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_defaults() {
        let resolved = resolve(None);

        assert_eq!(resolved.style, FontStyle::Normal);
        assert_eq!(resolved.size, 12.0);
        assert_eq!(resolved.align, Align::Left);
        assert!(!resolved.format);
        assert_eq!(resolved.font, "Times-Roman");
        assert_eq!(resolved.kind, "text");
        assert_eq!(resolved.color, "000000");
        assert!(!resolved.fixed);
        assert!(resolved.extra.is_empty());
    }

    #[test]
    fn test_empty_mapping_equals_absent() {
        assert_eq!(resolve(Some(&Map::new())), resolve(None));
    }

    #[test]
    fn test_caller_keys_override_defaults() {
        let caller = options(json!({
            "style": "bold",
            "size": 9,
            "align": "right",
            "font": "Helvetica",
            "type": "barcode",
            "color": "ff0000",
            "fixed": true
        }));

        let resolved = resolve(Some(&caller));
        assert_eq!(resolved.style, FontStyle::Bold);
        assert_eq!(resolved.size, 9.0);
        assert_eq!(resolved.align, Align::Right);
        assert_eq!(resolved.font, "Helvetica");
        assert_eq!(resolved.kind, "barcode");
        assert_eq!(resolved.color, "ff0000");
        assert!(resolved.fixed);
    }

    #[test]
    fn test_unknown_keys_pass_through() {
        let caller = options(json!({
            "symbology": "code_128",
            "width": 120,
            "height": 40,
            "margin": 2
        }));

        let resolved = resolve(Some(&caller));
        assert_eq!(resolved.symbology(), Some("code_128".to_string()));
        assert_eq!(resolved.dimension("width"), Some(120.0));
        assert_eq!(resolved.dimension("height"), Some(40.0));
        assert_eq!(resolved.extra.get("margin"), Some(&json!(2)));
    }

    #[test]
    fn test_key_normalization() {
        let caller = options(json!({
            ":style": "italic",
            "SIZE": 18,
            "Align": "center"
        }));

        let resolved = resolve(Some(&caller));
        assert_eq!(resolved.style, FontStyle::Italic);
        assert_eq!(resolved.size, 18.0);
        assert_eq!(resolved.align, Align::Center);
    }

    #[test]
    fn test_unrecognized_tokens_fall_back() {
        let caller = options(json!({ "style": "shadowed", "align": "justify" }));

        let resolved = resolve(Some(&caller));
        assert_eq!(resolved.style, FontStyle::Normal);
        assert_eq!(resolved.align, Align::Left);
    }

    #[test]
    fn test_numeric_string_size() {
        let caller = options(json!({ "size": "14" }));
        assert_eq!(resolve(Some(&caller)).size, 14.0);
    }

    #[test]
    fn test_text_style_parses_color() {
        let caller = options(json!({ "color": "0000ff", "size": 10 }));
        let style = resolve(Some(&caller)).text_style().unwrap();

        assert_eq!(style.color, Color::from_rgb(0, 0, 255));
        assert_eq!(style.size, 10.0);
        assert_eq!(style.family, "Times-Roman");
    }

    #[test]
    fn test_text_style_rejects_bad_color() {
        let caller = options(json!({ "color": "red" }));
        assert!(resolve(Some(&caller)).text_style().is_err());
    }

    #[test]
    fn test_barcode_style_hints() {
        let caller = options(json!({ "xdim": 2, "height": 30 }));
        let style = resolve(Some(&caller)).barcode_style().unwrap();

        assert_eq!(style.xdim, 2.0);
        assert_eq!(style.height, 30.0);
    }
}
