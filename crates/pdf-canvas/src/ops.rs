//! PDF content-stream operator generation
//!
//! Coordinates here are native PDF coordinates (origin bottom-left); the
//! document layer converts from the canvas's top-origin system before
//! calling in.

use canvas::Color;

/// Operators to show hex-encoded text at a position.
///
/// Emits BT / rg / Tf / Td / Tj / ET.
pub fn text_ops(text_hex: &str, x: f64, y: f64, resource: &str, size: f64, color: Color) -> Vec<u8> {
    let mut ops = String::new();

    ops.push_str("BT\n");
    ops.push_str(&format!("{} {} {} rg\n", color.r, color.g, color.b));
    ops.push_str(&format!("/{resource} {size} Tf\n"));
    ops.push_str(&format!("{x} {y} Td\n"));
    ops.push_str(&format!("{text_hex} Tj\n"));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Operators to fill rectangles `(x, y, width, height)` in one color.
pub fn rect_ops(rects: &[(f64, f64, f64, f64)], color: Color) -> Vec<u8> {
    if rects.is_empty() {
        return Vec::new();
    }

    let mut ops = String::new();

    ops.push_str("q\n");
    ops.push_str(&format!("{} {} {} rg\n", color.r, color.g, color.b));
    for (x, y, width, height) in rects {
        ops.push_str(&format!("{x} {y} {width} {height} re\n"));
    }
    ops.push_str("f\n");
    ops.push_str("Q\n");

    ops.into_bytes()
}

/// Operators to draw an image XObject scaled into a box.
pub fn image_ops(resource: &str, x: f64, y: f64, width: f64, height: f64) -> Vec<u8> {
    format!("q\n{width} 0 0 {height} {x} {y} cm\n/{resource} Do\nQ\n").into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_ops() {
        let ops = text_ops(
            "<00480065006C006C006F>",
            100.0,
            700.0,
            "F1",
            12.0,
            Color::black(),
        );
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("BT"));
        assert!(ops_str.contains("0 0 0 rg"));
        assert!(ops_str.contains("/F1 12 Tf"));
        assert!(ops_str.contains("100 700 Td"));
        assert!(ops_str.contains("<00480065006C006C006F> Tj"));
        assert!(ops_str.contains("ET"));
    }

    #[test]
    fn test_text_ops_with_color() {
        let ops = text_ops("<0041>", 0.0, 0.0, "F1", 12.0, Color::from_rgb(255, 0, 0));
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("1 0 0 rg"));
    }

    #[test]
    fn test_rect_ops() {
        let ops = rect_ops(&[(5.0, 10.0, 2.0, 50.0), (9.0, 10.0, 4.0, 50.0)], Color::black());
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.starts_with("q\n"));
        assert!(ops_str.contains("5 10 2 50 re"));
        assert!(ops_str.contains("9 10 4 50 re"));
        assert!(ops_str.contains("f\n"));
        assert!(ops_str.ends_with("Q\n"));
    }

    #[test]
    fn test_rect_ops_empty() {
        assert!(rect_ops(&[], Color::black()).is_empty());
    }

    #[test]
    fn test_image_ops() {
        let ops = image_ops("Im1", 100.0, 200.0, 50.0, 75.0);
        let ops_str = String::from_utf8(ops).unwrap();

        assert!(ops_str.contains("50 0 0 75 100 200 cm"));
        assert!(ops_str.contains("/Im1 Do"));
    }
}
