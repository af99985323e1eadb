//! Horizontal alignment against rendered glyph widths

use canvas::{Align, Canvas, TextStyle};

/// Fold text before width measurement.
///
/// Glyph metrics are unreliable for characters outside a font's coverage, so
/// widths are taken over a whitespace- and diacritic-folded rendering of the
/// text instead of the raw string.
pub fn fold_for_metrics(text: &str) -> String {
    slug::slugify(text)
}

/// Compute the horizontal origin for `text` anchored at `position`.
///
/// `left` (and any unrecognized alignment) keeps `position`; `center` and
/// `right` shift it back by half or all of the measured width.
pub fn aligned_x<C: Canvas + ?Sized>(
    canvas: &C,
    text: &str,
    position: f64,
    align: Align,
    style: &TextStyle,
) -> canvas::Result<f64> {
    match align {
        Align::Left => Ok(position),
        Align::Center | Align::Right => {
            let width = canvas.text_width(&fold_for_metrics(text), style)?;
            Ok(match align {
                Align::Center => position - width / 2.0,
                _ => position - width,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canvas::{BarcodeStyle, Modules, Result};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    /// Ten points per folded character.
    struct FixedWidth;

    impl Canvas for FixedWidth {
        fn text_width(&self, text: &str, _style: &TextStyle) -> Result<f64> {
            Ok(text.chars().count() as f64 * 10.0)
        }

        fn draw_text(&mut self, _: &str, _: f64, _: f64, _: &TextStyle) -> Result<()> {
            Ok(())
        }

        fn draw_image(
            &mut self,
            _: &Path,
            _: f64,
            _: f64,
            _: Option<f64>,
            _: Option<f64>,
        ) -> Result<()> {
            Ok(())
        }

        fn draw_barcode(&mut self, _: &Modules, _: f64, _: f64, _: &BarcodeStyle) -> Result<()> {
            Ok(())
        }
    }

    fn style() -> TextStyle {
        TextStyle::new("Times-Roman", 12.0)
    }

    #[test]
    fn test_left_keeps_position() {
        let x = aligned_x(&FixedWidth, "ACME", 100.0, Align::Left, &style()).unwrap();
        assert_eq!(x, 100.0);
    }

    #[test]
    fn test_right_subtracts_width() {
        // "ACME" folds to "acme": 4 characters, 40 points
        let x = aligned_x(&FixedWidth, "ACME", 100.0, Align::Right, &style()).unwrap();
        assert_eq!(x, 60.0);
    }

    #[test]
    fn test_center_subtracts_half_width() {
        let x = aligned_x(&FixedWidth, "ACME", 100.0, Align::Center, &style()).unwrap();
        assert_eq!(x, 80.0);
    }

    #[test]
    fn test_right_can_go_negative() {
        let x = aligned_x(&FixedWidth, "ACME", 10.0, Align::Right, &style()).unwrap();
        assert_eq!(x, -30.0);
    }

    #[test]
    fn test_fold_strips_diacritics_and_whitespace() {
        assert_eq!(fold_for_metrics("Crème Brûlée"), "creme-brulee");
        assert_eq!(fold_for_metrics("  spaced   out  "), "spaced-out");
    }
}
