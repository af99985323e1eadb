//! TrueType font handling: metrics, variants, and PDF embedding

use canvas::{CanvasError, FontStyle, Result};
use lopdf::{Dictionary, Object, Stream};
use std::collections::HashSet;

/// One loaded TrueType face with usage tracking for embedding.
#[derive(Debug, Clone)]
pub struct FontData {
    /// Font identifier (family name plus variant suffix)
    pub name: String,
    /// Raw TTF data
    pub ttf_data: Vec<u8>,
    /// Characters drawn with this font (drives /W and ToUnicode generation)
    pub used_chars: HashSet<char>,
    face: Option<ttf_parser::Face<'static>>,
}

/// PDF objects generated for font embedding
pub struct FontObjects {
    /// Type0 font dictionary
    pub type0_font: Dictionary,
    /// CIDFont Type2 dictionary
    pub cid_font: Dictionary,
    /// Font descriptor dictionary
    pub font_descriptor: Dictionary,
    /// Font file stream (TTF data)
    pub font_file_stream: Stream,
    /// ToUnicode CMap stream
    pub tounicode_stream: Stream,
}

impl FontData {
    /// Parse TTF bytes into a usable font.
    pub fn from_ttf(name: &str, ttf_data: &[u8]) -> Result<Self> {
        let data = ttf_data.to_vec();

        // The face borrows the data for the document lifetime; fonts are
        // loaded once, so leaking the backing buffer is acceptable.
        let static_data: &'static [u8] = Box::leak(data.clone().into_boxed_slice());

        let face = ttf_parser::Face::parse(static_data, 0)
            .map_err(|e| CanvasError::FontParseError(format!("{e:?}")))?;

        Ok(Self {
            name: name.to_string(),
            ttf_data: data,
            used_chars: HashSet::new(),
            face: Some(face),
        })
    }

    /// Track characters for embedding.
    pub fn add_chars(&mut self, text: &str) {
        for c in text.chars() {
            self.used_chars.insert(c);
        }
    }

    /// Glyph ID for a character
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        self.face
            .as_ref()
            .and_then(|face| face.glyph_index(c).map(|id| id.0))
    }

    /// Glyph advance width in font units
    pub fn glyph_advance(&self, c: char) -> Option<u16> {
        self.face.as_ref().and_then(|face| {
            let glyph_id = face.glyph_index(c)?;
            face.glyph_hor_advance(glyph_id)
        })
    }

    pub fn units_per_em(&self) -> u16 {
        self.face
            .as_ref()
            .map(|face| face.units_per_em())
            .unwrap_or(1000)
    }

    pub fn ascender(&self) -> i16 {
        self.face
            .as_ref()
            .map(|face| face.ascender())
            .unwrap_or(800)
    }

    pub fn descender(&self) -> i16 {
        self.face
            .as_ref()
            .map(|face| face.descender())
            .unwrap_or(-200)
    }

    /// Text width in font units
    pub fn text_width(&self, text: &str) -> u32 {
        text.chars()
            .filter_map(|c| self.glyph_advance(c))
            .map(|w| w as u32)
            .sum()
    }

    /// Text width in points for a given font size
    pub fn text_width_points(&self, text: &str, font_size: f64) -> f64 {
        let width = self.text_width(text);
        (width as f64 / self.units_per_em() as f64) * font_size
    }

    /// Encode text as a glyph-id hex string for the Tj operator
    pub fn encode_text_hex(&self, text: &str) -> String {
        let mut result = String::new();
        for c in text.chars() {
            let gid = self.glyph_id(c).unwrap_or(0);
            result.push_str(&format!("{gid:04X}"));
        }
        format!("<{result}>")
    }

    /// Generate all PDF objects needed to embed this font
    pub fn to_pdf_objects(&self) -> FontObjects {
        let font_name = Object::Name(self.name.clone().into());

        let tounicode_content = self.generate_tounicode_cmap();
        let tounicode_stream = Stream::new(
            Dictionary::from_iter(vec![
                ("Type", "CMap".into()),
                ("Length", (tounicode_content.len() as i32).into()),
            ]),
            tounicode_content.into_bytes(),
        );

        let font_file_stream = Stream::new(
            Dictionary::from_iter(vec![
                ("Length1", (self.ttf_data.len() as i32).into()),
            ]),
            self.ttf_data.clone(),
        );

        let units_per_em = self.units_per_em() as i32;
        let ascender = self.ascender();
        let descender = self.descender();

        let font_bbox = vec![
            0.into(),
            descender.into(),
            units_per_em.into(),
            ascender.into(),
        ];

        let font_descriptor = Dictionary::from_iter(vec![
            ("Type", "FontDescriptor".into()),
            ("FontName", font_name.clone()),
            ("Flags", 4.into()), // Symbolic font
            ("FontBBox", font_bbox.into()),
            ("ItalicAngle", 0.into()),
            ("Ascent", ascender.into()),
            ("Descent", descender.into()),
            ("CapHeight", ascender.into()),
            ("StemV", 80.into()),
            ("FontFile2", Object::Reference((0, 0))), // Set when embedding
        ]);

        let widths_array = self.generate_widths_array();

        let cid_system_info = Dictionary::from_iter(vec![
            ("Registry", Object::string_literal("Adobe")),
            ("Ordering", Object::string_literal("Identity")),
            ("Supplement", 0.into()),
        ]);

        let cid_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "CIDFontType2".into()),
            ("BaseFont", font_name.clone()),
            ("CIDSystemInfo", cid_system_info.into()),
            ("FontDescriptor", Object::Reference((0, 0))), // Set when embedding
            ("W", widths_array.into()),
            ("DW", 1000.into()),
        ]);

        let type0_font = Dictionary::from_iter(vec![
            ("Type", "Font".into()),
            ("Subtype", "Type0".into()),
            ("BaseFont", font_name),
            ("Encoding", "Identity-H".into()),
            ("DescendantFonts", vec![Object::Reference((0, 0))].into()), // Set when embedding
            ("ToUnicode", Object::Reference((0, 0))),                   // Set when embedding
        ]);

        FontObjects {
            type0_font,
            cid_font,
            font_descriptor,
            font_file_stream,
            tounicode_stream,
        }
    }

    /// /W array with the advance of every glyph actually used
    fn generate_widths_array(&self) -> Vec<Object> {
        let mut widths = Vec::new();
        let face = match &self.face {
            Some(f) => f,
            None => return widths,
        };

        let mut gids: Vec<u16> = self
            .used_chars
            .iter()
            .filter_map(|&c| self.glyph_id(c))
            .collect();
        gids.sort_unstable();
        gids.dedup();

        // Individual [gid [width]] pairs work for any GID distribution
        for gid in gids {
            let advance = face
                .glyph_hor_advance(ttf_parser::GlyphId(gid))
                .unwrap_or(1000);
            widths.push(gid.into());
            widths.push(vec![advance.into()].into());
        }

        widths
    }

    /// ToUnicode CMap mapping used glyph ids back to Unicode
    fn generate_tounicode_cmap(&self) -> String {
        let mut cmap = String::new();

        cmap.push_str("/CIDInit /ProcSet findresource begin\n");
        cmap.push_str("12 dict begin\n");
        cmap.push_str("begincmap\n");
        cmap.push_str("/CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n");
        cmap.push_str("/CMapName /Adobe-Identity-UCS def\n");
        cmap.push_str("/CMapType 2 def\n");
        cmap.push_str("1 begincodespacerange\n");
        cmap.push_str("<0000> <FFFF>\n");
        cmap.push_str("endcodespacerange\n");

        let mut char_list: Vec<char> = self.used_chars.iter().copied().collect();
        char_list.sort_by_key(|c| *c as u32);

        if !char_list.is_empty() {
            // The PDF spec recommends at most 100 entries per bfchar section
            for chunk in char_list.chunks(100) {
                cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
                for c in chunk {
                    let gid = self.glyph_id(*c).unwrap_or(0);
                    cmap.push_str(&format!("<{gid:04X}> <{:04X}>\n", *c as u32));
                }
                cmap.push_str("endbfchar\n");
            }
        }

        cmap.push_str("endcmap\n");
        cmap.push_str("CMapName currentdict /CMap defineresource pop\n");
        cmap.push_str("end\n");
        cmap.push_str("end\n");

        cmap
    }
}

/// A font family with up to four style variants
#[derive(Debug, Clone, Default)]
pub struct FontFamily {
    pub regular: Option<FontData>,
    pub bold: Option<FontData>,
    pub italic: Option<FontData>,
    pub bold_italic: Option<FontData>,
}

impl FontFamily {
    /// Font data for the requested style, falling back toward regular.
    pub fn variant(&self, style: FontStyle) -> Option<&FontData> {
        match style {
            FontStyle::BoldItalic => self
                .bold_italic
                .as_ref()
                .or(self.bold.as_ref())
                .or(self.italic.as_ref())
                .or(self.regular.as_ref()),
            FontStyle::Bold => self.bold.as_ref().or(self.regular.as_ref()),
            FontStyle::Italic => self.italic.as_ref().or(self.regular.as_ref()),
            FontStyle::Normal => self.regular.as_ref(),
        }
    }

    /// Mutable variant access with the same fallback order.
    pub fn variant_mut(&mut self, style: FontStyle) -> Option<&mut FontData> {
        match style {
            FontStyle::BoldItalic => {
                if self.bold_italic.is_some() {
                    self.bold_italic.as_mut()
                } else if self.bold.is_some() {
                    self.bold.as_mut()
                } else if self.italic.is_some() {
                    self.italic.as_mut()
                } else {
                    self.regular.as_mut()
                }
            }
            FontStyle::Bold => {
                if self.bold.is_some() {
                    self.bold.as_mut()
                } else {
                    self.regular.as_mut()
                }
            }
            FontStyle::Italic => {
                if self.italic.is_some() {
                    self.italic.as_mut()
                } else {
                    self.regular.as_mut()
                }
            }
            FontStyle::Normal => self.regular.as_mut(),
        }
    }

    /// Every loaded variant.
    pub fn variants(&self) -> impl Iterator<Item = &FontData> {
        [
            self.regular.as_ref(),
            self.bold.as_ref(),
            self.italic.as_ref(),
            self.bold_italic.as_ref(),
        ]
        .into_iter()
        .flatten()
    }
}

/// Builder for registering font families
pub struct FontFamilyBuilder {
    regular: Option<Vec<u8>>,
    bold: Option<Vec<u8>>,
    italic: Option<Vec<u8>>,
    bold_italic: Option<Vec<u8>>,
}

impl FontFamilyBuilder {
    pub fn new() -> Self {
        Self {
            regular: None,
            bold: None,
            italic: None,
            bold_italic: None,
        }
    }

    pub fn regular(mut self, ttf_data: Vec<u8>) -> Self {
        self.regular = Some(ttf_data);
        self
    }

    pub fn bold(mut self, ttf_data: Vec<u8>) -> Self {
        self.bold = Some(ttf_data);
        self
    }

    pub fn italic(mut self, ttf_data: Vec<u8>) -> Self {
        self.italic = Some(ttf_data);
        self
    }

    pub fn bold_italic(mut self, ttf_data: Vec<u8>) -> Self {
        self.bold_italic = Some(ttf_data);
        self
    }

    /// Build the family, requiring at least a regular variant.
    pub fn build(self, family_name: &str) -> Result<FontFamily> {
        let regular = match self.regular {
            Some(ttf_data) => Some(FontData::from_ttf(family_name, &ttf_data)?),
            None => {
                return Err(CanvasError::FontParseError(format!(
                    "font family '{family_name}' must have at least a regular variant"
                )))
            }
        };

        let bold = self
            .bold
            .map(|data| FontData::from_ttf(&format!("{family_name}-bold"), &data))
            .transpose()?;

        let italic = self
            .italic
            .map(|data| FontData::from_ttf(&format!("{family_name}-italic"), &data))
            .transpose()?;

        let bold_italic = self
            .bold_italic
            .map(|data| FontData::from_ttf(&format!("{family_name}-bold-italic"), &data))
            .transpose()?;

        Ok(FontFamily {
            regular,
            bold,
            italic,
            bold_italic,
        })
    }
}

impl Default for FontFamilyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Face-less font for exercising the API without real TTF files.
    fn bare_font(name: &str) -> FontData {
        FontData {
            name: name.to_string(),
            ttf_data: vec![0u8; 100],
            used_chars: HashSet::new(),
            face: None,
        }
    }

    #[test]
    fn test_add_chars() {
        let mut font = bare_font("test");
        font.add_chars("Hello");

        assert_eq!(font.used_chars.len(), 4); // H, e, l, o
        assert!(font.used_chars.contains(&'H'));
        assert!(font.used_chars.contains(&'l'));
    }

    #[test]
    fn test_metrics_defaults_without_face() {
        let font = bare_font("test");
        assert_eq!(font.units_per_em(), 1000);
        assert_eq!(font.ascender(), 800);
        assert_eq!(font.descender(), -200);
        assert_eq!(font.text_width("Hello"), 0);
        assert_eq!(font.text_width_points("Hello", 12.0), 0.0);
    }

    #[test]
    fn test_encode_text_hex_without_face() {
        let font = bare_font("test");
        assert_eq!(font.encode_text_hex(""), "<>");
        assert_eq!(font.encode_text_hex("A"), "<0000>");
        assert_eq!(font.encode_text_hex("AB"), "<00000000>");
    }

    #[test]
    fn test_to_pdf_objects() {
        let mut font = bare_font("test");
        font.add_chars("Hello");

        let objects = font.to_pdf_objects();
        assert!(!objects.type0_font.is_empty());
        assert!(!objects.cid_font.is_empty());
        assert!(!objects.font_descriptor.is_empty());
        assert!(!objects.font_file_stream.content.is_empty());
        assert!(!objects.tounicode_stream.content.is_empty());
    }

    #[test]
    fn test_tounicode_cmap() {
        let mut font = bare_font("test");
        font.add_chars("AB");

        let cmap = font.generate_tounicode_cmap();
        assert!(cmap.contains("begincmap"));
        assert!(cmap.contains("<0000> <0041>")); // A, GID 0 without a face
        assert!(cmap.contains("<0000> <0042>")); // B
        assert!(cmap.contains("endcmap"));
    }

    #[test]
    fn test_variant_fallback() {
        let family = FontFamily {
            regular: Some(bare_font("serif")),
            bold: Some(bare_font("serif-bold")),
            italic: None,
            bold_italic: None,
        };

        assert_eq!(family.variant(FontStyle::Normal).unwrap().name, "serif");
        assert_eq!(family.variant(FontStyle::Bold).unwrap().name, "serif-bold");
        // Missing variants fall back
        assert_eq!(family.variant(FontStyle::Italic).unwrap().name, "serif");
        assert_eq!(
            family.variant(FontStyle::BoldItalic).unwrap().name,
            "serif-bold"
        );
    }

    #[test]
    fn test_builder_requires_regular() {
        let result = FontFamilyBuilder::new().build("serif");
        assert!(matches!(result, Err(CanvasError::FontParseError(_))));
    }
}
