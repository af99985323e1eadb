//! PDF document wrapper implementing the canvas trait

use crate::font::{FontData, FontFamily, FontFamilyBuilder};
use crate::image::{display_dimensions, ImageXObject};
use crate::ops;
use canvas::{dark_runs, BarcodeStyle, Canvas, CanvasError, Modules, Result, TextStyle};
use log::debug;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSize {
    A4,
    Letter,
    Legal,
    /// Custom `(width, height)` in points
    Custom(f64, f64),
}

impl PageSize {
    /// Portrait dimensions `(width, height)` in points.
    pub fn dimensions(&self) -> (f64, f64) {
        match self {
            PageSize::A4 => (595.28, 841.89),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom(width, height) => (*width, *height),
        }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize::A4
    }
}

/// Page layout orientation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Layout {
    #[default]
    Portrait,
    Landscape,
}

/// A background image drawn once before field rendering begins
#[derive(Debug, Clone)]
pub struct TemplateImage {
    pub path: PathBuf,
    pub x: f64,
    pub y: f64,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Construction-time document configuration
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    pub page_size: PageSize,
    pub layout: Layout,
    pub template: Option<TemplateImage>,
}

/// A single-page PDF drawing surface.
///
/// Coordinates are top-origin points, converted to PDF bottom-origin
/// internally. Drawing calls buffer content-stream operators; fonts and
/// resources are finalized by [`save`](Self::save) or
/// [`to_bytes`](Self::to_bytes), which should be called once.
pub struct PdfCanvas {
    doc: Document,
    page_id: ObjectId,
    content_id: ObjectId,
    page_width: f64,
    page_height: f64,
    /// Registered font families by id
    families: HashMap<String, FontFamily>,
    /// Variant font name to page resource name ("F1", "F2", ...)
    font_resources: HashMap<String, String>,
    next_font_resource: u32,
    /// Image content hash to (resource name, pixel width, pixel height)
    image_resources: HashMap<u64, (String, u32, u32)>,
    /// Image resource name to embedded XObject id
    image_objects: Vec<(String, ObjectId)>,
    next_image_resource: u32,
    /// Buffered content-stream operators
    content: Vec<u8>,
}

impl PdfCanvas {
    /// Create a new single-page document.
    pub fn new(options: DocumentOptions) -> Result<Self> {
        let (mut width, mut height) = options.page_size.dimensions();
        if options.layout == Layout::Landscape {
            std::mem::swap(&mut width, &mut height);
        }

        let mut doc = Document::with_version("1.5");

        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(Stream::new(Dictionary::new(), Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), width.into(), height.into()],
            "Contents" => Object::Reference(content_id),
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", catalog_id);

        let mut canvas = Self {
            doc,
            page_id,
            content_id,
            page_width: width,
            page_height: height,
            families: HashMap::new(),
            font_resources: HashMap::new(),
            next_font_resource: 1,
            image_resources: HashMap::new(),
            image_objects: Vec::new(),
            next_image_resource: 1,
            content: Vec::new(),
        };

        if let Some(template) = &options.template {
            canvas.draw_image(
                &template.path,
                template.x,
                template.y,
                template.width,
                template.height,
            )?;
        }

        Ok(canvas)
    }

    /// Page dimensions `(width, height)` in points.
    pub fn page_size(&self) -> (f64, f64) {
        (self.page_width, self.page_height)
    }

    /// Register a single-variant font family.
    pub fn add_font(&mut self, name: &str, ttf_data: &[u8]) -> Result<()> {
        self.register_font_family(name, FontFamilyBuilder::new().regular(ttf_data.to_vec()))
    }

    /// Register a font family with its style variants.
    pub fn register_font_family(&mut self, name: &str, builder: FontFamilyBuilder) -> Result<()> {
        if self.families.contains_key(name) {
            return Err(CanvasError::RenderError(format!(
                "font family '{name}' already registered"
            )));
        }

        let family = builder.build(name)?;
        self.families.insert(name.to_string(), family);
        Ok(())
    }

    fn variant(&self, style: &TextStyle) -> Result<&FontData> {
        let family = self
            .families
            .get(&style.family)
            .ok_or_else(|| CanvasError::FontNotFound(style.family.clone()))?;

        family
            .variant(style.style)
            .ok_or_else(|| CanvasError::FontNotFound(style.family.clone()))
    }

    fn variant_mut(&mut self, style: &TextStyle) -> Result<&mut FontData> {
        let family = self
            .families
            .get_mut(&style.family)
            .ok_or_else(|| CanvasError::FontNotFound(style.family.clone()))?;

        family
            .variant_mut(style.style)
            .ok_or_else(|| CanvasError::FontNotFound(style.family.clone()))
    }

    /// Font data by variant name, across all families.
    fn font_data(&self, name: &str) -> Result<&FontData> {
        self.families
            .values()
            .flat_map(|family| family.variants())
            .find(|font| font.name == name)
            .ok_or_else(|| CanvasError::FontNotFound(name.to_string()))
    }

    /// Page resource name for a font variant, allocated on first use.
    fn font_resource(&mut self, font_name: &str) -> String {
        if let Some(resource) = self.font_resources.get(font_name) {
            return resource.clone();
        }

        let resource = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;
        self.font_resources
            .insert(font_name.to_string(), resource.clone());
        resource
    }

    /// Embed image bytes once, returning `(resource, width, height)`.
    fn image_ref(&mut self, data: &[u8]) -> Result<(String, u32, u32)> {
        let mut hasher = DefaultHasher::new();
        data.hash(&mut hasher);
        let key = hasher.finish();

        if let Some((resource, width, height)) = self.image_resources.get(&key) {
            return Ok((resource.clone(), *width, *height));
        }

        let xobject = ImageXObject::from_bytes(data)?;
        let (width, height) = (xobject.width, xobject.height);
        let object_id = self.doc.add_object(xobject.to_pdf_stream());

        let resource = format!("Im{}", self.next_image_resource);
        self.next_image_resource += 1;
        self.image_objects.push((resource.clone(), object_id));
        self.image_resources
            .insert(key, (resource.clone(), width, height));

        Ok((resource, width, height))
    }

    /// Embed used fonts, assemble page resources, and flush the content
    /// stream.
    fn finalize(&mut self) -> Result<()> {
        let font_resources: Vec<(String, String)> = self
            .font_resources
            .iter()
            .map(|(font, resource)| (font.clone(), resource.clone()))
            .collect();

        debug!("embedding {} fonts", font_resources.len());

        let mut font_refs: Vec<(String, ObjectId)> = Vec::new();
        for (font_name, resource) in font_resources {
            let objects = self.font_data(&font_name)?.to_pdf_objects();

            let font_file_id = self.doc.add_object(objects.font_file_stream);

            let mut descriptor = objects.font_descriptor;
            descriptor.set("FontFile2", Object::Reference(font_file_id));
            let descriptor_id = self.doc.add_object(descriptor);

            let mut cid_font = objects.cid_font;
            cid_font.set("FontDescriptor", Object::Reference(descriptor_id));
            let cid_font_id = self.doc.add_object(cid_font);

            let tounicode_id = self.doc.add_object(objects.tounicode_stream);

            let mut type0 = objects.type0_font;
            type0.set(
                "DescendantFonts",
                Object::Array(vec![Object::Reference(cid_font_id)]),
            );
            type0.set("ToUnicode", Object::Reference(tounicode_id));
            let type0_id = self.doc.add_object(type0);

            font_refs.push((resource, type0_id));
        }

        let mut resources = Dictionary::new();
        if !font_refs.is_empty() {
            let mut font_dict = Dictionary::new();
            for (resource, id) in &font_refs {
                font_dict.set(resource.as_bytes(), Object::Reference(*id));
            }
            resources.set("Font", Object::Dictionary(font_dict));
        }
        if !self.image_objects.is_empty() {
            let mut xobject_dict = Dictionary::new();
            for (resource, id) in &self.image_objects {
                xobject_dict.set(resource.as_bytes(), Object::Reference(*id));
            }
            resources.set("XObject", Object::Dictionary(xobject_dict));
        }

        self.doc.objects.insert(
            self.content_id,
            Object::Stream(Stream::new(Dictionary::new(), self.content.clone())),
        );

        if let Ok(Object::Dictionary(page)) = self.doc.get_object_mut(self.page_id) {
            page.set("Resources", Object::Dictionary(resources));
        }

        Ok(())
    }

    /// Finalize and write the document to a file.
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize()?;
        self.doc
            .save(path)
            .map_err(|e| CanvasError::RenderError(e.to_string()))?;
        Ok(())
    }

    /// Finalize and return the document bytes.
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize()?;
        let mut buffer = Vec::new();
        self.doc
            .save_to(&mut buffer)
            .map_err(|e| CanvasError::RenderError(e.to_string()))?;
        Ok(buffer)
    }
}

impl Canvas for PdfCanvas {
    fn text_width(&self, text: &str, style: &TextStyle) -> Result<f64> {
        Ok(self.variant(style)?.text_width_points(text, style.size))
    }

    fn draw_text(&mut self, text: &str, x: f64, y: f64, style: &TextStyle) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let (font_name, text_hex) = {
            let font = self.variant_mut(style)?;
            font.add_chars(text);
            (font.name.clone(), font.encode_text_hex(text))
        };
        let resource = self.font_resource(&font_name);

        let pdf_y = self.page_height - y;
        self.content.extend_from_slice(&ops::text_ops(
            &text_hex,
            x,
            pdf_y,
            &resource,
            style.size,
            style.color,
        ));

        Ok(())
    }

    fn draw_image(
        &mut self,
        path: &Path,
        x: f64,
        y: f64,
        width: Option<f64>,
        height: Option<f64>,
    ) -> Result<()> {
        debug!("embedding image {}", path.display());
        let data = std::fs::read(path)?;
        let (resource, orig_width, orig_height) = self.image_ref(&data)?;

        let (display_width, display_height) =
            display_dimensions(orig_width, orig_height, width, height);

        let pdf_y = self.page_height - y - display_height;
        self.content.extend_from_slice(&ops::image_ops(
            &resource,
            x,
            pdf_y,
            display_width,
            display_height,
        ));

        Ok(())
    }

    fn draw_barcode(&mut self, code: &Modules, x: f64, y: f64, style: &BarcodeStyle) -> Result<()> {
        let top = self.page_height - y;
        let mut rects = Vec::new();

        match code {
            Modules::Linear(bars) => {
                let base = top - style.height;
                for (start, len) in dark_runs(bars) {
                    rects.push((
                        x + start as f64 * style.xdim,
                        base,
                        len as f64 * style.xdim,
                        style.height,
                    ));
                }
            }
            Modules::Grid { size, dark } => {
                for row in 0..*size {
                    let slice = &dark[row * size..(row + 1) * size];
                    let base = top - (row as f64 + 1.0) * style.xdim;
                    for (start, len) in dark_runs(slice) {
                        rects.push((
                            x + start as f64 * style.xdim,
                            base,
                            len as f64 * style.xdim,
                            style.xdim,
                        ));
                    }
                }
            }
        }

        self.content
            .extend_from_slice(&ops::rect_ops(&rects, style.color));

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_sizes() {
        assert_eq!(PageSize::A4.dimensions(), (595.28, 841.89));
        assert_eq!(PageSize::Letter.dimensions(), (612.0, 792.0));
        assert_eq!(PageSize::Custom(100.0, 200.0).dimensions(), (100.0, 200.0));
    }

    #[test]
    fn test_new_document_portrait() {
        let canvas = PdfCanvas::new(DocumentOptions::default()).unwrap();
        assert_eq!(canvas.page_size(), (595.28, 841.89));
    }

    #[test]
    fn test_new_document_landscape() {
        let canvas = PdfCanvas::new(DocumentOptions {
            layout: Layout::Landscape,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(canvas.page_size(), (841.89, 595.28));
    }

    #[test]
    fn test_draw_text_requires_registered_font() {
        let mut canvas = PdfCanvas::new(DocumentOptions::default()).unwrap();
        let style = TextStyle::new("Times-Roman", 12.0);

        assert!(matches!(
            canvas.draw_text("hello", 10.0, 10.0, &style),
            Err(CanvasError::FontNotFound(_))
        ));
        assert!(matches!(
            canvas.text_width("hello", &style),
            Err(CanvasError::FontNotFound(_))
        ));
    }

    #[test]
    fn test_draw_empty_text_is_noop() {
        let mut canvas = PdfCanvas::new(DocumentOptions::default()).unwrap();
        let style = TextStyle::new("unregistered", 12.0);

        // Empty text short-circuits before the font lookup
        canvas.draw_text("", 10.0, 10.0, &style).unwrap();
        assert!(canvas.content.is_empty());
    }

    #[test]
    fn test_draw_linear_barcode_buffers_rects() {
        let mut canvas = PdfCanvas::new(DocumentOptions::default()).unwrap();
        let code = Modules::Linear(vec![true, true, false, true]);

        canvas
            .draw_barcode(&code, 5.0, 5.0, &BarcodeStyle::default())
            .unwrap();

        let content = String::from_utf8(canvas.content.clone()).unwrap();
        assert!(content.contains("re"));
        assert!(content.contains("f"));
        // Two dark runs, two rectangles
        assert_eq!(content.matches(" re").count(), 2);
    }

    #[test]
    fn test_draw_grid_barcode_buffers_rows() {
        let mut canvas = PdfCanvas::new(DocumentOptions::default()).unwrap();
        let code = Modules::Grid {
            size: 2,
            dark: vec![true, false, false, true],
        };

        canvas
            .draw_barcode(&code, 0.0, 0.0, &BarcodeStyle::default())
            .unwrap();

        let content = String::from_utf8(canvas.content.clone()).unwrap();
        assert_eq!(content.matches(" re").count(), 2);
    }

    #[test]
    fn test_to_bytes_produces_pdf_header() {
        let mut canvas = PdfCanvas::new(DocumentOptions::default()).unwrap();
        let bytes = canvas.to_bytes().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
