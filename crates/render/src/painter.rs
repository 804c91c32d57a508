//! Translation of positioned elements into PDF operations.
//!
//! The painter owns everything `printpdf`-specific: font registration, logo
//! decoding, Y-axis flipping, and the per-page operation stream with its
//! text-section and fill-color state tracking.

use std::collections::HashMap;

use billcraft_types::Color;
use printpdf::font::ParsedFont;
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::image::RawImage;
use printpdf::matrix::TextMatrix;
use printpdf::ops::Op;
use printpdf::text::TextItem;
use printpdf::xobject::{XObject, XObjectTransform};
use printpdf::{FontId, Mm, PdfConformance, PdfDocument, PdfPage, PdfSaveOptions, Pt, Rgb, XObjectId};

use crate::error::RenderError;
use crate::layout::{Element, FontKind, ImageBox, InvoiceLayout, RectFill, TextRun};
use crate::style;

static REGULAR_TTF: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");
static BOLD_TTF: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Bold.ttf");
static OBLIQUE_TTF: &[u8] = include_bytes!("../assets/fonts/DejaVuSans-Oblique.ttf");

struct Fonts {
    by_kind: HashMap<FontKind, FontId>,
    default_font: FontId,
}

impl Fonts {
    fn get(&self, kind: FontKind) -> &FontId {
        self.by_kind.get(&kind).unwrap_or(&self.default_font)
    }
}

/// A decoded logo registered as an image XObject, with its pixel dimensions.
struct LogoXObject {
    id: XObjectId,
    width_px: u32,
    height_px: u32,
}

/// Serialize a laid-out invoice into PDF bytes.
pub fn paint(layout: &InvoiceLayout, logo: Option<&[u8]>) -> Result<Vec<u8>, RenderError> {
    let mut doc = PdfDocument::new("Invoice");
    doc.metadata.info.conformance = PdfConformance::X3_2002_PDF_1_3;

    let fonts = register_fonts(&mut doc)?;
    let logo_xobject = match logo {
        Some(bytes) => Some(register_logo(&mut doc, bytes)?),
        None => None,
    };

    for page in &layout.pages {
        let mut ops = PageOps::new(&fonts);
        for element in &page.elements {
            match element {
                Element::Rect(rect) => ops.rect(rect),
                Element::Text(text) => ops.text(text),
                Element::Logo(image_box) => ops.logo(image_box, logo_xobject.as_ref()),
            }
        }
        doc.pages.push(PdfPage::new(Mm(210.0), Mm(297.0), ops.finish()));
    }

    let mut bytes = Vec::new();
    let mut warnings = Vec::new();
    doc.save_writer(&mut bytes, &PdfSaveOptions::default(), &mut warnings);
    pin_generated_ids(&mut bytes);
    log::debug!("rendered {} page(s), {} bytes", layout.pages.len(), bytes.len());
    Ok(bytes)
}

fn register_fonts(doc: &mut PdfDocument) -> Result<Fonts, RenderError> {
    let mut by_kind = HashMap::new();
    let mut default_font = None;
    for (kind, name, data) in [
        (FontKind::Regular, "F-regular", REGULAR_TTF),
        (FontKind::Bold, "F-bold", BOLD_TTF),
        (FontKind::Oblique, "F-oblique", OBLIQUE_TTF),
    ] {
        let mut warnings = Vec::new();
        let font = ParsedFont::from_bytes(data, 0, &mut warnings)
            .ok_or_else(|| RenderError::Font(format!("failed to parse embedded font {kind:?}")))?;
        // `PdfDocument::add_font` generates a random resource name, which
        // changes the font ordering and the serialized bytes between renders
        // of the same invoice. Fixed names keep the output reproducible.
        let id = FontId(name.to_string());
        doc.resources.fonts.map.insert(id.clone(), font);
        if kind == FontKind::Regular {
            default_font = Some(id.clone());
        }
        by_kind.insert(kind, id);
    }
    let default_font =
        default_font.ok_or_else(|| RenderError::Font("no regular font registered".into()))?;
    Ok(Fonts { by_kind, default_font })
}

fn register_logo(doc: &mut PdfDocument, bytes: &[u8]) -> Result<LogoXObject, RenderError> {
    let mut warnings = Vec::new();
    let raw_image = RawImage::decode_from_bytes(bytes, &mut warnings)
        .map_err(|e| RenderError::Image(format!("failed to decode logo image: {}", e)))?;
    let (width_px, height_px) = (raw_image.width as u32, raw_image.height as u32);
    // Fixed resource name, same reasoning as the font ids.
    let id = XObjectId("X-logo".to_string());
    doc.resources.xobjects.map.insert(id.clone(), XObject::Image(raw_image));
    Ok(LogoXObject { id, width_px, height_px })
}

/// `save_writer` stamps a fresh random id into the XMP packet
/// (`xmpMM:InstanceID`) and a random pair into the trailer `/ID` array on
/// every save; there is no option to supply them. Overwrite those three
/// 32-character ids in place so an unmodified invoice always serializes to
/// byte-identical output. Same-length replacement keeps the xref offsets
/// valid.
fn pin_generated_ids(bytes: &mut [u8]) {
    const ID_LEN: usize = 32;
    const PINNED: [u8; ID_LEN] = [b'A'; ID_LEN];
    const XMP_MARKER: &[u8] = b"<xmpMM:InstanceID>uuid:";

    if let Some(pos) = find_bytes(bytes, XMP_MARKER) {
        let start = pos + XMP_MARKER.len();
        if start + ID_LEN <= bytes.len() && is_generated_id(&bytes[start..start + ID_LEN]) {
            bytes[start..start + ID_LEN].copy_from_slice(&PINNED);
        }
    }

    // The trailer dictionary holds `/ID [(...) (...)]` near the end of the
    // file; both strings are generated the same way as the XMP instance id.
    let Some(id_key) = rfind_bytes(bytes, b"/ID") else {
        return;
    };
    let mut cursor = id_key;
    for _ in 0..2 {
        let Some(open) = bytes[cursor..].iter().position(|b| *b == b'(') else {
            return;
        };
        let start = cursor + open + 1;
        if start + ID_LEN > bytes.len() || !is_generated_id(&bytes[start..start + ID_LEN]) {
            return;
        }
        bytes[start..start + ID_LEN].copy_from_slice(&PINNED);
        cursor = start + ID_LEN;
    }
}

/// The generated ids only ever contain the characters `A` through `J`.
fn is_generated_id(bytes: &[u8]) -> bool {
    bytes.iter().all(|b| (b'A'..=b'J').contains(b))
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn rfind_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

fn to_pdf_color(c: Color) -> printpdf::color::Color {
    printpdf::color::Color::Rgb(Rgb::new(
        c.r as f32 / 255.0,
        c.g as f32 / 255.0,
        c.b as f32 / 255.0,
        None,
    ))
}

/// Builds the operation stream for one page, tracking text-section, font and
/// fill-color state so redundant operators are not emitted.
struct PageOps<'a> {
    fonts: &'a Fonts,
    ops: Vec<Op>,
    is_text_section_open: bool,
    current_font_id: Option<FontId>,
    current_font_size: Option<f32>,
    current_fill_color: Option<printpdf::color::Color>,
}

impl<'a> PageOps<'a> {
    fn new(fonts: &'a Fonts) -> Self {
        Self {
            fonts,
            ops: Vec::new(),
            is_text_section_open: false,
            current_font_id: None,
            current_font_size: None,
            current_fill_color: None,
        }
    }

    fn close_text_section_if_open(&mut self) {
        if self.is_text_section_open {
            self.ops.push(Op::EndTextSection);
            self.is_text_section_open = false;
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        let fill = to_pdf_color(color);
        if self.current_fill_color.as_ref() != Some(&fill) {
            self.ops.push(Op::SetFillColor { col: fill.clone() });
            self.current_fill_color = Some(fill);
        }
    }

    /// Rectangles cannot be drawn within a text section.
    fn rect(&mut self, rect: &RectFill) {
        self.close_text_section_if_open();
        self.set_fill_color(rect.color);

        let y = style::PAGE_HEIGHT - (rect.y + rect.height);
        let polygon = Polygon {
            rings: vec![PolygonRing {
                points: vec![
                    LinePoint { p: Point { x: Pt(rect.x), y: Pt(y) }, bezier: false },
                    LinePoint { p: Point { x: Pt(rect.x + rect.width), y: Pt(y) }, bezier: false },
                    LinePoint {
                        p: Point { x: Pt(rect.x + rect.width), y: Pt(y + rect.height) },
                        bezier: false,
                    },
                    LinePoint { p: Point { x: Pt(rect.x), y: Pt(y + rect.height) }, bezier: false },
                ],
            }],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::EvenOdd,
        };
        self.ops.push(Op::DrawPolygon { polygon });
    }

    fn text(&mut self, text: &TextRun) {
        if text.text.is_empty() {
            return;
        }
        let font_id = self.fonts.get(text.font).clone();

        if !self.is_text_section_open {
            self.ops.push(Op::StartTextSection);
            self.is_text_section_open = true;
        }
        self.set_fill_color(text.color);
        if self.current_font_id.as_ref() != Some(&font_id)
            || self.current_font_size != Some(text.size)
        {
            self.ops.push(Op::SetFontSize { size: Pt(text.size), font: font_id.clone() });
            self.current_font_id = Some(font_id.clone());
            self.current_font_size = Some(text.size);
        }

        // The baseline sits slightly below the top of the line box.
        let baseline_y = text.y + text.size * 0.8;
        let pdf_y = style::PAGE_HEIGHT - baseline_y;
        self.ops.push(Op::SetTextMatrix { matrix: TextMatrix::Translate(Pt(text.x), Pt(pdf_y)) });
        self.ops.push(Op::WriteText {
            items: vec![TextItem::Text(text.text.clone())],
            font: font_id,
        });
    }

    /// Scale the logo to fit its box, preserving the aspect ratio, anchored at
    /// the box's top-left corner.
    fn logo(&mut self, image_box: &ImageBox, xobject: Option<&LogoXObject>) {
        let Some(logo) = xobject else {
            // A logo box without decoded bytes means the layout and the paint
            // input disagree; skip the cell rather than abort a valid render.
            log::warn!("logo box present but no decoded logo image, skipping");
            return;
        };
        self.close_text_section_if_open();

        let scale = (image_box.width / logo.width_px as f32)
            .min(image_box.height / logo.height_px as f32);
        let drawn_height = logo.height_px as f32 * scale;
        let y = style::PAGE_HEIGHT - (image_box.y + drawn_height);
        let transform = XObjectTransform {
            translate_x: Some(Pt(image_box.x)),
            translate_y: Some(Pt(y)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            rotate: None,
            dpi: Some(72.0),
        };
        self.ops.push(Op::UseXobject { id: logo.id.clone(), transform });
    }

    fn finish(mut self) -> Vec<Op> {
        self.close_text_section_if_open();
        self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_rewrites_generated_ids_in_place() {
        let xmp_id = "B".repeat(32);
        let trailer_first = "C".repeat(32);
        let trailer_second = "D".repeat(32);
        let mut bytes = format!(
            "<xmpMM:InstanceID>uuid:{xmp_id}</xmpMM:InstanceID> stream data \
             trailer << /Root 1 0 R /ID [({trailer_first}) ({trailer_second})] >>"
        )
        .into_bytes();
        let length_before = bytes.len();

        pin_generated_ids(&mut bytes);

        assert_eq!(bytes.len(), length_before);
        let out = String::from_utf8(bytes).unwrap();
        let pinned = "A".repeat(32);
        assert!(out.contains(&format!("uuid:{pinned}")));
        assert_eq!(out.matches(&pinned).count(), 3);
    }

    #[test]
    fn pin_leaves_other_strings_untouched() {
        let mut bytes = b"/ID [(not a generated identifier) (short)]".to_vec();
        let before = bytes.clone();
        pin_generated_ids(&mut bytes);
        assert_eq!(bytes, before);
    }
}
