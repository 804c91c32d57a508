//! Single-pass layout of the fixed invoice template.
//!
//! Walks the template top to bottom with a cursor, emitting positioned
//! elements and breaking to a new page whenever the next block would pass the
//! bottom margin. Coordinates are in points with a top-left origin; the
//! painter flips the Y axis when writing PDF operations.

use billcraft_model::{Invoice, LineItem};
use billcraft_types::{Color, currency};

use crate::style;

/// Which of the embedded faces a text run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontKind {
    Regular,
    Bold,
    Oblique,
}

/// One positioned run of text. `y` is the top of the line box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub font: FontKind,
    pub color: Color,
}

/// A filled rectangle (cell and row backgrounds).
#[derive(Debug, Clone, PartialEq)]
pub struct RectFill {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

/// The box the logo image is scaled to fit into.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextRun),
    Rect(RectFill),
    Logo(ImageBox),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

/// The laid-out document: positioned elements organized by page.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLayout {
    pub pages: Vec<Page>,
}

/// Approximate width of a text run. Alignment does not need font-metric
/// precision, so a fixed average glyph advance is good enough.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().count() as f32 * font_size * style::APPROX_CHAR_WIDTH
}

/// Split the content width into column (offset, width) pairs from relative
/// ratios. Offsets are absolute page coordinates.
fn columns(ratios: &[f32]) -> Vec<(f32, f32)> {
    let total: f32 = ratios.iter().sum();
    let mut x = style::MARGIN_LEFT;
    ratios
        .iter()
        .map(|r| {
            let width = style::content_width() * r / total;
            let col = (x, width);
            x += width;
            col
        })
        .collect()
}

struct PageBuilder {
    pages: Vec<Page>,
    current: Vec<Element>,
    y: f32,
}

impl PageBuilder {
    fn new() -> Self {
        Self { pages: Vec::new(), current: Vec::new(), y: style::MARGIN_TOP }
    }

    /// Break to a fresh page when `height` would not fit above the bottom
    /// margin.
    fn ensure_room(&mut self, height: f32) {
        if self.y + height > style::PAGE_HEIGHT - style::MARGIN_BOTTOM {
            self.pages.push(Page { elements: std::mem::take(&mut self.current) });
            self.y = style::MARGIN_TOP;
        }
    }

    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, font: FontKind, color: Color) {
        self.current.push(Element::Text(TextRun { text: text.into(), x, y, size, font, color }));
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.current.push(Element::Rect(RectFill { x, y, width, height, color }));
    }

    fn finish(mut self) -> InvoiceLayout {
        self.pages.push(Page { elements: self.current });
        InvoiceLayout { pages: self.pages }
    }
}

/// Lay out one invoice. Pure: identical input yields an identical layout.
pub fn layout_invoice(invoice: &Invoice) -> InvoiceLayout {
    let mut b = PageBuilder::new();

    header_band(&mut b, invoice.logo.is_some());
    customer_block(&mut b, invoice);
    let subtotal = item_table(&mut b, &invoice.items);
    summary_block(&mut b, subtotal);
    notes_section(&mut b, invoice);
    footer(&mut b);

    b.finish()
}

/// Three columns: logo (or blank), static company block, right-aligned title.
fn header_band(b: &mut PageBuilder, has_logo: bool) {
    let cols = columns(&style::HEADER_COLUMNS);

    let name_lh = style::line_height(style::COMPANY_NAME_SIZE);
    let tagline_lh = style::line_height(style::COMPANY_TAGLINE_SIZE);
    let company_height = name_lh + tagline_lh;
    let band_height = if has_logo { style::LOGO_BOX_SIZE } else { company_height };

    b.ensure_room(band_height);
    let top = b.y;

    if has_logo {
        b.current.push(Element::Logo(ImageBox {
            x: cols[0].0,
            y: top,
            width: style::LOGO_BOX_SIZE,
            height: style::LOGO_BOX_SIZE,
        }));
    }

    // Company block, vertically centered in the band.
    let company_top = top + (band_height - company_height).max(0.0) / 2.0;
    b.text(
        style::COMPANY_NAME,
        cols[1].0,
        company_top,
        style::COMPANY_NAME_SIZE,
        FontKind::Bold,
        style::BLACK,
    );
    b.text(
        style::COMPANY_TAGLINE,
        cols[1].0,
        company_top + name_lh,
        style::COMPANY_TAGLINE_SIZE,
        FontKind::Regular,
        style::DARK_GRAY,
    );

    // Title, right-aligned against the content edge.
    let title = "INVOICE";
    let title_lh = style::line_height(style::TITLE_SIZE);
    let title_x = style::MARGIN_LEFT + style::content_width() - text_width(title, style::TITLE_SIZE);
    let title_y = top + (band_height - title_lh).max(0.0) / 2.0;
    b.text(title, title_x, title_y, style::TITLE_SIZE, FontKind::Bold, style::TITLE_BLUE);

    b.y = top + band_height;
}

/// Two-column key/value rows in fixed order; values rendered verbatim.
fn customer_block(b: &mut PageBuilder, invoice: &Invoice) {
    b.y += style::CUSTOMER_SPACING_BEFORE;

    let cols = columns(&style::CUSTOMER_COLUMNS);
    let rows: [(&str, &str); 6] = [
        ("Invoice No:", &invoice.invoice_number),
        ("Invoice Date:", &invoice.invoice_date),
        ("Due Date:", &invoice.due_date),
        ("Customer Name:", &invoice.customer_name),
        ("Email:", &invoice.customer_email),
        ("Address:", &invoice.customer_address),
    ];

    for (label, value) in rows {
        b.ensure_room(style::CUSTOMER_ROW_HEIGHT);
        let text_top = b.y + style::CELL_PADDING;
        b.text(label, cols[0].0 + style::CELL_PADDING, text_top, style::BODY_SIZE, FontKind::Bold, style::BLACK);
        b.text(value, cols[1].0 + style::CELL_PADDING, text_top, style::BODY_SIZE, FontKind::Regular, style::BLACK);
        b.y += style::CUSTOMER_ROW_HEIGHT;
    }

    b.y += style::CUSTOMER_SPACING_AFTER;
}

/// The striped four-column line-item table. Returns the running subtotal.
fn item_table(b: &mut PageBuilder, items: &[LineItem]) -> f64 {
    b.y += style::TABLE_SPACING_BEFORE;

    let cols = columns(&style::ITEM_COLUMNS);

    // Header row: solid background, white bold centered text.
    b.ensure_room(style::TABLE_HEADER_ROW_HEIGHT);
    for (i, title) in style::ITEM_HEADERS.iter().enumerate() {
        let (x, width) = cols[i];
        b.rect(x, b.y, width, style::TABLE_HEADER_ROW_HEIGHT, style::TABLE_HEADER_BG);
        let text_x = x + (width - text_width(title, style::BODY_SIZE)) / 2.0;
        b.text(*title, text_x, b.y + style::TABLE_HEADER_PADDING, style::BODY_SIZE, FontKind::Bold, style::WHITE);
    }
    b.y += style::TABLE_HEADER_ROW_HEIGHT;

    let mut subtotal = 0.0;
    for (index, item) in items.iter().enumerate() {
        b.ensure_room(style::ITEM_ROW_HEIGHT);

        // Striped strictly by zero-based row index, independent of content.
        let bg = if index % 2 == 0 { style::ROW_BG } else { style::ROW_STRIPE_BG };
        b.rect(style::MARGIN_LEFT, b.y, style::content_width(), style::ITEM_ROW_HEIGHT, bg);

        let line_total = item.line_total();
        let text_top = b.y + style::CELL_PADDING;
        let cells = [
            item.description.clone(),
            item.quantity.to_string(),
            currency::format(style::CURRENCY_SYMBOL, item.unit_price),
            currency::format(style::CURRENCY_SYMBOL, line_total),
        ];
        for (i, cell) in cells.into_iter().enumerate() {
            b.text(cell, cols[i].0 + style::CELL_PADDING, text_top, style::CELL_SIZE, FontKind::Regular, style::BLACK);
        }

        subtotal += line_total;
        b.y += style::ITEM_ROW_HEIGHT;
    }

    subtotal
}

/// Right-aligned Subtotal / Tax / Grand Total block.
fn summary_block(b: &mut PageBuilder, subtotal: f64) {
    b.y += style::SUMMARY_SPACING_BEFORE;

    let tax = subtotal * style::TAX_RATE;
    let grand_total = subtotal + tax;
    let amounts = [subtotal, tax, grand_total];

    let table_width = style::content_width() * style::SUMMARY_WIDTH_FRACTION;
    let column_width = table_width / 2.0;
    let x0 = style::MARGIN_LEFT + style::content_width() - table_width;

    b.ensure_room(style::SUMMARY_LABELS.len() as f32 * style::SUMMARY_ROW_HEIGHT);
    for (label, amount) in style::SUMMARY_LABELS.iter().zip(amounts) {
        let value = currency::format(style::CURRENCY_SYMBOL, amount);
        let text_top = b.y + style::SUMMARY_CELL_PADDING;

        let label_x = x0 + column_width - text_width(label, style::BODY_SIZE);
        b.text(*label, label_x, text_top, style::BODY_SIZE, FontKind::Bold, style::BLACK);

        let value_x = x0 + table_width - text_width(&value, style::BODY_SIZE);
        b.text(value, value_x, text_top, style::BODY_SIZE, FontKind::Regular, style::BLACK);

        b.y += style::SUMMARY_ROW_HEIGHT;
    }
}

/// "Notes: <text>" paragraph, only when the field is present and non-empty.
fn notes_section(b: &mut PageBuilder, invoice: &Invoice) {
    if !invoice.has_notes() {
        return;
    }
    let notes = invoice.notes.as_deref().unwrap_or_default();

    b.y += style::NOTES_SPACING_BEFORE;
    let line_height = style::line_height(style::BODY_SIZE);
    let paragraph = format!("{}{}", style::NOTES_PREFIX, notes);
    for line in wrap_text(&paragraph, style::BODY_SIZE, style::content_width()) {
        b.ensure_room(line_height);
        b.text(line, style::MARGIN_LEFT, b.y, style::BODY_SIZE, FontKind::Regular, style::BLACK);
        b.y += line_height;
    }
}

/// Fixed two-line thank-you/payment-terms footer, centered, unconditional.
fn footer(b: &mut PageBuilder) {
    b.y += style::FOOTER_SPACING_BEFORE;
    let line_height = style::line_height(style::FOOTER_SIZE);

    b.ensure_room(style::FOOTER_LINES.len() as f32 * line_height);
    for line in style::FOOTER_LINES {
        let x = style::MARGIN_LEFT + (style::content_width() - text_width(line, style::FOOTER_SIZE)) / 2.0;
        b.text(line, x, b.y, style::FOOTER_SIZE, FontKind::Oblique, style::FOOTER_GRAY);
        b.y += line_height;
    }
}

/// Greedy word wrap against the approximate text width.
fn wrap_text(text: &str, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let candidate = if line.is_empty() { word.to_string() } else { format!("{line} {word}") };
        if !line.is_empty() && text_width(&candidate, font_size) > max_width {
            lines.push(std::mem::take(&mut line));
            line = word.to_string();
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use billcraft_model::LineItem;

    fn invoice_with(items: Vec<LineItem>) -> Invoice {
        Invoice {
            invoice_number: "INV-001".into(),
            invoice_date: "2025-03-01".into(),
            due_date: "2025-03-16".into(),
            customer_name: "Ada Lovelace".into(),
            customer_address: "12 Analytical Row".into(),
            customer_email: "ada@example.com".into(),
            items,
            ..Invoice::default()
        }
    }

    fn all_elements(layout: &InvoiceLayout) -> Vec<&Element> {
        layout.pages.iter().flat_map(|p| p.elements.iter()).collect()
    }

    /// Full-width rectangles are exactly the item-table body rows.
    fn body_row_rects(layout: &InvoiceLayout) -> Vec<&RectFill> {
        all_elements(layout)
            .into_iter()
            .filter_map(|e| match e {
                Element::Rect(r) if (r.width - style::content_width()).abs() < 0.01 => Some(r),
                _ => None,
            })
            .collect()
    }

    fn texts(layout: &InvoiceLayout) -> Vec<String> {
        all_elements(layout)
            .into_iter()
            .filter_map(|e| match e {
                Element::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn table_has_one_header_row_and_n_body_rows() {
        let layout = layout_invoice(&invoice_with(vec![
            LineItem::new("Widget", 2, 9.99),
            LineItem::new("Gadget", 1, 25.00),
            LineItem::new("Sprocket", 3, 1.25),
        ]));

        let header_cells = all_elements(&layout)
            .into_iter()
            .filter(|e| matches!(e, Element::Rect(r) if r.color == style::TABLE_HEADER_BG))
            .count();
        assert_eq!(header_cells, style::ITEM_HEADERS.len());
        assert_eq!(body_row_rects(&layout).len(), 3);
    }

    #[test]
    fn rows_are_striped_by_index_parity() {
        let layout = layout_invoice(&invoice_with(
            (0..5).map(|i| LineItem::new(format!("Item {i}"), 1, 1.0)).collect(),
        ));
        let rows = body_row_rects(&layout);
        for (index, row) in rows.iter().enumerate() {
            let expected = if index % 2 == 0 { style::ROW_BG } else { style::ROW_STRIPE_BG };
            assert_eq!(row.color, expected, "row {index}");
        }
    }

    #[test]
    fn rows_keep_input_order() {
        let layout = layout_invoice(&invoice_with(vec![
            LineItem::new("Zulu", 1, 1.0),
            LineItem::new("Alpha", 1, 1.0),
            LineItem::new("Mike", 1, 1.0),
        ]));
        let texts = texts(&layout);
        let zulu = texts.iter().position(|t| t == "Zulu").unwrap();
        let alpha = texts.iter().position(|t| t == "Alpha").unwrap();
        let mike = texts.iter().position(|t| t == "Mike").unwrap();
        assert!(zulu < alpha && alpha < mike);
    }

    #[test]
    fn row_totals_and_summary_use_two_decimal_currency() {
        let layout = layout_invoice(&invoice_with(vec![
            LineItem::new("Widget", 2, 9.99),
            LineItem::new("Gadget", 1, 25.00),
        ]));
        let texts = texts(&layout);

        // Row totals.
        assert!(texts.contains(&"₹19.98".to_string()));
        assert!(texts.contains(&"₹25.00".to_string()));

        // Subtotal, 10% tax, grand total.
        assert!(texts.contains(&"₹44.98".to_string()));
        assert!(texts.contains(&"₹4.50".to_string()));
        assert!(texts.contains(&"₹49.48".to_string()));
    }

    #[test]
    fn zero_items_yields_header_only_and_zero_totals() {
        let layout = layout_invoice(&invoice_with(vec![]));
        assert!(body_row_rects(&layout).is_empty());

        let zero = "₹0.00".to_string();
        let zeros = texts(&layout).iter().filter(|t| **t == zero).count();
        assert_eq!(zeros, 3, "subtotal, tax and grand total all render 0.00");
    }

    #[test]
    fn logo_box_present_only_when_logo_is_set() {
        let mut invoice = invoice_with(vec![]);
        let without = layout_invoice(&invoice);
        assert!(!all_elements(&without).iter().any(|e| matches!(e, Element::Logo(_))));

        invoice.logo = Some(vec![0u8; 4]);
        let with = layout_invoice(&invoice);
        let logo = all_elements(&with)
            .into_iter()
            .find_map(|e| match e {
                Element::Logo(b) => Some(b.clone()),
                _ => None,
            })
            .expect("logo box");
        assert_eq!(logo.width, style::LOGO_BOX_SIZE);
        assert_eq!(logo.height, style::LOGO_BOX_SIZE);
    }

    #[test]
    fn notes_paragraph_only_when_non_empty() {
        let mut invoice = invoice_with(vec![]);
        let no_notes = layout_invoice(&invoice);
        assert!(!texts(&no_notes).iter().any(|t| t.starts_with("Notes:")));

        invoice.notes = Some(String::new());
        let empty_notes = layout_invoice(&invoice);
        assert!(!texts(&empty_notes).iter().any(|t| t.starts_with("Notes:")));

        invoice.notes = Some("Payment by bank transfer".into());
        let with_notes = layout_invoice(&invoice);
        assert!(
            texts(&with_notes)
                .iter()
                .any(|t| t.starts_with("Notes: Payment by bank transfer"))
        );
    }

    #[test]
    fn footer_is_always_present_and_centered() {
        let layout = layout_invoice(&invoice_with(vec![]));
        let elements = all_elements(&layout);
        let footer: Vec<_> = elements
            .iter()
            .filter_map(|e| match e {
                Element::Text(t) if t.font == FontKind::Oblique => Some(t),
                _ => None,
            })
            .collect();
        assert_eq!(footer.len(), 2);
        for line in footer {
            let width = text_width(&line.text, line.size);
            let center = line.x + width / 2.0;
            let page_center = style::MARGIN_LEFT + style::content_width() / 2.0;
            assert!((center - page_center).abs() < 0.5);
        }
    }

    #[test]
    fn long_item_lists_paginate() {
        let layout = layout_invoice(&invoice_with(
            (0..80).map(|i| LineItem::new(format!("Item {i}"), 1, 2.50)).collect(),
        ));
        assert!(layout.pages.len() >= 2, "expected a page break, got {}", layout.pages.len());
        assert_eq!(body_row_rects(&layout).len(), 80);

        // Every element stays inside the page margins.
        for page in &layout.pages {
            for element in &page.elements {
                let y = match element {
                    Element::Text(t) => t.y,
                    Element::Rect(r) => r.y + r.height,
                    Element::Logo(b) => b.y + b.height,
                };
                assert!(y <= style::PAGE_HEIGHT - style::MARGIN_BOTTOM + 0.01);
            }
        }
    }

    #[test]
    fn layout_is_idempotent() {
        let mut invoice = invoice_with(vec![
            LineItem::new("Widget", 2, 9.99),
            LineItem::new("Gadget", 1, 25.00),
        ]);
        invoice.notes = Some("Net 15".into());
        assert_eq!(layout_invoice(&invoice), layout_invoice(&invoice));
    }

    #[test]
    fn wrap_respects_max_width() {
        let lines = wrap_text(
            "one two three four five six seven eight nine ten",
            12.0,
            100.0,
        );
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width(line, 12.0) <= 100.0 || !line.contains(' '));
        }
    }
}
