//! Fixed style constants for the invoice template.
//!
//! Everything that is not invoice data lives here: page geometry, colors,
//! font sizes, spacings, the tax rate, the currency symbol, and the static
//! company and footer text. The renderer reads only these constants, so the
//! boundary between "what is fixed" and "what is data" stays explicit.

use billcraft_types::Color;

// Page geometry (points, A4).
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN_LEFT: f32 = 40.0;
pub const MARGIN_RIGHT: f32 = 40.0;
pub const MARGIN_TOP: f32 = 50.0;
pub const MARGIN_BOTTOM: f32 = 50.0;

pub const fn content_width() -> f32 {
    PAGE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

// Header band: logo | company block | title, relative widths.
pub const HEADER_COLUMNS: [f32; 3] = [1.0, 3.0, 2.0];
pub const LOGO_BOX_SIZE: f32 = 80.0;

// Customer detail block: label | value.
pub const CUSTOMER_COLUMNS: [f32; 2] = [1.0, 2.0];

// Line-item table: Description | Qty | Price | Total.
pub const ITEM_COLUMNS: [f32; 4] = [4.0, 1.0, 2.0, 2.0];
pub const ITEM_HEADERS: [&str; 4] = ["Description", "Qty", "Price", "Total"];

// Colors.
pub const BLACK: Color = Color::new(0, 0, 0);
pub const WHITE: Color = Color::new(255, 255, 255);
pub const DARK_GRAY: Color = Color::gray(64);
pub const FOOTER_GRAY: Color = Color::gray(128);
pub const TITLE_BLUE: Color = Color::new(0, 0, 255);
pub const TABLE_HEADER_BG: Color = Color::new(63, 81, 181);
pub const ROW_BG: Color = WHITE;
pub const ROW_STRIPE_BG: Color = Color::gray(245);

// Font sizes (points).
pub const COMPANY_NAME_SIZE: f32 = 16.0;
pub const COMPANY_TAGLINE_SIZE: f32 = 12.0;
pub const TITLE_SIZE: f32 = 24.0;
pub const BODY_SIZE: f32 = 12.0;
pub const CELL_SIZE: f32 = 11.0;
pub const FOOTER_SIZE: f32 = 11.0;

pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Average glyph advance as a fraction of the font size. A simple
/// approximation; alignment does not need font-metric precision here.
pub const APPROX_CHAR_WIDTH: f32 = 0.6;

// Cell paddings and derived row heights.
pub const CELL_PADDING: f32 = 8.0;
pub const TABLE_HEADER_PADDING: f32 = 10.0;
pub const SUMMARY_CELL_PADDING: f32 = 2.0;

pub const CUSTOMER_ROW_HEIGHT: f32 = BODY_SIZE + 2.0 * CELL_PADDING;
pub const TABLE_HEADER_ROW_HEIGHT: f32 = BODY_SIZE + 2.0 * TABLE_HEADER_PADDING;
pub const ITEM_ROW_HEIGHT: f32 = CELL_SIZE + 2.0 * CELL_PADDING;
pub const SUMMARY_ROW_HEIGHT: f32 = BODY_SIZE + 2.0 * SUMMARY_CELL_PADDING;

// Vertical spacing between template sections.
pub const CUSTOMER_SPACING_BEFORE: f32 = 10.0;
pub const CUSTOMER_SPACING_AFTER: f32 = 20.0;
pub const TABLE_SPACING_BEFORE: f32 = 10.0;
pub const SUMMARY_SPACING_BEFORE: f32 = 15.0;
pub const NOTES_SPACING_BEFORE: f32 = 15.0;
pub const FOOTER_SPACING_BEFORE: f32 = 30.0;

/// Fraction of the content width taken by the summary table.
pub const SUMMARY_WIDTH_FRACTION: f32 = 0.4;

// Business constants baked into the template.
pub const TAX_RATE: f64 = 0.10;
pub const CURRENCY_SYMBOL: &str = "₹";
pub const COMPANY_NAME: &str = "Stoic And Salamandar";
pub const COMPANY_TAGLINE: &str = "The Global Corporation";
pub const SUMMARY_LABELS: [&str; 3] = ["Subtotal", "Tax (10%)", "Grand Total"];
pub const NOTES_PREFIX: &str = "Notes: ";
pub const FOOTER_LINES: [&str; 2] =
    ["Thank you for your business!", "Payment due within 15 days."];

pub const fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}
