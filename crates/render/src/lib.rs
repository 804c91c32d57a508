//! Fixed-template invoice rendering.
//!
//! One invoice value in, one paginated PDF byte sequence out. The template is
//! not configurable: header band (logo, company block, title), customer
//! detail block, striped line-item table, right-aligned summary, optional
//! notes paragraph, and a fixed footer.
//!
//! Rendering is split into two stages:
//! - [`layout`] walks the template and produces positioned elements with
//!   page-break bookkeeping. This stage is pure and fully testable.
//! - [`painter`] translates positioned elements into PDF operations and
//!   serializes the document.

mod error;
pub mod layout;
mod painter;
pub mod style;

pub use error::RenderError;
pub use layout::{InvoiceLayout, layout_invoice};

use billcraft_model::Invoice;

/// Render one fully-loaded invoice as a PDF byte sequence.
///
/// Pure function of the invoice plus the fixed style constants: no side
/// effects, no mutation of the input. Any failure during construction (a logo
/// that cannot be decoded, a serialization failure) aborts the whole render;
/// no partial document is ever returned.
pub fn render_invoice(invoice: &Invoice) -> Result<Vec<u8>, RenderError> {
    let layout = layout_invoice(invoice);
    painter::paint(&layout, invoice.logo.as_deref())
}
