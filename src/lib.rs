//! Facade crate for the billcraft workspace.
//!
//! Re-exports the member crates and provides a one-call path from an
//! invoice JSON document to rendered PDF bytes, for embedders that do
//! not want to wire the record store and renderer themselves.

pub use billcraft_model as model;
pub use billcraft_render as render;
pub use billcraft_store as store;
pub use billcraft_types as types;

use billcraft_model::Invoice;
use billcraft_render::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillcraftError {
    #[error("invoice parsing error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("rendering error: {0}")]
    Render(#[from] RenderError),
}

/// Parse an invoice from its JSON wire form and render it as a PDF.
///
/// The optional `logo` is attached to the invoice before rendering, the
/// same way the multipart request path attaches an uploaded image.
pub fn invoice_pdf_from_json(
    json: &str,
    logo: Option<Vec<u8>>,
) -> Result<Vec<u8>, BillcraftError> {
    let mut invoice: Invoice = serde_json::from_str(json)?;
    if logo.is_some() {
        invoice.logo = logo;
    }
    Ok(billcraft_render::render_invoice(&invoice)?)
}
