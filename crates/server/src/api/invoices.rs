use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use billcraft_model::{Invoice, InvoiceId};
use billcraft_render::render_invoice;

use crate::error::{Result, ServiceError};
use crate::state::AppState;

/// Create or update an invoice from a JSON body. A body carrying an id
/// overwrites that record; without one the store assigns the next id.
pub async fn save_invoice(
    State(state): State<AppState>,
    Json(invoice): Json<Invoice>,
) -> Result<Json<Invoice>> {
    let saved = state.store.save(invoice).await?;
    let id = saved_id(&saved)?;
    tracing::info!(%id, "invoice saved");
    Ok(Json(saved))
}

/// Create or update an invoice from a multipart submission: an `invoice` part
/// (JSON) plus an optional `logo` part whose raw bytes are attached to the
/// record before saving.
pub async fn save_invoice_multipart(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Invoice>> {
    let mut invoice: Option<Invoice> = None;
    let mut logo: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?
    {
        let name = field.name().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|e| ServiceError::InvalidRequest(e.to_string()))?;

        match name.as_deref() {
            Some("invoice") => {
                invoice = Some(serde_json::from_slice(&data).map_err(|e| {
                    ServiceError::InvalidRequest(format!("malformed invoice part: {e}"))
                })?);
            }
            Some("logo") if !data.is_empty() => {
                logo = Some(data.to_vec());
            }
            _ => {}
        }
    }

    let mut invoice =
        invoice.ok_or_else(|| ServiceError::InvalidRequest("missing 'invoice' part".into()))?;
    if logo.is_some() {
        invoice.logo = logo;
    }

    let saved = state.store.save(invoice).await?;
    let id = saved_id(&saved)?;
    tracing::info!(%id, logo = saved.logo.is_some(), "invoice saved via multipart");
    Ok(Json(saved))
}

/// Every stored invoice carries an id; a store that returns one without is an
/// internal fault, not a panic.
fn saved_id(saved: &Invoice) -> Result<InvoiceId> {
    saved
        .id
        .ok_or_else(|| ServiceError::Internal("store returned an invoice without an id".into()))
}

/// Fetch one invoice as its JSON representation.
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<Invoice>> {
    let invoice = state.store.get(InvoiceId::new(id)).await?;
    Ok(Json(invoice))
}

/// Render one invoice and return the PDF as a downloadable attachment.
pub async fn download_pdf(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<impl IntoResponse> {
    let invoice = state.store.get(InvoiceId::new(id)).await?;

    // Rendering is CPU-bound; keep it off the async workers.
    let pdf_bytes = tokio::task::spawn_blocking(move || render_invoice(&invoice))
        .await
        .map_err(|e| ServiceError::Internal(e.to_string()))??;

    tracing::info!(id, bytes = pdf_bytes.len(), "invoice rendered for download");

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=invoice_{id}.pdf"),
            ),
        ],
        pdf_bytes,
    ))
}
