use billcraft_model::InvoiceId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invoice {0} not found")]
    NotFound(InvoiceId),
}
