//! Record store for invoices.
//!
//! The store persists an invoice together with its line items as one unit:
//! a save replaces the whole record, so items removed from the list simply
//! disappear with it. Reads return the full record, items included.

mod error;
mod memory;

pub use error::StoreError;
pub use memory::MemoryStore;

use async_trait::async_trait;
use billcraft_model::{Invoice, InvoiceId};

/// Persistence backend for invoice records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist an invoice, assigning an id when it has none yet.
    ///
    /// The item collection is replaced wholesale; the returned value is the
    /// record as stored.
    async fn save(&self, invoice: Invoice) -> Result<Invoice, StoreError>;

    /// Fetch an invoice with its items eagerly available.
    async fn get(&self, id: InvoiceId) -> Result<Invoice, StoreError>;
}
