use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use billcraft_model::{Invoice, InvoiceId};
use tokio::sync::RwLock;

use crate::{RecordStore, StoreError};

/// In-memory record store with sequential numeric id assignment.
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<u64, Invoice>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { records: RwLock::new(HashMap::new()), next_id: AtomicU64::new(0) }
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn save(&self, mut invoice: Invoice) -> Result<Invoice, StoreError> {
        let id = match invoice.id {
            Some(id) => {
                // Keep the counter ahead of client-supplied ids so a later
                // create is never assigned a colliding id.
                self.next_id.fetch_max(id.0, Ordering::SeqCst);
                id
            }
            None => InvoiceId::new(self.next_id.fetch_add(1, Ordering::SeqCst) + 1),
        };
        invoice.id = Some(id);

        let mut records = self.records.write().await;
        // Replacing the map entry replaces the item collection wholesale.
        records.insert(id.0, invoice.clone());
        tracing::debug!(id = id.0, items = invoice.items.len(), "invoice saved");
        Ok(invoice)
    }

    async fn get(&self, id: InvoiceId) -> Result<Invoice, StoreError> {
        let records = self.records.read().await;
        records.get(&id.0).cloned().ok_or(StoreError::NotFound(id))
    }
}
