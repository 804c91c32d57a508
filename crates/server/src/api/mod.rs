pub mod health;
pub mod invoices;

pub use health::health_check;
pub use invoices::{download_pdf, get_invoice, save_invoice, save_invoice_multipart};
