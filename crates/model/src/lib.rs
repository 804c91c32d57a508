//! Invoice data model.
//!
//! An [`Invoice`] is one billing document: header fields, an optional raw logo
//! image, and an ordered list of [`LineItem`]s. Line items exist only inside
//! their parent's owned list; only the parent-to-children direction is ever
//! serialized, so there is no back-reference to manage.

mod invoice;

pub use invoice::{Invoice, InvoiceId, LineItem};
