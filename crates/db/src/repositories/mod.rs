//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for warehouse reads,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod invoice;

pub use invoice::{InvoiceRecord, InvoiceRepository};
