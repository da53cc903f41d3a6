//! Core AR/AP reporting logic.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Invoice types, query construction, aggregation and CSV export live here.
//!
//! # Modules
//!
//! - `invoice` - Invoice rows, statuses, ledgers and derived fields
//! - `aging` - Aging bucket classification
//! - `query` - Filters and parameterized query building
//! - `source` - The `InvoiceSource` seam and an in-memory implementation
//! - `reports` - Metrics, summaries, aging pivot and trend
//! - `export` - CSV export and import

pub mod aging;
pub mod export;
pub mod invoice;
pub mod query;
pub mod reports;
pub mod source;
