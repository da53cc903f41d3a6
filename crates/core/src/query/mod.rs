//! Invoice query building.
//!
//! Turns user filters (date range, counterparty substring, statuses) into a
//! parameterized read against the AR or AP table.

pub mod builder;
pub mod error;
pub mod filter;

pub use builder::{InvoiceQuery, QueryParam, WhereBuilder, escape_like};
pub use error::QueryError;
pub use filter::{DateRange, InvoiceFilter, parse_status_list};
