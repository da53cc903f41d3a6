//! AR/AP report generation.
//!
//! This module provides pure business logic for invoice reports:
//! - Totals, outstanding and overdue amounts
//! - DSO/DPO and mean days outstanding
//! - Overdue summary by counterparty
//! - Aging pivot
//! - Monthly outstanding trend
//! - AR vs AP balance comparison

pub mod error;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use service::ReportService;
pub use types::*;
