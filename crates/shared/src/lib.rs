//! Shared errors, configuration and decimal helpers for the AR/AP reporting service.
//!
//! This crate provides common types used across all other crates:
//! - Decimal helpers for division-guarded money math
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, MeanDaysBasis, ReportConfig, ServerConfig, WarehouseConfig};
pub use error::{AppError, AppResult};
