//! Common types used across the application.

pub mod money;

pub use money::{mean, round_report, safe_div};
