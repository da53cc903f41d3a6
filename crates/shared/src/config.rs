//! Application configuration management.

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Warehouse (invoice source) configuration.
    pub warehouse: WarehouseConfig,
    /// Report calculation settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Warehouse connection configuration.
///
/// Credentials travel inside `url`; secret storage is left to the deployment.
#[derive(Debug, Clone, Deserialize)]
pub struct WarehouseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

fn default_connect_timeout() -> u64 {
    10
}

/// Which rows feed the mean days outstanding metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanDaysBasis {
    /// Every fetched row, including paid and not-yet-due invoices.
    #[default]
    AllRows,
    /// Only unpaid rows whose due date has passed.
    OverdueOnly,
}

/// Report calculation settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Period length used for DSO/DPO.
    #[serde(default = "default_period_days")]
    pub period_days: u32,
    /// Basis for mean days outstanding.
    #[serde(default)]
    pub mean_days_basis: MeanDaysBasis,
    /// Whether the aging pivot carries total row/column.
    #[serde(default = "default_include_totals")]
    pub include_totals: bool,
    /// Trailing window (months) for the trend forecast.
    #[serde(default = "default_forecast_window")]
    pub forecast_window: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            period_days: default_period_days(),
            mean_days_basis: MeanDaysBasis::default(),
            include_totals: default_include_totals(),
            forecast_window: default_forecast_window(),
        }
    }
}

fn default_period_days() -> u32 {
    30
}

fn default_include_totals() -> bool {
    true
}

fn default_forecast_window() -> usize {
    3
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a source cannot be read or a required key
    /// (such as `warehouse.url`) is missing.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("ARAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("ARAP__WAREHOUSE__URL", Some("postgres://localhost/arap")),
                ("ARAP__REPORT__MEAN_DAYS_BASIS", Some("overdue_only")),
                ("ARAP__SERVER__PORT", Some("9090")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.warehouse.url, "postgres://localhost/arap");
                assert_eq!(config.warehouse.max_connections, 10);
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.report.mean_days_basis, MeanDaysBasis::OverdueOnly);
                assert_eq!(config.report.period_days, 30);
                assert!(config.report.include_totals);
            },
        );
    }

    #[test]
    fn test_missing_warehouse_url_fails() {
        temp_env::with_vars([("ARAP__WAREHOUSE__URL", None::<&str>)], || {
            let err = AppConfig::load().unwrap_err();
            assert!(matches!(err, crate::AppError::Config(_)));
            assert_eq!(err.error_code(), "CONFIG_ERROR");
        });
    }

    #[test]
    fn test_report_defaults() {
        let report = ReportConfig::default();
        assert_eq!(report.period_days, 30);
        assert_eq!(report.forecast_window, 3);
        assert_eq!(report.mean_days_basis, MeanDaysBasis::AllRows);
    }
}
