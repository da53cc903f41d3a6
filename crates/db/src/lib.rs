//! Warehouse access layer built on `SeaORM`.
//!
//! This crate provides:
//! - A lazily opened, explicitly owned warehouse connection
//! - `InvoiceRepository`, the warehouse-backed `InvoiceSource`
//! - Development migrations for the AR and AP invoice tables
//! - Demo fixtures for seeding and integration tests

pub mod fixtures;
pub mod migration;
pub mod repositories;

pub use repositories::{InvoiceRecord, InvoiceRepository};

use std::time::Duration;

use arap_shared::WarehouseConfig;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use tokio::sync::OnceCell;
use tracing::info;

/// Establishes a pooled connection using warehouse settings.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect_with(config: &WarehouseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .sqlx_logging(false);
    Database::connect(options).await
}

/// Warehouse connection opened on first use and kept for the life of the owner.
///
/// Concurrent first callers share one connect attempt; a failed attempt leaves
/// the handle empty so the next submission tries again.
#[derive(Debug)]
pub struct LazyConnection {
    config: Option<WarehouseConfig>,
    cell: OnceCell<DatabaseConnection>,
}

impl LazyConnection {
    /// Creates a handle that connects with `config` on first use.
    #[must_use]
    pub fn new(config: WarehouseConfig) -> Self {
        Self {
            config: Some(config),
            cell: OnceCell::new(),
        }
    }

    /// Wraps an already open connection.
    #[must_use]
    pub fn from_connection(db: DatabaseConnection) -> Self {
        Self {
            config: None,
            cell: OnceCell::new_with(Some(db)),
        }
    }

    /// Whether the connection has been opened.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }

    /// Returns the connection, opening it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn get(&self) -> Result<&DatabaseConnection, DbErr> {
        self.cell
            .get_or_try_init(|| async {
                let config = self
                    .config
                    .as_ref()
                    .ok_or_else(|| DbErr::Custom("no warehouse configuration".to_string()))?;
                let db = connect_with(config).await?;
                info!("Connected to warehouse");
                Ok::<_, DbErr>(db)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> WarehouseConfig {
        WarehouseConfig {
            url: url.to_string(),
            max_connections: 1,
            min_connections: 0,
            connect_timeout_secs: 1,
        }
    }

    #[test]
    fn test_lazy_connection_starts_closed() {
        let conn = LazyConnection::new(config("postgres://localhost/arap"));
        assert!(!conn.is_connected());
    }

    #[tokio::test]
    async fn test_failed_connect_stays_uninitialized() {
        let conn = LazyConnection::new(config("not-a-database-url"));
        assert!(conn.get().await.is_err());
        assert!(!conn.is_connected());
    }
}
