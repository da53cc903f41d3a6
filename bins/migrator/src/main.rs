//! Migration runner for the development invoice tables.
//!
//! Reads `DATABASE_URL` (from the environment or `.env`), unlike the server and
//! seeder which read `ARAP__WAREHOUSE__URL`. Point both at the same database in
//! local setups.
//!
//! Usage:
//!   migrator up      - Create `ar_invoices` and `ap_invoices`
//!   migrator down    - Drop them
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop everything and re-run

use arap_db::migration::Migrator;
use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
