//! Demo data seeder.
//!
//! Replaces the contents of `ar_invoices` and `ap_invoices` with a fixed set of
//! invoices dated relative to today, so every aging bucket and status shows up.
//!
//! Usage: cargo run --bin seeder

use chrono::Utc;

use arap_core::invoice::InvoiceLedger;
use arap_db::fixtures::{clear_invoices, demo_invoices, insert_invoices};
use arap_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;

    println!("Connecting to warehouse...");
    let db = arap_db::connect_with(&config.warehouse).await?;

    let today = Utc::now().date_naive();
    for ledger in [InvoiceLedger::Receivables, InvoiceLedger::Payables] {
        let removed = clear_invoices(&db, ledger).await?;
        if removed > 0 {
            println!("  Removed {removed} existing {ledger} invoices");
        }

        let invoices = demo_invoices(ledger, today);
        let inserted = insert_invoices(&db, ledger, &invoices).await?;
        println!("Seeded {inserted} {ledger} invoices");
    }

    println!("Seeding complete!");
    Ok(())
}
