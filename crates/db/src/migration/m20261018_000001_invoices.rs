//! Invoice tables migration.
//!
//! Creates `ar_invoices` and `ap_invoices` with the column layout the
//! warehouse exposes.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(INVOICES_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP TABLE IF EXISTS ar_invoices, ap_invoices CASCADE;")
            .await?;
        Ok(())
    }
}

const INVOICES_SQL: &str = r"
-- Accounts receivable: customers owe us
CREATE TABLE ar_invoices (
    invoiceid VARCHAR(64) PRIMARY KEY,
    customername TEXT NOT NULL,
    invoicedate DATE NOT NULL,
    duedate DATE NOT NULL,
    invoiceamount NUMERIC(18, 2) NOT NULL,
    status VARCHAR(20) NOT NULL,
    CONSTRAINT chk_ar_amount_non_negative CHECK (invoiceamount >= 0),
    CONSTRAINT chk_ar_status CHECK (status IN ('Paid', 'Unpaid', 'Partially Paid'))
);

CREATE INDEX idx_ar_invoices_date ON ar_invoices(invoicedate);
CREATE INDEX idx_ar_invoices_status ON ar_invoices(status);

-- Accounts payable: we owe vendors
CREATE TABLE ap_invoices (
    invoiceid VARCHAR(64) PRIMARY KEY,
    vendorname TEXT NOT NULL,
    invoicedate DATE NOT NULL,
    duedate DATE NOT NULL,
    invoiceamount NUMERIC(18, 2) NOT NULL,
    status VARCHAR(20) NOT NULL,
    CONSTRAINT chk_ap_amount_non_negative CHECK (invoiceamount >= 0),
    CONSTRAINT chk_ap_status CHECK (status IN ('Paid', 'Unpaid', 'Partially Paid'))
);

CREATE INDEX idx_ap_invoices_date ON ap_invoices(invoicedate);
CREATE INDEX idx_ap_invoices_status ON ap_invoices(status);
";
