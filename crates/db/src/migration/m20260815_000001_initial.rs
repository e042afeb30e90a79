//! Initial database migration.
//!
//! Creates the accounts table, the event kind enum, and the append-only
//! ledger_events table with its ordering index.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(ENUMS_SQL).await?;
        db.execute_unprepared(ACCOUNTS_SQL).await?;
        db.execute_unprepared(LEDGER_EVENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const ENUMS_SQL: &str = r"
-- Ledger event kinds
CREATE TYPE event_kind AS ENUM (
    'deposit',
    'withdrawal',
    'transfer_out',
    'transfer_in'
);
";

const ACCOUNTS_SQL: &str = r"
-- Accounts are owned by the external user collaborator; the ledger engine
-- only reads this table through the account directory.
CREATE TABLE accounts (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);
";

const LEDGER_EVENTS_SQL: &str = r"
-- Append-only: rows are never updated or deleted in normal operation.
CREATE TABLE ledger_events (
    id UUID PRIMARY KEY,
    account_id UUID NOT NULL REFERENCES accounts(id),
    counterparty_id UUID REFERENCES accounts(id),
    kind event_kind NOT NULL,
    amount NUMERIC(19, 4) NOT NULL CHECK (amount > 0),
    description TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
);

CREATE INDEX idx_ledger_events_account_created
    ON ledger_events (account_id, created_at);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS ledger_events;
DROP TABLE IF EXISTS accounts;
DROP TYPE IF EXISTS event_kind;
";
