//! Schema migration runner for the Tally ledger.
//!
//! Wraps the sea-orm-migration CLI, so the usual subcommands apply:
//! `up`, `down`, `status`, and `fresh`. Connection settings come from
//! `DATABASE_URL`, with a local `.env` honored if present.

use sea_orm_migration::prelude::*;
use tally_db::migration::Migrator;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
