//! Append-only event ledger.
//!
//! This module implements the core ledger functionality:
//! - Ledger events (deposits, withdrawals, transfer legs)
//! - Balance derivation from event history
//! - Event store and account directory trait seams
//! - In-memory store implementation for tests
//! - Command types for engine dispatch
//! - Error types for ledger operations
//! - The ledger engine itself

pub mod balance;
pub mod command;
pub mod engine;
pub mod error;
pub mod event;
pub mod memory;
pub mod store;

#[cfg(test)]
mod engine_props;

pub use balance::{balance_of, AccountStatement};
pub use command::{Command, CommandOutcome};
pub use engine::LedgerEngine;
pub use error::LedgerError;
pub use event::{EventDraft, EventKind, LedgerEvent};
pub use memory::{InMemoryAccountDirectory, InMemoryEventStore};
pub use store::{AccountDirectory, EventStore};
