//! Ledger error types.
//!
//! Every failure path returns a specific kind, never a generic fault, so
//! callers can render deterministic user-facing messages. All errors are
//! terminal for the command that raised them; nothing is retried inside the
//! engine.

use rust_decimal::Decimal;
use tally_shared::types::{AccountId, EventId};
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The acting account does not exist.
    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    /// The transfer recipient does not exist.
    #[error("Recipient account not found: {0}")]
    RecipientNotFound(AccountId),

    /// The account balance does not cover the requested amount.
    #[error("Insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds {
        /// Balance at the time of the check.
        balance: Decimal,
        /// Amount the command asked for.
        requested: Decimal,
    },

    /// Event amounts must be strictly positive.
    #[error("Invalid amount: {0} (must be strictly positive)")]
    InvalidAmount(Decimal),

    /// An account cannot transfer to itself.
    #[error("Cannot transfer from account {0} to itself")]
    SelfTransfer(AccountId),

    /// The event does not exist or does not belong to the account.
    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    /// The store or directory failed; includes atomic-append failure.
    #[error("Persistence failure: {0}")]
    PersistenceFailure(String),
}

impl LedgerError {
    /// Wraps a backing-store or directory failure.
    #[must_use]
    pub fn persistence(source: impl std::fmt::Display) -> Self {
        Self::PersistenceFailure(source.to_string())
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            Self::RecipientNotFound(_) => "RECIPIENT_NOT_FOUND",
            Self::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::SelfTransfer(_) => "SELF_TRANSFER",
            Self::EventNotFound(_) => "EVENT_NOT_FOUND",
            Self::PersistenceFailure(_) => "PERSISTENCE_FAILURE",
        }
    }

    /// Returns the HTTP status code the transport layer maps this error to.
    #[must_use]
    pub fn http_status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - validation and policy errors
            Self::InsufficientFunds { .. } | Self::InvalidAmount(_) | Self::SelfTransfer(_) => 400,

            // 404 Not Found
            Self::AccountNotFound(_) | Self::RecipientNotFound(_) | Self::EventNotFound(_) => 404,

            // 500 Internal Server Error
            Self::PersistenceFailure(_) => 500,
        }
    }
}
