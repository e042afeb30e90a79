//! Command types for engine dispatch.
//!
//! Every operation the engine supports is a variant here, so callers that
//! route requests generically (a CLI, a queue consumer) can hand the engine
//! one value and match on the outcome.

use rust_decimal::Decimal;
use tally_shared::types::{AccountId, EventId};

use super::balance::AccountStatement;
use super::event::LedgerEvent;

/// One ledger command: a validated request against a single account (plus a
/// counterparty for transfers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add money directly to an account.
    Deposit {
        /// The account to credit.
        account_id: AccountId,
        /// Strictly positive amount.
        amount: Decimal,
        /// Free-form description.
        description: String,
    },
    /// Remove money directly from an account.
    Withdraw {
        /// The account to debit.
        account_id: AccountId,
        /// Strictly positive amount.
        amount: Decimal,
        /// Free-form description.
        description: String,
    },
    /// Move money between two accounts atomically.
    Transfer {
        /// The sending account.
        sender_id: AccountId,
        /// The receiving account.
        recipient_id: AccountId,
        /// Strictly positive amount.
        amount: Decimal,
        /// Free-form description.
        description: String,
    },
    /// Read an account's derived balance and history.
    GetBalance {
        /// The account to read.
        account_id: AccountId,
    },
    /// Read one event belonging to an account.
    GetEvent {
        /// The account the event must belong to.
        account_id: AccountId,
        /// The event to fetch.
        event_id: EventId,
    },
}

/// The result of a successfully dispatched command.
#[derive(Debug, Clone)]
pub enum CommandOutcome {
    /// A mutating command's created event. For transfers this is the
    /// TransferOut leg, the record the sender sees.
    Event(LedgerEvent),
    /// A balance query's statement.
    Statement(AccountStatement),
}

impl CommandOutcome {
    /// Unwraps the created event, if this outcome carries one.
    #[must_use]
    pub fn into_event(self) -> Option<LedgerEvent> {
        match self {
            Self::Event(event) => Some(event),
            Self::Statement(_) => None,
        }
    }

    /// Unwraps the statement, if this outcome carries one.
    #[must_use]
    pub fn into_statement(self) -> Option<AccountStatement> {
        match self {
            Self::Statement(statement) => Some(statement),
            Self::Event(_) => None,
        }
    }
}
