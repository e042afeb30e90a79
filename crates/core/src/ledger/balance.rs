//! Balance derivation from event history.
//!
//! The balance is never stored. It is always recomputed as a signed fold
//! over the account's full event history, which eliminates balance-drift
//! bugs at the cost of O(n) reads per check.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::event::LedgerEvent;

/// Reduces an ordered event sequence to a signed balance.
///
/// Deposit and TransferIn amounts add; Withdrawal and TransferOut amounts
/// subtract. Pure and deterministic: the result depends only on the event
/// contents. Negative results are possible for out-of-band data and are
/// tolerated here; the engine refuses to *create* events that would produce
/// them.
#[must_use]
pub fn balance_of(events: &[LedgerEvent]) -> Decimal {
    events.iter().map(LedgerEvent::signed_amount).sum()
}

/// An account's derived balance together with the history it came from.
///
/// This is the read path used by balance queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountStatement {
    /// The derived balance.
    pub balance: Decimal,
    /// Full event history, `created_at` ascending.
    pub events: Vec<LedgerEvent>,
}

impl AccountStatement {
    /// Builds a statement by reducing the given history.
    #[must_use]
    pub fn from_events(events: Vec<LedgerEvent>) -> Self {
        Self {
            balance: balance_of(&events),
            events,
        }
    }
}
