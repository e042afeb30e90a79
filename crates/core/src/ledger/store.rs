//! Trait seams for the engine's collaborators.
//!
//! The engine takes its event store and account directory as explicit
//! constructor arguments; there is no runtime service locator. The durable
//! implementations live in the db crate, the in-memory ones in
//! [`crate::ledger::memory`].

use async_trait::async_trait;
use tally_shared::types::{AccountId, EventId};

use super::error::LedgerError;
use super::event::{EventDraft, LedgerEvent};

/// Append-only persisted collection of ledger events.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Persists one event, assigning `id` and `created_at`.
    ///
    /// Concurrent appends for the same account must not be silently
    /// reordered relative to each other's visible `created_at`.
    async fn append(&self, draft: EventDraft) -> Result<LedgerEvent, LedgerError>;

    /// Persists two events as a single atomic unit: both succeed or both
    /// fail. Partial application is a defect. Required for transfers.
    async fn append_pair(
        &self,
        first: EventDraft,
        second: EventDraft,
    ) -> Result<(LedgerEvent, LedgerEvent), LedgerError>;

    /// All events for the account, `created_at` ascending, ties broken by
    /// insertion order.
    async fn list_by_account(&self, account_id: AccountId)
        -> Result<Vec<LedgerEvent>, LedgerError>;

    /// Fetches one event by id.
    async fn get(&self, event_id: EventId) -> Result<Option<LedgerEvent>, LedgerError>;
}

/// External collaborator resolving whether an account currently exists.
///
/// The engine consumes no other capability and assumes no ordering guarantee
/// beyond "reflects accounts committed before the call returns".
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Returns true if the account exists.
    async fn exists(&self, account_id: AccountId) -> Result<bool, LedgerError>;
}
