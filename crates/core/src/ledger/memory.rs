//! In-memory store and directory implementations.
//!
//! These satisfy the same contracts as the durable implementations in the
//! db crate and back the engine's own tests. Not acceptable for production
//! use: nothing here survives a restart.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tally_shared::types::{AccountId, EventId};

use super::error::LedgerError;
use super::event::{EventDraft, LedgerEvent};
use super::store::{AccountDirectory, EventStore};

/// In-memory, append-only event store.
///
/// A single mutex guards the log, so `append_pair` is trivially atomic and
/// insertion order is the tie-break order for `list_by_account`.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    inner: Mutex<Log>,
}

#[derive(Debug, Default)]
struct Log {
    events: Vec<LedgerEvent>,
    last_created_at: Option<DateTime<Utc>>,
}

impl Log {
    /// Assigns a timestamp that never moves backwards, so per-account
    /// `created_at` is non-decreasing in insertion order.
    fn next_timestamp(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let ts = match self.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };
        self.last_created_at = Some(ts);
        ts
    }

    fn materialize(&mut self, draft: EventDraft) -> LedgerEvent {
        let event = LedgerEvent {
            id: EventId::new(),
            account_id: draft.account_id,
            counterparty_id: draft.counterparty_id,
            kind: draft.kind,
            amount: draft.amount,
            description: draft.description,
            created_at: self.next_timestamp(),
        };
        self.events.push(event.clone());
        event
    }
}

impl InMemoryEventStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all events. Administrative/test-reset capability only;
    /// normal operation never removes events.
    pub fn reset(&self) {
        let mut log = self.inner.lock().expect("event log poisoned");
        log.events.clear();
        log.last_created_at = None;
    }

    /// Total number of stored events, across all accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("event log poisoned").events.len()
    }

    /// Returns true if no events are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventStore for InMemoryEventStore {
    async fn append(&self, draft: EventDraft) -> Result<LedgerEvent, LedgerError> {
        let mut log = self.inner.lock().expect("event log poisoned");
        Ok(log.materialize(draft))
    }

    async fn append_pair(
        &self,
        first: EventDraft,
        second: EventDraft,
    ) -> Result<(LedgerEvent, LedgerEvent), LedgerError> {
        let mut log = self.inner.lock().expect("event log poisoned");
        let a = log.materialize(first);
        let b = log.materialize(second);
        Ok((a, b))
    }

    async fn list_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        let log = self.inner.lock().expect("event log poisoned");
        Ok(log
            .events
            .iter()
            .filter(|e| e.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn get(&self, event_id: EventId) -> Result<Option<LedgerEvent>, LedgerError> {
        let log = self.inner.lock().expect("event log poisoned");
        Ok(log.events.iter().find(|e| e.id == event_id).cloned())
    }
}

/// In-memory account directory backed by a set of known ids.
#[derive(Debug, Default)]
pub struct InMemoryAccountDirectory {
    accounts: Mutex<HashSet<AccountId>>,
}

impl InMemoryAccountDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an account id as existing.
    pub fn register(&self, account_id: AccountId) {
        self.accounts
            .lock()
            .expect("directory poisoned")
            .insert(account_id);
    }

    /// Registers a fresh account id and returns it.
    #[must_use]
    pub fn register_new(&self) -> AccountId {
        let id = AccountId::new();
        self.register(id);
        id
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn exists(&self, account_id: AccountId) -> Result<bool, LedgerError> {
        Ok(self
            .accounts
            .lock()
            .expect("directory poisoned")
            .contains(&account_id))
    }
}
