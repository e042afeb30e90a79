//! The ledger engine.
//!
//! Orchestrates validated creation of deposit, withdrawal, and transfer
//! events over an [`EventStore`], consulting an [`AccountDirectory`] for
//! existence checks. Each invocation runs one short-lived protocol; the
//! engine holds no mutable state of its own besides per-account
//! serialization scopes.
//!
//! # Concurrency
//!
//! The read-balance-then-append sequence in withdrawals and transfers is a
//! check-then-act race. It is closed by per-account serialization: a mutex
//! scoped to the account id is held across the balance computation and the
//! append. Transfers lock the sender only; the recipient leg carries no
//! sufficiency check, and holding a single lock rules out deadlock.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use tally_shared::types::{AccountId, EventId};
use tokio::sync::Mutex;

use super::balance::{balance_of, AccountStatement};
use super::command::{Command, CommandOutcome};
use super::error::LedgerError;
use super::event::{EventDraft, LedgerEvent};
use super::store::{AccountDirectory, EventStore};

/// Ledger engine over an event store and an account directory.
///
/// Collaborators are wired explicitly at construction; no service locator.
pub struct LedgerEngine<S, D> {
    store: S,
    directory: D,
    locks: DashMap<AccountId, Arc<Mutex<()>>>,
}

impl<S, D> LedgerEngine<S, D>
where
    S: EventStore,
    D: AccountDirectory,
{
    /// Creates an engine over the given collaborators.
    #[must_use]
    pub fn new(store: S, directory: D) -> Self {
        Self {
            store,
            directory,
            locks: DashMap::new(),
        }
    }

    /// Returns the serialization scope for one account.
    fn account_lock(&self, account_id: AccountId) -> Arc<Mutex<()>> {
        self.locks.entry(account_id).or_default().clone()
    }

    fn require_positive(amount: Decimal) -> Result<(), LedgerError> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        Ok(())
    }

    async fn require_account(&self, account_id: AccountId) -> Result<(), LedgerError> {
        if self.directory.exists(account_id).await? {
            Ok(())
        } else {
            Err(LedgerError::AccountNotFound(account_id))
        }
    }

    /// Current balance, recomputed from the full event history.
    async fn current_balance(&self, account_id: AccountId) -> Result<Decimal, LedgerError> {
        let events = self.store.list_by_account(account_id).await?;
        Ok(balance_of(&events))
    }

    /// Records a deposit and returns the created event.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] if the account does not exist
    /// - [`LedgerError::InvalidAmount`] if `amount <= 0`
    /// - [`LedgerError::PersistenceFailure`] if the append fails
    pub async fn deposit(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: String,
    ) -> Result<LedgerEvent, LedgerError> {
        self.require_account(account_id).await?;
        Self::require_positive(amount)?;

        // Deposits need no sufficiency check, but appending under the
        // account scope keeps per-account created_at ordering consistent
        // with completed operations.
        let lock = self.account_lock(account_id);
        let _guard = lock.lock().await;

        self.store
            .append(EventDraft::deposit(account_id, amount, description))
            .await
    }

    /// Records a withdrawal and returns the created event.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] if the account does not exist
    /// - [`LedgerError::InvalidAmount`] if `amount <= 0`
    /// - [`LedgerError::InsufficientFunds`] if the balance does not cover it
    /// - [`LedgerError::PersistenceFailure`] if the append fails
    pub async fn withdraw(
        &self,
        account_id: AccountId,
        amount: Decimal,
        description: String,
    ) -> Result<LedgerEvent, LedgerError> {
        self.require_account(account_id).await?;
        Self::require_positive(amount)?;

        let lock = self.account_lock(account_id);
        let _guard = lock.lock().await;

        let balance = self.current_balance(account_id).await?;
        if balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }

        self.store
            .append(EventDraft::withdrawal(account_id, amount, description))
            .await
    }

    /// Atomically records the two legs of a transfer and returns the
    /// TransferOut leg.
    ///
    /// The sender's existence maps to [`LedgerError::AccountNotFound`], the
    /// recipient's to [`LedgerError::RecipientNotFound`]; the balance
    /// checked is always the sender's.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] if the sender does not exist
    /// - [`LedgerError::RecipientNotFound`] if the recipient does not exist
    /// - [`LedgerError::InvalidAmount`] if `amount <= 0`
    /// - [`LedgerError::SelfTransfer`] if sender and recipient are the same
    /// - [`LedgerError::InsufficientFunds`] if the sender cannot cover it
    /// - [`LedgerError::PersistenceFailure`] if the atomic append fails; no
    ///   partial state is visible in that case
    pub async fn transfer(
        &self,
        sender_id: AccountId,
        recipient_id: AccountId,
        amount: Decimal,
        description: String,
    ) -> Result<LedgerEvent, LedgerError> {
        self.require_account(sender_id).await?;
        if !self.directory.exists(recipient_id).await? {
            return Err(LedgerError::RecipientNotFound(recipient_id));
        }
        Self::require_positive(amount)?;
        if sender_id == recipient_id {
            return Err(LedgerError::SelfTransfer(sender_id));
        }

        let lock = self.account_lock(sender_id);
        let _guard = lock.lock().await;

        let balance = self.current_balance(sender_id).await?;
        if balance < amount {
            return Err(LedgerError::InsufficientFunds {
                balance,
                requested: amount,
            });
        }

        let (out_leg, _in_leg) = self
            .store
            .append_pair(
                EventDraft::transfer_out(sender_id, recipient_id, amount, description.clone()),
                EventDraft::transfer_in(recipient_id, sender_id, amount, description),
            )
            .await?;

        Ok(out_leg)
    }

    /// Derived balance plus full ordered history for an account.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] if the account does not exist
    /// - [`LedgerError::PersistenceFailure`] if the read fails
    pub async fn get_balance(
        &self,
        account_id: AccountId,
    ) -> Result<AccountStatement, LedgerError> {
        self.require_account(account_id).await?;
        let events = self.store.list_by_account(account_id).await?;
        Ok(AccountStatement::from_events(events))
    }

    /// Fetches one event belonging to an account.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::AccountNotFound`] if the account does not exist
    /// - [`LedgerError::EventNotFound`] if the event does not exist or
    ///   belongs to a different account
    /// - [`LedgerError::PersistenceFailure`] if the read fails
    pub async fn get_event(
        &self,
        account_id: AccountId,
        event_id: EventId,
    ) -> Result<LedgerEvent, LedgerError> {
        self.require_account(account_id).await?;

        let event = self
            .store
            .get(event_id)
            .await?
            .ok_or(LedgerError::EventNotFound(event_id))?;

        if event.account_id != account_id {
            return Err(LedgerError::EventNotFound(event_id));
        }

        Ok(event)
    }

    /// Dispatches one command to the matching operation.
    ///
    /// # Errors
    ///
    /// Propagates the dispatched operation's error.
    pub async fn dispatch(&self, command: Command) -> Result<CommandOutcome, LedgerError> {
        match command {
            Command::Deposit {
                account_id,
                amount,
                description,
            } => self
                .deposit(account_id, amount, description)
                .await
                .map(CommandOutcome::Event),
            Command::Withdraw {
                account_id,
                amount,
                description,
            } => self
                .withdraw(account_id, amount, description)
                .await
                .map(CommandOutcome::Event),
            Command::Transfer {
                sender_id,
                recipient_id,
                amount,
                description,
            } => self
                .transfer(sender_id, recipient_id, amount, description)
                .await
                .map(CommandOutcome::Event),
            Command::GetBalance { account_id } => self
                .get_balance(account_id)
                .await
                .map(CommandOutcome::Statement),
            Command::GetEvent {
                account_id,
                event_id,
            } => self
                .get_event(account_id, event_id)
                .await
                .map(CommandOutcome::Event),
        }
    }
}
