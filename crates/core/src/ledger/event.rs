//! Ledger event types.
//!
//! A ledger event is one immutable record of a monetary movement affecting
//! exactly one account's balance. Transfers produce two linked events, one
//! per account, cross-referenced through `counterparty_id`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tally_shared::types::{AccountId, EventId};

/// Event kind determining the balance sign contribution.
///
/// Transfers are split into two kinds so the sign is unambiguous without
/// inspecting `counterparty_id`:
/// - Deposit and TransferIn add to the balance
/// - Withdrawal and TransferOut subtract from it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Money added directly to the account.
    Deposit,
    /// Money removed directly from the account.
    Withdrawal,
    /// Sending leg of a transfer; counterparty is the recipient.
    TransferOut,
    /// Receiving leg of a transfer; counterparty is the sender.
    TransferIn,
}

impl EventKind {
    /// Returns true if this kind adds to the account balance.
    #[must_use]
    pub fn is_credit(self) -> bool {
        matches!(self, Self::Deposit | Self::TransferIn)
    }

    /// Returns true if this kind is one of the two transfer legs.
    #[must_use]
    pub fn is_transfer_leg(self) -> bool {
        matches!(self, Self::TransferOut | Self::TransferIn)
    }

    /// Applies the sign for this kind to a (positive) event amount.
    #[must_use]
    pub fn signed(self, amount: Decimal) -> Decimal {
        if self.is_credit() {
            amount
        } else {
            -amount
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "deposit"),
            Self::Withdrawal => write!(f, "withdrawal"),
            Self::TransferOut => write!(f, "transfer_out"),
            Self::TransferIn => write!(f, "transfer_in"),
        }
    }
}

/// A persisted ledger event, immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Unique event ID, assigned by the store at creation.
    pub id: EventId,
    /// The account whose balance this event affects.
    pub account_id: AccountId,
    /// The other party, present only for transfer legs.
    pub counterparty_id: Option<AccountId>,
    /// Event kind.
    pub kind: EventKind,
    /// Strictly positive amount in minor currency units.
    pub amount: Decimal,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp, monotonically non-decreasing per account.
    pub created_at: DateTime<Utc>,
}

impl LedgerEvent {
    /// Returns the signed balance contribution of this event.
    #[must_use]
    pub fn signed_amount(&self) -> Decimal {
        self.kind.signed(self.amount)
    }
}

/// An event awaiting persistence; the store assigns `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    /// The account whose balance this event will affect.
    pub account_id: AccountId,
    /// The other party, present only for transfer legs.
    pub counterparty_id: Option<AccountId>,
    /// Event kind.
    pub kind: EventKind,
    /// Strictly positive amount in minor currency units.
    pub amount: Decimal,
    /// Free-form description.
    pub description: String,
}

impl EventDraft {
    /// Draft for a direct deposit.
    #[must_use]
    pub fn deposit(account_id: AccountId, amount: Decimal, description: String) -> Self {
        Self {
            account_id,
            counterparty_id: None,
            kind: EventKind::Deposit,
            amount,
            description,
        }
    }

    /// Draft for a direct withdrawal.
    #[must_use]
    pub fn withdrawal(account_id: AccountId, amount: Decimal, description: String) -> Self {
        Self {
            account_id,
            counterparty_id: None,
            kind: EventKind::Withdrawal,
            amount,
            description,
        }
    }

    /// Draft for the sending leg of a transfer.
    #[must_use]
    pub fn transfer_out(
        sender_id: AccountId,
        recipient_id: AccountId,
        amount: Decimal,
        description: String,
    ) -> Self {
        Self {
            account_id: sender_id,
            counterparty_id: Some(recipient_id),
            kind: EventKind::TransferOut,
            amount,
            description,
        }
    }

    /// Draft for the receiving leg of a transfer.
    #[must_use]
    pub fn transfer_in(
        recipient_id: AccountId,
        sender_id: AccountId,
        amount: Decimal,
        description: String,
    ) -> Self {
        Self {
            account_id: recipient_id,
            counterparty_id: Some(sender_id),
            kind: EventKind::TransferIn,
            amount,
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_credit_kinds() {
        assert!(EventKind::Deposit.is_credit());
        assert!(EventKind::TransferIn.is_credit());
        assert!(!EventKind::Withdrawal.is_credit());
        assert!(!EventKind::TransferOut.is_credit());
    }

    #[test]
    fn test_transfer_legs() {
        assert!(EventKind::TransferOut.is_transfer_leg());
        assert!(EventKind::TransferIn.is_transfer_leg());
        assert!(!EventKind::Deposit.is_transfer_leg());
        assert!(!EventKind::Withdrawal.is_transfer_leg());
    }

    #[test]
    fn test_signed_amounts() {
        assert_eq!(EventKind::Deposit.signed(dec!(100)), dec!(100));
        assert_eq!(EventKind::TransferIn.signed(dec!(100)), dec!(100));
        assert_eq!(EventKind::Withdrawal.signed(dec!(100)), dec!(-100));
        assert_eq!(EventKind::TransferOut.signed(dec!(100)), dec!(-100));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EventKind::Deposit.to_string(), "deposit");
        assert_eq!(EventKind::Withdrawal.to_string(), "withdrawal");
        assert_eq!(EventKind::TransferOut.to_string(), "transfer_out");
        assert_eq!(EventKind::TransferIn.to_string(), "transfer_in");
    }

    #[test]
    fn test_transfer_drafts_cross_reference() {
        let sender = AccountId::new();
        let recipient = AccountId::new();

        let out = EventDraft::transfer_out(sender, recipient, dec!(50), "rent".into());
        let inn = EventDraft::transfer_in(recipient, sender, dec!(50), "rent".into());

        assert_eq!(out.account_id, sender);
        assert_eq!(out.counterparty_id, Some(recipient));
        assert_eq!(inn.account_id, recipient);
        assert_eq!(inn.counterparty_id, Some(sender));
        assert_eq!(out.amount, inn.amount);
    }

    #[test]
    fn test_direct_drafts_have_no_counterparty() {
        let account = AccountId::new();
        assert_eq!(
            EventDraft::deposit(account, dec!(10), "salary".into()).counterparty_id,
            None
        );
        assert_eq!(
            EventDraft::withdrawal(account, dec!(10), "atm".into()).counterparty_id,
            None
        );
    }
}
