//! Database enum mappings.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ledger event kind, mapped to the `event_kind` Postgres enum.
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "event_kind")]
pub enum EventKind {
    /// Money added directly to the account.
    #[sea_orm(string_value = "deposit")]
    Deposit,
    /// Money removed directly from the account.
    #[sea_orm(string_value = "withdrawal")]
    Withdrawal,
    /// Sending leg of a transfer.
    #[sea_orm(string_value = "transfer_out")]
    TransferOut,
    /// Receiving leg of a transfer.
    #[sea_orm(string_value = "transfer_in")]
    TransferIn,
}

impl From<tally_core::ledger::EventKind> for EventKind {
    fn from(kind: tally_core::ledger::EventKind) -> Self {
        match kind {
            tally_core::ledger::EventKind::Deposit => Self::Deposit,
            tally_core::ledger::EventKind::Withdrawal => Self::Withdrawal,
            tally_core::ledger::EventKind::TransferOut => Self::TransferOut,
            tally_core::ledger::EventKind::TransferIn => Self::TransferIn,
        }
    }
}

impl From<EventKind> for tally_core::ledger::EventKind {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Deposit => Self::Deposit,
            EventKind::Withdrawal => Self::Withdrawal,
            EventKind::TransferOut => Self::TransferOut,
            EventKind::TransferIn => Self::TransferIn,
        }
    }
}
