//! Durable event store backed by Postgres.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tally_core::ledger::{EventDraft, EventStore, LedgerError, LedgerEvent};
use tally_shared::types::{AccountId, EventId};
use tracing::debug;

use crate::entities::ledger_events;

/// Event store over a `SeaORM` Postgres connection.
///
/// `append_pair` wraps both inserts in one database transaction, which is
/// what makes transfer legs atomic: both rows commit or neither does.
#[derive(Debug, Clone)]
pub struct SqlEventStore {
    db: DatabaseConnection,
}

impl SqlEventStore {
    /// Creates a new event store over the given connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Builds the row for a draft, assigning id and timestamp.
    fn materialize(draft: &EventDraft) -> ledger_events::ActiveModel {
        ledger_events::ActiveModel {
            id: Set(EventId::new().into_inner()),
            account_id: Set(draft.account_id.into_inner()),
            counterparty_id: Set(draft.counterparty_id.map(AccountId::into_inner)),
            kind: Set(draft.kind.into()),
            amount: Set(draft.amount),
            description: Set(draft.description.clone()),
            created_at: Set(Utc::now().into()),
        }
    }

    async fn insert_draft<C: ConnectionTrait>(
        conn: &C,
        draft: &EventDraft,
    ) -> Result<LedgerEvent, LedgerError> {
        let row = Self::materialize(draft)
            .insert(conn)
            .await
            .map_err(LedgerError::persistence)?;
        Ok(to_domain(row))
    }
}

/// Maps a stored row to the domain event.
fn to_domain(row: ledger_events::Model) -> LedgerEvent {
    LedgerEvent {
        id: EventId::from_uuid(row.id),
        account_id: AccountId::from_uuid(row.account_id),
        counterparty_id: row.counterparty_id.map(AccountId::from_uuid),
        kind: row.kind.into(),
        amount: row.amount,
        description: row.description,
        created_at: row.created_at.with_timezone(&Utc),
    }
}

#[async_trait]
impl EventStore for SqlEventStore {
    async fn append(&self, draft: EventDraft) -> Result<LedgerEvent, LedgerError> {
        let event = Self::insert_draft(&self.db, &draft).await?;
        debug!(event_id = %event.id, account_id = %event.account_id, kind = %event.kind, "appended ledger event");
        Ok(event)
    }

    async fn append_pair(
        &self,
        first: EventDraft,
        second: EventDraft,
    ) -> Result<(LedgerEvent, LedgerEvent), LedgerError> {
        let txn = self.db.begin().await.map_err(LedgerError::persistence)?;

        let a = Self::insert_draft(&txn, &first).await?;
        let b = Self::insert_draft(&txn, &second).await?;

        txn.commit().await.map_err(LedgerError::persistence)?;
        debug!(first = %a.id, second = %b.id, "appended event pair");
        Ok((a, b))
    }

    async fn list_by_account(
        &self,
        account_id: AccountId,
    ) -> Result<Vec<LedgerEvent>, LedgerError> {
        // UUID v7 ids are time-ordered, so the id column breaks created_at
        // ties in insertion order.
        let rows = ledger_events::Entity::find()
            .filter(ledger_events::Column::AccountId.eq(account_id.into_inner()))
            .order_by_asc(ledger_events::Column::CreatedAt)
            .order_by_asc(ledger_events::Column::Id)
            .all(&self.db)
            .await
            .map_err(LedgerError::persistence)?;

        Ok(rows.into_iter().map(to_domain).collect())
    }

    async fn get(&self, event_id: EventId) -> Result<Option<LedgerEvent>, LedgerError> {
        let row = ledger_events::Entity::find_by_id(event_id.into_inner())
            .one(&self.db)
            .await
            .map_err(LedgerError::persistence)?;

        Ok(row.map(to_domain))
    }
}
