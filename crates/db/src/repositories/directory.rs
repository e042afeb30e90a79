//! Account directory backed by the accounts table.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait};
use tally_core::ledger::{AccountDirectory, LedgerError};
use tally_shared::types::AccountId;

use crate::entities::accounts;

/// Account existence lookups against the accounts table.
///
/// The accounts table is owned by the external user collaborator; this
/// repository only ever reads it.
#[derive(Debug, Clone)]
pub struct SqlAccountDirectory {
    db: DatabaseConnection,
}

impl SqlAccountDirectory {
    /// Creates a new directory over the given connection.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AccountDirectory for SqlAccountDirectory {
    async fn exists(&self, account_id: AccountId) -> Result<bool, LedgerError> {
        let found = accounts::Entity::find_by_id(account_id.into_inner())
            .one(&self.db)
            .await
            .map_err(LedgerError::persistence)?;

        Ok(found.is_some())
    }
}
