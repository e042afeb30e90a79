//! `SeaORM` Entity for the accounts table.
//!
//! Accounts are owned by the external user-management collaborator; this
//! entity exists only as the foreign-key target for ledger events and as the
//! lookup table behind the account directory. The ledger engine never
//! creates, updates, or deletes rows here.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ledger_events::Entity")]
    LedgerEvents,
}

impl Related<super::ledger_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LedgerEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
