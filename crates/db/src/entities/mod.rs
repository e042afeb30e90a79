//! `SeaORM` entity definitions.

pub mod accounts;
pub mod ledger_events;
pub mod sea_orm_active_enums;
