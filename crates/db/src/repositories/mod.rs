//! Repository abstractions for data access.

pub mod directory;
pub mod event_store;

pub use directory::SqlAccountDirectory;
pub use event_store::SqlEventStore;
