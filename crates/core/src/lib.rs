//! Core business logic for Tally.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `ledger` - Append-only event ledger and balance derivation

pub mod ledger;
