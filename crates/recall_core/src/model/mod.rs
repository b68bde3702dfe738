//! Domain model for captured entries and address-book contacts.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep entry and contact shapes independent of storage and UI concerns.
//!
//! # Invariants
//! - Every persisted entry is identified by a stable `EntryId`.
//! - Contact records are immutable snapshots provided by the caller.

pub mod contact;
pub mod entry;
