//! Core domain logic for Recall quick-capture.
//! This crate is the single source of truth for capture parsing and storage.

pub mod db;
pub mod logging;
pub mod model;
pub mod parse;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::contact::{normalize_contact_name, search_contacts, ContactIndex, ContactRecord};
pub use model::entry::{Entry, EntryId, EntryValidationError};
pub use parse::{parse_name_note, ParseResult};
pub use repo::entry_repo::{
    EntryListQuery, EntryRepository, RepoError, RepoResult, SqliteEntryRepository,
};
pub use service::capture_service::{CaptureError, CaptureService, RecentEntries};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
