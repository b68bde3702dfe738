//! Capture use-case service.
//!
//! # Responsibility
//! - Turn raw capture input into a persisted entry via the parser.
//! - Provide recent-entry listing and contact link/unlink APIs.
//!
//! # Invariants
//! - Blank input (empty parse on both fields) is never persisted.
//! - Stored entries are read back after every write; a missing read-back is
//!   an internal consistency error, not silent success.
//! - Service APIs never bypass repository validation contracts.

use crate::model::contact::ContactIndex;
use crate::model::entry::{Entry, EntryId};
use crate::parse::{parse_name_note, ParseResult};
use crate::repo::entry_repo::{
    normalize_entry_limit, EntryListQuery, EntryRepository, RepoError, RepoResult,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Service error for capture use-cases.
#[derive(Debug)]
pub enum CaptureError {
    /// Target entry does not exist.
    EntryNotFound(EntryId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for CaptureError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EntryNotFound(entry_id) => write!(f, "entry not found: {entry_id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent entry state: {details}"),
        }
    }
}

impl Error for CaptureError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CaptureError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(entry_id) => Self::EntryNotFound(entry_id),
            other => Self::Repo(other),
        }
    }
}

/// List result envelope used by service callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentEntries {
    /// Entries sorted by `created_at DESC, uuid ASC`.
    pub items: Vec<Entry>,
    /// Effective normalized limit used by the query.
    pub applied_limit: u32,
}

/// Capture service facade over repository implementations.
pub struct CaptureService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> CaptureService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Parses raw input and persists the result as a new entry.
    ///
    /// Returns `Ok(None)` without touching storage when the parse yields an
    /// empty name and note (blank or whitespace-only input).
    pub fn capture(
        &self,
        raw_input: &str,
        contacts: Option<&ContactIndex>,
    ) -> Result<Option<Entry>, CaptureError> {
        let ParseResult { name, note } = parse_name_note(raw_input, contacts);
        if name.is_empty() && note.is_empty() {
            info!("event=capture module=service status=skipped reason=blank_input");
            return Ok(None);
        }

        let entry = Entry::new(name, note, now_epoch_ms());
        let entry_id = self.repo.create_entry(&entry)?;
        let stored = self
            .repo
            .get_entry(entry_id)?
            .ok_or(CaptureError::InconsistentState(
                "captured entry not found in read-back",
            ))?;

        info!("event=capture module=service status=ok entry_id={entry_id}");
        Ok(Some(stored))
    }

    /// Gets one entry by stable ID.
    pub fn get_entry(&self, entry_id: EntryId) -> RepoResult<Option<Entry>> {
        self.repo.get_entry(entry_id)
    }

    /// Lists recent entries, newest first, using normalized pagination.
    pub fn list_recent(
        &self,
        limit: Option<u32>,
        offset: u32,
    ) -> Result<RecentEntries, CaptureError> {
        let applied_limit = normalize_entry_limit(limit);
        let query = EntryListQuery {
            limit: Some(applied_limit),
            offset,
        };
        let items = self.repo.list_recent(&query)?;
        Ok(RecentEntries {
            items,
            applied_limit,
        })
    }

    /// Links one entry to an address-book contact.
    pub fn link_contact(
        &self,
        entry_id: EntryId,
        contact_id: String,
    ) -> Result<Entry, CaptureError> {
        self.set_contact(entry_id, Some(contact_id))
    }

    /// Clears the contact link on one entry.
    pub fn unlink_contact(&self, entry_id: EntryId) -> Result<Entry, CaptureError> {
        self.set_contact(entry_id, None)
    }

    fn set_contact(
        &self,
        entry_id: EntryId,
        contact_id: Option<String>,
    ) -> Result<Entry, CaptureError> {
        self.repo.link_contact(entry_id, contact_id.as_deref())?;
        self.repo
            .get_entry(entry_id)?
            .ok_or(CaptureError::InconsistentState(
                "entry missing after contact link update",
            ))
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
