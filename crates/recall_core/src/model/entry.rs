//! Captured entry domain model.
//!
//! # Responsibility
//! - Define the persisted record produced by one capture.
//! - Provide write-path validation shared by repositories and services.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another entry.
//! - An entry must carry a non-blank name or a non-blank note.
//! - `created_at` is epoch milliseconds assigned at capture time.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every captured entry.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EntryId = Uuid;

/// One persisted quick-capture result.
///
/// `name`/`note` hold the parser output verbatim; `contact_id` is an opaque
/// address-book identifier attached after capture, or `None` when unlinked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable global ID used for linking and auditing.
    pub uuid: EntryId,
    /// Parsed contact name. May be empty when only a note was captured.
    pub name: String,
    /// Parsed free-text note, capped at 100 chars by the parser.
    pub note: String,
    /// Capture timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Opaque contact-directory ID, set when the user links the entry.
    pub contact_id: Option<String>,
}

/// Validation failure for entry write paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Both `name` and `note` are blank after trimming.
    EmptyEntry,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyEntry => write!(f, "entry requires a non-blank name or note"),
        }
    }
}

impl Error for EntryValidationError {}

impl Entry {
    /// Creates a new unlinked entry with a generated stable ID.
    pub fn new(name: impl Into<String>, note: impl Into<String>, created_at: i64) -> Self {
        Self::with_id(Uuid::new_v4(), name, note, created_at)
    }

    /// Creates an entry with a caller-provided stable ID.
    ///
    /// Used by read paths where identity already exists in storage.
    pub fn with_id(
        uuid: EntryId,
        name: impl Into<String>,
        note: impl Into<String>,
        created_at: i64,
    ) -> Self {
        Self {
            uuid,
            name: name.into(),
            note: note.into(),
            created_at,
            contact_id: None,
        }
    }

    /// Checks write-path invariants.
    ///
    /// # Errors
    /// - `EmptyEntry` when both `name` and `note` are blank.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.name.trim().is_empty() && self.note.trim().is_empty() {
            return Err(EntryValidationError::EmptyEntry);
        }
        Ok(())
    }
}
