//! Contact snapshot model and name lookup index.
//!
//! # Responsibility
//! - Represent address-book contacts as immutable snapshots.
//! - Build the normalized name index consumed by the capture parser.
//! - Provide the substring search used by the contact link picker.
//!
//! # Invariants
//! - Index keys are whitespace-collapsed, trimmed and lower-cased full names.
//! - On duplicate normalized names the last record wins.
//! - Records with blank display names are never indexed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable snapshot of one address-book contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    /// Opaque identifier assigned by the contacts directory.
    pub id: String,
    /// Display name; may contain multiple words and arbitrary case.
    pub name: String,
}

/// Read-only lookup from normalized full name to contact record.
///
/// Built once per contacts load and handed to [`crate::parse_name_note`]
/// by reference; the parser never mutates it.
#[derive(Debug, Clone, Default)]
pub struct ContactIndex {
    by_name: HashMap<String, ContactRecord>,
}

impl ContactIndex {
    /// Builds an index from a contact snapshot.
    ///
    /// Records with blank names are skipped; collisions on the normalized
    /// name keep the last record seen.
    pub fn from_records(records: &[ContactRecord]) -> Self {
        let mut by_name = HashMap::new();
        for record in records {
            let key = normalize_contact_name(&record.name);
            if key.is_empty() {
                continue;
            }
            by_name.insert(key, record.clone());
        }
        Self { by_name }
    }

    /// Looks up a contact by its normalized full name.
    pub fn get(&self, normalized_name: &str) -> Option<&ContactRecord> {
        self.by_name.get(normalized_name)
    }

    /// Number of indexed contacts.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Whether the index holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// Normalizes a display name into an index key.
///
/// Collapses whitespace runs to single spaces, trims, lower-cases.
pub fn normalize_contact_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Case-insensitive substring search over a contact snapshot.
///
/// A blank query returns every record. Results are sorted by display name,
/// case-insensitively, for stable picker rendering.
pub fn search_contacts(records: &[ContactRecord], query: &str) -> Vec<ContactRecord> {
    let needle = query.trim().to_lowercase();
    let mut matches: Vec<ContactRecord> = records
        .iter()
        .filter(|record| needle.is_empty() || record.name.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    matches.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
    matches
}
