//! Name/note capture parser.
//!
//! # Responsibility
//! - Split one raw capture utterance into a contact name and a free-text
//!   note using fixed-priority heuristics.
//! - Resolve leading tokens against a caller-supplied contact index.
//!
//! # Invariants
//! - Never fails: every input, however malformed, maps to a well-formed
//!   [`ParseResult`].
//! - Output fields carry no leading/trailing whitespace; internal runs are
//!   collapsed to single spaces.
//! - `note` is at most 100 characters after truncation.
//! - Delimiter *types* are checked in priority order; a hyphen is never
//!   considered while an em-dash exists anywhere in the input, even when the
//!   hyphen occurs earlier.

use crate::model::contact::ContactIndex;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Hard character cap applied to the note after splitting.
const NOTE_MAX_CHARS: usize = 100;

/// Split delimiters in priority order: em-dash, hyphen, colon.
///
/// A later type is considered only when no earlier type occurs anywhere in
/// the input. This is intentionally not "earliest position across types".
const DELIMITERS: [char; 3] = ['—', '-', ':'];

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Eligibility check for contact-candidate tokens: ASCII uppercase first
/// letter, then word characters, apostrophes, periods or hyphens.
///
/// Deliberately ASCII-first: accented capitals are a known limitation of the
/// heuristic, not an oversight.
static NAME_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][\w'.-]*$").expect("valid name token regex"));

/// Parsed split of one capture utterance.
///
/// Constructed fresh per call; both fields may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    /// Contact name portion. Canonical display name on an index match.
    pub name: String,
    /// Free-text note portion, capped at 100 characters.
    pub note: String,
}

/// Splits raw capture input into name and note.
///
/// Rules in strict priority order; the first matching rule wins:
/// 1. Empty normalized input returns the empty result.
/// 2. Explicit delimiter split (em-dash, then hyphen, then colon), with
///    absolute priority over all token heuristics.
/// 3. Contact-aware leading-token match against `contacts`, longest
///    candidate first (3, 2, 1 tokens), canonical stored name on a hit.
/// 4. First token starting with an ASCII uppercase letter.
/// 5. First token, unconditionally.
///
/// Pure and deterministic; safe to call concurrently.
pub fn parse_name_note(raw_input: &str, contacts: Option<&ContactIndex>) -> ParseResult {
    let normalized = collapse_whitespace(raw_input);
    if normalized.is_empty() {
        return ParseResult::default();
    }

    if let Some((delimiter, index)) = find_delimiter(&normalized) {
        let name = collapse_whitespace(&normalized[..index]);
        let note = collapse_whitespace(&normalized[index + delimiter.len_utf8()..]);
        return ParseResult {
            name,
            note: truncate_note(note),
        };
    }

    let tokens: Vec<&str> = normalized.split(' ').collect();

    if let Some(index) = contacts.filter(|index| !index.is_empty()) {
        let max_candidate = tokens.len().min(3);
        for length in (1..=max_candidate).rev() {
            let candidate = &tokens[..length];
            if !candidate.iter().all(|token| NAME_TOKEN_RE.is_match(token)) {
                continue;
            }
            if let Some(record) = index.get(&candidate.join(" ").to_lowercase()) {
                return ParseResult {
                    name: record.name.clone(),
                    note: truncate_note(tokens[length..].join(" ")),
                };
            }
        }
    }

    if let Some(position) = tokens.iter().position(|token| starts_uppercase(token)) {
        return ParseResult {
            name: tokens[position].to_string(),
            note: truncate_note(tokens[position + 1..].join(" ")),
        };
    }

    ParseResult {
        name: tokens[0].to_string(),
        note: truncate_note(tokens[1..].join(" ")),
    }
}

/// Collapses whitespace runs (tabs/newlines included) to single spaces and
/// trims both ends.
fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value, " ").trim().to_string()
}

/// Finds the split point: first occurrence of the highest-priority delimiter
/// type present anywhere in the input. Returns byte index.
fn find_delimiter(input: &str) -> Option<(char, usize)> {
    DELIMITERS
        .iter()
        .find_map(|&delimiter| input.find(delimiter).map(|index| (delimiter, index)))
}

/// Applies the hard 100-character note cap, trimming any trailing
/// whitespace exposed by the cut. No word-boundary awareness.
fn truncate_note(note: String) -> String {
    if note.chars().count() <= NOTE_MAX_CHARS {
        return note;
    }
    let cut: String = note.chars().take(NOTE_MAX_CHARS).collect();
    cut.trim_end().to_string()
}

fn starts_uppercase(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|first| first.is_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::{parse_name_note, ParseResult};
    use crate::model::contact::{ContactIndex, ContactRecord};

    fn index(pairs: &[(&str, &str)]) -> ContactIndex {
        let records: Vec<ContactRecord> = pairs
            .iter()
            .map(|(id, name)| ContactRecord {
                id: id.to_string(),
                name: name.to_string(),
            })
            .collect();
        ContactIndex::from_records(&records)
    }

    fn split(name: &str, note: &str) -> ParseResult {
        ParseResult {
            name: name.to_string(),
            note: note.to_string(),
        }
    }

    #[test]
    fn empty_and_whitespace_only_input_yield_empty_result() {
        assert_eq!(parse_name_note("", None), ParseResult::default());
        assert_eq!(parse_name_note("  \t\n  ", None), ParseResult::default());
    }

    #[test]
    fn splits_on_first_em_dash() {
        let result = parse_name_note("Jeremy — met at networking", None);
        assert_eq!(result, split("Jeremy", "met at networking"));
    }

    #[test]
    fn em_dash_wins_over_earlier_hyphen_and_colon() {
        // The hyphen and colon occur first by position; the em-dash type
        // still takes priority.
        let result = parse_name_note("Anna-Lena: sales — call back Friday", None);
        assert_eq!(result, split("Anna-Lena: sales", "call back Friday"));
    }

    #[test]
    fn hyphen_wins_over_earlier_colon_when_no_em_dash() {
        let result = parse_name_note("Team: check follow-up notes", None);
        assert_eq!(result, split("Team: check follow", "up notes"));
    }

    #[test]
    fn splits_on_first_colon_when_no_dash_of_any_kind() {
        let result = parse_name_note("Liz: follow up: with deck", None);
        assert_eq!(result, split("Liz", "follow up: with deck"));
    }

    #[test]
    fn delimiter_split_ignores_contact_index() {
        let contacts = index(&[("1", "Jeremy Fox")]);
        let result = parse_name_note("jeremy fox: lowercase still splits", Some(&contacts));
        assert_eq!(result, split("jeremy fox", "lowercase still splits"));
    }

    #[test]
    fn delimiter_split_normalizes_both_halves() {
        let result = parse_name_note("  Jeremy \t Fox  —   met   at\nnetworking ", None);
        assert_eq!(result, split("Jeremy Fox", "met at networking"));
    }

    #[test]
    fn contact_match_prefers_longest_candidate() {
        let contacts = index(&[("1", "Jeremy"), ("2", "Jeremy Fox")]);
        let result = parse_name_note("Jeremy Fox intro from meetup", Some(&contacts));
        assert_eq!(result, split("Jeremy Fox", "intro from meetup"));
    }

    #[test]
    fn contact_match_returns_canonical_stored_name() {
        let contacts = index(&[("1", "JEREMY FOX")]);
        let result = parse_name_note("Jeremy Fox intro", Some(&contacts));
        assert_eq!(result, split("JEREMY FOX", "intro"));
    }

    #[test]
    fn contact_match_requires_capitalized_candidate_tokens() {
        let contacts = index(&[("1", "Jeremy Fox")]);
        // Second token is lowercase, so the two-token candidate is ineligible
        // and no shorter candidate matches the index.
        let result = parse_name_note("Jeremy fox intro", Some(&contacts));
        assert_eq!(result, split("Jeremy", "fox intro"));
    }

    #[test]
    fn contact_match_accepts_punctuated_name_tokens() {
        let contacts = index(&[("1", "O'Brien Jr."), ("2", "Mary-Jane")]);
        let result = parse_name_note("O'Brien Jr. owes an intro", Some(&contacts));
        assert_eq!(result, split("O'Brien Jr.", "owes an intro"));

        let result = parse_name_note("Mary-Jane called", Some(&contacts));
        // Hyphen delimiter has absolute priority over contact matching.
        assert_eq!(result, split("Mary", "Jane called"));
    }

    #[test]
    fn contact_matching_skipped_without_index() {
        let result = parse_name_note("Jeremy Fox intro from meetup", None);
        assert_eq!(result, split("Jeremy", "Fox intro from meetup"));
    }

    #[test]
    fn contact_matching_skipped_for_empty_index() {
        let contacts = index(&[]);
        let result = parse_name_note("Jeremy Fox intro from meetup", Some(&contacts));
        assert_eq!(result, split("Jeremy", "Fox intro from meetup"));
    }

    #[test]
    fn falls_back_to_first_capitalized_token() {
        let contacts = index(&[("2", "Sarah")]);
        let result = parse_name_note("remember Sarah from event", Some(&contacts));
        assert_eq!(result, split("Sarah", "from event"));
    }

    #[test]
    fn capitalized_fallback_is_single_token_verbatim() {
        let result = parse_name_note("call Jeremy Fox tomorrow", None);
        assert_eq!(result, split("Jeremy", "Fox tomorrow"));
    }

    #[test]
    fn ultimate_fallback_uses_first_token() {
        let result = parse_name_note("lowercase note with no names", None);
        assert_eq!(result, split("lowercase", "note with no names"));
    }

    #[test]
    fn single_token_input_yields_empty_note() {
        assert_eq!(parse_name_note("Jeremy", None), split("Jeremy", ""));
        assert_eq!(parse_name_note("jeremy", None), split("jeremy", ""));
    }

    #[test]
    fn note_is_cut_to_100_chars_without_trailing_whitespace() {
        let input = format!("Max — {}", "a".repeat(150));
        let result = parse_name_note(&input, None);
        assert_eq!(result.name, "Max");
        assert_eq!(result.note.chars().count(), 100);

        // Force the cut to land right after a space.
        let padded = format!("Max — {} {}", "b".repeat(99), "c".repeat(60));
        let result = parse_name_note(&padded, None);
        assert_eq!(result.note, "b".repeat(99));
        assert!(!result.note.ends_with(' '));
    }

    #[test]
    fn truncation_applies_on_heuristic_paths_too() {
        let input = format!("Sarah {}", "x".repeat(140));
        let result = parse_name_note(&input, None);
        assert_eq!(result.name, "Sarah");
        assert_eq!(result.note.chars().count(), 100);
    }

    #[test]
    fn delimiter_split_is_idempotent_when_delimiter_is_preserved() {
        let first = parse_name_note("Liz: follow up with deck", None);
        let rejoined = format!("{}: {}", first.name, first.note);
        let second = parse_name_note(&rejoined, None);
        assert_eq!(first, second);
    }

    #[test]
    fn non_ascii_capitalized_name_is_not_eligible_for_contact_match() {
        // Known limitation: the eligibility check is ASCII-first, so the
        // index entry is never consulted and the ultimate fallback applies.
        let contacts = index(&[("1", "Éloise")]);
        let result = parse_name_note("Éloise new studio", Some(&contacts));
        assert_eq!(result, split("Éloise", "new studio"));
    }

    #[test]
    fn pure_punctuation_input_still_returns_a_result() {
        let result = parse_name_note("!!! ???", None);
        assert_eq!(result, split("!!!", "???"));
    }
}
