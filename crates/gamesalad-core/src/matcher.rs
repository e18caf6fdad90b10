//! Matching a selection against a level's words.

use crate::level::Level;
use crate::topology::{encode_path, Position};
use std::collections::BTreeSet;

/// Words found so far in the current level attempt
pub type FoundWords = BTreeSet<String>;

/// Find the unfound word whose path is exactly `path`.
///
/// Scans entries in definition order and returns the first hit. Paths are
/// unique within a validated level, so order never changes the answer.
pub fn find_match<'a>(path: &[Position], level: &'a Level, found: &FoundWords) -> Option<&'a str> {
    if path.is_empty() {
        return None;
    }
    let encoded = encode_path(path);
    level
        .entries()
        .iter()
        .filter(|e| !found.contains(e.word()))
        .find(|e| e.encoded_path() == encoded)
        .map(|e| e.word())
}

/// Cells traversed by at least one word that is still to be found
pub fn used_positions(level: &Level, found: &FoundWords) -> BTreeSet<Position> {
    level
        .entries()
        .iter()
        .filter(|e| !found.contains(e.word()))
        .flat_map(|e| e.path().iter().copied())
        .collect()
}

/// Cells no remaining word needs; these leave the board
pub fn unused_positions(level: &Level, found: &FoundWords) -> BTreeSet<Position> {
    let used = used_positions(level, found);
    Position::all().filter(|p| !used.contains(p)).collect()
}
