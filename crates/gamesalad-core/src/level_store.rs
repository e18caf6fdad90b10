use crate::level::{Level, WordEntry};
use crate::matcher::{self, FoundWords};
use crate::topology::Position;
use std::collections::BTreeSet;
use tracing::info;

/// The level being played and the words found in this attempt
#[derive(Debug, Clone)]
pub struct LevelStore {
    level: Level,
    found: FoundWords,
}

impl LevelStore {
    pub fn new(level: Level) -> Self {
        Self {
            level,
            found: FoundWords::new(),
        }
    }

    /// Swap in a different level and forget found words
    pub fn load(&mut self, level: Level) {
        info!(level = level.id(), words = level.word_count(), "level loaded");
        self.level = level;
        self.found.clear();
    }

    /// Start the current level over
    pub fn restart(&mut self) {
        self.found.clear();
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn found(&self) -> &FoundWords {
        &self.found
    }

    /// Record a found word. Returns `false` for unknown or repeated words.
    pub fn mark_found(&mut self, word: &str) -> bool {
        if !self.level.contains_word(word) {
            return false;
        }
        self.found.insert(word.to_string())
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found.contains(word)
    }

    pub fn is_complete(&self) -> bool {
        self.found.len() == self.level.word_count()
    }

    /// Entries still to be found, in definition order
    pub fn remaining(&self) -> impl Iterator<Item = &WordEntry> {
        self.level
            .entries()
            .iter()
            .filter(|e| !self.found.contains(e.word()))
    }

    pub fn remaining_count(&self) -> usize {
        self.level.word_count() - self.found.len()
    }

    /// Find the unfound word spelled by `path`
    pub fn find_match(&self, path: &[Position]) -> Option<&str> {
        matcher::find_match(path, &self.level, &self.found)
    }

    pub fn used_positions(&self) -> BTreeSet<Position> {
        matcher::used_positions(&self.level, &self.found)
    }

    pub fn unused_positions(&self) -> BTreeSet<Position> {
        matcher::unused_positions(&self.level, &self.found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level() -> Level {
        Level::new("sf", "Street Fighters", [("KEN", "a1b2c3"), ("RYU", "c1d1d2")]).unwrap()
    }

    #[test]
    fn test_mark_found() {
        let mut store = LevelStore::new(level());
        assert!(store.mark_found("KEN"));
        assert!(!store.mark_found("KEN"));
        assert!(!store.mark_found("GUILE"));
        assert!(store.is_found("KEN"));
        assert_eq!(store.remaining_count(), 1);
        assert_eq!(store.remaining().map(|e| e.word()).collect::<Vec<_>>(), vec!["RYU"]);
        assert!(!store.is_complete());
        assert!(store.mark_found("RYU"));
        assert!(store.is_complete());
    }

    #[test]
    fn test_restart_and_load_reset_found() {
        let mut store = LevelStore::new(level());
        store.mark_found("KEN");
        store.restart();
        assert!(store.found().is_empty());

        store.mark_found("RYU");
        store.load(Level::new("cat", "Cat", [("CAT", "a1a2a3")]).unwrap());
        assert!(store.found().is_empty());
        assert_eq!(store.level().id(), "cat");
    }

    #[test]
    fn test_positions_follow_found_words() {
        let mut store = LevelStore::new(level());
        assert_eq!(store.used_positions().len(), 6);
        store.mark_found("KEN");
        assert_eq!(store.used_positions().len(), 3);
        assert_eq!(store.unused_positions().len(), 13);
    }
}
