//! Level definitions and validation.
//!
//! A level maps each word to the path that spells it on the board. Letters
//! are implied by the paths: the `n`th letter of a word (spaces removed)
//! sits on the `n`th cell of its path.

use crate::topology::{decode_path, encode_path, Position, CELL_COUNT, GRID_SIZE};
use thiserror::Error;

/// Reasons a level definition is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LevelError {
    #[error("level `{0}` has no words")]
    Empty(String),
    #[error("level `{level}` contains an empty word")]
    EmptyWord { level: String },
    #[error("word `{word}` is defined twice")]
    DuplicateWord { word: String },
    #[error("word `{word}` has an invalid path `{path}`")]
    InvalidPath { word: String, path: String },
    #[error("word `{word}` has {letters} letters but its path covers {cells} cells")]
    LengthMismatch {
        word: String,
        letters: usize,
        cells: usize,
    },
    #[error("word `{word}` jumps from {from} to {to}, which are not adjacent")]
    NotAdjacent {
        word: String,
        from: Position,
        to: Position,
    },
    #[error("word `{word}` visits {position} twice")]
    RevisitedCell { word: String, position: Position },
    #[error("cell {position} holds `{existing}` but word `{word}` places `{letter}` there")]
    LetterConflict {
        word: String,
        position: Position,
        existing: char,
        letter: char,
    },
    #[error("words `{first}` and `{second}` share the path `{path}`")]
    DuplicatePath {
        first: String,
        second: String,
        path: String,
    },
}

/// One word of a level together with its path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    word: String,
    path: Vec<Position>,
    encoded: String,
}

impl WordEntry {
    /// The word as displayed, spaces included
    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    /// Path as concatenated cell codes
    pub fn encoded_path(&self) -> &str {
        &self.encoded
    }

    /// Letters that sit on the board (spaces removed)
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.word.chars().filter(|c| !c.is_whitespace())
    }

    /// Number of letters on the board
    pub fn letter_count(&self) -> usize {
        self.path.len()
    }
}

/// A validated puzzle board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Level {
    id: String,
    name: String,
    entries: Vec<WordEntry>,
    letters: [Option<char>; CELL_COUNT],
}

impl Level {
    /// Build and validate a level from `(word, encoded path)` pairs.
    ///
    /// Entries keep their definition order.
    pub fn new<I, W, P>(
        id: impl Into<String>,
        name: impl Into<String>,
        definitions: I,
    ) -> Result<Self, LevelError>
    where
        I: IntoIterator<Item = (W, P)>,
        W: Into<String>,
        P: AsRef<str>,
    {
        let id = id.into();
        let mut entries: Vec<WordEntry> = Vec::new();
        let mut letters = [None; CELL_COUNT];

        for (word, encoded) in definitions {
            let word = word.into();
            let encoded = encoded.as_ref();
            let entry = Self::build_entry(&id, word, encoded)?;

            if entries.iter().any(|e| e.word == entry.word) {
                return Err(LevelError::DuplicateWord { word: entry.word });
            }
            if let Some(other) = entries.iter().find(|e| e.encoded == entry.encoded) {
                return Err(LevelError::DuplicatePath {
                    first: other.word.clone(),
                    second: entry.word,
                    path: entry.encoded,
                });
            }

            for (pos, letter) in entry.path.iter().zip(entry.letters()) {
                match letters[pos.index()] {
                    Some(existing) if existing != letter => {
                        return Err(LevelError::LetterConflict {
                            word: entry.word.clone(),
                            position: *pos,
                            existing,
                            letter,
                        });
                    }
                    _ => letters[pos.index()] = Some(letter),
                }
            }

            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(LevelError::Empty(id));
        }

        Ok(Self {
            id,
            name: name.into(),
            entries,
            letters,
        })
    }

    fn build_entry(level: &str, word: String, encoded: &str) -> Result<WordEntry, LevelError> {
        let letter_count = word.chars().filter(|c| !c.is_whitespace()).count();
        if letter_count == 0 {
            return Err(LevelError::EmptyWord {
                level: level.to_string(),
            });
        }

        let path = decode_path(encoded)
            .filter(|p| !p.is_empty())
            .ok_or_else(|| LevelError::InvalidPath {
                word: word.clone(),
                path: encoded.to_string(),
            })?;

        if path.len() != letter_count {
            return Err(LevelError::LengthMismatch {
                word,
                letters: letter_count,
                cells: path.len(),
            });
        }

        for (i, pos) in path.iter().enumerate() {
            if path[..i].contains(pos) {
                return Err(LevelError::RevisitedCell {
                    word,
                    position: *pos,
                });
            }
        }

        if let Some(w) = path.windows(2).find(|w| !w[0].is_adjacent(w[1])) {
            return Err(LevelError::NotAdjacent {
                word,
                from: w[0],
                to: w[1],
            });
        }

        Ok(WordEntry {
            word,
            encoded: encode_path(&path),
            path,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn word_count(&self) -> usize {
        self.entries.len()
    }

    pub fn entry(&self, word: &str) -> Option<&WordEntry> {
        self.entries.iter().find(|e| e.word == word)
    }

    pub fn contains_word(&self, word: &str) -> bool {
        self.entry(word).is_some()
    }

    /// Letter shown on a cell, if any word passes through it
    pub fn letter_at(&self, pos: Position) -> Option<char> {
        self.letters[pos.index()]
    }

    /// Board letters by `[row][col]`
    pub fn grid(&self) -> [[Option<char>; GRID_SIZE]; GRID_SIZE] {
        let mut grid = [[None; GRID_SIZE]; GRID_SIZE];
        for pos in Position::all() {
            grid[pos.row()][pos.col()] = self.letter_at(pos);
        }
        grid
    }

    /// Cells no word passes through
    pub fn uncovered_cells(&self) -> Vec<Position> {
        Position::all()
            .filter(|p| self.letter_at(*p).is_none())
            .collect()
    }

    /// Letters along an arbitrary path, as shown on the board
    pub fn spell(&self, path: &[Position]) -> String {
        path.iter().filter_map(|p| self.letter_at(*p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(code: &str) -> Position {
        Position::parse(code).unwrap()
    }

    #[test]
    fn test_simple_level() {
        let level = Level::new("cat", "Cat", [("CAT", "a1a2a3")]).unwrap();
        assert_eq!(level.id(), "cat");
        assert_eq!(level.word_count(), 1);
        assert_eq!(level.letter_at(p("a1")), Some('C'));
        assert_eq!(level.letter_at(p("a3")), Some('T'));
        assert_eq!(level.letter_at(p("d4")), None);
        assert_eq!(level.uncovered_cells().len(), 13);
        assert_eq!(level.spell(&[p("a3"), p("a2")]), "TA");
    }

    #[test]
    fn test_multi_word_entry() {
        let level = Level::new("sf", "SF", [("CHUN LI", "b3c2d2c3d3d4")]).unwrap();
        let entry = level.entry("CHUN LI").unwrap();
        assert_eq!(entry.letter_count(), 6);
        assert_eq!(level.letter_at(p("c3")), Some('N'));
        assert_eq!(level.letter_at(p("d3")), Some('L'));
    }

    #[test]
    fn test_shared_cells_agree() {
        let level = Level::new("x", "X", [("PAWN", "a1a2a3b3"), ("QUEEN", "d4c4b4a4b3")]).unwrap();
        assert_eq!(level.letter_at(p("b3")), Some('N'));
        let grid = level.grid();
        assert_eq!(grid[0][0], Some('P'));
        assert_eq!(grid[3][3], Some('Q'));
    }

    #[test]
    fn test_rejects_empty_level() {
        let none: [(&str, &str); 0] = [];
        assert_eq!(Level::new("e", "E", none), Err(LevelError::Empty("e".into())));
    }

    #[test]
    fn test_rejects_bad_paths() {
        assert!(matches!(
            Level::new("l", "L", [("CAT", "a1a2z3")]),
            Err(LevelError::InvalidPath { .. })
        ));
        assert!(matches!(
            Level::new("l", "L", [("CAT", "a1a2a")]),
            Err(LevelError::InvalidPath { .. })
        ));
        assert!(matches!(
            Level::new("l", "L", [("CAT", "a1a2")]),
            Err(LevelError::LengthMismatch { letters: 3, cells: 2, .. })
        ));
        assert!(matches!(
            Level::new("l", "L", [("CAT", "a1a2a4")]),
            Err(LevelError::NotAdjacent { .. })
        ));
        assert!(matches!(
            Level::new("l", "L", [("TOOT", "a1a2b2a1")]),
            Err(LevelError::RevisitedCell { .. })
        ));
        assert!(matches!(
            Level::new("l", "L", [("  ", "")]),
            Err(LevelError::EmptyWord { .. })
        ));
    }

    #[test]
    fn test_rejects_letter_conflict() {
        let err = Level::new("l", "L", [("CAT", "a1a2a3"), ("DOG", "a1b1c1")]).unwrap_err();
        assert_eq!(
            err,
            LevelError::LetterConflict {
                word: "DOG".into(),
                position: p("a1"),
                existing: 'C',
                letter: 'D',
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_path() {
        let err = Level::new("l", "L", [("CAT", "a1a2a3"), ("COT", "a1a2a3")]).unwrap_err();
        assert!(matches!(err, LevelError::DuplicatePath { .. }));

        let err = Level::new("l", "L", [("CAT", "a1a2a3"), ("C AT", "a1a2a3")]).unwrap_err();
        assert_eq!(
            err,
            LevelError::DuplicatePath {
                first: "CAT".into(),
                second: "C AT".into(),
                path: "a1a2a3".into(),
            }
        );
    }

    #[test]
    fn test_rejects_duplicate_word() {
        assert!(matches!(
            Level::new("l", "L", [("CAT", "a1a2a3"), ("CAT", "b1b2b3")]),
            Err(LevelError::DuplicateWord { .. })
        ));
    }
}
