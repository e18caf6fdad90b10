//! Built-in levels.
//!
//! Rules for authoring a level:
//! 1. The board is 4x4, rows `a`..`d`, columns `1`..`4`
//! 2. Every cell should be used by at least one word
//! 3. Cells may be shared between words if they agree on the letter
//! 4. Consecutive letters of a word sit on adjacent cells (diagonals count)

use crate::level::Level;
use tracing::warn;

/// Static description of a level before validation
#[derive(Debug, Clone, Copy)]
pub struct LevelDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub words: &'static [(&'static str, &'static str)],
}

pub const LEVEL_DEFINITIONS: &[LevelDefinition] = &[
    LevelDefinition {
        id: "videogames",
        name: "Video Game Heroes",
        words: &[
            ("SONIC", "a1b1c1d1c2"),
            ("LARA CROFT", "a3b3c4d3c2d2c3b2a2"),
            ("MARIO", "d4d3c4b4a4"),
        ],
    },
    LevelDefinition {
        id: "chess",
        name: "Chess Pieces",
        words: &[
            ("PAWN", "a1a2a3b3"),
            ("QUEEN", "d4c4b4a4b3"),
            ("KING", "c3c2b3b2"),
            ("KNIGHT", "c3b3c2b2c1d1"),
            ("BISHOP", "d3c2d2c1b1a1"),
        ],
    },
    LevelDefinition {
        id: "planets",
        name: "Solar System",
        words: &[
            ("MARS", "c4b3c3b4"),
            ("MERCURY", "c4d4c3d2c2d1c1"),
            ("NEPTUNE", "a3a2b1b2c2d3d4"),
            ("SATURN", "b4b3b2c2c3d3"),
            ("URANUS", "c2c3b3a3a4b4"),
            ("VENUS", "a1a2a3a4b4"),
        ],
    },
    LevelDefinition {
        id: "street_fighters",
        name: "Street Fighters",
        words: &[
            ("KEN", "a1b2c3"),
            ("ADON", "a4b4c4c3"),
            ("RYU", "c1d1d2"),
            ("CHUN LI", "b3c2d2c3d3d4"),
            ("AKUMA", "b1a1a2a3a4"),
        ],
    },
];

impl LevelDefinition {
    pub fn build(&self) -> Result<Level, crate::level::LevelError> {
        Level::new(self.id, self.name, self.words.iter().copied())
    }
}

/// Ordered collection of playable levels
#[derive(Debug, Clone, Default)]
pub struct LevelCatalog {
    levels: Vec<Level>,
}

impl LevelCatalog {
    pub fn new(levels: Vec<Level>) -> Self {
        Self { levels }
    }

    /// The levels shipped with the game. Invalid definitions are skipped.
    pub fn builtin() -> Self {
        let levels = LEVEL_DEFINITIONS
            .iter()
            .filter_map(|def| match def.build() {
                Ok(level) => Some(level),
                Err(err) => {
                    warn!(level = def.id, %err, "skipping invalid built-in level");
                    None
                }
            })
            .collect();
        Self { levels }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }

    pub fn first(&self) -> Option<&Level> {
        self.levels.first()
    }

    pub fn get(&self, id: &str) -> Option<&Level> {
        self.levels.iter().find(|l| l.id() == id)
    }

    /// 1-based position of a level, as shown to the player (`#2`)
    pub fn number_of(&self, id: &str) -> Option<usize> {
        self.levels.iter().position(|l| l.id() == id).map(|i| i + 1)
    }

    /// Level after `id`, wrapping around to the first
    pub fn next_after(&self, id: &str) -> Option<&Level> {
        let index = self.levels.iter().position(|l| l.id() == id)?;
        self.levels.get((index + 1) % self.levels.len())
    }

    /// Saved level if it still exists, else the first one
    pub fn resolve(&self, saved: Option<&str>) -> Option<&Level> {
        saved.and_then(|id| self.get(id)).or_else(|| self.first())
    }
}
