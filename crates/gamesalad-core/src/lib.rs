//! Core engine for a 4x4 word grid game.
//!
//! Players drag across adjacent letter cells to spell hidden words. This crate
//! holds everything that does not depend on a screen:
//!
//! - [`topology`]: cell codes (`a1`..`d4`), adjacency and path encoding
//! - [`layout`]: board geometry and pointer hit-testing
//! - [`selection`]: the drag selection state machine
//! - [`level`], [`catalog`], [`matcher`], [`level_store`]: level data and word matching
//! - [`session`]: the game controller tying them together
//! - [`prefs`], [`config`], [`platform`], [`timer`]: host-facing support
//!
//! # Example
//!
//! ```
//! use gamesalad_core::{BoardGeometry, GameConfig, GameSession, GestureEvent, Level, Position};
//!
//! let level = Level::new("cat", "Cat", [("CAT", "a1a2a3")]).unwrap();
//! let geometry = BoardGeometry::new(0.0, 0.0, 80.0, 80.0);
//! let mut session = GameSession::new(level, geometry, GameConfig::default()).unwrap();
//!
//! let cell = |code: &str| Position::parse(code);
//! session.gesture(GestureEvent::start(cell("a1"), 0));
//! session.gesture(GestureEvent::moved(cell("a2"), 20));
//! session.gesture(GestureEvent::moved(cell("a3"), 40));
//! assert!(session.is_complete());
//! ```

pub mod catalog;
pub mod config;
pub mod layout;
pub mod level;
pub mod level_store;
pub mod matcher;
pub mod platform;
pub mod prefs;
pub mod selection;
pub mod session;
pub mod timer;
pub mod topology;

pub use catalog::{LevelCatalog, LevelDefinition, LEVEL_DEFINITIONS};
pub use config::{AnimationConfig, GameConfig, TouchConfig};
pub use layout::{BoardGeometry, BoardLayout, LayoutError};
pub use level::{Level, LevelError, WordEntry};
pub use level_store::LevelStore;
pub use matcher::{find_match, used_positions, unused_positions, FoundWords};
pub use platform::{HapticPattern, Haptics, NoopHaptics, NoopNotifier, NotificationSender};
pub use prefs::{KeyValueStore, MemoryStore, Preferences, StoreError, ThemeKind};
pub use selection::{
    transition, CellMarks, GestureEvent, GestureKind, IgnoreReason, Outcome, SelectionEngine,
    SelectionEvent, SelectionInput, SelectionObserver, SelectionPhase, SelectionState,
    SelectionTiming, Transition,
};
pub use session::{CellStatus, GameSession, Phase, SessionEvent};
pub use timer::{format_time, GameTimer, TimerState};
pub use topology::{Position, CELL_COUNT, GRID_SIZE};
