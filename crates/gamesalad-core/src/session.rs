//! Host-independent game controller.
//!
//! [`GameSession`] connects the selection engine to the level: every path
//! change is checked against the remaining words, a match locks the board
//! while the word animates, and `tick` finishes the animation by retiring
//! cells no remaining word needs.

use crate::config::GameConfig;
use crate::layout::{BoardGeometry, BoardLayout, LayoutError};
use crate::level::Level;
use crate::level_store::LevelStore;
use crate::platform::{HapticPattern, Haptics, NoopHaptics, NoopNotifier, NotificationSender};
use crate::selection::{GestureEvent, GestureKind, SelectionEngine, SelectionEvent};
use crate::timer::{format_time, GameTimer};
use crate::topology::Position;
use std::collections::BTreeSet;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Accepting gestures
    Playing,
    /// A found word is animating; the board is locked
    Animating,
    /// A modal is open; gestures are dropped
    Paused,
    /// Every word was found
    Victory,
}

/// How a cell should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Normal,
    Selected,
    /// Part of the word that was just found
    Found,
    /// Leaving the board once the current animation ends
    Retiring,
    /// No longer used by any remaining word
    Retired,
}

/// Notifications returned to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SelectionChanged(Vec<Position>),
    SelectionCleared,
    WordFound { word: String, remaining: usize },
    CellsRetired(Vec<Position>),
    LevelComplete { elapsed_ms: u64 },
    LevelLoaded { id: String, name: String },
    Paused,
    Resumed,
}

#[derive(Debug, Clone)]
struct FoundAnimation {
    word: String,
    deadline_ms: u64,
    completes_level: bool,
    /// The path could not be cleared while its cells were animating
    clear_pending: bool,
}

pub struct GameSession {
    engine: SelectionEngine,
    store: LevelStore,
    timer: GameTimer,
    config: GameConfig,
    phase: Phase,
    animation: Option<FoundAnimation>,
    retired: BTreeSet<Position>,
    paused_at: Option<u64>,
    paused_from: Phase,
    haptics: Box<dyn Haptics>,
    notifier: Box<dyn NotificationSender>,
    vibration_enabled: bool,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("level", &self.store.level().id())
            .field("phase", &self.phase)
            .field("path", &self.engine.path())
            .field("found", self.store.found())
            .field("retired", &self.retired)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    pub fn new(level: Level, geometry: BoardGeometry, config: GameConfig) -> Result<Self, LayoutError> {
        let engine = SelectionEngine::new(geometry, config.timing())?;
        let store = LevelStore::new(level);
        let retired = store.unused_positions();
        Ok(Self {
            engine,
            store,
            timer: GameTimer::new(),
            config,
            phase: Phase::Playing,
            animation: None,
            retired,
            paused_at: None,
            paused_from: Phase::Playing,
            haptics: Box::new(NoopHaptics),
            notifier: Box::new(NoopNotifier),
            vibration_enabled: true,
        })
    }

    pub fn with_haptics(mut self, haptics: impl Haptics + 'static) -> Self {
        self.haptics = Box::new(haptics);
        self
    }

    pub fn with_notifier(mut self, notifier: impl NotificationSender + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    pub fn set_vibration_enabled(&mut self, enabled: bool) {
        self.vibration_enabled = enabled;
    }

    pub fn vibration_enabled(&self) -> bool {
        self.vibration_enabled
    }

    pub fn level(&self) -> &Level {
        self.store.level()
    }

    pub fn store(&self) -> &LevelStore {
        &self.store
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    pub fn path(&self) -> &[Position] {
        self.engine.path()
    }

    /// Letters of the current selection
    pub fn current_word(&self) -> String {
        self.store.level().spell(self.engine.path())
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
        self.engine.set_timing(config.timing());
    }

    pub fn layout(&self) -> &BoardLayout {
        self.engine.layout()
    }

    pub fn relayout(&mut self, geometry: BoardGeometry) -> Result<(), LayoutError> {
        self.engine.relayout(geometry)
    }

    pub fn is_complete(&self) -> bool {
        self.store.is_complete()
    }

    pub fn retired(&self) -> &BTreeSet<Position> {
        &self.retired
    }

    pub fn elapsed_ms(&self, now_ms: u64) -> u64 {
        self.timer.elapsed_ms(now_ms)
    }

    pub fn time_string(&self, now_ms: u64) -> String {
        self.timer.time_string(now_ms)
    }

    /// Word that is currently animating, if any
    pub fn animating_word(&self) -> Option<&str> {
        self.animation.as_ref().map(|a| a.word.as_str())
    }

    pub fn cell_status(&self, pos: Position) -> CellStatus {
        let marks = self.engine.marks();
        if self.retired.contains(&pos) {
            CellStatus::Retired
        } else if marks.is_pending_unused(pos) {
            CellStatus::Retiring
        } else if marks.is_found_temp(pos) {
            CellStatus::Found
        } else if self.engine.path().contains(&pos) {
            CellStatus::Selected
        } else {
            CellStatus::Normal
        }
    }

    /// Start the play timer
    pub fn start(&mut self, now_ms: u64) {
        if self.phase == Phase::Playing {
            self.timer.start(now_ms);
        }
    }

    /// Feed a gesture already resolved to a cell
    pub fn gesture(&mut self, mut event: GestureEvent) -> Vec<SessionEvent> {
        if matches!(self.phase, Phase::Paused | Phase::Victory) {
            return Vec::new();
        }
        if event.position.is_some_and(|p| self.retired.contains(&p)) {
            event.position = None;
        }
        if self.phase == Phase::Playing && event.kind == GestureKind::Start {
            self.timer.start(event.timestamp_ms);
        }
        let selection = self.engine.handle(event);
        self.after_selection(selection, event.timestamp_ms)
    }

    /// Hit-test a raw pointer position and feed the gesture
    pub fn pointer(&mut self, kind: GestureKind, x: f64, y: f64, timestamp_ms: u64) -> Vec<SessionEvent> {
        let position = match kind {
            GestureKind::End => None,
            _ => self.engine.layout().hit_test(x, y),
        };
        self.gesture(GestureEvent {
            kind,
            position,
            timestamp_ms,
        })
    }

    fn after_selection(&mut self, selection: Vec<SelectionEvent>, now_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        for event in selection {
            match event {
                SelectionEvent::Reset => events.push(SessionEvent::SelectionCleared),
                SelectionEvent::Changed(path) => {
                    let found = match self.phase {
                        Phase::Playing => self.store.find_match(&path).map(str::to_string),
                        _ => None,
                    };
                    events.push(SessionEvent::SelectionChanged(path.clone()));
                    if let Some(word) = found {
                        events.extend(self.word_found(word, &path, now_ms));
                    }
                }
            }
        }
        events
    }

    fn word_found(&mut self, word: String, path: &[Position], now_ms: u64) -> Vec<SessionEvent> {
        let before = self.store.unused_positions();
        if !self.store.mark_found(&word) {
            return Vec::new();
        }
        let newly_unused: Vec<Position> = self
            .store
            .unused_positions()
            .difference(&before)
            .copied()
            .collect();
        let remaining = self.store.remaining_count();
        info!(word = %word, remaining, "word found");

        let marks = self.engine.marks_mut();
        marks.mark_found_temp(path.iter().copied());
        marks.mark_pending_unused(newly_unused);
        self.engine.lock();

        let mut events = vec![SessionEvent::WordFound {
            word: word.clone(),
            remaining,
        }];
        // The path stays put when one of its cells is leaving the board
        let clear_pending = !self.engine.clear();
        if !clear_pending {
            events.push(SessionEvent::SelectionCleared);
        }

        let completes_level = self.store.is_complete();
        let anim = &self.config.animation;
        let mut deadline_ms = now_ms.saturating_add(anim.found_word_total_ms(path.len()));
        if completes_level {
            self.timer.stop(now_ms);
            deadline_ms = deadline_ms.saturating_add(anim.victory_delay_ms);
        }

        if self.vibration_enabled {
            self.haptics.vibrate(HapticPattern::Light);
        }

        self.animation = Some(FoundAnimation {
            word,
            deadline_ms,
            completes_level,
            clear_pending,
        });
        self.phase = Phase::Animating;
        events
    }

    /// Advance time-based state; call once per frame
    pub fn tick(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        if self.phase != Phase::Animating {
            return Vec::new();
        }
        let due = self
            .animation
            .as_ref()
            .map_or(true, |anim| now_ms >= anim.deadline_ms);
        if due {
            self.finish_animation(now_ms)
        } else {
            Vec::new()
        }
    }

    fn finish_animation(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        let Some(anim) = self.animation.take() else {
            self.phase = Phase::Playing;
            return Vec::new();
        };
        let mut events = Vec::new();

        let unused = self.store.unused_positions();
        let newly_retired: Vec<Position> = unused.difference(&self.retired).copied().collect();
        self.retired = unused;

        self.engine.marks_mut().clear_all();
        self.engine.unlock();
        if anim.clear_pending && self.engine.clear() {
            events.push(SessionEvent::SelectionCleared);
        }
        if !newly_retired.is_empty() {
            debug!(cells = newly_retired.len(), "cells retired");
            events.push(SessionEvent::CellsRetired(newly_retired));
        }

        if anim.completes_level {
            let elapsed_ms = self.timer.elapsed_ms(now_ms);
            let level = self.store.level();
            info!(level = level.id(), elapsed_ms, "level complete");
            if self.vibration_enabled {
                self.haptics.vibrate(HapticPattern::Success);
            }
            let body = format!("{} solved in {}", level.name(), format_time(elapsed_ms));
            self.notifier.notify("Level complete!", &body);
            self.phase = Phase::Victory;
            events.push(SessionEvent::LevelComplete { elapsed_ms });
        } else {
            self.phase = Phase::Playing;
        }
        events
    }

    /// Open a modal: drop the selection and stop the clock
    pub fn pause(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        if !matches!(self.phase, Phase::Playing | Phase::Animating) {
            return Vec::new();
        }
        let mut events = Vec::new();
        if !self.engine.path().is_empty() && self.engine.clear() {
            events.push(SessionEvent::SelectionCleared);
        }
        self.timer.pause(now_ms);
        self.paused_from = self.phase;
        self.paused_at = Some(now_ms);
        self.phase = Phase::Paused;
        events.push(SessionEvent::Paused);
        events
    }

    pub fn resume(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        if self.phase != Phase::Paused {
            return Vec::new();
        }
        let paused_for = self
            .paused_at
            .take()
            .map_or(0, |at| now_ms.saturating_sub(at));
        if let Some(anim) = self.animation.as_mut() {
            anim.deadline_ms = anim.deadline_ms.saturating_add(paused_for);
        }
        self.timer.resume(now_ms);
        self.phase = self.paused_from;
        vec![SessionEvent::Resumed]
    }

    /// Replay the current level from scratch
    pub fn restart(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        self.store.restart();
        self.reset_board(now_ms);
        self.loaded_events()
    }

    pub fn load_level(&mut self, level: Level, now_ms: u64) -> Vec<SessionEvent> {
        self.store.load(level);
        self.reset_board(now_ms);
        self.loaded_events()
    }

    fn reset_board(&mut self, now_ms: u64) {
        self.animation = None;
        self.paused_at = None;
        self.retired = self.store.unused_positions();
        self.engine.marks_mut().clear_all();
        if self.engine.is_locked() {
            self.engine.unlock();
        }
        self.engine.clear();
        self.timer.reset();
        self.timer.start(now_ms);
        self.phase = Phase::Playing;
    }

    fn loaded_events(&self) -> Vec<SessionEvent> {
        let level = self.store.level();
        vec![
            SessionEvent::SelectionCleared,
            SessionEvent::LevelLoaded {
                id: level.id().to_string(),
                name: level.name().to_string(),
            },
        ]
    }
}
