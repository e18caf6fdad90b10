//! Game state management for the browser UI
//!
//! [`GameView`] owns the session and preferences and translates browser
//! input into session calls. It never touches `web_sys` so it runs under
//! plain `cargo test`.

use crate::animations::VictoryScreen;
use gamesalad_core::{
    BoardGeometry, GameSession, GestureKind, Haptics, KeyValueStore, Level, LevelCatalog,
    NotificationSender, Phase, Preferences, SessionEvent, ThemeKind,
};
use serde::Serialize;
use tracing::warn;

/// Screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenState {
    Playing,
    Paused,
    Victory,
}

/// One entry of the word list as the page shows it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordSnapshot {
    /// The word when found, otherwise underscores of the same shape
    pub text: String,
    pub found: bool,
}

/// Read-only view of the game handed to JavaScript
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub level_id: String,
    pub level_name: String,
    pub level_number: usize,
    pub level_count: usize,
    pub screen: ScreenState,
    pub path: Vec<String>,
    pub current_word: String,
    pub words: Vec<WordSnapshot>,
    pub found_count: usize,
    pub elapsed: String,
    pub theme: ThemeKind,
    pub vibration: bool,
    pub message: Option<String>,
}

/// Hide a word's letters, keeping its shape
pub fn masked(word: &str) -> String {
    word.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { '_' })
        .collect()
}

pub struct GameView<S> {
    session: GameSession,
    catalog: LevelCatalog,
    prefs: Preferences<S>,
    theme_kind: ThemeKind,
    screen: ScreenState,
    message: Option<String>,
    /// Frames left before the message disappears
    message_timer: u32,
    victory: Option<VictoryScreen>,
    last_now: u64,
}

impl<S: KeyValueStore> GameView<S> {
    /// Open the saved level (or the first one) with the saved preferences
    pub fn new(prefs: Preferences<S>, geometry: BoardGeometry, now_ms: u64) -> Result<Self, String> {
        let catalog = LevelCatalog::builtin();
        let level = catalog
            .resolve(prefs.current_level().as_deref())
            .cloned()
            .ok_or("no playable levels")?;

        let mut session =
            GameSession::new(level, geometry, prefs.config()).map_err(|e| e.to_string())?;
        session.set_vibration_enabled(prefs.vibration_enabled());
        session.start(now_ms);

        let theme_kind = prefs.theme();
        let mut view = Self {
            session,
            catalog,
            prefs,
            theme_kind,
            screen: ScreenState::Playing,
            message: None,
            message_timer: 0,
            victory: None,
            last_now: now_ms,
        };
        view.persist_level();
        Ok(view)
    }

    pub fn with_haptics(mut self, haptics: impl Haptics + 'static) -> Self {
        self.session = self.session.with_haptics(haptics);
        self
    }

    pub fn with_notifier(mut self, notifier: impl NotificationSender + 'static) -> Self {
        self.session = self.session.with_notifier(notifier);
        self
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn prefs(&self) -> &Preferences<S> {
        &self.prefs
    }

    pub fn screen(&self) -> ScreenState {
        self.screen
    }

    pub fn theme_kind(&self) -> ThemeKind {
        self.theme_kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn victory(&self) -> Option<&VictoryScreen> {
        self.victory.as_ref()
    }

    pub fn level_number(&self) -> usize {
        self.catalog.number_of(self.session.level().id()).unwrap_or(1)
    }

    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 150; // ~2.5 seconds at 60fps
    }

    pub fn relayout(&mut self, geometry: BoardGeometry) -> Result<(), String> {
        self.session.relayout(geometry).map_err(|e| e.to_string())
    }

    /// Feed a pointer gesture in canvas coordinates
    pub fn pointer(&mut self, kind: GestureKind, x: f64, y: f64, now_ms: u64) {
        self.last_now = now_ms;
        if self.screen != ScreenState::Playing {
            return;
        }
        let events = self.session.pointer(kind, x, y, now_ms);
        self.apply_events(events, now_ms);
    }

    /// Advance one animation frame
    pub fn tick(&mut self, now_ms: u64, width: f32, height: f32) {
        self.last_now = now_ms;
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        let events = self.session.tick(now_ms);
        self.apply_events(events, now_ms);

        if let Some(victory) = self.victory.as_mut() {
            victory.update(width, height);
        }
    }

    fn apply_events(&mut self, events: Vec<SessionEvent>, now_ms: u64) {
        for event in events {
            match event {
                SessionEvent::WordFound { word, remaining } => {
                    let msg = match remaining {
                        0 => format!("{word}!"),
                        1 => format!("{word}! One word left"),
                        n => format!("{word}! {n} words left"),
                    };
                    self.show_message(&msg);
                }
                SessionEvent::LevelComplete { .. } => {
                    let letters = self
                        .session
                        .level()
                        .entries()
                        .iter()
                        .flat_map(|e| e.letters())
                        .collect();
                    self.victory = Some(VictoryScreen::new(now_ms, letters));
                    self.screen = ScreenState::Victory;
                }
                _ => {}
            }
        }
    }

    /// Accepts `dark`, `light`, `high-contrast` or `high_contrast`
    pub fn set_theme(&mut self, name: &str) -> bool {
        let Ok(kind) = name.replace('_', "-").parse::<ThemeKind>() else {
            return false;
        };
        self.theme_kind = kind;
        if let Err(err) = self.prefs.set_theme(kind) {
            warn!(%err, "failed to save theme");
        }
        true
    }

    pub fn cycle_theme(&mut self) {
        let next = self.theme_kind.next();
        self.set_theme(next.name());
    }

    pub fn set_vibration(&mut self, enabled: bool) {
        self.session.set_vibration_enabled(enabled);
        if let Err(err) = self.prefs.set_vibration_enabled(enabled) {
            warn!(%err, "failed to save vibration setting");
        }
    }

    /// Switch to the level with `id`; `false` if there is none
    pub fn load_level(&mut self, id: &str, now_ms: u64) -> bool {
        let Some(level) = self.catalog.get(id).cloned() else {
            return false;
        };
        self.start_level(level, now_ms);
        true
    }

    pub fn next_level(&mut self, now_ms: u64) {
        if let Some(level) = self.catalog.next_after(self.session.level().id()).cloned() {
            self.start_level(level, now_ms);
        }
    }

    fn start_level(&mut self, level: Level, now_ms: u64) {
        let name = level.name().to_string();
        self.session.load_level(level, now_ms);
        self.victory = None;
        self.screen = ScreenState::Playing;
        self.persist_level();
        self.show_message(&format!("Level {}: {name}", self.level_number()));
    }

    pub fn restart(&mut self, now_ms: u64) {
        self.session.restart(now_ms);
        self.victory = None;
        self.screen = ScreenState::Playing;
        self.show_message("Level restarted");
    }

    pub fn toggle_pause(&mut self, now_ms: u64) {
        match self.screen {
            ScreenState::Playing => {
                self.session.pause(now_ms);
                self.screen = ScreenState::Paused;
            }
            ScreenState::Paused => {
                self.session.resume(now_ms);
                self.screen = ScreenState::Playing;
            }
            ScreenState::Victory => {}
        }
    }

    pub fn is_paused(&self) -> bool {
        self.session.phase() == Phase::Paused
    }

    /// Handle a key press by its DOM `key` value
    pub fn handle_key(&mut self, key: &str, now_ms: u64) {
        match (self.screen, key) {
            (ScreenState::Victory, "n" | "Enter" | " ") => self.next_level(now_ms),
            (ScreenState::Paused, _) => self.toggle_pause(now_ms),
            (_, "n") => self.next_level(now_ms),
            (_, "r") => self.restart(now_ms),
            (_, "t") => self.cycle_theme(),
            (_, "p" | "Escape") => self.toggle_pause(now_ms),
            _ => {}
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let session = &self.session;
        let store = session.store();
        let words = session
            .level()
            .entries()
            .iter()
            .map(|entry| {
                let found = store.is_found(entry.word());
                WordSnapshot {
                    text: if found {
                        entry.word().to_string()
                    } else {
                        masked(entry.word())
                    },
                    found,
                }
            })
            .collect();

        GameSnapshot {
            level_id: session.level().id().to_string(),
            level_name: session.level().name().to_string(),
            level_number: self.level_number(),
            level_count: self.level_count(),
            screen: self.screen,
            path: session.path().iter().map(|p| p.to_string()).collect(),
            current_word: session.current_word(),
            words,
            found_count: store.found().len(),
            elapsed: session.time_string(self.last_now),
            theme: self.theme_kind,
            vibration: session.vibration_enabled(),
            message: self.message.clone(),
        }
    }

    fn persist_level(&mut self) {
        let id = self.session.level().id().to_string();
        if let Err(err) = self.prefs.set_current_level(&id) {
            warn!(%err, "failed to save current level");
        }
    }
}
