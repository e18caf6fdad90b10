use crate::animations::VictoryScreen;
use crate::storage::{self, BellHaptics, FileStore, MessageNotifier};
use crate::theme::Theme;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use gamesalad_core::{
    BoardGeometry, GameSession, GestureKind, Level, LevelCatalog, Phase, Preferences,
    SessionEvent, ThemeKind,
};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Terminal columns per board cell slot
pub const CELL_WIDTH: u16 = 8;
/// Terminal rows per board cell slot
pub const CELL_HEIGHT: u16 = 4;
/// Width reserved right of the board for the word list
pub const PANEL_WIDTH: u16 = 30;

/// Result of handling an input
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    Playing,
    Paused,
    Victory,
}

/// Options collected from the command line
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub level: Option<String>,
    pub theme: Option<ThemeKind>,
    pub no_haptics: bool,
    pub data_dir: Option<PathBuf>,
}

/// The main application state
pub struct App {
    pub session: GameSession,
    pub catalog: LevelCatalog,
    prefs: Preferences<FileStore>,
    pub theme_kind: ThemeKind,
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    /// Ticks left before the message disappears
    message_timer: u32,
    pub screen_state: ScreenState,
    pub victory_screen: VictoryScreen,
    notifier: MessageNotifier,
    /// Top-left corner of the board on screen
    pub board_origin: (u16, u16),
    clock: Instant,
}

fn board_geometry(x: u16, y: u16) -> BoardGeometry {
    BoardGeometry::new(x as f64, y as f64, CELL_WIDTH as f64, CELL_HEIGHT as f64)
        .with_hitbox_inset(1.0)
}

impl App {
    pub fn new(settings: Settings) -> Result<Self> {
        let data_dir = settings.data_dir.unwrap_or_else(storage::default_data_dir);
        let mut prefs = Preferences::new(FileStore::open(data_dir.join(storage::PREFS_FILE)));

        if settings.no_haptics {
            prefs
                .set_vibration_enabled(false)
                .context("failed to save haptics preference")?;
        }
        let theme_kind = settings.theme.unwrap_or_else(|| prefs.theme());

        let catalog = LevelCatalog::builtin();
        let requested = settings.level.or_else(|| prefs.current_level());
        let level = catalog
            .resolve(requested.as_deref())
            .cloned()
            .context("no playable levels")?;

        let notifier = MessageNotifier::new();
        let mut session = GameSession::new(level, board_geometry(1, 3), prefs.config())
            .context("invalid board geometry")?
            .with_haptics(BellHaptics)
            .with_notifier(notifier.clone());
        session.set_vibration_enabled(prefs.vibration_enabled());
        session.start(0);

        info!(level = session.level().id(), theme = %theme_kind, "starting");
        let mut app = Self {
            session,
            catalog,
            prefs,
            theme_kind,
            theme: Theme::for_kind(theme_kind),
            message: None,
            message_timer: 0,
            screen_state: ScreenState::Playing,
            victory_screen: VictoryScreen::new(),
            notifier,
            board_origin: (1, 3),
            clock: Instant::now(),
        };
        app.persist_level();
        Ok(app)
    }

    /// Milliseconds since the app started
    pub fn now_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    pub fn get_tick_rate(&self) -> Duration {
        match self.screen_state {
            ScreenState::Victory => Duration::from_millis(33),
            ScreenState::Playing | ScreenState::Paused => Duration::from_millis(50),
        }
    }

    /// 1-based number of the current level
    pub fn level_number(&self) -> usize {
        self.catalog.number_of(self.session.level().id()).unwrap_or(1)
    }

    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 60; // ~3 seconds at 50ms ticks
    }

    /// Recenter the board for a new terminal size
    pub fn resize(&mut self, width: u16, height: u16) {
        let board_w = CELL_WIDTH * 4;
        let board_h = CELL_HEIGHT * 4;
        let x = width.saturating_sub(board_w + PANEL_WIDTH + 3) / 2 + 1;
        let y = if height > board_h + 8 { 3 } else { 2 };
        self.board_origin = (x, y);
        if let Err(err) = self.session.relayout(board_geometry(x, y)) {
            warn!(%err, "could not lay out board");
        }
        self.victory_screen.resize(width, height);
    }

    /// Update animations and timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        match self.screen_state {
            ScreenState::Victory => self.victory_screen.update(),
            ScreenState::Playing => {
                let now = self.now_ms();
                let events = self.session.tick(now);
                self.apply_events(events);
            }
            ScreenState::Paused => {}
        }
    }

    fn apply_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::WordFound { word, remaining } => {
                    let msg = match remaining {
                        0 => format!("{word}! That's all of them"),
                        1 => format!("{word}! One word left"),
                        n => format!("{word}! {n} words left"),
                    };
                    self.show_message(&msg);
                }
                SessionEvent::LevelComplete { elapsed_ms } => {
                    debug!(elapsed_ms, "showing victory screen");
                    let letters = self
                        .session
                        .level()
                        .entries()
                        .iter()
                        .flat_map(|e| e.letters())
                        .collect();
                    self.victory_screen.reset(letters);
                    self.screen_state = ScreenState::Victory;
                }
                _ => {}
            }
        }
        for note in self.notifier.drain() {
            self.show_message(&note);
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if self.screen_state != ScreenState::Playing {
            return;
        }
        let kind = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => GestureKind::Start,
            MouseEventKind::Drag(MouseButton::Left) => GestureKind::Move,
            MouseEventKind::Up(MouseButton::Left) => GestureKind::End,
            _ => return,
        };
        // Aim at the middle of the character cell
        let x = mouse.column as f64 + 0.5;
        let y = mouse.row as f64 + 0.5;
        let now = self.now_ms();
        let events = self.session.pointer(kind, x, y, now);
        self.apply_events(events);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Victory => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
                KeyCode::Char('n') | KeyCode::Enter | KeyCode::Char(' ') => self.next_level(),
                KeyCode::Char('r') => self.restart(),
                _ => {}
            },
            ScreenState::Paused => match key.code {
                KeyCode::Char('q') => return AppAction::Quit,
                _ => self.toggle_pause(),
            },
            ScreenState::Playing => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
                KeyCode::Char('n') => self.next_level(),
                KeyCode::Char('r') => self.restart(),
                KeyCode::Char('t') => self.cycle_theme(),
                KeyCode::Char('p') => self.toggle_pause(),
                KeyCode::Char('v') => self.toggle_haptics(),
                _ => {}
            },
        }
        AppAction::Continue
    }

    pub fn next_level(&mut self) {
        let Some(next) = self.catalog.next_after(self.session.level().id()).cloned() else {
            return;
        };
        self.load_level(next);
    }

    pub fn load_level(&mut self, level: Level) {
        let now = self.now_ms();
        let name = level.name().to_string();
        let events = self.session.load_level(level, now);
        self.apply_events(events);
        self.screen_state = ScreenState::Playing;
        self.persist_level();
        self.show_message(&format!("Level {}: {name}", self.level_number()));
    }

    pub fn restart(&mut self) {
        let now = self.now_ms();
        let events = self.session.restart(now);
        self.apply_events(events);
        self.screen_state = ScreenState::Playing;
        self.show_message("Level restarted");
    }

    pub fn cycle_theme(&mut self) {
        self.theme_kind = self.theme_kind.next();
        self.theme = Theme::for_kind(self.theme_kind);
        if let Err(err) = self.prefs.set_theme(self.theme_kind) {
            warn!(%err, "failed to save theme");
        }
        self.show_message(&format!("Theme: {}", self.theme_kind));
    }

    pub fn toggle_pause(&mut self) {
        let now = self.now_ms();
        let events = match self.screen_state {
            ScreenState::Playing => {
                self.screen_state = ScreenState::Paused;
                self.session.pause(now)
            }
            ScreenState::Paused => {
                self.screen_state = ScreenState::Playing;
                self.session.resume(now)
            }
            ScreenState::Victory => return,
        };
        self.apply_events(events);
    }

    pub fn toggle_haptics(&mut self) {
        let enabled = !self.session.vibration_enabled();
        self.session.set_vibration_enabled(enabled);
        if let Err(err) = self.prefs.set_vibration_enabled(enabled) {
            warn!(%err, "failed to save haptics preference");
        }
        self.show_message(if enabled { "Bell on" } else { "Bell off" });
    }

    pub fn is_paused(&self) -> bool {
        self.session.phase() == Phase::Paused
    }

    fn persist_level(&mut self) {
        let id = self.session.level().id().to_string();
        if let Err(err) = self.prefs.set_current_level(&id) {
            warn!(%err, "failed to save current level");
        }
    }
}
