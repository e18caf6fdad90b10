//! WebAssembly build of GameSalad drawn on a canvas
//!
//! The page forwards pointer and keyboard events to [`GameSaladGame`] and
//! calls [`GameSaladGame::tick`] from `requestAnimationFrame`.

use gamesalad_core::{BoardGeometry, GestureKind, Preferences};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, KeyboardEvent};

mod animations;
mod game;
mod render;
mod storage;
mod theme;

#[cfg(test)]
mod tests;

pub use game::{GameSnapshot, GameView, ScreenState};
pub use storage::{BrowserStore, ConsoleNotifier, LocalStorage, VibrateHaptics};
pub use theme::Theme;

/// Left and top margin around the board
const BOARD_MARGIN: f64 = 40.0;
/// Pixels inside each cell edge that do not register a hit
const HITBOX_INSET: f64 = 12.0;

// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Milliseconds from `performance.now()`
fn now_ms() -> u64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() as u64)
        .unwrap_or(0)
}

fn device_pixel_ratio() -> f64 {
    web_sys::window()
        .map(|w| w.device_pixel_ratio())
        .unwrap_or(1.0)
}

/// Board geometry and font size for a canvas of the given logical size
fn board_geometry(width: u32, height: u32) -> (BoardGeometry, f64) {
    let max_board_height = (height as f64 - 2.0 * BOARD_MARGIN - 60.0).max(240.0);
    let max_board_width = (width as f64 * 0.55).max(240.0);
    let cell = (max_board_height.min(max_board_width) / 4.0).clamp(60.0, 120.0);
    let font_size = (cell * 0.25).clamp(14.0, 26.0);

    let geometry = BoardGeometry::new(BOARD_MARGIN, BOARD_MARGIN, cell, cell)
        .with_hitbox_inset(HITBOX_INSET);
    (geometry, font_size)
}

/// The main WASM game controller
#[wasm_bindgen]
pub struct GameSaladGame {
    view: GameView<BrowserStore>,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    theme: Theme,
    font_size: f64,
    width: u32,
    height: u32,
    dpr: f64, // Device pixel ratio for crisp rendering
}

#[wasm_bindgen]
impl GameSaladGame {
    /// Create a new game attached to a canvas element
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<GameSaladGame, JsValue> {
        let document = web_sys::window()
            .ok_or("No window")?
            .document()
            .ok_or("No document")?;

        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("Canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let ctx = canvas
            .get_context("2d")?
            .ok_or("Failed to get 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let width = 900;
        let height = 600;
        let (geometry, font_size) = board_geometry(width, height);

        let prefs = Preferences::new(BrowserStore::open());
        let view = GameView::new(prefs, geometry, now_ms())
            .map_err(|e| JsValue::from_str(&e))?
            .with_haptics(VibrateHaptics)
            .with_notifier(ConsoleNotifier);
        let theme = Theme::for_kind(view.theme_kind());

        let mut game = GameSaladGame {
            view,
            canvas,
            ctx,
            theme,
            font_size,
            width,
            height,
            dpr: device_pixel_ratio(),
        };
        game.apply_canvas_size();
        game.render();
        Ok(game)
    }

    /// Pointer pressed at canvas-relative logical coordinates
    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.view.pointer(GestureKind::Start, x, y, now_ms());
        self.render();
    }

    #[wasm_bindgen]
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.view.pointer(GestureKind::Move, x, y, now_ms());
        self.render();
    }

    #[wasm_bindgen]
    pub fn pointer_up(&mut self, x: f64, y: f64) {
        self.view.pointer(GestureKind::End, x, y, now_ms());
        self.render();
    }

    /// Handle keyboard input
    #[wasm_bindgen]
    pub fn handle_key(&mut self, event: &KeyboardEvent) {
        self.view.handle_key(&event.key(), now_ms());
        self.theme = Theme::for_kind(self.view.theme_kind());
        self.render();
    }

    /// Update game state (call from requestAnimationFrame)
    #[wasm_bindgen]
    pub fn tick(&mut self) {
        self.view
            .tick(now_ms(), self.width as f32, self.height as f32);
        self.render();
    }

    /// Set the color theme: `dark`, `light` or `high_contrast`
    #[wasm_bindgen]
    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        if !self.view.set_theme(theme_name) {
            return false;
        }
        self.theme = Theme::for_kind(self.view.theme_kind());
        self.render();
        true
    }

    #[wasm_bindgen]
    pub fn set_vibration(&mut self, enabled: bool) {
        self.view.set_vibration(enabled);
    }

    /// Jump to a level by id; `false` if there is no such level
    #[wasm_bindgen]
    pub fn load_level(&mut self, id: &str) -> bool {
        let loaded = self.view.load_level(id, now_ms());
        self.render();
        loaded
    }

    #[wasm_bindgen]
    pub fn next_level(&mut self) {
        self.view.next_level(now_ms());
        self.render();
    }

    #[wasm_bindgen]
    pub fn restart(&mut self) {
        self.view.restart(now_ms());
        self.render();
    }

    /// Toggle pause
    #[wasm_bindgen]
    pub fn toggle_pause(&mut self) {
        self.view.toggle_pause(now_ms());
        self.render();
    }

    /// Check if paused
    #[wasm_bindgen]
    pub fn is_paused(&self) -> bool {
        self.view.is_paused()
    }

    /// Check if every word of the level is found
    #[wasm_bindgen]
    pub fn is_complete(&self) -> bool {
        self.view.session().is_complete()
    }

    /// Get formatted elapsed time
    #[wasm_bindgen]
    pub fn elapsed_string(&self) -> String {
        self.view.session().time_string(now_ms())
    }

    #[wasm_bindgen]
    pub fn level_id(&self) -> String {
        self.view.session().level().id().to_string()
    }

    /// Letters spelled by the current drag
    #[wasm_bindgen]
    pub fn current_word(&self) -> String {
        self.view.session().current_word()
    }

    /// Snapshot of the game as a plain JS object
    #[wasm_bindgen]
    pub fn state(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.view.snapshot()).map_err(JsValue::from)
    }

    /// Snapshot of the game as JSON
    #[wasm_bindgen]
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(&self.view.snapshot()).unwrap_or_default()
    }

    /// Resize the game canvas
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) {
        // Minimum sizes
        self.width = width.max(520);
        self.height = height.max(420);

        // Update dpr in case it changed (e.g., moving to different monitor)
        self.dpr = device_pixel_ratio();
        self.apply_canvas_size();

        let (geometry, font_size) = board_geometry(self.width, self.height);
        self.font_size = font_size;
        if let Err(err) = self.view.relayout(geometry) {
            web_sys::console::warn_1(&err.into());
        }

        self.render();
    }

    /// Get current width
    #[wasm_bindgen]
    pub fn get_width(&self) -> u32 {
        self.width
    }

    /// Get current height
    #[wasm_bindgen]
    pub fn get_height(&self) -> u32 {
        self.height
    }

    fn apply_canvas_size(&mut self) {
        // Actual canvas resolution is scaled by dpr for crisp rendering
        self.canvas.set_width((self.width as f64 * self.dpr) as u32);
        self.canvas.set_height((self.height as f64 * self.dpr) as u32);

        // CSS display size stays in logical pixels
        let html_element: &HtmlElement = self.canvas.as_ref();
        let style = html_element.style();
        let _ = style.set_property("width", &format!("{}px", self.width));
        let _ = style.set_property("height", &format!("{}px", self.height));

        let _ = self.ctx.reset_transform();
        let _ = self.ctx.scale(self.dpr, self.dpr);
    }

    fn render(&self) {
        render::render_game(
            &self.ctx,
            &self.view,
            &self.theme,
            self.width,
            self.height,
            self.font_size,
        );
    }
}
