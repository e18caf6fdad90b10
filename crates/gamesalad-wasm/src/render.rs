//! Canvas rendering for the word grid

use crate::game::{GameView, ScreenState};
use crate::theme::Theme;
use gamesalad_core::{CellStatus, KeyValueStore, Position};
use web_sys::CanvasRenderingContext2d;

const FONT: &str = "'JetBrains Mono', 'Fira Code', 'Consolas', monospace";

/// Gap left between neighbouring cell boxes
const CELL_GAP: f64 = 6.0;

fn font(size: f64) -> String {
    format!("{size}px {FONT}")
}

fn bold_font(size: f64) -> String {
    format!("bold {size}px {FONT}")
}

/// Render the complete game to canvas
pub fn render_game<S: KeyValueStore>(
    ctx: &CanvasRenderingContext2d,
    view: &GameView<S>,
    theme: &Theme,
    width: u32,
    height: u32,
    font_size: f64,
) {
    ctx.set_fill_style_str(&theme.background.as_css());
    ctx.fill_rect(0.0, 0.0, width as f64, height as f64);

    let layout = view.session().layout();
    let geometry = layout.geometry();

    render_board(ctx, view, theme, font_size);
    render_trail(ctx, view, theme);
    render_info_panel(
        ctx,
        view,
        theme,
        geometry.origin_x + layout.width() + 40.0,
        geometry.origin_y,
        font_size,
    );
    render_selection(
        ctx,
        view,
        theme,
        geometry.origin_x,
        geometry.origin_y + layout.height() + font_size,
        font_size,
    );

    match view.screen() {
        ScreenState::Playing => {}
        ScreenState::Paused => render_pause_overlay(ctx, theme, width, height, font_size),
        ScreenState::Victory => render_victory_screen(ctx, view, theme, width, height, font_size),
    }

    if let Some(msg) = view.message() {
        render_message(ctx, theme, msg, width, height, font_size);
    }
}

fn render_board<S: KeyValueStore>(
    ctx: &CanvasRenderingContext2d,
    view: &GameView<S>,
    theme: &Theme,
    font_size: f64,
) {
    let session = view.session();
    let layout = session.layout();
    let geometry = layout.geometry();
    let box_w = geometry.cell_width - CELL_GAP;
    let box_h = geometry.cell_height - CELL_GAP;

    ctx.set_font(&bold_font(font_size * 1.4));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_line_width(2.0);

    for pos in Position::all() {
        let (fill, border, text) = match session.cell_status(pos) {
            CellStatus::Retired => continue,
            CellStatus::Normal => (
                theme.cell_bg.as_css(),
                theme.cell_border.as_css(),
                theme.letter.as_css(),
            ),
            CellStatus::Selected => (
                theme.selected_bg.as_css(),
                theme.trail.as_css(),
                theme.letter.as_css(),
            ),
            CellStatus::Found => (
                theme.found_bg.as_css(),
                theme.found_text.as_css(),
                theme.found_text.as_css(),
            ),
            CellStatus::Retiring => (
                theme.found_bg.as_css_alpha(0.35),
                theme.cell_border.as_css_alpha(0.35),
                theme.letter.as_css_alpha(0.35),
            ),
        };

        let (x, y) = layout.cell_origin(pos);
        let x = x + CELL_GAP / 2.0;
        let y = y + CELL_GAP / 2.0;

        ctx.set_fill_style_str(&fill);
        ctx.fill_rect(x, y, box_w, box_h);
        ctx.set_stroke_style_str(&border);
        ctx.stroke_rect(x, y, box_w, box_h);

        if let Some(letter) = session.level().letter_at(pos) {
            ctx.set_fill_style_str(&text);
            let _ = ctx.fill_text(
                &letter.to_ascii_uppercase().to_string(),
                x + box_w / 2.0,
                y + box_h / 2.0,
            );
        }
    }
}

/// Line joining the centers of the selected cells
fn render_trail<S: KeyValueStore>(ctx: &CanvasRenderingContext2d, view: &GameView<S>, theme: &Theme) {
    let session = view.session();
    let path = session.path();
    if path.len() < 2 {
        return;
    }
    let layout = session.layout();

    ctx.set_stroke_style_str(&theme.trail.as_css_alpha(0.7));
    ctx.set_line_width(6.0);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    ctx.begin_path();
    for (i, pos) in path.iter().enumerate() {
        let (cx, cy) = layout.cell_center(*pos);
        if i == 0 {
            ctx.move_to(cx, cy);
        } else {
            ctx.line_to(cx, cy);
        }
    }
    ctx.stroke();
}

fn render_info_panel<S: KeyValueStore>(
    ctx: &CanvasRenderingContext2d,
    view: &GameView<S>,
    theme: &Theme,
    x: f64,
    y: f64,
    font_size: f64,
) {
    let snapshot = view.snapshot();
    let line = font_size * 1.4;

    ctx.set_text_align("left");
    ctx.set_text_baseline("top");

    ctx.set_font(&bold_font(font_size));
    ctx.set_fill_style_str(&theme.letter.as_css());
    let _ = ctx.fill_text("GAMESALAD", x, y);

    ctx.set_font(&font(font_size * 0.8));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text(
        &format!("Level {} of {}", snapshot.level_number, snapshot.level_count),
        x,
        y + line * 1.5,
    );
    ctx.set_fill_style_str(&theme.letter.as_css());
    let _ = ctx.fill_text(&snapshot.level_name, x, y + line * 2.5);
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text(&format!("Time: {}", snapshot.elapsed), x, y + line * 3.5);
    ctx.set_fill_style_str(&theme.found_text.as_css());
    let _ = ctx.fill_text(
        &format!("Found {}/{}", snapshot.found_count, snapshot.words.len()),
        x,
        y + line * 4.5,
    );

    let list_y = y + line * 6.0;
    for (i, word) in snapshot.words.iter().enumerate() {
        let color = if word.found {
            &theme.found_text
        } else {
            &theme.masked_text
        };
        ctx.set_fill_style_str(&color.as_css());
        let _ = ctx.fill_text(&word.text, x, list_y + i as f64 * line);
    }

    ctx.set_font(&font(font_size * 0.6));
    ctx.set_fill_style_str(&theme.info_text.as_css_alpha(0.7));
    let help_y = list_y + (snapshot.words.len() as f64 + 1.0) * line;
    let _ = ctx.fill_text("N next  R restart  T theme  P pause", x, help_y);
}

/// The letters spelled so far, under the board
fn render_selection<S: KeyValueStore>(
    ctx: &CanvasRenderingContext2d,
    view: &GameView<S>,
    theme: &Theme,
    x: f64,
    y: f64,
    font_size: f64,
) {
    let word = view.session().current_word();
    if word.is_empty() {
        return;
    }
    ctx.set_font(&bold_font(font_size));
    ctx.set_fill_style_str(&theme.trail.as_css());
    ctx.set_text_align("left");
    ctx.set_text_baseline("top");
    let _ = ctx.fill_text(&word.to_uppercase(), x, y);
}

fn render_pause_overlay(
    ctx: &CanvasRenderingContext2d,
    theme: &Theme,
    width: u32,
    height: u32,
    font_size: f64,
) {
    let w = width as f64;
    let h = height as f64;

    ctx.set_fill_style_str(&theme.background.as_css_alpha(0.92));
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&bold_font(font_size * 1.5));
    ctx.set_fill_style_str(&theme.letter.as_css());
    let _ = ctx.fill_text("PAUSED", w / 2.0, h / 2.0 - font_size);

    ctx.set_font(&font(font_size * 0.7));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text("Press any key to resume", w / 2.0, h / 2.0 + font_size);
}

fn render_victory_screen<S: KeyValueStore>(
    ctx: &CanvasRenderingContext2d,
    view: &GameView<S>,
    theme: &Theme,
    width: u32,
    height: u32,
    font_size: f64,
) {
    let w = width as f64;
    let h = height as f64;

    ctx.set_fill_style_str(&theme.background.as_css_alpha(0.85));
    ctx.fill_rect(0.0, 0.0, w, h);

    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");

    let banner = if let Some(victory) = view.victory() {
        for particle in victory.particles() {
            if !particle.is_visible(width as f32, height as f32) {
                continue;
            }
            let alpha = particle.lifetime.min(1.0) as f64;
            ctx.set_fill_style_str(&particle.color.as_css_alpha(alpha));
            ctx.set_font(&font(particle.size as f64));
            let _ = ctx.fill_text(
                &particle.char.to_string(),
                particle.x as f64,
                particle.y as f64,
            );
        }
        let hue = (victory.frame() % 180) * 2;
        ctx.set_fill_style_str(&format!("hsl({hue}, 100%, 65%)"));
        victory.message()
    } else {
        ctx.set_fill_style_str(&theme.win_color.as_css());
        "ALL WORDS FOUND!"
    };

    ctx.set_font(&bold_font(font_size * 1.8));
    let _ = ctx.fill_text(banner, w / 2.0, h / 2.0 - 40.0);

    let session = view.session();
    let snapshot = view.snapshot();
    ctx.set_font(&font(font_size));
    ctx.set_fill_style_str(&theme.info_text.as_css());
    let _ = ctx.fill_text(
        &format!("{} solved in {}", session.level().name(), snapshot.elapsed),
        w / 2.0,
        h / 2.0 + 20.0,
    );

    let words: Vec<&str> = session
        .level()
        .entries()
        .iter()
        .map(|e| e.word())
        .collect();
    ctx.set_font(&font(font_size * 0.7));
    ctx.set_fill_style_str(&theme.found_text.as_css());
    let _ = ctx.fill_text(&words.join("  "), w / 2.0, h / 2.0 + 60.0);

    ctx.set_fill_style_str(&theme.info_text.as_css_alpha(0.8));
    let _ = ctx.fill_text("Press N for the next level, R to replay", w / 2.0, h / 2.0 + 100.0);
}

/// Render temporary message
fn render_message(
    ctx: &CanvasRenderingContext2d,
    theme: &Theme,
    message: &str,
    width: u32,
    height: u32,
    font_size: f64,
) {
    let msg_y = height as f64 - 50.0;

    ctx.set_font(&font(font_size * 0.8));
    ctx.set_fill_style_str(&theme.background.as_css_alpha(0.8));
    let metrics = ctx.measure_text(message).ok();
    let msg_width = metrics.map(|m| m.width()).unwrap_or(200.0) + 40.0;
    ctx.fill_rect(
        (width as f64 - msg_width) / 2.0,
        msg_y - font_size,
        msg_width,
        font_size * 2.0,
    );

    ctx.set_fill_style_str(&theme.message_text.as_css());
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    let _ = ctx.fill_text(message, width as f64 / 2.0, msg_y);
}
