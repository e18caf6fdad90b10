use crate::animations::particles::hue_to_rgb;
use crate::app::{App, ScreenState, CELL_HEIGHT, CELL_WIDTH};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use gamesalad_core::{format_time, CellStatus, Position};
use std::io;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide)?;

    match app.screen_state {
        // Redrawn in full every frame; skipping the clear avoids flicker
        ScreenState::Victory => render_victory_screen(stdout, app, term_width, term_height)?,
        ScreenState::Playing | ScreenState::Paused => {
            execute!(stdout, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;
            render_game_screen(stdout, app, term_width, term_height)?;
        }
    }

    execute!(stdout, Show)?;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let (x, y) = app.board_origin;

    render_board(stdout, app, x, y)?;

    let panel_x = x + CELL_WIDTH * 4 + 3;
    render_info_panel(stdout, app, panel_x, y)?;

    let selection_y = y + CELL_HEIGHT * 4 + 1;
    render_selection(stdout, app, x, selection_y)?;
    render_controls(stdout, app, x, selection_y + 2)?;

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    if app.screen_state == ScreenState::Paused {
        render_pause_overlay(stdout, app, term_width, term_height)?;
    }

    Ok(())
}

fn render_board(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    // Each cell slot is 8x4; the box is drawn 7x3 so a gap separates cells
    // +-----+
    // |  K  |
    // +-----+
    for pos in Position::all() {
        let cx = x + pos.col() as u16 * CELL_WIDTH;
        let cy = y + pos.row() as u16 * CELL_HEIGHT;
        render_cell(stdout, app, pos, cx, cy)?;
    }
    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, pos: Position, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let status = app.session.cell_status(pos);
    let letter = app.session.level().letter_at(pos);

    let (border, fg, bg) = match status {
        CellStatus::Retired => return Ok(()),
        CellStatus::Normal => (theme.border, theme.letter, theme.bg),
        CellStatus::Selected => (theme.selected_fg, theme.selected_fg, theme.selected_bg),
        CellStatus::Found => (theme.found, theme.found, theme.bg),
        CellStatus::Retiring => (theme.retiring, theme.retiring, theme.bg),
    };

    let letter = letter.map_or(' ', |c| c.to_ascii_uppercase());
    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(border),
        MoveTo(x, y),
        Print("+-----+"),
        MoveTo(x, y + 1),
        Print("|  "),
        SetForegroundColor(fg),
        Print(letter),
        SetForegroundColor(border),
        Print("  |"),
        MoveTo(x, y + 2),
        Print("+-----+"),
        SetBackgroundColor(theme.bg)
    )?;
    Ok(())
}

fn render_info_panel(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;
    let session = &app.session;
    let now = app.now_ms();

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("=== GAMESALAD ==="),
        MoveTo(x, y + 2),
        SetForegroundColor(theme.info),
        Print(format!(
            "Level #{} of {}",
            app.level_number(),
            app.catalog.len()
        )),
        MoveTo(x, y + 3),
        SetForegroundColor(theme.fg),
        Print(session.level().name()),
        MoveTo(x, y + 4),
        SetForegroundColor(theme.info),
        Print(format!("Time: {}", session.time_string(now))),
        MoveTo(x, y + 5),
        SetForegroundColor(theme.success),
        Print(format!(
            "Found {}/{}",
            session.store().found().len(),
            session.level().word_count()
        ))
    )?;

    let store = session.store();
    for (i, entry) in session.level().entries().iter().enumerate() {
        let (text, color) = if store.is_found(entry.word()) {
            (entry.word().to_string(), theme.found)
        } else {
            (masked(entry.word()), theme.masked)
        };
        execute!(
            stdout,
            MoveTo(x, y + 7 + i as u16),
            SetForegroundColor(color),
            Print(text)
        )?;
    }
    Ok(())
}

/// Hide a word's letters, keeping its shape
pub fn masked(word: &str) -> String {
    word.chars()
        .map(|c| if c.is_whitespace() { ' ' } else { '_' })
        .collect()
}

fn render_selection(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let word = app.session.current_word();
    if word.is_empty() {
        return Ok(());
    }
    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(app.theme.selected_fg),
        Print(format!("> {word}"))
    )?;
    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    let controls = [
        ("drag", "Select"),
        ("n", "Next level"),
        ("r", "Restart"),
        ("t", "Theme"),
        ("p", "Pause"),
        ("v", "Bell"),
        ("q", "Quit"),
    ];

    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 2;
        let row = i % 2;
        let cx = x + (col as u16) * 16;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>4}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(stdout: &mut io::Stdout, app: &App, msg: &str, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

fn render_pause_overlay(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let lines = [
        "+----------------------+",
        "|        PAUSED        |",
        "|  any key to resume   |",
        "+----------------------+",
    ];
    let x = term_width.saturating_sub(lines[0].len() as u16) / 2;
    let y = term_height.saturating_sub(lines.len() as u16) / 2;
    for (i, line) in lines.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, y + i as u16),
            SetForegroundColor(theme.key),
            SetBackgroundColor(theme.bg),
            Print(line)
        )?;
    }
    Ok(())
}

fn render_victory_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    app.victory_screen.resize(term_width, term_height);
    let bg_base = Color::Rgb { r: 8, g: 12, b: 20 };

    execute!(stdout, SetBackgroundColor(bg_base), Clear(ClearType::All))?;

    for particle in app.victory_screen.particles() {
        if particle.is_visible(term_width, term_height) {
            execute!(
                stdout,
                MoveTo(particle.x as u16, particle.y as u16),
                SetForegroundColor(particle.color),
                Print(particle.char)
            )?;
        }
    }

    let lines: Vec<&str> = app
        .victory_screen
        .banner()
        .lines()
        .filter(|l| !l.is_empty())
        .collect();
    let banner_width = lines.iter().map(|l| l.len()).max().unwrap_or(40) as u16;
    let banner_x = term_width.saturating_sub(banner_width) / 2;
    let banner_y = 3;

    for (i, line) in lines.iter().enumerate() {
        let hue = app.victory_screen.rainbow_offset() + i as f32 * 0.1;
        execute!(
            stdout,
            MoveTo(banner_x, banner_y + i as u16),
            SetForegroundColor(hue_to_rgb(hue)),
            Print(line)
        )?;
    }

    let session = &app.session;
    let elapsed = format_time(session.elapsed_ms(app.now_ms()));
    let info = [
        app.victory_screen.current_message().to_string(),
        format!("{} in {}", session.level().name(), elapsed),
        String::new(),
        "n: next level   r: replay   q: quit".to_string(),
    ];
    let info_y = banner_y + lines.len() as u16 + 2;
    for (i, line) in info.iter().enumerate() {
        let x = term_width.saturating_sub(line.chars().count() as u16) / 2;
        execute!(
            stdout,
            MoveTo(x, info_y + i as u16),
            SetForegroundColor(Color::White),
            Print(line)
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_masked_keeps_spaces() {
        assert_eq!(masked("KEN"), "___");
        assert_eq!(masked("CHUN LI"), "____ __");
    }
}
