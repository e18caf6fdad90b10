//! Basic example of playing a level through the game session

use gamesalad_core::{
    BoardGeometry, GameConfig, GameSession, GestureEvent, LevelCatalog, Position, SessionEvent,
};

fn print_board(session: &GameSession) {
    let grid = session.level().grid();
    for (row, letters) in grid.iter().enumerate() {
        let line: Vec<String> = letters
            .iter()
            .enumerate()
            .map(|(col, letter)| {
                let retired = Position::from_coords(row, col)
                    .is_some_and(|p| session.retired().contains(&p));
                match letter {
                    Some(c) if !retired => c.to_string(),
                    _ => ".".to_string(),
                }
            })
            .collect();
        println!("  {}", line.join(" "));
    }
}

fn main() {
    let catalog = LevelCatalog::builtin();
    let Some(level) = catalog.get("street_fighters").cloned() else {
        println!("Level not found");
        return;
    };

    println!("Playing \"{}\" ({} words)\n", level.name(), level.word_count());
    let words: Vec<(String, Vec<Position>)> = level
        .entries()
        .iter()
        .map(|e| (e.word().to_string(), e.path().to_vec()))
        .collect();

    let geometry = BoardGeometry::new(0.0, 0.0, 90.0, 90.0).with_hitbox_inset(12.0);
    let mut session = match GameSession::new(level, geometry, GameConfig::default()) {
        Ok(session) => session,
        Err(err) => {
            println!("Bad geometry: {err}");
            return;
        }
    };
    print_board(&session);

    // Drag through every word, letting each animation finish
    let mut now = 0;
    session.start(now);
    for (word, path) in &words {
        println!("\nDragging {word}: {}", gamesalad_core::topology::encode_path(path));
        let mut events = session.gesture(GestureEvent::start(Some(path[0]), now));
        for pos in &path[1..] {
            now += 50;
            events.extend(session.gesture(GestureEvent::moved(Some(*pos), now)));
        }
        now += 50;
        events.extend(session.gesture(GestureEvent::end(now)));
        now += 2_000;
        events.extend(session.tick(now));

        for event in events {
            match event {
                SessionEvent::WordFound { word, remaining } => {
                    println!("Found {word}, {remaining} to go")
                }
                SessionEvent::CellsRetired(cells) => println!("{} cells left the board", cells.len()),
                SessionEvent::LevelComplete { elapsed_ms } => {
                    println!("Level complete in {}", gamesalad_core::format_time(elapsed_ms))
                }
                _ => {}
            }
        }
        print_board(&session);
    }
}
