//! Tests for the browser game view

#[cfg(test)]
mod tests {
    use crate::game::{masked, GameView, ScreenState};
    use gamesalad_core::{BoardGeometry, GestureKind, MemoryStore, Position, Preferences, ThemeKind};

    fn geometry() -> BoardGeometry {
        BoardGeometry::new(40.0, 40.0, 100.0, 100.0).with_hitbox_inset(12.0)
    }

    fn view_with(prefs: Preferences<MemoryStore>) -> GameView<MemoryStore> {
        GameView::new(prefs, geometry(), 0).unwrap()
    }

    fn view_on(level: &str) -> GameView<MemoryStore> {
        let mut prefs = Preferences::new(MemoryStore::new());
        prefs.set_current_level(level).unwrap();
        view_with(prefs)
    }

    /// Drag through cells given as codes like "a1", release, and return the time
    fn drag(view: &mut GameView<MemoryStore>, codes: &[&str], mut now: u64) -> u64 {
        for (i, code) in codes.iter().enumerate() {
            let pos = Position::parse(code).unwrap();
            let (x, y) = view.session().layout().cell_center(pos);
            let kind = if i == 0 {
                GestureKind::Start
            } else {
                GestureKind::Move
            };
            view.pointer(kind, x, y, now);
            now += 20;
        }
        view.pointer(GestureKind::End, 0.0, 0.0, now);
        now
    }

    #[test]
    fn test_new_view_starts_on_first_level() {
        let view = view_with(Preferences::new(MemoryStore::new()));
        assert_eq!(view.session().level().id(), "videogames");
        assert_eq!(view.level_number(), 1);
        assert_eq!(view.screen(), ScreenState::Playing);
        assert_eq!(view.theme_kind(), ThemeKind::Dark);
        // The level it opened on is remembered right away
        assert_eq!(view.prefs().current_level().as_deref(), Some("videogames"));
    }

    #[test]
    fn test_saved_level_is_restored() {
        let view = view_on("planets");
        assert_eq!(view.session().level().id(), "planets");
        assert_eq!(view.level_number(), 3);
    }

    #[test]
    fn test_unknown_saved_level_falls_back() {
        let view = view_on("no-such-level");
        assert_eq!(view.session().level().id(), "videogames");
    }

    #[test]
    fn test_drag_finds_word() {
        let mut view = view_on("street_fighters");
        drag(&mut view, &["a1", "b2", "c3"], 100);

        assert_eq!(view.message(), Some("KEN! 4 words left"));
        let snapshot = view.snapshot();
        assert_eq!(snapshot.found_count, 1);
        assert_eq!(snapshot.words[0].text, "KEN");
        assert!(snapshot.words[0].found);
        assert_eq!(snapshot.words[3].text, masked("CHUN LI"));
        assert!(!snapshot.words[3].found);
    }

    #[test]
    fn test_partial_drag_spells_letters() {
        let mut view = view_on("street_fighters");
        let (x, y) = view.session().layout().cell_center(Position::parse("c1").unwrap());
        view.pointer(GestureKind::Start, x, y, 100);
        let (x, y) = view.session().layout().cell_center(Position::parse("d1").unwrap());
        view.pointer(GestureKind::Move, x, y, 120);

        let snapshot = view.snapshot();
        assert_eq!(snapshot.current_word, "RY");
        assert_eq!(snapshot.path, vec!["c1".to_string(), "d1".to_string()]);
    }

    #[test]
    fn test_pointer_ignored_while_paused() {
        let mut view = view_on("street_fighters");
        view.toggle_pause(50);
        assert_eq!(view.screen(), ScreenState::Paused);
        assert!(view.is_paused());

        let (x, y) = view.session().layout().cell_center(Position::parse("a1").unwrap());
        view.pointer(GestureKind::Start, x, y, 100);
        assert!(view.session().path().is_empty());

        // Any key resumes
        view.handle_key("x", 200);
        assert_eq!(view.screen(), ScreenState::Playing);
        assert!(!view.is_paused());
    }

    #[test]
    fn test_completing_level_shows_victory() {
        let mut view = view_on("street_fighters");
        let words: [&[&str]; 5] = [
            &["a1", "b2", "c3"],
            &["a4", "b4", "c4", "c3"],
            &["c1", "d1", "d2"],
            &["b3", "c2", "d2", "c3", "d3", "d4"],
            &["b1", "a1", "a2", "a3", "a4"],
        ];

        let mut now = 100;
        for path in words {
            now = drag(&mut view, path, now) + 5_000;
            view.tick(now, 900.0, 600.0);
        }

        assert_eq!(view.screen(), ScreenState::Victory);
        assert!(view.session().is_complete());
        let victory = view.victory().expect("victory animation");
        assert!(!victory.particles().is_empty());

        view.handle_key("n", now + 100);
        assert_eq!(view.session().level().id(), "videogames");
        assert_eq!(view.screen(), ScreenState::Playing);
        assert!(view.victory().is_none());
    }

    #[test]
    fn test_next_level_persists() {
        let mut view = view_with(Preferences::new(MemoryStore::new()));
        view.next_level(10);
        assert_eq!(view.session().level().id(), "chess");
        assert_eq!(view.prefs().current_level().as_deref(), Some("chess"));
        assert_eq!(view.message(), Some("Level 2: Chess Pieces"));
    }

    #[test]
    fn test_load_level_by_id() {
        let mut view = view_with(Preferences::new(MemoryStore::new()));
        assert!(view.load_level("planets", 10));
        assert_eq!(view.session().level().id(), "planets");
        assert!(!view.load_level("missing", 20));
        assert_eq!(view.session().level().id(), "planets");
    }

    #[test]
    fn test_restart_forgets_found_words() {
        let mut view = view_on("street_fighters");
        let now = drag(&mut view, &["a1", "b2", "c3"], 100);
        view.tick(now + 5_000, 900.0, 600.0);
        assert_eq!(view.snapshot().found_count, 1);

        view.restart(now + 6_000);
        assert_eq!(view.snapshot().found_count, 0);
        assert_eq!(view.message(), Some("Level restarted"));
    }

    #[test]
    fn test_set_theme_persists() {
        let mut view = view_with(Preferences::new(MemoryStore::new()));
        assert!(view.set_theme("high_contrast"));
        assert_eq!(view.theme_kind(), ThemeKind::HighContrast);
        assert_eq!(view.prefs().theme(), ThemeKind::HighContrast);

        assert!(!view.set_theme("neon"));
        assert_eq!(view.theme_kind(), ThemeKind::HighContrast);
    }

    #[test]
    fn test_theme_key_cycles() {
        let mut view = view_with(Preferences::new(MemoryStore::new()));
        view.handle_key("t", 0);
        assert_eq!(view.theme_kind(), ThemeKind::Light);
    }

    #[test]
    fn test_vibration_setting_persists() {
        let mut view = view_with(Preferences::new(MemoryStore::new()));
        view.set_vibration(false);
        assert!(!view.session().vibration_enabled());
        assert!(!view.prefs().vibration_enabled());
    }

    #[test]
    fn test_message_expires() {
        let mut view = view_with(Preferences::new(MemoryStore::new()));
        view.show_message("hello");
        for frame in 0..150 {
            view.tick(frame, 900.0, 600.0);
        }
        assert_eq!(view.message(), None);
    }

    #[test]
    fn test_snapshot_serializes() {
        let view = view_with(Preferences::new(MemoryStore::new()));
        let json = serde_json::to_value(view.snapshot()).unwrap();
        assert_eq!(json["level_id"], "videogames");
        assert_eq!(json["screen"], "playing");
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["words"].as_array().unwrap().len(), 3);
    }
}

// Browser-only tests; run with `wasm-pack test --headless --chrome`
#[cfg(all(test, target_arch = "wasm32"))]
mod browser {
    use crate::storage::BrowserStore;
    use gamesalad_core::KeyValueStore;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_browser_store_round_trip() {
        let mut store = BrowserStore::open();
        store.set("gamesalad-test", "1").unwrap();
        assert_eq!(store.get("gamesalad-test").unwrap().as_deref(), Some("1"));
        store.remove("gamesalad-test").unwrap();
        assert_eq!(store.get("gamesalad-test").unwrap(), None);
    }
}
