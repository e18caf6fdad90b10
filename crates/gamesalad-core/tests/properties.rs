//! Randomized checks of the selection and matching rules.

use gamesalad_core::{
    find_match, used_positions, BoardGeometry, FoundWords, GestureEvent, Level, LevelCatalog,
    Position, SelectionEngine, SelectionTiming, CELL_COUNT,
};
use proptest::prelude::*;

fn engine() -> SelectionEngine {
    SelectionEngine::new(BoardGeometry::new(0.0, 0.0, 50.0, 50.0), SelectionTiming::default())
        .unwrap()
}

fn cell(index: usize) -> Position {
    Position::from_index(index % CELL_COUNT).unwrap()
}

/// Walk from `start`, each step picking an adjacent cell not yet visited
fn adjacent_walk(start: usize, choices: &[usize]) -> Vec<Position> {
    let mut walk = vec![cell(start)];
    for choice in choices {
        let last = walk[walk.len() - 1];
        let next: Vec<Position> = Position::all()
            .filter(|p| last.is_adjacent(*p) && !walk.contains(p))
            .collect();
        if next.is_empty() {
            break;
        }
        walk.push(next[choice % next.len()]);
    }
    walk
}

/// Drag along `walk` with the given gaps between events; returns the last timestamp
fn drag(engine: &mut SelectionEngine, walk: &[Position], gaps: &[u64]) -> u64 {
    let mut now = 1_000;
    engine.handle(GestureEvent::start(Some(walk[0]), now));
    for (i, pos) in walk[1..].iter().enumerate() {
        now += gaps.get(i).copied().unwrap_or(0);
        engine.handle(GestureEvent::moved(Some(*pos), now));
    }
    now
}

fn level(index: usize) -> Level {
    let catalog = LevelCatalog::builtin();
    let levels: Vec<&Level> = catalog.iter().collect();
    levels[index % levels.len()].clone()
}

fn found_subset(level: &Level, mask: u32) -> FoundWords {
    level
        .entries()
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << *i) != 0)
        .map(|(_, e)| e.word().to_string())
        .collect()
}

proptest! {
    #[test]
    fn drag_path_equals_visitation_order(
        start in 0usize..CELL_COUNT,
        choices in prop::collection::vec(any::<usize>(), 0..15),
        gaps in prop::collection::vec(0u64..40, 15),
        end_gap in 0u64..400,
    ) {
        let walk = adjacent_walk(start, &choices);
        let mut e = engine();
        let now = drag(&mut e, &walk, &gaps);
        e.handle(GestureEvent::end(now + end_gap));
        prop_assert_eq!(e.path(), walk.as_slice());
        prop_assert!(!e.is_dragging());
    }

    #[test]
    fn revisiting_previous_cell_pops_one(
        start in 0usize..CELL_COUNT,
        choices in prop::collection::vec(any::<usize>(), 1..15),
        gaps in prop::collection::vec(0u64..40, 16),
    ) {
        let walk = adjacent_walk(start, &choices);
        prop_assume!(walk.len() >= 2);
        let mut e = engine();
        let now = drag(&mut e, &walk, &gaps);
        e.handle(GestureEvent::moved(Some(walk[walk.len() - 2]), now + gaps[15]));
        prop_assert_eq!(e.path(), &walk[..walk.len() - 1]);
    }

    #[test]
    fn distant_free_cell_resets_to_singleton(
        start in 0usize..CELL_COUNT,
        choices in prop::collection::vec(any::<usize>(), 0..15),
        gaps in prop::collection::vec(0u64..40, 16),
        target in any::<usize>(),
        released in any::<bool>(),
    ) {
        let walk = adjacent_walk(start, &choices);
        let last = walk[walk.len() - 1];
        let targets: Vec<Position> = Position::all()
            .filter(|p| !last.is_adjacent(*p) && !walk.contains(p))
            .collect();
        prop_assume!(!targets.is_empty());
        let target = targets[target % targets.len()];

        let mut e = engine();
        let now = drag(&mut e, &walk, &gaps) + gaps[15];
        if released {
            e.handle(GestureEvent::end(now));
            e.handle(GestureEvent::start(Some(target), now + 1));
        } else {
            e.handle(GestureEvent::moved(Some(target), now));
        }
        prop_assert_eq!(e.path(), &[target][..]);
    }

    #[test]
    fn find_match_is_idempotent_and_skips_found(
        level_index in 0usize..4,
        mask in any::<u32>(),
        word_index in any::<usize>(),
        start in 0usize..CELL_COUNT,
        choices in prop::collection::vec(any::<usize>(), 0..8),
        use_word_path in any::<bool>(),
    ) {
        let level = level(level_index);
        let found = found_subset(&level, mask);
        let path = if use_word_path {
            let entries = level.entries();
            entries[word_index % entries.len()].path().to_vec()
        } else {
            adjacent_walk(start, &choices)
        };

        let first = find_match(&path, &level, &found);
        let second = find_match(&path, &level, &found);
        prop_assert_eq!(first, second);
        if let Some(word) = first {
            prop_assert!(!found.contains(word));
            prop_assert_eq!(level.entry(word).map(|e| e.path()), Some(path.as_slice()));
        }
    }

    #[test]
    fn used_positions_cover_exactly_unfound_words(level_index in 0usize..4, mask in any::<u32>()) {
        let level = level(level_index);
        let found = found_subset(&level, mask);
        let used = used_positions(&level, &found);
        for entry in level.entries() {
            if !found.contains(entry.word()) {
                prop_assert!(entry.path().iter().all(|p| used.contains(p)));
            }
        }
        let all_found = level.entries().iter().all(|e| found.contains(e.word()));
        prop_assert_eq!(used.is_empty(), all_found);
    }
}
