//! Drag selection over the board.
//!
//! The selection is an explicit [`SelectionState`] value advanced by the pure
//! [`transition`] function. [`SelectionEngine`] owns one state, the per-cell
//! [`CellMarks`] set by the game controller, and an optional observer that
//! receives every [`SelectionEvent`] in the order the path changed.
//!
//! Rules, in short:
//! - a Start on the last selected cell arms a tap-to-deselect, resolved on End
//! - re-entering the second-to-last cell always pops the last one
//! - a new cell must be adjacent to the last one and not already selected,
//!   otherwise the path restarts at that cell
//! - cells about to be retired are never valid targets
//! - nothing but `lock`/`unlock` enters or leaves the locked state

use crate::layout::{BoardGeometry, BoardLayout, LayoutError};
use crate::topology::Position;
use tracing::{debug, trace};

/// Default window for a tap on the last cell to count as a deselect
pub const DEFAULT_TAP_MAX_DELAY_MS: u64 = 300;

/// Default minimum spacing between processed moves
pub const DEFAULT_MOVE_THROTTLE_MS: u64 = 16;

/// Phase of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureKind {
    Start,
    Move,
    End,
}

/// A pointer or touch event, already resolved to a cell by the host.
///
/// `position` is `None` when the point is outside every interactive cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureEvent {
    pub kind: GestureKind,
    pub position: Option<Position>,
    pub timestamp_ms: u64,
}

impl GestureEvent {
    pub fn start(position: Option<Position>, timestamp_ms: u64) -> Self {
        Self {
            kind: GestureKind::Start,
            position,
            timestamp_ms,
        }
    }

    pub fn moved(position: Option<Position>, timestamp_ms: u64) -> Self {
        Self {
            kind: GestureKind::Move,
            position,
            timestamp_ms,
        }
    }

    pub fn end(timestamp_ms: u64) -> Self {
        Self {
            kind: GestureKind::End,
            position: None,
            timestamp_ms,
        }
    }
}

/// Timing knobs for gesture interpretation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionTiming {
    /// Longest press on the last cell that still counts as a deselect tap
    pub tap_max_delay_ms: u64,
    /// Repeated or off-board moves closer together than this are dropped.
    /// A move onto a different cell is never throttled.
    pub move_throttle_ms: u64,
}

impl Default for SelectionTiming {
    fn default() -> Self {
        Self {
            tap_max_delay_ms: DEFAULT_TAP_MAX_DELAY_MS,
            move_throttle_ms: DEFAULT_MOVE_THROTTLE_MS,
        }
    }
}

/// Per-cell flags set by the game controller while a found word animates.
///
/// Bit `i` refers to the cell with row-major index `i`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellMarks {
    /// Cells of a just-found word, still animating
    found_temp: u16,
    /// Cells that no remaining word uses and will leave the board
    pending_unused: u16,
}

impl CellMarks {
    fn bit(pos: Position) -> u16 {
        1 << pos.index()
    }

    pub fn is_found_temp(&self, pos: Position) -> bool {
        self.found_temp & Self::bit(pos) != 0
    }

    pub fn is_pending_unused(&self, pos: Position) -> bool {
        self.pending_unused & Self::bit(pos) != 0
    }

    /// A cell in both states must keep its selection until the animation ends
    pub fn blocks_clear(&self, pos: Position) -> bool {
        self.is_found_temp(pos) && self.is_pending_unused(pos)
    }

    pub fn mark_found_temp(&mut self, positions: impl IntoIterator<Item = Position>) {
        for pos in positions {
            self.found_temp |= Self::bit(pos);
        }
    }

    pub fn mark_pending_unused(&mut self, positions: impl IntoIterator<Item = Position>) {
        for pos in positions {
            self.pending_unused |= Self::bit(pos);
        }
    }

    pub fn clear_found_temp(&mut self) {
        self.found_temp = 0;
    }

    pub fn clear_pending_unused(&mut self) {
        self.pending_unused = 0;
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.found_temp == 0 && self.pending_unused == 0
    }
}

/// Coarse state of the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// Empty path
    Idle,
    /// Non-empty path, whether or not a pointer is still down.
    /// Use [`SelectionState::is_dragging`] to tell the two apart.
    Selecting,
    Locked,
}

/// Bookkeeping for the gesture currently held down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DragState {
    started_at: u64,
    start_position: Position,
    last_event_at: u64,
    last_move_position: Option<Position>,
    moved_away: bool,
    pending_undo: bool,
}

/// The selection value advanced by [`transition`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    path: Vec<Position>,
    drag: Option<DragState>,
    locked: bool,
}

/// Notification emitted when the path changes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// The path grew or shrank; carries the full current path
    Changed(Vec<Position>),
    /// The path was emptied
    Reset,
}

/// Why an input left the state untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Locked,
    NotDragging,
    Throttled,
    OffBoard,
    Duplicate,
    RetiringCell,
    NoChange,
    AlreadyLocked,
    NotLocked,
}

/// What happened to an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(IgnoreReason),
    /// A clear was blocked by a cell still animating; retry after unlock
    Refused,
}

/// Everything fed to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionInput {
    Gesture(GestureEvent),
    Clear,
    Lock,
    Unlock,
}

/// Result of one [`transition`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SelectionState,
    pub events: Vec<SelectionEvent>,
    pub outcome: Outcome,
}

/// Advance `state` by one input without touching the original
pub fn transition(
    state: &SelectionState,
    input: SelectionInput,
    marks: &CellMarks,
    timing: &SelectionTiming,
) -> Transition {
    let mut next = state.clone();
    let mut events = Vec::new();
    let outcome = next.apply(input, marks, timing, &mut events);
    Transition {
        state: next,
        events,
        outcome,
    }
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// `Selecting` covers a released path too: the path survives End and
    /// the next Start continues from it. See [`Self::is_dragging`].
    pub fn phase(&self) -> SelectionPhase {
        if self.locked {
            SelectionPhase::Locked
        } else if self.path.is_empty() {
            SelectionPhase::Idle
        } else {
            SelectionPhase::Selecting
        }
    }

    fn last(&self) -> Option<Position> {
        self.path.last().copied()
    }

    fn second_last(&self) -> Option<Position> {
        self.path.len().checked_sub(2).map(|i| self.path[i])
    }

    fn apply(
        &mut self,
        input: SelectionInput,
        marks: &CellMarks,
        timing: &SelectionTiming,
        events: &mut Vec<SelectionEvent>,
    ) -> Outcome {
        match input {
            SelectionInput::Gesture(event) => match event.kind {
                GestureKind::Start => self.on_start(event, marks, events),
                GestureKind::Move => self.on_move(event, marks, timing, events),
                GestureKind::End => self.on_end(event, marks, timing, events),
            },
            SelectionInput::Clear => {
                let outcome = self.clear_path(marks, events);
                if outcome == Outcome::Applied {
                    self.drag = None;
                }
                outcome
            }
            SelectionInput::Lock => {
                if self.locked {
                    debug!("lock requested while already locked");
                    return Outcome::Ignored(IgnoreReason::AlreadyLocked);
                }
                self.locked = true;
                self.drag = None;
                Outcome::Applied
            }
            SelectionInput::Unlock => {
                if !self.locked {
                    debug!("unlock requested while not locked");
                    return Outcome::Ignored(IgnoreReason::NotLocked);
                }
                self.locked = false;
                Outcome::Applied
            }
        }
    }

    fn clear_path(&mut self, marks: &CellMarks, events: &mut Vec<SelectionEvent>) -> Outcome {
        if let Some(blocking) = self.path.iter().find(|p| marks.blocks_clear(**p)) {
            debug!(cell = %blocking, "clear refused while cell is animating out");
            return Outcome::Refused;
        }
        if !self.path.is_empty() {
            self.path.clear();
            events.push(SelectionEvent::Reset);
        }
        Outcome::Applied
    }

    fn push(&mut self, pos: Position, events: &mut Vec<SelectionEvent>) {
        self.path.push(pos);
        events.push(SelectionEvent::Changed(self.path.clone()));
    }

    fn pop(&mut self, events: &mut Vec<SelectionEvent>) {
        self.path.pop();
        events.push(SelectionEvent::Changed(self.path.clone()));
    }

    fn on_start(
        &mut self,
        event: GestureEvent,
        marks: &CellMarks,
        events: &mut Vec<SelectionEvent>,
    ) -> Outcome {
        if self.locked {
            trace!("start ignored while locked");
            return Outcome::Ignored(IgnoreReason::Locked);
        }

        let Some(pos) = event.position else {
            // Pressing the board outside any cell drops the selection
            self.drag = None;
            return self.clear_path(marks, events);
        };

        if self.path.iter().any(|p| marks.is_pending_unused(*p))
            && self.clear_path(marks, events) == Outcome::Refused
        {
            return Outcome::Refused;
        }

        if marks.is_pending_unused(pos) {
            debug!(cell = %pos, "start on a retiring cell ignored");
            return Outcome::Ignored(IgnoreReason::RetiringCell);
        }

        let mut drag = DragState {
            started_at: event.timestamp_ms,
            start_position: pos,
            last_event_at: event.timestamp_ms,
            last_move_position: None,
            moved_away: false,
            pending_undo: false,
        };

        if self.last() == Some(pos) {
            drag.pending_undo = true;
            self.drag = Some(drag);
            return Outcome::Applied;
        }

        if self.second_last() == Some(pos) {
            self.pop(events);
            self.drag = Some(drag);
            return Outcome::Applied;
        }

        let extends = match self.last() {
            None => true,
            Some(last) => last.is_adjacent(pos) && !self.path.contains(&pos),
        };

        if !extends && self.clear_path(marks, events) == Outcome::Refused {
            return Outcome::Refused;
        }

        self.push(pos, events);
        self.drag = Some(drag);
        Outcome::Applied
    }

    fn on_move(
        &mut self,
        event: GestureEvent,
        marks: &CellMarks,
        timing: &SelectionTiming,
        events: &mut Vec<SelectionEvent>,
    ) -> Outcome {
        if self.locked {
            return Outcome::Ignored(IgnoreReason::Locked);
        }
        let Some(drag) = self.drag.as_mut() else {
            trace!("move without an active drag");
            return Outcome::Ignored(IgnoreReason::NotDragging);
        };

        // Only repeats are throttled; a move onto a new cell is always processed
        let Some(pos) = event.position.filter(|p| drag.last_move_position != Some(*p)) else {
            if event.timestamp_ms.saturating_sub(drag.last_event_at) < timing.move_throttle_ms {
                return Outcome::Ignored(IgnoreReason::Throttled);
            }
            drag.last_event_at = event.timestamp_ms;
            return Outcome::Ignored(match event.position {
                None => IgnoreReason::OffBoard,
                Some(_) => IgnoreReason::Duplicate,
            });
        };
        drag.last_event_at = event.timestamp_ms;
        drag.last_move_position = Some(pos);
        if pos != drag.start_position {
            drag.moved_away = true;
        }

        let last = self.last();
        if marks.is_pending_unused(pos) || last.is_some_and(|p| marks.is_pending_unused(p)) {
            return Outcome::Ignored(IgnoreReason::RetiringCell);
        }

        if self.second_last() == Some(pos) {
            self.pop(events);
            return Outcome::Applied;
        }

        if last == Some(pos) || self.path.contains(&pos) {
            return Outcome::Ignored(IgnoreReason::NoChange);
        }

        match last {
            Some(last) if last.is_adjacent(pos) => {
                self.push(pos, events);
                Outcome::Applied
            }
            _ => {
                // Jumping to a distant free cell starts over from there
                if self.clear_path(marks, events) == Outcome::Refused {
                    return Outcome::Refused;
                }
                self.push(pos, events);
                Outcome::Applied
            }
        }
    }

    fn on_end(
        &mut self,
        event: GestureEvent,
        marks: &CellMarks,
        timing: &SelectionTiming,
        events: &mut Vec<SelectionEvent>,
    ) -> Outcome {
        let Some(drag) = self.drag.take() else {
            debug!("end without a matching start");
            return Outcome::Ignored(IgnoreReason::NotDragging);
        };

        let quick = event.timestamp_ms.saturating_sub(drag.started_at) <= timing.tap_max_delay_ms;
        if drag.pending_undo && !drag.moved_away && quick {
            if self.path.len() == 1 {
                return self.clear_path(marks, events);
            }
            self.pop(events);
        }
        Outcome::Applied
    }
}

/// Receives selection notifications as they happen
pub trait SelectionObserver {
    fn selection_changed(&mut self, event: &SelectionEvent);
}

impl<F> SelectionObserver for F
where
    F: FnMut(&SelectionEvent),
{
    fn selection_changed(&mut self, event: &SelectionEvent) {
        self(event)
    }
}

/// Owns a [`SelectionState`] and feeds it gestures
pub struct SelectionEngine {
    state: SelectionState,
    marks: CellMarks,
    timing: SelectionTiming,
    layout: BoardLayout,
    observer: Option<Box<dyn SelectionObserver>>,
}

impl std::fmt::Debug for SelectionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionEngine")
            .field("state", &self.state)
            .field("marks", &self.marks)
            .field("timing", &self.timing)
            .field("layout", &self.layout)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

impl SelectionEngine {
    /// Create an engine for a board with the given geometry.
    ///
    /// Fails if the geometry cannot host 16 interactive cells.
    pub fn new(geometry: BoardGeometry, timing: SelectionTiming) -> Result<Self, LayoutError> {
        Ok(Self {
            state: SelectionState::new(),
            marks: CellMarks::default(),
            timing,
            layout: BoardLayout::new(geometry)?,
            observer: None,
        })
    }

    /// Register the single observer, replacing any previous one
    pub fn set_observer(&mut self, observer: impl SelectionObserver + 'static) {
        self.observer = Some(Box::new(observer));
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn path(&self) -> &[Position] {
        self.state.path()
    }

    pub fn phase(&self) -> SelectionPhase {
        self.state.phase()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn is_locked(&self) -> bool {
        self.state.is_locked()
    }

    pub fn marks(&self) -> &CellMarks {
        &self.marks
    }

    pub fn marks_mut(&mut self) -> &mut CellMarks {
        &mut self.marks
    }

    pub fn timing(&self) -> SelectionTiming {
        self.timing
    }

    pub fn set_timing(&mut self, timing: SelectionTiming) {
        self.timing = timing;
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    /// Swap in new geometry, e.g. after a resize
    pub fn relayout(&mut self, geometry: BoardGeometry) -> Result<(), LayoutError> {
        self.layout = BoardLayout::new(geometry)?;
        Ok(())
    }

    /// Feed one gesture; returns the notifications it produced
    pub fn handle(&mut self, event: GestureEvent) -> Vec<SelectionEvent> {
        self.dispatch(SelectionInput::Gesture(event)).0
    }

    /// Hit-test a raw point and feed the resulting gesture
    pub fn handle_pointer(
        &mut self,
        kind: GestureKind,
        x: f64,
        y: f64,
        timestamp_ms: u64,
    ) -> Vec<SelectionEvent> {
        let position = match kind {
            GestureKind::End => None,
            _ => self.layout.hit_test(x, y),
        };
        self.handle(GestureEvent {
            kind,
            position,
            timestamp_ms,
        })
    }

    /// Empty the path. Returns `false` when refused by an animating cell.
    pub fn clear(&mut self) -> bool {
        self.dispatch(SelectionInput::Clear).1 != Outcome::Refused
    }

    pub fn lock(&mut self) {
        self.dispatch(SelectionInput::Lock);
    }

    pub fn unlock(&mut self) {
        self.dispatch(SelectionInput::Unlock);
    }

    fn dispatch(&mut self, input: SelectionInput) -> (Vec<SelectionEvent>, Outcome) {
        let Transition {
            state,
            events,
            outcome,
        } = transition(&self.state, input, &self.marks, &self.timing);
        trace!(?input, ?outcome, path_len = state.path().len(), "selection input");
        self.state = state;

        if let Some(observer) = self.observer.as_mut() {
            for event in &events {
                observer.selection_changed(event);
            }
        }
        (events, outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn p(code: &str) -> Position {
        Position::parse(code).unwrap()
    }

    fn path(codes: &[&str]) -> Vec<Position> {
        codes.iter().map(|c| p(c)).collect()
    }

    fn engine() -> SelectionEngine {
        SelectionEngine::new(
            BoardGeometry::new(0.0, 0.0, 10.0, 10.0),
            SelectionTiming::default(),
        )
        .unwrap()
    }

    /// Drives an engine with a clock that advances past the move throttle
    struct Driver {
        engine: SelectionEngine,
        now: u64,
    }

    impl Driver {
        fn new() -> Self {
            Self {
                engine: engine(),
                now: 1_000,
            }
        }

        fn tick(&mut self, ms: u64) -> u64 {
            self.now += ms;
            self.now
        }

        fn start(&mut self, code: &str) -> Vec<SelectionEvent> {
            let t = self.tick(20);
            self.engine.handle(GestureEvent::start(Some(p(code)), t))
        }

        fn to(&mut self, code: &str) -> Vec<SelectionEvent> {
            let t = self.tick(20);
            self.engine.handle(GestureEvent::moved(Some(p(code)), t))
        }

        fn end(&mut self) -> Vec<SelectionEvent> {
            let t = self.tick(20);
            self.engine.handle(GestureEvent::end(t))
        }

        fn drag(&mut self, codes: &[&str]) {
            self.start(codes[0]);
            for code in &codes[1..] {
                self.to(code);
            }
            self.end();
        }

        fn path(&self) -> Vec<Position> {
            self.engine.path().to_vec()
        }
    }

    #[test]
    fn test_drag_follows_visitation_order() {
        let mut d = Driver::new();
        d.drag(&["a1", "b2", "c3", "d3", "c2"]);
        assert_eq!(d.path(), path(&["a1", "b2", "c3", "d3", "c2"]));
        assert!(!d.engine.is_dragging());
        assert_eq!(d.engine.phase(), SelectionPhase::Selecting);
    }

    #[test]
    fn test_cat_scenario_path() {
        let mut d = Driver::new();
        assert_eq!(d.start("a1"), vec![SelectionEvent::Changed(path(&["a1"]))]);
        assert_eq!(d.to("a2"), vec![SelectionEvent::Changed(path(&["a1", "a2"]))]);
        assert_eq!(d.to("a3"), vec![SelectionEvent::Changed(path(&["a1", "a2", "a3"]))]);
    }

    #[test]
    fn test_drag_backtrack_pops_one() {
        let mut d = Driver::new();
        d.start("a1");
        d.to("a2");
        assert_eq!(d.to("a1"), vec![SelectionEvent::Changed(path(&["a1"]))]);
        assert_eq!(d.path(), path(&["a1"]));
    }

    #[test]
    fn test_backtrack_pops_exactly_one_at_any_length() {
        let route = ["a1", "a2", "a3", "a4", "b4", "b3", "b2", "b1", "c1", "c2"];
        for len in 2..=route.len() {
            let mut d = Driver::new();
            d.start(route[0]);
            for code in &route[1..len] {
                d.to(code);
            }
            d.to(route[len - 2]);
            assert_eq!(d.path(), path(&route[..len - 1]), "length {len}");
        }
    }

    #[test]
    fn test_non_adjacent_move_resets_to_singleton() {
        let mut d = Driver::new();
        d.start("a1");
        assert_eq!(
            d.to("d4"),
            vec![SelectionEvent::Reset, SelectionEvent::Changed(path(&["d4"]))]
        );
        assert_eq!(d.path(), path(&["d4"]));
        // The drag carries on from the new cell
        d.to("c3");
        assert_eq!(d.path(), path(&["d4", "c3"]));
    }

    #[test]
    fn test_non_adjacent_start_resets_to_singleton() {
        let mut d = Driver::new();
        d.start("a1");
        d.end();
        let events = d.start("d4");
        assert_eq!(
            events,
            vec![SelectionEvent::Reset, SelectionEvent::Changed(path(&["d4"]))]
        );
        assert_eq!(d.path(), path(&["d4"]));
    }

    #[test]
    fn test_non_adjacent_then_end_keeps_new_path() {
        // Start(a1), release, then press d4: path restarts at d4
        let mut d = Driver::new();
        d.drag(&["a1", "a2"]);
        d.start("d4");
        d.end();
        assert_eq!(d.path(), path(&["d4"]));
    }

    #[test]
    fn test_start_on_selected_cell_resets() {
        let mut d = Driver::new();
        d.drag(&["a1", "a2", "a3", "b3"]);
        d.start("a1");
        assert_eq!(d.path(), path(&["a1"]));
    }

    #[test]
    fn test_start_on_second_last_pops() {
        let mut d = Driver::new();
        d.drag(&["a1", "a2", "a3"]);
        let events = d.start("a2");
        assert_eq!(events, vec![SelectionEvent::Changed(path(&["a1", "a2"]))]);
        d.end();
        assert_eq!(d.path(), path(&["a1", "a2"]));
    }

    #[test]
    fn test_tap_sequence_builds_word() {
        let mut d = Driver::new();
        for code in ["b1", "b2", "c3"] {
            d.start(code);
            d.end();
        }
        assert_eq!(d.path(), path(&["b1", "b2", "c3"]));
    }

    #[test]
    fn test_quick_tap_on_last_deselects() {
        let mut d = Driver::new();
        d.drag(&["a1", "a2", "a3"]);
        assert!(d.start("a3").is_empty());
        assert_eq!(d.end(), vec![SelectionEvent::Changed(path(&["a1", "a2"]))]);
    }

    #[test]
    fn test_quick_tap_on_only_cell_resets() {
        let mut d = Driver::new();
        d.drag(&["c2"]);
        d.start("c2");
        assert_eq!(d.end(), vec![SelectionEvent::Reset]);
        assert_eq!(d.engine.phase(), SelectionPhase::Idle);
    }

    #[test]
    fn test_slow_press_on_last_keeps_path() {
        let mut d = Driver::new();
        d.drag(&["a1", "a2"]);
        d.start("a2");
        d.tick(DEFAULT_TAP_MAX_DELAY_MS + 50);
        assert!(d.end().is_empty());
        assert_eq!(d.path(), path(&["a1", "a2"]));
    }

    #[test]
    fn test_press_on_last_then_drag_extends() {
        let mut d = Driver::new();
        d.drag(&["a1", "a2"]);
        d.start("a2");
        d.to("a3");
        d.end();
        assert_eq!(d.path(), path(&["a1", "a2", "a3"]));
    }

    #[test]
    fn test_move_into_selected_cell_is_ignored() {
        let mut d = Driver::new();
        d.start("a1");
        d.to("a2");
        d.to("b2");
        d.to("b1");
        assert!(d.to("a1").is_empty());
        assert_eq!(d.path(), path(&["a1", "a2", "b2", "b1"]));
    }

    #[test]
    fn test_move_throttle_and_duplicates() {
        let mut d = Driver::new();
        d.start("a1");
        let t = d.tick(20);
        assert_eq!(d.engine.handle(GestureEvent::moved(Some(p("a2")), t)).len(), 1);
        let t = d.tick(5);
        let state = d.engine.state().clone();
        let repeat = transition(
            &state,
            SelectionInput::Gesture(GestureEvent::moved(Some(p("a2")), t)),
            d.engine.marks(),
            &SelectionTiming::default(),
        );
        assert_eq!(repeat.outcome, Outcome::Ignored(IgnoreReason::Throttled));
        let t = d.tick(20);
        assert!(d.engine.handle(GestureEvent::moved(Some(p("a2")), t)).is_empty());
        let t = d.tick(20);
        assert!(d.engine.handle(GestureEvent::moved(None, t)).is_empty());
        assert_eq!(d.path(), path(&["a1", "a2"]));
    }

    #[test]
    fn test_fast_moves_to_new_cells_are_kept() {
        let mut e = engine();
        e.handle(GestureEvent::start(Some(p("a1")), 0));
        e.handle(GestureEvent::moved(Some(p("a2")), 10));
        e.handle(GestureEvent::moved(Some(p("a3")), 20));
        assert_eq!(e.path(), path(&["a1", "a2", "a3"]));
    }

    #[test]
    fn test_fast_drag_off_last_cell_cancels_tap_undo() {
        let mut e = engine();
        e.handle(GestureEvent::start(Some(p("a1")), 0));
        e.handle(GestureEvent::moved(Some(p("a2")), 20));
        e.handle(GestureEvent::end(40));
        // Press the last cell and leave it within the throttle window
        e.handle(GestureEvent::start(Some(p("a2")), 100));
        e.handle(GestureEvent::moved(Some(p("a3")), 105));
        e.handle(GestureEvent::end(150));
        assert_eq!(e.path(), path(&["a1", "a2", "a3"]));
    }

    #[test]
    fn test_phase_stays_selecting_after_release() {
        let mut d = Driver::new();
        d.drag(&["a1", "a2"]);
        assert!(!d.engine.is_dragging());
        assert_eq!(d.engine.phase(), SelectionPhase::Selecting);
        d.start("a3");
        assert!(d.engine.is_dragging());
        assert_eq!(d.engine.phase(), SelectionPhase::Selecting);
    }

    #[test]
    fn test_move_and_end_without_start_are_noops() {
        let mut d = Driver::new();
        assert!(d.to("a1").is_empty());
        assert!(d.end().is_empty());
        assert_eq!(d.engine.phase(), SelectionPhase::Idle);
    }

    #[test]
    fn test_start_off_board_clears() {
        let mut d = Driver::new();
        d.drag(&["a1", "a2"]);
        let t = d.tick(20);
        assert_eq!(
            d.engine.handle(GestureEvent::start(None, t)),
            vec![SelectionEvent::Reset]
        );
        assert!(d.path().is_empty());
    }

    #[test]
    fn test_locked_ignores_gestures_and_keeps_path() {
        let mut d = Driver::new();
        d.start("a1");
        d.to("a2");
        d.engine.lock();
        assert!(!d.engine.is_dragging());
        assert!(d.to("a3").is_empty());
        assert!(d.start("d4").is_empty());
        assert_eq!(d.path(), path(&["a1", "a2"]));
        assert_eq!(d.engine.phase(), SelectionPhase::Locked);

        d.engine.lock();
        assert!(d.engine.is_locked());
        d.engine.unlock();
        assert!(!d.engine.is_dragging());
        assert_eq!(d.engine.phase(), SelectionPhase::Selecting);
    }

    #[test]
    fn test_clear_refused_while_animating() {
        let mut d = Driver::new();
        d.start("a1");
        d.to("a2");
        d.engine.lock();
        d.engine.marks_mut().mark_found_temp([p("a1"), p("a2")]);
        d.engine.marks_mut().mark_pending_unused([p("a2")]);
        assert!(!d.engine.clear());
        assert_eq!(d.path(), path(&["a1", "a2"]));

        d.engine.unlock();
        d.engine.marks_mut().clear_all();
        assert!(d.engine.clear());
        assert!(d.path().is_empty());
    }

    #[test]
    fn test_clear_allowed_when_only_found_temp() {
        let mut d = Driver::new();
        d.drag(&["a1", "a2"]);
        d.engine.marks_mut().mark_found_temp([p("a1"), p("a2")]);
        assert!(d.engine.clear());
    }

    #[test]
    fn test_retiring_cells_are_not_targets() {
        let mut d = Driver::new();
        d.engine.marks_mut().mark_pending_unused([p("b2")]);
        assert!(d.start("b2").is_empty());
        assert!(!d.engine.is_dragging());

        d.start("a1");
        assert!(d.to("b2").is_empty());
        d.to("a2");
        assert_eq!(d.path(), path(&["a1", "a2"]));
    }

    #[test]
    fn test_start_clears_path_through_retiring_cell() {
        let mut d = Driver::new();
        d.drag(&["a1", "a2"]);
        d.engine.marks_mut().mark_pending_unused([p("a2")]);
        let events = d.start("c3");
        assert_eq!(
            events,
            vec![SelectionEvent::Reset, SelectionEvent::Changed(path(&["c3"]))]
        );
    }

    #[test]
    fn test_observer_sees_events_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut d = Driver::new();
        d.engine
            .set_observer(move |e: &SelectionEvent| sink.borrow_mut().push(e.clone()));
        d.start("a1");
        d.to("a2");
        d.to("a1");
        d.engine.clear();
        assert_eq!(
            *seen.borrow(),
            vec![
                SelectionEvent::Changed(path(&["a1"])),
                SelectionEvent::Changed(path(&["a1", "a2"])),
                SelectionEvent::Changed(path(&["a1"])),
                SelectionEvent::Reset,
            ]
        );
    }

    #[test]
    fn test_transition_is_pure() {
        let state = SelectionState::new();
        let marks = CellMarks::default();
        let timing = SelectionTiming::default();
        let input = SelectionInput::Gesture(GestureEvent::start(Some(p("b2")), 0));
        let first = transition(&state, input, &marks, &timing);
        let second = transition(&state, input, &marks, &timing);
        assert_eq!(first, second);
        assert!(state.path().is_empty());
        assert_eq!(first.state.path(), &[p("b2")]);
        assert_eq!(first.outcome, Outcome::Applied);
    }

    #[test]
    fn test_handle_pointer_hit_tests() {
        let mut e = engine();
        e.handle_pointer(GestureKind::Start, 5.0, 5.0, 0);
        e.handle_pointer(GestureKind::Move, 15.0, 15.0, 20);
        e.handle_pointer(GestureKind::End, 0.0, 0.0, 40);
        assert_eq!(e.path(), path(&["a1", "b2"]).as_slice());
    }

    #[test]
    fn test_invalid_geometry_fails_fast() {
        let err = SelectionEngine::new(
            BoardGeometry::new(0.0, 0.0, -1.0, 10.0),
            SelectionTiming::default(),
        );
        assert!(err.is_err());
    }
}
