//! Game state module - the session engine
//!
//! Ties together board, piece, queue, hold and scoring. The engine never
//! schedules anything itself: a frontend calls [`GameState::tick`] with the
//! elapsed time and feeds player input through the command methods (or
//! [`GameState::apply_action`]). Every command reports success as a bool;
//! blocked moves, failed rotations and commands in the wrong phase are normal
//! outcomes, not errors.

use std::collections::VecDeque;

use crate::board::Board;
use crate::events::GameEvent;
use crate::hold::HoldSlot;
use crate::piece::Piece;
use crate::rng::PieceQueue;
use crate::scoring::{calculate_drop_score, calculate_score, get_drop_interval_ms};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, Phase, PieceKind, RotationDir};

/// Events kept when the frontend stops draining; oldest are dropped first.
const EVENT_CAPACITY: usize = 64;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Piece>,
    queue: PieceQueue,
    hold: HoldSlot,
    score: u32,
    level: u32,
    lines: u32,
    phase: Phase,
    drop_timer_ms: u32,
    drop_interval_ms: u32,
    events: VecDeque<GameEvent>,
}

impl GameState {
    /// Create a session with the given RNG seed, already playing
    pub fn new(seed: u32) -> Self {
        let mut state = Self {
            board: Board::new(),
            active: None,
            queue: PieceQueue::new(seed),
            hold: HoldSlot::new(),
            score: 0,
            level: 1,
            lines: 0,
            phase: Phase::Playing,
            drop_timer_ms: 0,
            drop_interval_ms: get_drop_interval_ms(1),
            events: VecDeque::with_capacity(EVENT_CAPACITY),
        };
        state.reset();
        state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.hold.available()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold.piece()
    }

    pub fn next_queue(&self) -> &[PieceKind] {
        self.queue.peek()
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current gravity interval in milliseconds
    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    /// Seed that reproduces the upcoming piece sequence
    pub fn seed(&self) -> u32 {
        self.queue.seed()
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> std::collections::vec_deque::Drain<'_, GameEvent> {
        self.events.drain(..)
    }

    fn emit(&mut self, event: GameEvent) {
        if self.events.len() == EVENT_CAPACITY {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost_y = self.ghost_y();
        out.hold = self.hold.piece();
        out.next_queue.clear();
        for &kind in self.queue.peek() {
            out.next_queue.push(kind);
        }
        out.can_hold = self.hold.available();
        out.phase = self.phase;
        out.paused = self.paused();
        out.game_over = self.game_over();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Start a new game: empty board, zeroed counters, fresh queue and hold.
    pub fn reset(&mut self) {
        self.board.clear();
        self.active = None;
        self.queue.clear();
        self.hold.clear();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_timer_ms = 0;
        self.drop_interval_ms = get_drop_interval_ms(self.level);
        self.phase = Phase::Playing;
        self.events.clear();
        self.emit(GameEvent::Reset);
        log::debug!("new game, rng state {}", self.queue.seed());

        self.queue.fill();
        self.spawn_piece();
    }

    /// Spawn the next piece from the queue and re-open the hold gate.
    ///
    /// Returns false (and ends the game) if the spawn position is blocked.
    fn spawn_piece(&mut self) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        let kind = self.queue.pop();
        self.hold.rearm();
        self.enter(Piece::new(kind))
    }

    /// Make `piece` the active piece, ending the game if it does not fit.
    fn enter(&mut self, piece: Piece) -> bool {
        self.active = Some(piece);
        if piece.collides_at(&self.board, 0, 0) {
            self.end_game();
            return false;
        }
        log::trace!("spawned {:?}", piece.kind);
        self.emit(GameEvent::Spawned { kind: piece.kind });
        true
    }

    fn end_game(&mut self) {
        self.phase = Phase::GameOver;
        log::debug!(
            "game over: score {} level {} lines {}",
            self.score,
            self.level,
            self.lines
        );
        self.emit(GameEvent::GameOver { score: self.score });
    }

    fn is_playing(&self) -> bool {
        self.phase == Phase::Playing && self.active.is_some()
    }

    /// Translate the active piece, no-op on collision
    fn shift(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.collides_at(&self.board, dx, dy) {
            return false;
        }
        active.x += dx;
        active.y += dy;
        self.emit(GameEvent::Moved { dx, dy });
        true
    }

    /// Move the active piece sideways by `dx` columns
    pub fn move_piece(&mut self, dx: i8) -> bool {
        if !self.is_playing() {
            return false;
        }
        self.shift(dx, 0)
    }

    /// Move down one row for a small bonus. Never locks.
    pub fn soft_drop(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        if self.shift(0, 1) {
            self.score = self.score.saturating_add(calculate_drop_score(1, false));
            return true;
        }
        false
    }

    /// Drop to the landing row, award the per-row bonus and lock immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        let mut rows: u8 = 0;
        while !active.collides_at(&self.board, 0, rows as i8 + 1) {
            rows += 1;
        }
        active.y += rows as i8;

        self.score = self
            .score
            .saturating_add(calculate_drop_score(rows as u32, true));
        self.emit(GameEvent::HardDropped { rows });
        self.lock_piece();
        true
    }

    /// Rotate with wall kicks; a failed rotation leaves the piece untouched
    pub fn rotate(&mut self, direction: RotationDir) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let success = active.rotate(direction, &self.board);
        self.emit(GameEvent::Rotated { direction, success });
        success
    }

    /// Swap the active piece with the hold slot (once per spawn)
    pub fn hold(&mut self) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };
        let Some(released) = self.hold.swap(active.kind) else {
            return false;
        };

        log::trace!("held {:?}, released {:?}", active.kind, released);
        self.emit(GameEvent::Held {
            kind: active.kind,
            released,
        });

        // The gate stays closed: only a lock-driven spawn re-opens it.
        let next = match released {
            Some(kind) => kind,
            None => self.queue.pop(),
        };
        self.enter(Piece::new(next));
        true
    }

    /// Toggle between playing and paused. Ignored after game over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            Phase::Playing => {
                self.phase = Phase::Paused;
                self.emit(GameEvent::Paused);
            }
            Phase::Paused => {
                self.phase = Phase::Playing;
                self.emit(GameEvent::Resumed);
            }
            Phase::GameOver => return false,
        }
        true
    }

    /// Lock the active piece onto the board and handle line clears
    fn lock_piece(&mut self) {
        if !self.is_playing() {
            return;
        }
        let Some(piece) = self.active.take() else {
            return;
        };

        self.board.lock(&piece);
        self.emit(GameEvent::Locked { kind: piece.kind });

        let cleared_rows = self.board.clear_full_rows();
        let lines_cleared = cleared_rows.len();

        if lines_cleared > 0 {
            let result = calculate_score(lines_cleared, self.lines, self.level);
            self.score = self.score.saturating_add(result.line_clear_score);
            self.lines = result.lines;
            log::debug!(
                "cleared {} line(s) for {} points, {} total",
                lines_cleared,
                result.line_clear_score,
                self.lines
            );
            self.emit(GameEvent::LinesCleared {
                count: lines_cleared as u8,
                rows: cleared_rows,
            });

            if result.level > self.level {
                self.level = result.level;
                self.drop_interval_ms = get_drop_interval_ms(self.level);
                log::debug!(
                    "level {} (gravity {}ms)",
                    self.level,
                    self.drop_interval_ms
                );
                self.emit(GameEvent::LevelUp { level: self.level });
            }
        }

        self.spawn_piece();
    }

    /// Row the active piece would land on if dropped straight down
    pub fn ghost_y(&self) -> Option<i8> {
        let active = self.active?;

        let mut drop_distance: i8 = 0;
        while !active.collides_at(&self.board, 0, drop_distance + 1) {
            drop_distance += 1;
        }

        Some(active.y + drop_distance)
    }

    /// Advance the gravity clock.
    ///
    /// Once the accumulated time exceeds the drop interval the piece falls one
    /// row, or locks if it cannot. Returns true when gravity acted.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.is_playing() {
            return false;
        }

        self.drop_timer_ms = self.drop_timer_ms.saturating_add(elapsed_ms);
        if self.drop_timer_ms <= self.drop_interval_ms {
            return false;
        }
        self.drop_timer_ms = 0;

        if !self.shift(0, 1) {
            self.lock_piece();
        }
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(-1),
            GameAction::MoveRight => self.move_piece(1),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate(RotationDir::Cw),
            GameAction::RotateCcw => self.rotate(RotationDir::Ccw),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.toggle_pause(),
            GameAction::Restart => {
                self.reset();
                true
            }
        }
    }

    /// Apply an action by name; unknown names are ignored.
    pub fn apply_command(&mut self, name: &str) -> bool {
        match GameAction::from_str(name.trim()) {
            Some(action) => self.apply_action(action),
            None => false,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Session whose active piece is replaced by `kind` at its spawn position.
    fn with_active(kind: PieceKind) -> GameState {
        let mut state = GameState::new(12345);
        state.active = Some(Piece::new(kind));
        state.events.clear();
        state
    }

    fn fill_row_except(state: &mut GameState, y: i8, open: &[i8]) {
        for x in 0..10 {
            if !open.contains(&x) {
                state.board_mut().set(x, y, Some(PieceKind::J));
            }
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345);

        assert_eq!(state.phase(), Phase::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.level(), 1);
        assert_eq!(state.lines(), 0);
        assert_eq!(state.drop_interval_ms(), 1000);
        assert!(state.active().is_some());
        assert!(state.hold_piece().is_none());
        assert!(state.can_hold());
        assert_eq!(state.next_queue().len(), 3);
    }

    #[test]
    fn test_move_blocked_by_wall() {
        let mut state = with_active(PieceKind::O);
        for _ in 0..4 {
            assert!(state.move_piece(-1));
        }
        assert_eq!(state.active().unwrap().x, 0);
        assert!(!state.move_piece(-1));
        assert_eq!(state.active().unwrap().x, 0);
    }

    #[test]
    fn test_soft_drop_scoring() {
        let mut state = with_active(PieceKind::T);
        assert!(state.soft_drop());
        assert_eq!(state.score(), 1);
        assert_eq!(state.active().unwrap().y, 1);
    }

    #[test]
    fn test_soft_drop_at_floor_does_not_lock() {
        let mut state = with_active(PieceKind::T);
        state.active.as_mut().unwrap().y = 18;
        let before = state.active();

        assert!(!state.soft_drop());
        assert_eq!(state.active(), before);
        assert_eq!(state.score(), 0);
        assert!(state.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_hard_drop_awards_two_per_row_and_locks() {
        let mut state = with_active(PieceKind::T);
        assert!(state.hard_drop());

        assert_eq!(state.score(), 36);
        assert!(state.board().is_occupied(4, 18));
        assert!(state.board().is_occupied(3, 19));

        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(events[0], GameEvent::HardDropped { rows: 18 });
        assert_eq!(events[1], GameEvent::Locked { kind: PieceKind::T });
        assert!(matches!(events[2], GameEvent::Spawned { .. }));
    }

    #[test]
    fn test_o_piece_into_left_gap_clears_one_line() {
        let mut state = with_active(PieceKind::O);
        fill_row_except(&mut state, 19, &[0, 1]);
        for _ in 0..4 {
            assert!(state.move_piece(-1));
        }

        assert!(state.hard_drop());

        assert_eq!(state.lines(), 1);
        assert_eq!(state.score(), 18 * 2 + 100);
        // The O's upper half slid into the bottom row.
        assert!(state.board().is_occupied(0, 19));
        assert!(state.board().is_occupied(1, 19));
        assert!(!state.board().is_occupied(2, 19));

        let cleared = state.drain_events().find_map(|e| match e {
            GameEvent::LinesCleared { count, rows } => Some((count, rows)),
            _ => None,
        });
        let (count, rows) = cleared.unwrap();
        assert_eq!(count, 1);
        assert_eq!(rows.as_slice(), &[19]);
    }

    #[test]
    fn test_tetris_scales_with_level() {
        let mut state = with_active(PieceKind::I);
        state.lines = 20;
        state.level = 3;
        for y in 16..20 {
            fill_row_except(&mut state, y, &[0]);
        }

        // Vertical I uses matrix column 2; park it over column 0.
        assert!(state.rotate(RotationDir::Cw));
        for _ in 0..5 {
            assert!(state.move_piece(-1));
        }
        assert_eq!(state.active().unwrap().x, -2);

        assert!(state.hard_drop());
        assert_eq!(state.lines(), 24);
        assert_eq!(state.level(), 3);
        assert_eq!(state.score(), 16 * 2 + 800 * 3);
        assert!(state.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_level_up_at_ten_lines() {
        let mut state = with_active(PieceKind::O);
        state.lines = 9;
        fill_row_except(&mut state, 19, &[4, 5]);

        assert!(state.hard_drop());

        assert_eq!(state.lines(), 10);
        assert_eq!(state.level(), 2);
        assert_eq!(state.drop_interval_ms(), 900);
        // Points use the level in force before the clear.
        assert_eq!(state.score(), 36 + 100);
        assert!(state
            .drain_events()
            .any(|e| e == GameEvent::LevelUp { level: 2 }));
    }

    #[test]
    fn test_blocked_spawn_ends_game_without_touching_board() {
        let mut state = GameState::new(12345);
        // Rows 0 and 1 blocked in the spawn columns but not full.
        for x in 2..8 {
            state.board_mut().set(x, 0, Some(PieceKind::S));
            state.board_mut().set(x, 1, Some(PieceKind::S));
        }
        let board_before = state.board().clone();

        assert!(!state.spawn_piece());
        assert!(state.game_over());
        assert_eq!(state.board(), &board_before);
        assert!(state
            .drain_events()
            .any(|e| matches!(e, GameEvent::GameOver { .. })));

        // Terminal until reset.
        assert!(!state.move_piece(1));
        assert!(!state.hard_drop());
        assert!(!state.toggle_pause());
        assert!(!state.tick(5000));
        assert_eq!(state.board(), &board_before);

        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.phase(), Phase::Playing);
        assert!(state.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_lock_and_spawn_ignored_while_paused() {
        let mut state = with_active(PieceKind::T);
        assert!(state.toggle_pause());
        let board_before = state.board().clone();
        let active_before = state.active();

        state.lock_piece();
        assert!(!state.spawn_piece());

        assert_eq!(state.board(), &board_before);
        assert_eq!(state.active(), active_before);
        assert!(state.paused());
        assert_eq!(state.drain_events().count(), 1); // the Paused event
    }

    #[test]
    fn test_lock_and_spawn_ignored_after_game_over() {
        let mut state = GameState::new(12345);
        while !state.game_over() {
            assert!(state.hard_drop());
        }
        let board_before = state.board().clone();
        let active_before = state.active();
        state.events.clear();

        state.lock_piece();
        assert!(!state.spawn_piece());

        assert_eq!(state.board(), &board_before);
        assert_eq!(state.active(), active_before);
        assert!(state.game_over());
        assert_eq!(state.drain_events().count(), 0);
    }

    #[test]
    fn test_blocked_hold_swap_ends_game() {
        let mut state = GameState::new(12345);
        assert!(state.hold());
        assert!(state.hold_piece().is_some());
        assert!(state.hard_drop());
        assert!(state.can_hold());

        // Block the spawn rows without completing them.
        for x in 2..8 {
            state.board_mut().set(x, 0, Some(PieceKind::S));
            state.board_mut().set(x, 1, Some(PieceKind::S));
        }
        let board_before = state.board().clone();
        state.events.clear();

        assert!(state.hold());

        assert!(state.game_over());
        assert_eq!(state.board(), &board_before);
        assert!(state
            .drain_events()
            .any(|e| matches!(e, GameEvent::GameOver { .. })));
        assert!(!state.move_piece(1));
        assert!(!state.hold());
    }

    #[test]
    fn test_hold_with_empty_slot_takes_from_queue() {
        let mut state = GameState::new(12345);
        let initial_kind = state.active().unwrap().kind;
        let next_in_queue = state.next_queue()[0];

        assert!(state.hold());
        assert_eq!(state.hold_piece(), Some(initial_kind));
        assert_eq!(state.active().unwrap().kind, next_in_queue);
        assert_eq!(state.next_queue().len(), 3);
        assert!(!state.can_hold());
    }

    #[test]
    fn test_second_hold_is_ignored() {
        let mut state = GameState::new(12345);
        assert!(state.hold());
        let active = state.active();
        let held = state.hold_piece();
        let queue = state.next_queue().to_vec();

        assert!(!state.hold());
        assert_eq!(state.active(), active);
        assert_eq!(state.hold_piece(), held);
        assert_eq!(state.next_queue(), queue.as_slice());
    }

    #[test]
    fn test_hold_swap_resets_to_spawn_position() {
        let mut state = GameState::new(12345);
        let first = state.active().unwrap().kind;
        assert!(state.hold());
        assert!(state.hard_drop());
        assert!(state.can_hold());

        let second = state.active().unwrap().kind;
        state.soft_drop();
        state.move_piece(1);
        assert!(state.hold());

        assert_eq!(state.active(), Some(Piece::new(first)));
        assert_eq!(state.hold_piece(), Some(second));
    }

    #[test]
    fn test_pause_freezes_gravity_and_input() {
        let mut state = with_active(PieceKind::T);
        assert!(state.toggle_pause());
        assert!(state.paused());

        for _ in 0..200 {
            assert!(!state.tick(16));
        }
        assert!(!state.move_piece(1));
        assert!(!state.rotate(RotationDir::Cw));
        assert!(!state.hold());
        assert_eq!(state.active(), Some(Piece::new(PieceKind::T)));

        assert!(state.toggle_pause());
        assert_eq!(state.phase(), Phase::Playing);
        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(events, vec![GameEvent::Paused, GameEvent::Resumed]);
    }

    #[test]
    fn test_tick_gravity_needs_interval_exceeded() {
        let mut state = with_active(PieceKind::T);
        assert!(!state.tick(1000));
        assert_eq!(state.active().unwrap().y, 0);
        assert!(state.tick(1));
        assert_eq!(state.active().unwrap().y, 1);
        // Accumulator restarts after each step.
        assert!(!state.tick(600));
        assert!(state.tick(401));
        assert_eq!(state.active().unwrap().y, 2);
    }

    #[test]
    fn test_tick_locks_grounded_piece() {
        let mut state = with_active(PieceKind::T);
        state.active.as_mut().unwrap().y = 18;

        assert!(state.tick(1001));
        assert!(state.board().is_occupied(4, 18));
        assert_eq!(state.score(), 0);
        assert!(state
            .drain_events()
            .any(|e| e == GameEvent::Locked { kind: PieceKind::T }));
    }

    #[test]
    fn test_failed_rotation_emits_event() {
        let mut state = with_active(PieceKind::I);
        let own = state.active().unwrap().minos();
        for y in 0..20 {
            for x in 0..10 {
                if !own.contains(&(x, y)) {
                    state.board_mut().set(x, y, Some(PieceKind::Z));
                }
            }
        }

        assert!(!state.rotate(RotationDir::Ccw));
        assert_eq!(state.active(), Some(Piece::new(PieceKind::I)));
        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(
            events,
            vec![GameEvent::Rotated {
                direction: RotationDir::Ccw,
                success: false
            }]
        );
    }

    #[test]
    fn test_ghost_y() {
        let state = with_active(PieceKind::T);
        assert_eq!(state.ghost_y(), Some(18));

        let state = with_active(PieceKind::I);
        assert_eq!(state.ghost_y(), Some(18));
    }

    #[test]
    fn test_unknown_command_is_ignored() {
        let mut state = with_active(PieceKind::T);
        assert!(!state.apply_command("teleport"));
        assert!(!state.apply_command(""));
        assert_eq!(state.active(), Some(Piece::new(PieceKind::T)));

        assert!(state.apply_command(" moveRight "));
        assert_eq!(state.active().unwrap().x, 4);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = with_active(PieceKind::O);
        state.board_mut().set(0, 19, Some(PieceKind::L));
        let snap = state.snapshot();

        assert_eq!(snap.cell(0, 19), Some(PieceKind::L));
        assert_eq!(snap.active.unwrap().kind, PieceKind::O);
        assert_eq!(snap.ghost_y, Some(18));
        assert_eq!(snap.next_queue.as_slice(), state.next_queue());
        assert!(snap.playable());
        assert_eq!(snap.level, 1);
        assert_eq!(snap.drop_interval_ms, 1000);
    }

    #[test]
    fn test_event_buffer_is_bounded() {
        let mut state = with_active(PieceKind::T);
        for _ in 0..(EVENT_CAPACITY * 2) {
            state.rotate(RotationDir::Cw);
        }
        assert_eq!(state.drain_events().count(), EVENT_CAPACITY);
    }
}
