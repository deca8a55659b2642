//! Snapshot module - read-only views of a session for renderers and drivers

use arrayvec::ArrayVec;
use serde::Serialize;

use crate::piece::Piece;
use crate::shapes::MinoOffset;
use crate::types::{Phase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, NEXT_QUEUE_LEN};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: u8,
    pub x: i8,
    pub y: i8,
    /// Absolute board cells of the piece
    pub minos: [MinoOffset; 4],
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            rotation: value.rotation(),
            x: value.x,
            y: value.y,
            minos: value.minos(),
        }
    }
}

impl ActiveSnapshot {
    /// The piece's cells shifted down to `ghost_y`
    pub fn ghost_minos(&self, ghost_y: i8) -> [MinoOffset; 4] {
        let dy = ghost_y - self.y;
        self.minos.map(|(x, y)| (x, y + dy))
    }
}

/// Read-only view of a session, reusable across frames via
/// [`GameState::snapshot_into`](crate::GameState::snapshot_into).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Cell codes, 0 = empty, otherwise [`PieceKind::code`]
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i8>,
    pub hold: Option<PieceKind>,
    pub next_queue: ArrayVec<PieceKind, NEXT_QUEUE_LEN>,
    pub can_hold: bool,
    pub phase: Phase,
    pub paused: bool,
    pub game_over: bool,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub drop_interval_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.ghost_y = None;
        self.hold = None;
        self.next_queue.clear();
        self.can_hold = true;
        self.phase = Phase::Playing;
        self.paused = false;
        self.game_over = false;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.drop_interval_ms = 0;
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Playing
    }

    /// Kind at a board cell, if locked
    pub fn cell(&self, x: usize, y: usize) -> Option<PieceKind> {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .and_then(|&code| PieceKind::from_code(code))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            hold: None,
            next_queue: ArrayVec::new(),
            can_hold: true,
            phase: Phase::Playing,
            paused: false,
            game_over: false,
            score: 0,
            level: 1,
            lines: 0,
            drop_interval_ms: 0,
        }
    }
}
