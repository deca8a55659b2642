//! Events emitted by the engine for renderers and audio.
//!
//! Events are fire-and-forget: the engine queues them as state changes and the
//! frontend drains them once per frame with
//! [`GameState::drain_events`](crate::GameState::drain_events).

use serde::Serialize;

use crate::board::ClearedRows;
use crate::types::{PieceKind, RotationDir};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GameEvent {
    /// A new piece entered the board
    Spawned { kind: PieceKind },
    /// The active piece moved (input or gravity)
    Moved { dx: i8, dy: i8 },
    /// A rotation was attempted
    Rotated { direction: RotationDir, success: bool },
    /// A hard drop fell `rows` rows before locking
    HardDropped { rows: u8 },
    /// `kind` went into the hold slot
    Held {
        kind: PieceKind,
        released: Option<PieceKind>,
    },
    /// The active piece was committed to the board
    Locked { kind: PieceKind },
    /// Full rows were removed (pre-removal indices, bottom to top)
    LinesCleared { count: u8, rows: ClearedRows },
    LevelUp { level: u32 },
    Paused,
    Resumed,
    GameOver { score: u32 },
    Reset,
}
