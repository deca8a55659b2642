//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the falling-block game: the board, the seven
//! piece shapes with kicked rotation, the upcoming-piece queue, the hold slot,
//! scoring and the session state machine. It does no I/O and never reads a
//! clock; frontends drive it with elapsed milliseconds and player commands.
//!
//! - **Deterministic**: the same seed and command sequence give the same game
//! - **Allocation-free hot paths**: board, queue and snapshots use fixed buffers
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid, collision and row clearing
//! - [`shapes`]: piece matrices, matrix rotation and kick tables
//! - [`piece`]: the falling piece and kicked rotation
//! - [`rng`]: seeded generator and the three-piece preview queue
//! - [`hold`]: the once-per-spawn hold slot
//! - [`scoring`]: line points, drop bonuses, level and gravity speed
//! - [`game_state`]: the session engine
//! - [`snapshot`]: read-only views for renderers
//! - [`events`]: notifications drained by frontends
//!
//! # Rules
//!
//! - Pieces are drawn uniformly at random; three are visible ahead.
//! - Rotation tries the naive position then four kick offsets; if all collide
//!   the piece does not rotate.
//! - Clearing 1-4 lines scores 100/300/500/800 times the current level.
//!   Soft drop gives 1 point per row, hard drop 2 per row and locks at once.
//! - The level is `lines / 10 + 1`; gravity starts at 1000ms and speeds up by
//!   100ms per level down to 100ms.
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Gravity acts once the accumulated time exceeds the
//! current drop interval.

pub mod board;
pub mod events;
pub mod game_state;
pub mod hold;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use events::GameEvent;
pub use game_state::GameState;
pub use hold::HoldSlot;
pub use piece::Piece;
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{
    calculate_drop_score, calculate_level, calculate_line_score, calculate_score,
    get_drop_interval_ms, ScoreResult,
};
pub use shapes::{MinoOffset, Shape};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
