//! Shared types - piece kinds, commands, phases and rule constants
//!
//! Everything here is plain data with no game logic, so it can be used by the
//! engine, the terminal frontend and the trace driver alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval used by the terminal runner |
//! | `BASE_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Gravity floor |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, RotationDir, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(RotationDir::Cw.sign(), 1);
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use serde::{Deserialize, Serialize};

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level
pub const DROP_STEP_MS: u32 = 100;

/// Fastest gravity interval
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Cleared lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Number of upcoming pieces kept in the preview queue
pub const NEXT_QUEUE_LEN: usize = 3;

/// Points per row for a soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row for a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Line clear scoring table
///
/// Base points for clearing N lines, multiplied by the current level:
/// - 1 line: 100
/// - 2 lines: 300
/// - 3 lines: 500
/// - 4 lines: 800
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven tetromino piece kinds
///
/// The kind doubles as the color identity of a locked cell:
/// - **I**: Cyan
/// - **O**: Yellow
/// - **T**: Magenta
/// - **S**: Green
/// - **Z**: Red
/// - **J**: Blue
/// - **L**: Orange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }

    /// Non-zero cell code used by snapshot grids (0 means empty).
    pub fn code(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    /// Main display color as `(r, g, b)`.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PieceKind::I => (0x00, 0xf5, 0xff),
            PieceKind::O => (0xff, 0xeb, 0x3b),
            PieceKind::T => (0xe0, 0x40, 0xfb),
            PieceKind::S => (0x69, 0xf0, 0xae),
            PieceKind::Z => (0xff, 0x52, 0x52),
            PieceKind::J => (0x44, 0x8a, 0xff),
            PieceKind::L => (0xff, 0x91, 0x00),
        }
    }
}

/// Rotation direction
///
/// Clockwise is `+1` and counter-clockwise is `-1` on the rotation index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationDir {
    Cw,
    Ccw,
}

impl RotationDir {
    pub fn sign(&self) -> i8 {
        match self {
            RotationDir::Cw => 1,
            RotationDir::Ccw => -1,
        }
    }

    /// Apply this direction to a rotation index, wrapping into `0..4`.
    ///
    /// ```
    /// use blockfall_types::RotationDir;
    ///
    /// assert_eq!(RotationDir::Cw.apply(3), 0);
    /// assert_eq!(RotationDir::Ccw.apply(0), 3);
    /// ```
    pub fn apply(&self, rotation: u8) -> u8 {
        ((rotation as i8 + self.sign() + 4) % 4) as u8
    }
}

/// Session phase
///
/// `Playing` is entered on reset, `GameOver` is left only by another reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Playing,
    Paused,
    GameOver,
}

/// Commands accepted from an input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring)
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Hold current piece (once per spawn)
    Hold,
    /// Toggle pause state
    Pause,
    /// Start a new game
    Restart,
}

impl GameAction {
    /// Parse action from its command name (case-insensitive)
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("ROTATECCW"), Some(GameAction::RotateCcw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Locked cell, colored by the kind that left it
pub type Cell = Option<PieceKind>;
