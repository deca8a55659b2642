//! Piece module - the active tetromino and rotation with wall kicks

use serde::Serialize;

use crate::board::Board;
use crate::shapes::{kick_row, kick_table, MinoOffset, Shape};
use crate::types::{PieceKind, RotationDir, BOARD_WIDTH};

/// Active falling piece
///
/// `x`/`y` locate the top-left of the shape matrix on the board. `y` may be
/// negative right after a kick near the spawn area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub x: i8,
    pub y: i8,
    shape: Shape,
    rotation: u8,
}

/// Spawn column for a shape of the given width: centered, biased left.
pub fn spawn_x(width: u8) -> i8 {
    (BOARD_WIDTH / 2) as i8 - width.div_ceil(2) as i8
}

impl Piece {
    /// Create a new piece at its spawn position
    pub fn new(kind: PieceKind) -> Self {
        let shape = Shape::of(kind);
        Self {
            kind,
            x: spawn_x(shape.size()),
            y: 0,
            shape,
            rotation: 0,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Rotation index in `0..4` (0 = spawn orientation)
    pub fn rotation(&self) -> u8 {
        self.rotation
    }

    /// Absolute board coordinates of the four minos
    pub fn minos(&self) -> [MinoOffset; 4] {
        let mut out = self.shape.minos();
        for m in out.iter_mut() {
            m.0 += self.x;
            m.1 += self.y;
        }
        out
    }

    /// Check if the piece would collide after translating by (dx, dy)
    pub fn collides_at(&self, board: &Board, dx: i8, dy: i8) -> bool {
        board.collides(self.x + dx, self.y + dy, &self.shape)
    }

    /// Compute the rotated piece without touching `self`.
    ///
    /// Candidates from the kick table are tried in order; a positive table
    /// `dy` moves the piece up. Returns None when every candidate collides.
    pub fn try_rotate(&self, dir: RotationDir, board: &Board) -> Option<Piece> {
        let shape = self.shape.rotated(dir);
        let rotation = dir.apply(self.rotation);
        let kicks = &kick_table(self.kind)[kick_row(self.rotation, rotation, dir)];

        kicks.iter().find_map(|&(dx, dy)| {
            let x = self.x + dx;
            let y = self.y - dy;
            (!board.collides(x, y, &shape)).then_some(Piece {
                kind: self.kind,
                x,
                y,
                shape,
                rotation,
            })
        })
    }

    /// Rotate in place with wall kicks.
    ///
    /// On failure the piece is left exactly as it was and false is returned.
    pub fn rotate(&mut self, dir: RotationDir, board: &Board) -> bool {
        match self.try_rotate(dir, board) {
            Some(rotated) => {
                *self = rotated;
                true
            }
            None => false,
        }
    }
}
