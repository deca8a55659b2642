//! Shapes module - tetromino geometry and wall kick tables
//!
//! Every shape is a square boolean matrix sized to the piece's bounding box
//! (4 for I, 2 for O, 3 for the rest). Storage is a fixed 4x4 array with a
//! runtime dimension, so shapes are `Copy` and never allocate.

use serde::Serialize;

use crate::types::{PieceKind, RotationDir};

/// Largest matrix dimension (the I piece)
pub const MAX_SHAPE_SIZE: usize = 4;

/// Offset of a single mino relative to the matrix top-left, as `(col, row)`
pub type MinoOffset = (i8, i8);

/// Wall kick candidates, indexed by rotation state. Entry 0 is always `(0, 0)`.
pub type KickTable = [[(i8, i8); 5]; 4];

/// Kicks shared by J, L, S, T, Z (and O, whose rotation is a no-op)
pub const NORMAL_KICKS: KickTable = [
    [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
    [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
    [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
];

/// Kicks for the I piece
pub const I_KICKS: KickTable = [
    [(0, 0), (-2, 0), (1, 0), (-2, -1), (1, 2)],
    [(0, 0), (-1, 0), (2, 0), (-1, 2), (2, -1)],
    [(0, 0), (2, 0), (-1, 0), (2, 1), (-1, -2)],
    [(0, 0), (1, 0), (-2, 0), (1, -2), (-2, 1)],
];

/// Get the kick table for a piece kind
pub fn kick_table(kind: PieceKind) -> &'static KickTable {
    match kind {
        PieceKind::I => &I_KICKS,
        _ => &NORMAL_KICKS,
    }
}

/// Kick table row for a rotation.
///
/// Clockwise rotations read the row of the state being left, counter-clockwise
/// rotations the row of the state being entered.
pub fn kick_row(from: u8, to: u8, dir: RotationDir) -> usize {
    match dir {
        RotationDir::Cw => from as usize,
        RotationDir::Ccw => to as usize,
    }
}

/// Square occupancy matrix of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Shape {
    size: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Canonical spawn matrix for a kind
    pub fn of(kind: PieceKind) -> Self {
        let (size, rows): (u8, [[u8; 4]; 4]) = match kind {
            PieceKind::I => (4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
            PieceKind::O => (2, [[1, 1, 0, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
            PieceKind::T => (3, [[0, 1, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
            PieceKind::S => (3, [[0, 1, 1, 0], [1, 1, 0, 0], [0; 4], [0; 4]]),
            PieceKind::Z => (3, [[1, 1, 0, 0], [0, 1, 1, 0], [0; 4], [0; 4]]),
            PieceKind::J => (3, [[1, 0, 0, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
            PieceKind::L => (3, [[0, 0, 1, 0], [1, 1, 1, 0], [0; 4], [0; 4]]),
        };

        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (r, row) in rows.iter().enumerate() {
            for (c, &v) in row.iter().enumerate() {
                cells[r][c] = v != 0;
            }
        }
        Self { size, cells }
    }

    /// Matrix dimension (width == height)
    pub fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at `(row, col)` is filled; out of range is empty
    pub fn filled(&self, row: usize, col: usize) -> bool {
        let n = self.size as usize;
        row < n && col < n && self.cells[row][col]
    }

    /// The matrix rotated a quarter turn.
    ///
    /// Clockwise: `new[i][j] = old[n-1-j][i]`.
    /// Counter-clockwise: `new[i][j] = old[j][n-1-i]`.
    pub fn rotated(&self, dir: RotationDir) -> Self {
        let n = self.size as usize;
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (i, row) in cells.iter_mut().enumerate().take(n) {
            for (j, cell) in row.iter_mut().enumerate().take(n) {
                *cell = match dir {
                    RotationDir::Cw => self.cells[n - 1 - j][i],
                    RotationDir::Ccw => self.cells[j][n - 1 - i],
                };
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Filled cells as `(col, row)` offsets, row-major order
    pub fn minos(&self) -> [MinoOffset; 4] {
        let mut out = [(0, 0); 4];
        let mut i = 0;
        let n = self.size as usize;
        for row in 0..n {
            for col in 0..n {
                if self.cells[row][col] && i < out.len() {
                    out[i] = (col as i8, row as i8);
                    i += 1;
                }
            }
        }
        out
    }

    /// Number of filled cells (always 4 for shapes built by [`Shape::of`])
    pub fn count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }
}
