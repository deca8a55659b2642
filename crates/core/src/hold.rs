//! Hold slot - one stored piece kind, usable once per spawn.

use crate::types::PieceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldSlot {
    piece: Option<PieceKind>,
    available: bool,
}

impl HoldSlot {
    pub fn new() -> Self {
        Self {
            piece: None,
            available: true,
        }
    }

    pub fn piece(&self) -> Option<PieceKind> {
        self.piece
    }

    /// Whether a hold is allowed for the current piece
    pub fn available(&self) -> bool {
        self.available
    }

    /// Re-open the gate (called on every spawn)
    pub fn rearm(&mut self) {
        self.available = true;
    }

    /// Store `kind` and close the gate.
    ///
    /// Returns None when the gate is closed, otherwise the previously held kind
    /// (`Some(None)` when the slot was empty).
    pub fn swap(&mut self, kind: PieceKind) -> Option<Option<PieceKind>> {
        if !self.available {
            return None;
        }
        self.available = false;
        Some(self.piece.replace(kind))
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

impl Default for HoldSlot {
    fn default() -> Self {
        Self::new()
    }
}
