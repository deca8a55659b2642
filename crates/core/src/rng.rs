//! RNG module - uniform random piece queue
//!
//! Every upcoming piece is an independent, uniformly random draw over the seven
//! kinds. There is deliberately no 7-bag: streaks and droughts are possible.
//!
//! Also provides a simple LCG so a session is reproducible from its seed.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, NEXT_QUEUE_LEN};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high half of the state; the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        (self.next_u32() >> 16) % max
    }

    /// Current internal state
    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Lookahead queue of upcoming piece kinds
#[derive(Debug, Clone)]
pub struct PieceQueue {
    pending: ArrayVec<PieceKind, NEXT_QUEUE_LEN>,
    rng: SimpleRng,
}

impl PieceQueue {
    /// Create an empty queue with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            pending: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    fn random_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }

    /// Top the queue up to the full lookahead
    pub fn fill(&mut self) {
        while !self.pending.is_full() {
            let kind = self.random_kind();
            self.pending.push(kind);
        }
    }

    /// Take the front piece and replenish
    pub fn pop(&mut self) -> PieceKind {
        self.fill();
        let kind = self.pending.remove(0);
        self.fill();
        kind
    }

    /// Upcoming kinds, front first
    pub fn peek(&self) -> &[PieceKind] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Drop all pending kinds. The RNG keeps its state, so the next game differs.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Get the current RNG state (for restarting a session with the same sequence)
    pub fn seed(&self) -> u32 {
        self.rng.state()
    }
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
