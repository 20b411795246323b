//! Killer move table and history heuristic for quiet move ordering.
//!
//! Both tables identify a move by its origin/destination pair
//! ([`Move::key`]), so a killer found in one branch also matches the same
//! move in a sibling branch where it captures or promotes differently.

use tempo_core::Move;

use crate::search::negamax::MAX_PLY;

/// Two killer moves per ply: quiet moves that caused beta cutoffs.
pub struct KillerTable {
    slots: [[Option<u16>; 2]; MAX_PLY],
}

impl KillerTable {
    /// Create an empty killer table.
    pub fn new() -> Self {
        Self {
            slots: [[None; 2]; MAX_PLY],
        }
    }

    /// Remember `mv` as a killer at `ply`.
    ///
    /// Shifts slot 0 to slot 1 if the new move differs from slot 0.
    pub fn record(&mut self, ply: usize, mv: &Move) {
        let Some(slots) = self.slots.get_mut(ply) else {
            return;
        };
        let key = Some(mv.key());
        if slots[0] != key {
            slots[1] = slots[0];
            slots[0] = key;
        }
    }

    /// Check if a move is a killer at the given ply.
    pub fn is_killer(&self, ply: usize, mv: &Move) -> bool {
        let key = Some(mv.key());
        self.slots
            .get(ply)
            .is_some_and(|slots| slots[0] == key || slots[1] == key)
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// History weights indexed by [`Move::key`].
pub struct HistoryTable {
    table: Box<[i32; 64 * 64]>,
}

impl HistoryTable {
    /// Create a zeroed history table.
    pub fn new() -> Self {
        Self {
            table: Box::new([0; 64 * 64]),
        }
    }

    /// Reward a quiet move that raised alpha, by `depth²`.
    pub fn record(&mut self, mv: &Move, depth: u8) {
        let bonus = i32::from(depth) * i32::from(depth);
        let entry = &mut self.table[mv.key() as usize];
        *entry = entry.saturating_add(bonus);
    }

    /// Get the history score for a move.
    pub fn score(&self, mv: &Move) -> i32 {
        self.table[mv.key() as usize]
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}
