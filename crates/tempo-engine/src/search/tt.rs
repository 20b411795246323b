//! Transposition table keyed by FEN.
//!
//! Each position keeps one entry per searched depth. A probe at depth `d`
//! is answered by the deepest stored entry whose depth is at least `d`, so
//! a deeper result always serves a shallower request.

use std::collections::{BTreeMap, HashMap};

/// How a stored score relates to the true value of the position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// The score is exact (searched inside the window).
    Exact,
    /// The score is a lower bound (failed high).
    Lower,
    /// The score is an upper bound (failed low).
    Upper,
}

/// A stored search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TtEntry {
    /// Score from the perspective of the side to move.
    pub score: i32,
    /// Remaining depth the score was searched to.
    pub depth: u8,
    pub bound: Bound,
}

/// Per-search cache of scored positions.
#[derive(Debug, Default)]
pub struct TranspositionTable {
    entries: HashMap<String, BTreeMap<u8, (i32, Bound)>>,
    len: usize,
}

impl TranspositionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Deepest entry for `fen` searched to at least `depth`.
    pub fn probe(&self, fen: &str, depth: u8) -> Option<TtEntry> {
        let (&stored, &(score, bound)) = self.entries.get(fen)?.range(depth..).next_back()?;
        Some(TtEntry {
            score,
            depth: stored,
            bound,
        })
    }

    /// Store a result, replacing any earlier entry for the same `(fen, depth)`.
    pub fn store(&mut self, fen: &str, depth: u8, score: i32, bound: Bound) {
        let by_depth = self.entries.entry(fen.to_string()).or_default();
        if by_depth.insert(depth, (score, bound)).is_none() {
            self.len += 1;
        }
    }

    /// Number of `(fen, depth)` entries.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drop every entry, keeping the allocation.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.len = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn empty_table_misses() {
        let tt = TranspositionTable::new();
        assert!(tt.is_empty());
        assert_eq!(tt.probe(FEN, 0), None);
    }

    #[test]
    fn same_or_shallower_depth_hits() {
        let mut tt = TranspositionTable::new();
        tt.store(FEN, 4, 37, Bound::Exact);

        for depth in 0..=4 {
            let entry = tt.probe(FEN, depth).unwrap();
            assert_eq!(entry.score, 37);
            assert_eq!(entry.depth, 4);
            assert_eq!(entry.bound, Bound::Exact);
        }
        assert_eq!(tt.probe(FEN, 5), None);
    }

    #[test]
    fn deepest_entry_wins() {
        let mut tt = TranspositionTable::new();
        tt.store(FEN, 2, 10, Bound::Exact);
        tt.store(FEN, 6, 60, Bound::Lower);
        tt.store(FEN, 4, 40, Bound::Upper);

        assert_eq!(tt.probe(FEN, 1).map(|e| e.score), Some(60));
        assert_eq!(tt.probe(FEN, 5).map(|e| e.bound), Some(Bound::Lower));
        assert_eq!(tt.probe(FEN, 7), None);
        assert_eq!(tt.len(), 3);
    }

    #[test]
    fn store_overwrites_same_depth() {
        let mut tt = TranspositionTable::new();
        tt.store(FEN, 3, 100, Bound::Lower);
        tt.store(FEN, 3, -20, Bound::Exact);
        assert_eq!(tt.len(), 1);
        let entry = tt.probe(FEN, 3).unwrap();
        assert_eq!((entry.score, entry.bound), (-20, Bound::Exact));
    }

    #[test]
    fn positions_are_independent() {
        let mut tt = TranspositionTable::new();
        tt.store(FEN, 3, 5, Bound::Exact);
        let other = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
        assert_eq!(tt.probe(other, 0), None);
    }

    #[test]
    fn clear_empties() {
        let mut tt = TranspositionTable::new();
        tt.store(FEN, 1, 1, Bound::Exact);
        tt.clear();
        assert!(tt.is_empty());
        assert_eq!(tt.probe(FEN, 1), None);
    }
}
