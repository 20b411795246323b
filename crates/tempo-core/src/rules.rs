//! The rules-provider contract the search is written against.

use std::ops::{Deref, DerefMut};

use tracing::error;

use crate::chess_move::Move;
use crate::color::Color;
use crate::error::RulesError;
use crate::piece::Piece;
use crate::square::Square;

/// Everything the engine needs to know about chess.
///
/// Implementations own a single mutable position. The search walks the
/// tree by calling [`apply`](Rules::apply) and [`undo`](Rules::undo) on it
/// in strict pairs, so `undo` must restore the previous state exactly.
pub trait Rules {
    /// All legal moves in the current position.
    fn legal_moves(&self) -> Vec<Move>;

    /// Number of legal moves; implementations may count without allocating.
    fn legal_move_count(&self) -> usize {
        self.legal_moves().len()
    }

    /// Play `mv` in place. Fails without changing the position if `mv` is illegal.
    fn apply(&mut self, mv: &Move) -> Result<(), RulesError>;

    /// Take back the most recently applied move and return it.
    fn undo(&mut self) -> Result<Move, RulesError>;

    fn side_to_move(&self) -> Color;

    /// Whether the side to move is in check.
    fn is_check(&self) -> bool;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    /// Checkmate, stalemate, or any drawn-by-rule condition the provider knows about.
    fn is_game_over(&self) -> bool;

    /// Whether playing `mv` would put the opponent in check.
    ///
    /// Must not change the position.
    fn gives_check(&self, mv: &Move) -> Result<bool, RulesError>;

    fn piece_at(&self, sq: Square) -> Option<Piece>;

    /// Six-field FEN of the current position, used as a cache identifier.
    fn fen(&self) -> String;

    /// Standard algebraic notation for a legal move in the current position.
    fn san(&self, mv: &Move) -> Result<String, RulesError>;
}

/// A move applied to a position for the lifetime of this guard.
///
/// Dropping the guard undoes the move, so early returns and `?` inside a
/// search frame can never leave the position one ply deeper than expected.
pub struct Applied<'a, R: Rules + ?Sized> {
    position: &'a mut R,
}

impl<'a, R: Rules + ?Sized> Applied<'a, R> {
    /// Apply `mv` to `position`; the move is undone when the guard drops.
    pub fn new(position: &'a mut R, mv: &Move) -> Result<Self, RulesError> {
        position.apply(mv)?;
        Ok(Self { position })
    }
}

impl<R: Rules + ?Sized> Deref for Applied<'_, R> {
    type Target = R;

    fn deref(&self) -> &R {
        self.position
    }
}

impl<R: Rules + ?Sized> DerefMut for Applied<'_, R> {
    fn deref_mut(&mut self) -> &mut R {
        self.position
    }
}

impl<R: Rules + ?Sized> Drop for Applied<'_, R> {
    fn drop(&mut self) {
        if let Err(err) = self.position.undo() {
            error!(error = %err, "failed to undo guarded move");
        }
    }
}
