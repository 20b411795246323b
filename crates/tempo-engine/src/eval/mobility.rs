//! Mobility of the side to move.

use tempo_core::Rules;

/// Centipawns per legal move.
pub const MOBILITY_WEIGHT: i32 = 10;

/// `MOBILITY_WEIGHT` times the number of legal moves, positive when White
/// is to move and negative when Black is.
///
/// Only the mover's moves are counted; generating the opponent's would
/// need a null move, which the rules interface does not offer.
pub fn mobility<R: Rules + ?Sized>(position: &R) -> i32 {
    let moves = position.legal_move_count() as i32;
    position.side_to_move().sign() * MOBILITY_WEIGHT * moves
}
