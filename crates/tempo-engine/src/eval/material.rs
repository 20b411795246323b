//! Material balance.
//!
//! | Piece  | Value |
//! |--------|-------|
//! | Pawn   |   100 |
//! | Knight |   320 |
//! | Bishop |   330 |
//! | Rook   |   500 |
//! | Queen  |   900 |
//! | King   | 20000 |
//!
//! Kings always cancel, their value only matters to capture ordering.

use crate::eval::PieceMap;

/// Sum of piece values, White minus Black.
pub fn material(map: &PieceMap) -> i32 {
    map.iter()
        .map(|(_, piece)| piece.color().sign() * piece.kind().value())
        .sum()
}
