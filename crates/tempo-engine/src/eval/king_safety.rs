//! Pawn shield in front of each king.

use tempo_core::{Color, Piece, PieceKind};

use crate::eval::PieceMap;

/// Penalty per missing pawn among the three squares in front of the king.
pub const MISSING_SHIELD_PENALTY: i32 = 10;

/// King safety, White minus Black. Zero in the endgame.
pub fn king_safety(map: &PieceMap, endgame: bool) -> i32 {
    if endgame {
        return 0;
    }
    missing_shield(map, Color::Black) * MISSING_SHIELD_PENALTY
        - missing_shield(map, Color::White) * MISSING_SHIELD_PENALTY
}

/// Shield squares not holding a friendly pawn. Squares off the board count.
fn missing_shield(map: &PieceMap, color: Color) -> i32 {
    let Some(king) = map.king(color) else {
        return 0;
    };
    let forward = match color {
        Color::White => 1,
        Color::Black => -1,
    };
    let pawn = Piece::new(PieceKind::Pawn, color);
    let present = (-1..=1)
        .filter_map(|df| king.offset(df, forward))
        .filter(|&sq| map.get(sq) == Some(pawn))
        .count() as i32;
    3 - present
}
