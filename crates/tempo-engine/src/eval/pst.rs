//! Piece-square tables.
//!
//! Tables are laid out from White's side in LERF order: index 0 = A1,
//! index 7 = H1, index 56 = A8. Black reads the rank-mirrored square.

use tempo_core::{Color, PieceKind, Square};

use crate::eval::PieceMap;

#[rustfmt::skip]
const PAWN_PST: [i32; 64] = [
     0,   5,  10,  10,  10,  10,   5,   0,
     5,  10,  10,  -5,  -5,  10,  10,   5,
     5,  -5,  -5,   0,   0,  -5,  -5,   5,
     0,   0,   0,  20,  20,   0,   0,   0,
     5,   5,  10,  25,  25,  10,   5,   5,
    10,  10,  20,  30,  30,  20,  10,  10,
    50,  50,  50,  50,  50,  50,  50,  50,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const KNIGHT_PST: [i32; 64] = [
   -50, -40, -30, -30, -30, -30, -40, -50,
   -40, -20,   0,   5,   5,   0, -20, -40,
   -30,   5,  10,  15,  15,  10,   5, -30,
   -30,   0,  15,  20,  20,  15,   0, -30,
   -30,   5,  15,  20,  20,  15,   5, -30,
   -30,   0,  10,  15,  15,  10,   0, -30,
   -40, -20,   0,   0,   0,   0, -20, -40,
   -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const BISHOP_PST: [i32; 64] = [
   -20, -10, -10, -10, -10, -10, -10, -20,
   -10,   5,   0,   0,   0,   0,   5, -10,
   -10,  10,  10,  10,  10,  10,  10, -10,
   -10,   0,  10,  10,  10,  10,   0, -10,
   -10,   5,   5,  10,  10,   5,   5, -10,
   -10,   0,   5,  10,  10,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const ROOK_PST: [i32; 64] = [
     0,   0,   0,   5,   5,   0,   0,   0,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
    -5,   0,   0,   0,   0,   0,   0,  -5,
     5,  10,  10,  10,  10,  10,  10,   5,
     0,   0,   0,   0,   0,   0,   0,   0,
];

#[rustfmt::skip]
const QUEEN_PST: [i32; 64] = [
   -20, -10, -10,  -5,  -5, -10, -10, -20,
   -10,   0,   5,   0,   0,   0,   0, -10,
   -10,   5,   5,   5,   5,   5,   0, -10,
     0,   0,   5,   5,   5,   5,   0,  -5,
    -5,   0,   5,   5,   5,   5,   0,  -5,
   -10,   0,   5,   5,   5,   5,   0, -10,
   -10,   0,   0,   0,   0,   0,   0, -10,
   -20, -10, -10,  -5,  -5, -10, -10, -20,
];

#[rustfmt::skip]
const KING_MG_PST: [i32; 64] = [
    20,  30,  10,   0,   0,  10,  30,  20,
    20,  20,   0,   0,   0,   0,  20,  20,
   -10, -20, -20, -20, -20, -20, -20, -10,
   -20, -30, -30, -40, -40, -30, -30, -20,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
   -30, -40, -40, -50, -50, -40, -40, -30,
];

#[rustfmt::skip]
const KING_EG_PST: [i32; 64] = [
   -50, -30, -30, -30, -30, -30, -30, -50,
   -30, -30,   0,   0,   0,   0, -30, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  30,  40,  40,  30, -10, -30,
   -30, -10,  20,  30,  30,  20, -10, -30,
   -30, -20, -10,   0,   0, -10, -20, -30,
   -50, -40, -30, -20, -20, -30, -40, -50,
];

fn table(kind: PieceKind, endgame: bool) -> &'static [i32; 64] {
    match kind {
        PieceKind::Pawn => &PAWN_PST,
        PieceKind::Knight => &KNIGHT_PST,
        PieceKind::Bishop => &BISHOP_PST,
        PieceKind::Rook => &ROOK_PST,
        PieceKind::Queen => &QUEEN_PST,
        PieceKind::King if endgame => &KING_EG_PST,
        PieceKind::King => &KING_MG_PST,
    }
}

/// Table bonus for a `kind` of `color` on `sq`, from White's perspective.
#[inline]
pub fn pst_value(kind: PieceKind, color: Color, sq: Square, endgame: bool) -> i32 {
    let table = table(kind, endgame);
    match color {
        Color::White => table[sq.index()],
        Color::Black => -table[sq.mirror().index()],
    }
}

/// Sum of table bonuses over all pieces.
pub fn pst(map: &PieceMap, endgame: bool) -> i32 {
    map.iter()
        .map(|(sq, piece)| pst_value(piece.kind(), piece.color(), sq, endgame))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_core::Board;

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    #[test]
    fn black_reads_mirrored_square() {
        for kind in PieceKind::ALL {
            for square in Square::all() {
                assert_eq!(
                    pst_value(kind, Color::Black, square.mirror(), false),
                    -pst_value(kind, Color::White, square, false),
                );
            }
        }
    }

    #[test]
    fn knight_prefers_center() {
        let center = pst_value(PieceKind::Knight, Color::White, sq("e4"), false);
        let rim = pst_value(PieceKind::Knight, Color::White, sq("a4"), false);
        assert_eq!(center, 20);
        assert_eq!(rim, -30);
    }

    #[test]
    fn pawn_on_seventh_rank() {
        assert_eq!(pst_value(PieceKind::Pawn, Color::White, sq("c7"), false), 50);
        assert_eq!(pst_value(PieceKind::Pawn, Color::Black, sq("c2"), false), -50);
    }

    #[test]
    fn king_table_switches_in_endgame() {
        let e1 = sq("e1");
        assert_eq!(pst_value(PieceKind::King, Color::White, e1, false), 0);
        assert_eq!(pst_value(PieceKind::King, Color::White, e1, true), -30);
        let d5 = sq("d5");
        assert_eq!(pst_value(PieceKind::King, Color::White, d5, true), 40);
    }

    #[test]
    fn starting_position_cancels() {
        let map = PieceMap::scan(&Board::starting_position());
        assert_eq!(pst(&map, false), 0);
    }
}
