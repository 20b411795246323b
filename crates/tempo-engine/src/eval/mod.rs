//! Static evaluation.
//!
//! Every term is computed from White's perspective: positive favours
//! White. The search multiplies by the side-to-move sign.

pub mod king_safety;
pub mod material;
pub mod mobility;
pub mod pawns;
pub mod pst;

use tempo_core::{Color, Piece, PieceKind, Rules, Square};

/// Score of a checkmated position, from the mated side's opponent.
pub const MATE_SCORE: i32 = 99_999;

/// At or below this many non-king pieces the king switches to its endgame table
/// and king safety is no longer scored.
pub const ENDGAME_PIECE_LIMIT: usize = 12;

/// Occupancy of all 64 squares, read once per evaluation.
pub struct PieceMap {
    squares: [Option<Piece>; Square::COUNT],
}

impl PieceMap {
    /// Read every square of `position`.
    pub fn scan<R: Rules + ?Sized>(position: &R) -> PieceMap {
        let mut squares = [None; Square::COUNT];
        for sq in Square::all() {
            squares[sq.index()] = position.piece_at(sq);
        }
        PieceMap { squares }
    }

    #[inline]
    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index()]
    }

    /// Occupied squares with their pieces, A1 first.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Squares holding a `kind` of `color`.
    pub fn squares_of(&self, kind: PieceKind, color: Color) -> impl Iterator<Item = Square> + '_ {
        let wanted = Piece::new(kind, color);
        self.iter()
            .filter(move |&(_, piece)| piece == wanted)
            .map(|(sq, _)| sq)
    }

    pub fn king(&self, color: Color) -> Option<Square> {
        self.squares_of(PieceKind::King, color).next()
    }

    /// Whether few enough pieces remain to treat this as an endgame.
    pub fn is_endgame(&self) -> bool {
        let non_kings = self
            .iter()
            .filter(|(_, piece)| piece.kind() != PieceKind::King)
            .count();
        non_kings <= ENDGAME_PIECE_LIMIT
    }
}

/// Evaluate `position` from White's perspective.
///
/// Checkmate scores [`MATE_SCORE`] against the side to move; every other
/// finished game is a draw.
pub fn evaluate<R: Rules + ?Sized>(position: &R) -> i32 {
    if position.is_game_over() {
        if position.is_checkmate() {
            return -position.side_to_move().sign() * MATE_SCORE;
        }
        return 0;
    }

    let map = PieceMap::scan(position);
    let endgame = map.is_endgame();

    material::material(&map)
        + pst::pst(&map, endgame)
        + mobility::mobility(position)
        + pawns::pawn_structure(&map)
        + king_safety::king_safety(&map, endgame)
}
