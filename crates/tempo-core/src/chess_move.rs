//! Move records produced by the rules provider.

use std::fmt;

use crate::piece_kind::PieceKind;
use crate::square::Square;

/// A legal move as described by the rules provider.
///
/// Besides origin and destination it carries the moving piece, the
/// captured piece (a pawn for en passant) and the promotion piece, so the
/// search can score it without asking the position again.
///
/// Equality compares every field. Heuristic tables that only care about
/// the squares use [`Move::key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    piece: PieceKind,
    captured: Option<PieceKind>,
    promotion: Option<PieceKind>,
}

impl Move {
    /// A quiet, non-promoting move.
    pub const fn new(from: Square, to: Square, piece: PieceKind) -> Move {
        Move {
            from,
            to,
            piece,
            captured: None,
            promotion: None,
        }
    }

    /// The same move, capturing `victim`.
    pub const fn with_capture(self, victim: PieceKind) -> Move {
        Move {
            captured: Some(victim),
            ..self
        }
    }

    /// The same move, promoting to `kind`.
    pub const fn with_promotion(self, kind: PieceKind) -> Move {
        Move {
            promotion: Some(kind),
            ..self
        }
    }

    #[inline]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub const fn to(&self) -> Square {
        self.to
    }

    /// Kind of the piece being moved.
    #[inline]
    pub const fn piece(&self) -> PieceKind {
        self.piece
    }

    #[inline]
    pub const fn captured(&self) -> Option<PieceKind> {
        self.captured
    }

    #[inline]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub const fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Origin/destination identity, `from | to << 6`.
    ///
    /// Two promotions on the same squares share a key.
    #[inline]
    pub const fn key(&self) -> u16 {
        self.from.index() as u16 | ((self.to.index() as u16) << 6)
    }

    /// Compact origin/destination/promotion notation, e.g. `e2e4` or `e7e8q`.
    pub fn to_uci(&self) -> String {
        self.to_string()
    }

    pub(crate) fn to_chess(self) -> chess::ChessMove {
        chess::ChessMove::new(
            self.from.to_chess(),
            self.to.to_chess(),
            self.promotion.map(PieceKind::to_chess),
        )
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.fen_char())?;
        }
        Ok(())
    }
}
