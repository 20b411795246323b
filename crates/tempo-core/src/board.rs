//! The game position: a `chess` board plus move counters and an undo stack.

use std::fmt;
use std::str::FromStr;

use chess::{BoardStatus, MoveGen};

use crate::chess_move::Move;
use crate::color::Color;
use crate::error::RulesError;
use crate::fen;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::rules::Rules;
use crate::san;
use crate::square::Square;

/// State needed to take back one move.
#[derive(Clone, Copy)]
struct Undo {
    inner: chess::Board,
    halfmove_clock: u16,
    fullmove_number: u16,
    mv: Move,
}

/// A chess game position that can be stepped forward and back.
///
/// Legality, check and mate come from the `chess` crate. On top of that the
/// board tracks the halfmove clock and fullmove number, and keeps every
/// position it has passed through so it can detect threefold repetition.
#[derive(Clone)]
pub struct Board {
    inner: chess::Board,
    halfmove_clock: u16,
    fullmove_number: u16,
    /// Positions before each applied move, oldest first.
    history: Vec<Undo>,
}

impl Board {
    /// Return the standard starting position.
    pub fn starting_position() -> Board {
        Board {
            inner: chess::Board::default(),
            halfmove_clock: 0,
            fullmove_number: 1,
            history: Vec::new(),
        }
    }

    /// Parse a position from FEN. The two counter fields may be omitted.
    pub fn from_fen(fen: &str) -> Result<Board, RulesError> {
        let parts = fen::split(fen)?;
        let inner = chess::Board::from_str(&parts.position).map_err(|_| RulesError::InvalidFen {
            fen: fen.to_string(),
        })?;
        Ok(Board {
            inner,
            halfmove_clock: parts.halfmove_clock,
            fullmove_number: parts.fullmove_number,
            history: Vec::new(),
        })
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    /// Number of moves applied since the board was created.
    #[inline]
    pub fn moves_played(&self) -> usize {
        self.history.len()
    }

    /// Position hash, including side to move, castling and en passant.
    #[inline]
    pub fn hash(&self) -> u64 {
        self.inner.get_hash()
    }

    /// Neither side has enough material left to deliver mate.
    ///
    /// Covers bare kings, a single minor piece, and any number of bishops
    /// that all stand on squares of one colour.
    pub fn is_insufficient_material(&self) -> bool {
        let b = &self.inner;
        let heavy = *b.pieces(chess::Piece::Pawn)
            | *b.pieces(chess::Piece::Rook)
            | *b.pieces(chess::Piece::Queen);
        if heavy.popcnt() > 0 {
            return false;
        }

        let knights = b.pieces(chess::Piece::Knight).popcnt();
        let bishops = *b.pieces(chess::Piece::Bishop);
        match (knights, bishops.popcnt()) {
            (0, 0) | (1, 0) | (0, 1) => true,
            (0, _) => {
                let mut shades = bishops.map(|sq| {
                    let sq = Square::from(sq);
                    (sq.file() + sq.rank()) % 2
                });
                let first = shades.next();
                shades.all(|shade| Some(shade) == first)
            }
            _ => false,
        }
    }

    /// Fifty moves by each side without a capture or pawn move.
    #[inline]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= 100
    }

    /// The current position has occurred at least twice before.
    ///
    /// Only positions since the last capture or pawn move can repeat, so the
    /// scan stops at the halfmove clock.
    pub fn is_threefold_repetition(&self) -> bool {
        let hash = self.inner.get_hash();
        let earlier = self
            .history
            .iter()
            .rev()
            .take(self.halfmove_clock as usize)
            .filter(|undo| undo.inner.get_hash() == hash)
            .count();
        earlier >= 2
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }

    /// Enrich a raw `chess` move with the pieces it moves and captures.
    fn describe(&self, raw: chess::ChessMove) -> Move {
        let (src, dst) = (raw.get_source(), raw.get_dest());
        let piece = self
            .inner
            .piece_on(src)
            .map(PieceKind::from)
            .unwrap_or(PieceKind::Pawn);

        let mut mv = Move::new(src.into(), dst.into(), piece);
        if let Some(victim) = self.inner.piece_on(dst) {
            mv = mv.with_capture(victim.into());
        } else if piece == PieceKind::Pawn && src.get_file() != dst.get_file() {
            // en passant
            mv = mv.with_capture(PieceKind::Pawn);
        }
        if let Some(promo) = raw.get_promotion() {
            mv = mv.with_promotion(promo.into());
        }
        mv
    }

    fn checked(&self, mv: &Move) -> Result<chess::ChessMove, RulesError> {
        let raw = mv.to_chess();
        if self.inner.legal(raw) {
            Ok(raw)
        } else {
            Err(RulesError::IllegalMove {
                uci: mv.to_uci(),
                fen: self.fen(),
            })
        }
    }
}

impl Rules for Board {
    fn legal_moves(&self) -> Vec<Move> {
        MoveGen::new_legal(&self.inner)
            .map(|raw| self.describe(raw))
            .collect()
    }

    fn legal_move_count(&self) -> usize {
        MoveGen::new_legal(&self.inner).len()
    }

    fn apply(&mut self, mv: &Move) -> Result<(), RulesError> {
        let raw = self.checked(mv)?;
        let irreversible = self.inner.piece_on(raw.get_source()) == Some(chess::Piece::Pawn)
            || self.inner.piece_on(raw.get_dest()).is_some();
        let black_moved = self.inner.side_to_move() == chess::Color::Black;

        self.history.push(Undo {
            inner: self.inner,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
            mv: *mv,
        });

        self.inner = self.inner.make_move_new(raw);
        self.halfmove_clock = if irreversible {
            0
        } else {
            self.halfmove_clock.saturating_add(1)
        };
        if black_moved {
            self.fullmove_number = self.fullmove_number.saturating_add(1);
        }
        Ok(())
    }

    fn undo(&mut self) -> Result<Move, RulesError> {
        let prev = self.history.pop().ok_or(RulesError::NothingToUndo)?;
        self.inner = prev.inner;
        self.halfmove_clock = prev.halfmove_clock;
        self.fullmove_number = prev.fullmove_number;
        Ok(prev.mv)
    }

    #[inline]
    fn side_to_move(&self) -> Color {
        self.inner.side_to_move().into()
    }

    #[inline]
    fn is_check(&self) -> bool {
        self.inner.checkers().popcnt() > 0
    }

    fn is_checkmate(&self) -> bool {
        self.inner.status() == BoardStatus::Checkmate
    }

    fn is_stalemate(&self) -> bool {
        self.inner.status() == BoardStatus::Stalemate
    }

    fn is_game_over(&self) -> bool {
        self.inner.status() != BoardStatus::Ongoing
            || self.is_insufficient_material()
            || self.is_fifty_move_draw()
            || self.is_threefold_repetition()
    }

    fn gives_check(&self, mv: &Move) -> Result<bool, RulesError> {
        let raw = self.checked(mv)?;
        Ok(self.inner.make_move_new(raw).checkers().popcnt() > 0)
    }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        let sq = sq.to_chess();
        let kind = self.inner.piece_on(sq)?;
        let color = self.inner.color_on(sq)?;
        Some(Piece::new(kind.into(), color.into()))
    }

    fn fen(&self) -> String {
        fen::format(&self.inner, self.halfmove_clock, self.fullmove_number)
    }

    fn san(&self, mv: &Move) -> Result<String, RulesError> {
        self.checked(mv)?;
        Ok(san::to_san(&self.inner, mv))
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::starting_position()
    }
}

impl FromStr for Board {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Board::from_fen(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fen())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board(\"{}\")", self)
    }
}

/// Wrapper for pretty-printing a board as an 8x8 grid.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0u8..8).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0u8..8 {
                let c = Square::new(file, rank)
                    .and_then(|sq| self.0.piece_at(sq))
                    .map_or('.', Piece::fen_char);
                if file < 7 {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::Board;
    use crate::{Color, Move, Piece, PieceKind, Rules, RulesError, STARTING_FEN, Square};

    fn sq(name: &str) -> Square {
        Square::from_algebraic(name).unwrap()
    }

    fn find(board: &Board, uci: &str) -> Move {
        board
            .legal_moves()
            .into_iter()
            .find(|m| m.to_uci() == uci)
            .unwrap_or_else(|| panic!("{uci} not legal in {}", board.fen()))
    }

    fn play(board: &mut Board, line: &[&str]) {
        for uci in line {
            let mv = find(board, uci);
            board.apply(&mv).unwrap();
        }
    }

    #[test]
    fn starting_position_round_trips_fen() {
        let board = Board::starting_position();
        assert_eq!(board.fen(), STARTING_FEN);
        assert_eq!(Board::from_fen(STARTING_FEN).unwrap().fen(), STARTING_FEN);
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let board = Board::starting_position();
        assert_eq!(board.legal_moves().len(), 20);
        assert_eq!(board.legal_move_count(), 20);
        assert_eq!(board.side_to_move(), Color::White);
    }

    #[test]
    fn piece_at_starting_squares() {
        let board = Board::starting_position();
        assert_eq!(board.piece_at(sq("e1")), Some(Piece::new(PieceKind::King, Color::White)));
        assert_eq!(board.piece_at(sq("d8")), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(board.piece_at(sq("e4")), None);
    }

    #[test]
    fn rejects_garbage_fen() {
        assert!(matches!(Board::from_fen("not a fen at all"), Err(RulesError::InvalidFen { .. })));
        assert!("8/8/8".parse::<Board>().is_err());
    }

    #[test]
    fn apply_and_undo_restore_everything() {
        let mut board = Board::starting_position();
        play(&mut board, &["e2e4", "e7e5", "g1f3"]);
        assert_eq!(board.fen(), "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2");
        assert_eq!(board.moves_played(), 3);

        assert_eq!(board.undo().unwrap().to_uci(), "g1f3");
        assert_eq!(board.undo().unwrap().to_uci(), "e7e5");
        assert_eq!(board.undo().unwrap().to_uci(), "e2e4");
        assert_eq!(board.fen(), STARTING_FEN);
        assert_eq!(board.undo(), Err(RulesError::NothingToUndo));
    }

    #[test]
    fn illegal_move_is_rejected() {
        let mut board = Board::starting_position();
        let bogus = Move::new(sq("e2"), sq("e5"), PieceKind::Pawn);
        assert!(matches!(board.apply(&bogus), Err(RulesError::IllegalMove { .. })));
        assert_eq!(board.moves_played(), 0);
    }

    #[test]
    fn describes_captures_and_en_passant() {
        let board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let ep = find(&board, "e5d6");
        assert_eq!(ep.piece(), PieceKind::Pawn);
        assert_eq!(ep.captured(), Some(PieceKind::Pawn));

        let board = Board::from_fen("4k3/8/8/3q4/4N3/8/8/4K3 w - - 0 1").unwrap();
        let take = find(&board, "e4d6");
        assert!(!take.is_capture());
        let board = Board::from_fen("4k3/8/3q4/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        let take = find(&board, "e4d6");
        assert_eq!(take.piece(), PieceKind::Knight);
        assert_eq!(take.captured(), Some(PieceKind::Queen));
    }

    #[test]
    fn promotions_are_listed_per_piece() {
        let board = Board::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        let promos: Vec<_> = board
            .legal_moves()
            .into_iter()
            .filter(Move::is_promotion)
            .collect();
        assert_eq!(promos.len(), 4);
    }

    #[test]
    fn gives_check_does_not_mutate() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let before = board.fen();
        assert!(board.gives_check(&find(&board, "a1a8")).unwrap());
        assert!(!board.gives_check(&find(&board, "a1a2")).unwrap());
        assert_eq!(board.fen(), before);
    }

    #[test]
    fn detects_checkmate_and_stalemate() {
        let fen = "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3";
        let mate = Board::from_fen(fen).unwrap();
        assert!(mate.is_check());
        assert!(mate.is_checkmate());
        assert!(mate.is_game_over());

        let stale = Board::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!stale.is_check());
        assert!(stale.is_stalemate());
        assert!(stale.is_game_over());
        assert_eq!(stale.legal_move_count(), 0);
    }

    #[test]
    fn insufficient_material() {
        let cases = [
            ("4k3/8/8/8/8/8/8/4K3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/8/4KN2 w - - 0 1", true),
            ("4k3/8/8/8/8/8/8/4KB2 w - - 0 1", true),
            ("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1", true),
            ("4k3/8/8/8/8/8/8/2B1KB2 w - - 0 1", false),
            ("4k3/8/8/8/8/8/8/3NKN2 w - - 0 1", false),
            ("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", false),
        ];
        for (fen, expected) in cases {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.is_insufficient_material(), expected, "{fen}");
            assert_eq!(board.is_game_over(), expected, "{fen}");
        }
    }

    #[test]
    fn fifty_move_rule() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").unwrap();
        assert!(board.is_fifty_move_draw());
        assert!(board.is_game_over());

        let board = Board::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 99 80").unwrap();
        assert!(!board.is_game_over());
    }

    #[test]
    fn threefold_by_knight_shuffle() {
        let mut board = Board::starting_position();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];
        play(&mut board, &shuffle);
        assert!(!board.is_threefold_repetition());
        play(&mut board, &shuffle);
        assert!(board.is_threefold_repetition());
        assert!(board.is_game_over());

        board.undo().unwrap();
        assert!(!board.is_threefold_repetition());
    }

    #[test]
    fn counters_advance_and_reset() {
        let mut board = Board::starting_position();
        play(&mut board, &["g1f3"]);
        assert_eq!((board.halfmove_clock(), board.fullmove_number()), (1, 1));
        play(&mut board, &["g8f6"]);
        assert_eq!((board.halfmove_clock(), board.fullmove_number()), (2, 2));
        play(&mut board, &["e2e4"]);
        assert_eq!((board.halfmove_clock(), board.fullmove_number()), (0, 2));
    }

    #[test]
    fn pretty_print() {
        let board = Board::starting_position();
        let text = board.pretty().to_string();
        assert!(text.starts_with("8  r n b q k b n r"));
        assert!(text.ends_with("   a b c d e f g h"));
    }
}
