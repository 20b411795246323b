//! Standard algebraic notation for moves.

use chess::{BoardStatus, MoveGen};

use crate::chess_move::Move;
use crate::piece_kind::PieceKind;
use crate::square::Square;

/// Render `mv`, legal in `inner`, as SAN (`Nbd7`, `exd5`, `e8=Q+`, `O-O`, `Qxf7#`).
pub(crate) fn to_san(inner: &chess::Board, mv: &Move) -> String {
    let mut san = String::with_capacity(8);
    let (from, to) = (mv.from(), mv.to());

    if mv.piece() == PieceKind::King && from.file().abs_diff(to.file()) == 2 {
        san.push_str(if to.file() > from.file() { "O-O" } else { "O-O-O" });
    } else {
        match mv.piece().san_char() {
            Some(letter) => {
                san.push(letter);
                san.push_str(&disambiguation(inner, mv));
            }
            None if mv.is_capture() => san.push(file_char(from)),
            None => {}
        }
        if mv.is_capture() {
            san.push('x');
        }
        san.push_str(&to.to_string());
        if let Some(letter) = mv.promotion().and_then(PieceKind::san_char) {
            san.push('=');
            san.push(letter);
        }
    }

    let after = inner.make_move_new(mv.to_chess());
    if after.status() == BoardStatus::Checkmate {
        san.push('#');
    } else if after.checkers().popcnt() > 0 {
        san.push('+');
    }
    san
}

/// Origin file, rank, or both, when another piece of the same kind can
/// reach the same destination.
fn disambiguation(inner: &chess::Board, mv: &Move) -> String {
    let piece = mv.piece().to_chess();
    let origin = mv.from();
    let dest = mv.to().to_chess();

    let rivals: Vec<Square> = MoveGen::new_legal(inner)
        .filter(|m| m.get_dest() == dest && m.get_source() != origin.to_chess())
        .filter(|m| inner.piece_on(m.get_source()) == Some(piece))
        .map(|m| Square::from(m.get_source()))
        .collect();

    if rivals.is_empty() {
        String::new()
    } else if rivals.iter().all(|r| r.file() != origin.file()) {
        file_char(origin).to_string()
    } else if rivals.iter().all(|r| r.rank() != origin.rank()) {
        rank_char(origin).to_string()
    } else {
        format!("{}{}", file_char(origin), rank_char(origin))
    }
}

fn file_char(sq: Square) -> char {
    (b'a' + sq.file()) as char
}

fn rank_char(sq: Square) -> char {
    (b'1' + sq.rank()) as char
}
