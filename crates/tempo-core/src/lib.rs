//! Core chess types and the rules provider the engine searches with.

mod board;
mod chess_move;
mod color;
mod error;
mod fen;
mod piece;
mod piece_kind;
mod rules;
mod san;
mod square;

pub use board::{Board, PrettyBoard};
pub use chess_move::Move;
pub use color::Color;
pub use error::RulesError;
pub use fen::STARTING_FEN;
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use rules::{Applied, Rules};
pub use square::Square;
