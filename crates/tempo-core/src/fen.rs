//! FEN splitting and formatting.
//!
//! Piece placement, side to move, castling and en passant are handled by
//! the `chess` crate. The two move counters are not, so they are parsed and
//! written here and carried alongside the inner board by [`Board`](crate::Board).

use crate::error::RulesError;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A FEN string split into its position part and its two counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SplitFen {
    /// The first four fields, single-space separated.
    pub position: String,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

/// Split `fen` into position fields and move counters.
///
/// Missing counters default to `0` and `1`, matching what most GUIs emit
/// for four-field FENs.
pub(crate) fn split(fen: &str) -> Result<SplitFen, RulesError> {
    let fields: Vec<&str> = fen.split_whitespace().collect();
    if fields.len() < 4 || fields.len() > 6 {
        return Err(RulesError::InvalidFen {
            fen: fen.to_string(),
        });
    }

    let halfmove_clock = parse_counter(fields.get(4).copied(), "halfmove clock", 0)?;
    let fullmove_number = parse_counter(fields.get(5).copied(), "fullmove number", 1)?;

    Ok(SplitFen {
        position: fields[..4].join(" "),
        halfmove_clock,
        fullmove_number: fullmove_number.max(1),
    })
}

fn parse_counter(field: Option<&str>, name: &'static str, default: u16) -> Result<u16, RulesError> {
    match field {
        None => Ok(default),
        Some(text) => text.parse().map_err(|_| RulesError::InvalidCounter {
            field: name,
            found: text.to_string(),
        }),
    }
}

/// Build a six-field FEN from the inner board and the tracked counters.
pub(crate) fn format(inner: &chess::Board, halfmove_clock: u16, fullmove_number: u16) -> String {
    let rendered = inner.to_string();
    let position: Vec<&str> = rendered.split_whitespace().take(4).collect();
    format!("{} {halfmove_clock} {fullmove_number}", position.join(" "))
}
