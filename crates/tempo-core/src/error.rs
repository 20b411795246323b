//! Errors reported by the rules provider.

/// Errors from parsing positions and from applying or undoing moves.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    /// The FEN string does not describe a legal, well-formed position.
    #[error("invalid FEN: \"{fen}\"")]
    InvalidFen {
        /// The rejected FEN string.
        fen: String,
    },

    /// The halfmove clock or fullmove number field is not a number.
    #[error("invalid {field}: \"{found}\"")]
    InvalidCounter {
        /// Which counter ("halfmove clock" or "fullmove number").
        field: &'static str,
        /// The text that failed to parse.
        found: String,
    },

    /// The move is not legal in the current position.
    #[error("illegal move {uci} in position {fen}")]
    IllegalMove {
        /// The move in origin/destination notation.
        uci: String,
        /// The position it was tried in.
        fen: String,
    },

    /// `undo` was called with no applied move on the stack.
    #[error("no move to undo")]
    NothingToUndo,
}
