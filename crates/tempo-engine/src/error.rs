//! Errors reported by the engine's public entry points.

use tempo_core::RulesError;

/// Errors from starting or collecting a search.
///
/// Running out of time and finding no legal move are not errors; they are
/// reported through [`SearchOutcome`](crate::SearchOutcome).
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The position could not be set up.
    #[error(transparent)]
    Rules(#[from] RulesError),

    /// The requested maximum depth was zero.
    #[error("search depth must be at least 1")]
    InvalidDepth,

    /// The background search thread panicked.
    #[error("search thread panicked")]
    WorkerPanicked,
}
