//! Search and evaluation for tempo.

pub mod error;
pub mod eval;
pub mod limits;
pub mod search;
pub mod worker;

pub use error::EngineError;
pub use eval::evaluate;
pub use limits::SearchLimits;
pub use search::control::SearchControl;
pub use search::{DepthReport, SearchOutcome, SearchResult, Searcher, find_best_move};
pub use worker::{SearchHandle, spawn_search};
