//! Iterative deepening driver and the search building blocks.

pub mod control;
pub mod heuristics;
pub mod negamax;
pub mod ordering;
pub mod tt;

use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use tempo_core::{Board, Move, Rules};
use tracing::{debug, warn};

use crate::error::EngineError;
use crate::eval::evaluate;
use crate::limits::SearchLimits;
use control::{Aborted, SearchControl};
use negamax::{INF, SearchContext, negamax, try_apply};
use ordering::order;

/// Once a completed depth scores beyond this, a forced mate has been found
/// and deeper iterations cannot change the answer.
pub const MATE_FOUND: i32 = 90_000;

/// Result of a search that completed at least one depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move found at the highest completed depth.
    pub best_move: Move,
    /// The best move in standard algebraic notation.
    pub san: String,
    /// The best move in origin/destination/promotion notation.
    pub uci: String,
    /// Score in centipawns from the side to move's perspective.
    pub score: i32,
    /// Total nodes visited, quiescence included.
    pub nodes: u64,
    /// Deepest completed iteration.
    pub depth: u8,
    pub elapsed: Duration,
}

/// What a search produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(SearchResult),
    /// The side to move has no legal moves.
    GameOver,
    /// The budget ran out before the first depth completed.
    OutOfTime { nodes: u64, elapsed: Duration },
}

impl SearchOutcome {
    /// The search result, if a move was found.
    pub fn found(&self) -> Option<&SearchResult> {
        match self {
            SearchOutcome::Found(result) => Some(result),
            _ => None,
        }
    }
}

/// Summary of one completed iteration, passed to progress callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthReport {
    pub depth: u8,
    pub score: i32,
    pub nodes: u64,
    pub best_move: Move,
}

/// Iterative-deepening searcher.
///
/// Holds only the budget; the transposition table, killers, history and
/// node counter are created per call.
#[derive(Debug, Clone)]
pub struct Searcher {
    limits: SearchLimits,
    stop: Option<Arc<AtomicBool>>,
}

impl Searcher {
    pub fn new(limits: SearchLimits) -> Self {
        Self { limits, stop: None }
    }

    /// Abort the search when `flag` is set.
    pub fn with_stop_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.stop = Some(flag);
        self
    }

    pub fn limits(&self) -> SearchLimits {
        self.limits
    }

    /// Search `position` and return the best move at the deepest completed depth.
    ///
    /// The position is mutated during the search and restored before returning.
    pub fn search<R: Rules + ?Sized>(&self, position: &mut R) -> SearchOutcome {
        self.search_with(position, |_| {})
    }

    /// Like [`search`](Self::search), calling `on_depth` after each completed iteration.
    pub fn search_with<R, F>(&self, position: &mut R, mut on_depth: F) -> SearchOutcome
    where
        R: Rules + ?Sized,
        F: FnMut(&DepthReport),
    {
        let mut control = SearchControl::new(self.limits.max_time);
        if let Some(flag) = &self.stop {
            control = control.with_stop_flag(Arc::clone(flag));
        }

        let root_moves = position.legal_moves();
        if root_moves.is_empty() {
            debug!("no legal moves at root");
            return SearchOutcome::GameOver;
        }

        let root_color = position.side_to_move().sign();
        let mut ctx = SearchContext::new(control);
        let mut completed: Option<DepthReport> = None;

        for depth in 1..=self.limits.max_depth {
            if ctx.control.out_of_budget() {
                break;
            }
            match search_root(position, depth, root_color, &mut ctx) {
                Ok(Some((best_move, score))) => {
                    let report = DepthReport {
                        depth,
                        score,
                        nodes: ctx.nodes,
                        best_move,
                    };
                    debug!(depth, score, nodes = ctx.nodes, best = %best_move, "depth complete");
                    on_depth(&report);
                    completed = Some(report);
                    if score.abs() > MATE_FOUND {
                        break;
                    }
                }
                Ok(None) => break,
                Err(Aborted) => {
                    debug!(depth, nodes = ctx.nodes, "depth aborted");
                    break;
                }
            }
        }

        let elapsed = ctx.control.elapsed();
        let report = match completed {
            Some(report) => report,
            None if root_moves.len() == 1 => {
                forced_reply(position, root_moves[0], root_color, ctx.nodes)
            }
            None => {
                return SearchOutcome::OutOfTime {
                    nodes: ctx.nodes,
                    elapsed,
                };
            }
        };

        let best_move = report.best_move;
        let san = position.san(&best_move).unwrap_or_else(|err| {
            warn!(mv = %best_move, error = %err, "could not render SAN");
            best_move.to_uci()
        });
        SearchOutcome::Found(SearchResult {
            best_move,
            san,
            uci: best_move.to_uci(),
            score: report.score,
            nodes: report.nodes,
            depth: report.depth,
            elapsed,
        })
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchLimits::default())
    }
}

/// Search every root move to `depth` with a full window.
///
/// Root moves are not windowed against each other so each gets an exact
/// score. Returns `None` only if no root move could be applied.
fn search_root<R: Rules + ?Sized>(
    position: &mut R,
    depth: u8,
    root_color: i32,
    ctx: &mut SearchContext,
) -> Result<Option<(Move, i32)>, Aborted> {
    let moves = order(position, position.legal_moves(), 0, &ctx.killers, &ctx.history);
    let mut best: Option<(Move, i32)> = None;

    for mv in moves {
        let Some(mut child) = try_apply(position, &mv) else {
            continue;
        };
        let score = -negamax(&mut *child, depth - 1, -INF, INF, -root_color, 1, ctx)?;
        drop(child);

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
        ctx.control.poll()?;
    }

    Ok(best)
}

/// Report the only legal move when no iteration finished in time.
fn forced_reply<R: Rules + ?Sized>(
    position: &mut R,
    only: Move,
    root_color: i32,
    nodes: u64,
) -> DepthReport {
    let score = match try_apply(position, &only) {
        Some(child) => root_color * evaluate(&*child),
        None => 0,
    };
    debug!(best = %only, "single legal move, returning without a completed depth");
    DepthReport {
        depth: 0,
        score,
        nodes,
        best_move: only,
    }
}

/// Parse `fen` and search it. Each call starts from empty tables.
pub fn find_best_move(fen: &str, limits: SearchLimits) -> Result<SearchOutcome, EngineError> {
    limits.validate()?;
    let mut board = Board::from_fen(fen)?;
    Ok(Searcher::new(limits).search(&mut board))
}
