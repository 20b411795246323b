//! Negamax alpha-beta search with quiescence.

use tempo_core::{Applied, Move, Rules};
use tracing::warn;

use crate::eval::evaluate;
use crate::search::control::{Aborted, SearchControl};
use crate::search::heuristics::{HistoryTable, KillerTable};
use crate::search::ordering::{gives_check, order, order_flagged};
use crate::search::tt::{Bound, TranspositionTable};

/// Score representing an unreachable upper/lower bound.
pub const INF: i32 = 1_000_000;

/// Maximum search depth (in plies) for table sizing and the quiescence backstop.
pub const MAX_PLY: usize = 128;

/// Search state threaded through negamax calls.
///
/// Created fresh for every search and dropped with it.
pub struct SearchContext {
    /// Total nodes visited, quiescence included.
    pub nodes: u64,
    pub control: SearchControl,
    pub tt: TranspositionTable,
    pub killers: KillerTable,
    pub history: HistoryTable,
}

impl SearchContext {
    pub fn new(control: SearchControl) -> Self {
        Self {
            nodes: 0,
            control,
            tt: TranspositionTable::new(),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
        }
    }
}

/// Negamax alpha-beta search.
///
/// Returns the score of `position` for the side whose sign is `color`
/// (`+1` White, `-1` Black). Every move is applied through a guard, so the
/// position is unchanged on return, including when the search aborts.
pub fn negamax<R: Rules + ?Sized>(
    position: &mut R,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
    color: i32,
    ply: usize,
    ctx: &mut SearchContext,
) -> Result<i32, Aborted> {
    ctx.nodes += 1;
    ctx.control.poll()?;

    let fen = position.fen();
    if let Some(entry) = ctx.tt.probe(&fen, depth) {
        match entry.bound {
            Bound::Exact => return Ok(entry.score),
            Bound::Lower => alpha = alpha.max(entry.score),
            Bound::Upper => beta = beta.min(entry.score),
        }
        if alpha >= beta {
            return Ok(entry.score);
        }
    }

    if depth == 0 || position.is_game_over() {
        return quiesce(position, alpha, beta, color, ply, ctx);
    }

    let moves = position.legal_moves();
    if moves.is_empty() {
        return Ok(color * evaluate(position));
    }

    let window_alpha = alpha;
    let mut best = -INF;
    let mut searched = false;

    for mv in order(position, moves, ply, &ctx.killers, &ctx.history) {
        let Some(mut child) = try_apply(position, &mv) else {
            continue;
        };
        let score = -negamax(&mut *child, depth - 1, -beta, -alpha, -color, ply + 1, ctx)?;
        drop(child);
        searched = true;

        best = best.max(score);
        if score > alpha {
            alpha = score;
            if !mv.is_capture() {
                ctx.history.record(&mv, depth);
            }
        }
        if alpha >= beta {
            if !mv.is_capture() {
                ctx.killers.record(ply, &mv);
            }
            break;
        }
    }

    if !searched {
        return Ok(color * evaluate(position));
    }

    let bound = if best <= window_alpha {
        Bound::Upper
    } else if best >= beta {
        Bound::Lower
    } else {
        Bound::Exact
    };
    ctx.tt.store(&fen, depth, best, bound);

    Ok(best)
}

/// Quiescence search: resolve captures, promotions and checks before
/// trusting the static evaluation.
///
/// Fail-hard: a cutoff returns `beta` itself.
pub fn quiesce<R: Rules + ?Sized>(
    position: &mut R,
    mut alpha: i32,
    beta: i32,
    color: i32,
    ply: usize,
    ctx: &mut SearchContext,
) -> Result<i32, Aborted> {
    ctx.nodes += 1;
    ctx.control.poll()?;

    // Stand-pat: the side to move can choose not to continue the sequence
    let stand_pat = color * evaluate(position);
    if ply >= MAX_PLY {
        return Ok(stand_pat);
    }
    if stand_pat >= beta {
        return Ok(beta);
    }
    alpha = alpha.max(stand_pat);

    if position.is_game_over() {
        return Ok(alpha);
    }

    let tactical: Vec<(Move, bool)> = position
        .legal_moves()
        .into_iter()
        .filter_map(|mv| {
            let checks = gives_check(position, &mv);
            (checks || mv.is_capture() || mv.is_promotion()).then_some((mv, checks))
        })
        .collect();

    for mv in order_flagged(tactical, ply, &ctx.killers, &ctx.history) {
        let Some(mut child) = try_apply(position, &mv) else {
            continue;
        };
        let score = -quiesce(&mut *child, -beta, -alpha, -color, ply + 1, ctx)?;
        drop(child);

        if score >= beta {
            return Ok(beta);
        }
        alpha = alpha.max(score);
    }

    Ok(alpha)
}

/// Apply `mv` behind a guard, or log and skip it if the provider refuses.
pub(crate) fn try_apply<'a, R: Rules + ?Sized>(
    position: &'a mut R,
    mv: &Move,
) -> Option<Applied<'a, R>> {
    match Applied::new(position, mv) {
        Ok(child) => Some(child),
        Err(err) => {
            warn!(mv = %mv, error = %err, "failed to apply move, skipping");
            None
        }
    }
}
