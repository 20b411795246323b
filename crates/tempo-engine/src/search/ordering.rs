//! Move ordering via MVV-LVA, promotions, killers, checks, history and centralisation.

use std::cmp::Reverse;

use tempo_core::{Move, Rules, Square};
use tracing::trace;

use crate::search::heuristics::{HistoryTable, KillerTable};

/// Base priority for any capture.
pub const CAPTURE_BASE: i32 = 10_000;
/// Base priority for any promotion, plus the promoted piece's value.
pub const PROMOTION_BASE: i32 = 9_000;
/// Bonus for a quiet move stored as a killer at this ply.
pub const KILLER_BONUS: i32 = 8_000;
/// Bonus for a move that gives check.
pub const CHECK_BONUS: i32 = 500;
/// Bonus for landing on d4, e4, d5 or e5.
pub const CENTER_BONUS: i32 = 30;

/// Score a move for ordering purposes. Higher scores are searched first.
///
/// The terms are additive:
/// - Captures: `10,000 + 10 * victim - attacker / 10` (most valuable victim,
///   least valuable attacker)
/// - Promotions: `9,000 + promoted piece value`
/// - Killer (quiet moves only): 8,000
/// - Gives check: 500
/// - History weight
/// - Central destination: 30
pub fn score_move<R: Rules + ?Sized>(
    position: &R,
    mv: &Move,
    ply: usize,
    killers: &KillerTable,
    history: &HistoryTable,
) -> i32 {
    priority(mv, gives_check(position, mv), ply, killers, history)
}

fn priority(
    mv: &Move,
    checks: bool,
    ply: usize,
    killers: &KillerTable,
    history: &HistoryTable,
) -> i32 {
    let mut priority = 0i32;

    match mv.captured() {
        Some(victim) => priority += CAPTURE_BASE + 10 * victim.value() - mv.piece().value() / 10,
        None if killers.is_killer(ply, mv) => priority += KILLER_BONUS,
        None => {}
    }
    if let Some(promoted) = mv.promotion() {
        priority += PROMOTION_BASE + promoted.value();
    }
    if checks {
        priority += CHECK_BONUS;
    }
    if Square::CENTER.contains(&mv.to()) {
        priority += CENTER_BONUS;
    }
    priority.saturating_add(history.score(mv))
}

/// Whether `mv` checks the opponent; a provider error counts as no check.
pub(crate) fn gives_check<R: Rules + ?Sized>(position: &R, mv: &Move) -> bool {
    match position.gives_check(mv) {
        Ok(check) => check,
        Err(err) => {
            trace!(mv = %mv, error = %err, "check probe failed, treating as quiet");
            false
        }
    }
}

/// Sort `moves` best-first. Equal priorities keep their input order.
pub fn order<R: Rules + ?Sized>(
    position: &R,
    moves: Vec<Move>,
    ply: usize,
    killers: &KillerTable,
    history: &HistoryTable,
) -> Vec<Move> {
    let flagged = moves
        .into_iter()
        .map(|mv| {
            let checks = gives_check(position, &mv);
            (mv, checks)
        })
        .collect();
    order_flagged(flagged, ply, killers, history)
}

/// Like [`order`], for moves whose check flag the caller already knows.
pub fn order_flagged(
    moves: Vec<(Move, bool)>,
    ply: usize,
    killers: &KillerTable,
    history: &HistoryTable,
) -> Vec<Move> {
    let mut scored: Vec<(i32, Move)> = moves
        .into_iter()
        .map(|(mv, checks)| (priority(&mv, checks, ply, killers, history), mv))
        .collect();
    scored.sort_by_key(|&(priority, _)| Reverse(priority));
    scored.into_iter().map(|(_, mv)| mv).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_core::Board;

    fn find(board: &Board, uci: &str) -> Move {
        board
            .legal_moves()
            .into_iter()
            .find(|m| m.to_uci() == uci)
            .unwrap_or_else(|| panic!("{uci} not legal"))
    }

    fn score(board: &Board, uci: &str) -> i32 {
        let mv = find(board, uci);
        score_move(board, &mv, 0, &KillerTable::new(), &HistoryTable::new())
    }

    #[test]
    fn capture_score_is_mvv_lva() {
        // Pawn d4 and queen h5 can both take the queen on e5.
        let board = Board::from_fen("k7/8/8/4q2Q/3P4/8/8/4K3 w - - 0 1").unwrap();
        let pawn_takes = score(&board, "d4e5");
        let queen_takes = score(&board, "h5e5");
        assert_eq!(pawn_takes, CAPTURE_BASE + 9_000 - 10 + CENTER_BONUS);
        assert!(queen_takes < pawn_takes);
    }

    #[test]
    fn promotion_and_check_add_up() {
        let board = Board::from_fen("k7/4P3/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(score(&board, "e7e8q"), PROMOTION_BASE + 900 + CHECK_BONUS);
        assert_eq!(score(&board, "e7e8n"), PROMOTION_BASE + 320);
    }

    #[test]
    fn quiet_center_move() {
        let board = Board::starting_position();
        assert_eq!(score(&board, "e2e4"), CENTER_BONUS);
        assert_eq!(score(&board, "a2a3"), 0);
    }

    #[test]
    fn killer_only_for_quiet_moves() {
        let board = Board::from_fen("4k3/8/8/4p3/3P4/8/8/4K3 w - - 0 1").unwrap();
        let capture = find(&board, "d4e5");
        let push = find(&board, "d4d5");
        let mut killers = KillerTable::new();
        killers.record(1, &capture);
        killers.record(1, &push);
        let history = HistoryTable::new();

        assert_eq!(
            score_move(&board, &push, 1, &killers, &history),
            KILLER_BONUS + CENTER_BONUS
        );
        assert_eq!(
            score_move(&board, &capture, 1, &killers, &history),
            CAPTURE_BASE + 1_000 - 10 + CENTER_BONUS
        );
        assert_eq!(score_move(&board, &push, 2, &killers, &history), CENTER_BONUS);
    }

    #[test]
    fn history_weight_is_added() {
        let board = Board::starting_position();
        let mv = find(&board, "g1f3");
        let mut history = HistoryTable::new();
        history.record(&mv, 5);
        assert_eq!(score_move(&board, &mv, 0, &KillerTable::new(), &history), 25);
    }

    #[test]
    fn order_puts_captures_first_and_is_stable() {
        let board = Board::from_fen("4k3/8/8/4p3/3P4/8/8/4K3 w - - 0 1").unwrap();
        let moves = board.legal_moves();
        let ordered = order(&board, moves.clone(), 0, &KillerTable::new(), &HistoryTable::new());

        assert_eq!(ordered.len(), moves.len());
        assert_eq!(ordered[0].to_uci(), "d4e5");

        // King moves all score zero and keep their generation order.
        let kings_in: Vec<_> = moves.iter().filter(|m| m.to_uci().starts_with("e1")).collect();
        let kings_out: Vec<_> = ordered.iter().filter(|m| m.to_uci().starts_with("e1")).collect();
        assert_eq!(kings_in, kings_out);
    }

    #[test]
    fn order_handles_empty_list() {
        let board = Board::starting_position();
        let ordered = order(&board, Vec::new(), 0, &KillerTable::new(), &HistoryTable::new());
        assert!(ordered.is_empty());
    }

    #[test]
    fn flagged_order_matches_probed_order() {
        let board = Board::from_fen("k7/4P3/8/4p3/3P4/8/8/4K2R w K - 0 1").unwrap();
        let moves = board.legal_moves();
        let flagged = moves
            .iter()
            .map(|mv| (*mv, board.gives_check(mv).unwrap()))
            .collect();
        let (killers, history) = (KillerTable::new(), HistoryTable::new());
        assert_eq!(
            order_flagged(flagged, 0, &killers, &history),
            order(&board, moves, 0, &killers, &history)
        );
    }

    #[test]
    fn flagged_check_adds_bonus() {
        let board = Board::starting_position();
        let mv = find(&board, "a2a3");
        let (killers, history) = (KillerTable::new(), HistoryTable::new());
        assert_eq!(priority(&mv, true, 0, &killers, &history), CHECK_BONUS);
        assert_eq!(priority(&mv, false, 0, &killers, &history), 0);
    }
}
