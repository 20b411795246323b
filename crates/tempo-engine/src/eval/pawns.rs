//! Pawn structure: doubled, isolated and passed pawns.

use tempo_core::{Color, PieceKind, Square};

use crate::eval::PieceMap;

/// Penalty for each pawn beyond the first on a file.
pub const DOUBLED_PENALTY: i32 = 10;

/// Penalty for a pawn with no friendly pawn on either adjacent file.
pub const ISOLATED_PENALTY: i32 = 15;

/// Bonus per relative rank for a pawn no enemy pawn can stop.
pub const PASSED_BONUS_PER_RANK: i32 = 20;

/// Pawn structure score, White minus Black.
pub fn pawn_structure(map: &PieceMap) -> i32 {
    side_score(map, Color::White) - side_score(map, Color::Black)
}

fn side_score(map: &PieceMap, color: Color) -> i32 {
    let own: Vec<Square> = map.squares_of(PieceKind::Pawn, color).collect();
    let enemy: Vec<Square> = map.squares_of(PieceKind::Pawn, !color).collect();

    let mut per_file = [0i32; 8];
    for sq in &own {
        per_file[sq.file() as usize] += 1;
    }

    let mut score = 0;
    for count in per_file {
        if count > 1 {
            score -= DOUBLED_PENALTY * (count - 1);
        }
    }

    for &sq in &own {
        if is_isolated(sq, &per_file) {
            score -= ISOLATED_PENALTY;
        }
        if is_passed(sq, color, &enemy) {
            score += PASSED_BONUS_PER_RANK * sq.relative_rank(color) as i32;
        }
    }
    score
}

fn is_isolated(sq: Square, per_file: &[i32; 8]) -> bool {
    let file = sq.file() as usize;
    let left = file.checked_sub(1).map_or(0, |f| per_file[f]);
    let right = per_file.get(file + 1).copied().unwrap_or(0);
    left == 0 && right == 0
}

/// No enemy pawn ahead of `sq` on its own or an adjacent file.
fn is_passed(sq: Square, color: Color, enemy: &[Square]) -> bool {
    !enemy.iter().any(|e| {
        e.file().abs_diff(sq.file()) <= 1 && e.relative_rank(color) > sq.relative_rank(color)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempo_core::Board;

    fn structure(fen: &str) -> i32 {
        pawn_structure(&PieceMap::scan(&Board::from_fen(fen).unwrap()))
    }

    #[test]
    fn starting_position_is_neutral() {
        assert_eq!(structure(tempo_core::STARTING_FEN), 0);
    }

    #[test]
    fn doubled_pawns_penalised() {
        // White: e2, e3, d2 (doubled on e). Black: d7, e7 blocking both files.
        let fen = "4k3/3pp3/8/8/8/4P3/3PP3/4K3 w - - 0 1";
        assert_eq!(structure(fen), -DOUBLED_PENALTY);
    }

    #[test]
    fn isolated_pawn_penalised() {
        // White a2 has no neighbour; Black a7 blocks it and is isolated too,
        // so add a black b7 to leave only White's isolani.
        let fen = "4k3/pp6/8/8/8/8/P7/4K3 w - - 0 1";
        assert_eq!(structure(fen), -ISOLATED_PENALTY);
    }

    #[test]
    fn passed_pawn_bonus_grows_with_rank() {
        // Lone white pawn: isolated and passed.
        let on_second = structure("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1");
        let on_sixth = structure("4k3/8/4P3/8/8/8/8/4K3 w - - 0 1");
        assert_eq!(on_second, PASSED_BONUS_PER_RANK - ISOLATED_PENALTY);
        assert_eq!(on_sixth, 5 * PASSED_BONUS_PER_RANK - ISOLATED_PENALTY);
    }

    #[test]
    fn pawn_behind_does_not_stop_passer() {
        // Black pawn on d3 is behind White's e5 pawn.
        let fen = "4k3/8/8/4P3/8/3p4/8/4K3 w - - 0 1";
        let white = 4 * PASSED_BONUS_PER_RANK - ISOLATED_PENALTY;
        // d3 is passed for Black (relative rank 5): e5 is behind it.
        let black = 5 * PASSED_BONUS_PER_RANK - ISOLATED_PENALTY;
        assert_eq!(structure(fen), white - black);
    }

    #[test]
    fn adjacent_enemy_stops_passer() {
        // White e4 faces Black d6; neither is passed.
        let fen = "4k3/8/3p4/8/4P3/8/8/4K3 w - - 0 1";
        assert_eq!(structure(fen), 0);
    }
}
