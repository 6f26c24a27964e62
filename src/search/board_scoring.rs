//! Pluggable board evaluation interfaces and the baseline material scorer.
//!
//! Search stays modular by delegating static position scoring to this trait,
//! so alternate heuristics can be swapped without altering the engines.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::has_legal_move;

pub const CHECKMATE_BONUS: i32 = 1000;
pub const CHECK_BONUS: i32 = 5;

pub trait BoardScorer: Send + Sync {
    /// Static score of `game_state`; positive favors white.
    fn score(&self, game_state: &GameState) -> i32;
}

/// Material count plus a mate/check bonus for the side that just moved.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl MaterialScorer {
    #[inline]
    pub const fn piece_value(piece: PieceKind) -> i32 {
        match piece {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    #[inline]
    fn material_balance_white_minus_black(game_state: &GameState) -> i32 {
        PieceKind::ALL
            .into_iter()
            .map(|piece| {
                let white_count = game_state.count(Color::Light, piece) as i32;
                let black_count = game_state.count(Color::Dark, piece) as i32;
                (white_count - black_count) * Self::piece_value(piece)
            })
            .sum()
    }
}

impl BoardScorer for MaterialScorer {
    fn score(&self, game_state: &GameState) -> i32 {
        let material = Self::material_balance_white_minus_black(game_state);

        let to_move = game_state.side_to_move;
        if !is_king_in_check(game_state, to_move) {
            return material;
        }

        // Bonus goes to the side NOT to move.
        let sign = match to_move {
            Color::Light => -1,
            Color::Dark => 1,
        };
        let mated = matches!(has_legal_move(game_state), Ok(false));
        let bonus = if mated { CHECKMATE_BONUS } else { CHECK_BONUS };

        material + sign * bonus
    }
}

/// Score a position with the default [`MaterialScorer`].
#[inline]
pub fn evaluate(game_state: &GameState) -> i32 {
    MaterialScorer.score(game_state)
}

#[cfg(test)]
mod tests {
    use super::{evaluate, CHECKMATE_BONUS, CHECK_BONUS};
    use crate::game_state::game_state::GameState;

    fn mirrored(fen: &str) -> String {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().unwrap_or_default();
        let side = fields.next().unwrap_or("w");

        let flipped: Vec<String> = placement
            .split('/')
            .rev()
            .map(|rank| {
                rank.chars()
                    .map(|ch| {
                        if ch.is_ascii_uppercase() {
                            ch.to_ascii_lowercase()
                        } else {
                            ch.to_ascii_uppercase()
                        }
                    })
                    .collect()
            })
            .collect();
        let other_side = if side == "w" { "b" } else { "w" };
        format!("{} {} - - 0 1", flipped.join("/"), other_side)
    }

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(evaluate(&GameState::new_game()), 0);
    }

    #[test]
    fn material_counts_by_color() {
        let up_a_queen = GameState::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN");
        assert_eq!(evaluate(&up_a_queen), 9);

        let black_rook_and_knight =
            GameState::from_fen("4k3/8/2n5/8/8/8/8/r3K3 w - - 0 1").expect("FEN");
        assert_eq!(evaluate(&black_rook_and_knight), -8 - CHECK_BONUS);
    }

    #[test]
    fn check_and_mate_bonuses_favor_side_not_to_move() {
        let checked = GameState::from_fen("4k3/8/8/8/8/8/8/4RK2 b - - 0 1").expect("FEN");
        assert_eq!(evaluate(&checked), 5 + CHECK_BONUS);

        let mated = GameState::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").expect("FEN");
        assert_eq!(evaluate(&mated), 5 - 3 + CHECKMATE_BONUS);
    }

    #[test]
    fn mirrored_positions_negate() {
        for fen in [
            "4k3/8/8/8/8/8/8/4RK2 b - - 0 1",
            "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1",
            "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
            "4k3/8/2n5/8/8/8/8/r3K3 w - - 0 1",
        ] {
            let original = GameState::from_fen(fen).expect("FEN");
            let flipped = GameState::from_fen(&mirrored(fen)).expect("mirrored FEN");
            assert_eq!(evaluate(&original), -evaluate(&flipped), "{fen}");
        }
    }
}
