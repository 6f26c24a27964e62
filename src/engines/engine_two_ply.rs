//! Hard-tier engine: two-ply minimax without pruning.
//!
//! Each candidate is scored by the opponent's best static reply; the engine
//! then picks the candidate with the best worst case.

use rand::rngs::StdRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::chess_types::Color;
use crate::move_generation::board::Board;
use crate::moves::chess_move::{ChessMove, MoveRequest};
use crate::search::board_scoring::{BoardScorer, MaterialScorer};

pub struct TwoPlyEngine {
    scorer: Box<dyn BoardScorer>,
}

impl TwoPlyEngine {
    pub fn new() -> Self {
        Self::with_scorer(Box::new(MaterialScorer))
    }

    pub fn with_scorer(scorer: Box<dyn BoardScorer>) -> Self {
        Self { scorer }
    }

    /// The opponent's best reply score after `mv`, seen from the mover.
    ///
    /// With no reply available the candidate gets the mover's best possible
    /// value.
    fn worst_case(&self, board: &mut Board, mv: &ChessMove, maximizing: bool) -> Option<i32> {
        board.apply(MoveRequest::from(mv))?;

        let mut worst = if maximizing { i32::MAX } else { i32::MIN };
        for reply in board.legal_moves_verbose() {
            if board.apply(MoveRequest::from(&reply)).is_none() {
                continue;
            }
            let value = self.scorer.score(board.position());
            board.undo();

            worst = if maximizing {
                worst.min(value)
            } else {
                worst.max(value)
            };
        }

        board.undo();
        Some(worst)
    }
}

impl Default for TwoPlyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for TwoPlyEngine {
    fn name(&self) -> &'static str {
        "two_ply"
    }

    fn choose_move(
        &mut self,
        board: &mut Board,
        legal: &[ChessMove],
        _rng: &mut StdRng,
    ) -> EngineOutput {
        let maximizing = board.side_to_move() == Color::Light;
        let mut best: Option<(i32, &ChessMove)> = None;

        for mv in legal {
            let Some(value) = self.worst_case(board, mv, maximizing) else {
                continue;
            };

            let better = match best {
                None => true,
                Some((best_value, _)) if maximizing => value > best_value,
                Some((best_value, _)) => value < best_value,
            };
            if better {
                best = Some((value, mv));
            }
        }

        let mut out = EngineOutput::default();
        if let Some((value, mv)) = best {
            out.info_lines
                .push(format!("two_ply best {} worst_case {}", mv.san, value));
            out.best_move = Some(mv.clone());
        }
        out
    }
}
