//! Medium-tier engine: one-ply static evaluation.

use rand::rngs::StdRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::game_state::chess_types::Color;
use crate::move_generation::board::Board;
use crate::moves::chess_move::{ChessMove, MoveRequest};
use crate::search::board_scoring::{BoardScorer, MaterialScorer};

pub struct OnePlyEngine {
    scorer: Box<dyn BoardScorer>,
}

impl OnePlyEngine {
    pub fn new() -> Self {
        Self::with_scorer(Box::new(MaterialScorer))
    }

    pub fn with_scorer(scorer: Box<dyn BoardScorer>) -> Self {
        Self { scorer }
    }
}

impl Default for OnePlyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for OnePlyEngine {
    fn name(&self) -> &'static str {
        "one_ply"
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
            if board.apply(MoveRequest::from(mv)).is_none() {
                continue;
            }
            let value = self.scorer.score(board.position());
            board.undo();

            // Strict comparison keeps the first of equal moves.
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
                .push(format!("one_ply best {} score {}", mv.san, value));
            out.best_move = Some(mv.clone());
        }
        out
    }
}
