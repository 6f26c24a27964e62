//! Easy-tier engine.
//!
//! Prefers a random capture, then a random move that does not leave the
//! position checkmated, then any random move.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;

use crate::engines::engine_trait::{Engine, EngineOutput};
use crate::move_generation::board::Board;
use crate::moves::chess_move::{ChessMove, MoveRequest};

#[derive(Debug, Default)]
pub struct RandomCaptureEngine;

impl RandomCaptureEngine {
    pub fn new() -> Self {
        Self
    }
}

impl Engine for RandomCaptureEngine {
    fn name(&self) -> &'static str {
        "random_capture"
    }

    fn choose_move(
        &mut self,
        board: &mut Board,
        legal: &[ChessMove],
        rng: &mut StdRng,
    ) -> EngineOutput {
        let mut out = EngineOutput::default();

        let captures: Vec<&ChessMove> = legal.iter().filter(|mv| mv.is_capture()).collect();
        out.info_lines.push(format!(
            "random_capture legal_moves {} captures {}",
            legal.len(),
            captures.len()
        ));

        if let Some(picked) = captures.choose(rng) {
            out.best_move = Some((*picked).clone());
            return out;
        }

        let safe: Vec<&ChessMove> = legal
            .iter()
            .filter(|mv| !leads_to_checkmate(board, mv))
            .collect();
        out.info_lines
            .push(format!("random_capture safe_moves {}", safe.len()));

        out.best_move = match safe.choose(rng) {
            Some(picked) => Some((*picked).clone()),
            None => legal.choose(rng).cloned(),
        };
        out
    }
}

fn leads_to_checkmate(board: &mut Board, mv: &ChessMove) -> bool {
    if board.apply(MoveRequest::from(mv)).is_none() {
        return false;
    }
    let mate = board.is_checkmate();
    board.undo();
    mate
}
