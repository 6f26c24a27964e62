//! Difficulty-tiered move selection for the artificial side.
//!
//! The selector handles the parts shared by every tier (escaping check and the
//! random fallback) and delegates quiet positions to the tier's `Engine`.

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

use crate::engines::engine_one_ply::OnePlyEngine;
use crate::engines::engine_random::RandomCaptureEngine;
use crate::engines::engine_trait::{Difficulty, Engine};
use crate::engines::engine_two_ply::TwoPlyEngine;
use crate::move_generation::board::Board;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::moves::chess_move::{ChessMove, MoveRequest};

pub fn build_engine(difficulty: Difficulty) -> Box<dyn Engine> {
    match difficulty {
        Difficulty::Easy => Box::new(RandomCaptureEngine::new()),
        Difficulty::Medium => Box::new(OnePlyEngine::new()),
        Difficulty::Hard => Box::new(TwoPlyEngine::new()),
    }
}

pub struct MoveSelector {
    difficulty: Difficulty,
    engine: Box<dyn Engine>,
    rng: StdRng,
}

impl MoveSelector {
    /// Reproducible selector; the orchestrator seeds one per deliberation.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self {
            difficulty,
            engine: build_engine(difficulty),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Choose a move for the side to move of `board`.
    ///
    /// Works on a private copy, so `board` is never modified. Returns `None`
    /// when there is no legal move, or when in check with no escape.
    pub fn select_move(&mut self, board: &Board) -> Option<ChessMove> {
        let mut scratch = board.clone();
        let legal = scratch.legal_moves_verbose();
        if legal.is_empty() {
            return None;
        }

        if scratch.is_check() {
            let escapes: Vec<&ChessMove> = legal
                .iter()
                .filter(|mv| escapes_check(&mut scratch, mv))
                .collect();
            debug!(escapes = escapes.len(), "selecting check escape");
            return escapes.choose(&mut self.rng).map(|mv| (*mv).clone());
        }

        let out = self
            .engine
            .choose_move(&mut scratch, &legal, &mut self.rng);
        for line in &out.info_lines {
            debug!(difficulty = %self.difficulty, engine = self.engine.name(), "{line}");
        }

        out.best_move
            .or_else(|| legal.choose(&mut self.rng).cloned())
    }
}

fn escapes_check(board: &mut Board, mv: &ChessMove) -> bool {
    let mover = board.side_to_move();
    if board.apply(MoveRequest::from(mv)).is_none() {
        return false;
    }
    let safe = !is_king_in_check(board.position(), mover);
    board.undo();
    safe
}
