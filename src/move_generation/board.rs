//! Stateful board used by the orchestrator and the move selector.
//!
//! `Board` wraps a `GameState` with an undo stack and the position keys needed
//! for repetition detection. Every position it holds was produced by FEN
//! parsing or `apply_move`, so callers never touch bitboards directly.

use tracing::error;

use crate::chess_errors::RulesResult;
use crate::game_state::chess_rules::{FIFTY_MOVE_RULE_HALFMOVES, REPETITION_DRAW_COUNT};
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::GameState;
use crate::game_state::position_key::position_key;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_generator::{
    annotate_move, has_legal_move, FastLegalMoveGenerator, LegalMoveGenerator,
};
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerator};
use crate::moves::chess_move::{ChessMove, MoveRequest};
use crate::moves::move_descriptions::{move_from, move_to, promotion_piece};
use crate::utils::san::move_to_san;

const DARK_SQUARES: u64 = 0xAA55_AA55_AA55_AA55;

#[derive(Debug, Clone)]
pub struct Board {
    state: GameState,
    history: Vec<(GameState, ChessMove)>,
    repetition_keys: Vec<u64>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self::from_state(GameState::new_game())
    }

    pub fn from_fen(fen: &str) -> RulesResult<Self> {
        Ok(Self::from_state(GameState::from_fen(fen)?))
    }

    fn from_state(state: GameState) -> Self {
        let key = position_key(&state);
        Self {
            state,
            history: Vec::new(),
            repetition_keys: vec![key],
        }
    }

    #[inline]
    pub fn position(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    pub fn fen(&self) -> String {
        self.state.get_fen()
    }

    /// Moves applied since this board was created, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ChessMove> {
        self.history.iter().map(|(_, mv)| mv)
    }

    /// Legal moves in SAN.
    pub fn legal_moves(&self) -> Vec<String> {
        self.legal_moves_verbose()
            .into_iter()
            .map(|mv| mv.san)
            .collect()
    }

    /// Legal moves with full detail, in generation order.
    pub fn legal_moves_verbose(&self) -> Vec<ChessMove> {
        let legal = generate(&LegalMoveGenerator, &self.state);
        legal
            .iter()
            .map(|mv| {
                ChessMove::from_description(
                    mv.move_description,
                    self.state.side_to_move,
                    move_to_san(mv, &legal),
                )
            })
            .collect()
    }

    /// Apply a requested move if it is legal.
    ///
    /// A request without a promotion piece that lands on the last rank
    /// promotes to a queen. Returns `None`, leaving the board unchanged, when
    /// no legal move matches.
    pub fn apply(&mut self, request: MoveRequest) -> Option<ChessMove> {
        let legal = generate(&FastLegalMoveGenerator, &self.state);
        let wanted_promotion = request.promotion.unwrap_or(PieceKind::Queen);

        let mut chosen = legal
            .iter()
            .find(|mv| {
                let desc = mv.move_description;
                move_from(desc) == request.from
                    && move_to(desc) == request.to
                    && promotion_piece(desc).is_none_or(|promo| promo == wanted_promotion)
            })?
            .clone();

        chosen.annotations = match annotate_move(&chosen.game_after_move) {
            Ok(annotations) => annotations,
            Err(err) => {
                error!(%err, "annotating move failed");
                return None;
            }
        };

        let mv = ChessMove::from_description(
            chosen.move_description,
            self.state.side_to_move,
            move_to_san(&chosen, &legal),
        );

        let previous = std::mem::replace(&mut self.state, chosen.game_after_move);
        self.history.push((previous, mv.clone()));
        self.repetition_keys.push(position_key(&self.state));

        Some(mv)
    }

    /// Take back the most recent move.
    pub fn undo(&mut self) -> Option<ChessMove> {
        let (previous, mv) = self.history.pop()?;
        self.state = previous;
        self.repetition_keys.pop();
        Some(mv)
    }

    pub fn is_check(&self) -> bool {
        is_king_in_check(&self.state, self.state.side_to_move)
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_check() && !self.has_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && !self.has_moves()
    }

    pub fn is_threefold_repetition(&self) -> bool {
        let Some(current) = self.repetition_keys.last() else {
            return false;
        };
        self.repetition_keys
            .iter()
            .filter(|key| *key == current)
            .count()
            >= REPETITION_DRAW_COUNT
    }

    /// K v K, K+minor v K, or only same-colored bishops besides the kings.
    pub fn is_insufficient_material(&self) -> bool {
        let pieces = &self.state.pieces;
        let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen]
            .into_iter()
            .any(|piece| pieces[0][piece.index()] | pieces[1][piece.index()] != 0);
        if heavy_or_pawn {
            return false;
        }

        let knights = pieces[0][PieceKind::Knight.index()] | pieces[1][PieceKind::Knight.index()];
        let bishops = pieces[0][PieceKind::Bishop.index()] | pieces[1][PieceKind::Bishop.index()];
        let minors = knights.count_ones() + bishops.count_ones();

        minors <= 1
            || (knights == 0 && (bishops & DARK_SQUARES == 0 || bishops & !DARK_SQUARES == 0))
    }

    pub fn is_fifty_move_rule(&self) -> bool {
        self.state.halfmove_clock >= FIFTY_MOVE_RULE_HALFMOVES
    }

    pub fn is_draw(&self) -> bool {
        self.is_fifty_move_rule()
            || self.is_stalemate()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
    }

    pub fn is_game_over(&self) -> bool {
        self.is_checkmate() || self.is_draw()
    }

    fn has_moves(&self) -> bool {
        match has_legal_move(&self.state) {
            Ok(found) => found,
            Err(err) => {
                error!(%err, "legal move search failed");
                false
            }
        }
    }
}

fn generate(generator: &dyn MoveGenerator, state: &GameState) -> Vec<GeneratedMove> {
    generator.generate_legal_moves(state).unwrap_or_else(|err| {
        error!(%err, "move generation failed");
        Vec::new()
    })
}
