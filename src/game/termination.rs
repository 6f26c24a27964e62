//! How a game ended.

use std::fmt;

use serde::Serialize;

use crate::game_state::chess_types::Color;
use crate::move_generation::board::Board;
use crate::persistence::models::GameOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    ThreefoldRepetition,
    InsufficientMaterial,
    FiftyMoveRule,
}

/// Final result of a game. Once set it never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum TerminationResult {
    /// Winner.
    Checkmate(Color),
    Stalemate,
    Draw(DrawReason),
    /// Winner: the side whose flag did not fall.
    Timeout(Color),
    /// Winner: the side that did not resign.
    Resignation(Color),
    Agreement,
}

impl TerminationResult {
    /// Inspect `board` after a move; `None` while play continues.
    pub fn detect(board: &Board) -> Option<Self> {
        if board.is_checkmate() {
            return Some(Self::Checkmate(board.side_to_move().opposite()));
        }
        if board.is_stalemate() {
            return Some(Self::Stalemate);
        }
        if board.is_threefold_repetition() {
            return Some(Self::Draw(DrawReason::ThreefoldRepetition));
        }
        if board.is_insufficient_material() {
            return Some(Self::Draw(DrawReason::InsufficientMaterial));
        }
        if board.is_fifty_move_rule() {
            return Some(Self::Draw(DrawReason::FiftyMoveRule));
        }
        None
    }

    pub fn winner(&self) -> Option<Color> {
        match *self {
            Self::Checkmate(winner) | Self::Timeout(winner) | Self::Resignation(winner) => {
                Some(winner)
            }
            Self::Stalemate | Self::Draw(_) | Self::Agreement => None,
        }
    }

    /// Outcome as recorded in game history.
    pub fn outcome(&self) -> GameOutcome {
        match self.winner() {
            Some(Color::Light) => GameOutcome::White,
            Some(Color::Dark) => GameOutcome::Black,
            None => GameOutcome::Draw,
        }
    }

    /// Human-readable game-over message.
    pub fn banner(&self) -> String {
        match *self {
            Self::Checkmate(winner) => format!("Game Over: {} wins by checkmate", winner.title()),
            Self::Stalemate => "Game Over: Draw (Stalemate)".to_string(),
            Self::Draw(DrawReason::ThreefoldRepetition) => {
                "Game Over: Draw (Threefold repetition)".to_string()
            }
            Self::Draw(DrawReason::InsufficientMaterial) => {
                "Game Over: Draw (Insufficient material)".to_string()
            }
            Self::Draw(DrawReason::FiftyMoveRule) => "Game Over: Draw (Fifty-move rule)".to_string(),
            Self::Timeout(winner) => format!("Time out! {} wins.", winner.title()),
            Self::Resignation(winner) => format!(
                "{} resigns. {} wins.",
                winner.opposite().title(),
                winner.title()
            ),
            Self::Agreement => "Game drawn by agreement".to_string(),
        }
    }
}

impl fmt::Display for TerminationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.banner())
    }
}
