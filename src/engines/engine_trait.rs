//! Engine abstraction layer used by the move selector.
//!
//! Each difficulty tier is an `Engine`; the selector picks one at runtime and
//! only calls it when the side to move is not in check.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::chess_errors::RulesError;
use crate::move_generation::board::Board;
use crate::moves::chess_move::ChessMove;

/// Strength tier of the artificial opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub const fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(RulesError::UnknownValue {
                kind: "difficulty",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<ChessMove>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &'static str;

    /// Pick a move for the side to move.
    ///
    /// `board` is a scratch copy the engine may apply and undo moves on, but
    /// it must be left in the position it was handed over in. `legal` is the
    /// non-empty legal move list of that position.
    fn choose_move(
        &mut self,
        board: &mut Board,
        legal: &[ChessMove],
        rng: &mut StdRng,
    ) -> EngineOutput;
}
