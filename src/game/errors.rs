//! Errors surfaced by the game orchestrator.
//!
//! Every variant is recoverable: a rejected request leaves the game exactly
//! as it was.

use thiserror::Error;

use crate::chess_errors::RulesError;
use crate::config::ConfigError;
use crate::persistence::errors::PersistenceError;

#[derive(Debug, Error)]
pub enum GameError {
    /// The requested move is not legal in the current position.
    #[error("invalid move: {0}")]
    InvalidMove(String),

    /// The human tried to act while the artificial side is to move.
    #[error("it is not your turn")]
    NotYourTurn,

    #[error("the game is over")]
    GameOver,

    #[error("a draw offer is already pending")]
    DrawOfferPending,

    #[error("there is no pending draw offer")]
    NoDrawOffer,

    #[error("not enough moves to undo")]
    NothingToUndo,

    #[error(transparent)]
    Rules(#[from] RulesError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type GameResult<T> = Result<T, GameError>;
