//! Errors raised by the rules layer.
//!
//! Parsing (FEN, coordinates, move text) and move generation share this enum
//! so callers above the rules engine only match on a single type.
//!
//! Every variant is recoverable: bad input is rejected and the position that
//! was being inspected is left untouched.

use thiserror::Error;

use crate::move_generation::move_generator::MoveGenerationError;

/// Unified error type for the rules engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RulesError {
    /// A FEN string could not be interpreted.
    ///
    /// Payload: a description of the offending field.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// A square coordinate such as `e4` was malformed or out of range.
    #[error("invalid square: {0}")]
    InvalidSquare(String),

    /// Move text (coordinate or SAN) could not be parsed.
    #[error("invalid move text: {0}")]
    InvalidMoveText(String),

    /// A named setting such as a side or difficulty had an unrecognised value.
    #[error("unknown {kind} '{value}'")]
    UnknownValue { kind: &'static str, value: String },

    /// Move generation hit an inconsistent position.
    #[error(transparent)]
    MoveGeneration(#[from] MoveGenerationError),
}

/// Result alias for rules-engine operations.
pub type RulesResult<T> = Result<T, RulesError>;
