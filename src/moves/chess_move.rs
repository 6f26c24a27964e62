//! Move values exchanged between the rules engine and its callers.

use std::fmt;
use std::str::FromStr;

use crate::chess_errors::{RulesError, RulesResult};
use crate::game_state::chess_types::{Color, PieceKind, Square};
use crate::moves::move_descriptions::{
    captured_piece, move_from, move_to, moved_piece, promotion_piece,
};
use crate::utils::algebraic::{algebraic_to_square, file_char, rank_char};

/// A move that has been validated and notated by the rules engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub color: Color,
    pub piece: PieceKind,
    pub captured: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    /// Standard algebraic notation, including `+`/`#` suffixes.
    pub san: String,
    pub description: u64,
}

impl ChessMove {
    pub(crate) fn from_description(description: u64, color: Color, san: String) -> Self {
        Self {
            from: move_from(description),
            to: move_to(description),
            color,
            piece: moved_piece(description).unwrap_or(PieceKind::Pawn),
            captured: captured_piece(description),
            promotion: promotion_piece(description),
            san,
            description,
        }
    }

    #[inline]
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    /// Coordinate form, e.g. `e2e4` or `e7e8q`.
    pub fn coordinate(&self) -> String {
        MoveRequest::from(self).to_string()
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.san)
    }
}

/// A move as requested by a player: two squares and an optional promotion.
///
/// When the request reaches a promotion square without naming a piece, the
/// rules engine promotes to a queen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl MoveRequest {
    pub fn new(from: &str, to: &str) -> RulesResult<Self> {
        Ok(Self {
            from: algebraic_to_square(from)?,
            to: algebraic_to_square(to)?,
            promotion: None,
        })
    }

    pub fn with_promotion(mut self, piece: PieceKind) -> Self {
        self.promotion = Some(piece);
        self
    }
}

impl From<&ChessMove> for MoveRequest {
    fn from(mv: &ChessMove) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
            promotion: mv.promotion,
        }
    }
}

impl FromStr for MoveRequest {
    type Err = RulesError;

    /// Parses coordinate text such as `e2e4` or `a7a8n`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(RulesError::InvalidMoveText(text.to_string()));
        }

        let request = Self::new(&text[0..2], &text[2..4])?;
        match text[4..].chars().next() {
            None => Ok(request),
            Some(ch) => match PieceKind::from_letter(ch) {
                Some(piece @ (PieceKind::Queen | PieceKind::Rook | PieceKind::Bishop | PieceKind::Knight)) => {
                    Ok(request.with_promotion(piece))
                }
                _ => Err(RulesError::InvalidMoveText(text.to_string())),
            },
        }
    }
}

impl fmt::Display for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            file_char(self.from),
            rank_char(self.from),
            file_char(self.to),
            rank_char(self.to)
        )?;
        if let Some(piece) = self.promotion {
            write!(f, "{}", piece.letter())?;
        }
        Ok(())
    }
}
