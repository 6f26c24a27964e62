//! Bitboard position snapshot.
//!
//! `GameState` is the value type the rest of the crate calls a *position*: it
//! can be cloned, stored in the ledger and compared for equality, but it is
//! only ever produced by the rules engine (FEN parsing or `apply_move`).

use crate::chess_errors::RulesResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    /// Standard starting position.
    pub fn new_game() -> Self {
        // The constant is covered by tests; falling back to an empty board
        // keeps this constructor infallible without panicking.
        parse_fen(STARTING_POSITION_FEN).unwrap_or_default()
    }

    #[inline]
    pub fn from_fen(fen: &str) -> RulesResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    /// Color and kind of the piece standing on `square`, if any.
    pub fn piece_on(&self, square: Square) -> Option<(Color, PieceKind)> {
        let mask = 1u64 << square;
        for color in [Color::Light, Color::Dark] {
            for piece in PieceKind::ALL {
                if (self.pieces[color.index()][piece.index()] & mask) != 0 {
                    return Some((color, piece));
                }
            }
        }
        None
    }

    /// Number of `piece` pieces `color` has on the board.
    #[inline]
    pub fn count(&self, color: Color, piece: PieceKind) -> u32 {
        self.pieces[color.index()][piece.index()].count_ones()
    }

    pub fn recalc_occupancy(&mut self) {
        for color in [Color::Light, Color::Dark] {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::Light.index()]
            | self.occupancy_by_color[Color::Dark.index()];
    }
}
