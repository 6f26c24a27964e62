//! Zobrist position keys used for repetition tracking.
//!
//! The keys are generated from a fixed seed so two boards reaching the same
//! placement, side to move, castling rights and en-passant file always hash
//! identically, regardless of move order.

use std::sync::OnceLock;

use crate::game_state::{chess_types::*, game_state::GameState};

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0x9E37_79B9_7F4A_7C15;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for sq in piece {
                *sq = splitmix64(&mut seed);
            }
        }
    }

    let side_to_move = splitmix64(&mut seed);

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = splitmix64(&mut seed);
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = splitmix64(&mut seed);
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Identity of a position for the threefold-repetition rule.
///
/// Clocks and move numbers are deliberately excluded.
pub fn position_key(game_state: &GameState) -> u64 {
    let tables = tables();
    let mut key = 0u64;

    for color in [Color::Light, Color::Dark] {
        for piece in PieceKind::ALL {
            let mut bb = game_state.pieces[color.index()][piece.index()];
            while bb != 0 {
                let sq = bb.trailing_zeros() as usize;
                key ^= tables.piece_square[color.index()][piece.index()][sq];
                bb &= bb - 1;
            }
        }
    }

    if game_state.side_to_move == Color::Dark {
        key ^= tables.side_to_move;
    }

    key ^= tables.castling[(game_state.castling_rights & 0x0F) as usize];

    if let Some(ep_square) = game_state.en_passant_square {
        key ^= tables.en_passant_file[(ep_square % 8) as usize];
    }

    key
}
