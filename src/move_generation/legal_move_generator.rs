//! Full legal move generation pipeline.
//!
//! Generates pseudo-legal moves piece by piece, applies each candidate,
//! filters out moves that leave the mover's king attacked, and optionally
//! annotates check and mate for notation.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::{is_king_in_check, is_square_attacked};
use crate::move_generation::move_generator::{
    GeneratedMove, MoveAnnotations, MoveGenResult, MoveGenerator,
};
use crate::moves::attacks::{
    bishop_attacks, king_attacks, knight_attacks, queen_attacks, rook_attacks,
};
use crate::moves::move_descriptions::{
    pack_move_description, FLAG_CAPTURE, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH, FLAG_EN_PASSANT,
};

const PROMOTION_PIECES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

/// Generator that also annotates checks and mates (needed for SAN).
pub struct LegalMoveGenerator;

/// Generator used by search, where annotations are never read.
pub struct FastLegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        generate_legal_moves_internal(game_state, true)
    }
}

impl MoveGenerator for FastLegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        generate_legal_moves_internal(game_state, false)
    }
}

/// True when the side to move has at least one legal move.
///
/// Stops at the first legal candidate, which keeps mate and stalemate
/// detection cheap inside search.
pub fn has_legal_move(game_state: &GameState) -> MoveGenResult<bool> {
    let mut pseudo = Vec::<u64>::with_capacity(64);
    generate_pseudo_legal_moves(game_state, &mut pseudo);

    for mv in pseudo {
        let next = apply_move(game_state, mv)?;
        if !is_king_in_check(&next, game_state.side_to_move) {
            return Ok(true);
        }
    }
    Ok(false)
}

fn generate_legal_moves_internal(
    game_state: &GameState,
    annotate: bool,
) -> MoveGenResult<Vec<GeneratedMove>> {
    let mut pseudo = Vec::<u64>::with_capacity(128);
    generate_pseudo_legal_moves(game_state, &mut pseudo);

    let mut legal = Vec::<GeneratedMove>::with_capacity(pseudo.len());
    for mv in pseudo {
        let next = apply_move(game_state, mv)?;

        // Illegal if own king is in check after move.
        if is_king_in_check(&next, game_state.side_to_move) {
            continue;
        }

        let annotations = if annotate {
            annotate_move(&next)?
        } else {
            MoveAnnotations::default()
        };

        legal.push(GeneratedMove {
            move_description: mv,
            game_after_move: next,
            annotations,
        });
    }

    Ok(legal)
}

/// Check and mate flags for the position reached after a move.
pub fn annotate_move(next: &GameState) -> MoveGenResult<MoveAnnotations> {
    if !is_king_in_check(next, next.side_to_move) {
        return Ok(MoveAnnotations::default());
    }

    Ok(MoveAnnotations {
        gives_check: true,
        is_checkmate: !has_legal_move(next)?,
    })
}

pub fn generate_pseudo_legal_moves(game_state: &GameState, out: &mut Vec<u64>) {
    generate_pawn_moves(game_state, out);
    generate_piece_moves(game_state, PieceKind::Knight, |sq, _| knight_attacks(sq), out);
    generate_piece_moves(game_state, PieceKind::Bishop, bishop_attacks, out);
    generate_piece_moves(game_state, PieceKind::Rook, rook_attacks, out);
    generate_piece_moves(game_state, PieceKind::Queen, queen_attacks, out);
    generate_piece_moves(game_state, PieceKind::King, |sq, _| king_attacks(sq), out);
    generate_castling_moves(game_state, out);
}

fn generate_piece_moves(
    game_state: &GameState,
    piece: PieceKind,
    attacks: fn(Square, u64) -> u64,
    out: &mut Vec<u64>,
) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];

    let mut pieces = game_state.pieces[side.index()][piece.index()];
    while pieces != 0 {
        let from = pieces.trailing_zeros() as Square;
        let mut targets = attacks(from, game_state.occupancy_all) & !own_occ;

        while targets != 0 {
            let to = targets.trailing_zeros() as Square;
            let captured = enemy_piece_on(game_state, to);
            let flags = if captured.is_some() { FLAG_CAPTURE } else { 0 };
            out.push(pack_move_description(from, to, piece, captured, None, flags));
            targets &= targets - 1;
        }

        pieces &= pieces - 1;
    }
}

fn generate_pawn_moves(game_state: &GameState, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let (forward, start_rank, promotion_rank): (i8, u8, u8) = match side {
        Color::Light => (8, 1, 7),
        Color::Dark => (-8, 6, 0),
    };
    let empty = !game_state.occupancy_all;

    let mut pawns = game_state.pieces[side.index()][PieceKind::Pawn.index()];
    while pawns != 0 {
        let from = pawns.trailing_zeros() as Square;
        pawns &= pawns - 1;

        let one_step = (from as i8 + forward) as Square;
        if (1u64 << one_step) & empty != 0 {
            push_pawn_move(out, from, one_step, None, 0, promotion_rank);

            if from / 8 == start_rank {
                let two_step = (one_step as i8 + forward) as Square;
                if (1u64 << two_step) & empty != 0 {
                    out.push(pack_move_description(
                        from,
                        two_step,
                        PieceKind::Pawn,
                        None,
                        None,
                        FLAG_DOUBLE_PAWN_PUSH,
                    ));
                }
            }
        }

        for file_delta in [-1i8, 1] {
            let file = (from % 8) as i8 + file_delta;
            if !(0..8).contains(&file) {
                continue;
            }
            let to = (from as i8 + forward + file_delta) as Square;

            if let Some(captured) = enemy_piece_on(game_state, to) {
                push_pawn_move(out, from, to, Some(captured), FLAG_CAPTURE, promotion_rank);
            } else if game_state.en_passant_square == Some(to) {
                out.push(pack_move_description(
                    from,
                    to,
                    PieceKind::Pawn,
                    Some(PieceKind::Pawn),
                    None,
                    FLAG_CAPTURE | FLAG_EN_PASSANT,
                ));
            }
        }
    }
}

fn push_pawn_move(
    out: &mut Vec<u64>,
    from: Square,
    to: Square,
    captured: Option<PieceKind>,
    flags: u64,
    promotion_rank: u8,
) {
    if to / 8 == promotion_rank {
        for promo in PROMOTION_PIECES {
            out.push(pack_move_description(
                from,
                to,
                PieceKind::Pawn,
                captured,
                Some(promo),
                flags,
            ));
        }
    } else {
        out.push(pack_move_description(from, to, PieceKind::Pawn, captured, None, flags));
    }
}

struct CastlingLane {
    color: Color,
    right: CastlingRights,
    king_from: Square,
    king_to: Square,
    must_be_empty: u64,
    must_be_safe: [Square; 2],
}

const CASTLING_LANES: [CastlingLane; 4] = [
    CastlingLane {
        color: Color::Light,
        right: CASTLE_LIGHT_KINGSIDE,
        king_from: 4,
        king_to: 6,
        must_be_empty: (1 << 5) | (1 << 6),
        must_be_safe: [5, 6],
    },
    CastlingLane {
        color: Color::Light,
        right: CASTLE_LIGHT_QUEENSIDE,
        king_from: 4,
        king_to: 2,
        must_be_empty: (1 << 1) | (1 << 2) | (1 << 3),
        must_be_safe: [3, 2],
    },
    CastlingLane {
        color: Color::Dark,
        right: CASTLE_DARK_KINGSIDE,
        king_from: 60,
        king_to: 62,
        must_be_empty: (1 << 61) | (1 << 62),
        must_be_safe: [61, 62],
    },
    CastlingLane {
        color: Color::Dark,
        right: CASTLE_DARK_QUEENSIDE,
        king_from: 60,
        king_to: 58,
        must_be_empty: (1 << 57) | (1 << 58) | (1 << 59),
        must_be_safe: [59, 58],
    },
];

fn generate_castling_moves(game_state: &GameState, out: &mut Vec<u64>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let king_bb = game_state.pieces[side.index()][PieceKind::King.index()];
    let rooks = game_state.pieces[side.index()][PieceKind::Rook.index()];

    for lane in CASTLING_LANES.iter().filter(|lane| lane.color == side) {
        let rook_corner = match lane.king_to {
            6 => 7,
            2 => 0,
            62 => 63,
            _ => 56,
        };
        let available = game_state.castling_rights & lane.right != 0
            && king_bb == 1u64 << lane.king_from
            && rooks & (1u64 << rook_corner) != 0
            && game_state.occupancy_all & lane.must_be_empty == 0
            // Cannot castle out of, through, or into check.
            && !is_square_attacked(game_state, lane.king_from, enemy)
            && lane
                .must_be_safe
                .iter()
                .all(|&sq| !is_square_attacked(game_state, sq, enemy));

        if available {
            out.push(pack_move_description(
                lane.king_from,
                lane.king_to,
                PieceKind::King,
                None,
                None,
                FLAG_CASTLING,
            ));
        }
    }
}

#[inline]
fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    let enemy = game_state.side_to_move.opposite();
    let mask = 1u64 << square;
    PieceKind::ALL
        .into_iter()
        .find(|piece| game_state.pieces[enemy.index()][piece.index()] & mask != 0)
}
