//! Packed `u64` move descriptions.
//!
//! Layout (low bits first): from square (6), to square (6), moved piece (3),
//! captured piece (3), promotion piece (3), then single-bit flags.
//! `NO_PIECE_CODE` marks an absent captured/promotion piece.

use crate::game_state::chess_types::{PieceKind, Square};

const FROM_SHIFT: u64 = 0;
const TO_SHIFT: u64 = 6;
const MOVED_PIECE_SHIFT: u64 = 12;
const CAPTURED_PIECE_SHIFT: u64 = 15;
const PROMOTION_PIECE_SHIFT: u64 = 18;

const SQUARE_MASK: u64 = 0x3F;
const PIECE_MASK: u64 = 0x7;
pub const NO_PIECE_CODE: u64 = 0x7;

pub const FLAG_CAPTURE: u64 = 1u64 << 21;
pub const FLAG_DOUBLE_PAWN_PUSH: u64 = 1u64 << 22;
pub const FLAG_EN_PASSANT: u64 = 1u64 << 23;
pub const FLAG_CASTLING: u64 = 1u64 << 24;

#[inline]
pub fn pack_move_description(
    from: Square,
    to: Square,
    moved_piece: PieceKind,
    captured_piece: Option<PieceKind>,
    promotion_piece: Option<PieceKind>,
    flags: u64,
) -> u64 {
    let code = |piece: Option<PieceKind>| piece.map_or(NO_PIECE_CODE, |p| p.index() as u64);

    ((from as u64) << FROM_SHIFT)
        | ((to as u64) << TO_SHIFT)
        | ((moved_piece.index() as u64) << MOVED_PIECE_SHIFT)
        | (code(captured_piece) << CAPTURED_PIECE_SHIFT)
        | (code(promotion_piece) << PROMOTION_PIECE_SHIFT)
        | flags
}

#[inline]
pub fn move_from(move_description: u64) -> Square {
    ((move_description >> FROM_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub fn move_to(move_description: u64) -> Square {
    ((move_description >> TO_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub fn moved_piece(move_description: u64) -> Option<PieceKind> {
    piece_kind_from_code((move_description >> MOVED_PIECE_SHIFT) & PIECE_MASK)
}

#[inline]
pub fn captured_piece(move_description: u64) -> Option<PieceKind> {
    piece_kind_from_code((move_description >> CAPTURED_PIECE_SHIFT) & PIECE_MASK)
}

#[inline]
pub fn promotion_piece(move_description: u64) -> Option<PieceKind> {
    piece_kind_from_code((move_description >> PROMOTION_PIECE_SHIFT) & PIECE_MASK)
}

#[inline]
pub fn is_capture(move_description: u64) -> bool {
    move_description & FLAG_CAPTURE != 0
}

#[inline]
pub fn piece_kind_from_code(code: u64) -> Option<PieceKind> {
    PieceKind::ALL.get(code as usize).copied()
}
