use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attacks::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces[color.index()][PieceKind::King.index()];
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let theirs = &game_state.pieces[attacker_color.index()];
    let occupancy = game_state.occupancy_all;

    // A pawn of the attacking color on X attacks `square` exactly when a pawn
    // of the defending color on `square` would attack X.
    if pawn_attacks(attacker_color.opposite(), square) & theirs[PieceKind::Pawn.index()] != 0 {
        return true;
    }

    if knight_attacks(square) & theirs[PieceKind::Knight.index()] != 0 {
        return true;
    }

    if king_attacks(square) & theirs[PieceKind::King.index()] != 0 {
        return true;
    }

    let diagonal = theirs[PieceKind::Bishop.index()] | theirs[PieceKind::Queen.index()];
    if bishop_attacks(square, occupancy) & diagonal != 0 {
        return true;
    }

    let straight = theirs[PieceKind::Rook.index()] | theirs[PieceKind::Queen.index()];
    rook_attacks(square, occupancy) & straight != 0
}
