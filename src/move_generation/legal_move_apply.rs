//! Copy-make move application.
//!
//! `apply_move` never mutates its input; it returns the successor position,
//! which is what lets the board keep a cheap history stack for undo.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::move_descriptions::{
    move_from, move_to, promotion_piece, FLAG_CAPTURE, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH,
    FLAG_EN_PASSANT,
};

pub fn apply_move(game_state: &GameState, move_description: u64) -> MoveGenResult<GameState> {
    let from = move_from(move_description);
    let to = move_to(move_description);
    let from_mask = 1u64 << from;
    let to_mask = 1u64 << to;

    let moving_color = game_state.side_to_move;
    let enemy_color = moving_color.opposite();

    let moved_piece = match game_state.piece_on(from) {
        Some((color, piece)) if color == moving_color => piece,
        _ => {
            return Err(MoveGenerationError::InvalidState(format!(
                "no {moving_color} piece on square {from}"
            )))
        }
    };

    let mut next = game_state.clone();

    next.pieces[moving_color.index()][moved_piece.index()] &= !from_mask;

    if (move_description & FLAG_EN_PASSANT) != 0 {
        let capture_sq = match moving_color {
            Color::Light => to.checked_sub(8),
            Color::Dark => to.checked_add(8),
        }
        .ok_or_else(|| {
            MoveGenerationError::InvalidState(format!("bad en-passant target {to}"))
        })?;
        next.pieces[enemy_color.index()][PieceKind::Pawn.index()] &= !(1u64 << capture_sq);
    } else if (move_description & FLAG_CAPTURE) != 0 {
        for bb in next.pieces[enemy_color.index()].iter_mut() {
            *bb &= !to_mask;
        }
    }

    let placed = promotion_piece(move_description).unwrap_or(moved_piece);
    next.pieces[moving_color.index()][placed.index()] |= to_mask;

    if (move_description & FLAG_CASTLING) != 0 && moved_piece == PieceKind::King {
        match (moving_color, from, to) {
            (Color::Light, 4, 6) => move_rook(&mut next, moving_color, 7, 5),
            (Color::Light, 4, 2) => move_rook(&mut next, moving_color, 0, 3),
            (Color::Dark, 60, 62) => move_rook(&mut next, moving_color, 63, 61),
            (Color::Dark, 60, 58) => move_rook(&mut next, moving_color, 56, 59),
            _ => {}
        }
    }

    update_castling_rights(&mut next, moving_color, from, to, moved_piece);

    next.en_passant_square = if (move_description & FLAG_DOUBLE_PAWN_PUSH) != 0 {
        Some((from + to) / 2)
    } else {
        None
    };

    if moved_piece == PieceKind::Pawn || (move_description & FLAG_CAPTURE) != 0 {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Dark {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy_color;
    next.recalc_occupancy();

    Ok(next)
}

fn move_rook(game_state: &mut GameState, color: Color, from: Square, to: Square) {
    let rooks = &mut game_state.pieces[color.index()][PieceKind::Rook.index()];
    *rooks &= !(1u64 << from);
    *rooks |= 1u64 << to;
}

fn update_castling_rights(
    game_state: &mut GameState,
    moving_color: Color,
    from: Square,
    to: Square,
    moved_piece: PieceKind,
) {
    if moved_piece == PieceKind::King {
        game_state.castling_rights &= match moving_color {
            Color::Light => !(CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE),
            Color::Dark => !(CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE),
        };
    }

    // A rook leaving its corner, or being captured there, loses that right.
    for square in [from, to] {
        game_state.castling_rights &= match square {
            0 => !CASTLE_LIGHT_QUEENSIDE,
            7 => !CASTLE_LIGHT_KINGSIDE,
            56 => !CASTLE_DARK_QUEENSIDE,
            63 => !CASTLE_DARK_KINGSIDE,
            _ => 0x0F,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::apply_move;
    use crate::game_state::chess_types::{Color, PieceKind, CASTLE_DARK_KINGSIDE};
    use crate::game_state::game_state::GameState;
    use crate::moves::move_descriptions::{
        pack_move_description, FLAG_CAPTURE, FLAG_CASTLING, FLAG_DOUBLE_PAWN_PUSH,
        FLAG_EN_PASSANT,
    };

    #[test]
    fn double_push_sets_en_passant_square() {
        let game = GameState::new_game();
        let mv = pack_move_description(12, 28, PieceKind::Pawn, None, None, FLAG_DOUBLE_PAWN_PUSH);
        let next = apply_move(&game, mv).expect("move should apply");

        assert_eq!(next.en_passant_square, Some(20));
        assert_eq!(next.side_to_move, Color::Dark);
        assert_eq!(
            next.get_fen(),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let game =
            GameState::from_fen("r3k2r/8/8/8/8/8/8/4K3 b kq - 0 1").expect("FEN should parse");
        let mv = pack_move_description(60, 62, PieceKind::King, None, None, FLAG_CASTLING);
        let next = apply_move(&game, mv).expect("castle should apply");

        assert_eq!(next.piece_on(61), Some((Color::Dark, PieceKind::Rook)));
        assert_eq!(next.piece_on(63), None);
        assert_eq!(next.castling_rights & CASTLE_DARK_KINGSIDE, 0);
        assert_eq!(next.fullmove_number, 2);
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        let game =
            GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").expect("FEN should parse");
        let mv = pack_move_description(
            36,
            43,
            PieceKind::Pawn,
            Some(PieceKind::Pawn),
            None,
            FLAG_CAPTURE | FLAG_EN_PASSANT,
        );
        let next = apply_move(&game, mv).expect("en passant should apply");

        assert_eq!(next.piece_on(35), None);
        assert_eq!(next.piece_on(43), Some((Color::Light, PieceKind::Pawn)));
        assert_eq!(next.count(Color::Dark, PieceKind::Pawn), 0);
    }

    #[test]
    fn moving_from_an_empty_square_is_rejected() {
        let game = GameState::new_game();
        let mv = pack_move_description(27, 35, PieceKind::Pawn, None, None, 0);
        assert!(apply_move(&game, mv).is_err());
    }
}
