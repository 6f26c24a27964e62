//! Standard algebraic notation for generated moves.

use crate::game_state::chess_types::PieceKind;
use crate::move_generation::move_generator::GeneratedMove;
use crate::moves::move_descriptions::{
    is_capture, move_from, move_to, moved_piece, promotion_piece, FLAG_CASTLING,
};
use crate::utils::algebraic::{file_char, rank_char};

/// Render `mv` in SAN.
///
/// `legal` is the full legal move list of the position `mv` was generated
/// from; it is only consulted for disambiguation. Check and mate suffixes come
/// from `mv.annotations`.
pub fn move_to_san(mv: &GeneratedMove, legal: &[GeneratedMove]) -> String {
    let description = mv.move_description;
    let from = move_from(description);
    let to = move_to(description);
    let piece = moved_piece(description).unwrap_or(PieceKind::Pawn);

    let mut san = String::with_capacity(8);

    if description & FLAG_CASTLING != 0 {
        san.push_str(if to % 8 == 6 { "O-O" } else { "O-O-O" });
    } else if piece == PieceKind::Pawn {
        if is_capture(description) {
            san.push(file_char(from));
            san.push('x');
        }
        push_square(&mut san, to);
        if let Some(promo) = promotion_piece(description) {
            san.push('=');
            san.push(promo.letter().to_ascii_uppercase());
        }
    } else {
        san.push(piece.letter().to_ascii_uppercase());
        push_disambiguation(&mut san, description, legal);
        if is_capture(description) {
            san.push('x');
        }
        push_square(&mut san, to);
    }

    if mv.annotations.is_checkmate {
        san.push('#');
    } else if mv.annotations.gives_check {
        san.push('+');
    }

    san
}

fn push_square(san: &mut String, square: u8) {
    san.push(file_char(square));
    san.push(rank_char(square));
}

fn push_disambiguation(san: &mut String, description: u64, legal: &[GeneratedMove]) {
    let from = move_from(description);
    let to = move_to(description);
    let piece = moved_piece(description);

    let rivals: Vec<u8> = legal
        .iter()
        .map(|other| other.move_description)
        .filter(|&other| {
            move_to(other) == to && moved_piece(other) == piece && move_from(other) != from
        })
        .map(move_from)
        .collect();

    if rivals.is_empty() {
        return;
    }

    if rivals.iter().all(|&sq| sq % 8 != from % 8) {
        san.push(file_char(from));
    } else if rivals.iter().all(|&sq| sq / 8 != from / 8) {
        san.push(rank_char(from));
    } else {
        push_square(san, from);
    }
}

#[cfg(test)]
mod tests {
    use super::move_to_san;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_generator::LegalMoveGenerator;
    use crate::move_generation::move_generator::MoveGenerator;

    fn all_san(fen: &str) -> Vec<String> {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let legal = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("generation should succeed");
        legal.iter().map(|mv| move_to_san(mv, &legal)).collect()
    }

    #[test]
    fn start_position_notation() {
        let san = all_san("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1");
        assert!(san.contains(&"e4".to_string()));
        assert!(san.contains(&"Nf3".to_string()));
        assert_eq!(san.len(), 20);
    }

    #[test]
    fn disambiguates_by_file_then_rank() {
        let san = all_san("4k3/8/8/8/8/8/4K3/R6R w - - 0 1");
        assert!(san.contains(&"Rad1".to_string()));
        assert!(san.contains(&"Rhd1".to_string()));
        assert!(san.contains(&"Ra2".to_string()));

        let stacked = all_san("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1");
        assert!(stacked.contains(&"R5a3".to_string()));
        assert!(stacked.contains(&"R1a3".to_string()));
    }

    #[test]
    fn castling_notation() {
        let san = all_san("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        assert!(san.contains(&"O-O".to_string()));
        assert!(san.contains(&"O-O-O".to_string()));
    }

    #[test]
    fn marks_check_mate_and_promotion() {
        let mate = all_san("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        assert!(mate.contains(&"Ra8#".to_string()));

        let promo = all_san("8/4P3/8/8/8/8/k7/4K3 w - - 0 1");
        assert!(promo.contains(&"e8=Q".to_string()));
        assert!(promo.contains(&"e8=N".to_string()));

        let capture = all_san("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1");
        assert!(capture.contains(&"exd5".to_string()));
    }
}
