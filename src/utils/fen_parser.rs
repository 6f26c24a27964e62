//! FEN-to-GameState parser.
//!
//! Builds a fully-populated position from a Forsyth-Edwards Notation string,
//! including piece bitboards, rights, clocks, and occupancies. The move
//! counters are optional, since saved games written by older clients
//! sometimes carry only the first four fields.

use crate::chess_errors::{RulesError, RulesResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> RulesResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().unwrap_or("-");
    let en_passant_part = parts.next().unwrap_or("-");
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = match side_part {
        "w" => Color::Light,
        "b" => Color::Dark,
        other => return Err(invalid(&format!("side to move '{other}'"))),
    };
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = if en_passant_part == "-" {
        None
    } else {
        Some(algebraic_to_square(en_passant_part)?)
    };
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("halfmove clock '{halfmove_part}'")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("fullmove number '{fullmove_part}'")))?;

    for color in [Color::Light, Color::Dark] {
        if game_state.count(color, PieceKind::King) != 1 {
            return Err(invalid(&format!("{color} must have exactly one king")));
        }
    }

    game_state.recalc_occupancy();

    Ok(game_state)
}

fn invalid(message: &str) -> RulesError {
    RulesError::InvalidFen(message.to_owned())
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> RulesResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("empty-square count '{ch}'")));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = PieceKind::from_letter(ch)
                .ok_or_else(|| invalid(&format!("piece character '{ch}'")))?;
            let color = if ch.is_ascii_uppercase() {
                Color::Light
            } else {
                Color::Dark
            };

            if file >= 8 {
                return Err(invalid("rank has too many files"));
            }

            let sq = board_rank * 8 + file;
            game_state.pieces[color.index()][piece.index()] |= 1u64 << sq;
            file += 1;
        }

        if file != 8 {
            return Err(invalid("rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_castling_rights(castling_part: &str) -> RulesResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        rights |= match ch {
            'K' => CASTLE_LIGHT_KINGSIDE,
            'Q' => CASTLE_LIGHT_QUEENSIDE,
            'k' => CASTLE_DARK_KINGSIDE,
            'q' => CASTLE_DARK_QUEENSIDE,
            _ => return Err(invalid(&format!("castling character '{ch}'"))),
        };
    }

    Ok(rights)
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, CASTLE_DARK_KINGSIDE, CASTLE_DARK_QUEENSIDE};

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move, Color::Light);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.castling_rights, 0x0F);
    }

    #[test]
    fn parse_position_without_counters() {
        let game_state =
            parse_fen("r3k2r/8/8/8/8/8/8/4K3 b kq e3").expect("short FEN should parse");
        assert_eq!(game_state.side_to_move, Color::Dark);
        assert_eq!(
            game_state.castling_rights,
            CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE
        );
        assert_eq!(game_state.en_passant_square, Some(20));
        assert_eq!(game_state.fullmove_number, 1);
    }

    #[test]
    fn reject_malformed_layouts() {
        assert!(parse_fen("8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K2 w - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4X3 w - - 0 1").is_err());
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
    }
}
