//! Terminal-oriented Unicode board renderer.
//!
//! Used by the command-line front end to draw the board from the side of the
//! human player.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board to a Unicode string, oriented for `perspective`.
///
/// Assumes square indexing where `0 == a1`, `7 == h1`, and `63 == h8`.
pub fn render_game_state(game_state: &GameState, perspective: Color) -> String {
    let (ranks, files): (Vec<u8>, Vec<u8>) = match perspective {
        Color::Light => ((0..8).rev().collect(), (0..8).collect()),
        Color::Dark => ((0..8).collect(), (0..8).rev().collect()),
    };

    let file_labels: String = files
        .iter()
        .map(|f| char::from(b'a' + f).to_string())
        .collect::<Vec<_>>()
        .join(" ");

    let mut out = format!("  {file_labels}\n");

    for rank in &ranks {
        let rank_label = char::from(b'1' + rank);
        out.push(rank_label);
        out.push(' ');

        let row: Vec<String> = files
            .iter()
            .map(|file| {
                game_state
                    .piece_on(rank * 8 + file)
                    .map(|(color, piece)| piece_to_unicode(color, piece))
                    .unwrap_or('·')
                    .to_string()
            })
            .collect();
        out.push_str(&row.join(" "));

        out.push(' ');
        out.push(rank_label);
        out.push('\n');
    }

    out.push_str(&format!("  {file_labels}"));

    out
}

fn piece_to_unicode(color: Color, piece: PieceKind) -> char {
    match (color, piece) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
