//! Square conversions between coordinates (`e4`) and square indices.

use crate::chess_errors::{RulesError, RulesResult};
use crate::game_state::chess_types::Square;

/// Convert a coordinate such as `"e4"` to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> RulesResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(RulesError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0].to_ascii_lowercase();
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(RulesError::InvalidSquare(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to a coordinate such as `"e4"`.
#[inline]
pub fn square_to_algebraic(square: Square) -> RulesResult<String> {
    if square > 63 {
        return Err(RulesError::InvalidSquare(format!("index {square}")));
    }

    Ok(format!("{}{}", file_char(square), rank_char(square)))
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + square % 8)
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + square / 8)
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, square_to_algebraic};

    #[test]
    fn corner_squares_convert_both_ways() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("H8").expect("H8 should parse"), 63);
        assert_eq!(square_to_algebraic(0).expect("0 should convert"), "a1");
        assert_eq!(square_to_algebraic(28).expect("28 should convert"), "e4");
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(algebraic_to_square("i1").is_err());
        assert!(algebraic_to_square("a9").is_err());
        assert!(algebraic_to_square("e").is_err());
        assert!(square_to_algebraic(64).is_err());
    }
}
