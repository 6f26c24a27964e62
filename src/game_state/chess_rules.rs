//! Canonical chess-rule and game-session constants.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule declares a draw.
pub const FIFTY_MOVE_RULE_HALFMOVES: u16 = 100;

/// Number of occurrences of the same position that ends the game.
pub const REPETITION_DRAW_COUNT: usize = 3;

/// Time control used when none is configured or a saved game omits it.
pub const DEFAULT_TIME_CONTROL_SECONDS: u32 = 300;

/// How long a draw offer stays open before it silently lapses.
pub const DRAW_OFFER_TIMEOUT_SECONDS: u64 = 10;
