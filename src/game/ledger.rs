//! Move/undo ledger: every half-move with the position it produced.
//!
//! Undo truncates the ledger; the position to restore is the one recorded
//! before the removed entries, or the initial position.

use crate::game_state::game_state::GameState;
use crate::moves::chess_move::ChessMove;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    /// Position reached after `mv`.
    pub position: GameState,
    pub mv: ChessMove,
}

/// Half-moves played since the game started or was loaded.
#[derive(Debug, Clone)]
pub struct Ledger {
    initial: GameState,
    /// Notation carried over from a loaded game; not undoable.
    prior_moves: Vec<String>,
    entries: Vec<LedgerEntry>,
}

impl Ledger {
    pub fn new(initial: GameState) -> Self {
        Self::with_prior_moves(initial, Vec::new())
    }

    pub fn with_prior_moves(initial: GameState, prior_moves: Vec<String>) -> Self {
        Self {
            initial,
            prior_moves,
            entries: Vec::new(),
        }
    }

    pub fn record(&mut self, position: GameState, mv: ChessMove) {
        self.entries.push(LedgerEntry { position, mv });
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current_position(&self) -> &GameState {
        self.entries
            .last()
            .map_or(&self.initial, |entry| &entry.position)
    }

    /// Drop the last `n` entries and return the position to restore.
    ///
    /// Returns `None`, leaving the ledger untouched, when fewer than `n`
    /// entries exist.
    pub fn undo_count(&mut self, n: usize) -> Option<GameState> {
        if n > self.entries.len() {
            return None;
        }
        self.entries.truncate(self.entries.len() - n);
        Some(self.current_position().clone())
    }

    /// SAN of every move, including those carried over from a loaded game.
    pub fn move_list(&self) -> Vec<String> {
        self.prior_moves
            .iter()
            .cloned()
            .chain(self.entries.iter().map(|entry| entry.mv.san.clone()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Ledger;
    use crate::move_generation::board::Board;
    use crate::moves::chess_move::MoveRequest;

    fn played(moves: &[&str]) -> (Board, Ledger) {
        let mut board = Board::new();
        let mut ledger = Ledger::new(board.position().clone());
        for text in moves {
            let request: MoveRequest = text.parse().expect("coordinate text");
            let mv = board.apply(request).expect("legal");
            ledger.record(board.position().clone(), mv);
        }
        (board, ledger)
    }

    #[test]
    fn length_tracks_half_moves() {
        let (_, ledger) = played(&["e2e4", "e7e5", "g1f3"]);
        assert_eq!(ledger.len(), 3);
        assert_eq!(ledger.move_list(), vec!["e4", "e5", "Nf3"]);
    }

    #[test]
    fn undo_restores_earlier_positions() {
        let (_, mut ledger) = played(&["e2e4", "e7e5", "g1f3"]);
        let (after_one, _) = played(&["e2e4"]);

        let restored = ledger.undo_count(2).expect("enough entries");
        assert_eq!(&restored, after_one.position());
        assert_eq!(ledger.len(), 1);

        assert!(ledger.undo_count(2).is_none());
        assert_eq!(ledger.len(), 1);

        let initial = ledger.undo_count(1).expect("one entry left");
        assert_eq!(&initial, Board::new().position());
        assert!(ledger.is_empty());
    }

    #[test]
    fn prior_moves_prefix_the_list() {
        let board = Board::new();
        let mut ledger =
            Ledger::with_prior_moves(board.position().clone(), vec!["d4".into(), "d5".into()]);
        let mut scratch = board.clone();
        let mv = scratch
            .apply("c2c4".parse().expect("coordinate text"))
            .expect("legal");
        ledger.record(scratch.position().clone(), mv);
        assert_eq!(ledger.move_list(), vec!["d4", "d5", "c4"]);
    }
}
