//! What the orchestrator tells the presentation layer.

use serde::Serialize;

use crate::game::game_config::GameConfig;
use crate::game::termination::TerminationResult;
use crate::game_state::chess_types::Color;
use crate::persistence::models::StoredGame;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    AwaitingHumanMove,
    ArtificialThinking,
    GameOver,
}

/// Pushed to the presentation layer as things happen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameNotice {
    NewGame { config: GameConfig },
    MovePlayed { san: String, side: Color, by_human: bool },
    InvalidMove { reason: String },
    Check { side: Color },
    GameOver(TerminationResult),
    UndoApplied { half_moves: usize },
    DrawOffered { expires_in_secs: u64 },
    DrawDeclined,
    DrawExpired,
    ClockTick { white: u32, black: u32 },
    Hint { san: String },
    GameSaved { id: i64 },
    GameLoaded { id: i64 },
    HistoryRecorded,
    PersistenceFailed { reason: String },
    LoadingStarted,
    LoadingFinished,
}

/// Read-only view of the whole game for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub fen: String,
    pub turn: Color,
    pub phase: GamePhase,
    pub config: GameConfig,
    pub white_remaining: u32,
    pub black_remaining: u32,
    pub move_list: Vec<String>,
    pub check_alert: Option<String>,
    pub game_over_message: Option<String>,
    pub termination: Option<TerminationResult>,
    pub error_message: Option<String>,
    pub draw_offer_pending: bool,
    pub saved_games: Vec<StoredGame>,
    pub game_history: Vec<StoredGame>,
    pub is_loading: bool,
}

/// Check banner for `side`, e.g. "White is in check!".
pub fn check_alert(side: Color) -> String {
    format!("{} is in check!", side.title())
}
