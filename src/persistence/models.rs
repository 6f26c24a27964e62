//! Wire types for the saved-game and history service.
//!
//! Requests are camelCase; rows come back in the service's snake_case shape
//! with `move_list` either comma-joined or already split.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::engines::engine_trait::Difficulty;
use crate::game_state::chess_rules::DEFAULT_TIME_CONTROL_SECONDS;
use crate::game_state::chess_types::Color;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of a finished game as the history service records it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    White,
    Black,
    Draw,
}

/// Body of `POST /save_game` and `POST /add_to_history`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub fen: String,
    pub move_list: Vec<String>,
    pub player_color: Color,
    pub difficulty: Difficulty,
    pub time_control: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<GameOutcome>,
}

/// A saved-game or history row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredGame {
    #[serde(default)]
    pub id: Option<i64>,
    pub fen: String,
    #[serde(default, deserialize_with = "deserialize_move_list")]
    pub move_list: Vec<String>,
    pub player_color: Color,
    pub difficulty: Difficulty,
    #[serde(default, rename = "timeControl", alias = "time_control")]
    pub time_control: Option<u32>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub result: Option<GameOutcome>,
}

impl StoredGame {
    pub fn time_control_or_default(&self) -> u32 {
        self.time_control
            .filter(|seconds| *seconds > 0)
            .unwrap_or(DEFAULT_TIME_CONTROL_SECONDS)
    }

    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        self.timestamp
            .as_deref()
            .and_then(|ts| NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).ok())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveGameResponse {
    pub status: String,
    pub game_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SavedGamesResponse {
    #[serde(default)]
    pub saved_games: Vec<StoredGame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameHistoryResponse {
    #[serde(default)]
    pub game_history: Vec<StoredGame>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadGameResponse {
    pub game_state: StoredGame,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MoveListWire {
    Joined(String),
    Split(Vec<String>),
}

fn deserialize_move_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let moves = match MoveListWire::deserialize(deserializer)? {
        MoveListWire::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|san| !san.is_empty())
            .map(str::to_owned)
            .collect(),
        MoveListWire::Split(moves) => moves.into_iter().filter(|san| !san.is_empty()).collect(),
    };
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_camel_case() {
        let record = GameRecord {
            fen: "8/8/8/8/8/8/8/8 w - - 0 1".to_string(),
            move_list: vec!["e4".to_string(), "e5".to_string()],
            player_color: Color::Light,
            difficulty: Difficulty::Medium,
            time_control: 300,
            result: Some(GameOutcome::Draw),
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["moveList"], serde_json::json!(["e4", "e5"]));
        assert_eq!(json["playerColor"], "w");
        assert_eq!(json["difficulty"], "medium");
        assert_eq!(json["timeControl"], 300);
        assert_eq!(json["result"], "draw");

        let unfinished = GameRecord { result: None, ..record };
        let json = serde_json::to_value(&unfinished).expect("serialize");
        assert!(json.get("result").is_none());
    }

    #[test]
    fn stored_rows_accept_joined_and_split_move_lists() {
        let joined: StoredGame = serde_json::from_value(serde_json::json!({
            "id": 4,
            "fen": "start",
            "move_list": "e4,e5,Nf3",
            "player_color": "b",
            "difficulty": "hard",
            "timestamp": "2024-03-01 12:30:00"
        }))
        .expect("row should decode");
        assert_eq!(joined.move_list, vec!["e4", "e5", "Nf3"]);
        assert_eq!(joined.player_color, Color::Dark);
        assert_eq!(joined.time_control_or_default(), 300);
        assert!(joined.recorded_at().is_some());

        let loaded: LoadGameResponse = serde_json::from_value(serde_json::json!({
            "game_state": {
                "fen": "start",
                "move_list": [""],
                "player_color": "w",
                "difficulty": "easy",
                "timeControl": 60
            }
        }))
        .expect("load payload should decode");
        assert!(loaded.game_state.move_list.is_empty());
        assert_eq!(loaded.game_state.id, None);
        assert_eq!(loaded.game_state.time_control_or_default(), 60);
    }
}
