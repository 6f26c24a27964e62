use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ConfigResult};
use crate::engines::engine_trait::Difficulty;
use crate::game_state::chess_rules::DEFAULT_TIME_CONTROL_SECONDS;
use crate::game_state::chess_types::Color;

/// Per-game settings. Changing any of them starts a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    human_side: Color,
    difficulty: Difficulty,
    time_control_seconds: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_side: Color::Light,
            difficulty: Difficulty::Easy,
            time_control_seconds: DEFAULT_TIME_CONTROL_SECONDS,
        }
    }
}

impl GameConfig {
    pub fn new(
        human_side: Color,
        difficulty: Difficulty,
        time_control_seconds: u32,
    ) -> ConfigResult<Self> {
        if time_control_seconds == 0 {
            return Err(ConfigError::InvalidTimeControl(time_control_seconds));
        }
        Ok(Self {
            human_side,
            difficulty,
            time_control_seconds,
        })
    }

    #[inline]
    pub fn human_side(&self) -> Color {
        self.human_side
    }

    #[inline]
    pub fn artificial_side(&self) -> Color {
        self.human_side.opposite()
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[inline]
    pub fn time_control_seconds(&self) -> u32 {
        self.time_control_seconds
    }
}
