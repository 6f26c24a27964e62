//! Application settings loaded from an optional TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::engines::engine_trait::Difficulty;
use crate::game::game_config::GameConfig;
use crate::game_state::chess_rules::DEFAULT_TIME_CONTROL_SECONDS;
use crate::game_state::chess_types::Color;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:5000";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("time control must be a positive number of seconds, got {0}")]
    InvalidTimeControl(u32),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Base URL of the saved-game service; empty disables it.
    pub server_url: String,
    pub human_side: Color,
    pub difficulty: Difficulty,
    pub time_control_seconds: u32,
    pub log_filter: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            human_side: Color::Light,
            difficulty: Difficulty::Easy,
            time_control_seconds: DEFAULT_TIME_CONTROL_SECONDS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppSettings {
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|source| ConfigError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        let settings = Self::from_toml(&content)?;
        info!(difficulty = %settings.difficulty, side = %settings.human_side, "Settings loaded");
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn game_config(&self) -> ConfigResult<GameConfig> {
        GameConfig::new(self.human_side, self.difficulty, self.time_control_seconds)
    }

    pub fn server_url(&self) -> Option<&str> {
        let url = self.server_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::{AppSettings, ConfigError};
    use crate::engines::engine_trait::Difficulty;
    use crate::game_state::chess_types::Color;

    #[test]
    fn defaults_fill_missing_keys() {
        let settings = AppSettings::from_toml("difficulty = \"hard\"\nhuman_side = \"b\"\n")
            .expect("partial TOML should parse");
        assert_eq!(settings.difficulty, Difficulty::Hard);
        assert_eq!(settings.human_side, Color::Dark);
        assert_eq!(settings.time_control_seconds, 300);
        assert_eq!(settings.server_url(), Some("http://localhost:5000"));
    }

    #[test]
    fn reads_file_and_validates_time_control() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "time_control_seconds = 0\nserver_url = \"\"").expect("write");

        let settings = AppSettings::from_file(file.path()).expect("file should load");
        assert_eq!(settings.server_url(), None);
        assert!(matches!(
            settings.game_config(),
            Err(ConfigError::InvalidTimeControl(0))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = AppSettings::from_file("/definitely/not/here.toml").expect_err("missing file");
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
