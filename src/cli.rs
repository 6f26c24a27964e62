//! Command-line interface for plum_arena.

use std::path::PathBuf;

use clap::Parser;

use plum_arena::config::{AppSettings, ConfigResult};
use plum_arena::engines::engine_trait::Difficulty;
use plum_arena::game_state::chess_types::Color;

/// Plum Arena - play chess against a built-in engine
#[derive(Parser, Debug)]
#[command(name = "plum_arena")]
#[command(about = "Play chess against a built-in engine with clocks, undo and draw offers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, env = "PLUM_ARENA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the saved-game service
    #[arg(long, env = "PLUM_ARENA_SERVER_URL")]
    pub server_url: Option<String>,

    /// Keep saved games in memory instead of talking to the service
    #[arg(long)]
    pub offline: bool,

    /// Side the human plays (w/b)
    #[arg(long)]
    pub side: Option<Color>,

    /// Engine strength (easy, medium, hard)
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Seconds on each clock
    #[arg(short, long)]
    pub time_control: Option<u32>,

    /// Seed for reproducible engine play
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log filter, e.g. "debug" or "plum_arena=trace"
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,
}

impl Cli {
    /// Settings file (or defaults) with command-line overrides applied.
    pub fn settings(&self) -> ConfigResult<AppSettings> {
        let mut settings = match &self.config {
            Some(path) => AppSettings::from_file(path)?,
            None => AppSettings::default(),
        };

        if let Some(url) = &self.server_url {
            settings.server_url = url.clone();
        }
        if let Some(side) = self.side {
            settings.human_side = side;
        }
        if let Some(difficulty) = self.difficulty {
            settings.difficulty = difficulty;
        }
        if let Some(seconds) = self.time_control {
            settings.time_control_seconds = seconds;
        }
        if let Some(filter) = &self.log_filter {
            settings.log_filter = filter.clone();
        }
        Ok(settings)
    }
}
