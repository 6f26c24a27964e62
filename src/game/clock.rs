//! Per-side countdown clock.
//!
//! The clock itself is passive: the orchestrator drives `tick` from a
//! one-second timer task while a side is running. At most one side runs.

use crate::game::termination::TerminationResult;
use crate::game_state::chess_types::Color;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameClock {
    remaining: [u32; 2],
    running: Option<Color>,
}

impl GameClock {
    pub fn new(seconds: u32) -> Self {
        Self {
            remaining: [seconds; 2],
            running: None,
        }
    }

    /// Stop and refill both sides.
    pub fn reset(&mut self, seconds: u32) {
        *self = Self::new(seconds);
    }

    /// Run `side`'s clock; the other side stops.
    pub fn start(&mut self, side: Color) {
        self.running = Some(side);
    }

    pub fn stop(&mut self) {
        self.running = None;
    }

    #[inline]
    pub fn running(&self) -> Option<Color> {
        self.running
    }

    #[inline]
    pub fn remaining(&self, side: Color) -> u32 {
        self.remaining[side.index()]
    }

    /// Charge one second to the running side.
    ///
    /// When that side reaches zero the clock stops and the opponent wins on
    /// time. Does nothing while stopped.
    pub fn tick(&mut self) -> Option<TerminationResult> {
        let side = self.running?;
        let left = &mut self.remaining[side.index()];
        *left = left.saturating_sub(1);

        if *left == 0 {
            self.running = None;
            return Some(TerminationResult::Timeout(side.opposite()));
        }
        None
    }
}

/// `m:ss`, e.g. `5:00` or `0:07`.
pub fn format_time(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
