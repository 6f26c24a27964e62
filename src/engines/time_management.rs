//! Deliberation pacing for the artificial opponent.
//!
//! The delay elapses while the artificial side's clock runs.

use std::time::Duration;

use crate::engines::engine_trait::Difficulty;

pub fn thinking_delay(difficulty: Difficulty) -> Duration {
    match difficulty {
        Difficulty::Easy => Duration::from_millis(1_000),
        Difficulty::Medium => Duration::from_millis(1_500),
        Difficulty::Hard => Duration::from_millis(2_000),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::thinking_delay;
    use crate::engines::engine_trait::Difficulty;

    #[test]
    fn harder_tiers_think_longer() {
        assert_eq!(thinking_delay(Difficulty::Easy), Duration::from_secs(1));
        assert_eq!(thinking_delay(Difficulty::Medium), Duration::from_millis(1500));
        assert_eq!(thinking_delay(Difficulty::Hard), Duration::from_secs(2));
    }
}
