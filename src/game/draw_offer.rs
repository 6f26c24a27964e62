//! Time-limited draw offer from the human to the artificial side.

use std::time::Duration;

use tokio::time::Instant;

use crate::game::errors::{GameError, GameResult};
use crate::game_state::chess_rules::DRAW_OFFER_TIMEOUT_SECONDS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawResponse {
    Accepted,
    Declined,
}

#[derive(Debug, Clone, Default)]
pub struct DrawOffer {
    expires_at: Option<Instant>,
}

impl DrawOffer {
    pub const TIMEOUT: Duration = Duration::from_secs(DRAW_OFFER_TIMEOUT_SECONDS);

    /// Open an offer lasting [`Self::TIMEOUT`]; returns its expiry.
    pub fn offer(&mut self, now: Instant) -> GameResult<Instant> {
        if self.is_pending(now) {
            return Err(GameError::DrawOfferPending);
        }
        let expires_at = now + Self::TIMEOUT;
        self.expires_at = Some(expires_at);
        Ok(expires_at)
    }

    pub fn respond(&mut self, accept: bool, now: Instant) -> GameResult<DrawResponse> {
        if !self.is_pending(now) {
            self.expires_at = None;
            return Err(GameError::NoDrawOffer);
        }
        self.expires_at = None;
        Ok(if accept {
            DrawResponse::Accepted
        } else {
            DrawResponse::Declined
        })
    }

    pub fn is_pending(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now < expires_at)
    }

    /// Clear an offer whose time has run out. Returns whether one was cleared.
    pub fn expire(&mut self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires_at) if now >= expires_at => {
                self.expires_at = None;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.expires_at = None;
    }
}
