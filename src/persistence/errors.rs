use thiserror::Error;

/// Failures talking to the persistence service.
///
/// None of these affect the in-memory game; the orchestrator turns them into
/// notices.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("no persistence service configured")]
    Unavailable,

    #[error("saved game {0} not found")]
    NotFound(i64),

    #[error("persistence service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request to persistence service failed: {0}")]
    Http(#[from] reqwest::Error),
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;
