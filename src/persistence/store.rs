use async_trait::async_trait;

use crate::persistence::errors::PersistenceResult;
use crate::persistence::models::{GameRecord, StoredGame};

/// Saved-game and completed-game history storage.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// Store an in-progress game and return its id.
    async fn save_game(&self, record: &GameRecord) -> PersistenceResult<i64>;

    /// Newest first.
    async fn saved_games(&self) -> PersistenceResult<Vec<StoredGame>>;

    async fn load_game(&self, id: i64) -> PersistenceResult<StoredGame>;

    async fn delete_saved_game(&self, id: i64) -> PersistenceResult<()>;

    /// Record a finished game; `record.result` should be set.
    async fn add_to_history(&self, record: &GameRecord) -> PersistenceResult<()>;

    /// Newest first.
    async fn game_history(&self) -> PersistenceResult<Vec<StoredGame>>;

    async fn delete_history_item(&self, id: i64) -> PersistenceResult<()>;
}
