//! HTTP client for the saved-game and history service.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use tracing::{debug, instrument};

use crate::persistence::errors::{PersistenceError, PersistenceResult};
use crate::persistence::models::{
    GameHistoryResponse, GameRecord, LoadGameResponse, SaveGameResponse, SavedGamesResponse,
    StoredGame,
};
use crate::persistence::store::GameStore;

#[derive(Debug, Clone)]
pub struct HttpGameStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGameStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

async fn check_status(response: Response) -> PersistenceResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(PersistenceError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl GameStore for HttpGameStore {
    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn save_game(&self, record: &GameRecord) -> PersistenceResult<i64> {
        let response = self
            .client
            .post(self.url("save_game"))
            .json(record)
            .send()
            .await?;
        let saved: SaveGameResponse = check_status(response).await?.json().await?;
        debug!(game_id = saved.game_id, status = %saved.status, "game saved");
        Ok(saved.game_id)
    }

    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn saved_games(&self) -> PersistenceResult<Vec<StoredGame>> {
        let response = self.client.get(self.url("get_saved_games")).send().await?;
        let listed: SavedGamesResponse = check_status(response).await?.json().await?;
        debug!(count = listed.saved_games.len(), "fetched saved games");
        Ok(listed.saved_games)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn load_game(&self, id: i64) -> PersistenceResult<StoredGame> {
        let response = self
            .client
            .get(self.url(&format!("load_game/{id}")))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(PersistenceError::NotFound(id));
        }
        let loaded: LoadGameResponse = check_status(response).await?.json().await?;
        let mut game = loaded.game_state;
        game.id.get_or_insert(id);
        Ok(game)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn delete_saved_game(&self, id: i64) -> PersistenceResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("delete_saved_game/{id}")))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(base_url = %self.base_url, result = ?record.result))]
    async fn add_to_history(&self, record: &GameRecord) -> PersistenceResult<()> {
        let response = self
            .client
            .post(self.url("add_to_history"))
            .json(record)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip_all, fields(base_url = %self.base_url))]
    async fn game_history(&self) -> PersistenceResult<Vec<StoredGame>> {
        let response = self.client.get(self.url("get_game_history")).send().await?;
        let listed: GameHistoryResponse = check_status(response).await?.json().await?;
        debug!(count = listed.game_history.len(), "fetched game history");
        Ok(listed.game_history)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn delete_history_item(&self, id: i64) -> PersistenceResult<()> {
        let response = self
            .client
            .delete(self.url(&format!("delete_history_item/{id}")))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::HttpGameStore;

    #[test]
    fn trailing_slash_is_trimmed() {
        let store = HttpGameStore::new("http://localhost:5000/");
        assert_eq!(store.base_url(), "http://localhost:5000");
        assert_eq!(store.url("save_game"), "http://localhost:5000/save_game");
    }
}
