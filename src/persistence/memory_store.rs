//! In-process `GameStore`, used when no service is configured and in tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::persistence::errors::{PersistenceError, PersistenceResult};
use crate::persistence::models::{GameRecord, StoredGame, TIMESTAMP_FORMAT};
use crate::persistence::store::GameStore;

#[derive(Debug, Default)]
struct Tables {
    next_id: i64,
    saved: Vec<StoredGame>,
    history: Vec<StoredGame>,
}

impl Tables {
    fn insert(&mut self, record: &GameRecord, history: bool) -> i64 {
        self.next_id += 1;
        let row = StoredGame {
            id: Some(self.next_id),
            fen: record.fen.clone(),
            move_list: record.move_list.clone(),
            player_color: record.player_color,
            difficulty: record.difficulty,
            time_control: Some(record.time_control),
            timestamp: Some(Utc::now().format(TIMESTAMP_FORMAT).to_string()),
            result: record.result,
        };
        if history {
            self.history.push(row);
        } else {
            self.saved.push(row);
        }
        self.next_id
    }
}

#[derive(Debug, Default)]
pub struct MemoryGameStore {
    tables: Mutex<Tables>,
    offline: AtomicBool,
}

impl MemoryGameStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While offline every call fails with `PersistenceError::Unavailable`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> PersistenceResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(PersistenceError::Unavailable)
        } else {
            Ok(())
        }
    }
}

fn newest_first(rows: &[StoredGame]) -> Vec<StoredGame> {
    rows.iter().rev().cloned().collect()
}

#[async_trait]
impl GameStore for MemoryGameStore {
    async fn save_game(&self, record: &GameRecord) -> PersistenceResult<i64> {
        self.ensure_online()?;
        Ok(self.tables.lock().await.insert(record, false))
    }

    async fn saved_games(&self) -> PersistenceResult<Vec<StoredGame>> {
        self.ensure_online()?;
        Ok(newest_first(&self.tables.lock().await.saved))
    }

    async fn load_game(&self, id: i64) -> PersistenceResult<StoredGame> {
        self.ensure_online()?;
        self.tables
            .lock()
            .await
            .saved
            .iter()
            .find(|row| row.id == Some(id))
            .cloned()
            .ok_or(PersistenceError::NotFound(id))
    }

    async fn delete_saved_game(&self, id: i64) -> PersistenceResult<()> {
        self.ensure_online()?;
        self.tables.lock().await.saved.retain(|row| row.id != Some(id));
        Ok(())
    }

    async fn add_to_history(&self, record: &GameRecord) -> PersistenceResult<()> {
        self.ensure_online()?;
        self.tables.lock().await.insert(record, true);
        Ok(())
    }

    async fn game_history(&self) -> PersistenceResult<Vec<StoredGame>> {
        self.ensure_online()?;
        Ok(newest_first(&self.tables.lock().await.history))
    }

    async fn delete_history_item(&self, id: i64) -> PersistenceResult<()> {
        self.ensure_online()?;
        self.tables.lock().await.history.retain(|row| row.id != Some(id));
        Ok(())
    }
}
