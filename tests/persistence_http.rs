//! HTTP store against a local service speaking the saved-game protocol.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::Mutex;

use plum_arena::engines::engine_trait::Difficulty;
use plum_arena::game::game_config::GameConfig;
use plum_arena::game::orchestrator::{EventOutcome, GameOrchestrator};
use plum_arena::game_state::chess_types::Color;
use plum_arena::persistence::client::HttpGameStore;
use plum_arena::persistence::errors::PersistenceError;
use plum_arena::persistence::models::{GameOutcome, GameRecord};
use plum_arena::persistence::store::GameStore;

#[derive(Default)]
struct Tables {
    next_id: i64,
    saved: Vec<Value>,
    history: Vec<Value>,
}

type Shared = Arc<Mutex<Tables>>;

/// Rows come back the way the service stores them: moves comma-joined.
fn row(id: i64, body: &Value) -> Value {
    let moves = body["moveList"]
        .as_array()
        .map(|moves| {
            moves
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(",")
        })
        .unwrap_or_default();
    json!({
        "id": id,
        "fen": body["fen"],
        "move_list": moves,
        "player_color": body["playerColor"],
        "difficulty": body["difficulty"],
        "timeControl": body["timeControl"],
        "timestamp": "2024-05-01 10:00:00",
        "result": body.get("result").cloned().unwrap_or(Value::Null),
    })
}

async fn save_game(State(tables): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut tables = tables.lock().await;
    tables.next_id += 1;
    let id = tables.next_id;
    tables.saved.push(row(id, &body));
    Json(json!({ "status": "success", "game_id": id }))
}

async fn get_saved_games(State(tables): State<Shared>) -> Json<Value> {
    let tables = tables.lock().await;
    let rows: Vec<Value> = tables.saved.iter().rev().cloned().collect();
    Json(json!({ "saved_games": rows }))
}

async fn load_game(
    State(tables): State<Shared>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    let tables = tables.lock().await;
    tables
        .saved
        .iter()
        .find(|row| row["id"] == id)
        .map(|row| Json(json!({ "game_state": row })))
        .ok_or(StatusCode::NOT_FOUND)
}

async fn delete_saved_game(State(tables): State<Shared>, Path(id): Path<i64>) -> Json<Value> {
    tables.lock().await.saved.retain(|row| row["id"] != id);
    Json(json!({ "status": "success" }))
}

async fn add_to_history(State(tables): State<Shared>, Json(body): Json<Value>) -> Json<Value> {
    let mut tables = tables.lock().await;
    tables.next_id += 1;
    let id = tables.next_id;
    tables.history.push(row(id, &body));
    Json(json!({ "status": "success" }))
}

async fn get_game_history(State(tables): State<Shared>) -> Json<Value> {
    let tables = tables.lock().await;
    let rows: Vec<Value> = tables.history.iter().rev().cloned().collect();
    Json(json!({ "game_history": rows }))
}

async fn delete_history_item(State(tables): State<Shared>, Path(id): Path<i64>) -> Json<Value> {
    tables.lock().await.history.retain(|row| row["id"] != id);
    Json(json!({ "status": "success" }))
}

async fn spawn_service() -> String {
    let app = Router::new()
        .route("/save_game", post(save_game))
        .route("/get_saved_games", get(get_saved_games))
        .route("/load_game/{id}", get(load_game))
        .route("/delete_saved_game/{id}", delete(delete_saved_game))
        .route("/add_to_history", post(add_to_history))
        .route("/get_game_history", get(get_game_history))
        .route("/delete_history_item/{id}", delete(delete_history_item))
        .with_state(Shared::default());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{addr}/")
}

fn record(result: Option<GameOutcome>) -> GameRecord {
    GameRecord {
        fen: "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2".to_string(),
        move_list: vec!["e4".to_string(), "e5".to_string()],
        player_color: Color::Dark,
        difficulty: Difficulty::Hard,
        time_control: 600,
        result,
    }
}

#[tokio::test]
async fn saved_games_round_trip() {
    let store = HttpGameStore::new(spawn_service().await);

    let first = store.save_game(&record(None)).await.expect("save");
    let second = store.save_game(&record(None)).await.expect("save");
    assert_ne!(first, second);

    let listed = store.saved_games().await.expect("list");
    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].id, Some(second));

    let loaded = store.load_game(first).await.expect("load");
    assert_eq!(loaded.move_list, vec!["e4", "e5"]);
    assert_eq!(loaded.player_color, Color::Dark);
    assert_eq!(loaded.difficulty, Difficulty::Hard);
    assert_eq!(loaded.time_control_or_default(), 600);
    assert!(loaded.recorded_at().is_some());

    store.delete_saved_game(first).await.expect("delete");
    assert!(matches!(
        store.load_game(first).await,
        Err(PersistenceError::NotFound(id)) if id == first
    ));
    assert_eq!(store.saved_games().await.expect("list").len(), 1);
}

#[tokio::test]
async fn history_round_trip() {
    let store = HttpGameStore::new(spawn_service().await);

    store
        .add_to_history(&record(Some(GameOutcome::Black)))
        .await
        .expect("add");
    let history = store.game_history().await.expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result, Some(GameOutcome::Black));

    let id = history[0].id.expect("rows carry ids");
    store.delete_history_item(id).await.expect("delete");
    assert!(store.game_history().await.expect("history").is_empty());
}

#[tokio::test]
async fn unreachable_service_is_an_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let store = HttpGameStore::new(format!("http://{addr}"));
    assert!(matches!(
        store.saved_games().await,
        Err(PersistenceError::Http(_))
    ));
}

#[tokio::test]
async fn resignation_reaches_the_history_service() {
    let store = Arc::new(HttpGameStore::new(spawn_service().await));
    let config = GameConfig::new(Color::Light, Difficulty::Easy, 300).expect("valid config");
    let (mut game, _notices) = GameOrchestrator::with_seed(config, Some(store.clone()), 5);

    game.submit_move("g1f3".parse().expect("coordinate text"))
        .expect("legal");
    game.resign().expect("game in progress");

    loop {
        match game.next_event().await {
            EventOutcome::HistoryRecorded => break,
            EventOutcome::PersistenceFailed => panic!("history service rejected the record"),
            _ => continue,
        }
    }

    let history = game.history(None).await.expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result, Some(GameOutcome::Black));
    assert_eq!(history[0].move_list, vec!["Nf3"]);
}
