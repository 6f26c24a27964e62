use std::sync::Arc;
use std::time::Duration;

use plum_arena::engines::engine_trait::Difficulty;
use plum_arena::game::game_config::GameConfig;
use plum_arena::game::notices::{GameNotice, GamePhase};
use plum_arena::game::orchestrator::{EventOutcome, GameOrchestrator};
use plum_arena::game::termination::{DrawReason, TerminationResult};
use plum_arena::game_state::chess_rules::STARTING_POSITION_FEN;
use plum_arena::game_state::chess_types::Color;
use plum_arena::persistence::memory_store::MemoryGameStore;
use plum_arena::persistence::models::{GameOutcome, GameRecord};
use plum_arena::persistence::store::GameStore;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::time::Instant;

fn white(difficulty: Difficulty) -> GameConfig {
    GameConfig::new(Color::Light, difficulty, 300).expect("valid config")
}

fn drain(notices: &mut UnboundedReceiver<GameNotice>) -> Vec<GameNotice> {
    let mut seen = Vec::new();
    while let Ok(notice) = notices.try_recv() {
        seen.push(notice);
    }
    seen
}

async fn next_significant(game: &mut GameOrchestrator) -> EventOutcome {
    loop {
        match game.next_event().await {
            EventOutcome::ClockTicked | EventOutcome::Stale => continue,
            other => return other,
        }
    }
}

async fn stored_position(store: &MemoryGameStore, fen: &str) -> i64 {
    store
        .save_game(&GameRecord {
            fen: fen.to_string(),
            move_list: Vec::new(),
            player_color: Color::Light,
            difficulty: Difficulty::Easy,
            time_control: 300,
            result: None,
        })
        .await
        .expect("memory store accepts saves")
}

#[tokio::test(start_paused = true)]
async fn opening_exchange_end_to_end() {
    let (mut game, mut notices) = GameOrchestrator::with_seed(white(Difficulty::Easy), None, 42);
    let snapshot = game.snapshot();
    assert_eq!(snapshot.fen, STARTING_POSITION_FEN);
    assert_eq!(snapshot.phase, GamePhase::AwaitingHumanMove);
    assert_eq!(snapshot.white_remaining, 300);

    game.submit_move("e2e4".parse().expect("coordinate text"))
        .expect("e4 is legal");
    let thinking_started = Instant::now();
    assert_eq!(game.ledger().len(), 1);
    assert_eq!(game.phase(), GamePhase::ArtificialThinking);

    let reply = match next_significant(&mut game).await {
        EventOutcome::ArtificialMoved(reply) => reply,
        other => panic!("expected a reply, got {other:?}"),
    };
    assert_eq!(reply.color, Color::Dark);

    let snapshot = game.snapshot();
    assert_eq!(snapshot.move_list, vec!["e4".to_string(), reply.san.clone()]);
    assert_eq!(snapshot.turn, Color::Light);
    assert_eq!(snapshot.phase, GamePhase::AwaitingHumanMove);
    assert!(snapshot.termination.is_none());
    // The reply and black's first tick land on the same instant.
    let thought = thinking_started.elapsed().as_secs() as u32;
    assert_eq!(thought, 1);
    assert!(300 - snapshot.black_remaining <= thought);
    assert_eq!(snapshot.white_remaining, 300);
    let black_after_reply = snapshot.black_remaining;

    let waiting_started = Instant::now();
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    while game.try_next_event().is_some() {}
    let snapshot = game.snapshot();
    assert!(300 - snapshot.white_remaining >= waiting_started.elapsed().as_secs() as u32);
    assert_eq!(snapshot.white_remaining, 297);
    assert_eq!(snapshot.black_remaining, black_after_reply);

    let played: Vec<(String, bool)> = drain(&mut notices)
        .into_iter()
        .filter_map(|notice| match notice {
            GameNotice::MovePlayed { san, by_human, .. } => Some((san, by_human)),
            _ => None,
        })
        .collect();
    assert_eq!(played, vec![("e4".to_string(), true), (reply.san, false)]);
}

#[tokio::test(start_paused = true)]
async fn mating_move_ends_and_records_the_game() {
    let store = Arc::new(MemoryGameStore::new());
    let id = stored_position(&store, "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1").await;

    let (mut game, mut notices) =
        GameOrchestrator::with_seed(white(Difficulty::Easy), Some(store.clone()), 7);
    game.load(id).await.expect("saved position loads");
    assert_eq!(game.phase(), GamePhase::AwaitingHumanMove);

    let mate = game
        .submit_move("a1a8".parse().expect("coordinate text"))
        .expect("Ra8 is legal");
    assert_eq!(mate.san, "Ra8#");
    assert_eq!(
        game.termination(),
        Some(TerminationResult::Checkmate(Color::Light))
    );
    assert_eq!(
        game.snapshot().game_over_message.as_deref(),
        Some("Game Over: White wins by checkmate")
    );

    assert_eq!(next_significant(&mut game).await, EventOutcome::HistoryRecorded);
    let history = store.game_history().await.expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].result, Some(GameOutcome::White));
    assert_eq!(history[0].move_list, vec!["Ra8#".to_string()]);

    assert!(drain(&mut notices)
        .iter()
        .any(|notice| matches!(notice, GameNotice::GameOver(TerminationResult::Checkmate(_)))));
}

#[tokio::test(start_paused = true)]
async fn loading_a_finished_position_does_not_record_history() {
    let store = Arc::new(MemoryGameStore::new());
    let id = stored_position(&store, "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").await;

    let (mut game, _notices) =
        GameOrchestrator::with_seed(white(Difficulty::Hard), Some(store.clone()), 8);
    game.load(id).await.expect("saved position loads");

    assert_eq!(game.termination(), Some(TerminationResult::Stalemate));
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.clock().running(), None);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(game.try_next_event().is_none());
    assert!(store.game_history().await.expect("history").is_empty());
}

#[tokio::test(start_paused = true)]
async fn underpromotion_is_honoured_and_can_leave_bare_material() {
    let store = Arc::new(MemoryGameStore::new());
    let id = stored_position(&store, "8/4P3/8/8/8/8/k7/4K3 w - - 0 1").await;

    let (mut game, _notices) =
        GameOrchestrator::with_seed(white(Difficulty::Easy), Some(store), 9);
    game.load(id).await.expect("saved position loads");

    let promoted = game
        .submit_move("e7e8n".parse().expect("coordinate text"))
        .expect("promotion is legal");
    assert_eq!(promoted.san, "e8=N");
    assert!(game.board().fen().starts_with("4N3/"));
    assert_eq!(
        game.termination(),
        Some(TerminationResult::Draw(DrawReason::InsufficientMaterial))
    );
}

#[tokio::test(start_paused = true)]
async fn repeated_undo_walks_back_to_the_start() {
    let (mut game, _notices) = GameOrchestrator::with_seed(white(Difficulty::Easy), None, 10);

    for text in ["d2d4", "c1f4"] {
        game.submit_move(text.parse().expect("coordinate text"))
            .expect("legal in any reply");
        assert!(matches!(
            next_significant(&mut game).await,
            EventOutcome::ArtificialMoved(_)
        ));
    }
    assert_eq!(game.ledger().len(), 4);

    assert_eq!(game.undo().expect("pair"), 2);
    assert_eq!(game.undo().expect("pair"), 2);
    assert_eq!(game.board().fen(), STARTING_POSITION_FEN);
    assert_eq!(game.clock().running(), Some(Color::Light));
}
