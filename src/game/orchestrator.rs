//! Game orchestrator: the single owner of a human-versus-engine game.
//!
//! All state lives in [`GameOrchestrator`] and changes only through
//! `&mut self`. Deliberation, the one-second clock tick and draw-offer expiry
//! run as tokio tasks that never touch that state; they post
//! generation-tagged events which [`GameOrchestrator::next_event`] applies.
//! Cancelling a task aborts it and bumps its generation, so anything it
//! already posted is discarded as stale.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::task::{self, JoinHandle};
use tokio::time::{interval_at, sleep, sleep_until, Instant};
use tracing::{debug, error, info, instrument, warn};

use crate::engines::engine_trait::Difficulty;
use crate::engines::move_selector::MoveSelector;
use crate::engines::time_management::thinking_delay;
use crate::game::clock::GameClock;
use crate::game::draw_offer::{DrawOffer, DrawResponse};
use crate::game::errors::{GameError, GameResult};
use crate::game::game_config::GameConfig;
use crate::game::ledger::Ledger;
use crate::game::notices::{check_alert, GameNotice, GamePhase, GameSnapshot};
use crate::game::termination::TerminationResult;
use crate::game_state::chess_types::Color;
use crate::move_generation::board::Board;
use crate::moves::chess_move::{ChessMove, MoveRequest};
use crate::persistence::errors::{PersistenceError, PersistenceResult};
use crate::persistence::models::{GameOutcome, GameRecord, StoredGame};
use crate::persistence::store::GameStore;

const CLOCK_TICK: Duration = Duration::from_secs(1);

#[derive(Debug)]
enum InternalEvent {
    Deliberation {
        generation: u64,
        chosen: Option<ChessMove>,
    },
    ClockTick {
        generation: u64,
    },
    DrawOfferExpired {
        generation: u64,
    },
    HistoryRecorded {
        result: PersistenceResult<Vec<StoredGame>>,
    },
}

/// What applying one background event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    ArtificialMoved(ChessMove),
    ClockTicked,
    GameEnded(TerminationResult),
    DrawOfferExpired,
    HistoryRecorded,
    PersistenceFailed,
    /// Posted by a task that has since been cancelled.
    Stale,
}

/// A background task and the generation its events must carry.
#[derive(Debug, Default)]
struct TaskSlot {
    generation: u64,
    handle: Option<JoinHandle<()>>,
}

impl TaskSlot {
    fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.generation += 1;
    }

    fn next_generation(&mut self) -> u64 {
        self.cancel();
        self.generation
    }

    fn set(&mut self, handle: JoinHandle<()>) {
        self.handle = Some(handle);
    }

    fn finish(&mut self, generation: u64) -> bool {
        if self.generation != generation {
            return false;
        }
        self.handle = None;
        true
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }
}

pub struct GameOrchestrator {
    config: GameConfig,
    board: Board,
    ledger: Ledger,
    clock: GameClock,
    draw_offer: DrawOffer,
    termination: Option<TerminationResult>,
    phase: GamePhase,

    check_alert: Option<String>,
    error_message: Option<String>,
    saved_games: Vec<StoredGame>,
    game_history: Vec<StoredGame>,
    is_loading: bool,

    store: Option<Arc<dyn GameStore>>,
    rng: StdRng,
    notices: UnboundedSender<GameNotice>,
    events_tx: UnboundedSender<InternalEvent>,
    events_rx: UnboundedReceiver<InternalEvent>,
    deliberation: TaskSlot,
    clock_task: TaskSlot,
    draw_task: TaskSlot,
}

impl GameOrchestrator {
    /// Start a new game. Must be called from within a tokio runtime.
    pub fn new(
        config: GameConfig,
        store: Option<Arc<dyn GameStore>>,
    ) -> (Self, UnboundedReceiver<GameNotice>) {
        Self::with_rng(config, store, StdRng::from_os_rng())
    }

    /// Like [`Self::new`] with reproducible engine randomness.
    pub fn with_seed(
        config: GameConfig,
        store: Option<Arc<dyn GameStore>>,
        seed: u64,
    ) -> (Self, UnboundedReceiver<GameNotice>) {
        Self::with_rng(config, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        config: GameConfig,
        store: Option<Arc<dyn GameStore>>,
        rng: StdRng,
    ) -> (Self, UnboundedReceiver<GameNotice>) {
        let (notices, notices_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let board = Board::new();

        let mut orchestrator = Self {
            config,
            ledger: Ledger::new(board.position().clone()),
            board,
            clock: GameClock::new(config.time_control_seconds()),
            draw_offer: DrawOffer::default(),
            termination: None,
            phase: GamePhase::AwaitingHumanMove,
            check_alert: None,
            error_message: None,
            saved_games: Vec::new(),
            game_history: Vec::new(),
            is_loading: false,
            store,
            rng,
            notices,
            events_tx,
            events_rx,
            deliberation: TaskSlot::default(),
            clock_task: TaskSlot::default(),
            draw_task: TaskSlot::default(),
        };
        orchestrator.new_game();
        (orchestrator, notices_rx)
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn clock(&self) -> &GameClock {
        &self.clock
    }

    pub fn termination(&self) -> Option<TerminationResult> {
        self.termination
    }

    pub fn draw_offer_pending(&self) -> bool {
        self.draw_offer.is_pending(Instant::now())
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            fen: self.board.fen(),
            turn: self.board.side_to_move(),
            phase: self.phase,
            config: self.config,
            white_remaining: self.clock.remaining(Color::Light),
            black_remaining: self.clock.remaining(Color::Dark),
            move_list: self.ledger.move_list(),
            check_alert: self.check_alert.clone(),
            game_over_message: self.termination.map(|result| result.banner()),
            termination: self.termination,
            error_message: self.error_message.clone(),
            draw_offer_pending: self.draw_offer_pending(),
            saved_games: self.saved_games.clone(),
            game_history: self.game_history.clone(),
            is_loading: self.is_loading,
        }
    }

    // ---- human commands -------------------------------------------------

    /// Play a move for the human side.
    #[instrument(skip(self))]
    pub fn submit_move(&mut self, request: MoveRequest) -> GameResult<ChessMove> {
        if self.termination.is_some() {
            return Err(GameError::GameOver);
        }
        if self.phase != GamePhase::AwaitingHumanMove
            || self.board.side_to_move() != self.config.human_side()
        {
            return Err(GameError::NotYourTurn);
        }

        let Some(mv) = self.board.apply(request) else {
            let reason = format!("{request} is not legal here");
            debug!(%reason, "rejected human move");
            self.error_message = Some("Invalid move!".to_string());
            self.notify(GameNotice::InvalidMove {
                reason: reason.clone(),
            });
            return Err(GameError::InvalidMove(request.to_string()));
        };

        self.commit_move(mv.clone(), true);
        Ok(mv)
    }

    /// Abandon the current game and start over with the same configuration.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        self.begin(Board::new(), Vec::new());
        info!(
            human_side = %self.config.human_side(),
            difficulty = %self.config.difficulty(),
            time_control = self.config.time_control_seconds(),
            "new game"
        );
        self.notify(GameNotice::NewGame {
            config: self.config,
        });
        self.resume(false);
    }

    /// Adopt a new configuration; this always starts a new game.
    pub fn change_config(&mut self, config: GameConfig) {
        self.config = config;
        self.new_game();
    }

    /// Take back moves so that the human is to move again.
    ///
    /// Removes a single half-move if the artificial side has not replied yet,
    /// otherwise the last pair. Returns the number of half-moves removed.
    #[instrument(skip(self))]
    pub fn undo(&mut self) -> GameResult<usize> {
        if self.termination.is_some() {
            return Err(GameError::GameOver);
        }

        let half_moves = if self.board.side_to_move() == self.config.artificial_side() {
            1
        } else {
            2
        };
        if self.ledger.len() < half_moves {
            return Err(GameError::NothingToUndo);
        }

        self.deliberation.cancel();

        let restored = self.ledger.undo_count(half_moves);
        for _ in 0..half_moves {
            self.board.undo();
        }
        debug_assert_eq!(restored.as_ref(), Some(self.board.position()));

        self.check_alert = None;
        self.error_message = None;
        info!(half_moves, "undo applied");
        self.notify(GameNotice::UndoApplied { half_moves });

        self.restart_clock();
        self.enter_turn();
        Ok(half_moves)
    }

    /// Offer a draw; it lapses after ten seconds.
    pub fn offer_draw(&mut self) -> GameResult<()> {
        if self.termination.is_some() {
            return Err(GameError::GameOver);
        }

        let expires_at = self.draw_offer.offer(Instant::now())?;
        let generation = self.draw_task.next_generation();
        let events = self.events_tx.clone();
        let expiry = sleep_until(expires_at);
        self.draw_task.set(tokio::spawn(async move {
            expiry.await;
            let _ = events.send(InternalEvent::DrawOfferExpired { generation });
        }));

        debug!(generation, "draw offered");
        self.notify(GameNotice::DrawOffered {
            expires_in_secs: DrawOffer::TIMEOUT.as_secs(),
        });
        Ok(())
    }

    pub fn respond_to_draw(&mut self, accept: bool) -> GameResult<DrawResponse> {
        if self.termination.is_some() {
            return Err(GameError::GameOver);
        }

        let response = self.draw_offer.respond(accept, Instant::now())?;
        self.draw_task.cancel();
        match response {
            DrawResponse::Accepted => self.finish(TerminationResult::Agreement, true),
            DrawResponse::Declined => self.notify(GameNotice::DrawDeclined),
        }
        Ok(response)
    }

    /// The human concedes.
    pub fn resign(&mut self) -> GameResult<()> {
        if self.termination.is_some() {
            return Err(GameError::GameOver);
        }
        self.finish(
            TerminationResult::Resignation(self.config.artificial_side()),
            true,
        );
        Ok(())
    }

    /// A random legal move in SAN, or `None` once the game is over or
    /// there is none.
    pub fn hint(&mut self) -> Option<String> {
        if self.termination.is_some() {
            return None;
        }
        let san = self.board.legal_moves().choose(&mut self.rng).cloned()?;
        self.notify(GameNotice::Hint { san: san.clone() });
        Some(san)
    }

    // ---- persistence ----------------------------------------------------

    /// Save the game in progress and return its id.
    #[instrument(skip(self))]
    pub async fn save(&mut self) -> GameResult<i64> {
        if self.termination.is_some() {
            return Err(GameError::GameOver);
        }

        let record = self.game_record(None);
        let (id, saved_games) = self
            .with_store(move |store| async move {
                let id = store.save_game(&record).await?;
                Ok::<_, PersistenceError>((id, store.saved_games().await?))
            })
            .await?;

        self.saved_games = saved_games;
        info!(id, "game saved");
        self.notify(GameNotice::GameSaved { id });
        Ok(id)
    }

    /// Replace the current game with a saved one.
    #[instrument(skip(self))]
    pub async fn load(&mut self, id: i64) -> GameResult<()> {
        let saved = self
            .with_store(move |store| async move { store.load_game(id).await })
            .await?;

        let board = Board::from_fen(&saved.fen)?;
        let config = GameConfig::new(
            saved.player_color,
            saved.difficulty,
            saved.time_control_or_default(),
        )?;

        self.config = config;
        self.begin(board, saved.move_list);
        info!(id, fen = %self.board.fen(), "game loaded");
        self.notify(GameNotice::GameLoaded { id });
        self.resume(false);
        Ok(())
    }

    pub async fn saved_games(&mut self) -> GameResult<Vec<StoredGame>> {
        let saved_games = self
            .with_store(|store| async move { store.saved_games().await })
            .await?;
        self.saved_games = saved_games.clone();
        Ok(saved_games)
    }

    /// Reload finished games; with a difficulty only that tier's rows are kept.
    pub async fn history(
        &mut self,
        difficulty: Option<Difficulty>,
    ) -> GameResult<Vec<StoredGame>> {
        let mut history = self
            .with_store(|store| async move { store.game_history().await })
            .await?;
        if let Some(difficulty) = difficulty {
            history.retain(|row| row.difficulty == difficulty);
        }
        self.game_history = history.clone();
        Ok(history)
    }

    pub async fn delete_saved(&mut self, id: i64) -> GameResult<()> {
        self.saved_games = self
            .with_store(move |store| async move {
                store.delete_saved_game(id).await?;
                store.saved_games().await
            })
            .await?;
        Ok(())
    }

    pub async fn delete_history(&mut self, id: i64) -> GameResult<()> {
        self.game_history = self
            .with_store(move |store| async move {
                store.delete_history_item(id).await?;
                store.game_history().await
            })
            .await?;
        Ok(())
    }

    async fn with_store<T, F, Fut>(&mut self, request: F) -> GameResult<T>
    where
        F: FnOnce(Arc<dyn GameStore>) -> Fut,
        Fut: Future<Output = PersistenceResult<T>>,
    {
        self.is_loading = true;
        self.notify(GameNotice::LoadingStarted);

        let result = match self.store.clone() {
            Some(store) => request(store).await,
            None => Err(PersistenceError::Unavailable),
        };

        self.is_loading = false;
        self.notify(GameNotice::LoadingFinished);

        result.map_err(|err| {
            warn!(%err, "persistence request failed");
            self.notify(GameNotice::PersistenceFailed {
                reason: err.to_string(),
            });
            GameError::from(err)
        })
    }

    fn game_record(&self, result: Option<GameOutcome>) -> GameRecord {
        GameRecord {
            fen: self.board.fen(),
            move_list: self.ledger.move_list(),
            player_color: self.config.human_side(),
            difficulty: self.config.difficulty(),
            time_control: self.config.time_control_seconds(),
            result,
        }
    }

    // ---- background events ----------------------------------------------

    /// Wait for the next background event and apply it.
    ///
    /// Waits forever when nothing is scheduled (for example after the game
    /// ended and history was recorded).
    pub async fn next_event(&mut self) -> EventOutcome {
        match self.events_rx.recv().await {
            Some(event) => self.handle_event(event),
            None => EventOutcome::Stale,
        }
    }

    /// Apply an already-posted event without waiting.
    pub fn try_next_event(&mut self) -> Option<EventOutcome> {
        match self.events_rx.try_recv() {
            Ok(event) => Some(self.handle_event(event)),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    fn handle_event(&mut self, event: InternalEvent) -> EventOutcome {
        match event {
            InternalEvent::Deliberation { generation, chosen } => {
                if self.phase != GamePhase::ArtificialThinking
                    || !self.deliberation.finish(generation)
                {
                    debug!(generation, "discarding stale deliberation");
                    return EventOutcome::Stale;
                }
                self.apply_artificial_move(chosen)
            }
            InternalEvent::ClockTick { generation } => {
                if self.termination.is_some() || !self.clock_task.is_current(generation) {
                    debug!(generation, "discarding stale clock tick");
                    return EventOutcome::Stale;
                }
                if let Some(result) = self.clock.tick() {
                    self.finish(result, true);
                    return EventOutcome::GameEnded(result);
                }
                self.notify(GameNotice::ClockTick {
                    white: self.clock.remaining(Color::Light),
                    black: self.clock.remaining(Color::Dark),
                });
                EventOutcome::ClockTicked
            }
            InternalEvent::DrawOfferExpired { generation } => {
                if !self.draw_task.finish(generation) || !self.draw_offer.expire(Instant::now()) {
                    return EventOutcome::Stale;
                }
                debug!("draw offer expired");
                self.notify(GameNotice::DrawExpired);
                EventOutcome::DrawOfferExpired
            }
            InternalEvent::HistoryRecorded { result } => match result {
                Ok(history) => {
                    self.game_history = history;
                    self.notify(GameNotice::HistoryRecorded);
                    EventOutcome::HistoryRecorded
                }
                Err(err) => {
                    warn!(%err, "recording game history failed");
                    self.notify(GameNotice::PersistenceFailed {
                        reason: err.to_string(),
                    });
                    EventOutcome::PersistenceFailed
                }
            },
        }
    }

    fn apply_artificial_move(&mut self, chosen: Option<ChessMove>) -> EventOutcome {
        let applied = chosen.and_then(|mv| self.board.apply(MoveRequest::from(&mv)));
        match applied {
            Some(mv) => {
                self.commit_move(mv.clone(), false);
                EventOutcome::ArtificialMoved(mv)
            }
            None => match TerminationResult::detect(&self.board) {
                Some(result) => {
                    self.finish(result, true);
                    EventOutcome::GameEnded(result)
                }
                None => {
                    error!(fen = %self.board.fen(), "artificial side produced no move");
                    EventOutcome::Stale
                }
            },
        }
    }

    // ---- pipeline -------------------------------------------------------

    fn commit_move(&mut self, mv: ChessMove, by_human: bool) {
        self.ledger.record(self.board.position().clone(), mv.clone());
        self.error_message = None;
        info!(san = %mv.san, side = %mv.color, by_human, "move committed");
        self.notify(GameNotice::MovePlayed {
            san: mv.san,
            side: mv.color,
            by_human,
        });
        self.resume(true);
    }

    /// Reset everything for a fresh start from `board`.
    fn begin(&mut self, board: Board, prior_moves: Vec<String>) {
        self.cancel_background();
        self.ledger = Ledger::with_prior_moves(board.position().clone(), prior_moves);
        self.board = board;
        self.clock.reset(self.config.time_control_seconds());
        self.draw_offer.clear();
        self.termination = None;
        self.check_alert = None;
        self.error_message = None;
    }

    /// Check for the end of the game, otherwise hand the turn over.
    fn resume(&mut self, record_history: bool) {
        self.check_alert = None;
        if self.board.is_check() {
            let side = self.board.side_to_move();
            self.check_alert = Some(check_alert(side));
            self.notify(GameNotice::Check { side });
        }

        match TerminationResult::detect(&self.board) {
            Some(result) => self.finish(result, record_history),
            None => {
                self.restart_clock();
                self.enter_turn();
            }
        }
    }

    fn enter_turn(&mut self) {
        if self.board.side_to_move() == self.config.human_side() {
            self.phase = GamePhase::AwaitingHumanMove;
        } else {
            self.phase = GamePhase::ArtificialThinking;
            self.start_deliberation();
        }
    }

    fn start_deliberation(&mut self) {
        let generation = self.deliberation.next_generation();
        let difficulty = self.config.difficulty();
        let seed: u64 = self.rng.random();
        let board = self.board.clone();
        let events = self.events_tx.clone();

        debug!(generation, %difficulty, "deliberation started");
        self.deliberation.set(tokio::spawn(async move {
            let delay = sleep(thinking_delay(difficulty));
            let Some(chosen) = search_reply(board, difficulty, seed).await else {
                return;
            };
            delay.await;
            let _ = events.send(InternalEvent::Deliberation { generation, chosen });
        }));
    }

    /// Run the clock of the side to move, replacing any running tick task.
    fn restart_clock(&mut self) {
        let side = self.board.side_to_move();
        self.clock.start(side);

        let generation = self.clock_task.next_generation();
        let events = self.events_tx.clone();
        debug!(generation, %side, "clock restarted");
        self.clock_task.set(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + CLOCK_TICK, CLOCK_TICK);
            loop {
                ticker.tick().await;
                if events.send(InternalEvent::ClockTick { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    fn finish(&mut self, result: TerminationResult, record_history: bool) {
        if self.termination.is_some() {
            return;
        }

        self.cancel_background();
        self.clock.stop();
        self.draw_offer.clear();
        self.termination = Some(result);
        self.phase = GamePhase::GameOver;
        info!(%result, "game over");
        self.notify(GameNotice::GameOver(result));

        if record_history {
            self.record_history(result);
        }
    }

    fn record_history(&self, result: TerminationResult) {
        let Some(store) = self.store.clone() else {
            debug!("no store configured; history not recorded");
            return;
        };
        let record = self.game_record(Some(result.outcome()));
        let events = self.events_tx.clone();
        tokio::spawn(async move {
            let result = record_and_list_history(store, record).await;
            let _ = events.send(InternalEvent::HistoryRecorded { result });
        });
    }

    fn cancel_background(&mut self) {
        self.deliberation.cancel();
        self.clock_task.cancel();
        self.draw_task.cancel();
    }

    fn notify(&self, notice: GameNotice) {
        // The presentation layer may have gone away; the game carries on.
        let _ = self.notices.send(notice);
    }
}

impl Drop for GameOrchestrator {
    fn drop(&mut self) {
        self.cancel_background();
    }
}

/// Run the engine search off the async workers when the runtime has a
/// blocking pool to spare. A current-thread runtime searches inline.
///
/// Returns `None` only if the blocking search panicked.
async fn search_reply(
    board: Board,
    difficulty: Difficulty,
    seed: u64,
) -> Option<Option<ChessMove>> {
    let search = move || MoveSelector::seeded(difficulty, seed).select_move(&board);
    match Handle::current().runtime_flavor() {
        RuntimeFlavor::CurrentThread => Some(search()),
        _ => match task::spawn_blocking(search).await {
            Ok(chosen) => Some(chosen),
            Err(err) => {
                error!(%err, "engine search failed");
                None
            }
        },
    }
}

async fn record_and_list_history(
    store: Arc<dyn GameStore>,
    record: GameRecord,
) -> PersistenceResult<Vec<StoredGame>> {
    store.add_to_history(&record).await?;
    store.game_history().await
}
