//! Plum Arena - terminal front end.
//!
//! Reads commands from stdin while the orchestrator's background events
//! (engine replies, clock ticks, draw-offer expiry) are applied as they
//! arrive.

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use plum_arena::config::{ConfigResult, DEFAULT_LOG_FILTER};
use plum_arena::engines::engine_trait::Difficulty;
use plum_arena::game::clock::format_time;
use plum_arena::game::errors::{GameError, GameResult};
use plum_arena::game::game_config::GameConfig;
use plum_arena::game::notices::{check_alert, GameNotice};
use plum_arena::game::orchestrator::{EventOutcome, GameOrchestrator};
use plum_arena::game_state::chess_types::Color;
use plum_arena::moves::chess_move::MoveRequest;
use plum_arena::persistence::client::HttpGameStore;
use plum_arena::persistence::memory_store::MemoryGameStore;
use plum_arena::persistence::models::{GameOutcome, StoredGame};
use plum_arena::persistence::store::GameStore;
use plum_arena::utils::render_game_state::render_game_state;

const HELP: &str = "\
commands:
  e2e4 | e7e8q          play a move (coordinate notation)
  new                   start a new game
  undo                  take back your last move
  draw                  offer a draw
  accept | decline      answer a pending draw offer
  resign                concede the game
  hint                  suggest a move
  difficulty <level>    easy, medium or hard (starts a new game)
  side <w|b>            play white or black (starts a new game)
  time <seconds>        seconds per side (starts a new game)
  save                  save the game in progress
  load <id>             load a saved game
  saved                 list saved games
  history [level]       list finished games, optionally of one difficulty
  delete-saved <id>     remove a saved game
  delete-history <id>   remove a history entry
  board                 show the position
  help                  show this text
  quit                  leave";

#[derive(Debug)]
enum Command {
    Move(MoveRequest),
    New,
    Undo,
    OfferDraw,
    RespondToDraw(bool),
    Resign,
    Hint,
    Difficulty(Difficulty),
    Side(Color),
    TimeControl(u32),
    Save,
    Load(i64),
    Saved,
    History(Option<Difficulty>),
    DeleteSaved(i64),
    DeleteHistory(i64),
    Board,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Ok(Command::Board);
        };
        let arg = words.next();

        let command = match (head.to_ascii_lowercase().as_str(), arg) {
            ("new", None) => Command::New,
            ("undo", None) => Command::Undo,
            ("draw", None) => Command::OfferDraw,
            ("accept", None) => Command::RespondToDraw(true),
            ("decline", None) => Command::RespondToDraw(false),
            ("resign", None) => Command::Resign,
            ("hint", None) => Command::Hint,
            ("save", None) => Command::Save,
            ("saved", None) => Command::Saved,
            ("history", None) => Command::History(None),
            ("board", None) => Command::Board,
            ("help", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            ("difficulty", Some(level)) => {
                Command::Difficulty(level.parse().map_err(|err| format!("{err}"))?)
            }
            ("history", Some(level)) => {
                Command::History(Some(level.parse().map_err(|err| format!("{err}"))?))
            }
            ("side", Some(side)) => Command::Side(side.parse().map_err(|err| format!("{err}"))?),
            ("time", Some(seconds)) => Command::TimeControl(parse_number(seconds)?),
            ("load", Some(id)) => Command::Load(parse_number(id)?),
            ("delete-saved", Some(id)) => Command::DeleteSaved(parse_number(id)?),
            ("delete-history", Some(id)) => Command::DeleteHistory(parse_number(id)?),
            (text, None) => Command::Move(
                text.parse()
                    .map_err(|_| format!("unknown command '{line}' (try 'help')"))?,
            ),
            _ => return Err(format!("unknown command '{line}' (try 'help')")),
        };
        Ok(command)
    }
}

fn parse_number<T: std::str::FromStr>(text: &str) -> Result<T, String> {
    text.parse().map_err(|_| format!("'{text}' is not a number"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = cli.settings().context("failed to load settings")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&settings.log_filter)
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let store: Arc<dyn GameStore> = match settings.server_url() {
        Some(url) if !cli.offline => {
            info!(url, "Using saved-game service");
            Arc::new(HttpGameStore::new(url))
        }
        _ => {
            info!("Keeping saved games in memory");
            Arc::new(MemoryGameStore::new())
        }
    };

    let config = settings.game_config().context("invalid game settings")?;
    let (mut game, mut notices) = match cli.seed {
        Some(seed) => GameOrchestrator::with_seed(config, Some(store), seed),
        None => GameOrchestrator::new(config, Some(store)),
    };

    println!("{HELP}\n");
    print_board(&game);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                match Command::parse(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => {
                        if let Err(err) = run_command(&mut game, command).await {
                            println!("{err}");
                        }
                    }
                    Err(message) => println!("{message}"),
                }
            }
            outcome = game.next_event() => report_event(&game, outcome),
            Some(notice) = notices.recv() => report_notice(notice),
        }
    }

    info!("Leaving");
    Ok(())
}

async fn run_command(game: &mut GameOrchestrator, command: Command) -> GameResult<()> {
    match command {
        Command::Move(request) => {
            game.submit_move(request)?;
            print_board(game);
        }
        Command::New => {
            game.new_game();
            print_board(game);
        }
        Command::Undo => {
            game.undo()?;
            print_board(game);
        }
        Command::OfferDraw => game.offer_draw()?,
        Command::RespondToDraw(accept) => {
            game.respond_to_draw(accept)?;
        }
        Command::Resign => game.resign()?,
        Command::Hint => {
            if game.hint().is_none() {
                println!("No legal moves.");
            }
        }
        Command::Difficulty(difficulty) => {
            let current = game.config();
            reconfigure(
                game,
                GameConfig::new(current.human_side(), difficulty, current.time_control_seconds()),
            )?;
        }
        Command::Side(side) => {
            let current = game.config();
            reconfigure(
                game,
                GameConfig::new(side, current.difficulty(), current.time_control_seconds()),
            )?;
        }
        Command::TimeControl(seconds) => {
            let current = game.config();
            reconfigure(
                game,
                GameConfig::new(current.human_side(), current.difficulty(), seconds),
            )?;
        }
        Command::Save => {
            game.save().await?;
        }
        Command::Load(id) => {
            game.load(id).await?;
            print_board(game);
        }
        Command::Saved => print_games("Saved games", &game.saved_games().await?),
        Command::History(difficulty) => {
            print_games("Game history", &game.history(difficulty).await?)
        }
        Command::DeleteSaved(id) => game.delete_saved(id).await?,
        Command::DeleteHistory(id) => game.delete_history(id).await?,
        Command::Board => print_board(game),
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

fn reconfigure(
    game: &mut GameOrchestrator,
    config: ConfigResult<GameConfig>,
) -> GameResult<()> {
    game.change_config(config.map_err(GameError::from)?);
    print_board(game);
    Ok(())
}

fn report_event(game: &GameOrchestrator, outcome: EventOutcome) {
    if let EventOutcome::ArtificialMoved(_) = outcome {
        print_board(game);
    }
}

fn report_notice(notice: GameNotice) {
    match notice {
        GameNotice::MovePlayed {
            san,
            side,
            by_human: false,
        } => println!("{} plays {san}", side.title()),
        GameNotice::InvalidMove { reason } => println!("Invalid move: {reason}"),
        GameNotice::Check { side } => println!("{}", check_alert(side)),
        GameNotice::GameOver(result) => println!("{}", result.banner()),
        GameNotice::UndoApplied { half_moves } => println!("Took back {half_moves} half-move(s)."),
        GameNotice::DrawOffered { expires_in_secs } => {
            println!("Draw offered; 'accept' or 'decline' within {expires_in_secs}s.")
        }
        GameNotice::DrawDeclined => println!("Draw declined."),
        GameNotice::DrawExpired => println!("Draw offer expired."),
        GameNotice::Hint { san } => println!("Hint: {san}"),
        GameNotice::GameSaved { id } => println!("Game saved as #{id}."),
        GameNotice::GameLoaded { id } => println!("Loaded game #{id}."),
        GameNotice::PersistenceFailed { reason } => println!("Server error: {reason}"),
        GameNotice::NewGame { .. }
        | GameNotice::MovePlayed { .. }
        | GameNotice::ClockTick { .. }
        | GameNotice::HistoryRecorded
        | GameNotice::LoadingStarted
        | GameNotice::LoadingFinished => {}
    }
}

fn print_board(game: &GameOrchestrator) {
    let snapshot = game.snapshot();
    println!(
        "{}",
        render_game_state(game.board().position(), snapshot.config.human_side())
    );
    println!(
        "White {}  |  Black {}  |  {} to move",
        format_time(snapshot.white_remaining),
        format_time(snapshot.black_remaining),
        snapshot.turn.title()
    );
    if !snapshot.move_list.is_empty() {
        println!("Moves: {}", snapshot.move_list.join(" "));
    }
    if let Some(alert) = &snapshot.check_alert {
        println!("{alert}");
    }
    if let Some(message) = &snapshot.game_over_message {
        println!("{message}");
    }
}

fn print_games(title: &str, games: &[StoredGame]) {
    println!("{title}:");
    if games.is_empty() {
        println!("  (none)");
    }
    for game in games {
        let result = match game.result {
            Some(GameOutcome::White) => "1-0",
            Some(GameOutcome::Black) => "0-1",
            Some(GameOutcome::Draw) => "1/2-1/2",
            None => "*",
        };
        println!(
            "  #{:<4} {:<19} {:<7} {:<6} {} moves  {}",
            game.id.map_or_else(|| "?".to_string(), |id| id.to_string()),
            game.timestamp.as_deref().unwrap_or("-"),
            result,
            game.difficulty.as_str(),
            game.move_list.len(),
            game.player_color.title(),
        );
    }
}
