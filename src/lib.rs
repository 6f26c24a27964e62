//! Crate root module declarations for the Plum Arena game orchestrator.
//!
//! Exposes the rules engine (game state, move generation, scoring), the
//! engine tiers, the game orchestrator with its clock, undo and draw-offer
//! handling, and the persistence client so binaries and tests can import
//! stable module paths.

pub mod chess_errors;
pub mod config;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod position_key;
}

pub mod moves {
    pub mod attacks;
    pub mod chess_move;
    pub mod move_descriptions;
}

pub mod move_generation {
    pub mod board;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod move_generator;
}

pub mod search {
    pub mod board_scoring;
}

pub mod engines {
    pub mod engine_one_ply;
    pub mod engine_random;
    pub mod engine_trait;
    pub mod engine_two_ply;
    pub mod move_selector;
    pub mod time_management;
}

pub mod game {
    pub mod clock;
    pub mod draw_offer;
    pub mod errors;
    pub mod game_config;
    pub mod ledger;
    pub mod notices;
    pub mod orchestrator;
    pub mod termination;
}

pub mod persistence {
    pub mod client;
    pub mod errors;
    pub mod memory_store;
    pub mod models;
    pub mod store;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_game_state;
    pub mod san;
}
