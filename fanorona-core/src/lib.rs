//! Fanorona Core - Rules engine
//!
//! This crate provides the deterministic rules of Fanorona:
//! - Board topology (5x9 intersections, diagonals on strong points)
//! - Board state and its text form
//! - Move values, notation and the fixed action space
//! - Legal move generation under the mandatory-capture rule
//! - Capture resolution and chain continuations
//! - The turn state machine with elimination, stalemate and move-limit draws

pub mod board;
pub mod state;
pub mod moves;
pub mod movegen;
pub mod capture;
pub mod game;
pub mod view;
pub mod config;
pub mod error;

// Re-exports for convenient access
pub use board::{neighbor, directions, Direction, Point, BOARD_COLS, BOARD_ROWS, POINT_COUNT};
pub use state::{Board, Player, INITIAL_BOARD};
pub use moves::{Action, Move, MoveKind, ACTION_COUNT, END_TURN_ACTION};
pub use movegen::{legal_moves, captured_points, capturing_moves_from, has_capture};
pub use capture::{apply, continuations, TurnContext};
pub use game::{Game, GameRecord, GameResult, Phase, PlyOutcome, TurnStatus};
pub use view::BoardView;
pub use config::RulesConfig;
pub use error::{ParseError, RulesError};
