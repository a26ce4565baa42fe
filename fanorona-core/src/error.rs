//! Error types returned to callers of the engine

use crate::board::Point;
use crate::game::GameResult;
use crate::moves::Move;

/// A rejected input. Engine state is unchanged whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("illegal move: {0}")]
    IllegalMove(Move),

    #[error("illegal continuation: {0}")]
    IllegalContinuation(Move),

    #[error("no capture chain in progress")]
    NoCaptureChain,

    #[error("game is over: {0:?}")]
    GameOver(GameResult),

    #[error("invalid action index: {0}")]
    InvalidAction(usize),

    #[error("malformed move {mv}: {reason}")]
    Malformed { mv: Move, reason: &'static str },
}

/// Text that does not describe a point, move, board or position
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("invalid point: {0:?}")]
    InvalidPoint(String),

    #[error("invalid direction: {0:?}")]
    InvalidDirection(String),

    #[error("invalid capture marker: {0:?}")]
    InvalidKind(String),

    #[error("invalid move notation: {0:?}")]
    InvalidMove(String),

    #[error("{from} and {to} are not joined by a line")]
    NotConnected { from: Point, to: Point },

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("invalid position: {0}")]
    InvalidPosition(String),
}
