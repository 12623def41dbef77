use std::path::PathBuf;

use crate::core::{Direction, Position, RejectReason};

/// Errors raised by grid lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position {position} is outside the grid of {len} cells")]
    OutOfRange { position: Position, len: usize },
}

/// Errors raised while building or fetching a level. All of them are fatal
/// for the level in question and surface at load time.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelError {
    #[error("level width must be greater than zero")]
    ZeroWidth,

    #[error("level has no cells")]
    EmptyGrid,

    #[error("{cells} cells do not fill rows of width {width}")]
    RaggedGrid { cells: usize, width: usize },

    #[error("unknown cell flag {flag} at {position}")]
    UnknownCellFlag { flag: u8, position: Position },

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("player starts inside a wall at {0}")]
    PlayerOnWall(Position),

    #[error("player starts on a box at {0}")]
    PlayerOnBox(Position),

    #[error("box placed inside a wall at {0}")]
    BoxOnWall(Position),

    #[error("target placed inside a wall at {0}")]
    TargetOnWall(Position),

    #[error("more than one box at {0}")]
    DuplicateBox(Position),

    #[error("more than one target at {0}")]
    DuplicateTarget(Position),

    #[error("level text has no player")]
    MissingPlayer,

    #[error("level text has a second player at {0}")]
    SecondPlayer(Position),

    #[error("level {index} does not exist (pack has {count} levels)")]
    UnknownLevel { index: usize, count: usize },
}

/// Errors raised while loading a level pack.
#[derive(Debug, thiserror::Error)]
pub enum PackError {
    #[error("failed to read level pack {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse level pack: {0}")]
    Json(#[from] serde_json::Error),

    #[error("level {index} is malformed: {source}")]
    InvalidLevel { index: usize, source: LevelError },

    #[error("level pack contains no levels")]
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionCodeError {
    #[error("unknown action code {0}")]
    UnknownCode(u8),

    #[error("cannot read move {0:?}")]
    UnknownToken(String),
}

/// Errors raised while replaying a recorded action list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error(transparent)]
    ActionCode(#[from] ActionCodeError),

    #[error("move {index} ({direction:?}) was rejected: {reason}")]
    Rejected {
        index: usize,
        direction: Direction,
        reason: RejectReason,
    },

    #[error("actions end with {on_targets} of {targets} targets covered")]
    NotSolved { on_targets: usize, targets: usize },
}

/// Errors raised while handing a win to the claim sink.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("refusing to submit a claim with no actions for level {0}")]
    EmptyClaim(usize),

    #[error("failed to encode claim: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write claim: {0}")]
    Io(#[from] std::io::Error),
}
