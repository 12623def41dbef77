use std::fmt;

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

/// Static terrain of a cell. Boxes, targets and the player are overlays and
/// never change a cell's kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Wall,
}

/// Index into the flattened grid, `row * width + col`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Position(pub usize);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UserAction {
    Move(Direction),
}

/// Runtime state of one attempt at a level.
///
/// Every accepted move produces a new `GameState`; the persistent collections
/// share structure with the previous state so keeping old states around for
/// undo or audit is cheap.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) player: Position,
    pub(crate) boxes: OrdSet<Position>,
    pub(crate) targets: OrdSet<Position>,
    pub(crate) history: Vector<Direction>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameUpdate {
    NextState(GameState, GameChangeType),
    Rejected(RejectReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameChangeType {
    PlayerMove,
    PlayerAndBoxMove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    OutOfBounds,
    Wall,
    BoxOutOfBounds,
    BoxAgainstWall,
    BoxAgainstBox,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            RejectReason::OutOfBounds => "cannot move out of bounds",
            RejectReason::Wall => "cannot walk into a wall",
            RejectReason::BoxOutOfBounds => "cannot push box out of bounds",
            RejectReason::BoxAgainstWall => "cannot push box into a wall",
            RejectReason::BoxAgainstBox => "cannot push two boxes at once",
        };
        f.write_str(text)
    }
}
