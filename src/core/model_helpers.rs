use im::{OrdSet, Vector};

use crate::core::{CellKind, Direction, GameState, Position, UserAction};

impl Position {
    pub fn from_row_col(row: usize, col: usize, width: usize) -> Position {
        Position(row * width + col)
    }

    pub fn row(self, width: usize) -> usize {
        self.0 / width
    }

    pub fn col(self, width: usize) -> usize {
        self.0 % width
    }
}

impl Direction {
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Offset of one step in this direction on a grid `width` cells wide.
    /// Only meaningful after a bounds check; see `Board::neighbor`.
    pub fn displacement(self, width: usize) -> isize {
        let width = width as isize;
        match self {
            Direction::Up => -width,
            Direction::Down => width,
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

impl UserAction {
    pub fn all_actions() -> Vec<UserAction> {
        Direction::all().into_iter().map(UserAction::Move).collect()
    }
}

impl CellKind {
    /// Terrain flag as stored in a level pack's `map_data`.
    pub fn flag(self) -> u8 {
        match self {
            CellKind::Empty => 0,
            CellKind::Wall => 1,
        }
    }

    pub fn from_flag(flag: u8) -> Option<CellKind> {
        match flag {
            0 => Some(CellKind::Empty),
            1 => Some(CellKind::Wall),
            _ => None,
        }
    }
}

impl GameState {
    pub(crate) fn new(player: Position, boxes: OrdSet<Position>, targets: OrdSet<Position>) -> GameState {
        GameState {
            player,
            boxes,
            targets,
            history: Vector::new(),
        }
    }

    pub fn player(&self) -> Position {
        self.player
    }

    pub fn boxes(&self) -> &OrdSet<Position> {
        &self.boxes
    }

    pub fn targets(&self) -> &OrdSet<Position> {
        &self.targets
    }

    /// Accepted moves in order, one entry per accepted move.
    pub fn history(&self) -> &Vector<Direction> {
        &self.history
    }

    pub fn has_box_at(&self, position: Position) -> bool {
        self.boxes.contains(&position)
    }

    pub fn is_won(&self) -> bool {
        boxes_cover_targets(&self.boxes, &self.targets)
    }

    pub fn boxes_on_targets(&self) -> usize {
        self.boxes.iter().filter(|&b| self.targets.contains(b)).count()
    }

    /// Same player and box placement, regardless of how either state was reached.
    pub fn same_position(&self, other: &GameState) -> bool {
        self.player == other.player && self.boxes == other.boxes
    }

    /// The state after an accepted move. `push` is the box's `(from, to)` when
    /// the move pushes one.
    pub(crate) fn advance(&self, player: Position, push: Option<(Position, Position)>, dir: Direction) -> GameState {
        let boxes = match push {
            Some((from, to)) => self.boxes.without(&from).update(to),
            None => self.boxes.clone(),
        };
        let mut history = self.history.clone();
        history.push_back(dir);
        GameState {
            player,
            boxes,
            targets: self.targets.clone(),
            history,
        }
    }
}

/// True when every box rests on a target and every target holds a box.
/// A level with no boxes is never won.
pub fn boxes_cover_targets(boxes: &OrdSet<Position>, targets: &OrdSet<Position>) -> bool {
    if boxes.is_empty() || targets.is_empty() {
        return false;
    }
    if boxes.len() != targets.len() {
        return false;
    }
    boxes.iter().all(|b| targets.contains(b))
}
