use im::OrdSet;
use tracing::warn;

use crate::core::{Board, CellKind, GameState, Position};
use crate::error::LevelError;

/// Immutable level definition, shared read-only by every game started from it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    board: Board,
    initial_boxes: OrdSet<Position>,
    targets: OrdSet<Position>,
    initial_player: Position,
}

impl Level {
    pub fn new(
        width: usize,
        cells: Vec<CellKind>,
        boxes: impl IntoIterator<Item = Position>,
        targets: impl IntoIterator<Item = Position>,
        player: Position,
    ) -> Result<Level, LevelError> {
        let board = Board::new(width, cells)?;

        if board.cell_kind(player)? == CellKind::Wall {
            return Err(LevelError::PlayerOnWall(player));
        }

        let mut initial_boxes = OrdSet::new();
        for position in boxes {
            if board.cell_kind(position)? == CellKind::Wall {
                return Err(LevelError::BoxOnWall(position));
            }
            if initial_boxes.insert(position).is_some() {
                return Err(LevelError::DuplicateBox(position));
            }
        }
        if initial_boxes.contains(&player) {
            return Err(LevelError::PlayerOnBox(player));
        }

        let mut target_set = OrdSet::new();
        for position in targets {
            if board.cell_kind(position)? == CellKind::Wall {
                return Err(LevelError::TargetOnWall(position));
            }
            if target_set.insert(position).is_some() {
                return Err(LevelError::DuplicateTarget(position));
            }
        }

        if initial_boxes.len() != target_set.len() {
            warn!(
                boxes = initial_boxes.len(),
                targets = target_set.len(),
                "level box and target counts differ; it can never be won"
            );
        }

        Ok(Level {
            board,
            initial_boxes,
            targets: target_set,
            initial_player: player,
        })
    }

    /// Builds a level from the flag encoding used by level packs.
    pub fn from_flags(
        width: usize,
        map_data: &[u8],
        boxes: impl IntoIterator<Item = Position>,
        targets: impl IntoIterator<Item = Position>,
        player: Position,
    ) -> Result<Level, LevelError> {
        let cells = map_data
            .iter()
            .enumerate()
            .map(|(i, &flag)| {
                CellKind::from_flag(flag).ok_or(LevelError::UnknownCellFlag { flag, position: Position(i) })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Level::new(width, cells, boxes, targets, player)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn width(&self) -> usize {
        self.board.width()
    }

    pub fn height(&self) -> usize {
        self.board.height()
    }

    pub fn initial_boxes(&self) -> &OrdSet<Position> {
        &self.initial_boxes
    }

    pub fn targets(&self) -> &OrdSet<Position> {
        &self.targets
    }

    pub fn initial_player(&self) -> Position {
        self.initial_player
    }

    pub fn is_target(&self, position: Position) -> bool {
        self.targets.contains(&position)
    }

    pub fn initial_state(&self) -> GameState {
        GameState::new(self.initial_player, self.initial_boxes.clone(), self.targets.clone())
    }
}
