use crate::core::{CellKind, Direction, Position};
use crate::error::{BoardError, LevelError};

/// Static terrain of a level: a `width` x `height` grid stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<CellKind>,
}

impl Board {
    pub fn new(width: usize, cells: Vec<CellKind>) -> Result<Board, LevelError> {
        if width == 0 {
            return Err(LevelError::ZeroWidth);
        }
        if cells.is_empty() {
            return Err(LevelError::EmptyGrid);
        }
        if cells.len() % width != 0 {
            return Err(LevelError::RaggedGrid { cells: cells.len(), width });
        }
        let height = cells.len() / width;
        Ok(Board { width, height, cells })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_kind(&self, position: Position) -> Result<CellKind, BoardError> {
        self.cells
            .get(position.0)
            .copied()
            .ok_or(BoardError::OutOfRange { position, len: self.cells.len() })
    }

    /// Anything off the grid counts as not walkable.
    pub fn is_walkable(&self, position: Position) -> bool {
        matches!(self.cell_kind(position), Ok(CellKind::Empty))
    }

    /// Whether one step from `position` towards `dir` stays on the grid.
    /// Horizontal steps never wrap onto the neighbouring row.
    pub fn is_in_bounds(&self, position: Position, dir: Direction) -> bool {
        if position.0 >= self.cells.len() {
            return false;
        }
        let row = position.row(self.width);
        let col = position.col(self.width);
        match dir {
            Direction::Up => row > 0,
            Direction::Down => row + 1 < self.height,
            Direction::Left => col > 0,
            Direction::Right => col + 1 < self.width,
        }
    }

    pub fn neighbor(&self, position: Position, dir: Direction) -> Option<Position> {
        if !self.is_in_bounds(position, dir) {
            return None;
        }
        position
            .0
            .checked_add_signed(dir.displacement(self.width))
            .map(Position)
    }

    /// Cells row by row, each slice exactly `width` long.
    pub fn rows(&self) -> impl Iterator<Item = &[CellKind]> {
        self.cells.chunks(self.width)
    }
}
