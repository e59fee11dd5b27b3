use log::warn;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::GridSize;
use crate::figure::{Figure, Position};

/// Visual role of a cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub enum CellColor {
    #[default]
    Blank,
    Food,
    Head,
    Body,
}

/// One board cell. Filled cells are food or figure segments.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
pub struct Cell {
    pub color: CellColor,
    pub is_filled: bool,
}

impl Cell {
    pub const EMPTY: Self = Self {
        color: CellColor::Blank,
        is_filled: false,
    };

    pub const FOOD: Self = Self {
        color: CellColor::Food,
        is_filled: true,
    };

    #[must_use]
    pub fn is_food(self) -> bool {
        self.is_filled && self.color == CellColor::Food
    }
}

/// Fixed-size board indexed `[row][col]`.
///
/// The stored grid only tracks food. The figure is overlaid on a derived copy
/// with [`Grid::with_figure`]. Every operation returns a new grid.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Grid {
    cells: Vec<Vec<Cell>>,
    size: GridSize,
}

impl Grid {
    /// Creates a board with every cell unfilled.
    #[must_use]
    pub fn empty(rows: u16, cols: u16) -> Self {
        Self {
            cells: vec![vec![Cell::EMPTY; usize::from(cols)]; usize::from(rows)],
            size: GridSize { rows, cols },
        }
    }

    #[must_use]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// Returns the cell at `position`, or `None` off the board.
    #[must_use]
    pub fn cell(&self, position: Position) -> Option<Cell> {
        let (row, col) = self.index(position)?;
        Some(self.cells[row][col])
    }

    /// Returns true if `position` is a food cell.
    #[must_use]
    pub fn is_food(&self, position: Position) -> bool {
        self.cell(position).is_some_and(Cell::is_food)
    }

    #[must_use]
    pub fn food_count(&self) -> usize {
        self.rows().flatten().filter(|cell| cell.is_food()).count()
    }

    /// Positions of every food cell, row by row.
    #[must_use]
    pub fn food_positions(&self) -> Vec<Position> {
        self.positions().filter(|p| self.is_food(*p)).collect()
    }

    /// Iterates rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(Vec::as_slice)
    }

    /// Returns a copy with up to `count` new food cells at random free positions.
    ///
    /// Free means neither occupied by `figure` nor already food. When fewer free
    /// cells remain, all of them are used; with none left this is a no-op.
    #[must_use]
    pub fn with_food<R: Rng + ?Sized>(&self, figure: &Figure, count: usize, rng: &mut R) -> Self {
        let free: Vec<Position> = self
            .positions()
            .filter(|p| !figure.occupies(*p) && !self.is_food(*p))
            .collect();

        if free.len() < count {
            warn!(
                "only {} free cells for {count} food items on a {}x{} board",
                free.len(),
                self.size.rows,
                self.size.cols
            );
        }

        let mut next = self.clone();
        for position in free.choose_multiple(rng, count) {
            next.set(*position, Cell::FOOD);
        }
        next
    }

    /// Returns a copy with food at `position`.
    #[must_use]
    pub fn with_food_at(&self, position: Position) -> Self {
        let mut next = self.clone();
        next.set(position, Cell::FOOD);
        next
    }

    /// Returns a copy with the cell at `position` unfilled.
    #[must_use]
    pub fn cleared(&self, position: Position) -> Self {
        let mut next = self.clone();
        next.set(position, Cell::EMPTY);
        next
    }

    /// Returns a derived copy with `figure` drawn over the stored food.
    #[must_use]
    pub fn with_figure(&self, figure: &Figure) -> Self {
        let mut overlaid = self.clone();
        let head = Cell {
            color: figure.head_color(),
            is_filled: true,
        };
        let body = Cell {
            color: figure.body_color(),
            is_filled: true,
        };

        for (index, segment) in figure.segments().iter().enumerate() {
            overlaid.set(*segment, if index == 0 { head } else { body });
        }
        overlaid
    }

    fn positions(&self) -> impl Iterator<Item = Position> {
        let GridSize { rows, cols } = self.size;
        (0..i32::from(rows)).flat_map(move |y| (0..i32::from(cols)).map(move |x| Position { x, y }))
    }

    fn set(&mut self, position: Position, cell: Cell) {
        if let Some((row, col)) = self.index(position) {
            self.cells[row][col] = cell;
        }
    }

    fn index(&self, position: Position) -> Option<(usize, usize)> {
        if !position.is_within_bounds(self.size) {
            return None;
        }

        Some((
            usize::try_from(position.y).ok()?,
            usize::try_from(position.x).ok()?,
        ))
    }
}
