//! Frontend-neutral render contract.

use crate::error::{Result, SnakeError};
use crate::game::GameState;
use crate::grid::Cell;
use crate::input::Viewport;

/// One board row ready for drawing, with an optional key per cell.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
    ids: Option<Vec<usize>>,
}

impl Row {
    /// Builds a row. When `ids` is given it must hold exactly one id per cell.
    pub fn new(cells: Vec<Cell>, ids: Option<Vec<usize>>) -> Result<Self> {
        if let Some(ids) = &ids {
            if ids.len() != cells.len() {
                return Err(SnakeError::ShapeMismatch {
                    cells: cells.len(),
                    ids: ids.len(),
                });
            }
        }

        Ok(Self { cells, ids })
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Key for the cell at `index`; falls back to the index itself.
    #[must_use]
    pub fn key(&self, index: usize) -> usize {
        self.ids
            .as_ref()
            .and_then(|ids| ids.get(index).copied())
            .unwrap_or(index)
    }

    /// Cells paired with their keys, left to right.
    pub fn keyed_cells(&self) -> impl Iterator<Item = (usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, cell)| (self.key(index), *cell))
    }
}

/// Everything the presentation layer needs for one frame.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RenderSnapshot {
    /// Board rows with the figure overlaid.
    pub rows: Vec<Row>,
    pub pause: bool,
    pub game_over: bool,
    pub score: u32,
    pub speed: u32,
    pub viewport: Viewport,
}

impl RenderSnapshot {
    /// Builds the snapshot; each row is keyed by its cells' column indices.
    pub fn new(state: &GameState, viewport: Viewport) -> Result<Self> {
        let overlaid = state.field.with_figure(&state.figure);
        let cols = usize::from(overlaid.size().cols);
        let rows = overlaid
            .rows()
            .map(|cells| Row::new(cells.to_vec(), Some((0..cols).collect())))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            rows,
            pause: state.pause,
            game_over: state.game_over,
            score: state.score,
            speed: state.speed,
            viewport,
        })
    }
}
