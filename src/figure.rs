use crate::config::{GridSize, INITIAL_FIGURE_LENGTH};
use crate::error::{Result, SnakeError};
use crate::grid::{CellColor, Grid};

/// Grid position in logical cell coordinates: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.cols)
            && self.y < i32::from(bounds.rows)
    }

    /// Returns this position shifted by `(dx, dy)`.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns true when `other` is exactly one cardinal step away.
    #[must_use]
    pub fn is_adjacent_to(self, other: Self) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

/// The snake body, head first.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Figure {
    segments: Vec<Position>,
    head_color: CellColor,
    body_color: CellColor,
}

impl Figure {
    /// Creates the starting figure centered on the board.
    ///
    /// The body trails to the right of the head so the opening leftward move
    /// never runs into it.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        let head = Position {
            x: i32::from(bounds.cols / 2),
            y: i32::from(bounds.rows / 2),
        };
        let room = usize::from(bounds.cols) - usize::from(bounds.cols / 2);
        let length = INITIAL_FIGURE_LENGTH.min(room).max(1);

        let segments = (0..length)
            .map(|offset| head.offset(offset as i32, 0))
            .collect();

        Self {
            segments,
            head_color: CellColor::Head,
            body_color: CellColor::Body,
        }
    }

    /// Creates a figure from explicit body segments (first is head).
    pub fn from_segments(segments: Vec<Position>) -> Result<Self> {
        if segments.is_empty() {
            return Err(SnakeError::EmptyFigure);
        }

        Ok(Self {
            segments,
            head_color: CellColor::Head,
            body_color: CellColor::Body,
        })
    }

    /// Attaches the colors used when the figure is overlaid on a grid.
    #[must_use]
    pub fn colored(mut self, head: CellColor, body: CellColor) -> Self {
        self.head_color = head;
        self.body_color = body;
        self
    }

    /// Returns the figure after one step of `(dx, dy)`.
    ///
    /// Every segment takes its predecessor's old place. When the new head lands
    /// on food in `grid` the old tail is kept, growing the figure by one. Nothing
    /// is clamped or wrapped: an off-grid head is left for the caller to reject.
    #[must_use]
    pub fn moved(&self, dx: i32, dy: i32, grid: &Grid) -> Self {
        let next_head = self.head().offset(dx, dy);
        let keep = if grid.is_food(next_head) {
            self.segments.len()
        } else {
            self.segments.len() - 1
        };

        let mut segments = Vec::with_capacity(keep + 1);
        segments.push(next_head);
        segments.extend_from_slice(&self.segments[..keep]);

        Self {
            segments,
            head_color: self.head_color,
            body_color: self.body_color,
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // `segments` is never empty: both constructors guarantee one segment
        // and `moved` always pushes a head.
        self.segments[0]
    }

    /// Returns the tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.segments[self.segments.len() - 1]
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.segments.contains(&position)
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.segments.iter().skip(1).any(|segment| *segment == head)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[must_use]
    pub fn head_color(&self) -> CellColor {
        self.head_color
    }

    #[must_use]
    pub fn body_color(&self) -> CellColor {
        self.body_color
    }

    /// Body segments from head to tail.
    #[must_use]
    pub fn segments(&self) -> &[Position] {
        &self.segments
    }
}
