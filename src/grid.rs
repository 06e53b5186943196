use crate::config::GridSize;
use crate::input::Direction;

/// Grid cell in (row, col) coordinates, row 0 at the top.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub row: u16,
    pub col: u16,
}

impl Position {
    #[must_use]
    pub const fn new(row: u16, col: u16) -> Self {
        Self { row, col }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.row < bounds.height && self.col < bounds.width
    }
}

/// Returns the cell one step from `current` in `direction`, wrapping
/// around every edge of the grid.
#[must_use]
pub fn next_position(current: Position, direction: Direction, bounds: GridSize) -> Position {
    debug_assert!(current.is_within_bounds(bounds));

    match direction {
        Direction::Up => Position {
            row: step_back(current.row, bounds.height),
            col: current.col,
        },
        Direction::Down => Position {
            row: step_forward(current.row, bounds.height),
            col: current.col,
        },
        Direction::Left => Position {
            row: current.row,
            col: step_back(current.col, bounds.width),
        },
        Direction::Right => Position {
            row: current.row,
            col: step_forward(current.col, bounds.width),
        },
    }
}

fn step_forward(value: u16, upper_bound: u16) -> u16 {
    if value + 1 >= upper_bound { 0 } else { value + 1 }
}

fn step_back(value: u16, upper_bound: u16) -> u16 {
    if value == 0 { upper_bound - 1 } else { value - 1 }
}
