use rand::Rng;

use crate::config::GridSize;
use crate::error::SpawnError;
use crate::grid::Position;
use crate::snake::Snake;

/// What happens when the snake's head reaches an item.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum FoodKind {
    /// Grows the snake and awards points.
    Good,
    /// Ends the game.
    Poison,
}

/// Picks a uniformly random cell that is neither on the snake nor equal
/// to `forbidden`.
///
/// Uses rejection sampling. The free cells are counted first so a board
/// with no room left fails with [`SpawnError::GridFull`] instead of
/// drawing forever.
pub fn spawn_free<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    occupied: &Snake,
    forbidden: Option<Position>,
) -> Result<Position, SpawnError> {
    let is_free = |position: Position| !occupied.occupies(position) && Some(position) != forbidden;

    let has_free_cell = (0..bounds.height)
        .flat_map(|row| (0..bounds.width).map(move |col| Position::new(row, col)))
        .any(|position| is_free(position));

    if !has_free_cell {
        return Err(SpawnError::GridFull {
            width: bounds.width,
            height: bounds.height,
        });
    }

    loop {
        let candidate = Position {
            row: rng.gen_range(0..bounds.height),
            col: rng.gen_range(0..bounds.width),
        };
        if is_free(candidate) {
            return Ok(candidate);
        }
    }
}
