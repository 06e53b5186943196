use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{
    GridSize, DEFAULT_TICK_INTERVAL_MS, FOOD_REWARD, MIN_TICK_INTERVAL_MS, TICK_DECREMENT_MS,
};
use crate::controls::SharedControls;
use crate::food::{spawn_free, FoodKind};
use crate::grid::{next_position, Position};
use crate::input::Direction;
use crate::snake::Snake;

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameOverReason {
    SelfCollision,
    PoisonEaten,
}

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    Paused,
    GameOver(GameOverReason),
}

/// Result of one call to [`GameState::step`].
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// Paused; nothing moved.
    Paused,
    /// Normal move, length unchanged.
    Moved,
    /// Good food eaten, snake grew by one.
    Ate,
    GameOver(GameOverReason),
}

/// Complete mutable game state for one session.
#[derive(Debug)]
pub struct GameState {
    pub snake: Snake,
    pub food: Option<Position>,
    pub poison: Option<Position>,
    pub score: u32,
    pub tick_count: u64,
    tick_interval: Duration,
    game_over: Option<GameOverReason>,
    /// Items that could not be placed because the board was full.
    unplaced: Vec<FoodKind>,
    bounds: GridSize,
    controls: Arc<SharedControls>,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh session seeded from OS entropy.
    #[must_use]
    pub fn new(bounds: GridSize) -> Self {
        Self::with_rng(bounds, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(bounds: GridSize, seed: u64) -> Self {
        Self::with_rng(bounds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(bounds: GridSize, rng: StdRng) -> Self {
        let mut state = Self {
            snake: Snake::new(Position::new(0, 0)),
            food: None,
            poison: None,
            score: 0,
            tick_count: 0,
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
            game_over: None,
            unplaced: Vec::new(),
            bounds,
            controls: Arc::new(SharedControls::new(Direction::Right)),
            rng,
        };

        state.respawn(FoodKind::Good);
        state.respawn(FoodKind::Poison);
        state
    }

    /// Replaces the starting tick interval, clamped to the minimum.
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval.max(Duration::from_millis(MIN_TICK_INTERVAL_MS));
        self
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Reads the direction stored in the shared controls at the moment the
    /// step starts. After game over every call returns the same outcome
    /// without touching the board.
    pub fn step(&mut self) -> StepOutcome {
        if let Some(reason) = self.game_over {
            return StepOutcome::GameOver(reason);
        }

        if self.controls.is_paused() {
            return StepOutcome::Paused;
        }

        self.tick_count += 1;
        let direction = self.controls.direction();
        let next_head = next_position(self.snake.head(), direction, self.bounds);

        if self.snake.occupies(next_head) {
            return self.finish(GameOverReason::SelfCollision);
        }

        if Some(next_head) == self.poison {
            return self.finish(GameOverReason::PoisonEaten);
        }

        if Some(next_head) == self.food {
            self.snake.grow(next_head);
            self.respawn(FoodKind::Good);
            self.score += FOOD_REWARD;
            self.speed_up();
            debug!(
                "food eaten at {next_head:?}, length={}, score={}, interval={:?}",
                self.snake.len(),
                self.score,
                self.tick_interval
            );
            return StepOutcome::Ate;
        }

        self.snake.advance(next_head);
        self.retry_unplaced();
        StepOutcome::Moved
    }

    /// Requests a new heading; reversals of the current heading are ignored.
    pub fn request_direction(&self, direction: Direction) -> bool {
        self.controls.request_direction(direction)
    }

    /// Flips between running and paused. Has no effect after game over.
    pub fn toggle_pause(&self) {
        if self.game_over.is_none() {
            self.controls.toggle_pause();
        }
    }

    /// Returns a handle to the flags shared with the input listener.
    #[must_use]
    pub fn controls(&self) -> Arc<SharedControls> {
        Arc::clone(&self.controls)
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        match self.game_over {
            Some(reason) => GameStatus::GameOver(reason),
            None if self.controls.is_paused() => GameStatus::Paused,
            None => GameStatus::Running,
        }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.controls.direction()
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    /// Returns which item, if any, sits on `position`.
    #[must_use]
    pub fn item_at(&self, position: Position) -> Option<FoodKind> {
        if Some(position) == self.food {
            Some(FoodKind::Good)
        } else if Some(position) == self.poison {
            Some(FoodKind::Poison)
        } else {
            None
        }
    }

    fn finish(&mut self, reason: GameOverReason) -> StepOutcome {
        info!(
            "game over: {reason:?}, score={}, length={}, ticks={}",
            self.score,
            self.snake.len(),
            self.tick_count
        );
        self.game_over = Some(reason);
        StepOutcome::GameOver(reason)
    }

    fn speed_up(&mut self) {
        let floor = Duration::from_millis(MIN_TICK_INTERVAL_MS);
        self.tick_interval = self
            .tick_interval
            .saturating_sub(Duration::from_millis(TICK_DECREMENT_MS))
            .max(floor);
    }

    /// Places items that an earlier full board left unset, now that the
    /// tail may have freed a cell.
    fn retry_unplaced(&mut self) {
        for kind in self.unplaced.clone() {
            self.respawn(kind);
            if !self.unplaced.contains(&kind) {
                debug!("placed {kind:?} food after the board freed up");
            }
        }
    }

    fn respawn(&mut self, kind: FoodKind) {
        let forbidden = match kind {
            FoodKind::Good => self.poison,
            FoodKind::Poison => self.food,
        };

        let position = match spawn_free(&mut self.rng, self.bounds, &self.snake, forbidden) {
            Ok(position) => {
                self.unplaced.retain(|pending| *pending != kind);
                Some(position)
            }
            Err(error) => {
                if !self.unplaced.contains(&kind) {
                    warn!("leaving {kind:?} food unset: {error}");
                    self.unplaced.push(kind);
                }
                None
            }
        };

        match kind {
            FoodKind::Good => self.food = position,
            FoodKind::Poison => self.poison = position,
        }
    }
}
