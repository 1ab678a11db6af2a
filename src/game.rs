use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::controls::Controls;
use crate::food::Food;
use crate::grid::{Cell, GridSpace};
use crate::input::Direction;
use crate::snake::{MoveOutcome, Snake};

/// What a single tick did to the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The host is paused; nothing changed.
    Paused,
    Moved,
    /// The head reached the food; the snake will grow by one.
    Ate,
    /// The head hit the body; the snake restarted from the center.
    Reset { length: usize },
}

/// Read-only view of the board handed to the renderer after each tick.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid: GridSpace,
    pub snake: &'a Snake,
    pub food: Food,
}

impl Snapshot<'_> {
    /// Head cell of the snake.
    #[must_use]
    pub fn head(&self) -> Cell {
        self.snake.head()
    }

    /// Cell to erase this frame, if the tail moved off it.
    #[must_use]
    pub fn trimmed(&self) -> Option<Cell> {
        self.snake.trimmed()
    }
}

/// Complete mutable simulation state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub tick_count: u64,
    pub resets: u64,
    grid: GridSpace,
    rng: StdRng,
}

impl GameState {
    /// Creates a state seeded from system entropy.
    #[must_use]
    pub fn new(grid: GridSpace) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(grid: GridSpace, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSpace, mut rng: StdRng) -> Self {
        let snake = Snake::new(grid.center());
        let food = Food::spawn(&mut rng, grid, &occupied_cells(&snake));

        Self {
            snake,
            food,
            tick_count: 0,
            resets: 0,
            grid,
            rng,
        }
    }

    /// Grid the session runs on.
    #[must_use]
    pub fn grid(&self) -> GridSpace {
        self.grid
    }

    /// Feeds one directional request through reversal arbitration into the
    /// pending slot. Later requests in the same tick replace earlier ones.
    pub fn request_direction(&mut self, direction: Direction) {
        self.snake.request_direction(direction);
    }

    /// Advances the simulation by one tick unless the host is paused.
    ///
    /// Order: commit pending heading, move (which may reset on
    /// self-collision), then resolve the food.
    pub fn tick(&mut self, controls: &Controls) -> TickOutcome {
        if controls.is_paused() {
            return TickOutcome::Paused;
        }

        self.tick_count += 1;
        self.snake.update_direction();

        if let MoveOutcome::Collided { length } = self.snake.move_forward(self.grid) {
            self.resets += 1;
            log::info!("self-collision at length {length} on tick {}, resetting", self.tick_count);

            // The re-centered head may sit on the food.
            if self.snake.occupies(self.food.position()) {
                self.respawn_food();
            }
            return TickOutcome::Reset { length };
        }

        if self.snake.head() == self.food.position() {
            self.snake.grow();
            self.respawn_food();
            return TickOutcome::Ate;
        }

        TickOutcome::Moved
    }

    /// Borrows the current board for drawing.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: self.grid,
            snake: &self.snake,
            food: self.food,
        }
    }

    fn respawn_food(&mut self) {
        let excluded = occupied_cells(&self.snake);
        // On a saturated board the food stays put; `randomize` logs the warning.
        let _ = self.food.randomize(&mut self.rng, self.grid, &excluded);
    }
}

fn occupied_cells(snake: &Snake) -> HashSet<Cell> {
    snake.segments().copied().collect()
}
