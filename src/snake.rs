use std::collections::VecDeque;

use crate::grid::{Cell, GridSpace};
use crate::input::{Direction, arbitrate};

/// Heading every fresh or reset snake starts with.
pub const INITIAL_DIRECTION: Direction = Direction::Right;

/// Result of one movement step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveOutcome {
    Advanced,
    /// The new head hit the body and the snake was reset.
    Collided { length: usize },
}

/// Mutable snake state: occupied cells, heading and growth target.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
    pending_direction: Option<Direction>,
    target_length: usize,
    trimmed: Option<Cell>,
    origin: Cell,
}

impl Snake {
    /// Creates a one-cell snake at `origin` heading right.
    #[must_use]
    pub fn new(origin: Cell) -> Self {
        Self {
            body: VecDeque::from([origin]),
            direction: INITIAL_DIRECTION,
            pending_direction: None,
            target_length: 1,
            trimmed: None,
            origin,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    ///
    /// The growth target matches the segment count and resets return to
    /// `origin`.
    #[must_use]
    pub fn from_segments(segments: Vec<Cell>, direction: Direction, origin: Cell) -> Self {
        if segments.is_empty() {
            return Self::new(origin);
        }

        Self {
            target_length: segments.len(),
            body: VecDeque::from(segments),
            direction,
            pending_direction: None,
            trimmed: None,
            origin,
        }
    }

    /// Buffers a heading request for the next tick, replacing any earlier one.
    pub fn request_direction(&mut self, requested: Direction) {
        self.pending_direction = Some(arbitrate(self.direction, requested));
    }

    /// Commits the pending heading, if any.
    pub fn update_direction(&mut self) {
        if let Some(direction) = self.pending_direction.take() {
            self.direction = direction;
        }
    }

    /// Advances the head one cell, trimming the tail when over target length.
    ///
    /// Landing on any segment from index 2 onward counts as a self-collision
    /// and resets the snake instead of moving it.
    pub fn move_forward(&mut self, grid: GridSpace) -> MoveOutcome {
        let next_head = grid.step(self.head(), self.direction);

        if self.body.iter().skip(2).any(|segment| *segment == next_head) {
            let length = self.body.len();
            self.reset();
            return MoveOutcome::Collided { length };
        }

        self.body.push_front(next_head);
        self.trimmed = if self.body.len() > self.target_length {
            self.body.pop_back()
        } else {
            None
        };

        MoveOutcome::Advanced
    }

    /// Raises the growth target by one segment.
    pub fn grow(&mut self) {
        self.target_length += 1;
    }

    /// Restores the initial one-cell configuration at the origin.
    pub fn reset(&mut self) {
        self.body.clear();
        self.body.push_front(self.origin);
        self.direction = INITIAL_DIRECTION;
        self.pending_direction = None;
        self.target_length = 1;
        self.trimmed = None;
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Cell {
        // The body is never empty: construction and reset both seed one cell
        // and `move_forward` pushes before it pops.
        self.body.front().copied().unwrap_or(self.origin)
    }

    /// Returns true if any segment occupies `cell`.
    #[must_use]
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Length the body grows toward; raised by one per apple.
    #[must_use]
    pub fn target_length(&self) -> usize {
        self.target_length
    }

    /// Returns the committed movement direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Heading buffered for the next tick, if any.
    #[must_use]
    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    /// Tail cell vacated by the most recent move, if any.
    #[must_use]
    pub fn trimmed(&self) -> Option<Cell> {
        self.trimmed
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Cell> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::{MoveOutcome, Snake};
    use crate::grid::{Cell, GridSpace};
    use crate::input::Direction;

    const ARCADE: GridSpace = GridSpace::new(32, 24, 20);

    fn centered() -> Snake {
        Snake::new(ARCADE.center())
    }

    fn assert_initial(snake: &Snake) {
        assert_eq!(snake.segments().copied().collect::<Vec<_>>(), vec![Cell::new(320, 240)]);
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.target_length(), 1);
        assert_eq!(snake.pending_direction(), None);
        assert_eq!(snake.trimmed(), None);
    }

    #[test]
    fn snake_moves_one_cell_per_tick_and_reports_trimmed_tail() {
        let mut snake = centered();

        assert_eq!(snake.move_forward(ARCADE), MoveOutcome::Advanced);

        assert_eq!(snake.head(), Cell::new(340, 240));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.trimmed(), Some(Cell::new(320, 240)));
    }

    #[test]
    fn snake_growth_keeps_previous_tail() {
        let mut snake = centered();

        snake.grow();
        snake.move_forward(ARCADE);

        assert_eq!(snake.len(), 2);
        assert_eq!(snake.trimmed(), None);

        snake.move_forward(ARCADE);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.trimmed(), Some(Cell::new(320, 240)));
    }

    #[test]
    fn head_wraps_across_the_edge() {
        let mut snake = Snake::new(Cell::new(620, 0));
        snake.move_forward(ARCADE);
        assert_eq!(snake.head(), Cell::new(0, 0));

        snake.request_direction(Direction::Up);
        snake.update_direction();
        snake.move_forward(ARCADE);
        assert_eq!(snake.head(), Cell::new(0, 460));
    }

    #[test]
    fn reversal_request_is_rejected() {
        let mut snake = Snake::from_segments(
            vec![Cell::new(100, 100), Cell::new(80, 100), Cell::new(60, 100)],
            Direction::Right,
            ARCADE.center(),
        );

        snake.request_direction(Direction::Left);
        snake.update_direction();
        snake.move_forward(ARCADE);

        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.head(), Cell::new(120, 100));
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn pending_direction_is_last_write_wins() {
        let mut snake = centered();

        snake.request_direction(Direction::Up);
        snake.request_direction(Direction::Down);
        assert_eq!(snake.pending_direction(), Some(Direction::Down));

        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Down);
        assert_eq!(snake.pending_direction(), None);
    }

    #[test]
    fn rejected_request_overwrites_earlier_request() {
        let mut snake = centered();

        snake.request_direction(Direction::Up);
        snake.request_direction(Direction::Left);
        snake.update_direction();

        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn update_direction_without_pending_is_noop() {
        let mut snake = centered();
        snake.update_direction();
        assert_eq!(snake.direction(), Direction::Right);
    }

    #[test]
    fn landing_on_third_segment_resets() {
        // On a three-cell-wide ring, stepping left from x=0 wraps onto positions[2].
        let ring = GridSpace::new(3, 3, 20);
        let mut snake = Snake::from_segments(
            vec![Cell::new(0, 0), Cell::new(20, 0), Cell::new(40, 0)],
            Direction::Left,
            ARCADE.center(),
        );
        snake.request_direction(Direction::Up);

        let outcome = snake.move_forward(ring);

        assert_eq!(outcome, MoveOutcome::Collided { length: 3 });
        assert_initial(&snake);
    }

    #[test]
    fn landing_on_second_segment_is_not_a_collision() {
        let mut snake = Snake::from_segments(
            vec![Cell::new(100, 100), Cell::new(80, 100)],
            Direction::Left,
            ARCADE.center(),
        );

        assert_eq!(snake.move_forward(ARCADE), MoveOutcome::Advanced);
        assert_eq!(snake.head(), Cell::new(80, 100));
    }

    #[test]
    fn moving_into_current_tail_collides_when_long_enough() {
        // Square loop: the tail at index 3 is adjacent to the head.
        let mut snake = Snake::from_segments(
            vec![
                Cell::new(100, 100),
                Cell::new(100, 120),
                Cell::new(120, 120),
                Cell::new(120, 100),
            ],
            Direction::Right,
            ARCADE.center(),
        );

        assert!(matches!(
            snake.move_forward(ARCADE),
            MoveOutcome::Collided { .. }
        ));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut snake = Snake::from_segments(
            vec![Cell::new(0, 0), Cell::new(20, 0)],
            Direction::Left,
            ARCADE.center(),
        );
        snake.grow();
        snake.request_direction(Direction::Up);

        snake.reset();
        let once = snake.clone();
        snake.reset();

        assert_eq!(
            snake.segments().collect::<Vec<_>>(),
            once.segments().collect::<Vec<_>>()
        );
        assert_eq!(snake.direction(), once.direction());
        assert_eq!(snake.target_length(), once.target_length());
        assert_eq!(snake.pending_direction(), once.pending_direction());
        assert_eq!(snake.trimmed(), once.trimmed());
        assert_initial(&snake);
    }

    proptest! {
        #[test]
        fn prop_body_stays_contiguous_and_bounded(
            moves in prop::collection::vec(
                (prop::sample::select(Direction::ALL.to_vec()), any::<bool>()),
                1..200,
            ),
        ) {
            let mut snake = Snake::new(ARCADE.center());
            for (direction, grow) in moves {
                snake.request_direction(direction);
                snake.update_direction();
                if grow {
                    snake.grow();
                }
                snake.move_forward(ARCADE);

                prop_assert!(snake.len() <= snake.target_length());
                let cells: Vec<Cell> = snake.segments().copied().collect();
                for pair in cells.windows(2) {
                    let adjacent = Direction::ALL
                        .iter()
                        .any(|direction| ARCADE.step(pair[1], *direction) == pair[0]);
                    prop_assert!(adjacent);
                }
            }
        }
    }
}
