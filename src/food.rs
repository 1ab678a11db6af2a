use std::collections::HashSet;

use rand::Rng;

use crate::grid::{Cell, GridSpace};

/// Random samples tried before falling back to a scan of free cells.
pub const RANDOM_PLACEMENT_ATTEMPTS: usize = 64;

/// The single apple on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    position: Cell,
}

impl Food {
    /// Creates food at a fixed `position`.
    #[must_use]
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Spawns food on a random cell outside `excluded`.
    ///
    /// On a saturated board the food lands on the grid center.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, grid: GridSpace, excluded: &HashSet<Cell>) -> Self {
        let mut food = Self::new(grid.center());
        let _ = food.randomize(rng, grid, excluded);
        food
    }

    /// Cell the food currently occupies.
    #[must_use]
    pub fn position(self) -> Cell {
        self.position
    }

    /// Moves the food to a random cell outside `excluded`.
    ///
    /// Returns the new position, or `None` when every cell is excluded, in
    /// which case the food stays put.
    pub fn randomize<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        grid: GridSpace,
        excluded: &HashSet<Cell>,
    ) -> Option<Cell> {
        let position = place(rng, grid, excluded)?;
        self.position = position;
        Some(position)
    }
}

fn place<R: Rng + ?Sized>(rng: &mut R, grid: GridSpace, excluded: &HashSet<Cell>) -> Option<Cell> {
    for _ in 0..RANDOM_PLACEMENT_ATTEMPTS {
        let candidate = grid.random_cell(rng);
        if !excluded.contains(&candidate) {
            return Some(candidate);
        }
    }

    log::debug!(
        "random food placement failed {RANDOM_PLACEMENT_ATTEMPTS} times, scanning free cells"
    );

    let candidates: Vec<Cell> = grid.cells().filter(|cell| !excluded.contains(cell)).collect();
    if candidates.is_empty() {
        log::warn!(
            "no free cell for food on a {}x{} grid",
            grid.width_cells,
            grid.height_cells
        );
        return None;
    }

    let index = rng.gen_range(0..candidates.len());
    Some(candidates[index])
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::Food;
    use crate::grid::{Cell, GridSpace};

    #[test]
    fn food_spawn_never_overlaps_excluded_cells() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = GridSpace::new(8, 6, 10);
        let excluded: HashSet<Cell> = [Cell::new(0, 0), Cell::new(10, 0), Cell::new(20, 0)]
            .into_iter()
            .collect();

        for _ in 0..100 {
            let food = Food::spawn(&mut rng, grid, &excluded);
            assert!(!excluded.contains(&food.position()));
            assert!(grid.contains(food.position()));
        }
    }

    #[test]
    fn randomize_finds_last_free_cell() {
        let mut rng = StdRng::seed_from_u64(3);
        let grid = GridSpace::new(10, 10, 20);
        let free = Cell::new(180, 60);
        let excluded: HashSet<Cell> = grid.cells().filter(|cell| *cell != free).collect();
        let mut food = Food::new(Cell::new(0, 0));

        assert_eq!(food.randomize(&mut rng, grid, &excluded), Some(free));
        assert_eq!(food.position(), free);
    }

    #[test]
    fn randomize_on_full_board_keeps_position() {
        let mut rng = StdRng::seed_from_u64(5);
        let grid = GridSpace::new(3, 2, 20);
        let excluded: HashSet<Cell> = grid.cells().collect();
        let mut food = Food::new(Cell::new(20, 20));

        assert_eq!(food.randomize(&mut rng, grid, &excluded), None);
        assert_eq!(food.position(), Cell::new(20, 20));
    }

    proptest! {
        #[test]
        fn prop_randomize_avoids_excluded(
            seed in any::<u64>(),
            mask in prop::collection::vec(any::<bool>(), 24),
        ) {
            let grid = GridSpace::new(6, 4, 20);
            let excluded: HashSet<Cell> = grid
                .cells()
                .zip(mask)
                .filter_map(|(cell, taken)| taken.then_some(cell))
                .collect();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut food = Food::new(Cell::new(0, 0));

            match food.randomize(&mut rng, grid, &excluded) {
                Some(position) => {
                    prop_assert!(!excluded.contains(&position));
                    prop_assert_eq!(position, food.position());
                }
                None => prop_assert_eq!(excluded.len(), grid.total_cells()),
            }
        }
    }
}
