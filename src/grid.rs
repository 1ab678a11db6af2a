use rand::Rng;
use serde::Deserialize;

use crate::input::Direction;

/// Cell-aligned position in pixel coordinates.
///
/// Both coordinates are always integer multiples of the grid's cell size.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    /// Creates a cell at pixel coordinates `x`, `y`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Fixed-size toroidal grid of square cells.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default)]
pub struct GridSpace {
    pub width_cells: u16,
    pub height_cells: u16,
    pub cell_size: u16,
}

impl GridSpace {
    /// Creates a grid of `width_cells` by `height_cells` square cells.
    #[must_use]
    pub const fn new(width_cells: u16, height_cells: u16, cell_size: u16) -> Self {
        Self {
            width_cells,
            height_cells,
            cell_size,
        }
    }

    /// Horizontal extent in pixels.
    #[must_use]
    pub fn pixel_width(self) -> i32 {
        i32::from(self.width_cells) * i32::from(self.cell_size)
    }

    /// Vertical extent in pixels.
    #[must_use]
    pub fn pixel_height(self) -> i32 {
        i32::from(self.height_cells) * i32::from(self.cell_size)
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width_cells) * usize::from(self.height_cells)
    }

    /// Maps any cell-aligned offset position back into the grid.
    #[must_use]
    pub fn wrap(self, x: i32, y: i32) -> Cell {
        Cell {
            x: x.rem_euclid(self.pixel_width()),
            y: y.rem_euclid(self.pixel_height()),
        }
    }

    /// Returns the cell one step from `cell` along `direction`, wrapped.
    #[must_use]
    pub fn step(self, cell: Cell, direction: Direction) -> Cell {
        let (dx, dy) = direction.vector();
        let size = i32::from(self.cell_size);
        self.wrap(cell.x + dx * size, cell.y + dy * size)
    }

    /// Cell-aligned center of the grid, rounded down to whole cells.
    #[must_use]
    pub fn center(self) -> Cell {
        let size = i32::from(self.cell_size);
        Cell {
            x: i32::from(self.width_cells / 2) * size,
            y: i32::from(self.height_cells / 2) * size,
        }
    }

    /// Returns true when `cell` is a valid cell-aligned position inside the grid.
    #[must_use]
    pub fn contains(self, cell: Cell) -> bool {
        let size = i32::from(self.cell_size);
        (0..self.pixel_width()).contains(&cell.x)
            && (0..self.pixel_height()).contains(&cell.y)
            && cell.x % size == 0
            && cell.y % size == 0
    }

    /// Uniformly random valid cell.
    #[must_use]
    pub fn random_cell<R: Rng + ?Sized>(self, rng: &mut R) -> Cell {
        let size = i32::from(self.cell_size);
        Cell {
            x: i32::from(rng.gen_range(0..self.width_cells)) * size,
            y: i32::from(rng.gen_range(0..self.height_cells)) * size,
        }
    }

    /// Iterates every cell row by row.
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        let size = i32::from(self.cell_size);
        (0..i32::from(self.height_cells)).flat_map(move |row| {
            (0..i32::from(self.width_cells)).map(move |col| Cell {
                x: col * size,
                y: row * size,
            })
        })
    }

    /// Column and row index of `cell`.
    #[must_use]
    pub fn index_of(self, cell: Cell) -> (i32, i32) {
        let size = i32::from(self.cell_size);
        (cell.x / size, cell.y / size)
    }
}
