//! Bounded rectangular storage for cells.
//!
//! The grid is a dense, row-major vector with a bijective mapping between
//! `(x, y)` coordinates and linear offsets. There is no wraparound: positions
//! past an edge simply have no index, so corner cells end up with 3 neighbors
//! and non-corner edge cells with 5.

use crate::cell::{Cell, CellState};

/// Smallest supported grid dimension.
pub const MIN_GRID_DIM: usize = 1;
/// Largest supported grid dimension.
pub const MAX_GRID_DIM: usize = 20;

/// A fixed-size rectangle of cells.
///
/// Dimensions are set at construction and never change; resizing is done by
/// building a fresh grid. Every slot holds a cell from the moment the grid
/// exists, so lookups within bounds always succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of `width * height` cells, all `Empty`.
    ///
    /// Callers are responsible for clamping both dimensions into
    /// [`MIN_GRID_DIM`]..=[`MAX_GRID_DIM`] beforehand; the host does this
    /// with user-supplied sizes.
    ///
    /// # Arguments
    ///
    /// * `width` - Number of columns
    /// * `height` - Number of rows
    pub fn new(width: usize, height: usize) -> Grid {
        debug_assert!((MIN_GRID_DIM..=MAX_GRID_DIM).contains(&width));
        debug_assert!((MIN_GRID_DIM..=MAX_GRID_DIM).contains(&height));

        let mut cells = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                cells.push(Cell {
                    x,
                    y,
                    state: CellState::Empty,
                });
            }
        }

        Grid {
            width,
            height,
            cells,
        }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the linear offset of `(x, y)`, or `None` when the coordinates
    /// fall outside the grid.
    ///
    /// `None` is the normal out-of-bounds signal consumed during neighbor
    /// lookup. Edges are not connected toroidally, so there is nothing to
    /// wrap to and nothing to report as an error.
    pub fn index_of(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Returns the cell at `(x, y)`, if the coordinates are in bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<&Cell> {
        self.index_of(x, y).map(|index| &self.cells[index])
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Overwrites the state of the cell at `(x, y)`.
    ///
    /// Out-of-bounds coordinates are ignored, matching the rest of the
    /// grid's total, non-failing surface.
    pub fn set_state(&mut self, x: usize, y: usize, state: CellState) {
        if let Some(index) = self.index_of(x, y) {
            self.cells[index].state = state;
        }
    }

    /// Returns the up-to-8 cells surrounding `cell` at Chebyshev distance 1.
    ///
    /// Positions beyond the grid edge are skipped rather than wrapped:
    /// interior cells have 8 neighbors, non-corner edge cells 5, corners 3.
    ///
    /// # Arguments
    ///
    /// * `cell` - The cell whose neighborhood is being read
    pub fn neighbors(&self, cell: &Cell) -> Vec<&Cell> {
        let mut neighbors = Vec::with_capacity(8);

        for dy in -1i32..=1 {
            for dx in -1i32..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }

                let nx = cell.x as i32 + dx;
                let ny = cell.y as i32 + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }

                if let Some(index) = self.index_of(nx as usize, ny as usize) {
                    neighbors.push(&self.cells[index]);
                }
            }
        }

        neighbors
    }

    /// Counts the cells currently in `state`.
    pub fn count_state(&self, state: CellState) -> u64 {
        self.cells.iter().filter(|cell| cell.state == state).count() as u64
    }
}
