use thiserror::Error;

use crate::CellCoord;
use crate::cell::Cell;
use crate::cell::CellState;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum UniverseError {
    #[error("invalid universe dimension {name} = {value}")]
    InvalidDimension { name: &'static str, value: i64 },

    #[error("coordinate ({x}, {y}) outside universe {cols}x{rows}")]
    OutOfBounds {
        x: CellCoord,
        y: CellCoord,
        cols: u32,
        rows: u32,
    },
}

/// The bounded universe of cells.
///
/// Cells live in a flat row-major buffer indexed by `y * cols + x`. Both
/// `x < cols` and `y < rows` are checked before any indexing; a coordinate
/// that would pass a linear bound check but sits outside its row is
/// rejected rather than wrapped into a neighboring row.
///
/// The border is dead: neighbor lookups past the edge count as 0, the
/// universe is not toroidal.
pub struct Universe {
    cols: u32,
    rows: u32,
    cells: Vec<Cell>,
}

impl Universe {
    /// Create a universe of dead cells.
    ///
    /// `cell_w`/`cell_h` are the initial pixel footprint of every cell;
    /// they only matter for rendering. Dimensions of zero (or worse)
    /// refuse to start.
    pub fn new(cols: i64, rows: i64, cell_w: i64, cell_h: i64) -> Result<Self, UniverseError> {
        // Each value must also stay addressable as a CellCoord.
        let dim = |name, value: i64| {
            u32::try_from(value)
                .ok()
                .filter(|&v| v > 0 && v <= i32::MAX as u32)
                .ok_or(UniverseError::InvalidDimension { name, value })
        };

        let cols = dim("cols", cols)?;
        let rows = dim("rows", rows)?;
        let cell_w = dim("cell_w", cell_w)?;
        let cell_h = dim("cell_h", cell_h)?;

        let cells = vec![Cell::dead(cell_w, cell_h); cols as usize * rows as usize];

        Ok(Self { cols, rows, cells })
    }

    pub const fn cols(&self) -> u32 {
        self.cols
    }

    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Linear index for an in-bounds coordinate.
    fn index(&self, x: CellCoord, y: CellCoord) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.cols as CellCoord || y >= self.rows as CellCoord {
            return None;
        }

        Some(y as usize * self.cols as usize + x as usize)
    }

    pub fn get(&self, x: CellCoord, y: CellCoord) -> Option<&Cell> {
        let i = self.index(x, y)?;

        Some(&self.cells[i])
    }

    pub fn get_mut(&mut self, x: CellCoord, y: CellCoord) -> Option<&mut Cell> {
        let i = self.index(x, y)?;

        Some(&mut self.cells[i])
    }

    /// Like [`Universe::get`], but reports the violation to the caller.
    pub fn cell_at(&self, x: CellCoord, y: CellCoord) -> Result<&Cell, UniverseError> {
        self.get(x, y).ok_or(UniverseError::OutOfBounds {
            x,
            y,
            cols: self.cols,
            rows: self.rows,
        })
    }

    /// The state at `(x, y)`, where anything past the border is dead.
    pub fn state_at(&self, x: CellCoord, y: CellCoord) -> CellState {
        self.get(x, y).map(|c| c.state).unwrap_or_default()
    }

    /// Number of alive Moore neighbors of `(x, y)`, in `[0, 8]`.
    ///
    /// Pure read. Out-of-bounds neighbor positions contribute 0.
    ///
    /// See: https://conwaylife.com/wiki/Moore_neighbourhood
    pub fn neighbor_count(&self, x: CellCoord, y: CellCoord) -> u8 {
        let mut alive = 0;

        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }

                alive += self.state_at(x + dx, y + dy).count();
            }
        }

        alive
    }

    /// Set the current state at `(x, y)`. Out-of-bounds is skipped, and
    /// the return value says whether anything was written.
    pub fn set_state(&mut self, x: CellCoord, y: CellCoord, state: CellState) -> bool {
        let Some(cell) = self.get_mut(x, y) else {
            return false;
        };

        cell.state = state;

        true
    }

    /// Buffer the next-generation state at `(x, y)`.
    pub fn set_next(&mut self, x: CellCoord, y: CellCoord, state: CellState) -> bool {
        let Some(cell) = self.get_mut(x, y) else {
            return false;
        };

        cell.next = Some(state);

        true
    }

    /// Commit every buffered next state into the current state.
    pub fn commit(&mut self) {
        for cell in &mut self.cells {
            cell.commit();
        }
    }

    /// Overwrite every cell with a uniform state, dropping any buffered
    /// next states. Used by clear/new.
    pub fn reset(&mut self, fill: CellState) {
        for cell in &mut self.cells {
            cell.state = fill;
            cell.next = None;
        }
    }

    /// Propagate a new cell pixel footprint to every cell (zoom change).
    pub fn set_cell_size(&mut self, width: u32, height: u32) {
        for cell in &mut self.cells {
            cell.width = width;
            cell.height = height;
        }
    }

    pub fn alive_count(&self) -> u32 {
        self.cells
            .iter()
            .map(|c| c.state.count() as u32)
            .sum()
    }
}
