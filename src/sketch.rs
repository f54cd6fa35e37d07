use tracing::trace;

use crate::CellCoord;
use crate::cell::CellState;
use crate::pattern::Pattern;
use crate::universe::Universe;

/// Integer line rasterization between two cells, endpoints included.
///
/// Used to backfill the cells a fast drag skipped between two motion
/// samples, so strokes stay unbroken.
///
/// See: https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm
pub struct Bresenham {
    x: CellCoord,
    y: CellCoord,
    x1: CellCoord,
    y1: CellCoord,
    dx: CellCoord,
    dy: CellCoord,
    sx: CellCoord,
    sy: CellCoord,
    err: CellCoord,
    done: bool,
}

impl Bresenham {
    pub fn new(x0: CellCoord, y0: CellCoord, x1: CellCoord, y1: CellCoord) -> Self {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();

        Self {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for Bresenham {
    type Item = (CellCoord, CellCoord);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let out = (self.x, self.y);

        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
        } else {
            let e2 = 2 * self.err;

            if e2 >= self.dy {
                self.err += self.dy;
                self.x += self.sx;
            }

            if e2 <= self.dx {
                self.err += self.dx;
                self.y += self.sy;
            }
        }

        Some(out)
    }
}

/// Set the single cell under the cursor alive. Out-of-bounds is a no-op.
pub fn paint(universe: &mut Universe, x: CellCoord, y: CellCoord) -> bool {
    universe.set_state(x, y, CellState::Alive)
}

/// Kill the single cell under the cursor. Out-of-bounds is a no-op.
pub fn erase(universe: &mut Universe, x: CellCoord, y: CellCoord) -> bool {
    universe.set_state(x, y, CellState::Dead)
}

/// Mark every cell on the straight path between two drag samples alive.
///
/// Returns the number of cells written (path cells already inside the
/// universe; anything the line crosses outside is skipped).
pub fn draw_line(
    universe: &mut Universe,
    from: (CellCoord, CellCoord),
    to: (CellCoord, CellCoord),
) -> u32 {
    let mut marked = 0;

    for (x, y) in Bresenham::new(from.0, from.1, to.0, to.1) {
        if universe.set_state(x, y, CellState::Alive) {
            marked += 1;
        }
    }

    trace!(?from, ?to, marked, "drag stroke");

    marked
}

/// Stamp a pattern's live cells into the universe at an anchor cell.
///
/// Offsets falling outside the universe are skipped per cell, never an
/// error; the in-bounds subset is written. Returns how many cells were
/// set.
pub fn stamp(universe: &mut Universe, pattern: &Pattern, anchor: (CellCoord, CellCoord)) -> u32 {
    let mut stamped = 0;

    for (px, py) in pattern.live_cells() {
        if universe.set_state(anchor.0 + px, anchor.1 + py, CellState::Alive) {
            stamped += 1;
        }
    }

    trace!(
        pattern = pattern.name(),
        ?anchor,
        stamped,
        "stamped pattern"
    );

    stamped
}
