use thiserror::Error;

use crate::CellCoord;
use crate::cell::CellState;

/// The closed set of pattern categories shipped in the catalog.
///
/// See: https://conwaylife.com/wiki/Category:Patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternKind {
    FlipFlop,
    Methuselah,
    Oscillator,
    Spaceship,
    StillLife,
}

impl PatternKind {
    /// Map a catalog subdirectory name to its kind.
    pub fn from_dir(name: &str) -> Option<Self> {
        match name {
            "flipflops" => Some(Self::FlipFlop),
            "methuselah" => Some(Self::Methuselah),
            "oscillators" => Some(Self::Oscillator),
            "spaceships" => Some(Self::Spaceship),
            "still-lifes" => Some(Self::StillLife),
            _ => None,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PatternError {
    /// A pattern with no rows (or only blank rows). Catalogs skip these
    /// rather than fail.
    #[error("pattern \"{0}\" has no cells")]
    Empty(String),
}

/// A stampable pattern, immutable after parse.
///
/// The cell array is rectangular: ragged input rows are padded with dead
/// cells up to the longest row. The pattern carries its own cell pixel
/// size so a preview can be rescaled to the universe's current zoom
/// before stamping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: String,
    kind: PatternKind,
    cols: u32,
    rows: u32,
    cells: Vec<CellState>,
    cell_w: u32,
    cell_h: u32,
}

impl Pattern {
    /// Parse the plaintext cell format: one row per line, `'0'` for a
    /// dead cell, any other glyph for a live one. Trailing whitespace
    /// per line is ignored, as is a final newline.
    pub fn from_text(name: &str, kind: PatternKind, text: &str) -> Result<Self, PatternError> {
        let mut lines: Vec<&str> = text.lines().map(|l| l.trim_end()).collect();

        // Trailing blank lines are not extra rows.
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }

        let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        if lines.is_empty() || cols == 0 {
            return Err(PatternError::Empty(name.to_string()));
        }

        let rows = lines.len();
        let mut cells = vec![CellState::Dead; cols * rows];

        for (y, line) in lines.iter().enumerate() {
            for (x, c) in line.chars().enumerate() {
                if c != '0' {
                    cells[y * cols + x] = CellState::Alive;
                }
            }
        }

        Ok(Self {
            name: name.to_string(),
            kind,
            cols: cols as u32,
            rows: rows as u32,
            cells,
            cell_w: 10,
            cell_h: 10,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn kind(&self) -> PatternKind {
        self.kind
    }

    pub const fn cols(&self) -> u32 {
        self.cols
    }

    pub const fn rows(&self) -> u32 {
        self.rows
    }

    pub const fn cell_size(&self) -> (u32, u32) {
        (self.cell_w, self.cell_h)
    }

    /// Rescale the pattern's cell pixel footprint (to match the
    /// universe's zoom).
    pub fn set_cell_size(&mut self, width: u32, height: u32) {
        self.cell_w = width;
        self.cell_h = height;
    }

    /// The state at pattern-local `(x, y)`; dead outside the rectangle.
    pub fn state_at(&self, x: CellCoord, y: CellCoord) -> CellState {
        if x < 0 || y < 0 || x >= self.cols as CellCoord || y >= self.rows as CellCoord {
            return CellState::Dead;
        }

        self.cells[y as usize * self.cols as usize + x as usize]
    }

    /// Pattern-local coordinates of every live cell, row-major.
    pub fn live_cells(&self) -> impl Iterator<Item = (CellCoord, CellCoord)> + '_ {
        let cols = self.cols as usize;

        self.cells
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_alive())
            .map(move |(i, _)| ((i % cols) as CellCoord, (i / cols) as CellCoord))
    }
}
