use thiserror::Error;

use crate::CellCoord;
use crate::ScreenPx;

/// The most zoomed out a cell can get, in pixels.
pub const CELL_PX_MIN: u32 = 1;

/// The most zoomed in a cell can get, in pixels.
pub const CELL_PX_MAX: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDir {
    In,
    Out,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CameraError {
    #[error("invalid camera dimension {name} = {value}")]
    InvalidDimension { name: &'static str, value: i64 },
}

/// The visible window of the universe, in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRect {
    pub x: CellCoord,
    pub y: CellCoord,
    pub w: u32,
    pub h: u32,
}

/// The pannable, zoomable window through which the universe is observed.
///
/// Two regimes per axis, both behind the same mapping pair:
///
/// * universe larger than the screen: the pan offset (in cells) is
///   clamped to `[0, cols - visible_cols]` so the window never shows
///   out-of-universe space;
/// * universe fits on the screen: the pan is pinned at 0 and the universe
///   is centered, with a pixel margin computed from the difference
///   between universe and screen pixel sizes.
pub struct Camera {
    /// Universe extent, in cells
    cols: u32,
    rows: u32,

    /// Pixels per cell. This is the zoom level.
    cell_w: u32,
    cell_h: u32,

    /// Screen size in pixels
    screen_w: u32,
    screen_h: u32,

    /// Pan offset from the universe origin, in cells
    x: CellCoord,
    y: CellCoord,
}

impl Camera {
    pub fn new(
        cols: i64,
        rows: i64,
        cell_w: i64,
        cell_h: i64,
        screen_w: i64,
        screen_h: i64,
    ) -> Result<Self, CameraError> {
        let check = |name, value: i64| {
            u32::try_from(value)
                .ok()
                .filter(|&v| v > 0 && v <= i32::MAX as u32)
                .ok_or(CameraError::InvalidDimension { name, value })
        };

        let cols = check("cols", cols)?;
        let rows = check("rows", rows)?;
        let cell_w = check("cell_w", cell_w)?;
        let cell_h = check("cell_h", cell_h)?;
        let screen_w = check("screen_w", screen_w)?;
        let screen_h = check("screen_h", screen_h)?;

        Ok(Self {
            cols,
            rows,
            cell_w: cell_w.clamp(CELL_PX_MIN, CELL_PX_MAX),
            cell_h: cell_h.clamp(CELL_PX_MIN, CELL_PX_MAX),
            screen_w,
            screen_h,
            x: 0,
            y: 0,
        })
    }

    pub const fn cell_size(&self) -> (u32, u32) {
        (self.cell_w, self.cell_h)
    }

    pub const fn offset(&self) -> (CellCoord, CellCoord) {
        (self.x, self.y)
    }

    /// How many columns of the universe fit on screen.
    pub const fn visible_cols(&self) -> u32 {
        let fit = self.screen_w / self.cell_w;

        if fit < self.cols { fit } else { self.cols }
    }

    pub const fn visible_rows(&self) -> u32 {
        let fit = self.screen_h / self.cell_h;

        if fit < self.rows { fit } else { self.rows }
    }

    /// Pixel margin left of the universe when it fits on screen, 0 when
    /// it overflows.
    const fn margin_x(&self) -> i64 {
        let universe_w = self.cols as i64 * self.cell_w as i64;
        let overflow = self.screen_w as i64 - universe_w;

        if overflow > 0 { overflow / 2 } else { 0 }
    }

    const fn margin_y(&self) -> i64 {
        let universe_h = self.rows as i64 * self.cell_h as i64;
        let overflow = self.screen_h as i64 - universe_h;

        if overflow > 0 { overflow / 2 } else { 0 }
    }

    /// The universe cell under a screen pixel, or `None` when the pixel
    /// lies outside the universe (e.g. in a centering margin).
    pub fn screen_to_universe(&self, px: ScreenPx, py: ScreenPx) -> Option<(CellCoord, CellCoord)> {
        let lx = px as i64 - self.margin_x();
        let ly = py as i64 - self.margin_y();

        let cx = lx.div_euclid(self.cell_w as i64) as CellCoord + self.x;
        let cy = ly.div_euclid(self.cell_h as i64) as CellCoord + self.y;

        if cx < 0 || cy < 0 || cx >= self.cols as CellCoord || cy >= self.rows as CellCoord {
            return None;
        }

        Some((cx, cy))
    }

    /// The screen pixel of a cell's top-left corner. Exact inverse of
    /// [`Camera::screen_to_universe`] at cell-origin pixels.
    pub fn universe_to_screen(&self, cx: CellCoord, cy: CellCoord) -> (ScreenPx, ScreenPx) {
        let px = (cx - self.x) as i64 * self.cell_w as i64 + self.margin_x();
        let py = (cy - self.y) as i64 * self.cell_h as i64 + self.margin_y();

        (px as ScreenPx, py as ScreenPx)
    }

    /// Shift the pan offset by whole cells, clamped to the universe.
    pub fn pan(&mut self, dx: CellCoord, dy: CellCoord) {
        self.x += dx;
        self.y += dy;
        self.clamp_pan();
    }

    /// Step the cell pixel size, clamped to `[CELL_PX_MIN, CELL_PX_MAX]`.
    ///
    /// Returns whether the size changed, so the caller can propagate the
    /// new footprint to the universe and any active pattern. Zoom never
    /// changes `cols`/`rows`, only the pixel footprint.
    pub fn zoom(&mut self, dir: ZoomDir) -> bool {
        let (w, h) = (self.cell_w, self.cell_h);

        let step = |v: u32| match dir {
            ZoomDir::In => (v + 1).min(CELL_PX_MAX),
            ZoomDir::Out => (v - 1).max(CELL_PX_MIN),
        };

        self.cell_w = step(w);
        self.cell_h = step(h);

        // A zoom change resizes the visible window.
        self.clamp_pan();

        (w, h) != (self.cell_w, self.cell_h)
    }

    pub fn set_screen_size(&mut self, width: i64, height: i64) -> Result<(), CameraError> {
        if width <= 0 {
            return Err(CameraError::InvalidDimension {
                name: "screen_w",
                value: width,
            });
        }

        if height <= 0 {
            return Err(CameraError::InvalidDimension {
                name: "screen_h",
                value: height,
            });
        }

        self.screen_w = width as u32;
        self.screen_h = height as u32;
        self.clamp_pan();

        Ok(())
    }

    /// The on-screen subset of the universe, in cell coordinates.
    /// Rendering restricts itself to this window.
    pub const fn visible_rect(&self) -> VisibleRect {
        VisibleRect {
            x: self.x,
            y: self.y,
            w: self.visible_cols(),
            h: self.visible_rows(),
        }
    }

    fn clamp_pan(&mut self) {
        let max_x = (self.cols - self.visible_cols()) as CellCoord;
        let max_y = (self.rows - self.visible_rows()) as CellCoord;

        self.x = self.x.clamp(0, max_x);
        self.y = self.y.clamp(0, max_y);
    }
}
