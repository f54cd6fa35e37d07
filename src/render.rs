use crate::CellCoord;
use crate::camera::Camera;
use crate::universe::Universe;

pub const ALIVE_GLYPH: char = 'x';
pub const DEAD_GLYPH: char = '.';

/// Render the camera's visible window as text, one glyph per screen
/// cell: each universe cell covers `cell_w` glyphs across and `cell_h`
/// lines down, so the text frame reflects the current zoom.
///
/// Drawing is restricted to the visible rect; the caller decides where
/// the frame goes (terminal, snapshot, log).
pub fn render_text(universe: &Universe, camera: &Camera) -> String {
    let rect = camera.visible_rect();
    let (cell_w, cell_h) = camera.cell_size();

    let width = (rect.w * cell_w) as usize;
    let height = (rect.h * cell_h) as usize;

    let mut out = String::with_capacity((width + 1) * height);

    for y in rect.y..rect.y + rect.h as CellCoord {
        for _ in 0..cell_h {
            for x in rect.x..rect.x + rect.w as CellCoord {
                let glyph = if universe.state_at(x, y).is_alive() {
                    ALIVE_GLYPH
                } else {
                    DEAD_GLYPH
                };

                for _ in 0..cell_w {
                    out.push(glyph);
                }
            }

            out.push('\n');
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellState;
    use crate::engine::Engine;

    #[test]
    fn renders_a_blinker_tick() {
        let mut u = Universe::new(5, 5, 1, 1).unwrap();
        let cam = Camera::new(5, 5, 1, 1, 5, 5).unwrap();

        for y in 1..4 {
            u.set_state(2, y, CellState::Alive);
        }

        insta::assert_snapshot!(render_text(&u, &cam), @r"
        .....
        ..x..
        ..x..
        ..x..
        .....
        ");

        let mut engine = Engine::default();
        engine.request_step();
        engine.update(&mut u);

        insta::assert_snapshot!(render_text(&u, &cam), @r"
        .....
        .....
        .xxx.
        .....
        .....
        ");
    }

    #[test]
    fn zoom_scales_the_glyph_footprint() {
        let mut u = Universe::new(3, 3, 2, 2).unwrap();
        let cam = Camera::new(3, 3, 2, 2, 6, 6).unwrap();

        u.set_state(1, 1, CellState::Alive);

        insta::assert_snapshot!(render_text(&u, &cam), @r"
        ......
        ......
        ..xx..
        ..xx..
        ......
        ......
        ");
    }

    #[test]
    fn rendering_respects_the_pan_offset() {
        let mut u = Universe::new(10, 10, 1, 1).unwrap();
        let mut cam = Camera::new(10, 10, 1, 1, 3, 3).unwrap();

        u.set_state(5, 5, CellState::Alive);
        cam.pan(4, 4);

        insta::assert_snapshot!(render_text(&u, &cam), @r"
        ...
        .x.
        ...
        ");
    }
}
