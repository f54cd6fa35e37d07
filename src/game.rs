use std::collections::VecDeque;

use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::CellCoord;
use crate::camera::Camera;
use crate::camera::CameraError;
use crate::camera::ZoomDir;
use crate::cell::CellState;
use crate::config::Config;
use crate::config::ConfigError;
use crate::engine::Engine;
use crate::events::CameraCommand;
use crate::events::Command;
use crate::events::EngineCommand;
use crate::events::InputEvent;
use crate::events::Key;
use crate::events::MouseButton;
use crate::pattern::Pattern;
use crate::sketch;
use crate::universe::Universe;
use crate::universe::UniverseError;

/// Cells moved per pan key press.
const PAN_STEP: CellCoord = 5;

#[derive(Error, Debug)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error(transparent)]
    Camera(#[from] CameraError),
}

/// The frame-driven controller.
///
/// Owns the universe, camera and engine, and serializes their mutation:
/// input events mutate cells (draw, stamp) and enqueue commands as they
/// arrive; [`Game::frame`] then drains the queue and runs the engine
/// update. The fixed phase order per frame is the only synchronization
/// this needs.
pub struct Game {
    universe: Universe,
    camera: Camera,
    engine: Engine,

    /// Pattern armed for stamping, rescaled to the current zoom
    pattern: Option<Pattern>,

    commands: VecDeque<Command>,

    /// Whether the draw button is held
    drawing: bool,

    /// Last cell touched by the current drag stroke
    last_marked: Option<(CellCoord, CellCoord)>,

    exit: bool,
}

impl Game {
    pub fn new(cfg: &Config) -> Result<Self, GameError> {
        cfg.validate()?;

        let universe = Universe::new(cfg.cols, cfg.rows, cfg.cell_w, cfg.cell_h)?;
        let camera = Camera::new(
            cfg.cols,
            cfg.rows,
            cfg.cell_w,
            cfg.cell_h,
            cfg.screen_w,
            cfg.screen_h,
        )?;

        Ok(Self {
            universe,
            camera,
            engine: Engine::default(),
            pattern: None,
            commands: VecDeque::new(),
            drawing: false,
            last_marked: None,
            exit: false,
        })
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn pattern(&self) -> Option<&Pattern> {
        self.pattern.as_ref()
    }

    pub const fn should_exit(&self) -> bool {
        self.exit
    }

    pub fn push(&mut self, command: Command) {
        self.commands.push_back(command);
    }

    /// Consume one input event. Draw-path mutations happen immediately
    /// (this is the input phase of the frame); everything else becomes a
    /// queued command.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            } => {
                self.drawing = true;

                // Drawing on a running universe stops it.
                if self.engine.is_running() {
                    self.push(Command::Engine(EngineCommand::Stop));
                }

                let Some((cx, cy)) = self.camera.screen_to_universe(x, y) else {
                    return;
                };

                match &self.pattern {
                    Some(pattern) => {
                        sketch::stamp(&mut self.universe, pattern, (cx, cy));
                    }
                    None => {
                        sketch::paint(&mut self.universe, cx, cy);
                    }
                }

                self.last_marked = Some((cx, cy));
            }

            InputEvent::MouseMove { x, y } => {
                if !self.drawing {
                    return;
                }

                let Some((cx, cy)) = self.camera.screen_to_universe(x, y) else {
                    return;
                };

                sketch::paint(&mut self.universe, cx, cy);

                // Backfill the cells the pointer skipped since the last
                // sample, so fast drags leave an unbroken stroke.
                if let Some((px, py)) = self.last_marked {
                    if (px, py) != (cx, cy) {
                        sketch::draw_line(&mut self.universe, (px, py), (cx, cy));
                    }
                }

                self.last_marked = Some((cx, cy));
            }

            InputEvent::MouseUp {
                button: MouseButton::Left,
                ..
            } => {
                self.drawing = false;
                self.last_marked = None;
            }

            InputEvent::MouseUp {
                x,
                y,
                button: MouseButton::Right,
            } => {
                if let Some((cx, cy)) = self.camera.screen_to_universe(x, y) {
                    sketch::erase(&mut self.universe, cx, cy);
                }
            }

            InputEvent::MouseUp {
                button: MouseButton::ScrollUp,
                ..
            } => self.push(Command::Camera(CameraCommand::Zoom(
                ZoomDir::In,
            ))),

            InputEvent::MouseUp {
                button: MouseButton::ScrollDown,
                ..
            } => self.push(Command::Camera(CameraCommand::Zoom(
                ZoomDir::Out,
            ))),

            InputEvent::MouseDown { .. } => {}

            InputEvent::Key(key) => self.handle_key(key),

            InputEvent::Resize { width, height } => {
                if let Err(err) = self.camera.set_screen_size(width as i64, height as i64) {
                    warn!(%err, "ignoring resize");
                }
            }

            InputEvent::Quit => self.exit = true,
        }
    }

    fn handle_key(&mut self, key: Key) {
        let command = match key {
            Key::Escape => Some(Command::DeselectPattern),

            Key::Char(c) => match c {
                'a' => Some(Command::Camera(CameraCommand::Pan {
                    dx: -PAN_STEP,
                    dy: 0,
                })),
                'd' => Some(Command::Camera(CameraCommand::Pan {
                    dx: PAN_STEP,
                    dy: 0,
                })),
                'w' => Some(Command::Camera(CameraCommand::Pan {
                    dx: 0,
                    dy: -PAN_STEP,
                })),
                's' => Some(Command::Camera(CameraCommand::Pan {
                    dx: 0,
                    dy: PAN_STEP,
                })),

                '=' | '+' => Some(Command::Camera(CameraCommand::Zoom(
                    ZoomDir::In,
                ))),
                '-' => Some(Command::Camera(CameraCommand::Zoom(
                    ZoomDir::Out,
                ))),

                ' ' => {
                    if self.engine.is_running() {
                        Some(Command::Engine(EngineCommand::Stop))
                    } else {
                        Some(Command::Engine(EngineCommand::Start))
                    }
                }
                'n' => Some(Command::Engine(EngineCommand::Step)),
                'c' => Some(Command::Engine(EngineCommand::Clear)),

                'q' => Some(Command::Exit),

                _ => None,
            },
        };

        if let Some(command) = command {
            self.push(command);
        }
    }

    /// Run one frame: drain the command queue in arrival order, then
    /// advance the engine.
    pub fn frame(&mut self) {
        while let Some(command) = self.commands.pop_front() {
            self.apply(command);
        }

        self.engine.update(&mut self.universe);
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Engine(EngineCommand::Start) => self.engine.start(),
            Command::Engine(EngineCommand::Stop) => self.engine.stop(),
            Command::Engine(EngineCommand::Step) => self.engine.request_step(),
            Command::Engine(EngineCommand::Clear) => self.clear(),

            Command::Camera(CameraCommand::Pan { dx, dy }) => self.camera.pan(dx, dy),
            Command::Camera(CameraCommand::Zoom(dir)) => self.zoom(dir),

            Command::SelectPattern(mut pattern) => {
                let (w, h) = self.camera.cell_size();
                pattern.set_cell_size(w, h);

                info!(pattern = pattern.name(), "pattern armed");
                self.pattern = Some(pattern);
            }

            Command::DeselectPattern => self.pattern = None,

            Command::Exit => self.exit = true,
        }
    }

    /// Reset the universe to all-dead and zero every counter.
    fn clear(&mut self) {
        self.universe.reset(CellState::Dead);
        self.engine.reset();
        self.engine.stop();

        info!("universe cleared");
    }

    /// A zoom change propagates the new cell footprint to every cell and
    /// to the armed pattern.
    fn zoom(&mut self, dir: ZoomDir) {
        if !self.camera.zoom(dir) {
            return;
        }

        let (w, h) = self.camera.cell_size();
        self.universe.set_cell_size(w, h);

        if let Some(pattern) = &mut self.pattern {
            pattern.set_cell_size(w, h);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternKind;

    fn game() -> Game {
        // 20x20 universe, 1px cells, 10x10 screen: visible window is
        // the top-left 10x10, no margins.
        let cfg = Config {
            cols: 20,
            rows: 20,
            cell_w: 1,
            cell_h: 1,
            screen_w: 10,
            screen_h: 10,
            tick_rate: 60,
        };

        Game::new(&cfg).unwrap()
    }

    fn glider_pattern() -> Pattern {
        Pattern::from_text("glider", PatternKind::Spaceship, "010\n001\n111\n").unwrap()
    }

    #[test]
    fn invalid_config_refuses_to_start() {
        let cfg = Config {
            cols: 0,
            ..Config::default()
        };
        assert!(matches!(Game::new(&cfg), Err(GameError::Config(_))));
    }

    #[test]
    fn click_paints_a_single_cell() {
        let mut g = game();

        g.handle_input(InputEvent::MouseDown {
            x: 3,
            y: 4,
            button: MouseButton::Left,
        });

        assert!(g.universe().state_at(3, 4).is_alive());
        assert_eq!(g.universe().alive_count(), 1);
    }

    #[test]
    fn right_click_erases() {
        let mut g = game();

        g.handle_input(InputEvent::MouseDown {
            x: 3,
            y: 4,
            button: MouseButton::Left,
        });
        g.handle_input(InputEvent::MouseUp {
            x: 3,
            y: 4,
            button: MouseButton::Right,
        });

        assert_eq!(g.universe().alive_count(), 0);
    }

    #[test]
    fn fast_drag_leaves_no_gaps() {
        let mut g = game();

        g.handle_input(InputEvent::MouseDown {
            x: 0,
            y: 0,
            button: MouseButton::Left,
        });

        // The pointer jumped 5 cells right and 3 down in one sample.
        g.handle_input(InputEvent::MouseMove { x: 5, y: 3 });

        g.handle_input(InputEvent::MouseUp {
            x: 5,
            y: 3,
            button: MouseButton::Left,
        });

        assert_eq!(g.universe().alive_count(), 6);
        for (x, y) in sketch::Bresenham::new(0, 0, 5, 3) {
            assert!(g.universe().state_at(x, y).is_alive());
        }
    }

    #[test]
    fn motion_without_the_button_held_draws_nothing() {
        let mut g = game();

        g.handle_input(InputEvent::MouseMove { x: 5, y: 5 });

        assert_eq!(g.universe().alive_count(), 0);
    }

    #[test]
    fn armed_pattern_stamps_at_the_click_cell() {
        let mut g = game();

        g.push(Command::SelectPattern(glider_pattern()));
        g.frame();

        g.handle_input(InputEvent::MouseDown {
            x: 2,
            y: 2,
            button: MouseButton::Left,
        });

        assert_eq!(g.universe().alive_count(), 5);
        assert!(g.universe().state_at(3, 2).is_alive());
        assert!(g.universe().state_at(4, 3).is_alive());
        assert!(g.universe().state_at(2, 4).is_alive());
    }

    #[test]
    fn escape_disarms_the_pattern() {
        let mut g = game();

        g.push(Command::SelectPattern(glider_pattern()));
        g.frame();
        assert!(g.pattern().is_some());

        g.handle_input(InputEvent::Key(Key::Escape));
        g.frame();
        assert!(g.pattern().is_none());
    }

    /// Click a 2x2 block into the universe so ticking doesn't hit the
    /// extinction auto-stop.
    fn paint_block(g: &mut Game) {
        for (x, y) in [(5, 5), (6, 5), (5, 6), (6, 6)] {
            g.handle_input(InputEvent::MouseDown {
                x,
                y,
                button: MouseButton::Left,
            });
            g.handle_input(InputEvent::MouseUp {
                x,
                y,
                button: MouseButton::Left,
            });
        }
    }

    #[test]
    fn drawing_stops_a_running_engine() {
        let mut g = game();
        paint_block(&mut g);

        g.push(Command::Engine(EngineCommand::Start));
        g.frame();
        assert!(g.engine().is_running());

        g.handle_input(InputEvent::MouseDown {
            x: 0,
            y: 0,
            button: MouseButton::Left,
        });
        g.frame();

        assert!(!g.engine().is_running());
    }

    #[test]
    fn commands_take_effect_at_the_frame_boundary() {
        let mut g = game();
        g.handle_input(InputEvent::Key(Key::Char('n')));

        // Queued, not yet applied.
        assert_eq!(g.engine().generation(), 0);

        g.frame();
        assert_eq!(g.engine().generation(), 1);
    }

    #[test]
    fn clear_resets_universe_and_counters() {
        let mut g = game();

        g.handle_input(InputEvent::MouseDown {
            x: 1,
            y: 1,
            button: MouseButton::Left,
        });
        g.push(Command::Engine(EngineCommand::Step));
        g.frame();
        assert_eq!(g.engine().generation(), 1);

        g.push(Command::Engine(EngineCommand::Clear));
        g.frame();

        assert_eq!(g.universe().alive_count(), 0);
        assert_eq!(g.engine().generation(), 0);
        assert_eq!(g.engine().stats().alive, 0);
        assert!(!g.engine().is_running());
    }

    #[test]
    fn zoom_propagates_to_cells_and_armed_pattern() {
        let mut g = game();

        g.push(Command::SelectPattern(glider_pattern()));
        g.push(Command::Camera(CameraCommand::Zoom(ZoomDir::In)));
        g.frame();

        assert_eq!(g.camera().cell_size(), (2, 2));
        assert_eq!(g.universe().get(0, 0).unwrap().width, 2);
        assert_eq!(g.pattern().unwrap().cell_size(), (2, 2));
    }

    #[test]
    fn pan_keys_move_the_visible_window() {
        let mut g = game();

        g.handle_input(InputEvent::Key(Key::Char('d')));
        g.handle_input(InputEvent::Key(Key::Char('s')));
        g.frame();

        let rect = g.camera().visible_rect();
        assert_eq!((rect.x, rect.y), (5, 5));
    }

    #[test]
    fn space_toggles_run_state() {
        let mut g = game();
        paint_block(&mut g);

        g.handle_input(InputEvent::Key(Key::Char(' ')));
        g.frame();
        assert!(g.engine().is_running());

        g.handle_input(InputEvent::Key(Key::Char(' ')));
        g.frame();
        assert!(!g.engine().is_running());
    }

    #[test]
    fn quit_events_flag_exit() {
        let mut g = game();

        g.handle_input(InputEvent::Quit);
        assert!(g.should_exit());

        let mut g = game();
        g.handle_input(InputEvent::Key(Key::Char('q')));
        g.frame();
        assert!(g.should_exit());
    }
}
