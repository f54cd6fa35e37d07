use crate::CellCoord;
use crate::ScreenPx;
use crate::camera::ZoomDir;
use crate::pattern::Pattern;

/// Mouse buttons the core cares about. Anything else is dropped by the
/// input collaborator before it gets here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    ScrollUp,
    ScrollDown,
}

/// Keys the core cares about, decoupled from any windowing API's
/// keycode type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Escape,
}

/// A discrete event from the input layer: an opaque (x, y, kind) tuple
/// in screen pixel coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    MouseDown {
        x: ScreenPx,
        y: ScreenPx,
        button: MouseButton,
    },

    MouseUp {
        x: ScreenPx,
        y: ScreenPx,
        button: MouseButton,
    },

    MouseMove {
        x: ScreenPx,
        y: ScreenPx,
    },

    Key(Key),

    /// The screen was resized to the given pixel size.
    Resize {
        width: ScreenPx,
        height: ScreenPx,
    },

    Quit,
}

/// Control the update engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Start,
    Stop,

    /// Force exactly one tick while stopped.
    Step,

    /// Reset the universe to all-dead and zero the counters.
    Clear,
}

/// Move or zoom the camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraCommand {
    Pan { dx: CellCoord, dy: CellCoord },
    Zoom(ZoomDir),
}

/// A queued operation, drained once per frame in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Engine(EngineCommand),
    Camera(CameraCommand),

    /// Arm a pattern for stamping on the next draw click.
    SelectPattern(Pattern),

    /// Disarm the active pattern.
    DeselectPattern,

    Exit,
}
