use crossterm::event::Event as TermEvent;
use crossterm::event::KeyCode;
use crossterm::event::KeyEvent;
use crossterm::event::KeyEventKind;
use crossterm::event::KeyModifiers;
use crossterm::event::MouseButton as TermMouseButton;
use crossterm::event::MouseEvent;
use crossterm::event::MouseEventKind;

use crate::ScreenPx;
use crate::events::InputEvent;
use crate::events::Key;
use crate::events::MouseButton;

/// Convert a crossterm event into a core input event.
///
/// The core only ever sees opaque (x, y, kind) tuples; every crossterm
/// type stops here. Events the core has no use for map to `None`.
///
/// Scroll wheel events arrive as button releases, matching how the core
/// treats zoom clicks.
pub fn convert_event(event: TermEvent) -> Option<InputEvent> {
    match event {
        TermEvent::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind == KeyEventKind::Release {
                return None;
            }

            match code {
                KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                    Some(InputEvent::Quit)
                }
                KeyCode::Esc => Some(InputEvent::Key(Key::Escape)),
                KeyCode::Char(c) => Some(InputEvent::Key(Key::Char(c))),
                _ => None,
            }
        }

        TermEvent::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let (x, y) = (column as ScreenPx, row as ScreenPx);

            match kind {
                MouseEventKind::Down(TermMouseButton::Left) => Some(InputEvent::MouseDown {
                    x,
                    y,
                    button: MouseButton::Left,
                }),
                MouseEventKind::Up(TermMouseButton::Left) => Some(InputEvent::MouseUp {
                    x,
                    y,
                    button: MouseButton::Left,
                }),
                MouseEventKind::Up(TermMouseButton::Right) => Some(InputEvent::MouseUp {
                    x,
                    y,
                    button: MouseButton::Right,
                }),

                // A drag is just motion with the button held; the core
                // tracks the held state itself.
                MouseEventKind::Drag(TermMouseButton::Left) | MouseEventKind::Moved => {
                    Some(InputEvent::MouseMove { x, y })
                }

                MouseEventKind::ScrollUp => Some(InputEvent::MouseUp {
                    x,
                    y,
                    button: MouseButton::ScrollUp,
                }),
                MouseEventKind::ScrollDown => Some(InputEvent::MouseUp {
                    x,
                    y,
                    button: MouseButton::ScrollDown,
                }),

                _ => None,
            }
        }

        TermEvent::Resize(cols, rows) => Some(InputEvent::Resize {
            width: cols as ScreenPx,
            height: rows as ScreenPx,
        }),

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_keys_and_quit_chords() {
        let ev = TermEvent::Key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));
        assert_eq!(convert_event(ev), Some(InputEvent::Key(Key::Char('n'))));

        let ev = TermEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(convert_event(ev), Some(InputEvent::Quit));

        let ev = TermEvent::Key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(convert_event(ev), Some(InputEvent::Key(Key::Escape)));

        let ev = TermEvent::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(convert_event(ev), None);
    }

    #[test]
    fn maps_mouse_events() {
        let down = TermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(TermMouseButton::Left),
            column: 3,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            convert_event(down),
            Some(InputEvent::MouseDown {
                x: 3,
                y: 7,
                button: MouseButton::Left
            })
        );

        let drag = TermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(TermMouseButton::Left),
            column: 4,
            row: 7,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            convert_event(drag),
            Some(InputEvent::MouseMove { x: 4, y: 7 })
        );

        let scroll = TermEvent::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollUp,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(
            convert_event(scroll),
            Some(InputEvent::MouseUp {
                x: 0,
                y: 0,
                button: MouseButton::ScrollUp
            })
        );
    }
}
