use crossterm::event::{Event as CrosstermEvent, MouseEventKind};

use crate::dom::Element;
use crate::hit::hit_test;
use crate::layout::LayoutResult;

/// High-level events with element targeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Mouse click event
    Click {
        target: Option<String>,
        x: u16,
        y: u16,
        button: MouseButton,
    },
    /// Terminal resized
    Resize { width: u16, height: u16 },
    /// An in-progress scroll on the target element has come to rest
    ScrollEnd { target: String },
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

/// Translate raw terminal events into targeted high-level events.
/// Clicks are targeted via hit testing; everything else is dropped.
pub fn translate(raw: &[CrosstermEvent], root: &Element, layout: &LayoutResult) -> Vec<Event> {
    let mut events = Vec::new();

    for raw_event in raw {
        match raw_event {
            CrosstermEvent::Mouse(mouse) => {
                if let MouseEventKind::Down(button) = mouse.kind {
                    let target = hit_test(layout, root, mouse.column, mouse.row);
                    events.push(Event::Click {
                        target,
                        x: mouse.column,
                        y: mouse.row,
                        button: button.into(),
                    });
                }
            }
            CrosstermEvent::Resize(width, height) => {
                events.push(Event::Resize {
                    width: *width,
                    height: *height,
                });
            }
            _ => {}
        }
    }

    events
}
