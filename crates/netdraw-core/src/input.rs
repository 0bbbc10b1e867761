//! Pointer and keyboard events fed to the interaction controller.
//!
//! Positions are in screen coordinates; the controller converts them through
//! the canvas view.

use kurbo::{Point, Vec2};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// Check if any modifier is held.
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
        modifiers: Modifiers,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
}

impl PointerEvent {
    /// Left-button press without modifiers.
    pub fn down(position: Point) -> Self {
        PointerEvent::Down {
            position,
            button: MouseButton::Left,
            modifiers: Modifiers::default(),
        }
    }

    /// Left-button release.
    pub fn up(position: Point) -> Self {
        PointerEvent::Up {
            position,
            button: MouseButton::Left,
        }
    }

    pub fn moved(position: Point) -> Self {
        PointerEvent::Move { position }
    }
}

/// Keyboard event type. Keys are named as in DOM `KeyboardEvent.key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Key that aborts the active gesture.
pub const CANCEL_KEY: &str = "Escape";
/// Keys that delete the selection.
pub const DELETE_KEYS: [&str; 2] = ["Delete", "Backspace"];
