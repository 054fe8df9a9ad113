//! Platform-agnostic input event types.
//!
//! Every front end maps its native keys to these enums. The guide engine
//! never sees raw key codes.

use serde::{Deserialize, Serialize};

use crate::model::CellId;

/// An input event delivered to the guide.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A remote / keyboard button pressed.
    ButtonPress(Button),
    /// A cell was clicked (pointer or touch).
    Click(CellId),
    /// User requested quit (window close, etc.).
    Quit,
}

/// Buttons understood by the guide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Select,
    Back,
    Menu,
    ContextMenu,
}

impl Button {
    /// The navigation direction this button moves focus in, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Self::Up => Some(Direction::Up),
            Self::Down => Some(Direction::Down),
            Self::Left => Some(Direction::Left),
            Self::Right => Some(Direction::Right),
            _ => None,
        }
    }

    /// Buttons that dismiss the guide.
    pub fn closes_guide(self) -> bool {
        matches!(self, Self::Back | Self::Menu)
    }
}

/// Directional focus movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Left and Right move along the time axis.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrow_buttons_map_to_directions() {
        assert_eq!(Button::Up.direction(), Some(Direction::Up));
        assert_eq!(Button::Down.direction(), Some(Direction::Down));
        assert_eq!(Button::Left.direction(), Some(Direction::Left));
        assert_eq!(Button::Right.direction(), Some(Direction::Right));
    }

    #[test]
    fn other_buttons_have_no_direction() {
        for b in [
            Button::PageUp,
            Button::PageDown,
            Button::Select,
            Button::Back,
            Button::Menu,
            Button::ContextMenu,
        ] {
            assert_eq!(b.direction(), None, "{b:?}");
        }
    }

    #[test]
    fn back_and_menu_close() {
        assert!(Button::Back.closes_guide());
        assert!(Button::Menu.closes_guide());
        assert!(!Button::ContextMenu.closes_guide());
        assert!(!Button::Select.closes_guide());
    }

    #[test]
    fn horizontal_directions() {
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Right.is_horizontal());
        assert!(!Direction::Up.is_horizontal());
        assert!(!Direction::Down.is_horizontal());
    }

    #[test]
    fn click_differs_by_cell() {
        assert_ne!(InputEvent::Click(CellId(1)), InputEvent::Click(CellId(2)));
        assert_ne!(InputEvent::Quit, InputEvent::ButtonPress(Button::Back));
    }

    #[test]
    fn button_hash_distinct() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(Button::PageUp);
        set.insert(Button::PageDown);
        set.insert(Button::PageUp);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn direction_serde_roundtrip() {
        let json = serde_json::to_string(&Direction::Left).unwrap();
        assert_eq!(json, "\"Left\"");
        let d: Direction = serde_json::from_str(&json).unwrap();
        assert_eq!(d, Direction::Left);
    }
}
