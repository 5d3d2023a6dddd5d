//! Pointer input mapping.

use crate::message::Action;
use crate::raster::Point;

/// Mouse button of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button: fill with the selected color
    Left,
    /// Middle button: paint boundary
    Middle,
    /// Secondary button: fill with the eraser
    Right,
}

impl PointerButton {
    /// Parse a button name (`left`, `middle`, `right`).
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "left" => Some(PointerButton::Left),
            "middle" => Some(PointerButton::Middle),
            "right" => Some(PointerButton::Right),
            _ => None,
        }
    }
}

/// A press or drag of a pointer button at image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Column in image pixels
    pub x: i32,
    /// Row in image pixels
    pub y: i32,
    /// Button held
    pub button: PointerButton,
    /// True for motion with the button held, false for the initial press
    pub dragging: bool,
}

impl PointerEvent {
    /// A button press at (x, y).
    pub fn press(button: PointerButton, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            button,
            dragging: false,
        }
    }

    /// Motion to (x, y) with `button` held.
    pub fn drag(button: PointerButton, x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            button,
            dragging: true,
        }
    }

    /// Action triggered by this event, if any.
    ///
    /// Fills happen on press only; the boundary brush also follows drags.
    pub fn to_action(&self) -> Option<Action> {
        let point = Point::new(self.x, self.y);
        match (self.button, self.dragging) {
            (PointerButton::Left, false) => Some(Action::Fill(point)),
            (PointerButton::Right, false) => Some(Action::Erase(point)),
            (PointerButton::Middle, _) => Some(Action::PaintBoundary(point)),
            (PointerButton::Left | PointerButton::Right, true) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_actions() {
        let p = Point::new(4, 2);
        assert_eq!(
            PointerEvent::press(PointerButton::Left, 4, 2).to_action(),
            Some(Action::Fill(p))
        );
        assert_eq!(
            PointerEvent::press(PointerButton::Right, 4, 2).to_action(),
            Some(Action::Erase(p))
        );
        assert_eq!(
            PointerEvent::press(PointerButton::Middle, 4, 2).to_action(),
            Some(Action::PaintBoundary(p))
        );
    }

    #[test]
    fn test_only_middle_drag_acts() {
        assert_eq!(
            PointerEvent::drag(PointerButton::Middle, 1, 1).to_action(),
            Some(Action::PaintBoundary(Point::new(1, 1)))
        );
        assert_eq!(PointerEvent::drag(PointerButton::Left, 1, 1).to_action(), None);
        assert_eq!(PointerEvent::drag(PointerButton::Right, 1, 1).to_action(), None);
    }
}
