//! Transient gesture state.

use crate::elements::{DeviceId, Endpoint, GroupId, ItemRef};
use kurbo::{Point, Size, Vec2};

/// What a drag gesture moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    Device(DeviceId),
    Group(GroupId),
}

impl DragTarget {
    pub fn item(&self) -> ItemRef {
        match self {
            DragTarget::Device(id) => ItemRef::Device(id.clone()),
            DragTarget::Group(id) => ItemRef::Group(id.clone()),
        }
    }
}

/// State of an active move gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub target: DragTarget,
    /// Pointer position minus the entity's origin at press time.
    pub grab_offset: Vec2,
    /// Position before the gesture started.
    pub origin: Point,
    /// Transient position shown while dragging; committed on release.
    pub current: Point,
    /// Press position in screen coordinates, for click detection.
    pub press_screen: Point,
    /// Whether the pointer travelled past the click threshold.
    pub moved: bool,
}

impl DragState {
    pub fn new(target: DragTarget, origin: Point, pointer: Point, press_screen: Point) -> Self {
        Self {
            target,
            grab_offset: pointer - origin,
            origin,
            current: origin,
            press_screen,
            moved: false,
        }
    }

    /// Follow the pointer, keeping the grab offset.
    pub fn update(&mut self, pointer: Point, screen: Point, click_threshold: f64) {
        if !self.moved && screen.distance(self.press_screen) > click_threshold {
            self.moved = true;
        }
        if self.moved {
            self.current = pointer - self.grab_offset;
        }
    }
}

/// State of an active group resize. The group's origin stays fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeState {
    pub group_id: GroupId,
    /// Fixed top-left corner.
    pub anchor: Point,
    /// Size before the gesture started.
    pub original: Size,
    /// Transient size shown while resizing; committed on release.
    pub current: Size,
    pub press_screen: Point,
    pub moved: bool,
}

impl ResizeState {
    pub fn new(group_id: GroupId, anchor: Point, original: Size, press_screen: Point) -> Self {
        Self {
            group_id,
            anchor,
            original,
            current: original,
            press_screen,
            moved: false,
        }
    }

    /// New size is pointer minus origin, floored at `min_size`.
    pub fn update(&mut self, pointer: Point, screen: Point, click_threshold: f64, min_size: f64) {
        if !self.moved && screen.distance(self.press_screen) > click_threshold {
            self.moved = true;
        }
        if self.moved {
            self.current = Size::new(
                (pointer.x - self.anchor.x).max(min_size),
                (pointer.y - self.anchor.y).max(min_size),
            );
        }
    }
}

/// An in-progress connection from a source port to the cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkDraft {
    pub source: Endpoint,
    /// Cursor position in world coordinates.
    pub cursor: Point,
}

/// Interaction mode of the editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum InteractionMode {
    #[default]
    Idle,
    Dragging(DragState),
    Resizing(ResizeState),
    LinkDrafting(LinkDraft),
}

impl InteractionMode {
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionMode::Idle)
    }

    pub fn name(&self) -> &'static str {
        match self {
            InteractionMode::Idle => "idle",
            InteractionMode::Dragging(_) => "dragging",
            InteractionMode::Resizing(_) => "resizing",
            InteractionMode::LinkDrafting(_) => "link-drafting",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut drag = DragState::new(
            DragTarget::Device("a".to_string()),
            Point::new(100.0, 100.0),
            Point::new(130.0, 110.0),
            Point::new(130.0, 110.0),
        );
        drag.update(Point::new(280.0, 190.0), Point::new(280.0, 190.0), 3.0);
        assert!(drag.moved);
        assert_eq!(drag.current, Point::new(250.0, 180.0));
        assert_eq!(drag.origin, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_drag_ignores_jitter_below_threshold() {
        let mut drag = DragState::new(
            DragTarget::Group("g".to_string()),
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(10.0, 10.0),
        );
        drag.update(Point::new(11.0, 11.0), Point::new(11.0, 11.0), 3.0);
        assert!(!drag.moved);
        assert_eq!(drag.current, Point::ZERO);
    }

    #[test]
    fn test_resize_floors_at_minimum() {
        let mut resize = ResizeState::new(
            "g".to_string(),
            Point::new(0.0, 0.0),
            Size::new(200.0, 100.0),
            Point::new(200.0, 100.0),
        );
        resize.update(Point::new(5.0, 150.0), Point::new(5.0, 150.0), 3.0, 40.0);
        assert!((resize.current.width - 40.0).abs() < f64::EPSILON);
        assert!((resize.current.height - 150.0).abs() < f64::EPSILON);
    }
}
