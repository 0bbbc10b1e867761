//! Turns pointer and keyboard events into model mutations.

use super::mode::{DragState, DragTarget, InteractionMode, LinkDraft, ResizeState};
use crate::config::EditorConfig;
use crate::elements::{ConnectionId, GroupId, ItemRef};
use crate::error::TopologyResult;
use crate::input::{CANCEL_KEY, DELETE_KEYS, KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::model::{Hit, TopologyModel};
use kurbo::{Point, Size, Vec2};

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// Nothing observable happened (gesture started or continued).
    None,
    /// Selection changed; `None` means cleared.
    Selected(Option<ItemRef>),
    /// A drag was committed.
    Moved(ItemRef),
    /// A group resize was committed.
    Resized(GroupId),
    /// A connection was created.
    Linked(ConnectionId),
    /// The selected element was deleted.
    Deleted(ItemRef),
    /// The active gesture was aborted; the model is unchanged.
    Cancelled,
    /// Zoom or pan changed.
    ViewChanged,
}

impl InteractionOutcome {
    /// Whether the topology itself changed (as opposed to view or selection).
    pub fn modifies_topology(&self) -> bool {
        matches!(
            self,
            InteractionOutcome::Moved(_)
                | InteractionOutcome::Resized(_)
                | InteractionOutcome::Linked(_)
                | InteractionOutcome::Deleted(_)
        )
    }
}

/// A press that did not start a gesture; becomes a click if released in place.
#[derive(Debug, Clone, PartialEq)]
struct PendingPress {
    item: Option<ItemRef>,
    screen: Point,
}

/// Owns selection and the active gesture.
#[derive(Debug, Clone)]
pub struct InteractionController {
    mode: InteractionMode,
    selected: Option<ItemRef>,
    pending: Option<PendingPress>,
    hit_tolerance: f64,
    click_threshold: f64,
    zoom_step: f64,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl InteractionController {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            mode: InteractionMode::Idle,
            selected: None,
            pending: None,
            hit_tolerance: config.hit_tolerance,
            click_threshold: config.click_threshold,
            zoom_step: config.zoom_step,
        }
    }

    pub fn mode(&self) -> &InteractionMode {
        &self.mode
    }

    pub fn selected(&self) -> Option<&ItemRef> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, item: &ItemRef) -> bool {
        self.selected.as_ref() == Some(item)
    }

    pub fn select(&mut self, item: Option<ItemRef>) {
        self.selected = item;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Drop all transient state (used when a document is loaded).
    pub fn reset(&mut self) {
        self.mode = InteractionMode::Idle;
        self.selected = None;
        self.pending = None;
    }

    /// Forget selection or gestures that point at elements no longer in the model.
    pub fn revalidate(&mut self, model: &TopologyModel) {
        if self.selected.as_ref().is_some_and(|item| !model.contains(item)) {
            self.selected = None;
        }
        let gesture_target = match &self.mode {
            InteractionMode::Idle => None,
            InteractionMode::Dragging(drag) => Some(drag.target.item()),
            InteractionMode::Resizing(resize) => Some(ItemRef::Group(resize.group_id.clone())),
            InteractionMode::LinkDrafting(draft) => Some(ItemRef::Device(draft.source.device_id.clone())),
        };
        if gesture_target.is_some_and(|item| !model.contains(&item)) {
            self.mode = InteractionMode::Idle;
        }
    }

    /// Transient position of an element being dragged.
    pub fn preview_position(&self, item: &ItemRef) -> Option<Point> {
        match &self.mode {
            InteractionMode::Dragging(drag) if drag.moved && &drag.target.item() == item => Some(drag.current),
            _ => None,
        }
    }

    /// Transient size of a group being resized.
    pub fn preview_group_size(&self, group_id: &str) -> Option<Size> {
        match &self.mode {
            InteractionMode::Resizing(resize) if resize.group_id == group_id => Some(resize.current),
            _ => None,
        }
    }

    /// The in-progress connection, if any.
    pub fn link_draft(&self) -> Option<&LinkDraft> {
        match &self.mode {
            InteractionMode::LinkDrafting(draft) => Some(draft),
            _ => None,
        }
    }

    /// Hit tolerance in world units at the current zoom.
    fn world_tolerance(&self, model: &TopologyModel) -> f64 {
        self.hit_tolerance / model.view.scale()
    }

    /// Route a pointer event.
    pub fn handle_pointer_event(
        &mut self,
        model: &mut TopologyModel,
        event: PointerEvent,
    ) -> TopologyResult<InteractionOutcome> {
        match event {
            PointerEvent::Down { position, button, modifiers } => {
                if button != MouseButton::Left {
                    return Ok(InteractionOutcome::None);
                }
                self.pointer_down(model, position, modifiers)
            }
            PointerEvent::Move { position } => {
                self.pointer_move(model, position);
                Ok(InteractionOutcome::None)
            }
            PointerEvent::Up { position, button } => {
                if button != MouseButton::Left {
                    return Ok(InteractionOutcome::None);
                }
                self.pointer_up(model, position)
            }
            PointerEvent::Scroll { position, delta } => Ok(self.scroll(model, position, delta)),
        }
    }

    /// Route a key event: Escape cancels, Delete/Backspace deletes the selection.
    pub fn handle_key_event(&mut self, model: &mut TopologyModel, event: &KeyEvent) -> InteractionOutcome {
        let KeyEvent::Pressed(key) = event else {
            return InteractionOutcome::None;
        };
        if key == CANCEL_KEY {
            self.cancel()
        } else if DELETE_KEYS.contains(&key.as_str()) {
            self.cancel();
            self.delete_selected(model)
        } else {
            InteractionOutcome::None
        }
    }

    /// Start a gesture or remember a potential click.
    pub fn pointer_down(
        &mut self,
        model: &mut TopologyModel,
        screen: Point,
        modifiers: Modifiers,
    ) -> TopologyResult<InteractionOutcome> {
        let world = model.view.screen_to_world(screen);
        let hit = model.hit_test(world, self.world_tolerance(model));

        // Second click of a click-to-link sequence
        if let InteractionMode::LinkDrafting(draft) = &self.mode {
            let source_device = draft.source.device_id.clone();
            return match hit {
                Some(Hit::Port(target)) if target.device_id != source_device => {
                    let source = draft.source.clone();
                    self.mode = InteractionMode::Idle;
                    let id = model.add_connection(source, target, None)?;
                    Ok(InteractionOutcome::Linked(id))
                }
                Some(Hit::Port(endpoint)) if endpoint.device_id == source_device => Ok(InteractionOutcome::None),
                Some(Hit::Device(id)) if id == source_device => Ok(InteractionOutcome::None),
                _ => Ok(self.cancel()),
            };
        }

        if !self.mode.is_idle() {
            return Ok(InteractionOutcome::None);
        }

        self.pending = None;
        match hit {
            Some(Hit::Port(endpoint)) if !modifiers.any() => {
                log::debug!("Link draft from {}:{}", endpoint.device_id, endpoint.port_id);
                self.mode = InteractionMode::LinkDrafting(LinkDraft {
                    source: endpoint,
                    cursor: world,
                });
            }
            Some(Hit::Device(id)) if !modifiers.any() => {
                if let Some(device) = model.device(&id) {
                    let origin = device.position;
                    self.mode = InteractionMode::Dragging(DragState::new(DragTarget::Device(id), origin, world, screen));
                }
            }
            Some(Hit::Group(id)) if !modifiers.any() => {
                if let Some(group) = model.group(&id) {
                    let origin = group.position;
                    self.mode = InteractionMode::Dragging(DragState::new(DragTarget::Group(id), origin, world, screen));
                }
            }
            Some(Hit::ResizeHandle(id)) => {
                if let Some(group) = model.group(&id) {
                    let (anchor, size) = (group.position, group.size);
                    self.mode = InteractionMode::Resizing(ResizeState::new(id, anchor, size, screen));
                }
            }
            other => {
                self.pending = Some(PendingPress {
                    item: other.map(|hit| hit.item()),
                    screen,
                });
            }
        }
        Ok(InteractionOutcome::None)
    }

    /// Update the transient state of the active gesture.
    pub fn pointer_move(&mut self, model: &TopologyModel, screen: Point) {
        let world = model.view.screen_to_world(screen);
        let threshold = self.click_threshold;
        match &mut self.mode {
            InteractionMode::Idle => {}
            InteractionMode::Dragging(drag) => drag.update(world, screen, threshold),
            InteractionMode::Resizing(resize) => resize.update(world, screen, threshold, model.min_group_size()),
            InteractionMode::LinkDrafting(draft) => draft.cursor = world,
        }
    }

    /// Finish the active gesture, committing its result to the model.
    pub fn pointer_up(&mut self, model: &mut TopologyModel, screen: Point) -> TopologyResult<InteractionOutcome> {
        self.pointer_move(model, screen);
        let world = model.view.screen_to_world(screen);

        match std::mem::take(&mut self.mode) {
            InteractionMode::Idle => {
                let Some(press) = self.pending.take() else {
                    return Ok(InteractionOutcome::None);
                };
                if screen.distance(press.screen) > self.click_threshold {
                    return Ok(InteractionOutcome::None);
                }
                self.selected = press.item.clone();
                Ok(InteractionOutcome::Selected(press.item))
            }
            InteractionMode::Dragging(drag) => {
                let item = drag.target.item();
                if !drag.moved {
                    self.selected = Some(item.clone());
                    return Ok(InteractionOutcome::Selected(Some(item)));
                }
                match &drag.target {
                    DragTarget::Device(id) => model.move_device(id, drag.current)?,
                    DragTarget::Group(id) => model.move_group(id, drag.current)?,
                }
                Ok(InteractionOutcome::Moved(item))
            }
            InteractionMode::Resizing(resize) => {
                if !resize.moved {
                    let item = ItemRef::Group(resize.group_id);
                    self.selected = Some(item.clone());
                    return Ok(InteractionOutcome::Selected(Some(item)));
                }
                model.resize_group(&resize.group_id, resize.current.width, resize.current.height)?;
                Ok(InteractionOutcome::Resized(resize.group_id))
            }
            InteractionMode::LinkDrafting(draft) => {
                let hit = model.hit_test(world, self.world_tolerance(model));
                let over_device = match &hit {
                    Some(Hit::Port(endpoint)) => Some(endpoint.device_id.as_str()),
                    Some(Hit::Device(id)) => Some(id.as_str()),
                    _ => None,
                };
                if over_device == Some(draft.source.device_id.as_str()) {
                    // Released on the source device: keep drafting
                    self.mode = InteractionMode::LinkDrafting(draft);
                    return Ok(InteractionOutcome::None);
                }
                match hit {
                    Some(Hit::Port(target)) => {
                        let id = model.add_connection(draft.source, target, None)?;
                        Ok(InteractionOutcome::Linked(id))
                    }
                    _ => {
                        log::debug!("Link draft from {} cancelled", draft.source.device_id);
                        Ok(InteractionOutcome::Cancelled)
                    }
                }
            }
        }
    }

    /// Abort the active gesture. Nothing was written to the model during the
    /// gesture, so the pre-gesture state remains.
    pub fn cancel(&mut self) -> InteractionOutcome {
        self.pending = None;
        if self.mode.is_idle() {
            return InteractionOutcome::None;
        }
        log::debug!("Cancelled {} gesture", self.mode.name());
        self.mode = InteractionMode::Idle;
        InteractionOutcome::Cancelled
    }

    /// Delete the selected element and clear the selection.
    pub fn delete_selected(&mut self, model: &mut TopologyModel) -> InteractionOutcome {
        let Some(item) = self.selected.take() else {
            return InteractionOutcome::None;
        };
        let removed = match &item {
            ItemRef::Device(id) => model.delete_device(id).is_some(),
            ItemRef::Connection(id) => model.delete_connection(id).is_some(),
            ItemRef::Group(id) => model.delete_group(id).is_some(),
        };
        if removed {
            InteractionOutcome::Deleted(item)
        } else {
            InteractionOutcome::None
        }
    }

    /// Zoom around the cursor; scrolling up zooms in.
    fn scroll(&mut self, model: &mut TopologyModel, screen: Point, delta: Vec2) -> InteractionOutcome {
        if delta.y == 0.0 {
            return InteractionOutcome::None;
        }
        let factor = if delta.y < 0.0 { self.zoom_step } else { 1.0 / self.zoom_step };
        let before = model.view.scale();
        model.view.zoom_at(screen, factor);
        if (model.view.scale() - before).abs() < f64::EPSILON {
            InteractionOutcome::None
        } else {
            InteractionOutcome::ViewChanged
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LinkStyle;
    use crate::elements::{Device, DeviceKind, Endpoint, Group, Port};

    fn model() -> TopologyModel {
        let mut model = TopologyModel::default();
        for (id, x) in [("a", 100.0), ("b", 400.0)] {
            model
                .add_device(
                    Device::new(id, DeviceKind::Router, id, Point::new(x, 100.0))
                        .with_size(100.0, 60.0)
                        .with_port(Port::new("p0", "ge-0/0/0"))
                        .with_port(Port::new("p1", "ge-0/0/1")),
                )
                .unwrap();
        }
        model
    }

    fn click(controller: &mut InteractionController, model: &mut TopologyModel, at: Point) -> InteractionOutcome {
        controller.handle_pointer_event(model, PointerEvent::down(at)).unwrap();
        controller.handle_pointer_event(model, PointerEvent::up(at)).unwrap()
    }

    #[test]
    fn test_cancel_drag_leaves_device_in_place() {
        let mut model = model();
        let mut controller = InteractionController::default();

        controller
            .handle_pointer_event(&mut model, PointerEvent::down(Point::new(150.0, 140.0)))
            .unwrap();
        controller
            .handle_pointer_event(&mut model, PointerEvent::moved(Point::new(300.0, 220.0)))
            .unwrap();
        let device_a = ItemRef::Device("a".to_string());
        assert_eq!(controller.preview_position(&device_a), Some(Point::new(250.0, 180.0)));
        assert_eq!(model.device("a").unwrap().position, Point::new(100.0, 100.0));

        assert_eq!(controller.cancel(), InteractionOutcome::Cancelled);
        assert!(controller.mode().is_idle());
        assert_eq!(controller.preview_position(&device_a), None);

        let outcome = controller
            .handle_pointer_event(&mut model, PointerEvent::up(Point::new(300.0, 220.0)))
            .unwrap();
        assert_eq!(outcome, InteractionOutcome::None);
        assert_eq!(model.device("a").unwrap().position, Point::new(100.0, 100.0));
    }

    #[test]
    fn test_drag_commits_on_release() {
        let mut model = model();
        let mut controller = InteractionController::default();

        controller
            .handle_pointer_event(&mut model, PointerEvent::down(Point::new(150.0, 140.0)))
            .unwrap();
        controller
            .handle_pointer_event(&mut model, PointerEvent::moved(Point::new(300.0, 220.0)))
            .unwrap();
        let outcome = controller
            .handle_pointer_event(&mut model, PointerEvent::up(Point::new(300.0, 220.0)))
            .unwrap();

        assert_eq!(outcome, InteractionOutcome::Moved(ItemRef::Device("a".to_string())));
        assert!(outcome.modifies_topology());
        assert_eq!(model.device("a").unwrap().position, Point::new(250.0, 180.0));
    }

    #[test]
    fn test_drag_respects_zoom() {
        let mut model = model();
        model.set_canvas_view(2.0, Vec2::ZERO);
        let mut controller = InteractionController::default();

        controller
            .handle_pointer_event(&mut model, PointerEvent::down(Point::new(300.0, 280.0)))
            .unwrap();
        controller
            .handle_pointer_event(&mut model, PointerEvent::moved(Point::new(600.0, 440.0)))
            .unwrap();
        controller
            .handle_pointer_event(&mut model, PointerEvent::up(Point::new(600.0, 440.0)))
            .unwrap();
        assert_eq!(model.device("a").unwrap().position, Point::new(250.0, 180.0));
    }

    #[test]
    fn test_click_selects_and_canvas_click_clears() {
        let mut model = model();
        let mut controller = InteractionController::default();

        let outcome = click(&mut controller, &mut model, Point::new(150.0, 140.0));
        let device_a = ItemRef::Device("a".to_string());
        assert_eq!(outcome, InteractionOutcome::Selected(Some(device_a.clone())));
        assert!(controller.is_selected(&device_a));
        assert_eq!(model.device("a").unwrap().position, Point::new(100.0, 100.0));

        let outcome = click(&mut controller, &mut model, Point::new(1000.0, 1000.0));
        assert_eq!(outcome, InteractionOutcome::Selected(None));
        assert!(controller.selected().is_none());
    }

    #[test]
    fn test_click_selects_connection() {
        let mut model = model();
        let conn = model
            .add_connection(Endpoint::new("a", "p1"), Endpoint::new("b", "p0"), None)
            .unwrap();
        let mut controller = InteractionController::default();

        let outcome = click(&mut controller, &mut model, Point::new(300.0, 121.0));
        assert_eq!(outcome, InteractionOutcome::Selected(Some(ItemRef::Connection(conn))));
        assert!(!outcome.modifies_topology());
    }

    #[test]
    fn test_click_selects_straight_link_at_midpoint() {
        let mut model = model();
        model.set_link_style(LinkStyle::Straight);
        let conn = model
            .add_connection(Endpoint::new("a", "p1"), Endpoint::new("b", "p0"), None)
            .unwrap();
        let mut controller = InteractionController::default();

        // Midpoint of the line between both device centers
        let outcome = click(&mut controller, &mut model, Point::new(300.0, 130.0));
        assert_eq!(outcome, InteractionOutcome::Selected(Some(ItemRef::Connection(conn))));
    }

    #[test]
    fn test_modifier_press_only_selects() {
        let mut model = model();
        let mut controller = InteractionController::default();

        let down = PointerEvent::Down {
            position: Point::new(150.0, 140.0),
            button: MouseButton::Left,
            modifiers: Modifiers {
                shift: true,
                ..Modifiers::default()
            },
        };
        controller.handle_pointer_event(&mut model, down).unwrap();
        assert!(controller.mode().is_idle());
        let outcome = controller
            .handle_pointer_event(&mut model, PointerEvent::up(Point::new(150.0, 140.0)))
            .unwrap();
        assert_eq!(outcome, InteractionOutcome::Selected(Some(ItemRef::Device("a".to_string()))));
    }

    #[test]
    fn test_right_button_ignored() {
        let mut model = model();
        let mut controller = InteractionController::default();
        let down = PointerEvent::Down {
            position: Point::new(150.0, 140.0),
            button: MouseButton::Right,
            modifiers: Modifiers::default(),
        };
        assert_eq!(
            controller.handle_pointer_event(&mut model, down).unwrap(),
            InteractionOutcome::None
        );
        assert!(controller.mode().is_idle());
    }

    #[test]
    fn test_drag_link_to_other_device() {
        let mut model = model();
        let mut controller = InteractionController::default();

        controller
            .handle_pointer_event(&mut model, PointerEvent::down(Point::new(200.0, 120.0)))
            .unwrap();
        controller
            .handle_pointer_event(&mut model, PointerEvent::moved(Point::new(300.0, 130.0)))
            .unwrap();
        assert_eq!(controller.mode().name(), "link-drafting");
        assert_eq!(controller.link_draft().unwrap().cursor, Point::new(300.0, 130.0));
        assert!(model.connections().is_empty());

        let outcome = controller
            .handle_pointer_event(&mut model, PointerEvent::up(Point::new(401.0, 121.0)))
            .unwrap();
        let InteractionOutcome::Linked(id) = outcome else {
            panic!("expected a new connection, got {:?}", outcome);
        };
        let conn = model.connection(&id).unwrap();
        assert_eq!(conn.source, Endpoint::new("a", "p1"));
        assert_eq!(conn.target, Endpoint::new("b", "p0"));
        assert!(controller.mode().is_idle());
    }

    #[test]
    fn test_release_on_source_device_keeps_drafting() {
        let mut model = model();
        let mut controller = InteractionController::default();

        click(&mut controller, &mut model, Point::new(200.0, 120.0));
        assert!(controller.link_draft().is_some());
        assert!(model.connections().is_empty());

        // Pressing on the source device again does nothing
        click(&mut controller, &mut model, Point::new(150.0, 140.0));
        assert!(controller.link_draft().is_some());

        // Second click on another device's port completes the link
        let outcome = controller
            .handle_pointer_event(&mut model, PointerEvent::down(Point::new(500.0, 120.0)))
            .unwrap();
        assert!(matches!(outcome, InteractionOutcome::Linked(_)));
        let outcome = controller
            .handle_pointer_event(&mut model, PointerEvent::up(Point::new(500.0, 120.0)))
            .unwrap();
        assert_eq!(outcome, InteractionOutcome::None);
        assert_eq!(model.connections().len(), 1);
        assert_eq!(model.connections()[0].target, Endpoint::new("b", "p1"));
    }

    #[test]
    fn test_link_released_on_empty_canvas_cancels() {
        let mut model = model();
        let mut controller = InteractionController::default();

        controller
            .handle_pointer_event(&mut model, PointerEvent::down(Point::new(200.0, 120.0)))
            .unwrap();
        let outcome = controller
            .handle_pointer_event(&mut model, PointerEvent::up(Point::new(300.0, 400.0)))
            .unwrap();
        assert_eq!(outcome, InteractionOutcome::Cancelled);
        assert!(model.connections().is_empty());
        assert!(controller.mode().is_idle());
    }

    #[test]
    fn test_escape_cancels_link_draft() {
        let mut model = model();
        let mut controller = InteractionController::default();

        click(&mut controller, &mut model, Point::new(200.0, 120.0));
        let outcome = controller.handle_key_event(&mut model, &KeyEvent::Pressed("Escape".to_string()));
        assert_eq!(outcome, InteractionOutcome::Cancelled);
        assert!(controller.link_draft().is_none());
        assert!(model.connections().is_empty());
    }

    #[test]
    fn test_resize_group_floors_at_minimum() {
        let mut model = model();
        model
            .add_group(Group::new("g", "Lab", Point::new(0.0, 300.0), Size::new(200.0, 100.0)))
            .unwrap();
        let mut controller = InteractionController::default();

        controller
            .handle_pointer_event(&mut model, PointerEvent::down(Point::new(200.0, 400.0)))
            .unwrap();
        assert_eq!(controller.mode().name(), "resizing");
        controller
            .handle_pointer_event(&mut model, PointerEvent::moved(Point::new(10.0, 310.0)))
            .unwrap();
        assert_eq!(controller.preview_group_size("g"), Some(Size::new(40.0, 40.0)));
        assert!((model.group("g").unwrap().size.width - 200.0).abs() < f64::EPSILON);

        let outcome = controller
            .handle_pointer_event(&mut model, PointerEvent::up(Point::new(10.0, 310.0)))
            .unwrap();
        assert_eq!(outcome, InteractionOutcome::Resized("g".to_string()));
        assert_eq!(model.group("g").unwrap().size, Size::new(40.0, 40.0));
        assert_eq!(model.group("g").unwrap().position, Point::new(0.0, 300.0));
    }

    #[test]
    fn test_cancel_resize_keeps_group_size() {
        let mut model = model();
        model
            .add_group(Group::new("g", "Lab", Point::new(0.0, 300.0), Size::new(200.0, 100.0)))
            .unwrap();
        let mut controller = InteractionController::default();

        controller
            .handle_pointer_event(&mut model, PointerEvent::down(Point::new(200.0, 400.0)))
            .unwrap();
        controller
            .handle_pointer_event(&mut model, PointerEvent::moved(Point::new(320.0, 480.0)))
            .unwrap();
        assert_eq!(controller.preview_group_size("g"), Some(Size::new(320.0, 180.0)));

        let outcome = controller.handle_key_event(&mut model, &KeyEvent::Pressed("Escape".to_string()));
        assert_eq!(outcome, InteractionOutcome::Cancelled);
        assert_eq!(controller.preview_group_size("g"), None);

        let outcome = controller
            .handle_pointer_event(&mut model, PointerEvent::up(Point::new(320.0, 480.0)))
            .unwrap();
        assert_eq!(outcome, InteractionOutcome::None);
        assert_eq!(model.group("g").unwrap().size, Size::new(200.0, 100.0));
    }

    #[test]
    fn test_drag_group() {
        let mut model = model();
        model
            .add_group(Group::new("g", "Lab", Point::new(0.0, 300.0), Size::new(200.0, 100.0)))
            .unwrap();
        let mut controller = InteractionController::default();

        controller
            .handle_pointer_event(&mut model, PointerEvent::down(Point::new(50.0, 350.0)))
            .unwrap();
        controller
            .handle_pointer_event(&mut model, PointerEvent::moved(Point::new(80.0, 370.0)))
            .unwrap();
        let outcome = controller
            .handle_pointer_event(&mut model, PointerEvent::up(Point::new(80.0, 370.0)))
            .unwrap();
        assert_eq!(outcome, InteractionOutcome::Moved(ItemRef::Group("g".to_string())));
        assert_eq!(model.group("g").unwrap().position, Point::new(30.0, 320.0));
    }

    #[test]
    fn test_delete_key_removes_selection() {
        let mut model = model();
        model
            .add_connection(Endpoint::new("a", "p1"), Endpoint::new("b", "p0"), None)
            .unwrap();
        let mut controller = InteractionController::default();

        click(&mut controller, &mut model, Point::new(150.0, 140.0));
        let outcome = controller.handle_key_event(&mut model, &KeyEvent::Pressed("Delete".to_string()));
        assert_eq!(outcome, InteractionOutcome::Deleted(ItemRef::Device("a".to_string())));
        assert!(model.device("a").is_none());
        assert!(model.connections().is_empty());
        assert!(controller.selected().is_none());

        // Nothing selected: no-op
        let outcome = controller.handle_key_event(&mut model, &KeyEvent::Pressed("Backspace".to_string()));
        assert_eq!(outcome, InteractionOutcome::None);
    }

    #[test]
    fn test_scroll_zooms_around_cursor() {
        let mut model = model();
        let mut controller = InteractionController::default();
        let cursor = Point::new(150.0, 140.0);
        let before = model.view.screen_to_world(cursor);

        let outcome = controller
            .handle_pointer_event(
                &mut model,
                PointerEvent::Scroll {
                    position: cursor,
                    delta: Vec2::new(0.0, -1.0),
                },
            )
            .unwrap();
        assert_eq!(outcome, InteractionOutcome::ViewChanged);
        assert!(!outcome.modifies_topology());
        assert!((model.view.scale() - 1.1).abs() < 1e-9);
        let after = model.view.screen_to_world(cursor);
        assert!((before.x - after.x).abs() < 1e-9);
    }

    #[test]
    fn test_revalidate_drops_stale_selection() {
        let mut model = model();
        let mut controller = InteractionController::default();

        click(&mut controller, &mut model, Point::new(450.0, 140.0));
        assert!(controller.selected().is_some());
        model.delete_device("b");
        controller.revalidate(&model);
        assert!(controller.selected().is_none());
    }
}
