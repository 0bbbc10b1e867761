//! Canvas viewport: zoom and pan.

use crate::config::{DEFAULT_MAX_SCALE, DEFAULT_MIN_SCALE};
use kurbo::{Affine, Point, Rect, Size, Vec2};

/// The pan/zoom transform applied when rendering the diagram.
///
/// Converts between screen coordinates (pointer events) and world
/// coordinates (device positions).
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasView {
    /// Zoom factor, always within `min_scale..=max_scale`.
    scale: f64,
    /// Translation in screen pixels.
    pub pan: Vec2,
    min_scale: f64,
    max_scale: f64,
}

impl Default for CanvasView {
    fn default() -> Self {
        Self {
            scale: 1.0,
            pan: Vec2::ZERO,
            min_scale: DEFAULT_MIN_SCALE,
            max_scale: DEFAULT_MAX_SCALE,
        }
    }
}

impl CanvasView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a view with a custom scale range.
    pub fn with_scale_range(min_scale: f64, max_scale: f64) -> Self {
        Self {
            min_scale,
            max_scale,
            ..Self::default()
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn scale_range(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Set scale and pan. Out-of-range scales are clamped, never rejected.
    pub fn set(&mut self, scale: f64, pan: Vec2) {
        self.scale = self.clamp_scale(scale);
        self.pan = pan;
    }

    fn clamp_scale(&self, scale: f64) -> f64 {
        if scale.is_nan() {
            return self.scale;
        }
        scale.clamp(self.min_scale, self.max_scale)
    }

    /// World-to-screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.pan) * Affine::scale(self.scale)
    }

    /// Screen-to-world transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.scale) * Affine::translate(-self.pan)
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan by a delta in screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Zoom by `factor`, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_scale = self.clamp_scale(self.scale * factor);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return;
        }

        let world_point = self.screen_to_world(screen_point);
        self.scale = new_scale;

        // Keep world_point under the cursor
        let new_screen = self.world_to_screen(world_point);
        self.pan += screen_point - new_screen;
    }

    /// Reset to 100% with no pan.
    pub fn reset(&mut self) {
        self.scale = self.clamp_scale(1.0);
        self.pan = Vec2::ZERO;
    }

    /// Fit the view so `bounds` fills the viewport minus `padding`.
    pub fn fit_to_bounds(&mut self, bounds: Rect, viewport: Size, padding: f64) {
        if bounds.is_zero_area() {
            self.reset();
            return;
        }

        let usable = Size::new(
            (viewport.width - padding * 2.0).max(1.0),
            (viewport.height - padding * 2.0).max(1.0),
        );
        let scale_x = usable.width / bounds.width();
        let scale_y = usable.height / bounds.height();
        self.scale = self.clamp_scale(scale_x.min(scale_y));

        let bounds_center = bounds.center();
        self.pan = Vec2::new(
            viewport.width / 2.0 - bounds_center.x * self.scale,
            viewport.height / 2.0 - bounds_center.y * self.scale,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_view() {
        let view = CanvasView::new();
        assert!((view.scale() - 1.0).abs() < f64::EPSILON);
        assert_eq!(view.pan, Vec2::ZERO);
    }

    #[test]
    fn test_set_clamps_scale() {
        let mut view = CanvasView::new();
        view.set(10.0, Vec2::new(5.0, 5.0));
        assert!((view.scale() - 3.0).abs() < f64::EPSILON);
        view.set(0.01, Vec2::ZERO);
        assert!((view.scale() - 0.25).abs() < f64::EPSILON);
        view.set(f64::NAN, Vec2::ZERO);
        assert!((view.scale() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_world_with_pan_and_scale() {
        let mut view = CanvasView::new();
        view.set(2.0, Vec2::new(50.0, 100.0));
        let world = view.screen_to_world(Point::new(150.0, 300.0));
        assert!((world.x - 50.0).abs() < f64::EPSILON);
        assert!((world.y - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut view = CanvasView::new();
        view.set(1.5, Vec2::new(30.0, -20.0));
        let original = Point::new(123.0, 456.0);
        let back = view.world_to_screen(view.screen_to_world(original));
        assert!((back.x - original.x).abs() < 1e-10);
        assert!((back.y - original.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut view = CanvasView::new();
        let anchor = Point::new(200.0, 150.0);
        let before = view.screen_to_world(anchor);
        view.zoom_at(anchor, 2.0);
        let after = view.screen_to_world(anchor);
        assert!((before.x - after.x).abs() < 1e-10);
        assert!((before.y - after.y).abs() < 1e-10);
        assert!((view.scale() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut view = CanvasView::new();
        view.zoom_at(Point::ZERO, 0.001);
        assert!((view.scale() - 0.25).abs() < f64::EPSILON);
        view.zoom_at(Point::ZERO, 1000.0);
        assert!((view.scale() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fit_to_bounds() {
        let mut view = CanvasView::new();
        view.fit_to_bounds(Rect::new(0.0, 0.0, 400.0, 200.0), Size::new(900.0, 500.0), 50.0);
        assert!((view.scale() - 2.0).abs() < f64::EPSILON);
        let center = view.world_to_screen(Point::new(200.0, 100.0));
        assert!((center.x - 450.0).abs() < 1e-9);
        assert!((center.y - 250.0).abs() < 1e-9);
    }
}
