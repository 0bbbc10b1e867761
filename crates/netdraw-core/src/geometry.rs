//! Port anchors and connection curves.
//!
//! Everything here is derived from the current device layout on demand; no
//! computed position is ever stored.

use crate::elements::{Device, Spatial};
use kurbo::{BezPath, CubicBez, ParamCurve, ParamCurveNearest, Point, Vec2};

/// Vertical distance from a device's top edge to its first port row.
pub const PORT_TOP_OFFSET: f64 = 20.0;
/// Vertical distance between port rows.
pub const PORT_ROW_SPACING: f64 = 20.0;
/// Upper bound for the horizontal control-point offset of a connection curve.
pub const MAX_CONTROL_OFFSET: f64 = 100.0;

/// Accuracy used when projecting a point onto a curve.
const NEAREST_ACCURACY: f64 = 1e-3;

/// Anchor of the port at `index` in the device's port sequence.
///
/// Even indices sit on the left edge, odd ones on the right, two per row.
pub fn port_anchor_at(device: &Device, index: usize) -> Point {
    let is_left = index % 2 == 0;
    let row = (index / 2) as f64;
    Point::new(
        device.position.x + if is_left { 0.0 } else { device.size.width },
        device.position.y + PORT_TOP_OFFSET + row * PORT_ROW_SPACING,
    )
}

/// Anchor of a port, falling back to the device center when the device has
/// no ports or the port is unknown.
pub fn port_anchor(device: &Device, port_id: &str) -> Point {
    match device.port_index(port_id) {
        Some(index) => port_anchor_at(device, index),
        None => device.center(),
    }
}

/// Horizontal control-point offset for a connection spanning `distance`.
pub fn control_offset(distance: f64) -> f64 {
    MAX_CONTROL_OFFSET.min(distance / 2.0)
}

/// A connection drawn as a cubic Bezier with horizontal end tangents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionCurve {
    pub source: Point,
    pub control1: Point,
    pub control2: Point,
    pub target: Point,
}

/// Build the curve between two anchors.
pub fn connection_curve(source: Point, target: Point) -> ConnectionCurve {
    let offset = control_offset((target - source).hypot());
    ConnectionCurve {
        source,
        control1: source + Vec2::new(offset, 0.0),
        control2: target - Vec2::new(offset, 0.0),
        target,
    }
}

impl ConnectionCurve {
    /// The curve as a kurbo cubic.
    pub fn to_cubic(&self) -> CubicBez {
        CubicBez::new(self.source, self.control1, self.control2, self.target)
    }

    /// The curve as a drawable path.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.source);
        path.curve_to(self.control1, self.control2, self.target);
        path
    }

    /// Point at t = 0.5, where labels and the delete affordance go.
    pub fn midpoint(&self) -> Point {
        self.to_cubic().eval(0.5)
    }

    /// Horizontal control-point offset used for this curve.
    pub fn control_offset(&self) -> f64 {
        self.control1.x - self.source.x
    }

    /// Check if a point lies within `tolerance` of the curve.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let nearest = self.to_cubic().nearest(point, NEAREST_ACCURACY);
        nearest.distance_sq <= tolerance * tolerance
    }
}

/// A straight link between two device centers ("quick link" rendering).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StraightLink {
    pub source: Point,
    pub target: Point,
}

/// Build a straight link between the centers of two devices.
pub fn straight_link(source: &Device, target: &Device) -> StraightLink {
    StraightLink {
        source: source.center(),
        target: target.center(),
    }
}

impl StraightLink {
    /// Average of both centers.
    pub fn midpoint(&self) -> Point {
        self.source.midpoint(self.target)
    }

    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.source);
        path.line_to(self.target);
        path
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.source, self.target) <= tolerance
    }
}

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = b - a;
    let pv = point - a;
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    (point - (a + seg * t)).hypot()
}
