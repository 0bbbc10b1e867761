//! Topology elements: devices with ports, connections and groups.

mod connection;
mod device;
mod group;

pub use connection::{Connection, Endpoint};
pub use device::{Device, DeviceKind, Port, Status};
pub use group::Group;

use kurbo::{Point, Rect};
use uuid::Uuid;

/// Identifier of a device.
pub type DeviceId = String;
/// Identifier of a port, unique within its device.
pub type PortId = String;
/// Identifier of a connection.
pub type ConnectionId = String;
/// Identifier of a group.
pub type GroupId = String;

/// Generate a fresh element id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Common trait for elements that occupy a rectangle on the canvas.
pub trait Spatial {
    /// Bounding box in world coordinates.
    fn bounds(&self) -> Rect;

    /// Check if a point (in world coordinates) hits this element.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    /// Center of the bounding box.
    fn center(&self) -> Point {
        self.bounds().center()
    }
}

/// Reference to a selectable element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ItemRef {
    Device(DeviceId),
    Connection(ConnectionId),
    Group(GroupId),
}

impl ItemRef {
    /// The referenced element's id.
    pub fn id(&self) -> &str {
        match self {
            ItemRef::Device(id) | ItemRef::Connection(id) | ItemRef::Group(id) => id,
        }
    }
}
