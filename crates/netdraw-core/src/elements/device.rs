//! Devices and their ports.

use super::{DeviceId, PortId, Spatial};
use kurbo::{Point, Rect, Size};

/// Kind of network equipment a device represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceKind {
    Router,
    Switch,
    Firewall,
    Server,
    #[default]
    Generic,
}

impl DeviceKind {
    /// Parse the document's `type` string. Unknown kinds read as `Generic`.
    pub fn from_wire(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "router" => DeviceKind::Router,
            "switch" => DeviceKind::Switch,
            "firewall" => DeviceKind::Firewall,
            "server" => DeviceKind::Server,
            _ => DeviceKind::Generic,
        }
    }

    /// The document's `type` string.
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceKind::Router => "router",
            DeviceKind::Switch => "switch",
            DeviceKind::Firewall => "firewall",
            DeviceKind::Server => "server",
            DeviceKind::Generic => "generic",
        }
    }
}

/// Operational status of a device or port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    #[default]
    Up,
    Down,
    Alarm,
}

impl Status {
    /// Parse a status string. Anything unrecognised reads as `Down`.
    pub fn from_wire(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "up" => Status::Up,
            "alarm" => Status::Alarm,
            _ => Status::Down,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Up => "up",
            Status::Down => "down",
            Status::Alarm => "alarm",
        }
    }
}

/// A named attachment point on a device.
#[derive(Debug, Clone, PartialEq)]
pub struct Port {
    pub id: PortId,
    pub name: String,
    /// Free-form bandwidth label, e.g. "10G".
    pub bandwidth: String,
    pub status: Status,
}

impl Port {
    /// Create a port that is up and has no bandwidth label.
    pub fn new(id: impl Into<PortId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bandwidth: String::new(),
            status: Status::Up,
        }
    }

    /// Set the bandwidth label.
    pub fn with_bandwidth(mut self, bandwidth: impl Into<String>) -> Self {
        self.bandwidth = bandwidth.into();
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }
}

/// A topology node representing network equipment.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub id: DeviceId,
    pub kind: DeviceKind,
    /// Display name.
    pub name: String,
    /// Top-left corner position.
    pub position: Point,
    pub size: Size,
    /// Ports in layout order. Index parity picks the side, index / 2 the row.
    pub ports: Vec<Port>,
    pub status: Status,
}

impl Device {
    /// Default device footprint.
    pub const DEFAULT_SIZE: Size = Size::new(120.0, 60.0);

    /// Create a device without ports.
    pub fn new(id: impl Into<DeviceId>, kind: DeviceKind, name: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.into(),
            position,
            size: Self::DEFAULT_SIZE,
            ports: Vec::new(),
            status: Status::Up,
        }
    }

    /// Set the size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Size::new(width, height);
        self
    }

    /// Append a port.
    pub fn with_port(mut self, port: Port) -> Self {
        self.ports.push(port);
        self
    }

    /// Set the status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Index of a port in layout order.
    pub fn port_index(&self, port_id: &str) -> Option<usize> {
        self.ports.iter().position(|p| p.id == port_id)
    }

    /// Look up a port by id.
    pub fn port(&self, port_id: &str) -> Option<&Port> {
        self.ports.iter().find(|p| p.id == port_id)
    }

    /// Whether this device has a port with the given id.
    pub fn has_port(&self, port_id: &str) -> bool {
        self.port_index(port_id).is_some()
    }

    /// Number of port rows (two ports per row, one on each side).
    pub fn port_rows(&self) -> usize {
        self.ports.len().div_ceil(2)
    }

    /// First duplicated port id, if any.
    pub(crate) fn duplicate_port_id(&self) -> Option<&str> {
        self.ports
            .iter()
            .enumerate()
            .find(|(i, p)| self.ports[..*i].iter().any(|q| q.id == p.id))
            .map(|(_, p)| p.id.as_str())
    }
}

impl Spatial for Device {
    fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.position, self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(DeviceKind::from_wire("router"), DeviceKind::Router);
        assert_eq!(DeviceKind::from_wire("Switch"), DeviceKind::Switch);
        assert_eq!(DeviceKind::from_wire("toaster"), DeviceKind::Generic);
        assert_eq!(DeviceKind::Firewall.as_str(), "firewall");
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(Status::from_wire("up"), Status::Up);
        assert_eq!(Status::from_wire("ALARM"), Status::Alarm);
        assert_eq!(Status::from_wire(""), Status::Down);
    }

    #[test]
    fn test_port_lookup() {
        let device = Device::new("r1", DeviceKind::Router, "core", Point::ZERO)
            .with_port(Port::new("p0", "ge-0/0/0"))
            .with_port(Port::new("p1", "ge-0/0/1"))
            .with_port(Port::new("p2", "ge-0/0/2"));

        assert_eq!(device.port_index("p2"), Some(2));
        assert!(device.port("missing").is_none());
        assert_eq!(device.port_rows(), 2);
        assert!(device.duplicate_port_id().is_none());
    }

    #[test]
    fn test_duplicate_port_detection() {
        let device = Device::new("r1", DeviceKind::Router, "core", Point::ZERO)
            .with_port(Port::new("p0", "a"))
            .with_port(Port::new("p0", "b"));
        assert_eq!(device.duplicate_port_id(), Some("p0"));
    }

    #[test]
    fn test_bounds_and_hit() {
        let device = Device::new("s1", DeviceKind::Switch, "edge", Point::new(10.0, 20.0)).with_size(100.0, 50.0);
        let bounds = device.bounds();
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
        assert!(device.hit_test(Point::new(50.0, 40.0), 0.0));
        assert!(!device.hit_test(Point::new(115.0, 40.0), 0.0));
        assert!(device.hit_test(Point::new(115.0, 40.0), 6.0));
    }
}
