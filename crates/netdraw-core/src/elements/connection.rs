//! Port-to-port connections.

use super::{ConnectionId, DeviceId, PortId};

/// One end of a connection: a device and one of its ports, by id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub device_id: DeviceId,
    pub port_id: PortId,
}

impl Endpoint {
    pub fn new(device_id: impl Into<DeviceId>, port_id: impl Into<PortId>) -> Self {
        Self {
            device_id: device_id.into(),
            port_id: port_id.into(),
        }
    }
}

/// A link between two device ports.
///
/// Both ends are weak references; the connection owns neither device nor port.
#[derive(Debug, Clone, PartialEq)]
pub struct Connection {
    pub id: ConnectionId,
    pub source: Endpoint,
    pub target: Endpoint,
    /// Optional bandwidth label shown at the link midpoint.
    pub bandwidth: Option<String>,
}

impl Connection {
    pub fn new(id: impl Into<ConnectionId>, source: Endpoint, target: Endpoint) -> Self {
        Self {
            id: id.into(),
            source,
            target,
            bandwidth: None,
        }
    }

    /// Set the bandwidth label.
    pub fn with_bandwidth(mut self, bandwidth: impl Into<String>) -> Self {
        self.bandwidth = Some(bandwidth.into());
        self
    }

    /// Whether either end references the device.
    pub fn touches_device(&self, device_id: &str) -> bool {
        self.source.device_id == device_id || self.target.device_id == device_id
    }

    /// Whether either end references the given port of the device.
    pub fn touches_port(&self, device_id: &str, port_id: &str) -> bool {
        let hits = |e: &Endpoint| e.device_id == device_id && e.port_id == port_id;
        hits(&self.source) || hits(&self.target)
    }

    /// Whether both ends name the same device.
    pub fn is_self_loop(&self) -> bool {
        self.source.device_id == self.target.device_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touches() {
        let conn = Connection::new("c1", Endpoint::new("a", "p0"), Endpoint::new("b", "p1"));
        assert!(conn.touches_device("a"));
        assert!(conn.touches_device("b"));
        assert!(!conn.touches_device("c"));
        assert!(conn.touches_port("b", "p1"));
        assert!(!conn.touches_port("b", "p0"));
        assert!(!conn.is_self_loop());
    }
}
