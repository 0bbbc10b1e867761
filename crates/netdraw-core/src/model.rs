//! The in-memory topology: devices, connections, groups and the canvas view.

use crate::config::{EditorConfig, LinkStyle};
use crate::elements::{
    Connection, ConnectionId, Device, Endpoint, Group, ItemRef, Port, Spatial, Status, new_id,
};
use crate::error::{TopologyError, TopologyResult};
use crate::geometry::{self, ConnectionCurve};
use crate::view::CanvasView;
use kurbo::{Point, Rect, Size, Vec2};

/// What lies under a point, front-most first.
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    Port(Endpoint),
    Device(String),
    ResizeHandle(String),
    Connection(String),
    Group(String),
}

impl Hit {
    /// The selectable element behind this hit. Ports select their device.
    pub fn item(&self) -> ItemRef {
        match self {
            Hit::Port(endpoint) => ItemRef::Device(endpoint.device_id.clone()),
            Hit::Device(id) => ItemRef::Device(id.clone()),
            Hit::ResizeHandle(id) | Hit::Group(id) => ItemRef::Group(id.clone()),
            Hit::Connection(id) => ItemRef::Connection(id.clone()),
        }
    }
}

/// The spatial model.
///
/// Devices, connections and groups are kept in insertion order, which is also
/// their paint order within each layer and their order in saved documents.
#[derive(Debug, Clone)]
pub struct TopologyModel {
    devices: Vec<Device>,
    connections: Vec<Connection>,
    groups: Vec<Group>,
    /// Canvas zoom/pan.
    pub view: CanvasView,
    min_group_size: f64,
    resize_handle_size: f64,
    port_hit_radius: f64,
    link_style: LinkStyle,
}

impl Default for TopologyModel {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl TopologyModel {
    /// Create an empty model.
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            devices: Vec::new(),
            connections: Vec::new(),
            groups: Vec::new(),
            view: CanvasView::with_scale_range(config.min_scale, config.max_scale),
            min_group_size: config.min_group_size,
            resize_handle_size: config.resize_handle_size,
            port_hit_radius: config.port_hit_radius,
            link_style: config.link_style,
        }
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn min_group_size(&self) -> f64 {
        self.min_group_size
    }

    pub fn resize_handle_size(&self) -> f64 {
        self.resize_handle_size
    }

    /// How connections are drawn and hit-tested.
    pub fn link_style(&self) -> LinkStyle {
        self.link_style
    }

    pub fn set_link_style(&mut self, style: LinkStyle) {
        self.link_style = style;
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.id == id)
    }

    fn device_mut(&mut self, id: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|d| d.id == id)
    }

    pub fn connection(&self, id: &str) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    fn group_mut(&mut self, id: &str) -> Option<&mut Group> {
        self.groups.iter_mut().find(|g| g.id == id)
    }

    /// Whether the referenced element exists.
    pub fn contains(&self, item: &ItemRef) -> bool {
        match item {
            ItemRef::Device(id) => self.device(id).is_some(),
            ItemRef::Connection(id) => self.connection(id).is_some(),
            ItemRef::Group(id) => self.group(id).is_some(),
        }
    }

    /// Check if the model is empty.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty() && self.groups.is_empty()
    }

    /// Remove everything and reset the view.
    pub fn clear(&mut self) {
        self.devices.clear();
        self.connections.clear();
        self.groups.clear();
        self.view.reset();
    }

    // --- Devices ---

    /// Add a device. Fails on a duplicate device id or duplicate port ids.
    pub fn add_device(&mut self, device: Device) -> TopologyResult<()> {
        if self.device(&device.id).is_some() {
            return Err(TopologyError::DuplicateId(device.id));
        }
        if let Some(port_id) = device.duplicate_port_id() {
            return Err(TopologyError::DuplicateId(format!("{}/{}", device.id, port_id)));
        }
        log::debug!("Adding device {}", device.id);
        self.devices.push(device);
        Ok(())
    }

    /// Move a device's top-left corner.
    pub fn move_device(&mut self, id: &str, position: Point) -> TopologyResult<()> {
        let device = self
            .device_mut(id)
            .ok_or_else(|| TopologyError::UnknownDevice(id.to_string()))?;
        device.position = position;
        Ok(())
    }

    /// Delete a device and every connection referencing it.
    /// Returns the removed device, or `None` if it was already gone.
    pub fn delete_device(&mut self, id: &str) -> Option<Device> {
        let index = self.devices.iter().position(|d| d.id == id)?;
        let device = self.devices.remove(index);
        let before = self.connections.len();
        self.connections.retain(|c| !c.touches_device(id));
        log::debug!(
            "Deleted device {} and {} attached connection(s)",
            id,
            before - self.connections.len()
        );
        Some(device)
    }

    /// Update a device's status.
    pub fn set_device_status(&mut self, id: &str, status: Status) -> TopologyResult<()> {
        let device = self
            .device_mut(id)
            .ok_or_else(|| TopologyError::UnknownDevice(id.to_string()))?;
        device.status = status;
        Ok(())
    }

    /// Append a port to a device.
    pub fn add_port(&mut self, device_id: &str, port: Port) -> TopologyResult<()> {
        let device = self
            .device_mut(device_id)
            .ok_or_else(|| TopologyError::UnknownDevice(device_id.to_string()))?;
        if device.has_port(&port.id) {
            return Err(TopologyError::DuplicateId(format!("{}/{}", device_id, port.id)));
        }
        device.ports.push(port);
        Ok(())
    }

    /// Remove a port and every connection using it.
    pub fn remove_port(&mut self, device_id: &str, port_id: &str) -> TopologyResult<Port> {
        let device = self
            .device_mut(device_id)
            .ok_or_else(|| TopologyError::UnknownDevice(device_id.to_string()))?;
        let index = device.port_index(port_id).ok_or_else(|| TopologyError::UnknownPort {
            device_id: device_id.to_string(),
            port_id: port_id.to_string(),
        })?;
        let port = device.ports.remove(index);
        self.connections.retain(|c| !c.touches_port(device_id, port_id));
        Ok(port)
    }

    // --- Connections ---

    /// Link two ports on different devices. Returns the new connection's id.
    ///
    /// Ports may already carry other connections; fan-out is allowed.
    pub fn add_connection(
        &mut self,
        source: Endpoint,
        target: Endpoint,
        bandwidth: Option<String>,
    ) -> TopologyResult<ConnectionId> {
        let mut connection = Connection::new(new_id(), source, target);
        connection.bandwidth = bandwidth;
        let id = connection.id.clone();
        self.insert_connection(connection)?;
        Ok(id)
    }

    /// Insert a connection that already carries an id.
    pub fn insert_connection(&mut self, connection: Connection) -> TopologyResult<()> {
        if connection.is_self_loop() {
            return Err(TopologyError::SelfLoop(connection.source.device_id));
        }
        for endpoint in [&connection.source, &connection.target] {
            if self.device(&endpoint.device_id).is_none() {
                return Err(TopologyError::UnknownDevice(endpoint.device_id.clone()));
            }
        }
        if self.connection(&connection.id).is_some() {
            return Err(TopologyError::DuplicateId(connection.id));
        }
        log::debug!(
            "Linking {}:{} -> {}:{}",
            connection.source.device_id,
            connection.source.port_id,
            connection.target.device_id,
            connection.target.port_id
        );
        self.connections.push(connection);
        Ok(())
    }

    /// Remove a connection. Idempotent.
    pub fn delete_connection(&mut self, id: &str) -> Option<Connection> {
        let index = self.connections.iter().position(|c| c.id == id)?;
        Some(self.connections.remove(index))
    }

    /// Whether both ends of a connection resolve to an existing device and port.
    pub fn resolves(&self, connection: &Connection) -> bool {
        let resolves = |e: &Endpoint| self.device(&e.device_id).is_some_and(|d| d.has_port(&e.port_id));
        resolves(&connection.source) && resolves(&connection.target)
    }

    /// Drop connections whose device or port no longer exists.
    pub fn prune_dangling(&mut self) -> Vec<Connection> {
        let (kept, dropped): (Vec<_>, Vec<_>) = std::mem::take(&mut self.connections)
            .into_iter()
            .partition(|c| self.resolves(c));
        self.connections = kept;
        for connection in &dropped {
            log::warn!("Dropping dangling connection {}", connection.id);
        }
        dropped
    }

    /// Port anchors of both ends, or `None` if either device is missing.
    pub fn connection_anchors(&self, connection: &Connection) -> Option<(Point, Point)> {
        let source = self.device(&connection.source.device_id)?;
        let target = self.device(&connection.target.device_id)?;
        Some((
            geometry::port_anchor(source, &connection.source.port_id),
            geometry::port_anchor(target, &connection.target.port_id),
        ))
    }

    /// Curve for a connection, derived from the current device layout.
    pub fn connection_curve(&self, connection: &Connection) -> Option<ConnectionCurve> {
        self.connection_anchors(connection)
            .map(|(source, target)| geometry::connection_curve(source, target))
    }

    /// Whether a point lies within `tolerance` of a connection as currently drawn.
    pub fn connection_hit(&self, connection: &Connection, point: Point, tolerance: f64) -> bool {
        match self.link_style {
            LinkStyle::Curved => self
                .connection_curve(connection)
                .is_some_and(|curve| curve.hit_test(point, tolerance)),
            LinkStyle::Straight => {
                let source = self.device(&connection.source.device_id);
                let target = self.device(&connection.target.device_id);
                match (source, target) {
                    (Some(source), Some(target)) => geometry::straight_link(source, target).hit_test(point, tolerance),
                    _ => false,
                }
            }
        }
    }

    // --- Groups ---

    /// Add a group. Non-positive sizes are rejected; small ones are raised to
    /// the minimum size.
    pub fn add_group(&mut self, mut group: Group) -> TopologyResult<()> {
        if self.group(&group.id).is_some() {
            return Err(TopologyError::DuplicateId(group.id));
        }
        group.size = self.validate_group_size(group.size.width, group.size.height)?;
        self.groups.push(group);
        Ok(())
    }

    pub fn move_group(&mut self, id: &str, position: Point) -> TopologyResult<()> {
        let group = self
            .group_mut(id)
            .ok_or_else(|| TopologyError::UnknownGroup(id.to_string()))?;
        group.position = position;
        Ok(())
    }

    /// Resize a group, clamping to the minimum size. Returns the applied size.
    pub fn resize_group(&mut self, id: &str, width: f64, height: f64) -> TopologyResult<Size> {
        let size = self.validate_group_size(width, height)?;
        let group = self
            .group_mut(id)
            .ok_or_else(|| TopologyError::UnknownGroup(id.to_string()))?;
        group.size = size;
        Ok(size)
    }

    /// Delete a group. Devices inside it are untouched.
    pub fn delete_group(&mut self, id: &str) -> Option<Group> {
        let index = self.groups.iter().position(|g| g.id == id)?;
        Some(self.groups.remove(index))
    }

    fn validate_group_size(&self, width: f64, height: f64) -> TopologyResult<Size> {
        if !(width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite()) {
            return Err(TopologyError::InvalidSize { width, height });
        }
        Ok(Size::new(width.max(self.min_group_size), height.max(self.min_group_size)))
    }

    /// Devices lying entirely inside a group's rectangle.
    pub fn devices_in_group(&self, group_id: &str) -> Vec<&Device> {
        let Some(group) = self.group(group_id) else {
            return Vec::new();
        };
        self.devices.iter().filter(|d| group.encloses(d.bounds())).collect()
    }

    // --- View ---

    /// Set zoom and pan; the scale is clamped to the configured range.
    pub fn set_canvas_view(&mut self, scale: f64, pan: Vec2) {
        self.view.set(scale, pan);
    }

    // --- Queries ---

    /// Bounding box of all devices and groups.
    pub fn bounds(&self) -> Option<Rect> {
        self.devices
            .iter()
            .map(Spatial::bounds)
            .chain(self.groups.iter().map(Spatial::bounds))
            .reduce(|a, b| a.union(b))
    }

    /// Find the front-most element at a world point.
    ///
    /// Priority follows paint order: ports, devices, group resize handles,
    /// connections, then group bodies.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> Option<Hit> {
        let port_radius = self.port_hit_radius.max(tolerance);
        for device in self.devices.iter().rev() {
            for (index, port) in device.ports.iter().enumerate() {
                let anchor = geometry::port_anchor_at(device, index);
                if anchor.distance(point) <= port_radius {
                    return Some(Hit::Port(Endpoint::new(device.id.clone(), port.id.clone())));
                }
            }
        }

        if let Some(device) = self.devices.iter().rev().find(|d| d.hit_test(point, 0.0)) {
            return Some(Hit::Device(device.id.clone()));
        }

        if let Some(group) = self
            .groups
            .iter()
            .rev()
            .find(|g| g.resize_handle(self.resize_handle_size).contains(point))
        {
            return Some(Hit::ResizeHandle(group.id.clone()));
        }

        if let Some(connection) = self
            .connections
            .iter()
            .rev()
            .find(|c| self.connection_hit(c, point, tolerance))
        {
            return Some(Hit::Connection(connection.id.clone()));
        }

        self.groups
            .iter()
            .rev()
            .find(|g| g.hit_test(point, 0.0))
            .map(|g| Hit::Group(g.id.clone()))
    }
}
