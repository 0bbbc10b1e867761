//! Wire format for saved topologies.
//!
//! [`TopologyDocument`] mirrors the JSON exchanged with the backend. Reading is
//! tolerant: anything that would break a model invariant is dropped with a
//! warning and counted in the [`LoadReport`] instead of failing the load.

use crate::config::EditorConfig;
use crate::elements::{Connection, Device, DeviceKind, Endpoint, Group, Port, Status};
use crate::error::{TopologyError, TopologyResult};
use crate::model::TopologyModel;
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A saved topology.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyDocument {
    #[serde(default)]
    pub devices: Vec<DeviceRecord>,
    #[serde(default)]
    pub connections: Vec<ConnectionRecord>,
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
    #[serde(default)]
    pub canvas: CanvasRecord,
    /// RFC 3339 UTC time of serialization.
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRecord {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub device_name: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "default_device_width")]
    pub width: f64,
    #[serde(default = "default_device_height")]
    pub height: f64,
    #[serde(default)]
    pub ports: Vec<PortRecord>,
    #[serde(default)]
    pub status: String,
}

fn default_device_width() -> f64 {
    Device::DEFAULT_SIZE.width
}

fn default_device_height() -> f64 {
    Device::DEFAULT_SIZE.height
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bandwidth: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionRecord {
    pub id: String,
    pub source: EndpointRecord,
    pub target: EndpointRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointRecord {
    pub device_id: String,
    pub port_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Saved zoom and pan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasRecord {
    pub scale: f64,
    pub position: PositionRecord,
}

impl Default for CanvasRecord {
    fn default() -> Self {
        Self {
            scale: 1.0,
            position: PositionRecord { x: 0.0, y: 0.0 },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub x: f64,
    pub y: f64,
}

/// What a tolerant load had to leave out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub skipped_devices: Vec<String>,
    pub skipped_ports: Vec<String>,
    pub skipped_groups: Vec<String>,
    pub dropped_connections: Vec<String>,
}

impl LoadReport {
    /// True if the document loaded without losing anything.
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Number of records left out.
    pub fn total(&self) -> usize {
        self.skipped_devices.len() + self.skipped_ports.len() + self.skipped_groups.len() + self.dropped_connections.len()
    }
}

impl From<&Device> for DeviceRecord {
    fn from(device: &Device) -> Self {
        Self {
            id: device.id.clone(),
            kind: device.kind.as_str().to_string(),
            device_name: device.name.clone(),
            x: device.position.x,
            y: device.position.y,
            width: device.size.width,
            height: device.size.height,
            ports: device
                .ports
                .iter()
                .map(|port| PortRecord {
                    id: port.id.clone(),
                    name: port.name.clone(),
                    bandwidth: port.bandwidth.clone(),
                    status: port.status.as_str().to_string(),
                })
                .collect(),
            status: device.status.as_str().to_string(),
        }
    }
}

impl From<&Connection> for ConnectionRecord {
    fn from(connection: &Connection) -> Self {
        let endpoint = |e: &Endpoint| EndpointRecord {
            device_id: e.device_id.clone(),
            port_id: e.port_id.clone(),
        };
        Self {
            id: connection.id.clone(),
            source: endpoint(&connection.source),
            target: endpoint(&connection.target),
            bandwidth: connection.bandwidth.clone(),
        }
    }
}

impl From<&Group> for GroupRecord {
    fn from(group: &Group) -> Self {
        Self {
            id: group.id.clone(),
            name: group.name.clone(),
            x: group.position.x,
            y: group.position.y,
            width: group.size.width,
            height: group.size.height,
        }
    }
}

impl From<&EndpointRecord> for Endpoint {
    fn from(record: &EndpointRecord) -> Self {
        Endpoint::new(record.device_id.clone(), record.port_id.clone())
    }
}

/// Snapshot the model into a document stamped with the current UTC time.
pub fn serialize(model: &TopologyModel) -> TopologyDocument {
    TopologyDocument {
        devices: model.devices().iter().map(DeviceRecord::from).collect(),
        connections: model.connections().iter().map(ConnectionRecord::from).collect(),
        groups: model.groups().iter().map(GroupRecord::from).collect(),
        canvas: CanvasRecord {
            scale: model.view.scale(),
            position: PositionRecord {
                x: model.view.pan.x,
                y: model.view.pan.y,
            },
        },
        timestamp: chrono::Utc::now().to_rfc3339(),
    }
}

/// Build a model from a document, skipping records that violate invariants.
pub fn deserialize(document: &TopologyDocument, config: &EditorConfig) -> (TopologyModel, LoadReport) {
    let mut model = TopologyModel::new(config);
    let mut report = LoadReport::default();

    for record in &document.devices {
        let device = device_from_record(record, &mut report);
        let id = device.id.clone();
        if let Err(err) = model.add_device(device) {
            log::warn!("Skipping device {}: {}", id, err);
            report.skipped_devices.push(id);
        }
    }

    for record in &document.groups {
        let group = Group::new(
            record.id.clone(),
            record.name.clone(),
            Point::new(record.x, record.y),
            Size::new(record.width, record.height),
        );
        if let Err(err) = model.add_group(group) {
            log::warn!("Skipping group {}: {}", record.id, err);
            report.skipped_groups.push(record.id.clone());
        }
    }

    let mut seen = HashSet::new();
    for record in &document.connections {
        let connection = Connection {
            id: record.id.clone(),
            source: Endpoint::from(&record.source),
            target: Endpoint::from(&record.target),
            bandwidth: record.bandwidth.clone(),
        };
        if !seen.insert(record.id.clone()) {
            log::warn!("Dropping connection {}: duplicate id", record.id);
            report.dropped_connections.push(record.id.clone());
            continue;
        }
        if !model.resolves(&connection) {
            log::warn!("Dropping dangling connection {}", record.id);
            report.dropped_connections.push(record.id.clone());
            continue;
        }
        if let Err(err) = model.insert_connection(connection) {
            log::warn!("Dropping connection {}: {}", record.id, err);
            report.dropped_connections.push(record.id.clone());
        }
    }

    let canvas = &document.canvas;
    model.set_canvas_view(canvas.scale, Vec2::new(canvas.position.x, canvas.position.y));

    if !report.is_clean() {
        log::warn!("Loaded topology with {} record(s) left out", report.total());
    }
    (model, report)
}

fn device_from_record(record: &DeviceRecord, report: &mut LoadReport) -> Device {
    let size = if record.width > 0.0 && record.height > 0.0 && record.width.is_finite() && record.height.is_finite() {
        Size::new(record.width, record.height)
    } else {
        log::warn!("Device {} has invalid size, using default", record.id);
        Device::DEFAULT_SIZE
    };

    let mut port_ids = HashSet::new();
    let mut ports = Vec::with_capacity(record.ports.len());
    for port in &record.ports {
        if !port_ids.insert(port.id.as_str()) {
            log::warn!("Skipping duplicate port {} on device {}", port.id, record.id);
            report.skipped_ports.push(format!("{}/{}", record.id, port.id));
            continue;
        }
        ports.push(
            Port::new(port.id.clone(), port.name.clone())
                .with_bandwidth(port.bandwidth.clone())
                .with_status(Status::from_wire(&port.status)),
        );
    }

    Device {
        id: record.id.clone(),
        kind: DeviceKind::from_wire(&record.kind),
        name: record.device_name.clone(),
        position: Point::new(record.x, record.y),
        size,
        ports,
        status: Status::from_wire(&record.status),
    }
}

impl TopologyDocument {
    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> TopologyResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| TopologyError::SaveFailed(e.to_string()))
    }

    /// Parse from JSON. Malformed input is a `LoadFailed` error.
    pub fn from_json(json: &str) -> TopologyResult<Self> {
        serde_json::from_str(json).map_err(|e| TopologyError::LoadFailed(e.to_string()))
    }
}
