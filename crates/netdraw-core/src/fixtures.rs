//! Sample topology for development and tests.

use crate::document::{
    CanvasRecord, ConnectionRecord, DeviceRecord, EndpointRecord, GroupRecord, PortRecord, TopologyDocument,
};

fn port(id: &str, name: &str, bandwidth: &str) -> PortRecord {
    PortRecord {
        id: id.to_string(),
        name: name.to_string(),
        bandwidth: bandwidth.to_string(),
        status: "up".to_string(),
    }
}

fn device(id: &str, kind: &str, name: &str, x: f64, y: f64, ports: Vec<PortRecord>, status: &str) -> DeviceRecord {
    DeviceRecord {
        id: id.to_string(),
        kind: kind.to_string(),
        device_name: name.to_string(),
        x,
        y,
        width: 120.0,
        height: 80.0,
        ports,
        status: status.to_string(),
    }
}

fn link(id: &str, from: (&str, &str), to: (&str, &str), bandwidth: Option<&str>) -> ConnectionRecord {
    let endpoint = |(device_id, port_id): (&str, &str)| EndpointRecord {
        device_id: device_id.to_string(),
        port_id: port_id.to_string(),
    };
    ConnectionRecord {
        id: id.to_string(),
        source: endpoint(from),
        target: endpoint(to),
        bandwidth: bandwidth.map(str::to_string),
    }
}

/// A small campus network: edge router, firewall, core switch, two access
/// switches and a server, split across two rooms.
///
/// Returns a fresh document on every call.
pub fn sample_topology() -> TopologyDocument {
    let devices = vec![
        device(
            "rtr-edge",
            "router",
            "Edge Router",
            80.0,
            60.0,
            vec![port("wan0", "ge-0/0/0", "1G"), port("lan0", "ge-0/0/1", "10G")],
            "up",
        ),
        device(
            "fw-1",
            "firewall",
            "Perimeter FW",
            320.0,
            60.0,
            vec![port("outside", "eth0", "10G"), port("inside", "eth1", "10G")],
            "up",
        ),
        device(
            "sw-core",
            "switch",
            "Core Switch",
            560.0,
            60.0,
            vec![
                port("te1", "Te1/0/1", "10G"),
                port("te2", "Te1/0/2", "10G"),
                port("te3", "Te1/0/3", "10G"),
                port("te4", "Te1/0/4", "10G"),
            ],
            "up",
        ),
        device(
            "sw-acc-1",
            "switch",
            "Access 1",
            440.0,
            320.0,
            vec![port("up", "Gi1/0/48", "1G"), port("ge1", "Gi1/0/1", "1G")],
            "alarm",
        ),
        device(
            "sw-acc-2",
            "switch",
            "Access 2",
            720.0,
            320.0,
            vec![port("up", "Gi1/0/48", "1G")],
            "down",
        ),
        device(
            "srv-app",
            "server",
            "App Server",
            440.0,
            520.0,
            vec![port("nic0", "eno1", "1G")],
            "up",
        ),
    ];

    let connections = vec![
        link("c-edge-fw", ("rtr-edge", "lan0"), ("fw-1", "outside"), Some("10G")),
        link("c-fw-core", ("fw-1", "inside"), ("sw-core", "te1"), Some("10G")),
        link("c-core-acc1", ("sw-core", "te3"), ("sw-acc-1", "up"), Some("1G")),
        link("c-core-acc2", ("sw-core", "te4"), ("sw-acc-2", "up"), None),
        link("c-acc1-srv", ("sw-acc-1", "ge1"), ("srv-app", "nic0"), None),
    ];

    let groups = vec![
        GroupRecord {
            id: "room-core".to_string(),
            name: "Core Room".to_string(),
            x: 40.0,
            y: 20.0,
            width: 700.0,
            height: 180.0,
        },
        GroupRecord {
            id: "room-access".to_string(),
            name: "Access Closet".to_string(),
            x: 400.0,
            y: 280.0,
            width: 480.0,
            height: 360.0,
        },
    ];

    TopologyDocument {
        devices,
        connections,
        groups,
        canvas: CanvasRecord::default(),
        timestamp: "2024-01-01T00:00:00+00:00".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::document::deserialize;

    #[test]
    fn test_sample_loads_cleanly() {
        let (model, report) = deserialize(&sample_topology(), &EditorConfig::default());
        assert!(report.is_clean());
        assert_eq!(model.devices().len(), 6);
        assert_eq!(model.connections().len(), 5);
        assert_eq!(model.groups().len(), 2);
    }

    #[test]
    fn test_sample_is_fresh_each_call() {
        let mut first = sample_topology();
        first.devices.clear();
        assert_eq!(sample_topology().devices.len(), 6);
    }

    #[test]
    fn test_sample_rooms_contain_devices() {
        let (model, _) = deserialize(&sample_topology(), &EditorConfig::default());
        let core: Vec<_> = model.devices_in_group("room-core").into_iter().map(|d| d.id.as_str()).collect();
        assert_eq!(core, vec!["rtr-edge", "fw-1", "sw-core"]);
        assert_eq!(model.devices_in_group("room-access").len(), 3);
    }
}
