//! Error types for topology mutations and persistence.

use thiserror::Error;

/// Errors raised by the spatial model and the persistence layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError {
    #[error("Duplicate id: {0}")]
    DuplicateId(String),
    #[error("Unknown device: {0}")]
    UnknownDevice(String),
    #[error("Unknown port {port_id} on device {device_id}")]
    UnknownPort { device_id: String, port_id: String },
    #[error("Unknown group: {0}")]
    UnknownGroup(String),
    #[error("Connection would link device {0} to itself")]
    SelfLoop(String),
    #[error("Invalid size: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("Save failed: {0}")]
    SaveFailed(String),
    #[error("Load failed: {0}")]
    LoadFailed(String),
}

/// Result type for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;
