//! netdraw Core Library
//!
//! Platform-agnostic data model, geometry and interaction logic for the
//! netdraw network topology editor.

pub mod config;
pub mod document;
pub mod editor;
pub mod elements;
pub mod error;
pub mod fixtures;
pub mod geometry;
pub mod input;
pub mod interaction;
pub mod model;
pub mod storage;
pub mod view;

pub use config::{ConfigError, EditorConfig, LinkStyle};
pub use document::{LoadReport, TopologyDocument};
pub use editor::TopologyEditor;
pub use elements::{Connection, Device, DeviceKind, Endpoint, Group, ItemRef, Port, Spatial, Status};
pub use error::{TopologyError, TopologyResult};
pub use geometry::{ConnectionCurve, StraightLink};
pub use input::{KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use interaction::{InteractionController, InteractionMode, InteractionOutcome};
pub use model::{Hit, TopologyModel};
pub use storage::{FileStorage, MemoryStorage, Notice, NoticeLevel, Storage, StorageError, TopologySession};
pub use view::CanvasView;
