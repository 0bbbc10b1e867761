//! Pointer-driven editing: selection, dragging, resizing and link drafting.

mod controller;
mod mode;

pub use controller::{InteractionController, InteractionOutcome};
pub use mode::{DragState, DragTarget, InteractionMode, LinkDraft, ResizeState};
