//! netdraw Render Library
//!
//! Projects a topology model and the editor's interaction state into an
//! ordered display list that a host toolkit paints.

mod renderer;
mod theme;

pub use renderer::{
    DrawCommand, Layer, Primitive, RenderContext, Renderer, Scene, SceneRenderer, build_scene,
};
pub use theme::Theme;
