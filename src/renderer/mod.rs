//! Rendering module
//!
//! The game draws through `DrawSurface`, a tiny canvas-like API in stage pixel
//! coordinates (origin top-left, y down). `VertexBatch` records those calls as
//! triangles and `RenderState` hands them to WebGPU.

use glam::Vec2;

pub mod batch;
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use batch::VertexBatch;
pub use pipeline::RenderState;
pub use scene::{draw_entity, draw_state};

/// Drawing primitives the game needs
pub trait DrawSurface {
    /// Stage dimensions (pixels)
    fn stage_size(&self) -> Vec2;

    /// Reset a rectangle to the background
    fn clear_rect(&mut self, origin: Vec2, size: Vec2);

    /// Fill a rectangle with the draw color
    fn fill_rect(&mut self, origin: Vec2, size: Vec2);

    /// Fill a closed three-point path with the draw color
    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2);
}
