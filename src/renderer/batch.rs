//! CPU-side triangle list implementing `DrawSurface`

use glam::Vec2;

use super::DrawSurface;
use super::shapes;
use super::vertex::{Vertex, colors};

/// One frame's worth of triangles in stage coordinates
#[derive(Debug, Clone)]
pub struct VertexBatch {
    stage: Vec2,
    vertices: Vec<Vertex>,
}

impl VertexBatch {
    pub fn new(stage: Vec2) -> Self {
        Self {
            stage,
            vertices: Vec::with_capacity(2048),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    fn covers_stage(&self, origin: Vec2, size: Vec2) -> bool {
        origin.x <= 0.0
            && origin.y <= 0.0
            && origin.x + size.x >= self.stage.x
            && origin.y + size.y >= self.stage.y
    }
}

impl DrawSurface for VertexBatch {
    fn stage_size(&self) -> Vec2 {
        self.stage
    }

    fn clear_rect(&mut self, origin: Vec2, size: Vec2) {
        // The pass clears to the background, so a full clear just drops geometry
        if self.covers_stage(origin, size) {
            self.vertices.clear();
        } else {
            self.vertices.extend(shapes::rect(origin, size, colors::BACKGROUND));
        }
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2) {
        self.vertices.extend(shapes::rect(origin, size, colors::DRAW));
    }

    fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
        self.vertices.extend(shapes::triangle(a, b, c, colors::DRAW));
    }
}
