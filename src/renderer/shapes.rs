//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Two triangles covering an axis-aligned rectangle
pub fn rect(origin: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let min = origin;
    let max = origin + size;

    [
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// A single filled triangle
pub fn triangle(a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) -> [Vertex; 3] {
    [
        Vertex::new(a.x, a.y, color),
        Vertex::new(b.x, b.y, color),
        Vertex::new(c.x, c.y, color),
    ]
}

/// Map stage pixels (origin top-left, y down) to normalized device coordinates
#[inline]
pub fn stage_to_ndc(pos: [f32; 2], stage: Vec2) -> [f32; 2] {
    [pos[0] / stage.x * 2.0 - 1.0, 1.0 - pos[1] / stage.y * 2.0]
}
