//! Drawing the simulation onto a `DrawSurface`

use glam::Vec2;

use super::DrawSurface;
use crate::sim::{Entity, EntityKind, GameState};

/// Clear the stage and draw every live entity in registry order
pub fn draw_state(state: &GameState, surface: &mut impl DrawSurface) {
    let stage = surface.stage_size();
    surface.clear_rect(Vec2::ZERO, stage);

    for entity in state.registry.iter() {
        draw_entity(entity, surface);
    }
}

/// Player is an upward-pointing triangle; everything else is its box
pub fn draw_entity(entity: &Entity, surface: &mut impl DrawSurface) {
    let half = entity.half_size();
    let center = entity.center;

    match entity.kind {
        EntityKind::Player(_) => surface.fill_triangle(
            Vec2::new(center.x, center.y - half.y),
            Vec2::new(center.x - half.x, center.y + half.y),
            Vec2::new(center.x + half.x, center.y + half.y),
        ),
        EntityKind::Invader(_) | EntityKind::Bullet { .. } | EntityKind::ShieldBit => {
            surface.fill_rect(center - half, entity.size)
        }
    }
}
