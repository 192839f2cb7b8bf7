//! Collision detection and removal
//!
//! Axis-aligned boxes, open-interval overlap: boxes that merely touch do not
//! collide. Any overlapping pair removes both entities, and anything whose
//! center has left the stage is removed in the same pass.

use std::collections::HashSet;

use glam::Vec2;

use super::entity::{Entity, EntityId};
use super::registry::Registry;
use super::state::GameEvent;

/// Check whether two distinct entities overlap
pub fn is_colliding(a: &Entity, b: &Entity) -> bool {
    if a.id == b.id {
        return false;
    }
    boxes_overlap(a.center, a.half_size(), b.center, b.half_size())
}

/// Strict box overlap test on centers and half extents
#[inline]
pub fn boxes_overlap(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    !(a_center.x + a_half.x <= b_center.x - b_half.x
        || a_center.x - a_half.x >= b_center.x + b_half.x
        || a_center.y + a_half.y <= b_center.y - b_half.y
        || a_center.y - a_half.y >= b_center.y + b_half.y)
}

/// Check whether an entity's center lies on the stage (edges included)
#[inline]
pub fn in_bounds(entity: &Entity, stage: Vec2) -> bool {
    entity.center.x >= 0.0
        && entity.center.x <= stage.x
        && entity.center.y >= 0.0
        && entity.center.y <= stage.y
}

/// Ids of every live entity that collides with another or is off stage
pub fn find_doomed(entities: &[Entity], stage: Vec2) -> HashSet<EntityId> {
    entities
        .iter()
        .filter(|a| !in_bounds(a, stage) || entities.iter().any(|b| is_colliding(a, b)))
        .map(|a| a.id)
        .collect()
}

/// Remove colliding and off-stage entities, running each destroy hook once
///
/// Returns the events raised by the destroy hooks.
pub fn resolve_collisions(registry: &mut Registry, stage: Vec2) -> Vec<GameEvent> {
    let doomed = find_doomed(registry.as_slice(), stage);
    if doomed.is_empty() {
        return Vec::new();
    }

    registry
        .remove_matching(|e| doomed.contains(&e.id))
        .into_iter()
        .filter_map(|mut entity| entity.destroy())
        .collect()
}
