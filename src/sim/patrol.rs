//! Invader patrol controller
//!
//! The invader group drifts as one. Each frame the leftmost and rightmost
//! survivors are looked up again; when either passes its margin the shared
//! direction flips and every invader drops a row on its next update.

use glam::Vec2;

use super::entity::EntityId;
use super::registry::Registry;
use crate::consts::{PATROL_LEFT_MARGIN, PATROL_RIGHT_MARGIN};

#[derive(Debug, Clone)]
pub struct PatrolController {
    /// +1.0 moving right, -1.0 moving left
    pub dir: f32,
    /// Leftmost surviving invader (lookup only)
    pub left_most: Option<EntityId>,
    /// Rightmost surviving invader (lookup only)
    pub right_most: Option<EntityId>,
}

impl Default for PatrolController {
    fn default() -> Self {
        Self {
            dir: 1.0,
            left_most: None,
            right_most: None,
        }
    }
}

impl PatrolController {
    /// Recompute the edge invaders from the live registry
    ///
    /// Ties keep the first invader in registry order.
    pub fn track_edges(&mut self, registry: &Registry) {
        let mut left: Option<(EntityId, f32)> = None;
        let mut right: Option<(EntityId, f32)> = None;

        for invader in registry.iter().filter(|e| e.is_invader() && !e.deleted) {
            let x = invader.center.x;
            if left.is_none_or(|(_, lx)| x < lx) {
                left = Some((invader.id, x));
            }
            if right.is_none_or(|(_, rx)| x > rx) {
                right = Some((invader.id, x));
            }
        }

        self.left_most = left.map(|(id, _)| id);
        self.right_most = right.map(|(id, _)| id);
    }

    /// Flip direction if an edge invader has passed its margin
    ///
    /// Returns true when the direction changed.
    pub fn update_dir(&mut self, registry: &Registry, stage: Vec2) -> bool {
        let edge_x = |id: Option<EntityId>| id.and_then(|id| registry.get(id)).map(|e| e.center.x);

        let (Some(left_x), Some(right_x)) = (edge_x(self.left_most), edge_x(self.right_most)) else {
            return false;
        };

        if left_x < PATROL_LEFT_MARGIN || right_x > stage.x - PATROL_RIGHT_MARGIN {
            self.dir = -self.dir;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Entity;

    const STAGE: Vec2 = Vec2::new(300.0, 300.0);

    fn registry_with(xs: &[f32]) -> (Registry, Vec<EntityId>) {
        let mut registry = Registry::new();
        let ids = xs
            .iter()
            .map(|&x| registry.add(Entity::invader(Vec2::new(x, 50.0))))
            .collect();
        registry.add(Entity::player(STAGE));
        registry.commit();
        (registry, ids)
    }

    #[test]
    fn test_track_edges() {
        let (registry, ids) = registry_with(&[120.0, 60.0, 200.0, 90.0]);
        let mut patrol = PatrolController::default();
        patrol.track_edges(&registry);
        assert_eq!(patrol.left_most, Some(ids[1]));
        assert_eq!(patrol.right_most, Some(ids[2]));
    }

    #[test]
    fn test_track_edges_ties_keep_first() {
        let (registry, ids) = registry_with(&[60.0, 60.0, 200.0, 200.0]);
        let mut patrol = PatrolController::default();
        patrol.track_edges(&registry);
        assert_eq!(patrol.left_most, Some(ids[0]));
        assert_eq!(patrol.right_most, Some(ids[2]));
    }

    #[test]
    fn test_track_edges_without_invaders() {
        let (registry, _) = registry_with(&[]);
        let mut patrol = PatrolController::default();
        patrol.track_edges(&registry);
        assert_eq!(patrol.left_most, None);
        assert_eq!(patrol.right_most, None);
        assert!(!patrol.update_dir(&registry, STAGE));
        assert_eq!(patrol.dir, 1.0);
    }

    #[test]
    fn test_flip_at_left_margin() {
        let (registry, _) = registry_with(&[29.0]);
        let mut patrol = PatrolController::default();
        patrol.track_edges(&registry);
        assert!(patrol.update_dir(&registry, STAGE));
        assert_eq!(patrol.dir, -1.0);
    }

    #[test]
    fn test_flip_at_right_margin() {
        let (registry, _) = registry_with(&[100.0, 280.5]);
        let mut patrol = PatrolController::default();
        patrol.track_edges(&registry);
        assert!(patrol.update_dir(&registry, STAGE));
        assert_eq!(patrol.dir, -1.0);
    }

    #[test]
    fn test_no_flip_on_margin() {
        let (registry, _) = registry_with(&[30.0, 280.0]);
        let mut patrol = PatrolController::default();
        patrol.track_edges(&registry);
        assert!(!patrol.update_dir(&registry, STAGE));
        assert_eq!(patrol.dir, 1.0);
    }
}
