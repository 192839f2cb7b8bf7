//! Entity registry
//!
//! Owns the live entities in a stable order. Entities added mid-pass are held
//! back until `commit` so a pass never visits something it spawned.

use super::entity::{Entity, EntityId};

#[derive(Debug, Clone)]
pub struct Registry {
    entities: Vec<Entity>,
    pending: Vec<Entity>,
    next_id: EntityId,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Queue an entity for the next pass and return its id
    pub fn add(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;

        entity.id = id;
        self.pending.push(entity);
        id
    }

    /// Make queued entities live, keeping insertion order
    pub fn commit(&mut self) {
        self.entities.append(&mut self.pending);
    }

    /// Remove every live entity matching `predicate`, in registry order
    pub fn remove_matching<F>(&mut self, mut predicate: F) -> Vec<Entity>
    where
        F: FnMut(&Entity) -> bool,
    {
        let (removed, kept) = std::mem::take(&mut self.entities)
            .into_iter()
            .partition(|e| predicate(e));
        self.entities = kept;
        removed
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    /// Live entities as a slice (pending ones excluded)
    pub fn as_slice(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn count_players(&self) -> usize {
        self.entities.iter().filter(|e| e.is_player()).count()
    }

    pub fn count_invaders(&self) -> usize {
        self.entities.iter().filter(|e| e.is_invader()).count()
    }
}
