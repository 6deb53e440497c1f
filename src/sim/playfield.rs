//! Entity registry and play area
//!
//! The playfield exclusively owns every live entity. Everything else (the
//! level's brick list, input handlers, the render surface) holds only
//! [`EntityId`]s, so a mutation through any path is visible on the next read.

use std::fmt;

use glam::Vec2;

use super::entity::{Entity, EntityId, EntitySpec};
use crate::error::SimError;
use crate::geom::Rect;
use crate::renderer::{HeadlessSurface, Surface};

/// Input streams the playfield can forward to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    PointerMove,
    KeyDown,
}

/// Bounded play area plus the insertion-ordered live entity set
pub struct Playfield {
    rect: Rect,
    entities: Vec<(EntityId, Entity)>,
    bindings: Vec<InputKind>,
    surface: Box<dyn Surface>,
    next_id: u32,
}

impl fmt::Debug for Playfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Playfield")
            .field("rect", &self.rect)
            .field("entities", &self.entities.len())
            .field("bindings", &self.bindings)
            .finish()
    }
}

impl Playfield {
    /// Headless playfield of the given size
    pub fn new(size: Vec2) -> Self {
        Self::with_surface(size, Box::new(HeadlessSurface))
    }

    pub fn with_surface(size: Vec2, surface: Box<dyn Surface>) -> Self {
        Self {
            rect: Rect::new(Vec2::ZERO, size),
            entities: Vec::new(),
            bindings: Vec::new(),
            surface,
            next_id: 1,
        }
    }

    /// Bounding rectangle of the play area, fixed for the session
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Create and register an entity, notifying the surface
    pub fn add_entity(&mut self, spec: EntitySpec) -> Result<EntityId, SimError> {
        let size = spec.size;
        if !(size.x > 0.0 && size.y > 0.0 && size.is_finite()) {
            return Err(SimError::InvalidSize {
                width: size.x,
                height: size.y,
            });
        }

        let id = EntityId(self.next_id);
        self.next_id += 1;

        let entity = Entity::from_spec(&spec);
        self.surface.spawn(id, &entity);
        self.entities.push((id, entity));
        log::trace!("Added {:?} {}", spec.kind, id);
        Ok(id)
    }

    /// Remove by identity. Returns false if it was already gone.
    ///
    /// Crate-internal: outside callers go through [`Game::remove_entity`] so
    /// the level's brick list stays in step with the registry.
    ///
    /// [`Game::remove_entity`]: super::Game::remove_entity
    pub(crate) fn remove_entity(&mut self, id: EntityId) -> bool {
        match self.entities.iter().position(|(eid, _)| *eid == id) {
            Some(index) => {
                self.entities.remove(index);
                self.surface.despawn(id);
                log::trace!("Removed {}", id);
                true
            }
            None => false,
        }
    }

    /// Remove every entity (level reload)
    pub(crate) fn clear(&mut self) {
        for (id, _) in self.entities.drain(..) {
            self.surface.despawn(id);
        }
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|(eid, _)| *eid == id)
            .map(|(_, entity)| entity)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|(eid, _)| *eid == id)
            .map(|(_, entity)| entity)
    }

    /// Like [`Playfield::get`] but a missing entity is an error
    pub fn entity(&self, id: EntityId) -> Result<&Entity, SimError> {
        self.get(id).ok_or(SimError::MissingEntity(id))
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Result<&mut Entity, SimError> {
        self.get_mut(id).ok_or(SimError::MissingEntity(id))
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.get(id).is_some()
    }

    /// Live entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.entities.iter().map(|(id, entity)| (*id, entity))
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    // === Input bindings ===

    pub fn bind_event(&mut self, kind: InputKind) {
        if !self.bindings.contains(&kind) {
            self.bindings.push(kind);
        }
    }

    pub fn is_bound(&self, kind: InputKind) -> bool {
        self.bindings.contains(&kind)
    }

    /// Detach all input bindings (clean shutdown)
    pub fn clear_events(&mut self) {
        self.bindings.clear();
    }

    /// Push every entity's current state to the surface and present
    pub fn present(&mut self) {
        for (id, entity) in &self.entities {
            self.surface.update(*id, entity);
        }
        self.surface.present();
    }
}
