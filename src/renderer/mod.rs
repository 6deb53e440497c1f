//! Render surface abstraction
//!
//! The simulation never draws. It tells a [`Surface`] when entities appear,
//! disappear and move; the surface decides what a displayable proxy is.

pub mod text;

use crate::sim::{Entity, EntityId};

pub use text::TextSurface;

/// Receives entity lifecycle and per-frame state from the playfield
pub trait Surface {
    /// An entity was created; build its proxy
    fn spawn(&mut self, id: EntityId, entity: &Entity);
    /// An entity was removed; drop its proxy
    fn despawn(&mut self, id: EntityId);
    /// Drive the proxy's position/size from the entity's current state
    fn update(&mut self, id: EntityId, entity: &Entity);
    /// Called once after all updates of a frame
    fn present(&mut self) {}
}

/// Surface that displays nothing (tests, servers, benchmarks)
#[derive(Debug, Default, Clone, Copy)]
pub struct HeadlessSurface;

impl Surface for HeadlessSurface {
    fn spawn(&mut self, _id: EntityId, _entity: &Entity) {}
    fn despawn(&mut self, _id: EntityId) {}
    fn update(&mut self, _id: EntityId, _entity: &Entity) {}
}
