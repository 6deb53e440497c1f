//! Entities living in the playfield: paddle, ball and bricks

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::geom::Rect;

/// Stable entity identity, never reused within a playfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Brick types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrickKind {
    /// Destroyed on first hit
    #[default]
    Normal,
    /// Bounces the ball, never destroyed
    Solid,
}

/// What an entity is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Paddle,
    Ball,
    Brick(BrickKind),
}

impl EntityKind {
    pub fn brick_kind(&self) -> Option<BrickKind> {
        match self {
            EntityKind::Brick(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// Everything needed to create an entity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntitySpec {
    pub kind: EntityKind,
    /// Centre point
    pub position: Vec2,
    pub size: Vec2,
}

impl EntitySpec {
    pub fn paddle(position: Vec2, size: Vec2) -> Self {
        Self {
            kind: EntityKind::Paddle,
            position,
            size,
        }
    }

    pub fn ball(position: Vec2, size: Vec2) -> Self {
        Self {
            kind: EntityKind::Ball,
            position,
            size,
        }
    }

    pub fn brick(kind: BrickKind, position: Vec2, size: Vec2) -> Self {
        Self {
            kind: EntityKind::Brick(kind),
            position,
            size,
        }
    }
}

/// A positioned, sized simulation object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    /// Centre point
    pub position: Vec2,
    pub size: Vec2,
    /// Only meaningful for the ball; zero otherwise
    pub velocity: Vec2,
}

impl Entity {
    pub fn from_spec(spec: &EntitySpec) -> Self {
        Self {
            kind: spec.kind,
            position: spec.position,
            size: spec.size,
            velocity: Vec2::ZERO,
        }
    }

    /// Bounding rectangle centred on `position`
    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::centered(self.position, self.size)
    }

    pub fn is_brick(&self) -> bool {
        matches!(self.kind, EntityKind::Brick(_))
    }

    pub fn is_solid(&self) -> bool {
        self.kind == EntityKind::Brick(BrickKind::Solid)
    }
}
