//! Ball collision detection against walls, paddle and bricks
//!
//! First match wins, tested in this order:
//! 1. ball not fully inside the playfield -> `Viewport`
//! 2. ball overlaps the paddle -> `Paddle`
//! 3. first active brick (registry order) the ball overlaps -> `Brick`

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::EntityId;
use super::level::Level;
use super::playfield::Playfield;
use crate::geom::Rect;

/// What the ball ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Collision {
    /// Left the play area (wall bounce)
    Viewport,
    Paddle,
    Brick(EntityId),
}

/// Collision category without the entity reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionKind {
    Viewport,
    Paddle,
    Brick,
}

impl Collision {
    pub fn kind(&self) -> CollisionKind {
        match self {
            Collision::Viewport => CollisionKind::Viewport,
            Collision::Paddle => CollisionKind::Paddle,
            Collision::Brick(_) => CollisionKind::Brick,
        }
    }
}

/// Check what a ball of `ball_size` centred at `pos` would collide with
pub fn ball_collision(
    playfield: &Playfield,
    level: &Level,
    pos: Vec2,
    ball_size: Vec2,
) -> Option<Collision> {
    let ball_rect = Rect::centered(pos, ball_size);

    if !ball_rect.within(&playfield.rect()) {
        return Some(Collision::Viewport);
    }

    if let Some(paddle) = playfield.get(level.paddle) {
        if ball_rect.overlaps(&paddle.rect()) {
            return Some(Collision::Paddle);
        }
    }

    level
        .bricks
        .iter()
        .copied()
        .find(|id| {
            playfield
                .get(*id)
                .is_some_and(|brick| ball_rect.overlaps(&brick.rect()))
        })
        .map(Collision::Brick)
}
