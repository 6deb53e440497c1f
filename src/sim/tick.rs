//! Per-frame simulation step
//!
//! Ball motion is resolved one axis at a time: the vertical displacement is
//! tested first, then the horizontal one, each against the ball's current
//! position on the other axis. A hit only flips the matching velocity
//! component; the ball then moves by the resolved velocity. Thin geometry
//! can be tunnelled through at high speed.

use glam::Vec2;

use super::collision::{Collision, ball_collision};
use super::entity::{BrickKind, EntityKind};
use super::level::{BallState, Level};
use super::playfield::Playfield;
use super::state::{Game, GameEvent};
use crate::error::SimError;
use crate::settings::Settings;

impl Game {
    /// Run one frame for the animation timestamp `timestamp` (ms)
    pub fn update(&mut self, timestamp: f64) -> Result<(), SimError> {
        if self.level.is_none() {
            return Err(SimError::NoLevelLoaded);
        }
        let dt = self.clock.advance(timestamp);
        self.step(dt)
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) -> Result<(), SimError> {
        let level = self.level.as_mut().ok_or(SimError::NoLevelLoaded)?;
        tick(&mut self.playfield, level, &self.settings, dt, &mut self.events)
    }
}

/// Advance `level` by `dt` seconds
pub fn tick(
    playfield: &mut Playfield,
    level: &mut Level,
    settings: &Settings,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> Result<(), SimError> {
    let paddle_pos = playfield.entity(level.paddle)?.position;

    match level.ball_state {
        BallState::Stuck => {
            playfield.entity_mut(level.ball)?.position =
                paddle_pos - Vec2::new(0.0, settings.stuck_offset);
        }
        BallState::Launched => {
            move_ball(playfield, level, settings, dt, events)?;
        }
    }

    // Paddle velocity estimate; a zero-length frame keeps the previous one
    if dt > 0.0 {
        level.paddle_xvel = (paddle_pos.x - level.last_paddle_x) / dt;
    }
    level.last_paddle_x = paddle_pos.x;

    if !level.cleared && !has_normal_bricks(playfield, level) {
        level.cleared = true;
        events.push(GameEvent::LevelCleared);
        log::info!("Level {} cleared", level.id);
    }

    Ok(())
}

fn move_ball(
    playfield: &mut Playfield,
    level: &mut Level,
    settings: &Settings,
    dt: f32,
    events: &mut Vec<GameEvent>,
) -> Result<(), SimError> {
    let paddle_x = playfield.entity(level.paddle)?.position.x;

    // A negative or NaN limit pins horizontal speed to zero
    let max_speed = settings.max_ball_speed.max(0.0);
    let ball = playfield.entity_mut(level.ball)?;
    ball.velocity.x = ball.velocity.x.clamp(-max_speed, max_speed);
    ball.velocity.y += settings.gravity * dt;

    let scale = dt * settings.ball_speed;
    let (pos, size, mut velocity) = (ball.position, ball.size, ball.velocity);
    let next = pos + velocity * scale;

    let collision_y = ball_collision(playfield, level, Vec2::new(pos.x, next.y), size);
    if let Some(hit) = collision_y {
        velocity.y = -velocity.y;
        events.push(GameEvent::Bounce(hit.kind()));
    }

    let collision_x = ball_collision(playfield, level, Vec2::new(next.x, pos.y), size);
    if let Some(hit) = collision_x {
        velocity.x = -velocity.x;
        events.push(GameEvent::Bounce(hit.kind()));
    }

    // Paddle english: carry half the paddle's motion, push away from centre
    if collision_y == Some(Collision::Paddle) {
        velocity.x += level.paddle_xvel / 2.0;
        velocity.x += if pos.x < paddle_x {
            -settings.paddle_push
        } else {
            settings.paddle_push
        };
    }

    for hit in [collision_x, collision_y].into_iter().flatten() {
        if let Collision::Brick(id) = hit {
            let solid = playfield.get(id).is_some_and(|brick| brick.is_solid());
            if !solid && level.remove_entity(playfield, id) {
                events.push(GameEvent::BrickDestroyed(id));
                log::debug!("Brick {} destroyed, {} left", id, level.bricks.len());
            }
        }
    }

    let ball = playfield.entity_mut(level.ball)?;
    ball.velocity = velocity;
    ball.position = pos + velocity * scale;
    Ok(())
}

fn has_normal_bricks(playfield: &Playfield, level: &Level) -> bool {
    level.bricks.iter().any(|id| {
        playfield
            .get(*id)
            .is_some_and(|brick| brick.kind == EntityKind::Brick(BrickKind::Normal))
    })
}
