//! Level construction: paddle, ball and the brick grid

use glam::{UVec2, Vec2};
use serde::{Deserialize, Serialize};

use super::entity::{EntityId, EntitySpec};
use super::pattern::{BrickPattern, PatternSource};
use super::playfield::Playfield;
use crate::error::SimError;
use crate::settings::Settings;

/// Ball state - riding the paddle or free-flying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BallState {
    /// Follows the paddle, no velocity integration
    #[default]
    Stuck,
    /// Free under gravity and velocity
    Launched,
}

/// Brick grid geometry for one pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    /// Distance between neighbouring cell origins
    pub spacing: Vec2,
    pub brick_size: Vec2,
    pub gap: Vec2,
    /// Vertical offset of the whole grid
    pub offset: f32,
}

impl GridLayout {
    /// Layout for `num_bricks` columns/rows, `None` if the grid is degenerate
    pub fn new(settings: &Settings, num_bricks: UVec2) -> Option<Self> {
        if num_bricks.x == 0 || num_bricks.y == 0 {
            return None;
        }

        let gap = settings.brick_gap;
        let spacing = Vec2::new(
            (settings.game_size.x - gap.x * 2.0) / num_bricks.x as f32,
            settings.brick_height + gap.y,
        );
        let brick_size = Vec2::new(spacing.x - gap.x, settings.brick_height);

        if !(brick_size.x > 0.0 && brick_size.y > 0.0 && brick_size.is_finite()) {
            return None;
        }

        Some(Self {
            spacing,
            brick_size,
            gap,
            offset: settings.brick_offset,
        })
    }

    /// Centre of cell (`ix`, `iy`)
    pub fn cell_center(&self, ix: u32, iy: u32) -> Vec2 {
        self.spacing * Vec2::new(ix as f32, iy as f32)
            + self.gap
            + Vec2::new(0.0, self.offset)
            + self.spacing / 2.0
    }
}

/// Instantiate the bricks of `pattern`, row-major, top row first
pub fn build_bricks(
    playfield: &mut Playfield,
    settings: &Settings,
    pattern: &BrickPattern,
) -> Result<Vec<EntityId>, SimError> {
    let Some(layout) = GridLayout::new(settings, pattern.num_bricks) else {
        log::warn!(
            "Degenerate brick grid {}x{}, level has no bricks",
            pattern.num_bricks.x,
            pattern.num_bricks.y
        );
        return Ok(Vec::new());
    };

    let mut bricks = Vec::with_capacity(pattern.brick_count());
    for iy in 0..pattern.num_bricks.y {
        for ix in 0..pattern.num_bricks.x {
            let Some(kind) = pattern.brick_kind(ix, iy).brick_kind() else {
                continue;
            };
            let id = playfield.add_entity(EntitySpec::brick(
                kind,
                layout.cell_center(ix, iy),
                layout.brick_size,
            ))?;
            bricks.push(id);
        }
    }
    Ok(bricks)
}

/// Everything the simulation tracks for the loaded level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub id: u32,
    pub paddle: EntityId,
    pub ball: EntityId,
    /// Active bricks in registry order
    pub bricks: Vec<EntityId>,
    pub ball_state: BallState,
    /// Estimated paddle horizontal velocity (units/s)
    pub paddle_xvel: f32,
    pub last_paddle_x: f32,
    /// Set once the last normal brick is gone
    pub cleared: bool,
}

impl Level {
    /// Populate `playfield` with paddle, ball, then bricks for level `id`
    pub fn build(
        playfield: &mut Playfield,
        settings: &Settings,
        id: u32,
        source: &dyn PatternSource,
    ) -> Result<Self, SimError> {
        let paddle_pos = settings.paddle_start();
        let paddle = playfield.add_entity(EntitySpec::paddle(paddle_pos, settings.paddle_size))?;

        let ball_pos = paddle_pos - Vec2::new(0.0, settings.stuck_offset);
        let ball = playfield.add_entity(EntitySpec::ball(ball_pos, settings.ball_size))?;

        let pattern = source.pattern(id);
        let bricks = build_bricks(playfield, settings, &pattern)?;
        log::info!(
            "Level {}: {}x{} grid, {} bricks",
            id,
            pattern.num_bricks.x,
            pattern.num_bricks.y,
            bricks.len()
        );

        Ok(Self {
            id,
            paddle,
            ball,
            bricks,
            ball_state: BallState::Stuck,
            paddle_xvel: 0.0,
            last_paddle_x: paddle_pos.x,
            cleared: false,
        })
    }

    /// Remove an entity from `playfield` and, if it is a brick, from the
    /// active brick list. Returns false if it was already gone.
    pub fn remove_entity(&mut self, playfield: &mut Playfield, id: EntityId) -> bool {
        self.bricks.retain(|brick| *brick != id);
        playfield.remove_entity(id)
    }
}
