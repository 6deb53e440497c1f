//! Game tuning settings
//!
//! One explicit struct threaded into level loading and the simulation step.
//! Defaults come from [`crate::consts`]; a JSON file may override any subset.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Difficulty and layout values for a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    /// Playfield width/height (origin is always zero)
    pub game_size: Vec2,

    // === Ball physics ===
    /// Time-scaling multiplier applied to ball displacement on both axes
    pub ball_speed: f32,
    /// Constant downward acceleration
    pub gravity: f32,
    /// Clamp for horizontal ball velocity
    pub max_ball_speed: f32,
    pub ball_size: Vec2,
    pub stuck_offset: f32,
    pub launch_velocity_y: f32,
    pub launch_jitter: f32,

    // === Paddle ===
    pub paddle_size: Vec2,
    /// Distance of the paddle centre from the bottom edge
    pub paddle_bottom_margin: f32,
    pub paddle_push: f32,

    // === Bricks ===
    pub brick_height: f32,
    /// Extra vertical offset of the whole grid
    pub brick_offset: f32,
    /// Gap between bricks and around the grid
    pub brick_gap: Vec2,

    /// RNG seed for launch jitter
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            game_size: Vec2::new(GAME_WIDTH, GAME_HEIGHT),

            ball_speed: BALL_SPEED,
            gravity: GRAVITY,
            max_ball_speed: MAX_BALL_SPEED,
            ball_size: Vec2::splat(BALL_SIZE),
            stuck_offset: STUCK_OFFSET,
            launch_velocity_y: LAUNCH_VELOCITY_Y,
            launch_jitter: LAUNCH_JITTER,

            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,
            paddle_push: PADDLE_PUSH,

            brick_height: BRICK_HEIGHT,
            brick_offset: BRICK_OFFSET,
            brick_gap: Vec2::splat(BRICK_GAP),

            seed: 0,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn positive(v: Vec2) -> bool {
            v.x > 0.0 && v.y > 0.0 && v.is_finite()
        }

        if !positive(self.game_size) {
            return Err(SettingsError::Invalid("game_size must be positive"));
        }
        if !positive(self.paddle_size) {
            return Err(SettingsError::Invalid("paddle_size must be positive"));
        }
        if !positive(self.ball_size) {
            return Err(SettingsError::Invalid("ball_size must be positive"));
        }
        if self.paddle_size.x > self.game_size.x {
            return Err(SettingsError::Invalid("paddle is wider than the playfield"));
        }
        if !(self.brick_height > 0.0) {
            return Err(SettingsError::Invalid("brick_height must be positive"));
        }
        if self.brick_gap.x < 0.0 || self.brick_gap.y < 0.0 {
            return Err(SettingsError::Invalid("brick_gap must not be negative"));
        }
        if !(self.max_ball_speed >= 0.0) {
            return Err(SettingsError::Invalid("max_ball_speed must not be negative"));
        }
        Ok(())
    }

    /// Centre of the paddle when a level starts
    pub fn paddle_start(&self) -> Vec2 {
        Vec2::new(
            self.game_size.x / 2.0,
            self.game_size.y - self.paddle_bottom_margin,
        )
    }

    /// Clamp a paddle centre x so the paddle never leaves the playfield.
    /// A paddle wider than the playfield is kept centred.
    pub fn clamp_paddle_x(&self, x: f32) -> f32 {
        let half_width = (self.paddle_size.x / 2.0).min(self.game_size.x / 2.0);
        x.max(half_width).min(self.game_size.x - half_width)
    }
}
