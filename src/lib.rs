//! Red Bricks - a breakout simulation with a gravity-bent ball
//!
//! Core modules:
//! - `geom`: Rectangle containment/overlap on top of `glam::Vec2`
//! - `sim`: Frame-driven simulation (entities, level building, collisions)
//! - `driver`: Game loop abstraction over frame scheduling and input
//! - `renderer`: Render surface abstraction (headless and text surfaces)
//! - `settings`: Data-driven game tuning

pub mod driver;
pub mod error;
pub mod geom;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{PatternError, SettingsError, SimError};
pub use geom::Rect;
pub use settings::Settings;

/// Game configuration constants (defaults for [`Settings`])
pub mod consts {
    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 240.0;
    pub const GAME_HEIGHT: f32 = 240.0;

    /// Global time-scaling multiplier applied to ball displacement
    pub const BALL_SPEED: f32 = 1.2;
    /// Downward acceleration on the ball (units/s²)
    pub const GRAVITY: f32 = 100.0;
    /// Horizontal ball velocity is clamped to ±this
    pub const MAX_BALL_SPEED: f32 = 300.0;

    /// Brick grid
    pub const BRICK_HEIGHT: f32 = 12.0;
    pub const BRICK_OFFSET: f32 = 10.0;
    pub const BRICK_GAP: f32 = 3.0;

    /// Paddle defaults - centred this far above the bottom edge
    pub const PADDLE_WIDTH: f32 = 32.0;
    pub const PADDLE_HEIGHT: f32 = 8.0;
    pub const PADDLE_BOTTOM_MARGIN: f32 = 16.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 8.0;
    /// Vertical distance between paddle centre and a stuck ball's centre
    pub const STUCK_OFFSET: f32 = 10.0;
    /// Vertical launch velocity (negative is up)
    pub const LAUNCH_VELOCITY_Y: f32 = -200.0;
    /// Horizontal launch jitter magnitude, sign picked at random
    pub const LAUNCH_JITTER: f32 = 10.0;
    /// Horizontal push added on a paddle hit, away from paddle centre
    pub const PADDLE_PUSH: f32 = 10.0;
}
