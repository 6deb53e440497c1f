//! Frame-driven simulation module
//!
//! All gameplay logic lives here. It performs only arithmetic and in-memory
//! collection mutation:
//! - One step per frame, scaled by the frame's delta time
//! - Seeded RNG only
//! - Stable iteration order (registry insertion order)
//! - No rendering or platform dependencies beyond the `Surface` trait

pub mod collision;
pub mod entity;
pub mod level;
pub mod pattern;
pub mod playfield;
pub mod state;
pub mod tick;

pub use collision::{Collision, CollisionKind, ball_collision};
pub use entity::{BrickKind, Entity, EntityId, EntityKind, EntitySpec};
pub use level::{BallState, GridLayout, Level, build_bricks};
pub use pattern::{BrickPattern, BuiltinPatterns, CellKind, JsonPatterns, PatternSource};
pub use playfield::{InputKind, Playfield};
pub use state::{FrameClock, Game, GameEvent, InputEvent};
pub use tick::tick;
