//! Game state: the loaded level, play flag, timing and input handling

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CollisionKind;
use super::entity::{Entity, EntityId};
use super::level::{BallState, Level};
use super::pattern::PatternSource;
use super::playfield::{InputKind, Playfield};
use crate::error::SimError;
use crate::renderer::Surface;
use crate::settings::Settings;

/// Input delivered between frames
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer position already translated into playfield coordinates
    PointerMove(Vec2),
    /// The launch key was pressed
    LaunchPressed,
}

impl InputEvent {
    pub fn kind(&self) -> InputKind {
        match self {
            InputEvent::PointerMove(_) => InputKind::PointerMove,
            InputEvent::LaunchPressed => InputKind::KeyDown,
        }
    }
}

/// Things that happened during a frame, for audio/render layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    BallLaunched,
    /// Ball velocity was flipped by a collision
    Bounce(CollisionKind),
    BrickDestroyed(EntityId),
    LevelCleared,
}

/// Frame timing
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    /// Timestamp (ms) of the previous frame, `None` before the first
    pub last_time: Option<f64>,
    /// Seconds elapsed in the current frame
    pub dt: f32,
}

impl FrameClock {
    /// Advance to `timestamp` (ms) and return the elapsed seconds.
    /// A missing previous timestamp counts as zero elapsed time.
    pub fn advance(&mut self, timestamp: f64) -> f32 {
        let last = self.last_time.unwrap_or(timestamp);
        self.dt = ((timestamp - last) / 1000.0) as f32;
        self.last_time = Some(timestamp);
        self.dt
    }
}

/// Complete simulation state for a session
#[derive(Debug)]
pub struct Game {
    pub settings: Settings,
    pub playfield: Playfield,
    pub(super) level: Option<Level>,
    running: bool,
    pub clock: FrameClock,
    pub(super) rng: Pcg32,
    pub(super) events: Vec<GameEvent>,
}

impl Game {
    /// Headless game
    pub fn new(settings: Settings) -> Self {
        let playfield = Playfield::new(settings.game_size);
        Self::with_playfield(settings, playfield)
    }

    /// Game whose playfield reports to `surface`
    pub fn with_surface(settings: Settings, surface: Box<dyn Surface>) -> Self {
        let playfield = Playfield::with_surface(settings.game_size, surface);
        Self::with_playfield(settings, playfield)
    }

    fn with_playfield(settings: Settings, playfield: Playfield) -> Self {
        if let Err(err) = settings.validate() {
            log::warn!("Running with unchecked settings: {}", err);
        }
        let rng = Pcg32::seed_from_u64(settings.seed);
        Self {
            settings,
            playfield,
            level: None,
            running: false,
            clock: FrameClock::default(),
            rng,
            events: Vec::new(),
        }
    }

    /// Replace the playfield contents with level `id`. Stops play.
    pub fn load_level(&mut self, id: u32, source: &dyn PatternSource) -> Result<(), SimError> {
        self.running = false;
        self.playfield.clear_events();
        self.playfield.clear();
        self.level = None;
        self.clock = FrameClock::default();
        self.events.clear();

        match Level::build(&mut self.playfield, &self.settings, id, source) {
            Ok(level) => {
                self.level = Some(level);
                Ok(())
            }
            Err(err) => {
                // Drop whatever was spawned before the failure
                self.playfield.clear();
                Err(err)
            }
        }
    }

    /// Remove an entity from the registry and the level's brick list.
    /// Returns false if it was already gone.
    pub fn remove_entity(&mut self, id: EntityId) -> bool {
        match self.level.as_mut() {
            Some(level) => level.remove_entity(&mut self.playfield, id),
            None => self.playfield.remove_entity(id),
        }
    }

    /// Start play and bind input. Fails if no level is loaded.
    pub fn begin_play(&mut self) -> Result<(), SimError> {
        let level = self.level.as_ref().ok_or(SimError::NoLevelLoaded)?;
        log::info!("Begin play on level {}", level.id);
        self.running = true;
        self.playfield.bind_event(InputKind::PointerMove);
        self.playfield.bind_event(InputKind::KeyDown);
        Ok(())
    }

    /// Stop play and detach input. Takes effect at the next frame boundary.
    pub fn end_play(&mut self) {
        if self.running {
            log::info!("End play");
        }
        self.running = false;
        self.playfield.clear_events();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn ball_state(&self) -> Option<BallState> {
        self.level.as_ref().map(|level| level.ball_state)
    }

    pub fn paddle(&self) -> Option<&Entity> {
        self.level
            .as_ref()
            .and_then(|level| self.playfield.get(level.paddle))
    }

    pub fn ball(&self) -> Option<&Entity> {
        self.level
            .as_ref()
            .and_then(|level| self.playfield.get(level.ball))
    }

    /// Active bricks in registry order
    pub fn bricks(&self) -> &[EntityId] {
        self.level
            .as_ref()
            .map(|level| level.bricks.as_slice())
            .unwrap_or(&[])
    }

    /// True once no normal bricks remain
    pub fn is_cleared(&self) -> bool {
        self.level.as_ref().is_some_and(|level| level.cleared)
    }

    /// Events collected since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Forward an input event if its stream is bound. Returns whether it
    /// was handled.
    pub fn handle_input(&mut self, event: InputEvent) -> Result<bool, SimError> {
        if !self.playfield.is_bound(event.kind()) {
            return Ok(false);
        }
        match event {
            InputEvent::PointerMove(pos) => self.move_paddle(pos)?,
            InputEvent::LaunchPressed => self.launch()?,
        }
        Ok(true)
    }

    /// Pointer-move handler: track `pos.x`, clamped to keep the paddle inside
    pub fn move_paddle(&mut self, pos: Vec2) -> Result<(), SimError> {
        let level = self.level.as_ref().ok_or(SimError::NoLevelLoaded)?;
        let x = self.settings.clamp_paddle_x(pos.x);
        self.playfield.entity_mut(level.paddle)?.position.x = x;
        Ok(())
    }

    /// Launch handler: only acts while the ball is stuck
    pub fn launch(&mut self) -> Result<(), SimError> {
        let level = self.level.as_mut().ok_or(SimError::NoLevelLoaded)?;
        if level.ball_state != BallState::Stuck {
            return Ok(());
        }

        let jitter = if self.rng.random_bool(0.5) {
            -self.settings.launch_jitter
        } else {
            self.settings.launch_jitter
        };
        let velocity = Vec2::new(
            level.paddle_xvel / self.settings.ball_speed + jitter,
            self.settings.launch_velocity_y,
        );

        self.playfield.entity_mut(level.ball)?.velocity = velocity;
        level.ball_state = BallState::Launched;
        self.events.push(GameEvent::BallLaunched);
        log::debug!("Ball launched with velocity {}", velocity);
        Ok(())
    }

    /// Push every entity to the render surface
    pub fn present(&mut self) {
        self.playfield.present();
    }
}
