//! Game loop driver
//!
//! The simulation core only exposes `Game::update(timestamp)`. This module
//! owns the loop around it: a [`FrameScheduler`] yields frame timestamps, an
//! [`InputSource`] delivers events between frames, and the running flag is
//! checked only at frame boundaries so a frame is never cut short.

use std::collections::VecDeque;

use crate::error::SimError;
use crate::sim::{Game, GameEvent, InputEvent};

/// Yields the timestamp (ms) of each frame, like an animation-frame callback
pub trait FrameScheduler {
    /// Block until the next frame; `None` stops the loop
    fn next_frame(&mut self) -> Option<f64>;
}

/// Delivers input that arrived since the previous frame
pub trait InputSource {
    fn poll(&mut self, game: &Game) -> Vec<InputEvent>;
}

/// Synthetic scheduler ticking at a fixed interval, for tests and headless runs
#[derive(Debug, Clone, Copy)]
pub struct FixedRateClock {
    now: f64,
    interval_ms: f64,
}

impl FixedRateClock {
    pub fn new(start_ms: f64, interval_ms: f64) -> Self {
        Self {
            now: start_ms,
            interval_ms,
        }
    }

    /// 60 Hz starting at zero
    pub fn sixty_hz() -> Self {
        Self::new(0.0, 1000.0 / 60.0)
    }
}

impl FrameScheduler for FixedRateClock {
    fn next_frame(&mut self) -> Option<f64> {
        let now = self.now;
        self.now += self.interval_ms;
        Some(now)
    }
}

/// Input replayed from a list of (frame index, event) pairs
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frame: u64,
    queue: VecDeque<(u64, InputEvent)>,
}

impl ScriptedInput {
    /// `script` must be ordered by frame index
    pub fn new(script: impl IntoIterator<Item = (u64, InputEvent)>) -> Self {
        Self {
            frame: 0,
            queue: script.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _game: &Game) -> Vec<InputEvent> {
        let mut events = Vec::new();
        while self.queue.front().is_some_and(|(at, _)| *at <= self.frame) {
            if let Some((_, event)) = self.queue.pop_front() {
                events.push(event);
            }
        }
        self.frame += 1;
        events
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub frames: u64,
    pub bricks_destroyed: u32,
    pub cleared: bool,
}

/// Drives a [`Game`] frame by frame
#[derive(Debug, Clone, Copy)]
pub struct GameLoop {
    /// Stop after this many frames
    pub max_frames: Option<u64>,
    /// End play as soon as the level is cleared
    pub stop_when_cleared: bool,
}

impl Default for GameLoop {
    fn default() -> Self {
        Self {
            max_frames: None,
            stop_when_cleared: true,
        }
    }
}

impl GameLoop {
    /// Start play and run until play ends, the scheduler stops or the frame
    /// cap is hit. Play is always ended on return.
    pub fn run(
        &self,
        game: &mut Game,
        scheduler: &mut dyn FrameScheduler,
        input: &mut dyn InputSource,
    ) -> Result<LoopStats, SimError> {
        game.begin_play()?;
        let result = self.run_frames(game, scheduler, input);
        game.end_play();
        result
    }

    fn run_frames(
        &self,
        game: &mut Game,
        scheduler: &mut dyn FrameScheduler,
        input: &mut dyn InputSource,
    ) -> Result<LoopStats, SimError> {
        let mut stats = LoopStats::default();

        while game.is_running() {
            if self.max_frames.is_some_and(|max| stats.frames >= max) {
                log::info!("Frame limit reached after {} frames", stats.frames);
                break;
            }
            let Some(timestamp) = scheduler.next_frame() else {
                log::info!("Scheduler stopped after {} frames", stats.frames);
                break;
            };

            for event in input.poll(game) {
                game.handle_input(event)?;
            }

            game.update(timestamp)?;
            game.present();
            stats.frames += 1;

            for event in game.drain_events() {
                match event {
                    GameEvent::BrickDestroyed(_) => stats.bricks_destroyed += 1,
                    GameEvent::LevelCleared => stats.cleared = true,
                    GameEvent::BallLaunched | GameEvent::Bounce(_) => {}
                }
            }

            if stats.cleared && self.stop_when_cleared {
                game.end_play();
            }
        }

        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::{BallState, BrickPattern, BuiltinPatterns, CellKind};
    use glam::Vec2;

    /// Scheduler that yields a fixed list of timestamps
    struct Timestamps(VecDeque<f64>);

    impl FrameScheduler for Timestamps {
        fn next_frame(&mut self) -> Option<f64> {
            self.0.pop_front()
        }
    }

    #[test]
    fn test_fixed_rate_clock() {
        let mut clock = FixedRateClock::new(100.0, 10.0);
        assert_eq!(clock.next_frame(), Some(100.0));
        assert_eq!(clock.next_frame(), Some(110.0));
        assert_eq!(clock.next_frame(), Some(120.0));
    }

    #[test]
    fn test_scripted_input_by_frame() {
        let game = Game::new(Settings::default());
        let mut input = ScriptedInput::new([
            (0, InputEvent::PointerMove(Vec2::new(10.0, 0.0))),
            (2, InputEvent::LaunchPressed),
        ]);
        assert_eq!(input.poll(&game).len(), 1);
        assert!(input.poll(&game).is_empty());
        assert_eq!(input.poll(&game), vec![InputEvent::LaunchPressed]);
        assert!(input.poll(&game).is_empty());
    }

    #[test]
    fn test_run_without_level_fails() {
        let mut game = Game::new(Settings::default());
        let result = GameLoop::default().run(
            &mut game,
            &mut FixedRateClock::sixty_hz(),
            &mut ScriptedInput::default(),
        );
        assert_eq!(result, Err(SimError::NoLevelLoaded));
    }

    #[test]
    fn test_frame_cap_ends_play_and_unbinds() {
        let mut game = Game::new(Settings::default());
        game.load_level(1, &BuiltinPatterns).unwrap();
        let driver = GameLoop {
            max_frames: Some(30),
            stop_when_cleared: true,
        };
        let stats = driver
            .run(
                &mut game,
                &mut FixedRateClock::sixty_hz(),
                &mut ScriptedInput::new([(5, InputEvent::LaunchPressed)]),
            )
            .unwrap();

        assert_eq!(stats.frames, 30);
        assert!(!game.is_running());
        assert_eq!(game.ball_state(), Some(BallState::Launched));
        // Unbound after end of play
        assert!(!game.handle_input(InputEvent::LaunchPressed).unwrap());
    }

    #[test]
    fn test_scheduler_stop_ends_loop() {
        let mut game = Game::new(Settings::default());
        game.load_level(1, &BuiltinPatterns).unwrap();
        let mut frames = Timestamps(VecDeque::from([0.0, 16.0, 32.0]));
        let stats = GameLoop::default()
            .run(&mut game, &mut frames, &mut ScriptedInput::default())
            .unwrap();
        assert_eq!(stats.frames, 3);
        assert_eq!(game.clock.last_time, Some(32.0));
        assert!(!game.is_running());
    }

    #[test]
    fn test_clearing_a_single_brick_level() {
        let settings = Settings {
            gravity: 0.0,
            ..Default::default()
        };
        let mut game = Game::new(settings);
        // One brick directly above the paddle's starting column
        let source = |_: u32| {
            BrickPattern::from_fn(5, 1, |ix, _| {
                if ix == 2 {
                    CellKind::Normal
                } else {
                    CellKind::Empty
                }
            })
        };
        game.load_level(1, &source).unwrap();

        let driver = GameLoop {
            max_frames: Some(600),
            stop_when_cleared: true,
        };
        let stats = driver
            .run(
                &mut game,
                &mut FixedRateClock::sixty_hz(),
                &mut ScriptedInput::new([(1, InputEvent::LaunchPressed)]),
            )
            .unwrap();

        assert!(stats.cleared);
        assert_eq!(stats.bricks_destroyed, 1);
        assert!(stats.frames < 600);
        assert!(game.bricks().is_empty());
    }
}
