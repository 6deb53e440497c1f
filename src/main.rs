//! Red Bricks headless runner
//!
//! Plays one level with an autopilot paddle and prints the playfield as
//! text. Configured through the environment:
//! - `REDBRICKS_LEVEL`: level id (default 1)
//! - `REDBRICKS_SEED`: RNG seed, overrides the settings file
//! - `REDBRICKS_FRAMES`: frame cap (default 3600, one minute at 60 Hz)
//! - `REDBRICKS_PRINT_EVERY`: print every Nth frame, 0 disables (default 120)
//! - `REDBRICKS_SETTINGS`: JSON settings file
//! - `REDBRICKS_PATTERNS`: JSON level pattern file
//! - `RUST_LOG`: log filter

use std::env;
use std::error::Error;
use std::process::ExitCode;
use std::str::FromStr;

use glam::Vec2;

use redbricks::Settings;
use redbricks::driver::{FixedRateClock, GameLoop, InputSource, LoopStats};
use redbricks::renderer::TextSurface;
use redbricks::sim::{BallState, BuiltinPatterns, Game, InputEvent, JsonPatterns, PatternSource};

/// Text grid resolution
const TEXT_COLS: usize = 60;
const TEXT_ROWS: usize = 30;

/// Read and parse an environment variable, falling back to `default`
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring unparseable {}={:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Follows the ball with a bounded paddle speed and launches after a delay
struct Autopilot {
    frame: u64,
    launch_at: u64,
    /// Max paddle travel per frame
    max_step: f32,
}

impl InputSource for Autopilot {
    fn poll(&mut self, game: &Game) -> Vec<InputEvent> {
        self.frame += 1;
        let (Some(paddle), Some(ball)) = (game.paddle(), game.ball()) else {
            return Vec::new();
        };

        let mut events = Vec::new();
        if game.ball_state() == Some(BallState::Stuck) {
            // Wander a little before launching so the launch inherits motion
            let sway = (self.frame as f32 * 0.1).sin() * 40.0;
            let target = game.settings.game_size.x / 2.0 + sway;
            events.push(InputEvent::PointerMove(Vec2::new(target, paddle.position.y)));
            if self.frame >= self.launch_at {
                events.push(InputEvent::LaunchPressed);
            }
        } else {
            // Aim slightly off-centre so the bounce angle keeps changing
            let offset = (self.frame as f32 * 0.013).sin() * paddle.size.x * 0.35;
            let target = ball.position.x + offset;
            let step = (target - paddle.position.x).clamp(-self.max_step, self.max_step);
            events.push(InputEvent::PointerMove(Vec2::new(
                paddle.position.x + step,
                paddle.position.y,
            )));
        }
        events
    }
}

fn run() -> Result<LoopStats, Box<dyn Error>> {
    let mut settings = match env::var("REDBRICKS_SETTINGS") {
        Ok(path) => Settings::load(path)?,
        Err(_) => Settings::default(),
    };
    settings.seed = env_or("REDBRICKS_SEED", settings.seed);

    let patterns: Box<dyn PatternSource> = match env::var("REDBRICKS_PATTERNS") {
        Ok(path) => Box::new(JsonPatterns::load(path)?),
        Err(_) => Box::new(BuiltinPatterns),
    };

    let level: u32 = env_or("REDBRICKS_LEVEL", 1);
    let max_frames: u64 = env_or("REDBRICKS_FRAMES", 3600);
    let print_every: u64 = env_or("REDBRICKS_PRINT_EVERY", 120);

    let surface = TextSurface::new(settings.game_size, TEXT_COLS, TEXT_ROWS, print_every);
    let mut game = Game::with_surface(settings, Box::new(surface));
    game.load_level(level, patterns.as_ref())?;

    let driver = GameLoop {
        max_frames: Some(max_frames),
        stop_when_cleared: true,
    };
    let mut autopilot = Autopilot {
        frame: 0,
        launch_at: 45,
        max_step: 5.0,
    };
    let stats = driver.run(&mut game, &mut FixedRateClock::sixty_hz(), &mut autopilot)?;
    Ok(stats)
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Red Bricks (headless) starting...");

    match run() {
        Ok(stats) => {
            println!(
                "{} frames, {} bricks destroyed{}",
                stats.frames,
                stats.bricks_destroyed,
                if stats.cleared { ", level cleared" } else { "" }
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            eprintln!("redbricks: {err}");
            ExitCode::FAILURE
        }
    }
}
