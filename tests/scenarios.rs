use glam::Vec2;

use redbricks::Settings;
use redbricks::driver::{FixedRateClock, GameLoop, ScriptedInput};
use redbricks::renderer::TextSurface;
use redbricks::sim::{
    BallState, BrickKind, BrickPattern, BuiltinPatterns, CellKind, EntityKind, Game, GameEvent,
    InputEvent,
};

fn row_of(cols: u32) -> impl Fn(u32) -> BrickPattern {
    move |_| BrickPattern::from_fn(cols, 1, |_, _| CellKind::Normal)
}

#[test]
fn test_first_frame_keeps_ball_on_paddle() {
    let mut game = Game::new(Settings::default());
    game.load_level(1, &BuiltinPatterns).unwrap();
    game.begin_play().unwrap();
    game.update(5000.0).unwrap();

    assert_eq!(game.ball_state(), Some(BallState::Stuck));
    let paddle = game.paddle().unwrap().position;
    assert_eq!(game.ball().unwrap().position, paddle + Vec2::new(0.0, -10.0));
    assert_eq!(game.clock.dt, 0.0);
}

#[test]
fn test_gravity_before_displacement() {
    let settings = Settings {
        gravity: 100.0,
        ball_speed: 1.2,
        ..Default::default()
    };
    let mut game = Game::new(settings);
    game.load_level(1, &|_: u32| BrickPattern::empty()).unwrap();
    game.begin_play().unwrap();
    game.launch().unwrap();

    let ball_id = game.level().unwrap().ball;
    {
        let ball = game.playfield.get_mut(ball_id).unwrap();
        ball.position = Vec2::new(120.0, 120.0);
        ball.velocity = Vec2::new(50.0, -200.0);
    }
    game.update(0.0).unwrap();
    game.update(100.0).unwrap();

    let ball = game.ball().unwrap();
    assert!((ball.velocity.y + 190.0).abs() < 1e-3);
    assert!((ball.position.y - (120.0 - 190.0 * 0.12)).abs() < 1e-3);
}

#[test]
fn test_pointer_clamped_to_right_bound() {
    let mut game = Game::new(Settings::default());
    game.load_level(1, &BuiltinPatterns).unwrap();
    game.begin_play().unwrap();

    for x in [224.0, 224.5, 300.0, f32::MAX] {
        game.handle_input(InputEvent::PointerMove(Vec2::new(x, 0.0)))
            .unwrap();
        assert_eq!(game.paddle().unwrap().position.x, 224.0);
    }
}

#[test]
fn test_five_brick_row_layout() {
    let settings = Settings {
        game_size: Vec2::new(240.0, 240.0),
        brick_gap: Vec2::new(3.0, 3.0),
        ..Default::default()
    };
    let mut game = Game::new(settings);
    game.load_level(1, &row_of(5)).unwrap();

    let bricks: Vec<_> = game
        .bricks()
        .iter()
        .map(|id| game.playfield.get(*id).unwrap().clone())
        .collect();
    assert_eq!(bricks.len(), 5);

    let width: f32 = bricks.iter().map(|b| b.size.x).sum::<f32>() + 3.0 * 6.0;
    assert!((width - 240.0).abs() < 4.0, "width {width}");
    for pair in bricks.windows(2) {
        assert!((pair[1].position.x - pair[0].position.x - 46.8).abs() < 1e-3);
    }
}

#[test]
fn test_destroying_last_brick_in_row() {
    let settings = Settings {
        gravity: 0.0,
        ..Default::default()
    };
    let mut game = Game::new(settings);
    let source = |_: u32| BrickPattern::from_rows(0, &["S.#.S"]).unwrap();
    game.load_level(1, &source).unwrap();
    game.begin_play().unwrap();
    game.launch().unwrap();

    let target = game.bricks()[1];
    let target_pos = game.playfield.get(target).unwrap().position;
    let ball_id = game.level().unwrap().ball;
    {
        let ball = game.playfield.get_mut(ball_id).unwrap();
        ball.position = target_pos + Vec2::new(0.0, 11.0);
        ball.velocity = Vec2::new(0.0, -100.0);
    }
    game.step(0.05).unwrap();

    assert!(!game.playfield.contains(target));
    assert!(!game.bricks().contains(&target));
    assert_eq!(game.bricks().len(), 2);
    for id in game.bricks() {
        assert_eq!(
            game.playfield.get(*id).unwrap().kind,
            EntityKind::Brick(BrickKind::Solid)
        );
    }
    let events = game.drain_events();
    assert!(events.contains(&GameEvent::BrickDestroyed(target)));
    assert!(events.contains(&GameEvent::LevelCleared));

    // Registry and brick list agree on the next frame
    game.step(0.016).unwrap();
    let registered = game.playfield.iter().filter(|(_, e)| e.is_brick()).count();
    assert_eq!(registered, game.bricks().len());
}

#[test]
fn test_same_seed_same_run() {
    let run = || {
        let settings = Settings {
            seed: 42,
            ..Default::default()
        };
        let surface = TextSurface::new(settings.game_size, 24, 12, 0);
        let mut game = Game::with_surface(settings, Box::new(surface));
        game.load_level(2, &BuiltinPatterns).unwrap();
        let driver = GameLoop {
            max_frames: Some(900),
            stop_when_cleared: true,
        };
        let stats = driver
            .run(
                &mut game,
                &mut FixedRateClock::sixty_hz(),
                &mut ScriptedInput::new([
                    (3, InputEvent::PointerMove(Vec2::new(90.0, 0.0))),
                    (10, InputEvent::LaunchPressed),
                ]),
            )
            .unwrap();
        (stats, game.ball().unwrap().position, game.bricks().to_vec())
    };

    let first = run();
    let second = run();
    assert_eq!(first.0, second.0);
    assert_eq!(first.1, second.1);
    assert_eq!(first.2, second.2);
    assert!(first.1.is_finite());
}
