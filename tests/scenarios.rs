//! End-to-end frame scenarios through the public API

use glam::Vec2;

use brickfall::consts::{INITIAL_BALL_VELOCITY, STARTING_LIVES};
use brickfall::sim::{Direction, GameEvent, GamePhase, GameState, Level, ball_box_collision, update};
use brickfall::{GameConfig, Key, KeyState};

const DT: f32 = 1.0 / 60.0;

fn game(source: &str) -> GameState {
    let config = GameConfig::default();
    let level = Level::parse("scenario", source, config.field_width, config.field_height / 2.0)
        .expect("level parses");
    GameState::new(&config, vec![level]).expect("game builds")
}

#[test]
fn ball_breaks_brick_and_bounces() {
    let mut state = game("2 2\n");
    let bricks = &mut state.levels[0].bricks;
    bricks[0].pos = Vec2::new(100.0, 100.0);
    bricks[0].size = Vec2::new(60.0, 20.0);
    // Second brick parked out of the way so the level stays incomplete
    bricks[1].pos = Vec2::new(600.0, 0.0);
    bricks[1].size = Vec2::new(50.0, 20.0);
    state.phase = GamePhase::Active;
    state.ball.stuck = false;
    state.ball.body.pos = Vec2::new(120.0, 110.0);
    state.ball.body.vel = Vec2::new(100.0, -250.0);

    let hit = ball_box_collision(&state.ball, &state.levels[0].bricks[0]);
    assert!(hit.hit);
    assert!(matches!(hit.direction, Direction::Up | Direction::Down));

    // Zero dt keeps the ball where the scenario puts it
    update(&mut state, 0.0);

    let brick = &state.levels[0].bricks[0];
    assert!(brick.destroyed);
    assert_eq!(state.ball.body.vel.y, 250.0);
    let ball_top = state.ball.body.pos.y;
    assert!(ball_top >= brick.pos.y + brick.size.y - 1e-4);
    assert!(!ball_box_collision(&state.ball, brick).hit);
    assert!(state
        .drain_events()
        .iter()
        .any(|e| matches!(e, GameEvent::BrickDestroyed { .. })));
}

#[test]
fn last_life_reloads_level_and_returns_to_menu() {
    let mut state = game("2 2\n1 2\n");
    state.phase = GamePhase::Active;
    state.lives = 1;
    state.levels[0].bricks[0].destroyed = true;
    state.ball.stuck = false;
    state.ball.body.pos = Vec2::new(300.0, 610.0);

    update(&mut state, DT);

    assert_eq!(state.phase, GamePhase::Menu);
    assert!(state.levels[0].bricks.iter().all(|b| !b.destroyed));
    // Reloading the level restores the starting lives
    assert_eq!(state.lives, STARTING_LIVES);
    let events = state.drain_events();
    assert!(events.contains(&GameEvent::LifeLost { lives: 0 }));
    assert!(events.contains(&GameEvent::GameOver));
}

#[test]
fn clearing_level_wins_and_resets() {
    let mut state = game("2 1 2\n0 2 0\n");
    state.phase = GamePhase::Active;
    for brick in state.levels[0].bricks.iter_mut().filter(|b| !b.solid) {
        brick.destroyed = true;
    }
    state.ball.stuck = false;
    state.ball.body.pos = Vec2::new(400.0, 400.0);
    state.paddle.pos.x = 10.0;

    update(&mut state, DT);

    assert_eq!(state.phase, GamePhase::Win);
    assert!(!state.levels[0].is_completed());
    assert!(state.ball.stuck);
    assert_eq!(state.ball.body.vel, INITIAL_BALL_VELOCITY);
    assert_eq!(state.paddle.pos, Vec2::new(350.0, 580.0));
    assert!(state.effects.chaos);
}

#[test]
fn full_round_from_menu() {
    let mut state = GameState::from_config(&GameConfig::default()).expect("builtin levels");
    let mut keys = KeyState::new();

    keys.press(Key::Confirm);
    brickfall::sim::process_input(&mut state, &mut keys, DT);
    assert_eq!(state.phase, GamePhase::Active);

    keys.press(Key::Launch);
    brickfall::sim::process_input(&mut state, &mut keys, DT);
    keys.release(Key::Launch);

    // Launched up and to the right from the paddle centre: the first brick
    // broken is in the bottom row of level one, about a second in
    let mut first_break = None;
    for frame in 0..90 {
        update(&mut state, DT);
        let hit = state.drain_events().into_iter().find_map(|e| match e {
            GameEvent::BrickDestroyed { pos } => Some(pos),
            _ => None,
        });
        if let Some(pos) = hit {
            first_break = Some((frame, pos));
            break;
        }
    }
    let (frame, pos) = first_break.expect("a brick breaks within 90 frames");
    assert!(frame > 45);
    assert_eq!(pos.y, 262.5);
    assert_eq!(state.lives, STARTING_LIVES);

    // Nobody steers, so the rebound falls past the paddle: one life, once
    let mut lost = None;
    for _ in 0..300 {
        update(&mut state, DT);
        let events = state.drain_events();
        let losses: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::LifeLost { .. }))
            .collect();
        if !losses.is_empty() {
            assert_eq!(losses.len(), 1);
            lost = Some(*losses[0]);
            break;
        }
    }
    assert_eq!(lost, Some(GameEvent::LifeLost { lives: STARTING_LIVES - 1 }));
    assert_eq!(state.lives, STARTING_LIVES - 1);
    assert!(state.ball.stuck);
    assert_eq!(state.phase, GamePhase::Active);
}
