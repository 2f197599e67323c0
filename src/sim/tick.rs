//! Per-frame update
//!
//! The host calls `process_input(dt)` then `update(dt)` once per frame. Every
//! step of `update` runs in a fixed order regardless of phase; steps that only
//! make sense mid-game are no-ops while the ball is stuck.

use glam::Vec2;

use super::collision::{ball_box_collision, resolve_penetration};
use super::powerup::{collect_power_ups, spawn_power_ups, update_power_ups};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::input::{Key, KeyState};

/// Apply the current key state for one frame
pub fn process_input(state: &mut GameState, keys: &mut KeyState, dt: f32) {
    match state.phase {
        GamePhase::Active => {
            let velocity = PADDLE_SPEED * dt;
            if keys.is_down(Key::Left) && state.paddle.pos.x >= 0.0 {
                state.paddle.pos.x -= velocity;
                if state.ball.stuck {
                    state.ball.body.pos.x -= velocity;
                }
            }
            if keys.is_down(Key::Right)
                && state.paddle.pos.x <= state.field_width - state.paddle.size.x
            {
                state.paddle.pos.x += velocity;
                if state.ball.stuck {
                    state.ball.body.pos.x += velocity;
                }
            }
            if keys.is_down(Key::Launch) {
                state.ball.stuck = false;
            }
        }
        GamePhase::Menu => {
            if keys.take_press(Key::Confirm) {
                state.set_phase(GamePhase::Active);
                state.events.push(GameEvent::Started);
            }
            if keys.take_press(Key::LevelUp) {
                state.select_level(true);
            }
            if keys.take_press(Key::LevelDown) {
                state.select_level(false);
            }
        }
        GamePhase::Win => {
            if keys.take_press(Key::Confirm) {
                state.effects.chaos = false;
                state.set_phase(GamePhase::Menu);
            }
        }
    }
}

/// Advance the game by one frame.
///
/// Raised events queue up in `state.events`; the host drains them once per
/// frame with `GameState::drain_events`.
pub fn update(state: &mut GameState, dt: f32) {
    state.ball.advance(dt, state.field_width);

    process_collisions(state);

    state.particles.update(
        dt,
        &state.ball.body,
        TRAIL_PARTICLES,
        Vec2::splat(state.ball.radius / 2.0),
    );

    if state.shake_time > 0.0 {
        state.shake_time -= dt;
        if state.shake_time <= 0.0 {
            state.effects.shake = false;
        }
    }

    update_power_ups(
        &mut state.power_ups,
        dt,
        &mut state.ball,
        &mut state.paddle,
        &mut state.effects,
    );

    // Ball fell past the bottom edge
    if state.ball.body.pos.y >= state.field_height {
        state.lives = state.lives.saturating_sub(1);
        log::info!("Life lost, {} left", state.lives);
        state.events.push(GameEvent::LifeLost { lives: state.lives });
        if state.lives == 0 {
            state.reset_level();
            state.set_phase(GamePhase::Menu);
            state.events.push(GameEvent::GameOver);
        }
        state.reset_player();
    }

    if state.phase == GamePhase::Active && state.current_level().is_completed() {
        log::info!("Level {} cleared", state.current_level().name);
        state.reset_level();
        state.reset_player();
        state.effects.chaos = true;
        state.set_phase(GamePhase::Win);
        state.events.push(GameEvent::LevelWon);
    }
}

/// Ball vs bricks, paddle vs falling power-ups, then ball vs paddle.
///
/// Tokens spawned by this frame's bricks are only collectable from the next
/// frame on.
fn process_collisions(state: &mut GameState) {
    let existing = state.power_ups.len();
    brick_collisions(state);

    let collected = collect_power_ups(
        &mut state.power_ups[..existing],
        state.field_height,
        &mut state.ball,
        &mut state.paddle,
        &mut state.effects,
    );
    state
        .events
        .extend(collected.into_iter().map(GameEvent::PowerUpCollected));

    if !state.ball.stuck && ball_box_collision(&state.ball, &state.paddle).hit {
        bounce_off_paddle(state);
        state.events.push(GameEvent::PaddleHit);
    }
}

fn brick_collisions(state: &mut GameState) {
    let level = &mut state.levels[state.level];
    for brick in level.bricks.iter_mut().filter(|b| !b.destroyed) {
        let collision = ball_box_collision(&state.ball, brick);
        if !collision.hit {
            continue;
        }

        if brick.solid {
            state.shake_time = SHAKE_TIME;
            state.effects.shake = true;
            state.events.push(GameEvent::SolidHit);
        } else {
            brick.destroyed = true;
            state.events.push(GameEvent::BrickDestroyed { pos: brick.pos });
            let spawned = spawn_power_ups(&mut state.rng, &state.spawn_rates, brick.pos);
            for power_up in spawned {
                log::debug!("Spawned {:?} at {}", power_up.kind, brick.pos);
                state.events.push(GameEvent::PowerUpSpawned(power_up.kind));
                state.power_ups.push(power_up);
            }
        }

        if !(state.ball.pass_through && !brick.solid) {
            resolve_penetration(&mut state.ball, &collision);
        }
    }
}

/// Rebound off the paddle; where the ball lands sets the outgoing angle.
///
/// Speed is preserved (including any speed boost); only direction changes.
/// A sticky ball glues itself back to the paddle instead of flying off.
fn bounce_off_paddle(state: &mut GameState) {
    let ball = &mut state.ball;
    let paddle = &state.paddle;

    ball.stuck = ball.sticky;

    let paddle_center = paddle.pos.x + paddle.size.x / 2.0;
    let distance = ball.body.pos.x + ball.radius - paddle_center;
    let percentage = distance / (paddle.size.x / 2.0);

    let old_vel = ball.body.vel;
    let new_vel = Vec2::new(
        INITIAL_BALL_VELOCITY.x * percentage * PADDLE_BOUNCE_STRENGTH,
        -old_vel.y.abs(),
    );
    ball.body.vel = new_vel.normalize_or_zero() * old_vel.length();
}
