//! Power-up tokens: spawning, collection, timed effects and expiry
//!
//! A token falls from a destroyed brick. Catching it with the paddle applies
//! its effect; timed effects run until the token's duration runs out, and are
//! only reverted when no other live token of the same kind is still running.

use glam::{Vec2, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::boxes_overlap;
use super::entity::{Ball, Entity, Sprite};
use crate::consts::*;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Speed,
    Sticky,
    PassThrough,
    PadSizeIncrease,
    Confuse,
    Chaos,
}

impl PowerUpKind {
    /// Spawn-trial order
    pub const ALL: [PowerUpKind; 6] = [
        PowerUpKind::Speed,
        PowerUpKind::Sticky,
        PowerUpKind::PassThrough,
        PowerUpKind::PadSizeIncrease,
        PowerUpKind::Confuse,
        PowerUpKind::Chaos,
    ];

    /// Beneficial kinds spawn at the rarer rate
    pub fn is_beneficial(&self) -> bool {
        !matches!(self, PowerUpKind::Confuse | PowerUpKind::Chaos)
    }

    /// Effect duration in seconds (0 = instant, never reverted)
    pub fn duration(&self) -> f32 {
        match self {
            PowerUpKind::Speed => 0.0,
            PowerUpKind::Sticky => 20.0,
            PowerUpKind::PassThrough => 10.0,
            PowerUpKind::PadSizeIncrease => 0.0,
            PowerUpKind::Confuse => 5.0,
            PowerUpKind::Chaos => 5.0,
        }
    }

    pub fn color(&self) -> Vec3 {
        match self {
            PowerUpKind::Speed => Vec3::new(0.5, 0.5, 1.0),
            PowerUpKind::Sticky => Vec3::new(1.0, 0.5, 1.0),
            PowerUpKind::PassThrough => Vec3::new(0.5, 1.0, 0.5),
            PowerUpKind::PadSizeIncrease => Vec3::new(1.0, 0.6, 0.4),
            PowerUpKind::Confuse => Vec3::new(1.0, 0.3, 0.3),
            PowerUpKind::Chaos => Vec3::new(0.9, 0.25, 0.25),
        }
    }

    pub fn texture_name(&self) -> &'static str {
        match self {
            PowerUpKind::Speed => "powerup_speed",
            PowerUpKind::Sticky => "powerup_sticky",
            PowerUpKind::PassThrough => "powerup_passthrough",
            PowerUpKind::PadSizeIncrease => "powerup_increase",
            PowerUpKind::Confuse => "powerup_confuse",
            PowerUpKind::Chaos => "powerup_chaos",
        }
    }
}

/// Token lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpState {
    /// Dropping towards the paddle; visible and collectable
    Falling,
    /// Caught; effect live while the timer runs
    Collected,
    /// Missed or timed out; removed on the next reap
    Expired,
}

/// A power-up token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub body: Entity,
    pub kind: PowerUpKind,
    /// Seconds of effect left; only counts down once collected
    pub duration: f32,
    pub state: PowerUpState,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            body: Entity::new(pos, POWERUP_SIZE, Sprite::PowerUp(kind))
                .with_color(kind.color())
                .with_velocity(POWERUP_VELOCITY),
            kind,
            duration: kind.duration(),
            state: PowerUpState::Falling,
        }
    }

    /// Effect is live
    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == PowerUpState::Collected
    }

    #[inline]
    pub fn is_falling(&self) -> bool {
        self.state == PowerUpState::Falling
    }

    fn collect(&mut self) {
        self.state = PowerUpState::Collected;
        self.body.destroyed = true;
    }

    fn expire(&mut self) {
        self.state = PowerUpState::Expired;
        self.body.destroyed = true;
    }

    /// Count the effect timer down; returns true on the tick it runs out
    fn tick_timer(&mut self, dt: f32) -> bool {
        if !self.is_active() {
            return false;
        }
        self.duration -= dt;
        if self.duration <= 0.0 {
            self.expire();
            return true;
        }
        false
    }
}

/// 1-in-N spawn denominators
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRates {
    /// Speed, sticky, pass-through, pad-size-increase
    pub good: u32,
    /// Confuse, chaos
    pub bad: u32,
}

impl Default for SpawnRates {
    fn default() -> Self {
        Self {
            good: GOOD_RATE,
            bad: BAD_RATE,
        }
    }
}

impl SpawnRates {
    pub fn rate_for(&self, kind: PowerUpKind) -> u32 {
        if kind.is_beneficial() { self.good } else { self.bad }
    }
}

/// Screen-space effects toggled by gameplay
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostEffects {
    pub shake: bool,
    pub confuse: bool,
    pub chaos: bool,
}

/// Uniform draw in `[0, rate)` hits zero
pub fn should_spawn<R: Rng>(rng: &mut R, rate: u32) -> bool {
    rate <= 1 || rng.random_range(0..rate) == 0
}

/// Run one independent trial per kind for a destroyed brick at `pos`
pub fn spawn_power_ups<R: Rng>(rng: &mut R, rates: &SpawnRates, pos: Vec2) -> Vec<PowerUp> {
    PowerUpKind::ALL
        .iter()
        .filter(|kind| should_spawn(&mut *rng, rates.rate_for(**kind)))
        .map(|&kind| PowerUp::new(kind, pos))
        .collect()
}

/// Apply a freshly collected power-up
pub fn activate(kind: PowerUpKind, ball: &mut Ball, paddle: &mut Entity, effects: &mut PostEffects) {
    match kind {
        PowerUpKind::Speed => ball.body.vel *= SPEED_BOOST,
        PowerUpKind::Sticky => {
            ball.sticky = true;
            paddle.color = STICKY_PADDLE_TINT;
        }
        PowerUpKind::PassThrough => {
            ball.pass_through = true;
            ball.body.color = PASS_THROUGH_BALL_TINT;
        }
        PowerUpKind::PadSizeIncrease => paddle.size.x += PAD_SIZE_INCREASE,
        PowerUpKind::Confuse => {
            if !effects.chaos {
                effects.confuse = true;
            }
        }
        PowerUpKind::Chaos => {
            if !effects.confuse {
                effects.chaos = true;
            }
        }
    }
}

/// Undo a timed effect. Instant kinds have nothing to undo.
pub fn deactivate(kind: PowerUpKind, ball: &mut Ball, paddle: &mut Entity, effects: &mut PostEffects) {
    match kind {
        PowerUpKind::Sticky => {
            ball.sticky = false;
            paddle.color = WHITE;
        }
        PowerUpKind::PassThrough => {
            ball.pass_through = false;
            ball.body.color = WHITE;
        }
        PowerUpKind::Confuse => effects.confuse = false,
        PowerUpKind::Chaos => effects.chaos = false,
        PowerUpKind::Speed | PowerUpKind::PadSizeIncrease => {}
    }
}

/// Paddle pass over falling tokens: collect and apply the ones touching the
/// paddle, drop the rest that left the field. Returns collected kinds.
///
/// A token still touching the paddle is caught even if it has reached the
/// bottom edge.
pub fn collect_power_ups(
    power_ups: &mut [PowerUp],
    field_height: f32,
    ball: &mut Ball,
    paddle: &mut Entity,
    effects: &mut PostEffects,
) -> Vec<PowerUpKind> {
    let mut collected = Vec::new();
    for power_up in power_ups.iter_mut().filter(|p| p.is_falling()) {
        if boxes_overlap(paddle, &power_up.body) {
            activate(power_up.kind, ball, paddle, effects);
            power_up.collect();
            log::info!("Power-up collected: {:?}", power_up.kind);
            collected.push(power_up.kind);
        } else if power_up.body.pos.y >= field_height {
            power_up.expire();
        }
    }
    collected
}

/// Move tokens, run effect timers, revert expired effects and reap.
///
/// An expiring effect is only reverted when no other token of the same kind
/// is still active, so overlapping pickups don't cancel each other.
pub fn update_power_ups(
    power_ups: &mut Vec<PowerUp>,
    dt: f32,
    ball: &mut Ball,
    paddle: &mut Entity,
    effects: &mut PostEffects,
) {
    for i in 0..power_ups.len() {
        let power_up = &mut power_ups[i];
        power_up.body.pos += power_up.body.vel * dt;
        if !power_up.tick_timer(dt) {
            continue;
        }

        let kind = power_up.kind;
        let still_running = power_ups.iter().any(|p| p.kind == kind && p.is_active());
        if still_running {
            log::debug!("{:?} expired, another still active", kind);
        } else {
            deactivate(kind, ball, paddle, effects);
            log::debug!("{:?} expired", kind);
        }
    }

    // Collected tokens stay until their timer runs out
    power_ups.retain(|p| p.state != PowerUpState::Expired);
}
