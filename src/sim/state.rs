//! Game state and top-level phase machine
//!
//! The paddle and ball are long-lived: resets move them back in place rather
//! than building new ones.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Entity, Sprite};
use super::level::{Level, LevelError};
use super::particle::ParticlePool;
use super::powerup::{PostEffects, PowerUp, PowerUpKind, SpawnRates};
use crate::config::GameConfig;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Level select, waiting for Confirm
    Menu,
    /// Gameplay running
    Active,
    /// Level cleared banner
    Win,
}

/// Something the host may want to react to (sound, UI)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BrickDestroyed { pos: Vec2 },
    SolidHit,
    PaddleHit,
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    LifeLost { lives: u32 },
    GameOver,
    LevelWon,
    LevelSelected(usize),
    Started,
}

/// Events pending for the host, oldest first.
///
/// Holds at most `MAX_PENDING_EVENTS`; a host that never drains loses the
/// oldest events rather than growing without bound.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<GameEvent>,
}

impl EventQueue {
    pub fn push(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    pub fn extend(&mut self, events: impl IntoIterator<Item = GameEvent>) {
        for event in events {
            self.push(event);
        }
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Take everything pending, oldest first
    pub fn drain(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub field_width: f32,
    pub field_height: f32,
    pub phase: GamePhase,
    pub levels: Vec<Level>,
    /// Index into `levels`; always in range
    pub level: usize,
    pub power_ups: Vec<PowerUp>,
    pub paddle: Entity,
    pub ball: Ball,
    pub lives: u32,
    pub starting_lives: u32,
    pub effects: PostEffects,
    /// Seconds of screen shake left
    pub shake_time: f32,
    pub spawn_rates: SpawnRates,
    pub rng: Pcg32,
    /// Ball trail (visual only)
    pub particles: ParticlePool,
    /// Events raised since the last drain
    pub events: EventQueue,
}

impl GameState {
    /// Build a game over the given levels (must not be empty)
    pub fn new(config: &GameConfig, levels: Vec<Level>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::NoLevels);
        }

        let paddle_pos = paddle_start(config.field_width, config.field_height);
        let paddle = Entity::new(paddle_pos, PADDLE_SIZE, Sprite::Paddle);
        let ball = Ball::new(ball_start(paddle_pos), BALL_RADIUS, INITIAL_BALL_VELOCITY);

        log::info!(
            "New game: {}x{} field, {} levels, seed {}",
            config.field_width,
            config.field_height,
            levels.len(),
            config.seed
        );

        Ok(Self {
            field_width: config.field_width,
            field_height: config.field_height,
            phase: GamePhase::Menu,
            levels,
            level: 0,
            power_ups: Vec::new(),
            paddle,
            ball,
            lives: config.starting_lives,
            starting_lives: config.starting_lives,
            effects: PostEffects::default(),
            shake_time: 0.0,
            spawn_rates: config.spawn_rates,
            rng: Pcg32::seed_from_u64(config.seed),
            particles: ParticlePool::new(MAX_PARTICLES, config.seed),
            events: EventQueue::default(),
        })
    }

    /// Load the configured levels (or the built-in set) over the top half of the field
    pub fn from_config(config: &GameConfig) -> Result<Self, LevelError> {
        let (width, height) = (config.field_width, config.field_height / 2.0);
        let levels = if config.levels.is_empty() {
            Level::builtin(width, height)?
        } else {
            config
                .levels
                .iter()
                .map(|path| Level::load(path, width, height))
                .collect::<Result<Vec<_>, _>>()?
        };
        Self::new(config, levels)
    }

    pub fn current_level(&self) -> &Level {
        &self.levels[self.level]
    }

    /// Move the level selection, wrapping in both directions
    pub fn select_level(&mut self, forward: bool) {
        let count = self.levels.len();
        self.level = if forward {
            (self.level + 1) % count
        } else {
            (self.level + count - 1) % count
        };
        log::info!("Level {} selected", self.level);
        self.events.push(GameEvent::LevelSelected(self.level));
    }

    pub fn set_phase(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Rebuild the current level's bricks and restore lives
    pub fn reset_level(&mut self) {
        self.lives = self.starting_lives;
        let level = &mut self.levels[self.level];
        if let Err(err) = level.reload() {
            log::error!("Failed to reload level {}: {}", level.name, err);
        }
    }

    /// Put the paddle back to its start size/position and glue the ball to it
    pub fn reset_player(&mut self) {
        let paddle_pos = paddle_start(self.field_width, self.field_height);
        self.paddle.size = PADDLE_SIZE;
        self.paddle.pos = paddle_pos;
        self.paddle.color = WHITE;
        self.ball.reset(ball_start(paddle_pos), INITIAL_BALL_VELOCITY);
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain()
    }
}

/// Paddle resting position: bottom-centre of the field
pub fn paddle_start(field_width: f32, field_height: f32) -> Vec2 {
    Vec2::new(field_width / 2.0 - PADDLE_SIZE.x / 2.0, field_height - PADDLE_SIZE.y)
}

/// Ball resting position: centred on top of the paddle
pub fn ball_start(paddle_pos: Vec2) -> Vec2 {
    paddle_pos + Vec2::new(PADDLE_SIZE.x / 2.0 - BALL_RADIUS, -BALL_RADIUS * 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameState {
        GameState::from_config(&GameConfig::default()).unwrap()
    }

    #[test]
    fn test_new_game_starts_in_menu() {
        let state = game();
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.levels.len(), 4);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(state.ball.stuck);
        assert_eq!(state.paddle.pos, Vec2::new(350.0, 580.0));
        assert_eq!(state.ball.body.pos, Vec2::new(387.5, 555.0));
    }

    #[test]
    fn test_no_levels_rejected() {
        let err = GameState::new(&GameConfig::default(), Vec::new()).unwrap_err();
        assert!(matches!(err, LevelError::NoLevels));
    }

    #[test]
    fn test_level_selection_wraps() {
        let mut state = game();
        state.select_level(false);
        assert_eq!(state.level, 3);
        state.select_level(true);
        assert_eq!(state.level, 0);
        for _ in 0..9 {
            state.select_level(true);
        }
        assert_eq!(state.level, 1);
    }

    #[test]
    fn test_reset_player_restores_paddle() {
        let mut state = game();
        state.paddle.size.x += 50.0;
        state.paddle.pos.x = 10.0;
        state.paddle.color = STICKY_PADDLE_TINT;
        state.ball.stuck = false;
        state.ball.sticky = true;
        state.reset_player();
        assert_eq!(state.paddle.size, PADDLE_SIZE);
        assert_eq!(state.paddle.pos, Vec2::new(350.0, 580.0));
        assert_eq!(state.paddle.color, WHITE);
        assert!(state.ball.stuck && !state.ball.sticky);
        assert_eq!(state.ball.body.vel, INITIAL_BALL_VELOCITY);
    }

    #[test]
    fn test_undrained_events_are_capped() {
        let mut state = game();
        for _ in 0..MAX_PENDING_EVENTS + 10 {
            state.events.push(GameEvent::PaddleHit);
        }
        state.events.push(GameEvent::LevelWon);
        assert_eq!(state.events.len(), MAX_PENDING_EVENTS);

        let events = state.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::LevelWon));
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_reset_level_restores_bricks_and_lives() {
        let mut state = game();
        state.lives = 1;
        state.levels[0].bricks[0].destroyed = true;
        state.reset_level();
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(!state.levels[0].bricks[0].destroyed);
    }
}
