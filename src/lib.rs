//! Brickfall - paddle-and-ball brick breaking
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (kinematics, collisions, power-ups, game state)
//! - `input`: Key table with single-press debouncing
//! - `render`: Sprite/asset seam consumed by a host renderer
//! - `audio`: Sound effects triggered by simulation events
//! - `config`: Data-driven game setup

pub mod audio;
pub mod config;
pub mod input;
pub mod render;
pub mod sim;

pub use config::GameConfig;
pub use input::{Key, KeyState};

/// Game configuration constants
pub mod consts {
    use glam::{Vec2, Vec3};

    /// Default play-field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_SIZE: Vec2 = Vec2::new(100.0, 20.0);
    /// Paddle speed (pixels/s)
    pub const PADDLE_SPEED: f32 = 500.0;
    /// Horizontal deflection strength when the ball hits off-centre
    pub const PADDLE_BOUNCE_STRENGTH: f32 = 2.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.5;
    pub const INITIAL_BALL_VELOCITY: Vec2 = Vec2::new(100.0, -250.0);

    pub const STARTING_LIVES: u32 = 3;

    /// Power-up token defaults
    pub const POWERUP_SIZE: Vec2 = Vec2::new(60.0, 20.0);
    pub const POWERUP_VELOCITY: Vec2 = Vec2::new(0.0, 150.0);
    /// 1-in-N spawn chance for beneficial power-ups
    pub const GOOD_RATE: u32 = 75;
    /// 1-in-N spawn chance for detrimental power-ups (spawn more often)
    pub const BAD_RATE: u32 = 15;
    /// Ball velocity multiplier for the speed power-up
    pub const SPEED_BOOST: f32 = 1.2;
    /// Paddle width gained from the pad-size-increase power-up
    pub const PAD_SIZE_INCREASE: f32 = 50.0;

    /// Screen shake after a solid brick hit (seconds)
    pub const SHAKE_TIME: f32 = 0.05;

    /// Events kept for a host that has not drained them yet
    pub const MAX_PENDING_EVENTS: usize = 1024;

    /// Ball-trail particles
    pub const MAX_PARTICLES: usize = 500;
    /// Particles respawned at the ball each frame
    pub const TRAIL_PARTICLES: usize = 2;
    /// Seconds a trail particle lives
    pub const PARTICLE_LIFE: f32 = 1.0;
    /// Alpha lost per second
    pub const PARTICLE_FADE_RATE: f32 = 2.5;
    /// Rendered particle edge length
    pub const PARTICLE_SIZE: f32 = 10.0;
    /// Mixed into the game seed so trails get their own RNG stream
    pub const PARTICLE_SEED_SALT: u64 = 0x7472_6169_6c00_0000;

    pub const WHITE: Vec3 = Vec3::ONE;
    pub const STICKY_PADDLE_TINT: Vec3 = Vec3::new(1.0, 0.5, 1.0);
    pub const PASS_THROUGH_BALL_TINT: Vec3 = Vec3::new(1.0, 0.5, 0.5);
}
