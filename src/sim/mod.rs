//! Simulation module
//!
//! All gameplay logic lives here:
//! - Single-threaded, frame-driven; every step runs to completion in order
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod entity;
pub mod level;
pub mod particle;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, Direction, ball_box_collision, boxes_overlap, vector_direction};
pub use entity::{Ball, Entity, Sprite};
pub use level::{Level, LevelError};
pub use particle::{Particle, ParticlePool};
pub use powerup::{PostEffects, PowerUp, PowerUpKind, PowerUpState, SpawnRates, should_spawn};
pub use state::{EventQueue, GameEvent, GamePhase, GameState};
pub use tick::{process_input, update};
