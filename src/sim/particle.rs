//! Ball-trail particles
//!
//! A fixed-size pool: each frame a few dead slots are respawned at the ball and
//! every live particle drifts against the ball's motion while fading out.
//! Purely visual; the pool owns its own RNG stream so it never perturbs
//! power-up spawns.

use glam::{Vec2, Vec3};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::Entity;
use crate::consts::*;

/// A single trail particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: Vec3,
    /// 1.0 when spawned, fades with age
    pub alpha: f32,
    /// Seconds left; dead at <= 0
    pub life: f32,
}

impl Default for Particle {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            color: Vec3::ONE,
            alpha: 1.0,
            life: 0.0,
        }
    }
}

impl Particle {
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life > 0.0
    }
}

/// Fixed pool of trail particles
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    /// Where the search for a free slot resumes
    last_used: usize,
    rng: Pcg32,
}

impl ParticlePool {
    pub fn new(capacity: usize, seed: u64) -> Self {
        Self {
            particles: vec![Particle::default(); capacity],
            last_used: 0,
            rng: Pcg32::seed_from_u64(seed ^ PARTICLE_SEED_SALT),
        }
    }

    pub fn capacity(&self) -> usize {
        self.particles.len()
    }

    /// Particles still alive, in slot order
    pub fn live(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(|p| p.is_alive())
    }

    /// Respawn `spawn` particles at `source` (shifted by `offset`), then age
    /// every particle by `dt`
    pub fn update(&mut self, dt: f32, source: &Entity, spawn: usize, offset: Vec2) {
        if self.particles.is_empty() {
            return;
        }

        for _ in 0..spawn {
            let slot = self.first_unused();
            self.respawn(slot, source, offset);
        }

        for particle in self.particles.iter_mut() {
            particle.life -= dt;
            if particle.is_alive() {
                particle.pos -= particle.vel * dt;
                particle.alpha -= dt * PARTICLE_FADE_RATE;
            }
        }
    }

    /// First dead slot after the last one used, wrapping; slot 0 when every
    /// particle is alive
    fn first_unused(&mut self) -> usize {
        let len = self.particles.len();
        let found = (self.last_used..len)
            .chain(0..self.last_used)
            .find(|&i| !self.particles[i].is_alive());
        self.last_used = found.unwrap_or(0);
        self.last_used
    }

    fn respawn(&mut self, slot: usize, source: &Entity, offset: Vec2) {
        let jitter = self.rng.random_range(-50..50) as f32 / 10.0;
        let shade = 0.5 + self.rng.random_range(0..100) as f32 / 100.0;
        self.particles[slot] = Particle {
            pos: source.pos + Vec2::splat(jitter) + offset,
            vel: source.vel * 0.1,
            color: Vec3::splat(shade),
            alpha: 1.0,
            life: PARTICLE_LIFE,
        };
    }
}
