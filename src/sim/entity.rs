//! Entity model shared by the paddle, bricks, ball and power-up tokens
//!
//! Kind-specific data lives in wrapper structs (`Ball`, `PowerUp`) that embed an
//! `Entity`, so collision code only ever needs the common box.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::powerup::PowerUpKind;
use crate::consts::WHITE;

/// Texture key for an entity; resolved to a real handle by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Background,
    Paddle,
    Ball,
    Block,
    BlockSolid,
    PowerUp(PowerUpKind),
}

impl Sprite {
    /// Asset name used to look the texture up
    pub fn texture_name(&self) -> &'static str {
        match self {
            Sprite::Background => "background",
            Sprite::Paddle => "paddle",
            Sprite::Ball => "face",
            Sprite::Block => "block",
            Sprite::BlockSolid => "block_solid",
            Sprite::PowerUp(kind) => kind.texture_name(),
        }
    }
}

/// Positional/kinematic state of a game object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    /// Box extent (non-negative)
    pub size: Vec2,
    pub vel: Vec2,
    pub color: Vec3,
    /// Render-only
    pub rotation: f32,
    /// Indestructible
    pub solid: bool,
    /// Logically removed; may still be stored
    pub destroyed: bool,
    pub sprite: Sprite,
}

impl Entity {
    /// White, motionless entity
    pub fn new(pos: Vec2, size: Vec2, sprite: Sprite) -> Self {
        Self {
            pos,
            size: size.max(Vec2::ZERO),
            vel: Vec2::ZERO,
            color: WHITE,
            rotation: 0.0,
            solid: false,
            destroyed: false,
            sprite,
        }
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = color;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Bounding box as (min, max)
    #[inline]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        (self.pos, self.pos + self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// The ball: a circle inside a `2 * radius` square sprite box
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub body: Entity,
    pub radius: f32,
    /// Glued to the paddle; not integrated
    pub stuck: bool,
    /// Next paddle contact re-glues the ball
    pub sticky: bool,
    /// Ignores bounce response against non-solid bricks
    pub pass_through: bool,
}

impl Ball {
    pub fn new(pos: Vec2, radius: f32, vel: Vec2) -> Self {
        Self {
            body: Entity::new(pos, Vec2::splat(radius * 2.0), Sprite::Ball).with_velocity(vel),
            radius,
            stuck: true,
            sticky: false,
            pass_through: false,
        }
    }

    /// Circle centre
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.body.pos + self.radius
    }

    /// Integrate position and bounce off the left, right and top walls.
    ///
    /// The bottom edge is left open; falling past it is a life-loss condition
    /// handled by the game update.
    pub fn advance(&mut self, dt: f32, field_width: f32) -> Vec2 {
        if self.stuck {
            return self.body.pos;
        }

        let body = &mut self.body;
        body.pos += body.vel * dt;

        if body.pos.x <= 0.0 {
            body.vel.x = -body.vel.x;
            body.pos.x = 0.0;
        } else if body.pos.x + body.size.x >= field_width {
            body.vel.x = -body.vel.x;
            body.pos.x = field_width - body.size.x;
        }
        if body.pos.y <= 0.0 {
            body.vel.y = -body.vel.y;
            body.pos.y = 0.0;
        }

        body.pos
    }

    /// Glue the ball back to a launch position and drop any ball modes
    pub fn reset(&mut self, pos: Vec2, vel: Vec2) {
        self.body.pos = pos;
        self.body.vel = vel;
        self.body.color = WHITE;
        self.stuck = true;
        self.sticky = false;
        self.pass_through = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDTH: f32 = 800.0;

    fn free_ball(pos: Vec2, vel: Vec2) -> Ball {
        let mut ball = Ball::new(pos, 12.5, vel);
        ball.stuck = false;
        ball
    }

    #[test]
    fn test_entity_defaults() {
        let e = Entity::new(Vec2::new(10.0, 20.0), Vec2::new(30.0, 40.0), Sprite::Block);
        assert_eq!(e.color, Vec3::ONE);
        assert_eq!(e.vel, Vec2::ZERO);
        assert!(!e.solid && !e.destroyed);
        assert_eq!(e.bounds(), (Vec2::new(10.0, 20.0), Vec2::new(40.0, 60.0)));
        assert_eq!(e.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_ball_size_is_diameter() {
        let ball = Ball::new(Vec2::ZERO, 12.5, Vec2::ZERO);
        assert_eq!(ball.body.size, Vec2::splat(25.0));
        assert_eq!(ball.center(), Vec2::splat(12.5));
        assert!(ball.stuck);
    }

    #[test]
    fn test_stuck_ball_does_not_move() {
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), 12.5, Vec2::new(100.0, -250.0));
        ball.advance(1.0, WIDTH);
        assert_eq!(ball.body.pos, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_free_ball_integrates() {
        let mut ball = free_ball(Vec2::new(100.0, 300.0), Vec2::new(100.0, -250.0));
        ball.advance(0.1, WIDTH);
        assert!((ball.body.pos - Vec2::new(110.0, 275.0)).length() < 1e-4);
    }

    #[test]
    fn test_left_wall_bounce() {
        let mut ball = free_ball(Vec2::new(2.0, 300.0), Vec2::new(-100.0, 0.0));
        ball.advance(0.1, WIDTH);
        assert_eq!(ball.body.pos.x, 0.0);
        assert_eq!(ball.body.vel.x, 100.0);
    }

    #[test]
    fn test_right_wall_bounce() {
        let mut ball = free_ball(Vec2::new(770.0, 300.0), Vec2::new(100.0, 0.0));
        ball.advance(0.1, WIDTH);
        assert_eq!(ball.body.pos.x, WIDTH - 25.0);
        assert_eq!(ball.body.vel.x, -100.0);
    }

    #[test]
    fn test_top_wall_bounce() {
        let mut ball = free_ball(Vec2::new(300.0, 5.0), Vec2::new(0.0, -100.0));
        ball.advance(0.1, WIDTH);
        assert_eq!(ball.body.pos.y, 0.0);
        assert_eq!(ball.body.vel.y, 100.0);
    }

    #[test]
    fn test_bottom_edge_not_clamped() {
        let mut ball = free_ball(Vec2::new(300.0, 590.0), Vec2::new(0.0, 250.0));
        ball.advance(0.1, WIDTH);
        assert!(ball.body.pos.y > 600.0);
        assert_eq!(ball.body.vel.y, 250.0);
    }

    #[test]
    fn test_reset_clears_modes() {
        let mut ball = free_ball(Vec2::new(300.0, 300.0), Vec2::new(10.0, 10.0));
        ball.sticky = true;
        ball.pass_through = true;
        ball.body.color = Vec3::new(1.0, 0.5, 0.5);
        ball.reset(Vec2::new(1.0, 2.0), Vec2::new(100.0, -250.0));
        assert!(ball.stuck);
        assert!(!ball.sticky);
        assert!(!ball.pass_through);
        assert_eq!(ball.body.pos, Vec2::new(1.0, 2.0));
        assert_eq!(ball.body.vel, Vec2::new(100.0, -250.0));
        assert_eq!(ball.body.color, Vec3::ONE);
    }
}
