//! Collision detection and response for boxes and the ball
//!
//! The ball is tested as a circle against axis-aligned boxes. A hit reports
//! which side of the box was struck (via the closest-point delta) so the
//! response can reflect one velocity axis and push the ball back out.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Entity};

/// Side classification of an impact
///
/// Screen space has +Y pointing down, so `Up` means the ball sits above the
/// box and must be pushed towards smaller Y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    const COMPASS: [(Direction, Vec2); 4] = [
        (Direction::Up, Vec2::new(0.0, 1.0)),
        (Direction::Right, Vec2::new(1.0, 0.0)),
        (Direction::Down, Vec2::new(0.0, -1.0)),
        (Direction::Left, Vec2::new(-1.0, 0.0)),
    ];

    #[inline]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Classify a vector by its closest compass direction.
///
/// Only a strictly positive dot product can win, so a zero vector falls back
/// to `Up`.
pub fn vector_direction(target: Vec2) -> Direction {
    let target = target.normalize_or_zero();
    let mut max = 0.0;
    let mut best = Direction::Up;
    for (dir, compass) in Direction::COMPASS {
        let dot = target.dot(compass);
        if dot > max {
            max = dot;
            best = dir;
        }
    }
    best
}

/// Result of a ball-vs-box check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Struck side (meaningless on a miss)
    pub direction: Direction,
    /// Closest box point minus circle centre (for penetration depth)
    pub delta: Vec2,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            direction: Direction::Up,
            delta: Vec2::ZERO,
        }
    }
}

/// AABB overlap with inclusive edges
pub fn boxes_overlap(a: &Entity, b: &Entity) -> bool {
    let (a_min, a_max) = a.bounds();
    let (b_min, b_max) = b.bounds();
    let overlap_x = a_max.x >= b_min.x && b_max.x >= a_min.x;
    let overlap_y = a_max.y >= b_min.y && b_max.y >= a_min.y;
    overlap_x && overlap_y
}

/// Circle-vs-AABB test for the ball against a box
pub fn ball_box_collision(ball: &Ball, target: &Entity) -> CollisionResult {
    circle_box_collision(ball.center(), ball.radius, target)
}

/// Circle-vs-AABB test
pub fn circle_box_collision(center: Vec2, radius: f32, target: &Entity) -> CollisionResult {
    let half_extents = target.size / 2.0;
    let box_center = target.pos + half_extents;

    // Closest point on the box to the circle centre
    let clamped = (center - box_center).clamp(-half_extents, half_extents);
    let closest = box_center + clamped;
    let delta = closest - center;

    if delta.length() < radius {
        CollisionResult {
            hit: true,
            direction: vector_direction(delta),
            delta,
        }
    } else {
        CollisionResult::miss()
    }
}

/// Reflect the struck axis and push the ball out of the box along it
pub fn resolve_penetration(ball: &mut Ball, collision: &CollisionResult) {
    let body = &mut ball.body;
    if collision.direction.is_horizontal() {
        body.vel.x = -body.vel.x;
        let penetration = ball.radius - collision.delta.x.abs();
        if collision.direction == Direction::Left {
            body.pos.x += penetration;
        } else {
            body.pos.x -= penetration;
        }
    } else {
        body.vel.y = -body.vel.y;
        let penetration = ball.radius - collision.delta.y.abs();
        if collision.direction == Direction::Up {
            body.pos.y -= penetration;
        } else {
            body.pos.y += penetration;
        }
    }
}
