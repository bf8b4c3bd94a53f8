//! Projectile system for answer-triggered attacks.
//!
//! A correct answer fires a projectile from a shooter toward a target. Its
//! direction is fixed at creation; hits are resolved by proximity to the aimed
//! target and by a broad-phase overlap test against every foe.

use macroquad::math::Vec2;

use super::foe::EntityId;
use super::geometric_utils::{self, Bounds};
use super::locatable::Locatable;

/// Size used for projectiles that don't specify one.
pub const DEFAULT_SIZE: Vec2 = Vec2::new(6.0, 12.0);

/// Coincidence threshold used by [`Projectile::fire`].
pub const DEFAULT_DIRECTION_EPSILON: f32 = 0.1;

/// A projectile fired at a foe after a correct answer.
///
/// Projectiles travel in a straight line at constant velocity. They are
/// discarded once they leave the playing field by more than a margin.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Current position in 2D space.
    pub pos: Vec2,
    /// Velocity vector (direction and speed), set once at creation.
    pub velocity: Vec2,
    /// Collision box size.
    pub size: Vec2,
    /// Foe this projectile was aimed at, if any. Lookup only: the foe may be
    /// destroyed independently.
    pub target: Option<EntityId>,
}

impl Projectile {
    /// Fires a projectile from `shooter_pos` toward `target_pos`.
    ///
    /// # Arguments
    ///
    /// * `shooter_pos` - Starting position
    /// * `target_pos` - Point being aimed at
    /// * `speed` - Velocity magnitude in units per second
    ///
    /// # Returns
    ///
    /// A projectile whose velocity has magnitude `speed`. If the two points
    /// coincide the projectile flies straight up.
    pub fn fire(shooter_pos: Vec2, target_pos: Vec2, speed: f32) -> Self {
        Self::fire_with_epsilon(shooter_pos, target_pos, speed, DEFAULT_DIRECTION_EPSILON)
    }

    /// Same as [`Projectile::fire`] with an explicit coincidence threshold.
    pub fn fire_with_epsilon(shooter_pos: Vec2, target_pos: Vec2, speed: f32, epsilon: f32) -> Self {
        Self {
            pos: shooter_pos,
            velocity: geometric_utils::steer(shooter_pos, target_pos, speed, epsilon),
            size: DEFAULT_SIZE,
            target: None,
        }
    }

    /// Marks the foe this projectile is aimed at.
    pub fn aimed_at(mut self, target: EntityId) -> Self {
        self.target = Some(target);
        self
    }

    /// Overrides the collision box size.
    pub fn with_size(mut self, size: Vec2) -> Self {
        self.size = size;
        self
    }

    /// Checks whether the projectile has left `field` by more than `margin`.
    ///
    /// # Returns
    ///
    /// `true` if the projectile should be removed, `false` otherwise.
    pub fn is_expired(&self, field: &Bounds, margin: f32) -> bool {
        !field.expanded(margin).contains(self.pos)
    }

    /// Whether the projectile is within the proximity radius of a target
    /// centred at `target_pos` with the given size.
    pub fn within_reach(
        &self,
        target_pos: Vec2,
        target_size: Vec2,
        min_radius: f32,
        divisor: f32,
    ) -> bool {
        let radius = geometric_utils::collision_radius(target_size, min_radius, divisor);
        self.pos.distance(target_pos) <= radius
    }
}

impl Locatable for Projectile {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    fn update(&mut self, dt: f32) {
        self.pos += self.velocity * dt;
    }
}
