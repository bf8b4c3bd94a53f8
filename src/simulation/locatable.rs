//! Trait for entities that have a position and can be updated.
//!
//! This trait provides a common interface for every moving entity in the
//! arena so rendering and collision code can treat them uniformly.

use macroquad::math::{IVec2, Vec2};

use super::geometric_utils::render_pos;

/// Trait for entities with a position that can be updated over time.
///
/// Any type that implements this trait:
/// - Owns a float position that is the only source of truth for motion
/// - Can be updated with a time delta
pub trait Locatable {
    /// Returns the entity's float position.
    fn pos(&self) -> Vec2;

    /// Updates the entity's state based on the time delta.
    ///
    /// # Arguments
    ///
    /// * `dt` - Time delta since the last update in seconds.
    fn update(&mut self, dt: f32);

    /// Integer position used for drawing, always `round(pos)`.
    fn render_pos(&self) -> IVec2 {
        render_pos(self.pos())
    }
}
