//! Geometric utility functions for steering, proximity and bounds checks.

use geo::{Intersects, Rect, coord};
use macroquad::math::{IVec2, Vec2};

/// Direction used when a shot has no usable direction: straight up the screen.
pub const FALLBACK_DIRECTION: Vec2 = Vec2::NEG_Y;

/// Computes a velocity of magnitude `speed` pointing from `from` to `to`.
///
/// When the two points are within `epsilon` of each other the direction is
/// undefined, so [`FALLBACK_DIRECTION`] is used instead.
///
/// # Arguments
///
/// * `from` - Origin of the shot
/// * `to` - Point being aimed at
/// * `speed` - Magnitude of the resulting velocity
/// * `epsilon` - Distance under which the points count as coincident
pub fn steer(from: Vec2, to: Vec2, speed: f32, epsilon: f32) -> Vec2 {
    let delta = to - from;
    let distance = delta.length();
    if distance <= epsilon {
        FALLBACK_DIRECTION * speed
    } else {
        delta / distance * speed
    }
}

/// Moves `pos` toward `goal` by at most `max_step`, snapping onto the goal when
/// it is closer than that.
///
/// # Returns
///
/// The new position.
pub fn step_toward(pos: Vec2, goal: Vec2, max_step: f32) -> Vec2 {
    let delta = goal - pos;
    let distance = delta.length();
    if distance <= max_step || distance <= f32::EPSILON {
        goal
    } else {
        pos + delta / distance * max_step
    }
}

/// Radius within which a projectile counts as hitting a target of `size`.
///
/// `max(min_radius, (width + height) / divisor)`
pub fn collision_radius(size: Vec2, min_radius: f32, divisor: f32) -> f32 {
    min_radius.max((size.x + size.y) / divisor)
}

/// Index of the point in `points` closest to `target` by squared distance.
///
/// Ties resolve to the lowest index. Returns `None` for an empty slice.
pub fn nearest_index(points: &[Vec2], target: Vec2) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            a.distance_squared(target)
                .total_cmp(&b.distance_squared(target))
        })
        .map(|(i, _)| i)
}

/// Integer render position derived from a float position.
pub fn render_pos(pos: Vec2) -> IVec2 {
    pos.round().as_ivec2()
}

/// Axis-aligned rectangle centred on `center`.
pub fn centered_rect(center: Vec2, size: Vec2) -> Rect<f32> {
    let half = size / 2.0;
    Rect::new(
        coord! { x: center.x - half.x, y: center.y - half.y },
        coord! { x: center.x + half.x, y: center.y + half.y },
    )
}

/// Whether two centred boxes overlap.
pub fn boxes_overlap(a_center: Vec2, a_size: Vec2, b_center: Vec2, b_size: Vec2) -> bool {
    centered_rect(a_center, a_size).intersects(&centered_rect(b_center, b_size))
}

/// Axis-aligned playing-field bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Top-left corner.
    pub min: Vec2,
    /// Bottom-right corner.
    pub max: Vec2,
}

impl Bounds {
    /// Bounds covering `(0, 0)..(width, height)`.
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(width, height),
        }
    }

    /// Width of the bounds.
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    /// Height of the bounds.
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// Bounds grown by `margin` on every side.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    /// Whether `point` lies inside the bounds (edges included).
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.y >= self.min.y
            && point.x <= self.max.x
            && point.y <= self.max.y
    }
}
