//! Closed waypoint paths.
//!
//! A path is an ordered, cyclic list of waypoints: the last waypoint connects
//! back to the first. Paths are built once per session and never mutated.

use macroquad::math::Vec2;

use super::geometric_utils;

/// An immutable closed polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec2>,
}

impl Path {
    /// Creates a path from waypoints in traversal order.
    ///
    /// The caller must supply at least two waypoints; this is only checked in
    /// debug builds.
    pub fn new(waypoints: Vec<Vec2>) -> Self {
        debug_assert!(waypoints.len() >= 2, "a path needs at least two waypoints");
        Self { waypoints }
    }

    /// Builds a wobbly ellipse sampled at `steps` points.
    ///
    /// Waypoint 0 sits on the left of the ellipse and the waypoint half way
    /// round sits on the right, so the track runs from a left-hand spawn to a
    /// right-hand goal.
    ///
    /// # Arguments
    ///
    /// * `center` - Centre of the ellipse
    /// * `radii` - Horizontal and vertical radii
    /// * `wobble` - Amplitude of a vertical sine ripple at twice the loop frequency
    /// * `steps` - Number of waypoints
    pub fn looped_ellipse(center: Vec2, radii: Vec2, wobble: f32, steps: usize) -> Self {
        let points: Vec<Vec2> = (0..steps)
            .map(|i| {
                let angle = std::f32::consts::TAU * i as f32 / steps as f32;
                Vec2::new(
                    center.x + angle.cos() * radii.x,
                    center.y + angle.sin() * radii.y + (2.0 * angle).sin() * wobble,
                )
            })
            .collect();

        // rotate so the left-most sample comes first
        let spawn = steps / 2;
        let mut waypoints = points[spawn..].to_vec();
        waypoints.extend_from_slice(&points[..spawn]);
        Self::new(waypoints)
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Whether the path has no waypoints.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// All waypoints in traversal order.
    pub fn waypoints(&self) -> &[Vec2] {
        &self.waypoints
    }

    /// Waypoint at `index`, wrapping past the end.
    pub fn waypoint(&self, index: usize) -> Vec2 {
        self.waypoints[index % self.waypoints.len()]
    }

    /// Endpoints of the segment starting at waypoint `index`.
    pub fn segment(&self, index: usize) -> (Vec2, Vec2) {
        (self.waypoint(index), self.waypoint(index + 1))
    }

    /// Length of the segment starting at waypoint `index`.
    pub fn segment_length(&self, index: usize) -> f32 {
        let (a, b) = self.segment(index);
        a.distance(b)
    }

    /// Total arc length of the closed loop.
    pub fn total_length(&self) -> f32 {
        (0..self.len()).map(|i| self.segment_length(i)).sum()
    }

    /// Point a fraction `t` of the way along the segment starting at `index`.
    pub fn point_at(&self, index: usize, t: f32) -> Vec2 {
        let (a, b) = self.segment(index);
        a.lerp(b, t)
    }

    /// Index of the waypoint closest to `point` by squared distance.
    pub fn nearest_waypoint(&self, point: Vec2) -> usize {
        geometric_utils::nearest_index(&self.waypoints, point).unwrap_or(0)
    }

    /// Unit normal to the left of the direction from waypoint `index` toward
    /// waypoint `index + lookahead`. Coincident waypoints are treated as a
    /// segment pointing along +x.
    pub fn normal_at(&self, index: usize, lookahead: usize) -> Vec2 {
        let direction = self.waypoint(index + lookahead) - self.waypoint(index);
        let direction = direction.try_normalize().unwrap_or(Vec2::X);
        Vec2::new(-direction.y, direction.x)
    }
}
