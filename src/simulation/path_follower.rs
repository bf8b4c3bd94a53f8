//! Entities that loop around a closed path and rush toward a goal on command.
//!
//! A follower starts in [`FollowMode::Looping`], patrolling the track forever.
//! A wrong answer or a timeout switches it into one of the rush modes, which
//! are terminal: a rushing follower never goes back to looping.

use macroquad::math::Vec2;

use super::geometric_utils::step_toward;
use super::path::Path;

/// Slack when deciding that a step lands exactly on a waypoint.
const SNAP_EPSILON: f32 = 1e-4;

/// Movement mode of a [`PathFollower`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FollowMode {
    /// Patrol the loop at base speed.
    Looping,
    /// Cut straight toward an arbitrary point.
    RushToPoint {
        /// Destination, not necessarily on the path.
        goal: Vec2,
    },
    /// Keep following the track until the waypoint nearest the goal.
    RushAlongPath {
        /// Index of the waypoint that ends the rush.
        goal_index: usize,
    },
}

/// Position along a [`Path`] expressed as a segment index and a fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct PathFollower {
    /// Index of the waypoint the current segment starts at.
    pub index: usize,
    /// Fraction along the current segment, in `[0, 1)`.
    pub t: f32,
    /// Float position, recomputed from `index` and `t` after each step.
    pub pos: Vec2,
    /// Base speed in units per second.
    pub speed: f32,
    mode: FollowMode,
    rush_multiplier: f32,
}

impl PathFollower {
    /// Creates a looping follower standing on the first waypoint.
    pub fn new(path: &Path, speed: f32) -> Self {
        Self {
            index: 0,
            t: 0.0,
            pos: path.waypoint(0),
            speed,
            mode: FollowMode::Looping,
            rush_multiplier: 1.0,
        }
    }

    /// Current movement mode.
    pub fn mode(&self) -> FollowMode {
        self.mode
    }

    /// Whether the follower has left looping mode.
    pub fn is_rushing(&self) -> bool {
        self.mode != FollowMode::Looping
    }

    /// Speed actually applied this tick, including the rush multiplier.
    pub fn current_speed(&self) -> f32 {
        self.speed * self.rush_multiplier
    }

    /// Switches to a straight-line rush toward `goal`.
    ///
    /// Has no effect on a follower that is already rushing.
    pub fn set_rush(&mut self, goal: Vec2, multiplier: f32) {
        if self.is_rushing() {
            return;
        }
        self.mode = FollowMode::RushToPoint { goal };
        self.rush_multiplier = multiplier;
    }

    /// Switches to rushing along the track toward the waypoint nearest
    /// `goal_point`.
    ///
    /// Has no effect on a follower that is already rushing.
    pub fn set_rush_along_path(&mut self, path: &Path, goal_point: Vec2, multiplier: f32) {
        if self.is_rushing() {
            return;
        }
        self.mode = FollowMode::RushAlongPath {
            goal_index: path.nearest_waypoint(goal_point),
        };
        self.rush_multiplier = multiplier;
    }

    /// Advances the follower by `dt` seconds.
    pub fn advance(&mut self, path: &Path, dt: f32) {
        let distance = self.current_speed() * dt;
        match self.mode {
            FollowMode::Looping => self.walk(path, distance, None),
            FollowMode::RushToPoint { goal } => {
                self.pos = step_toward(self.pos, goal, distance);
            }
            FollowMode::RushAlongPath { goal_index } => {
                if self.index == goal_index && self.t <= 0.0 {
                    // arrived: hold on the goal waypoint
                    self.pos = path.waypoint(goal_index);
                } else {
                    self.walk(path, distance, Some(goal_index));
                }
            }
        }
    }

    /// Whether the follower has reached the end of its rush.
    ///
    /// Rushing along the path only counts once the follower is on the goal
    /// segment index *and* close to that waypoint, so passing a nearby
    /// waypoint earlier in the loop does not trigger it.
    pub fn reached_goal(&self, path: &Path, threshold: f32) -> bool {
        match self.mode {
            FollowMode::Looping => false,
            FollowMode::RushToPoint { goal } => self.pos.distance(goal) <= threshold,
            FollowMode::RushAlongPath { goal_index } => {
                self.index == goal_index && self.pos.distance(path.waypoint(goal_index)) <= threshold
            }
        }
    }

    /// Moves forward along the path by `distance`, crossing at most one
    /// segment per iteration. Stops early on entering `stop_at`.
    fn walk(&mut self, path: &Path, distance: f32, stop_at: Option<usize>) {
        let n = path.len();
        let mut remaining = distance;
        let mut degenerate_run = 0;

        while remaining > 0.0 {
            let segment_length = path.segment_length(self.index);
            let to_end = (1.0 - self.t) * segment_length;

            if remaining + SNAP_EPSILON >= to_end {
                remaining -= to_end;
                self.index = (self.index + 1) % n;
                self.t = 0.0;

                if segment_length <= f32::EPSILON {
                    degenerate_run += 1;
                    if degenerate_run >= n {
                        break;
                    }
                } else {
                    degenerate_run = 0;
                }

                if stop_at == Some(self.index) {
                    break;
                }
            } else {
                self.t += remaining / segment_length;
                remaining = 0.0;
            }
        }

        self.pos = path.point_at(self.index, self.t);
    }
}
