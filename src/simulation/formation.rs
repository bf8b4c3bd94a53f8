//! Marching formation for the invader wave.
//!
//! The whole formation sweeps sideways, flips direction and drops a row
//! whenever it touches a side of the field, and optionally creeps downward at a
//! constant rate so it reaches the defender when the session clock runs out.

use super::foe::{Foe, FoeMotion};
use super::geometric_utils::Bounds;

/// Shared movement state of all [`FoeMotion::Formation`] foes.
#[derive(Debug, Clone, PartialEq)]
pub struct Formation {
    /// `1.0` when marching right, `-1.0` when marching left.
    pub direction: f32,
    /// Horizontal speed in units per second.
    pub speed: f32,
    /// Vertical drop applied on each bounce.
    pub drop: f32,
    /// Continuous downward speed in units per second.
    pub descent_speed: f32,
    /// Sideways marching pauses while an aimed shot is in flight.
    pub halted: bool,
}

impl Formation {
    /// Creates a formation marching right.
    pub fn new(speed: f32, drop: f32) -> Self {
        Self {
            direction: 1.0,
            speed,
            drop,
            descent_speed: 0.0,
            halted: false,
        }
    }

    /// Sets the descent so the formation covers `distance` in `duration` seconds.
    /// A non-positive duration disables descent.
    pub fn pace_descent(&mut self, distance: f32, duration: f32) {
        self.descent_speed = if duration > 0.0 {
            distance.max(0.0) / duration
        } else {
            0.0
        };
    }

    /// Moves every formation foe for one tick.
    pub fn march(&mut self, foes: &mut [Foe], field: &Bounds, dt: f32) {
        let members: Vec<&mut Foe> = foes
            .iter_mut()
            .filter(|f| f.is_active() && f.motion == FoeMotion::Formation)
            .collect();
        if members.is_empty() {
            return;
        }

        if !self.halted {
            let dx = self.direction * self.speed * dt;
            let mut leftmost = f32::MAX;
            let mut rightmost = f32::MIN;
            for foe in members.iter() {
                leftmost = leftmost.min(foe.left() + dx);
                rightmost = rightmost.max(foe.right() + dx);
            }
            let bounced = leftmost <= field.min.x || rightmost >= field.max.x;

            for foe in members {
                if bounced {
                    foe.pos.y += self.drop;
                } else {
                    foe.pos.x += dx;
                }
                foe.pos.y += self.descent_speed * dt;
            }
            if bounced {
                self.direction = -self.direction;
            }
        } else {
            for foe in members {
                foe.pos.y += self.descent_speed * dt;
            }
        }
    }
}

/// Sends every formation foe back to the row it was spawned on.
pub fn wrap_to_home(foes: &mut [Foe]) {
    for foe in foes
        .iter_mut()
        .filter(|f| f.motion == FoeMotion::Formation)
    {
        foe.pos.y = foe.home_y;
    }
}
