use serde::{Deserialize, Serialize};

/// Tuning constants shared by every game.
///
/// These were tuned by feel rather than derived, so they are kept
/// configurable instead of baked into the motion code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Params {
    /// Smallest proximity radius for an aimed hit.
    pub min_collision_radius: f32,
    /// Divisor applied to `width + height` of the target for the proximity radius.
    pub collision_radius_divisor: f32,
    /// Distance beyond the field edge after which projectiles are discarded.
    pub offscreen_margin: f32,
    /// Distance at which a rushing foe counts as having reached its goal.
    pub arrival_threshold: f32,
    /// Speed multiplier applied to foes once they start rushing.
    pub rush_speed_multiplier: f32,
    /// Shooter-to-target distance under which the fallback direction is used.
    pub direction_epsilon: f32,
    /// Score awarded for each destroyed foe.
    pub points_per_hit: u32,
    /// Seconds a hit foe spends breaking before removal (when the game breaks foes).
    pub break_duration: f32,
    /// Seconds the muzzle flash stays visible after a shot.
    pub muzzle_flash_duration: f32,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            min_collision_radius: 14.0,
            collision_radius_divisor: 6.0,
            offscreen_margin: 50.0,
            arrival_threshold: 12.0,
            rush_speed_multiplier: 2.0,
            direction_epsilon: 0.1,
            points_per_hit: 100,
            break_duration: 0.24,
            muzzle_flash_duration: 0.16,
        }
    }
}
