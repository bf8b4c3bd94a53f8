//! Opposing entities: invaders, bottles and track creatures.

use macroquad::math::Vec2;

use super::locatable::Locatable;
use super::path_follower::PathFollower;

/// Identifier handed out by the arena. Never reused within a session, so it
/// can be held as a non-owning reference to a foe that may already be gone.
pub type EntityId = u32;

/// How a foe moves each tick.
#[derive(Debug, Clone, PartialEq)]
pub enum FoeMotion {
    /// Moves with the shared marching formation.
    Formation,
    /// Never moves on its own.
    Static,
    /// Follows the arena path.
    Path(PathFollower),
}

/// Lifecycle state of a foe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FoeState {
    /// Targetable and collidable.
    Active,
    /// Hit and playing its break animation; removed when the timer runs out.
    Breaking {
        /// Seconds of animation left.
        remaining: f32,
    },
}

/// A foe that can be shot.
#[derive(Debug, Clone, PartialEq)]
pub struct Foe {
    /// Unique identifier.
    pub id: EntityId,
    /// Centre position.
    pub pos: Vec2,
    /// Collision box size.
    pub size: Vec2,
    /// Movement behaviour.
    pub motion: FoeMotion,
    /// Lifecycle state.
    pub state: FoeState,
    /// Row the foe was spawned on, used when a formation wraps back up.
    pub home_y: f32,
}

impl Foe {
    /// Creates an active foe at `pos`.
    pub fn new(id: EntityId, pos: Vec2, size: Vec2, motion: FoeMotion) -> Self {
        let pos = match &motion {
            FoeMotion::Path(follower) => follower.pos,
            _ => pos,
        };
        Self {
            id,
            pos,
            size,
            motion,
            state: FoeState::Active,
            home_y: pos.y,
        }
    }

    /// Whether the foe can still be targeted and hit.
    pub fn is_active(&self) -> bool {
        self.state == FoeState::Active
    }

    /// Whether the break animation has finished.
    pub fn is_finished(&self) -> bool {
        matches!(self.state, FoeState::Breaking { remaining } if remaining <= 0.0)
    }

    /// Starts the break animation. Already-breaking foes are left alone.
    pub fn start_break(&mut self, duration: f32) {
        if self.is_active() {
            self.state = FoeState::Breaking {
                remaining: duration,
            };
        }
    }

    /// The path follower driving this foe, if it walks a path.
    pub fn follower(&self) -> Option<&PathFollower> {
        match &self.motion {
            FoeMotion::Path(follower) => Some(follower),
            _ => None,
        }
    }

    /// Mutable access to the path follower, if any.
    pub fn follower_mut(&mut self) -> Option<&mut PathFollower> {
        match &mut self.motion {
            FoeMotion::Path(follower) => Some(follower),
            _ => None,
        }
    }

    /// Bottom edge of the collision box.
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y / 2.0
    }

    /// Left edge of the collision box.
    pub fn left(&self) -> f32 {
        self.pos.x - self.size.x / 2.0
    }

    /// Right edge of the collision box.
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

impl Locatable for Foe {
    fn pos(&self) -> Vec2 {
        self.pos
    }

    /// Ages the break animation. Movement is driven by the arena, which owns
    /// the path and the formation.
    fn update(&mut self, dt: f32) {
        if let FoeState::Breaking { remaining } = &mut self.state {
            *remaining -= dt;
        }
    }
}
