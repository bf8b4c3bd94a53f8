//! Events produced by the arena and the session.
//!
//! The arena collects what happened during a tick into an [`EventQueue`]; the
//! session drains it, applies score and life changes, and forwards the events
//! to the display log.

use macroquad::math::Vec2;

use super::foe::EntityId;

/// Something that happened during a tick or a round transition.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A projectile left a shooter.
    ProjectileFired {
        /// Muzzle position.
        origin: Vec2,
        /// Foe the projectile is aimed at.
        target: Option<EntityId>,
    },
    /// A projectile destroyed a foe.
    FoeHit {
        /// The foe that was hit.
        foe_id: EntityId,
        /// Where the hit happened.
        pos: Vec2,
        /// `true` when resolved by proximity to the aimed target, `false` for
        /// a broad-phase overlap.
        aimed: bool,
    },
    /// A projectile left the field without hitting anything.
    ProjectileExpired {
        /// Foe the projectile had been aimed at.
        target: Option<EntityId>,
    },
    /// A rushing foe reached its goal.
    FoeReachedGoal {
        /// The foe that arrived.
        foe_id: EntityId,
    },
    /// A formation foe crossed the defense line.
    FormationBreached,
    /// The last active foe of a wave was removed.
    WaveCleared,
    /// Foes were ordered to rush.
    RushStarted {
        /// Number of foes that switched to a rush mode.
        count: usize,
    },
    /// A correct answer scored with nothing left to shoot, e.g. while the last
    /// foe of a wave is still breaking.
    ScoredWithoutShot {
        /// Points awarded.
        points: u32,
    },
    /// The player picked the correct choice.
    AnsweredCorrectly,
    /// The player picked a wrong choice.
    AnsweredWrongly,
    /// The question timer ran out.
    QuestionTimedOut,
    /// A life was lost.
    LifeLost {
        /// Lives left, `None` when unlimited.
        remaining: Option<u32>,
    },
    /// A new question is on screen.
    QuestionAdvanced {
        /// 1-based number of questions drawn so far in this pass of the deck.
        number: usize,
    },
    /// The session clock ran out.
    SessionExpired,
    /// The run ended with the player winning.
    Won,
    /// The run ended with the player losing.
    GameOver,
}

/// Queue collecting events during a tick.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    /// Creates an empty event queue.
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Adds an event to the queue.
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Consumes the queue, returning the events in order.
    pub fn into_vec(self) -> Vec<GameEvent> {
        self.events
    }
}
