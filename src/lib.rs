//! # Quiz Arcade - Trivia-Driven Arcade Minigames
//!
//! A small engine for arcade minigames driven by multiple-choice questions.
//! A correct answer launches an attack at a game object. A wrong answer or an
//! expired question timer costs a life or sends a threat rushing at the defender.
//!
//! ## Games
//!
//! - Space Invaders: a ship fires aimed bullets at a marching formation
//! - Cowboy Shooter: a cowboy shoots bottles off a shelf
//! - Tower Defense: towers shoot a creature looping around a track
//!
//! ## Core Modules
//!
//! - [`simulation::projectile`] - Aimed projectiles and proximity hits
//! - [`simulation::path_follower`] - Loop-path motion and rush modes
//! - [`simulation::arena`] - Per-tick combat engine shared by every game
//! - [`simulation::session`] - Quiz round lifecycle and game state
//! - [`quiz`] - Question loading, distractors and the question deck
//! - [`settings`] - Persistent player settings

/// Per-tick motion model and the combat engine built on it.
pub mod simulation {
    /// Entity collections and the per-tick combat update.
    pub mod arena;
    /// Bounded log of described events for display.
    pub mod event_log;
    /// Events emitted by the engine and the session.
    pub mod events;
    /// Opposing entities: invaders, bottles and creatures.
    pub mod foe;
    /// Marching formation used by the invader wave.
    pub mod formation;
    /// Geometric helpers: steering, proximity radii and bounds.
    pub mod geometric_utils;
    /// Trait for locatable entities that can be updated.
    ///
    /// The [`locatable::Locatable`] trait is implemented by every moving entity
    /// (`Projectile` and `Foe`).
    pub mod locatable;
    /// Tuning constants for the motion model.
    pub mod params;
    /// Closed waypoint paths.
    pub mod path;
    /// Entities that loop around a path and rush on command.
    pub mod path_follower;
    /// Aimed projectiles fired on correct answers.
    pub mod projectile;
    /// Per-game parameterisation of the engine.
    pub mod ruleset;
    /// Quiz round lifecycle and game state.
    pub mod session;
    /// Spatial indexing for broad-phase collision queries.
    pub mod spatial;
}

/// Question loading, distractor generation and the question deck.
pub mod quiz {
    /// Question deck with ordering and looping rules.
    pub mod deck;
    /// Wrong-answer generation.
    pub mod distractors;
    /// Question records and the CSV loader.
    pub mod question;
}

pub mod assets;
pub mod error;
pub mod settings;

pub use error::{Error, Result};
