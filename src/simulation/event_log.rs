//! Event logging system for displaying recent game events.

use std::collections::VecDeque;

use super::events::GameEvent;

/// A logged event for display in the UI.
#[derive(Debug, Clone)]
pub struct LoggedEvent {
    /// Session time when the event occurred
    pub time: f32,
    /// Human-readable description of the event
    pub description: String,
    /// Color hint for the event (for UI display)
    pub color: EventColor,
}

/// Color categories for events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventColor {
    /// Shots and hits (green)
    Hit,
    /// Shots that went nowhere (gray)
    Miss,
    /// Lives lost, rushes and breaches (red)
    Damage,
    /// Answers and question changes (blue)
    Quiz,
    /// End of run (yellow)
    Outcome,
}

/// Event log that tracks recent game events
#[derive(Debug, Clone)]
pub struct EventLog {
    /// Recent events, newest first
    events: VecDeque<LoggedEvent>,
    /// Maximum number of events to keep
    max_events: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new(12)
    }
}

impl EventLog {
    /// Creates a new event log with specified capacity
    pub fn new(max_events: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(max_events),
            max_events,
        }
    }

    /// Adds a new event to the log
    pub fn log(&mut self, time: f32, description: String, color: EventColor) {
        self.events.push_front(LoggedEvent {
            time,
            description,
            color,
        });

        // Keep only the most recent events
        while self.events.len() > self.max_events {
            self.events.pop_back();
        }
    }

    /// Records a game event, skipping the ones that aren't worth showing.
    pub fn record(&mut self, time: f32, event: &GameEvent) {
        if let Some((description, color)) = describe(event) {
            self.log(time, description, color);
        }
    }

    /// Returns all events, newest first
    pub fn events(&self) -> &VecDeque<LoggedEvent> {
        &self.events
    }
}

fn describe(event: &GameEvent) -> Option<(String, EventColor)> {
    let entry = match event {
        GameEvent::ProjectileFired { .. } => ("Shot fired".to_string(), EventColor::Hit),
        GameEvent::FoeHit { aimed: true, .. } => ("Direct hit".to_string(), EventColor::Hit),
        GameEvent::FoeHit { aimed: false, .. } => ("Stray hit".to_string(), EventColor::Hit),
        GameEvent::ProjectileExpired { target: Some(_) } => {
            ("Shot missed".to_string(), EventColor::Miss)
        }
        GameEvent::FoeReachedGoal { .. } => {
            ("Enemy reached the goal".to_string(), EventColor::Damage)
        }
        GameEvent::FormationBreached => ("Invaders broke through".to_string(), EventColor::Damage),
        GameEvent::WaveCleared => ("Wave cleared".to_string(), EventColor::Hit),
        GameEvent::RushStarted { count } => (format!("Rush! ({count})"), EventColor::Damage),
        GameEvent::ScoredWithoutShot { points } => {
            (format!("No target, +{points}"), EventColor::Hit)
        }
        GameEvent::AnsweredCorrectly => ("Correct!".to_string(), EventColor::Quiz),
        GameEvent::AnsweredWrongly => ("Wrong answer".to_string(), EventColor::Quiz),
        GameEvent::QuestionTimedOut => ("Out of time".to_string(), EventColor::Quiz),
        GameEvent::LifeLost { remaining: Some(n) } => {
            (format!("Life lost, {n} left"), EventColor::Damage)
        }
        GameEvent::LifeLost { remaining: None } => ("Life lost".to_string(), EventColor::Damage),
        GameEvent::QuestionAdvanced { number } => (format!("Question {number}"), EventColor::Quiz),
        GameEvent::SessionExpired => ("Time is up".to_string(), EventColor::Outcome),
        GameEvent::Won => ("You win!".to_string(), EventColor::Outcome),
        GameEvent::GameOver => ("Game over".to_string(), EventColor::Outcome),
        GameEvent::ProjectileExpired { target: None } => return None,
    };
    Some(entry)
}
