//! Quiz round lifecycle and game state.
//!
//! A [`Session`] is one run of one game. It owns the arena, the question deck,
//! score, lives and timers, and turns answers into arena actions:
//!
//! - a correct answer fires an aimed projectile at the chosen foe,
//! - a wrong answer or an expired question timer costs a life, or sends the
//!   foes rushing when the game says so,
//! - running out of questions, lives or session time ends the run.
//!
//! The binary calls [`Session::step`] once per frame and
//! [`Session::answer`] when the player picks a choice.

use rand::rngs::StdRng;

use super::arena::Arena;
use super::event_log::EventLog;
use super::events::GameEvent;
use super::params::Params;
use super::ruleset::{Ruleset, ShooterLayout, SpawnPolicy, WrongAnswerPolicy};
use crate::quiz::deck::{Draw, QuestionMode, QuizDeck, Round};
use crate::quiz::question::Question;
use crate::settings::Settings;

/// Where the session is in its round lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// A question is on screen and accepts answers.
    Asking,
    /// Waiting for a shot to land or for rushing foes to arrive.
    Resolving,
    /// The player finished every question with lives left.
    Won,
    /// Out of lives, out of time, or overrun.
    GameOver,
}

/// State of one run of one game.
pub struct Session {
    ruleset: Ruleset,
    params: Params,
    arena: Arena,
    deck: QuizDeck,
    round: Option<Round>,
    score: u32,
    lives: Option<u32>,
    phase: Phase,
    question_time_limit: Option<f32>,
    question_time_left: Option<f32>,
    session_time_limit: Option<f32>,
    elapsed: f32,
    speed_multiplier: f32,
    /// The last question was answered; end the run once the shot resolves.
    finish_after_hit: bool,
    awaiting_shot: bool,
    muzzle_flash_enabled: bool,
    muzzle_flash_left: f32,
    rng: StdRng,
    events: Vec<GameEvent>,
    log: EventLog,
}

impl Session {
    /// Starts a run: lays out the arena, asks the first question and spawns
    /// the first foes.
    ///
    /// # Arguments
    ///
    /// * `ruleset` - Game to play
    /// * `questions` - Question pool
    /// * `settings` - Player settings (order, mode, timers, lives, speed)
    /// * `params` - Tuning constants
    /// * `rng` - Source for shuffles, distractors and tower jitter
    pub fn new(
        ruleset: Ruleset,
        questions: Vec<Question>,
        settings: &Settings,
        params: Params,
        mut rng: StdRng,
    ) -> Self {
        let speed_multiplier = settings.enemy_speed_multiplier.max(0.0);
        let arena = Arena::from_ruleset(&ruleset, speed_multiplier, &mut rng);
        let deck = QuizDeck::new(
            questions,
            settings.question_order,
            settings.question_mode,
            &mut rng,
        );
        log::info!(
            "starting {} with {} questions, lives {:?}",
            ruleset.kind.title(),
            deck.len(),
            settings.lives
        );

        let mut session = Self {
            ruleset,
            params,
            arena,
            deck,
            round: None,
            score: 0,
            lives: settings.lives,
            phase: Phase::Asking,
            question_time_limit: settings.question_time_limit(),
            question_time_left: None,
            session_time_limit: settings.session_time_limit(),
            elapsed: 0.0,
            speed_multiplier,
            finish_after_hit: false,
            awaiting_shot: false,
            muzzle_flash_enabled: settings.muzzle_flash,
            muzzle_flash_left: 0.0,
            rng,
            events: Vec::new(),
            log: EventLog::default(),
        };
        session.advance();
        if !session.is_over() {
            session.refill_wave();
        }
        session
    }

    /// Submits the player's choice for the current question.
    ///
    /// Returns `false` when no answer is accepted right now (no question, a
    /// shot still resolving, the run over) or the index is out of range.
    pub fn answer(&mut self, choice: usize) -> bool {
        if !self.accepts_answers() {
            return false;
        }
        let Some(round) = &self.round else {
            return false;
        };
        if choice >= round.choices.len() {
            return false;
        }
        if round.is_correct(choice) {
            self.on_correct_answer();
        } else {
            self.on_wrong_answer();
        }
        true
    }

    /// Fires at the target chosen by the ruleset.
    pub fn on_correct_answer(&mut self) {
        if !self.accepts_answers() {
            return;
        }
        self.emit(GameEvent::AnsweredCorrectly);

        let Some(target) = self.arena.select_target(self.ruleset.targeting) else {
            // nothing on the field to shoot
            self.award_hit();
            self.emit(GameEvent::ScoredWithoutShot {
                points: self.params.points_per_hit,
            });
            self.advance();
            return;
        };

        let fired = self
            .arena
            .foe(target)
            .and_then(|foe| self.arena.nearest_shooter(foe.pos))
            .and_then(|shooter| {
                self.arena.fire(
                    shooter,
                    target,
                    self.ruleset.projectile_speed,
                    self.ruleset.projectile_size,
                    self.params.direction_epsilon,
                )
            });

        let Some(event) = fired else {
            // no shooter: the target goes down on the spot
            self.arena.destroy_foe_now(target, &self.params);
            self.award_hit();
            self.advance();
            return;
        };
        self.emit(event);
        self.awaiting_shot = true;
        if self.muzzle_flash_enabled {
            self.muzzle_flash_left = self.params.muzzle_flash_duration;
        }

        if self.deck.is_final_round() {
            self.finish_after_hit = true;
        } else {
            self.advance();
        }
        if self.phase == Phase::Asking {
            self.phase = Phase::Resolving;
        }
    }

    /// Applies the wrong-answer penalty.
    pub fn on_wrong_answer(&mut self) {
        if !self.accepts_answers() {
            return;
        }
        self.emit(GameEvent::AnsweredWrongly);
        self.penalize();
    }

    /// Applies the penalty for letting the question timer run out.
    pub fn on_timeout(&mut self) {
        if !self.accepts_answers() {
            return;
        }
        self.emit(GameEvent::QuestionTimedOut);
        self.penalize();
    }

    /// Advances the run by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        if self.is_over() {
            return;
        }
        self.elapsed += dt;
        self.muzzle_flash_left = (self.muzzle_flash_left - dt).max(0.0);

        if self
            .session_time_limit
            .is_some_and(|limit| self.elapsed >= limit)
        {
            log::info!("session time is up after {:.1}s", self.elapsed);
            self.emit(GameEvent::SessionExpired);
            self.finish(Phase::GameOver);
            return;
        }

        if self.accepts_answers() {
            let timed_out = match &mut self.question_time_left {
                Some(left) => {
                    *left -= dt;
                    *left <= 0.0
                }
                None => false,
            };
            if timed_out {
                self.on_timeout();
            }
        }
        if self.is_over() {
            return;
        }

        for event in self.arena.step(dt, &self.params) {
            self.apply(event);
            if self.is_over() {
                return;
            }
        }

        if self.awaiting_shot && !self.arena.has_aimed_projectile() {
            self.awaiting_shot = false;
            if self.finish_after_hit {
                self.finish_after_hit = false;
                self.advance();
            } else if self.phase == Phase::Resolving && self.arena.rushing_foe_count() == 0 {
                self.phase = Phase::Asking;
            }
        }
    }

    /// Moves the player's aim. `direction` is clamped to `[-1, 1]`; games
    /// without a player shooter ignore it.
    pub fn move_aim(&mut self, direction: f32, dt: f32) {
        if self.is_over() {
            return;
        }
        if let ShooterLayout::Player {
            aim_moves_shooter,
            aim_range,
            aim_speed,
            ..
        } = self.ruleset.shooters
        {
            let dx = direction.clamp(-1.0, 1.0) * aim_speed * dt;
            self.arena.move_aim(dx, aim_range, aim_moves_shooter);
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the run has ended.
    pub fn is_over(&self) -> bool {
        matches!(self.phase, Phase::Won | Phase::GameOver)
    }

    /// Whether a choice can be submitted right now.
    pub fn accepts_answers(&self) -> bool {
        self.phase == Phase::Asking && self.round.is_some()
    }

    /// Points scored so far.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Lives left, `None` when unlimited.
    pub fn lives(&self) -> Option<u32> {
        self.lives
    }

    /// Question currently on screen.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// Choices of the current question in display order.
    pub fn current_choices(&self) -> &[String] {
        self.round
            .as_ref()
            .map(|r| r.choices.as_slice())
            .unwrap_or_default()
    }

    /// Seconds left on the question timer.
    pub fn question_time_left(&self) -> Option<f32> {
        self.question_time_left.map(|t| t.max(0.0))
    }

    /// Seconds left in the session.
    pub fn session_time_left(&self) -> Option<f32> {
        self.session_time_limit
            .map(|limit| (limit - self.elapsed).max(0.0))
    }

    /// Seconds since the session started.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Whether the muzzle flash should be drawn.
    pub fn muzzle_flash_active(&self) -> bool {
        self.muzzle_flash_left > 0.0
    }

    /// Entities of the running game.
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Rules of the running game.
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Tuning constants in use.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Recent described events, newest first.
    pub fn event_log(&self) -> &EventLog {
        &self.log
    }

    /// Takes the events emitted since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: GameEvent) {
        self.log.record(self.elapsed, &event);
        self.events.push(event);
    }

    fn apply(&mut self, event: GameEvent) {
        let reached_goal = matches!(event, GameEvent::FoeReachedGoal { .. });
        let breached = event == GameEvent::FormationBreached;
        let cleared = event == GameEvent::WaveCleared;
        if matches!(event, GameEvent::FoeHit { .. }) {
            self.score += self.params.points_per_hit;
        }
        self.emit(event);

        if reached_goal {
            self.lose_life();
            if !self.is_over() && self.arena.rushing_foe_count() == 0 {
                self.advance();
            }
        } else if breached {
            if self.session_time_limit.is_some() {
                self.finish(Phase::GameOver);
            } else {
                log::info!("formation wrapped back to the top");
                self.arena.wrap_formation();
            }
        } else if cleared {
            self.refill_wave();
        }
    }

    fn penalize(&mut self) {
        match self.ruleset.wrong_answer {
            WrongAnswerPolicy::LoseLife => self.lose_life_and_continue(),
            WrongAnswerPolicy::Rush(style) => {
                let count = self
                    .arena
                    .rush_all(style, self.params.rush_speed_multiplier);
                if count == 0 {
                    self.lose_life_and_continue();
                } else {
                    self.emit(GameEvent::RushStarted { count });
                    self.phase = Phase::Resolving;
                }
            }
        }
    }

    fn lose_life_and_continue(&mut self) {
        self.lose_life();
        if !self.is_over() {
            self.advance();
        }
    }

    fn lose_life(&mut self) {
        if let Some(lives) = &mut self.lives {
            *lives = lives.saturating_sub(1);
        }
        log::info!("life lost, {:?} left", self.lives);
        self.emit(GameEvent::LifeLost {
            remaining: self.lives,
        });
        if self.lives == Some(0) {
            self.finish(Phase::GameOver);
        }
    }

    fn award_hit(&mut self) {
        self.score += self.params.points_per_hit;
    }

    /// Moves on to the next question, or ends the run when the deck is done.
    fn advance(&mut self) {
        match self.deck.next_round(&mut self.rng) {
            Draw::Round(round) => {
                log::info!("question {}: {}", self.deck.drawn(), round.question.prompt);
                self.round = Some(round);
                self.phase = Phase::Asking;
                self.question_time_left = self.question_time_limit;
                self.emit(GameEvent::QuestionAdvanced {
                    number: self.deck.drawn(),
                });
                if let SpawnPolicy::PerQuestion { speed, .. } = self.ruleset.spawn {
                    self.arena
                        .spawn_path_foe(speed * self.speed_multiplier, self.ruleset.foe_size);
                }
            }
            Draw::Exhausted => {
                self.round = None;
                if self.lives == Some(0) {
                    self.finish(Phase::GameOver);
                } else {
                    self.finish(Phase::Won);
                }
            }
            Draw::Empty => {
                log::warn!("no questions to ask");
                self.round = None;
            }
        }
    }

    fn finish(&mut self, phase: Phase) {
        if self.is_over() {
            return;
        }
        self.phase = phase;
        self.awaiting_shot = false;
        self.question_time_left = None;
        log::info!("run ended: {phase:?} with score {}", self.score);
        self.emit(if phase == Phase::Won {
            GameEvent::Won
        } else {
            GameEvent::GameOver
        });
    }

    /// Spawns a fresh wave for wave-based games.
    ///
    /// In one-each mode a wave never holds more foes than there are questions
    /// left to answer.
    fn refill_wave(&mut self) {
        let SpawnPolicy::Waves {
            per_wave,
            columns,
            spacing,
            top,
            marching,
        } = self.ruleset.spawn
        else {
            return;
        };
        let count = match self.deck.mode() {
            QuestionMode::Loop => per_wave,
            QuestionMode::OneEach => {
                let unanswered = usize::from(self.round.is_some() && !self.finish_after_hit);
                per_wave.min(self.deck.remaining() + unanswered)
            }
        };
        if count == 0 {
            return;
        }
        self.arena
            .spawn_wave(count, columns, spacing, top, self.ruleset.foe_size, marching);
        self.pace_descent();
    }

    /// Sets the formation's descent so it reaches the defense line as the
    /// session clock runs out.
    fn pace_descent(&mut self) {
        let (Some(limit), Some(line)) = (self.session_time_limit, self.arena.defense_line) else {
            return;
        };
        let Some(lowest) = self
            .arena
            .foes
            .iter()
            .filter(|f| f.is_active())
            .map(super::foe::Foe::bottom)
            .reduce(f32::max)
        else {
            return;
        };
        let remaining = limit - self.elapsed;
        if let Some(formation) = &mut self.arena.formation {
            formation.pace_descent(line - lowest, remaining);
        }
    }
}
