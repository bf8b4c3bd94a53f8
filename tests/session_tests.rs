#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use std::collections::HashSet;

use quiz_arcade::quiz::deck::{QuestionMode, QuestionOrder};
use quiz_arcade::quiz::question::Question;
use quiz_arcade::settings::Settings;
use quiz_arcade::simulation::events::GameEvent;
use quiz_arcade::simulation::params::Params;
use quiz_arcade::simulation::ruleset::Ruleset;
use quiz_arcade::simulation::session::{Phase, Session};
use rand::SeedableRng;
use rand::rngs::StdRng;

const DT: f32 = 1.0 / 60.0;

fn questions() -> Vec<Question> {
    vec![
        Question::new("2 + 2", "4"),
        Question::new("Capital of France", "Paris"),
        Question::new("Largest planet", "Jupiter"),
    ]
}

fn settings() -> Settings {
    Settings {
        question_order: QuestionOrder::Top,
        ..Settings::default()
    }
}

fn start(ruleset: Ruleset, questions: Vec<Question>, settings: &Settings) -> Session {
    Session::new(
        ruleset,
        questions,
        settings,
        Params::default(),
        StdRng::seed_from_u64(42),
    )
}

fn correct_choice(session: &Session) -> usize {
    session.round().expect("a question is on screen").correct_index
}

fn wrong_choice(session: &Session) -> usize {
    (correct_choice(session) + 1) % session.current_choices().len()
}

/// Steps until `done` holds, collecting every event.
fn run_until(
    session: &mut Session,
    max_ticks: usize,
    done: impl Fn(&Session) -> bool,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..max_ticks {
        session.step(DT);
        events.extend(session.take_events());
        if done(session) {
            break;
        }
    }
    events
}

#[test]
fn test_session_starts_with_first_question_and_wave() {
    let mut session = start(Ruleset::space_invaders(), questions(), &settings());

    assert_eq!(session.phase(), Phase::Asking);
    assert!(session.accepts_answers());
    assert_eq!(session.score(), 0);
    assert_eq!(session.lives(), Some(3));
    assert_eq!(
        session.round().map(|r| r.question.prompt.as_str()),
        Some("2 + 2")
    );
    assert_eq!(session.arena().active_foe_count(), 18);
    assert_eq!(
        session.take_events(),
        vec![GameEvent::QuestionAdvanced { number: 1 }]
    );
}

#[test]
fn test_correct_answer_shoots_nearest_invader() {
    let mut session = start(Ruleset::space_invaders(), questions(), &settings());
    session.take_events();

    assert!(session.answer(correct_choice(&session)));
    assert_eq!(session.phase(), Phase::Resolving);
    assert!(!session.accepts_answers());
    assert!(session.muzzle_flash_active());
    assert_eq!(
        session.round().map(|r| r.question.prompt.as_str()),
        Some("Capital of France")
    );

    let fired = session.take_events();
    assert_eq!(fired[0], GameEvent::AnsweredCorrectly);
    assert!(matches!(
        fired[1],
        GameEvent::ProjectileFired {
            target: Some(14),
            ..
        }
    ));
    assert!(fired.contains(&GameEvent::QuestionAdvanced { number: 2 }));

    // no answers while the shot is in flight
    assert!(!session.answer(0));

    let events = run_until(&mut session, 120, |s| s.phase() == Phase::Asking);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::FoeHit {
            foe_id: 14,
            aimed: true,
            ..
        }
    )));
    assert_eq!(session.phase(), Phase::Asking);
    assert_eq!(session.score(), 100);
    assert_eq!(session.arena().active_foe_count(), 17);
    assert!(!session.muzzle_flash_active());
}

#[test]
fn test_wrong_answer_costs_a_life() {
    let mut session = start(Ruleset::space_invaders(), questions(), &settings());
    session.take_events();

    assert!(session.answer(wrong_choice(&session)));
    assert_eq!(session.lives(), Some(2));
    assert_eq!(session.phase(), Phase::Asking);
    assert_eq!(
        session.take_events(),
        vec![
            GameEvent::AnsweredWrongly,
            GameEvent::LifeLost { remaining: Some(2) },
            GameEvent::QuestionAdvanced { number: 2 },
        ]
    );
    assert!(session.arena().projectiles.is_empty());
}

#[test]
fn test_out_of_range_choice_is_rejected() {
    let mut session = start(Ruleset::space_invaders(), questions(), &settings());
    assert!(!session.answer(4));
    assert_eq!(session.lives(), Some(3));
    assert_eq!(session.phase(), Phase::Asking);
}

#[test]
fn test_last_life_ends_the_run() {
    let settings = Settings {
        lives: Some(1),
        ..settings()
    };
    let mut session = start(Ruleset::cowboy_shooter(), questions(), &settings);

    assert!(session.answer(wrong_choice(&session)));
    assert_eq!(session.phase(), Phase::GameOver);
    assert!(session.is_over());
    assert_eq!(session.lives(), Some(0));
    assert_eq!(session.take_events().last(), Some(&GameEvent::GameOver));

    let elapsed = session.elapsed();
    session.step(1.0);
    assert_eq!(session.elapsed(), elapsed);
    assert!(!session.answer(0));
}

#[test]
fn test_unlimited_lives() {
    let settings = Settings {
        lives: None,
        ..settings()
    };
    let mut session = start(Ruleset::space_invaders(), questions(), &settings);

    for _ in 0..7 {
        assert!(session.answer(wrong_choice(&session)));
    }
    assert_eq!(session.lives(), None);
    assert_eq!(session.phase(), Phase::Asking);
    assert!(
        session
            .take_events()
            .contains(&GameEvent::LifeLost { remaining: None })
    );
}

#[test]
fn test_wrong_answer_sends_creature_rushing() {
    let mut session = start(Ruleset::tower_defense(), questions(), &settings());
    assert_eq!(session.arena().shooters.len(), 6);
    assert_eq!(session.arena().foes.len(), 1);
    session.take_events();

    assert!(session.answer(wrong_choice(&session)));
    assert_eq!(session.phase(), Phase::Resolving);
    assert_eq!(session.lives(), Some(3));
    assert_eq!(
        session.take_events(),
        vec![
            GameEvent::AnsweredWrongly,
            GameEvent::RushStarted { count: 1 },
        ]
    );
    assert!(!session.answer(0));

    let events = run_until(&mut session, 900, |s| s.phase() == Phase::Asking);
    assert!(
        events
            .iter()
            .any(|e| matches!(e, GameEvent::FoeReachedGoal { .. }))
    );
    assert!(events.contains(&GameEvent::LifeLost { remaining: Some(2) }));
    assert!(events.contains(&GameEvent::QuestionAdvanced { number: 2 }));
    assert_eq!(session.lives(), Some(2));
    assert_eq!(session.phase(), Phase::Asking);

    // a fresh creature for the next question
    assert_eq!(session.arena().foes.len(), 1);
    assert_eq!(session.arena().rushing_foe_count(), 0);
}

#[test]
fn test_one_each_ends_with_a_win() {
    let settings = Settings {
        question_mode: QuestionMode::OneEach,
        ..settings()
    };
    let mut session = start(
        Ruleset::cowboy_shooter(),
        vec![Question::new("2 + 2", "4")],
        &settings,
    );
    // a wave never holds more bottles than questions left
    assert_eq!(session.arena().active_foe_count(), 1);
    assert_eq!(
        session.arena().foes[0].pos,
        macroquad::math::Vec2::new(302.0, 120.0)
    );

    assert!(session.answer(correct_choice(&session)));
    assert_eq!(session.phase(), Phase::Resolving);

    let events = run_until(&mut session, 240, Session::is_over);
    assert_eq!(session.phase(), Phase::Won);
    assert_eq!(session.score(), 100);
    assert_eq!(events.last(), Some(&GameEvent::Won));
}

#[test]
fn test_correct_answer_while_last_bottle_breaks_is_logged() {
    let mut session = start(Ruleset::cowboy_shooter(), questions(), &settings());
    for _ in 0..100 {
        if session.arena().active_foe_count() == 0 {
            break;
        }
        assert!(session.answer(correct_choice(&session)));
        run_until(&mut session, 240, Session::accepts_answers);
    }
    // every bottle is hit, the last one is still on the shelf breaking
    assert_eq!(session.arena().active_foe_count(), 0);
    assert!(!session.arena().foes.is_empty());
    session.take_events();

    let score = session.score();
    assert!(session.answer(correct_choice(&session)));
    assert_eq!(session.score(), score + 100);
    let events = session.take_events();
    assert_eq!(events[0], GameEvent::AnsweredCorrectly);
    assert_eq!(events[1], GameEvent::ScoredWithoutShot { points: 100 });
    assert!(!events.iter().any(|e| matches!(e, GameEvent::ProjectileFired { .. })));

    let log: Vec<&str> = session
        .event_log()
        .events()
        .iter()
        .take(3)
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(log[1..], ["No target, +100", "Correct!"]);

    // the wave refills once the bottle is gone
    run_until(&mut session, 60, |s| s.arena().active_foe_count() > 0);
    assert_eq!(session.arena().active_foe_count(), 24);
}

#[test]
fn test_one_each_caps_wave_at_questions_left() {
    let settings = Settings {
        question_mode: QuestionMode::OneEach,
        ..settings()
    };
    let session = start(
        Ruleset::space_invaders(),
        questions()[..2].to_vec(),
        &settings,
    );
    assert_eq!(session.arena().active_foe_count(), 2);
}

#[test]
fn test_one_each_wrong_final_answer_still_wins_with_lives_left() {
    let settings = Settings {
        question_mode: QuestionMode::OneEach,
        ..settings()
    };
    let mut session = start(Ruleset::space_invaders(), questions(), &settings);
    for _ in 0..3 {
        assert!(session.answer(wrong_choice(&session)));
    }
    // three wrong answers cost all three lives
    assert_eq!(session.phase(), Phase::GameOver);

    let settings = Settings {
        lives: None,
        ..settings
    };
    let mut session = start(Ruleset::space_invaders(), questions(), &settings);
    for _ in 0..3 {
        assert!(session.answer(wrong_choice(&session)));
    }
    assert_eq!(session.phase(), Phase::Won);
}

#[test]
fn test_session_clock_expires() {
    let settings = Settings {
        total_time: Some(2.0),
        ..settings()
    };
    let mut session = start(Ruleset::cowboy_shooter(), questions(), &settings);
    assert_eq!(session.session_time_left(), Some(2.0));

    for _ in 0..3 {
        session.step(0.5);
    }
    assert!(!session.is_over());
    assert_eq!(session.session_time_left(), Some(0.5));

    session.step(0.5);
    assert_eq!(session.phase(), Phase::GameOver);
    let events = session.take_events();
    assert!(events.contains(&GameEvent::SessionExpired));
    assert_eq!(events.last(), Some(&GameEvent::GameOver));
}

#[test]
fn test_invaders_arrive_when_clock_runs_out() {
    let settings = Settings {
        total_time: Some(10.0),
        lives: None,
        ..settings()
    };
    let mut session = start(Ruleset::space_invaders(), questions(), &settings);

    for _ in 0..400 {
        session.step(0.05);
        if session.is_over() {
            break;
        }
    }
    assert_eq!(session.phase(), Phase::GameOver);
    assert!(session.elapsed() < 10.2);
}

#[test]
fn test_question_timer_runs_out() {
    let settings = Settings {
        time_between_questions: Some(2.0),
        ..settings()
    };
    let mut session = start(Ruleset::cowboy_shooter(), questions(), &settings);
    session.take_events();

    for _ in 0..3 {
        session.step(0.5);
    }
    assert_eq!(session.lives(), Some(3));
    assert_eq!(session.question_time_left(), Some(0.5));

    session.step(0.5);
    assert_eq!(session.lives(), Some(2));
    assert_eq!(session.question_time_left(), Some(2.0));
    let events = session.take_events();
    assert_eq!(events[0], GameEvent::QuestionTimedOut);
    assert!(events.contains(&GameEvent::QuestionAdvanced { number: 2 }));
}

#[test]
fn test_question_timer_in_milliseconds() {
    let settings = Settings {
        time_between_questions: Some(1500.0),
        ..settings()
    };
    let session = start(Ruleset::cowboy_shooter(), questions(), &settings);
    assert_eq!(session.question_time_left(), Some(1.5));
}

#[test]
fn test_question_timer_pauses_while_shot_resolves() {
    let settings = Settings {
        time_between_questions: Some(2.0),
        ..settings()
    };
    let mut session = start(Ruleset::space_invaders(), questions(), &settings);

    session.step(0.5);
    assert_eq!(session.question_time_left(), Some(1.5));

    assert!(session.answer(correct_choice(&session)));
    // the next question starts with a full timer
    assert_eq!(session.question_time_left(), Some(2.0));

    run_until(&mut session, 120, |s| s.phase() == Phase::Asking);
    assert_eq!(session.phase(), Phase::Asking);
    assert_eq!(session.question_time_left(), Some(2.0));
}

#[test]
fn test_no_questions_means_nothing_to_answer() {
    let mut session = start(Ruleset::space_invaders(), Vec::new(), &settings());

    assert_eq!(session.phase(), Phase::Asking);
    assert!(session.round().is_none());
    assert!(session.current_choices().is_empty());
    assert!(!session.accepts_answers());
    assert!(!session.answer(0));

    session.step(DT);
    assert!(!session.is_over());
}

#[test]
fn test_choices_are_four_distinct_strings() {
    let settings = Settings {
        lives: None,
        question_order: QuestionOrder::Random,
        ..settings()
    };
    let mut session = start(Ruleset::cowboy_shooter(), questions(), &settings);

    for _ in 0..9 {
        let round = session.round().expect("loop mode always has a question");
        assert_eq!(round.choices.len(), 4);
        let unique: HashSet<&String> = round.choices.iter().collect();
        assert_eq!(unique.len(), 4);
        assert_eq!(round.choices[round.correct_index], round.question.answer);
        assert!(session.answer(wrong_choice(&session)));
    }
}

#[test]
fn test_aim_moves_ship_within_range() {
    let mut session = start(Ruleset::space_invaders(), questions(), &settings());

    session.move_aim(1.0, 0.5);
    assert_eq!(session.arena().shooters[0].pos.x, 580.0);

    session.move_aim(5.0, 10.0);
    assert_eq!(session.arena().shooters[0].pos.x, 775.0);

    let mut tower = start(Ruleset::tower_defense(), questions(), &settings());
    let before = tower.arena().shooters.clone();
    tower.move_aim(1.0, 1.0);
    assert_eq!(tower.arena().shooters, before);
}

#[test]
fn test_event_log_describes_events() {
    let mut session = start(Ruleset::space_invaders(), questions(), &settings());
    session.answer(wrong_choice(&session));

    let log: Vec<&str> = session
        .event_log()
        .events()
        .iter()
        .map(|e| e.description.as_str())
        .collect();
    assert_eq!(
        log,
        vec!["Question 2", "Life lost, 2 left", "Wrong answer", "Question 1"]
    );
}
