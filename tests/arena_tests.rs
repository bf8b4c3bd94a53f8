#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use macroquad::math::{IVec2, Vec2};
use quiz_arcade::simulation::arena::{Arena, Shooter};
use quiz_arcade::simulation::events::GameEvent;
use quiz_arcade::simulation::foe::{Foe, FoeMotion, FoeState};
use quiz_arcade::simulation::formation::Formation;
use quiz_arcade::simulation::geometric_utils::Bounds;
use quiz_arcade::simulation::locatable::Locatable;
use quiz_arcade::simulation::params::Params;
use quiz_arcade::simulation::path::Path;
use quiz_arcade::simulation::projectile::Projectile;
use quiz_arcade::simulation::ruleset::{GameKind, Ruleset, RushStyle, TargetPolicy};
use rand::SeedableRng;
use rand::rngs::StdRng;

const DT: f32 = 1.0 / 60.0;
const INVADER: Vec2 = Vec2::new(40.0, 30.0);

fn empty_arena() -> Arena {
    Arena::new(Bounds::from_size(800.0, 600.0))
}

fn arena_with_shooter() -> Arena {
    let mut arena = empty_arena();
    arena.add_shooter(Shooter::new(
        Vec2::new(400.0, 560.0),
        Vec2::new(50.0, 20.0),
        Vec2::new(0.0, -10.0),
    ));
    arena
}

/// Steps until `found` matches an event, returning every event seen.
fn step_until(
    arena: &mut Arena,
    params: &Params,
    max_ticks: usize,
    found: impl Fn(&GameEvent) -> bool,
) -> Vec<GameEvent> {
    let mut seen = Vec::new();
    for _ in 0..max_ticks {
        let events = arena.step(DT, params);
        let done = events.iter().any(&found);
        seen.extend(events);
        if done {
            break;
        }
    }
    seen
}

#[test]
fn test_aimed_shot_hits_target() {
    let params = Params::default();
    let mut arena = arena_with_shooter();
    let id = arena.spawn_foe(Vec2::new(400.0, 100.0), INVADER, FoeMotion::Static);

    let fired = arena.fire(0, id, 600.0, Vec2::new(6.0, 12.0), params.direction_epsilon);
    assert_eq!(
        fired,
        Some(GameEvent::ProjectileFired {
            origin: Vec2::new(400.0, 550.0),
            target: Some(id),
        })
    );
    assert!(arena.has_aimed_projectile());

    let events = step_until(&mut arena, &params, 120, |e| {
        matches!(e, GameEvent::FoeHit { .. })
    });
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::FoeHit {
            foe_id,
            aimed: true,
            ..
        } if *foe_id == id
    )));
    assert!(arena.foes.is_empty());
    assert!(arena.projectiles.is_empty());
    assert!(!arena.has_aimed_projectile());
}

#[test]
fn test_fire_needs_shooter_and_target() {
    let params = Params::default();
    let mut arena = arena_with_shooter();
    let id = arena.spawn_foe(Vec2::new(400.0, 100.0), INVADER, FoeMotion::Static);

    assert!(arena.fire(3, id, 600.0, INVADER, params.direction_epsilon).is_none());
    assert!(arena.fire(0, id + 1, 600.0, INVADER, params.direction_epsilon).is_none());
    assert!(arena.projectiles.is_empty());
}

#[test]
fn test_untargeted_projectile_hits_by_overlap() {
    let params = Params::default();
    let mut arena = empty_arena();
    let id = arena.spawn_foe(Vec2::new(400.0, 200.0), INVADER, FoeMotion::Static);
    let bystander = arena.spawn_foe(Vec2::new(100.0, 200.0), INVADER, FoeMotion::Static);
    arena
        .projectiles
        .push(Projectile::fire(Vec2::new(400.0, 400.0), Vec2::new(400.0, 0.0), 600.0));

    let events = step_until(&mut arena, &params, 60, |e| {
        matches!(e, GameEvent::FoeHit { .. })
    });
    assert!(events.contains(&GameEvent::FoeHit {
        foe_id: id,
        pos: Vec2::new(400.0, 200.0),
        aimed: false,
    }));
    assert!(arena.foe(id).is_none());
    assert!(arena.foe(bystander).is_some());
    assert!(arena.projectiles.is_empty());
}

#[test]
fn test_projectile_hits_first_foe_in_its_way() {
    let params = Params::default();
    let mut arena = arena_with_shooter();
    let target = arena.spawn_foe(Vec2::new(400.0, 100.0), INVADER, FoeMotion::Static);
    let blocker = arena.spawn_foe(Vec2::new(400.0, 300.0), INVADER, FoeMotion::Static);
    arena
        .fire(0, target, 600.0, Vec2::new(6.0, 12.0), params.direction_epsilon)
        .expect("shot should fire");

    let events = step_until(&mut arena, &params, 120, |e| {
        matches!(e, GameEvent::FoeHit { .. })
    });
    assert!(events.contains(&GameEvent::FoeHit {
        foe_id: blocker,
        pos: Vec2::new(400.0, 300.0),
        aimed: false,
    }));
    assert!(arena.foe(target).is_some());
    assert!(arena.projectiles.is_empty());
}

#[test]
fn test_untargeted_projectile_expires_silently() {
    let params = Params::default();
    let mut arena = empty_arena();
    arena
        .projectiles
        .push(Projectile::fire(Vec2::new(400.0, 10.0), Vec2::new(400.0, 0.0), 600.0));

    let events = arena.step(0.2, &params);
    assert_eq!(events, vec![GameEvent::ProjectileExpired { target: None }]);
    assert!(arena.projectiles.is_empty());
}

#[test]
fn test_shot_at_vanished_target_expires() {
    let params = Params::default();
    let mut arena = arena_with_shooter();
    let id = arena.spawn_foe(Vec2::new(400.0, 100.0), INVADER, FoeMotion::Static);
    arena
        .fire(0, id, 600.0, Vec2::new(6.0, 12.0), params.direction_epsilon)
        .expect("shot should fire");
    assert!(arena.destroy_foe_now(id, &params));

    let events = step_until(&mut arena, &params, 240, |e| {
        matches!(e, GameEvent::ProjectileExpired { .. })
    });
    assert!(!events.iter().any(|e| matches!(e, GameEvent::FoeHit { .. })));
    assert_eq!(
        events.last(),
        Some(&GameEvent::ProjectileExpired { target: Some(id) })
    );
    assert!(!arena.has_aimed_projectile());
}

#[test]
fn test_breaking_foe_is_removed_after_animation() {
    let params = Params::default();
    let mut arena = empty_arena();
    arena.breaks_on_hit = true;
    let id = arena.spawn_foe(Vec2::new(300.0, 120.0), Vec2::new(18.0, 28.0), FoeMotion::Static);

    assert!(arena.destroy_foe_now(id, &params));
    let foe = arena.foe(id).expect("breaking foe stays in play");
    assert_eq!(
        foe.state,
        FoeState::Breaking {
            remaining: params.break_duration
        }
    );
    assert_eq!(arena.active_foe_count(), 0);
    assert_eq!(arena.select_target(TargetPolicy::NearestToAim), None);
    assert!(!arena.destroy_foe_now(id, &params));

    arena.step(0.1, &params);
    assert!(arena.foe(id).is_some());
    arena.step(0.2, &params);
    assert!(arena.foe(id).is_none());
}

#[test]
fn test_wave_cleared_is_reported_once() {
    let params = Params::default();
    let mut arena = empty_arena();
    let spawned = arena.spawn_wave(2, 2, Vec2::new(50.0, 40.0), 100.0, INVADER, false);
    assert_eq!(spawned, 2);
    assert!(arena.wave_active());

    let ids: Vec<_> = arena.foes.iter().map(|f| f.id).collect();
    for id in ids {
        assert!(arena.destroy_foe_now(id, &params));
    }

    assert_eq!(arena.step(DT, &params), vec![GameEvent::WaveCleared]);
    assert!(!arena.wave_active());
    assert!(arena.step(DT, &params).is_empty());
}

#[test]
fn test_wave_grid_is_centred() {
    let mut arena = empty_arena();
    arena.spawn_wave(24, 8, Vec2::new(28.0, 48.0), 120.0, Vec2::new(18.0, 28.0), false);

    assert_eq!(arena.foes.len(), 24);
    assert_eq!(arena.foes[0].pos, Vec2::new(302.0, 120.0));
    assert_eq!(arena.foes[7].pos, Vec2::new(498.0, 120.0));
    assert_eq!(arena.foes[8].pos, Vec2::new(302.0, 168.0));
    assert_eq!(arena.foes[23].pos, Vec2::new(498.0, 216.0));
    assert!(arena.foes.iter().all(|f| f.motion == FoeMotion::Static));

    // ids are never reused
    let mut ids: Vec<_> = arena.foes.iter().map(|f| f.id).collect();
    ids.dedup();
    assert_eq!(ids.len(), 24);
}

#[test]
fn test_nearest_to_aim_prefers_lower_foe_on_ties() {
    let mut arena = arena_with_shooter();
    arena.spawn_foe(Vec2::new(375.0, 100.0), INVADER, FoeMotion::Static);
    let lower = arena.spawn_foe(Vec2::new(425.0, 140.0), INVADER, FoeMotion::Static);
    arena.spawn_foe(Vec2::new(375.0, 140.0), INVADER, FoeMotion::Static);
    arena.spawn_foe(Vec2::new(600.0, 400.0), INVADER, FoeMotion::Static);

    assert_eq!(arena.select_target(TargetPolicy::NearestToAim), Some(lower));

    arena.move_aim(200.0, (25.0, 775.0), true);
    assert_eq!(arena.shooters[0].pos.x, 600.0);
    assert_eq!(arena.select_target(TargetPolicy::NearestToAim), Some(3));
}

#[test]
fn test_nearest_to_spawn() {
    let mut arena = empty_arena();
    arena.spawn = Vec2::ZERO;
    arena.spawn_foe(Vec2::new(100.0, 0.0), INVADER, FoeMotion::Static);
    let closer = arena.spawn_foe(Vec2::new(50.0, 50.0), INVADER, FoeMotion::Static);
    assert_eq!(arena.select_target(TargetPolicy::NearestToSpawn), Some(closer));

    let empty = empty_arena();
    assert_eq!(empty.select_target(TargetPolicy::NearestToSpawn), None);
}

#[test]
fn test_formation_marches_and_bounces() {
    let params = Params::default();
    let mut arena = empty_arena();
    arena.formation = Some(Formation::new(60.0, 10.0));
    let id = arena.spawn_foe(Vec2::new(400.0, 100.0), INVADER, FoeMotion::Formation);

    arena.step(1.0, &params);
    assert_eq!(arena.foe(id).map(|f| f.pos), Some(Vec2::new(460.0, 100.0)));

    arena.foes[0].pos.x = 770.0;
    arena.step(1.0, &params);
    // touching the edge drops a row instead of moving sideways
    assert_eq!(arena.foes[0].pos, Vec2::new(770.0, 110.0));
    assert_eq!(arena.formation.as_ref().map(|f| f.direction), Some(-1.0));

    arena.step(1.0, &params);
    assert_eq!(arena.foes[0].pos, Vec2::new(710.0, 110.0));
}

#[test]
fn test_formation_halts_while_aimed_shot_flies() {
    let params = Params::default();
    let mut arena = empty_arena();
    let mut formation = Formation::new(60.0, 10.0);
    formation.descent_speed = 5.0;
    arena.formation = Some(formation);
    arena.spawn_foe(Vec2::new(400.0, 100.0), INVADER, FoeMotion::Formation);
    arena.projectiles.push(
        Projectile::fire(Vec2::new(100.0, 500.0), Vec2::new(100.0, 0.0), 60.0).aimed_at(99),
    );

    arena.step(1.0, &params);
    assert_eq!(arena.foes[0].pos, Vec2::new(400.0, 105.0));

    arena.projectiles.clear();
    arena.step(1.0, &params);
    assert_eq!(arena.foes[0].pos, Vec2::new(460.0, 110.0));
}

#[test]
fn test_breach_and_wrap() {
    let params = Params::default();
    let mut arena = empty_arena();
    arena.defense_line = Some(550.0);
    arena.spawn_foe(Vec2::new(400.0, 100.0), INVADER, FoeMotion::Formation);
    arena.spawn_foe(Vec2::new(300.0, 540.0), INVADER, FoeMotion::Static);

    assert!(arena.step(DT, &params).is_empty());

    arena.foes[0].pos.y = 540.0;
    let events = arena.step(DT, &params);
    assert!(events.contains(&GameEvent::FormationBreached));

    arena.wrap_formation();
    assert_eq!(arena.foes[0].pos.y, 100.0);
    assert_eq!(arena.foes[1].pos.y, 540.0);
    assert!(arena.step(DT, &params).is_empty());
}

#[test]
fn test_direct_rush_reaches_goal() {
    let params = Params::default();
    let mut arena = empty_arena();
    arena.path = Some(Path::new(vec![
        Vec2::new(0.0, 0.0),
        Vec2::new(10.0, 0.0),
        Vec2::new(10.0, 10.0),
        Vec2::new(0.0, 10.0),
    ]));
    arena.goal = Vec2::new(0.0, 100.0);
    let id = arena
        .spawn_path_foe(10.0, Vec2::new(24.0, 24.0))
        .expect("arena has a track");

    assert_eq!(arena.rush_all(RushStyle::Direct, 2.0), 1);
    assert_eq!(arena.rushing_foe_count(), 1);
    // already rushing
    assert_eq!(arena.rush_all(RushStyle::Direct, 2.0), 0);

    let mut arrived_after = None;
    for tick in 1..=10 {
        let events = arena.step(1.0, &params);
        if events.contains(&GameEvent::FoeReachedGoal { foe_id: id }) {
            arrived_after = Some(tick);
            break;
        }
    }
    // the goal is 100 away at twice the base speed
    assert_eq!(arrived_after, Some(5));
    assert!(arena.foe(id).is_none());
    assert_eq!(arena.rushing_foe_count(), 0);
}

#[test]
fn test_tower_defense_layout_and_rush_along_track() {
    let params = Params::default();
    let mut rng = StdRng::seed_from_u64(7);
    let ruleset = Ruleset::tower_defense();
    let mut arena = Arena::from_ruleset(&ruleset, 1.0, &mut rng);

    assert_eq!(arena.shooters.len(), 6);
    let field = arena.field;
    assert!(arena.shooters.iter().all(|s| field.contains(s.pos)));

    let path = arena.path.clone().expect("tower defense has a track");
    assert_eq!(arena.spawn, path.waypoint(0));
    assert_eq!(arena.goal, path.waypoint(120));

    let id = arena
        .spawn_path_foe(60.0, ruleset.foe_size)
        .expect("arena has a track");
    assert_eq!(arena.foe(id).map(|f| f.pos), Some(arena.spawn));

    // looping foes patrol without ever arriving
    for _ in 0..120 {
        assert!(arena.step(DT, &params).is_empty());
    }

    assert_eq!(arena.rush_all(RushStyle::AlongPath, 2.0), 1);
    let events = step_until(&mut arena, &params, 600, |e| {
        matches!(e, GameEvent::FoeReachedGoal { .. })
    });
    assert!(events.contains(&GameEvent::FoeReachedGoal { foe_id: id }));
    assert!(arena.foes.is_empty());
}

#[test]
fn test_rush_ignores_foes_without_a_track() {
    let mut arena = empty_arena();
    arena.spawn_foe(Vec2::new(400.0, 100.0), INVADER, FoeMotion::Formation);
    assert_eq!(arena.rush_all(RushStyle::Direct, 2.0), 0);
    assert!(arena.spawn_path_foe(60.0, INVADER).is_none());
}

#[test]
fn test_player_layouts() {
    let mut rng = StdRng::seed_from_u64(1);

    let mut space = Arena::from_ruleset(&Ruleset::space_invaders(), 1.0, &mut rng);
    assert_eq!(space.shooters.len(), 1);
    assert_eq!(space.shooters[0].pos, Vec2::new(400.0, 560.0));
    assert_eq!(space.shooters[0].muzzle(), Vec2::new(400.0, 550.0));
    assert_eq!(space.defense_line, Some(550.0));
    assert!(space.formation.is_some());
    assert!(space.path.is_none());
    space.move_aim(1000.0, (25.0, 775.0), true);
    assert_eq!(space.shooters[0].pos.x, 775.0);

    let mut cowboy = Arena::from_ruleset(&Ruleset::cowboy_shooter(), 1.0, &mut rng);
    assert!(cowboy.breaks_on_hit);
    assert!(cowboy.formation.is_none());
    cowboy.move_aim(-1000.0, (40.0, 760.0), false);
    assert_eq!(cowboy.shooters[0].aim_x, 40.0);
    assert_eq!(cowboy.shooters[0].pos.x, 400.0);
}

#[test]
fn test_speed_multiplier_scales_march() {
    let mut rng = StdRng::seed_from_u64(1);
    let arena = Arena::from_ruleset(&Ruleset::space_invaders(), 1.5, &mut rng);
    assert_eq!(arena.formation.map(|f| f.speed), Some(90.0));
}

#[test]
fn test_game_kind_parsing() {
    assert_eq!("space".parse::<GameKind>(), Ok(GameKind::SpaceInvaders));
    assert_eq!(" Cowboy ".parse::<GameKind>(), Ok(GameKind::CowboyShooter));
    assert_eq!("TOWER".parse::<GameKind>(), Ok(GameKind::TowerDefense));
    assert!("pong".parse::<GameKind>().is_err());
    assert_eq!(GameKind::TowerDefense.to_string(), "tower");
    for kind in GameKind::ALL {
        assert_eq!(Ruleset::for_kind(kind).kind, kind);
    }
}

#[test]
fn test_foe_box_edges_and_break_timer() {
    let mut foe = Foe::new(7, Vec2::new(100.4, 50.6), INVADER, FoeMotion::Static);
    assert_eq!(foe.left(), 100.4 - 20.0);
    assert_eq!(foe.right(), 100.4 + 20.0);
    assert_eq!(foe.bottom(), 50.6 + 15.0);
    assert_eq!(foe.render_pos(), IVec2::new(100, 51));

    // only a breaking foe ages
    foe.update(1.0);
    assert!(foe.is_active());
    foe.start_break(0.24);
    foe.update(0.2);
    assert!(!foe.is_finished());
    foe.update(0.05);
    assert!(foe.is_finished());
    assert_eq!(foe.pos(), Vec2::new(100.4, 50.6));
}
