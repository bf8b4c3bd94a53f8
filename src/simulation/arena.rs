//! Combat engine shared by every minigame.
//!
//! The arena owns the shooters, foes and projectiles of one session and
//! advances them tick by tick. It knows nothing about questions: the session
//! tells it when to fire or when to send foes rushing, and reads back the
//! [`GameEvent`]s each [`Arena::step`] produces.

use macroquad::math::Vec2;
use rand::Rng;

use super::events::{EventQueue, GameEvent};
use super::foe::{EntityId, Foe, FoeMotion, FoeState};
use super::formation::{self, Formation};
use super::geometric_utils::{self, Bounds};
use super::locatable::Locatable;
use super::params::Params;
use super::path::Path;
use super::path_follower::PathFollower;
use super::projectile::Projectile;
use super::ruleset::{RushStyle, Ruleset, ShooterLayout, SpawnPolicy, TargetPolicy};
use super::spatial::SpatialIndex;

/// Waypoints per tower slot when spreading towers along a track.
const WAYPOINTS_PER_TOWER: usize = 40;
/// Fewest towers placed along a track, capped by the layout maximum.
const MIN_TOWERS: usize = 4;
/// How far ahead to look when taking the track direction for tower placement.
const NORMAL_LOOKAHEAD: usize = 2;

/// Something that fires projectiles: the player's ship or cowboy, or a tower.
#[derive(Debug, Clone, PartialEq)]
pub struct Shooter {
    /// Centre of the shooter.
    pub pos: Vec2,
    /// Sprite size.
    pub size: Vec2,
    /// Offset from `pos` to the muzzle.
    pub muzzle_offset: Vec2,
    /// Horizontal aim position, used by [`TargetPolicy::NearestToAim`].
    pub aim_x: f32,
}

impl Shooter {
    /// Creates a shooter aiming straight ahead of itself.
    pub fn new(pos: Vec2, size: Vec2, muzzle_offset: Vec2) -> Self {
        Self {
            pos,
            size,
            muzzle_offset,
            aim_x: pos.x,
        }
    }

    /// Point projectiles are fired from.
    pub fn muzzle(&self) -> Vec2 {
        self.pos + self.muzzle_offset
    }
}

/// All entities of a running game and the per-tick update over them.
#[derive(Debug, Clone)]
pub struct Arena {
    /// Visible playing field.
    pub field: Bounds,
    /// Shooters, in placement order.
    pub shooters: Vec<Shooter>,
    /// Foes still in play, including ones playing a break animation.
    pub foes: Vec<Foe>,
    /// Projectiles in flight.
    pub projectiles: Vec<Projectile>,
    /// Track walked by path foes.
    pub path: Option<Path>,
    /// Where new foes enter.
    pub spawn: Vec2,
    /// What rushing foes head for.
    pub goal: Vec2,
    /// Shared march of formation foes.
    pub formation: Option<Formation>,
    /// Y coordinate formation foes must not reach.
    pub defense_line: Option<f32>,
    /// Whether hit foes break before they are removed.
    pub breaks_on_hit: bool,
    next_id: EntityId,
    wave_active: bool,
}

impl Arena {
    /// Creates an empty arena over `field`.
    pub fn new(field: Bounds) -> Self {
        let center = (field.min + field.max) / 2.0;
        Self {
            field,
            shooters: Vec::new(),
            foes: Vec::new(),
            projectiles: Vec::new(),
            path: None,
            spawn: center,
            goal: center,
            formation: None,
            defense_line: None,
            breaks_on_hit: false,
            next_id: 0,
            wave_active: false,
        }
    }

    /// Builds the static layout of a game: track, shooters, formation and
    /// defense line. Foes are spawned separately by the session.
    ///
    /// # Arguments
    ///
    /// * `ruleset` - Game to lay out
    /// * `speed_multiplier` - Scales formation march speed
    /// * `rng` - Source for tower placement jitter
    pub fn from_ruleset<R: Rng + ?Sized>(
        ruleset: &Ruleset,
        speed_multiplier: f32,
        rng: &mut R,
    ) -> Self {
        let mut arena = Self::new(ruleset.field);
        arena.breaks_on_hit = ruleset.breaks_on_hit;
        arena.defense_line = ruleset.defense_line;
        arena.formation = ruleset
            .march
            .map(|march| Formation::new(march.speed * speed_multiplier, march.drop));

        if let SpawnPolicy::PerQuestion { track, .. } = ruleset.spawn {
            let path = Path::looped_ellipse(track.center, track.radii, track.wobble, track.steps);
            arena.spawn = path.waypoint(0);
            arena.goal = path.waypoint(path.len() / 2);
            arena.path = Some(path);
        }

        match ruleset.shooters {
            ShooterLayout::Player {
                pos, size, muzzle, ..
            } => {
                arena.goal = pos;
                arena.shooters.push(Shooter::new(pos, size, muzzle));
            }
            ShooterLayout::TowersAlongPath {
                max,
                offset,
                jitter,
                size,
            } => {
                arena.place_towers_along_path(max, offset, jitter, size, rng);
            }
        }
        arena
    }

    /// Adds a shooter and returns its index.
    pub fn add_shooter(&mut self, shooter: Shooter) -> usize {
        self.shooters.push(shooter);
        self.shooters.len() - 1
    }

    /// Adds an active foe and returns its id.
    pub fn spawn_foe(&mut self, pos: Vec2, size: Vec2, motion: FoeMotion) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.foes.push(Foe::new(id, pos, size, motion));
        id
    }

    /// Spawns a grid of `count` foes centred horizontally on the field.
    ///
    /// Row `r`, column `c` sits at `top + r * spacing.y`, with columns spread
    /// symmetrically around the field centre.
    pub fn spawn_wave(
        &mut self,
        count: usize,
        columns: usize,
        spacing: Vec2,
        top: f32,
        size: Vec2,
        marching: bool,
    ) -> usize {
        let columns = columns.max(1);
        let center_x = (self.field.min.x + self.field.max.x) / 2.0;
        let start_x = center_x - (columns - 1) as f32 * spacing.x / 2.0;
        let motion = if marching {
            FoeMotion::Formation
        } else {
            FoeMotion::Static
        };

        for i in 0..count {
            let row = i / columns;
            let col = i % columns;
            let pos = Vec2::new(
                start_x + col as f32 * spacing.x,
                top + row as f32 * spacing.y,
            );
            self.spawn_foe(pos, size, motion.clone());
        }
        if let Some(formation) = &mut self.formation {
            formation.direction = 1.0;
        }
        self.wave_active = count > 0;
        log::info!("spawned a wave of {count}");
        count
    }

    /// Spawns a looping foe at the start of the track.
    ///
    /// Returns `None` when the arena has no track.
    pub fn spawn_path_foe(&mut self, speed: f32, size: Vec2) -> Option<EntityId> {
        let follower = PathFollower::new(self.path.as_ref()?, speed);
        let pos = follower.pos;
        let id = self.spawn_foe(pos, size, FoeMotion::Path(follower));
        log::debug!("spawned path foe {id}");
        Some(id)
    }

    /// Places towers beside the track, evenly spread by waypoint index.
    ///
    /// Tower count is `min(max, max(4, waypoints / 40))`. Each tower sits
    /// `offset ± jitter` along the track normal. Does nothing without a track.
    pub fn place_towers_along_path<R: Rng + ?Sized>(
        &mut self,
        max: usize,
        offset: f32,
        jitter: f32,
        size: Vec2,
        rng: &mut R,
    ) {
        let Some(path) = &self.path else {
            log::warn!("no track to place towers along");
            return;
        };
        let count = max.min(MIN_TOWERS.max(path.len() / WAYPOINTS_PER_TOWER));
        let jitter = jitter.abs();

        let towers: Vec<Shooter> = (0..count)
            .map(|i| {
                let index = i * path.len() / count;
                let distance = offset + rng.random_range(-jitter..=jitter);
                let pos = path.waypoint(index) + path.normal_at(index, NORMAL_LOOKAHEAD) * distance;
                Shooter::new(pos, size, Vec2::ZERO)
            })
            .collect();
        self.shooters.extend(towers);
    }

    /// Looks up a foe by id.
    pub fn foe(&self, id: EntityId) -> Option<&Foe> {
        self.foes.iter().find(|f| f.id == id)
    }

    /// Number of foes that can still be targeted.
    pub fn active_foe_count(&self) -> usize {
        self.foes.iter().filter(|f| f.is_active()).count()
    }

    /// Number of active foes that are rushing the goal.
    pub fn rushing_foe_count(&self) -> usize {
        self.foes
            .iter()
            .filter(|f| f.is_active() && f.follower().is_some_and(PathFollower::is_rushing))
            .count()
    }

    /// Whether a projectile aimed at a foe is still in flight.
    pub fn has_aimed_projectile(&self) -> bool {
        self.projectiles.iter().any(|p| p.target.is_some())
    }

    /// Whether a wave is on the field and not yet cleared.
    pub fn wave_active(&self) -> bool {
        self.wave_active
    }

    /// Picks the foe a correct answer should shoot at.
    ///
    /// [`TargetPolicy::NearestToAim`] compares horizontal distance only, with
    /// ties broken toward the bottom of the field.
    pub fn select_target(&self, policy: TargetPolicy) -> Option<EntityId> {
        let candidates = self.foes.iter().filter(|f| f.is_active());
        match policy {
            TargetPolicy::NearestToAim => {
                let aim_x = self
                    .shooters
                    .first()
                    .map_or((self.field.min.x + self.field.max.x) / 2.0, |s| s.aim_x);
                // ties go to the foe closest to the shooters' side of the field
                candidates
                    .min_by(|a, b| {
                        (a.pos.x - aim_x)
                            .abs()
                            .total_cmp(&(b.pos.x - aim_x).abs())
                            .then(b.pos.y.total_cmp(&a.pos.y))
                    })
                    .map(|f| f.id)
            }
            TargetPolicy::NearestToSpawn => candidates
                .min_by(|a, b| {
                    a.pos
                        .distance_squared(self.spawn)
                        .total_cmp(&b.pos.distance_squared(self.spawn))
                })
                .map(|f| f.id),
        }
    }

    /// Index of the shooter closest to `pos`.
    pub fn nearest_shooter(&self, pos: Vec2) -> Option<usize> {
        let positions: Vec<Vec2> = self.shooters.iter().map(|s| s.pos).collect();
        geometric_utils::nearest_index(&positions, pos)
    }

    /// Fires a projectile from shooter `shooter` at foe `target`.
    ///
    /// Returns `None` if either the shooter or the foe does not exist.
    pub fn fire(
        &mut self,
        shooter: usize,
        target: EntityId,
        speed: f32,
        size: Vec2,
        epsilon: f32,
    ) -> Option<GameEvent> {
        let target_pos = self.foe(target)?.pos;
        let origin = self.shooters.get(shooter)?.muzzle();
        let projectile = Projectile::fire_with_epsilon(origin, target_pos, speed, epsilon)
            .aimed_at(target)
            .with_size(size);
        log::debug!(
            "shooter {shooter} fired at foe {target} with velocity {:?}",
            projectile.velocity
        );
        self.projectiles.push(projectile);
        Some(GameEvent::ProjectileFired {
            origin,
            target: Some(target),
        })
    }

    /// Moves the aim of the first shooter by `dx`, clamped to `range`.
    ///
    /// When `moves_shooter` is set the shooter itself follows the aim.
    pub fn move_aim(&mut self, dx: f32, range: (f32, f32), moves_shooter: bool) {
        let Some(shooter) = self.shooters.first_mut() else {
            return;
        };
        shooter.aim_x = (shooter.aim_x + dx).clamp(range.0, range.1);
        if moves_shooter {
            shooter.pos.x = shooter.aim_x;
        }
    }

    /// Sends every looping path foe rushing toward the goal.
    ///
    /// Returns how many foes switched. Foes already rushing are unaffected.
    pub fn rush_all(&mut self, style: RushStyle, multiplier: f32) -> usize {
        let goal = self.goal;
        let mut count = 0;
        for foe in self.foes.iter_mut().filter(|f| f.is_active()) {
            let Some(follower) = foe.follower_mut() else {
                continue;
            };
            if follower.is_rushing() {
                continue;
            }
            match (style, &self.path) {
                (RushStyle::AlongPath, Some(path)) => {
                    follower.set_rush_along_path(path, goal, multiplier);
                }
                _ => follower.set_rush(goal, multiplier),
            }
            count += 1;
        }
        if count > 0 {
            log::debug!("{count} foes rushing toward {goal:?}");
        }
        count
    }

    /// Destroys a foe without a projectile.
    ///
    /// Returns `false` if no active foe has that id.
    pub fn destroy_foe_now(&mut self, id: EntityId, params: &Params) -> bool {
        let breaks = self.breaks_on_hit;
        let Some(foe) = self.foes.iter_mut().find(|f| f.id == id && f.is_active()) else {
            return false;
        };
        knock_out(foe, breaks, params);
        self.foes.retain(|f| !f.is_finished());
        true
    }

    /// Sends the formation back to the rows it spawned on.
    pub fn wrap_formation(&mut self) {
        formation::wrap_to_home(&mut self.foes);
    }

    /// Advances every entity by `dt` seconds.
    ///
    /// Phases, in order: formation march, path followers, break animations,
    /// projectile motion, aimed proximity hits, broad-phase hits, projectile
    /// expiry, rush arrivals and breaches, wave clear.
    pub fn step(&mut self, dt: f32, params: &Params) -> Vec<GameEvent> {
        log::trace!(
            "arena step dt={dt:.4} foes={} projectiles={}",
            self.foes.len(),
            self.projectiles.len()
        );
        let mut queue = EventQueue::new();

        // formation
        let halted = self.has_aimed_projectile();
        if let Some(formation) = &mut self.formation {
            formation.halted = halted;
            formation.march(&mut self.foes, &self.field, dt);
        }

        // path followers
        if let Some(path) = &self.path {
            for foe in self.foes.iter_mut().filter(|f| f.is_active()) {
                if let FoeMotion::Path(follower) = &mut foe.motion {
                    follower.advance(path, dt);
                    foe.pos = follower.pos;
                }
            }
        }

        // break animations
        for foe in &mut self.foes {
            foe.update(dt);
        }
        self.foes.retain(|f| !f.is_finished());

        for projectile in &mut self.projectiles {
            projectile.update(dt);
        }

        let mut spent = vec![false; self.projectiles.len()];
        self.resolve_aimed_hits(&mut spent, params, &mut queue);
        self.resolve_overlaps(&mut spent, params, &mut queue);

        let mut index = 0;
        self.projectiles.retain(|_| {
            let keep = !spent[index];
            index += 1;
            keep
        });
        self.foes.retain(|f| !f.is_finished());

        // expiry
        let field = self.field;
        self.projectiles.retain(|p| {
            let expired = p.is_expired(&field, params.offscreen_margin);
            if expired {
                log::debug!("projectile aimed at {:?} left the field", p.target);
                queue.push(GameEvent::ProjectileExpired { target: p.target });
            }
            !expired
        });

        self.resolve_arrivals(params, &mut queue);

        if let Some(line) = self.defense_line {
            let breached = self
                .foes
                .iter()
                .any(|f| f.is_active() && f.motion == FoeMotion::Formation && f.bottom() >= line);
            if breached {
                log::debug!("formation crossed the defense line at y={line}");
                queue.push(GameEvent::FormationBreached);
            }
        }

        if self.wave_active
            && !self
                .foes
                .iter()
                .any(|f| matches!(f.motion, FoeMotion::Formation | FoeMotion::Static))
        {
            self.wave_active = false;
            queue.push(GameEvent::WaveCleared);
        }

        queue.into_vec()
    }

    /// Aimed projectiles hit their own target once within its proximity radius.
    fn resolve_aimed_hits(&mut self, spent: &mut [bool], params: &Params, queue: &mut EventQueue) {
        for (i, projectile) in self.projectiles.iter().enumerate() {
            let Some(target) = projectile.target else {
                continue;
            };
            // target already gone: nothing to resolve
            let Some(foe) = self.foes.iter_mut().find(|f| f.id == target && f.is_active()) else {
                continue;
            };
            if projectile.within_reach(
                foe.pos,
                foe.size,
                params.min_collision_radius,
                params.collision_radius_divisor,
            ) {
                spent[i] = true;
                knock_out(foe, self.breaks_on_hit, params);
                log::debug!("projectile hit its target {}", foe.id);
                queue.push(GameEvent::FoeHit {
                    foe_id: foe.id,
                    pos: foe.pos,
                    aimed: true,
                });
            }
        }
    }

    /// Any remaining projectile overlapping an active foe destroys it.
    fn resolve_overlaps(&mut self, spent: &mut [bool], params: &Params, queue: &mut EventQueue) {
        if self.projectiles.is_empty() || self.active_foe_count() == 0 {
            return;
        }
        let index = match SpatialIndex::build(&self.foes) {
            Ok(index) => index,
            Err(e) => {
                log::warn!("skipping broad-phase collisions: {e:?}");
                return;
            }
        };

        for (i, projectile) in self.projectiles.iter().enumerate() {
            if spent[i] {
                continue;
            }
            let radius = projectile.size.length() / 2.0 + index.max_reach();
            for (_, foe_idx) in index.query_foes(projectile.pos, radius) {
                let foe = &mut self.foes[foe_idx];
                if !foe.is_active()
                    || !geometric_utils::boxes_overlap(
                        projectile.pos,
                        projectile.size,
                        foe.pos,
                        foe.size,
                    )
                {
                    continue;
                }
                spent[i] = true;
                knock_out(foe, self.breaks_on_hit, params);
                log::debug!("projectile overlapped foe {}", foe.id);
                queue.push(GameEvent::FoeHit {
                    foe_id: foe.id,
                    pos: foe.pos,
                    aimed: projectile.target == Some(foe.id),
                });
            }
        }
    }

    /// Removes rushing foes that reached the goal.
    fn resolve_arrivals(&mut self, params: &Params, queue: &mut EventQueue) {
        let Some(path) = &self.path else {
            return;
        };
        self.foes.retain(|foe| {
            let arrived = foe.is_active()
                && foe
                    .follower()
                    .is_some_and(|f| f.reached_goal(path, params.arrival_threshold));
            if arrived {
                log::debug!("foe {} reached the goal", foe.id);
                queue.push(GameEvent::FoeReachedGoal { foe_id: foe.id });
            }
            !arrived
        });
    }
}

/// Takes a hit foe out of play, either into its break animation or straight
/// to removal.
fn knock_out(foe: &mut Foe, breaks: bool, params: &Params) {
    if breaks {
        foe.start_break(params.break_duration);
    } else {
        foe.state = FoeState::Breaking { remaining: 0.0 };
    }
}
