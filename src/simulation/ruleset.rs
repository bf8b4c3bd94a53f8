//! Per-game parameterisation of the combat engine.
//!
//! Every game runs on the same [`Arena`](super::arena::Arena) and
//! [`Session`](super::session::Session); a [`Ruleset`] says where the shooters
//! stand, what the foes look like, how they move, who gets shot on a correct
//! answer and what a wrong answer costs.

use std::fmt;
use std::str::FromStr;

use macroquad::math::Vec2;

use super::geometric_utils::Bounds;

/// Width of the playing field.
pub const FIELD_WIDTH: f32 = 800.0;
/// Height of the playing field.
pub const FIELD_HEIGHT: f32 = 600.0;

/// The available minigames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    /// Ship versus a marching invader formation.
    SpaceInvaders,
    /// Cowboy shooting bottles off a shelf.
    CowboyShooter,
    /// Towers defending a power source from a looping creature.
    TowerDefense,
}

impl GameKind {
    /// Every game, in menu order.
    pub const ALL: [GameKind; 3] = [
        GameKind::SpaceInvaders,
        GameKind::CowboyShooter,
        GameKind::TowerDefense,
    ];

    /// Display title.
    pub fn title(self) -> &'static str {
        match self {
            GameKind::SpaceInvaders => "Space Invaders",
            GameKind::CowboyShooter => "Cowboy Shooter",
            GameKind::TowerDefense => "Tower Defense",
        }
    }

    /// Short identifier used on the command line and for asset folders.
    pub fn slug(self) -> &'static str {
        match self {
            GameKind::SpaceInvaders => "space",
            GameKind::CowboyShooter => "cowboy",
            GameKind::TowerDefense => "tower",
        }
    }

    /// One-line description for the menu.
    pub fn blurb(self) -> &'static str {
        match self {
            GameKind::SpaceInvaders => "Answer right to shoot an invader. Wrong answers cost a life.",
            GameKind::CowboyShooter => "Answer right to break a bottle. Wrong answers jam the gun.",
            GameKind::TowerDefense => {
                "Answer right and the nearest tower fires. Wrong answers send the creature rushing."
            }
        }
    }
}

impl fmt::Display for GameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for GameKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GameKind::ALL
            .into_iter()
            .find(|kind| kind.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown game `{s}` (expected space, cowboy or tower)"))
    }
}

/// Where shooters come from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShooterLayout {
    /// A single player-controlled shooter.
    Player {
        /// Centre of the shooter sprite.
        pos: Vec2,
        /// Sprite size.
        size: Vec2,
        /// Offset from `pos` to where projectiles appear.
        muzzle: Vec2,
        /// Whether moving the aim drags the whole shooter along.
        aim_moves_shooter: bool,
        /// Horizontal limits for the aim point.
        aim_range: (f32, f32),
        /// Aim speed in units per second.
        aim_speed: f32,
    },
    /// Towers placed beside the track.
    TowersAlongPath {
        /// Upper bound on tower count.
        max: usize,
        /// Distance from the track to each tower.
        offset: f32,
        /// Random variation applied to `offset`.
        jitter: f32,
        /// Tower sprite size.
        size: Vec2,
    },
}

/// Which foe a correct answer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetPolicy {
    /// The foe horizontally closest to the player's aim.
    NearestToAim,
    /// The foe closest to the spawn point.
    NearestToSpawn,
}

/// How a rushing foe heads for the goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RushStyle {
    /// Straight line to the goal point.
    Direct,
    /// Keep following the track up to the goal waypoint.
    AlongPath,
}

/// What a wrong answer or a timeout costs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WrongAnswerPolicy {
    /// Lose a life immediately and move on.
    LoseLife,
    /// Foes rush the goal; a life is lost only when one arrives.
    Rush(RushStyle),
}

/// Closed track shape for path-following games.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSpec {
    /// Centre of the loop.
    pub center: Vec2,
    /// Horizontal and vertical radii.
    pub radii: Vec2,
    /// Vertical ripple amplitude.
    pub wobble: f32,
    /// Number of waypoints.
    pub steps: usize,
}

/// How foes enter the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnPolicy {
    /// A grid of foes, refilled when the wave is cleared.
    Waves {
        /// Foes per full wave.
        per_wave: usize,
        /// Grid columns.
        columns: usize,
        /// Centre-to-centre spacing between grid cells.
        spacing: Vec2,
        /// Y coordinate of the first row's centre.
        top: f32,
        /// Whether the wave marches as a formation.
        marching: bool,
    },
    /// One track creature per question.
    PerQuestion {
        /// Base speed along the track in units per second.
        speed: f32,
        /// Shape of the track.
        track: TrackSpec,
    },
}

/// Sideways march of a formation wave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchSpec {
    /// Horizontal speed in units per second.
    pub speed: f32,
    /// Drop on each bounce.
    pub drop: f32,
}

/// Full description of one game.
#[derive(Debug, Clone, PartialEq)]
pub struct Ruleset {
    /// Which game this is.
    pub kind: GameKind,
    /// Visible playing field.
    pub field: Bounds,
    /// Shooter placement.
    pub shooters: ShooterLayout,
    /// Target choice on a correct answer.
    pub targeting: TargetPolicy,
    /// Cost of a wrong answer.
    pub wrong_answer: WrongAnswerPolicy,
    /// How foes are spawned.
    pub spawn: SpawnPolicy,
    /// Foe collision box size.
    pub foe_size: Vec2,
    /// Projectile speed in units per second.
    pub projectile_speed: f32,
    /// Projectile collision box size.
    pub projectile_size: Vec2,
    /// Whether hit foes play a break animation before disappearing.
    pub breaks_on_hit: bool,
    /// Formation march, for marching waves.
    pub march: Option<MarchSpec>,
    /// Y coordinate that foes must not reach.
    pub defense_line: Option<f32>,
}

impl Ruleset {
    /// Rules for `kind`.
    pub fn for_kind(kind: GameKind) -> Self {
        match kind {
            GameKind::SpaceInvaders => Self::space_invaders(),
            GameKind::CowboyShooter => Self::cowboy_shooter(),
            GameKind::TowerDefense => Self::tower_defense(),
        }
    }

    /// Ship at the bottom, 18 invaders in rows of 6.
    pub fn space_invaders() -> Self {
        let ship_pos = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - 40.0);
        let ship_size = Vec2::new(50.0, 20.0);
        Self {
            kind: GameKind::SpaceInvaders,
            field: Bounds::from_size(FIELD_WIDTH, FIELD_HEIGHT),
            shooters: ShooterLayout::Player {
                pos: ship_pos,
                size: ship_size,
                muzzle: Vec2::new(0.0, -ship_size.y / 2.0),
                aim_moves_shooter: true,
                aim_range: (ship_size.x / 2.0, FIELD_WIDTH - ship_size.x / 2.0),
                aim_speed: 360.0,
            },
            targeting: TargetPolicy::NearestToAim,
            wrong_answer: WrongAnswerPolicy::LoseLife,
            spawn: SpawnPolicy::Waves {
                per_wave: 18,
                columns: 6,
                spacing: Vec2::new(50.0, 40.0),
                top: 65.0,
                marching: true,
            },
            foe_size: Vec2::new(40.0, 30.0),
            projectile_speed: 720.0,
            projectile_size: Vec2::new(6.0, 12.0),
            breaks_on_hit: false,
            march: Some(MarchSpec {
                speed: 60.0,
                drop: 10.0,
            }),
            defense_line: Some(ship_pos.y - ship_size.y / 2.0),
        }
    }

    /// Cowboy at the bottom, 24 bottles on a shelf in rows of 8.
    pub fn cowboy_shooter() -> Self {
        let cowboy_size = Vec2::new(48.0, 68.0);
        let cowboy_pos = Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT - cowboy_size.y / 2.0);
        Self {
            kind: GameKind::CowboyShooter,
            field: Bounds::from_size(FIELD_WIDTH, FIELD_HEIGHT),
            shooters: ShooterLayout::Player {
                pos: cowboy_pos,
                size: cowboy_size,
                muzzle: Vec2::new(0.0, -cowboy_size.y / 2.0 - 10.0),
                aim_moves_shooter: false,
                aim_range: (40.0, FIELD_WIDTH - 40.0),
                aim_speed: 360.0,
            },
            targeting: TargetPolicy::NearestToAim,
            wrong_answer: WrongAnswerPolicy::LoseLife,
            spawn: SpawnPolicy::Waves {
                per_wave: 24,
                columns: 8,
                spacing: Vec2::new(28.0, 48.0),
                top: 120.0,
                marching: false,
            },
            foe_size: Vec2::new(18.0, 28.0),
            projectile_speed: 600.0,
            projectile_size: Vec2::new(6.0, 12.0),
            breaks_on_hit: true,
            march: None,
            defense_line: None,
        }
    }

    /// A wobbly oval track with up to 8 towers beside it.
    pub fn tower_defense() -> Self {
        Self {
            kind: GameKind::TowerDefense,
            field: Bounds::from_size(FIELD_WIDTH, FIELD_HEIGHT),
            shooters: ShooterLayout::TowersAlongPath {
                max: 8,
                offset: 60.0,
                jitter: 16.0,
                size: Vec2::new(28.0, 28.0),
            },
            targeting: TargetPolicy::NearestToSpawn,
            wrong_answer: WrongAnswerPolicy::Rush(RushStyle::AlongPath),
            spawn: SpawnPolicy::PerQuestion {
                speed: 60.0,
                track: TrackSpec {
                    center: Vec2::new(FIELD_WIDTH / 2.0, FIELD_HEIGHT / 2.0 - 20.0),
                    radii: Vec2::new(FIELD_WIDTH * 0.32, FIELD_HEIGHT * 0.20),
                    wobble: 18.0,
                    steps: 240,
                },
            },
            foe_size: Vec2::new(24.0, 24.0),
            projectile_speed: 400.0,
            projectile_size: Vec2::new(6.0, 6.0),
            breaks_on_hit: false,
            march: None,
            defense_line: None,
        }
    }
}
