use std::collections::HashMap;

use macroquad::prelude::*;

use quiz_arcade::assets::{
    AssetManifest, ROLE_BACKGROUND, ROLE_FOE, ROLE_FOE_BROKEN, ROLE_GOAL, ROLE_PLAYER,
    ROLE_PROJECTILE, ROLE_TOWER,
};
use quiz_arcade::error::Error;
use quiz_arcade::simulation::foe::{Foe, FoeState};
use quiz_arcade::simulation::locatable::Locatable;
use quiz_arcade::simulation::ruleset::{GameKind, ShooterLayout};
use quiz_arcade::simulation::session::{Phase, Session};

const ROLES: [&str; 7] = [
    ROLE_BACKGROUND,
    ROLE_PLAYER,
    ROLE_TOWER,
    ROLE_FOE,
    ROLE_FOE_BROKEN,
    ROLE_PROJECTILE,
    ROLE_GOAL,
];

/// Maps field coordinates onto the current window.
trait ToScreen {
    type Output;
    fn to_screen(&self, field: Vec2) -> Self::Output;
}

impl ToScreen for Vec2 {
    type Output = Vec2;
    fn to_screen(&self, field: Vec2) -> Vec2 {
        *self * vec2(screen_width() / field.x, screen_height() / field.y)
    }
}

impl ToScreen for IVec2 {
    type Output = Vec2;
    fn to_screen(&self, field: Vec2) -> Vec2 {
        self.as_vec2().to_screen(field)
    }
}

/// Textures declared in a game's manifest, keyed by role.
pub struct Sprites {
    textures: HashMap<&'static str, Texture2D>,
}

impl Sprites {
    /// Loads every declared texture. Missing roles are drawn as shapes.
    pub async fn load(manifest: Option<&AssetManifest>) -> Self {
        let mut textures = HashMap::new();
        let Some(manifest) = manifest else {
            return Self { textures };
        };
        for role in ROLES {
            let path = match manifest.require(role) {
                Ok(path) => path,
                Err(Error::UnknownAssetRole(_)) => continue,
                Err(e) => {
                    log::warn!("{e}");
                    continue;
                }
            };
            match load_texture(&path.to_string_lossy()).await {
                Ok(texture) => {
                    texture.set_filter(FilterMode::Nearest);
                    textures.insert(role, texture);
                }
                Err(e) => log::warn!("could not load {}: {e:?}", path.display()),
            }
        }
        log::info!("loaded {} textures", textures.len());
        Self { textures }
    }

    fn get(&self, role: &str) -> Option<&Texture2D> {
        self.textures.get(role)
    }
}

/// Draws `role` centred on `center`, or a rectangle when it has no texture.
fn draw_sprite(sprites: &Sprites, role: &str, center: Vec2, size: Vec2, fallback: Color) {
    let top_left = center - size / 2.0;
    match sprites.get(role) {
        Some(texture) => draw_texture_ex(
            texture,
            top_left.x,
            top_left.y,
            WHITE,
            DrawTextureParams {
                dest_size: Some(size),
                ..Default::default()
            },
        ),
        None => draw_rectangle(top_left.x, top_left.y, size.x, size.y, fallback),
    }
}

fn background_color(kind: GameKind) -> Color {
    match kind {
        GameKind::SpaceInvaders => Color::from_rgba(10, 10, 30, 255),
        GameKind::CowboyShooter => Color::from_rgba(222, 184, 135, 255),
        GameKind::TowerDefense => Color::from_rgba(34, 85, 34, 255),
    }
}

/// Draws every entity of a running session.
pub fn draw_session(session: &Session, sprites: &Sprites) {
    let arena = session.arena();
    let ruleset = session.ruleset();
    let field = vec2(arena.field.width(), arena.field.height());
    let scale = vec2(screen_width() / field.x, screen_height() / field.y);

    clear_background(background_color(ruleset.kind));
    if let Some(texture) = sprites.get(ROLE_BACKGROUND) {
        draw_texture_ex(
            texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );
    }

    // track
    if let Some(path) = &arena.path {
        let points = path.waypoints();
        for (i, a) in points.iter().enumerate() {
            let a = a.to_screen(field);
            let b = points[(i + 1) % points.len()].to_screen(field);
            draw_line(a.x, a.y, b.x, b.y, 6.0, Color::from_rgba(160, 130, 80, 255));
        }
        draw_sprite(
            sprites,
            ROLE_GOAL,
            arena.goal.to_screen(field),
            vec2(36.0, 36.0) * scale,
            GOLD,
        );
    }

    if let Some(line) = arena.defense_line {
        let y = line * scale.y;
        draw_line(0.0, y, screen_width(), y, 1.0, Color::from_rgba(255, 80, 80, 120));
    }

    let shooter_role = match ruleset.shooters {
        ShooterLayout::Player { .. } => ROLE_PLAYER,
        ShooterLayout::TowersAlongPath { .. } => ROLE_TOWER,
    };
    for shooter in &arena.shooters {
        draw_sprite(
            sprites,
            shooter_role,
            shooter.pos.to_screen(field),
            shooter.size * scale,
            SKYBLUE,
        );
    }

    // crosshair when the aim is separate from the shooter
    if let (ShooterLayout::Player { aim_moves_shooter: false, .. }, Some(shooter)) =
        (ruleset.shooters, arena.shooters.first())
    {
        let aim = vec2(shooter.aim_x, field.y / 2.0).to_screen(field);
        draw_circle_lines(aim.x, aim.y, 10.0, 2.0, RED);
        draw_line(aim.x - 14.0, aim.y, aim.x + 14.0, aim.y, 1.0, RED);
        draw_line(aim.x, aim.y - 14.0, aim.x, aim.y + 14.0, 1.0, RED);
    }

    for foe in &arena.foes {
        draw_foe(foe, sprites, field, scale);
    }

    for projectile in &arena.projectiles {
        draw_sprite(
            sprites,
            ROLE_PROJECTILE,
            projectile.render_pos().to_screen(field),
            projectile.size * scale,
            YELLOW,
        );
    }

    if session.muzzle_flash_active() {
        for shooter in &arena.shooters {
            let muzzle = shooter.muzzle().to_screen(field);
            draw_circle(muzzle.x, muzzle.y, 8.0, Color::from_rgba(255, 230, 120, 220));
        }
    }
}

fn draw_foe(foe: &Foe, sprites: &Sprites, field: Vec2, scale: Vec2) {
    let center = foe.render_pos().to_screen(field);
    let size = foe.size * scale;
    match foe.state {
        FoeState::Active => {
            let color = if foe.follower().is_some_and(|f| f.is_rushing()) {
                ORANGE
            } else {
                LIME
            };
            draw_sprite(sprites, ROLE_FOE, center, size, color);
        }
        FoeState::Breaking { .. } => {
            draw_sprite(sprites, ROLE_FOE_BROKEN, center, size, Color::from_rgba(200, 200, 200, 120));
        }
    }
}

/// Won or game-over screen.
pub fn draw_finished(kind: GameKind, phase: Phase, score: u32) {
    clear_background(LIGHTGRAY);
    let headline = if phase == Phase::Won {
        "You win!"
    } else {
        "Game over"
    };
    let lines = [
        (headline.to_string(), 48.0),
        (format!("{} - score {score}", kind.title()), 28.0),
        ("Press R to play again or Enter for the menu".to_string(), 22.0),
    ];
    let mut y = screen_height() / 2.0 - 60.0;
    for (text, font_size) in lines {
        let size = measure_text(&text, None, font_size as u16, 1.0);
        draw_text(&text, screen_width() / 2.0 - size.width / 2.0, y, font_size, DARKGRAY);
        y += font_size + 16.0;
    }
}
