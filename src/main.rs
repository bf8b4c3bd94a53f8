//! Quiz Arcade launcher: game menu, settings screen and the game loop.

use std::path::{Path, PathBuf};

use ::rand::SeedableRng;
use ::rand::rngs::StdRng;
use clap::Parser;
use macroquad::prelude::*;

use quiz_arcade::assets::{AssetManifest, MANIFEST_FILE};
use quiz_arcade::quiz::question::{
    Question, default_question_file, list_question_files, load_questions,
};
use quiz_arcade::settings::{SETTINGS_FILE, Settings};
use quiz_arcade::simulation::params::Params;
use quiz_arcade::simulation::ruleset::{FIELD_HEIGHT, FIELD_WIDTH, GameKind, Ruleset};
use quiz_arcade::simulation::session::{Phase, Session};

mod graphics;
mod ui;

/// Longest frame the simulation will take in one step.
const MAX_FRAME_TIME: f32 = 1.0 / 20.0;

#[derive(Parser, Debug)]
#[command(name = "quiz-arcade")]
#[command(about = "Arcade minigames driven by multiple-choice questions")]
struct Args {
    /// Folder whose `*.csv` files are offered on the menu
    #[arg(short = 'd', long, default_value = ".")]
    quiz_dir: PathBuf,

    /// Question CSV to start with, instead of `questions.csv` in the quiz folder
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Settings file, created on first save
    #[arg(short, long, default_value = SETTINGS_FILE)]
    settings: PathBuf,

    /// Skip the menu and start this game (space, cowboy or tower)
    #[arg(short, long)]
    game: Option<GameKind>,

    /// Folder holding one asset directory per game
    #[arg(short, long, default_value = "assets")]
    assets: PathBuf,

    /// Seed for question order and distractors
    #[arg(long)]
    seed: Option<u64>,
}

/// Question files on offer and the one currently loaded.
struct QuizShelf {
    dir: PathBuf,
    files: Vec<PathBuf>,
    selected: Option<usize>,
    questions: Vec<Question>,
}

impl QuizShelf {
    fn open(dir: PathBuf, preferred: Option<PathBuf>) -> Self {
        let mut shelf = Self {
            dir,
            files: Vec::new(),
            selected: None,
            questions: Vec::new(),
        };
        shelf.rescan();
        if let Some(path) = preferred {
            let index = match shelf.files.iter().position(|f| same_file(f, &path)) {
                Some(index) => index,
                None => {
                    shelf.files.push(path);
                    shelf.files.len() - 1
                }
            };
            shelf.select(index);
        } else if let Some(index) = default_question_file(&shelf.files) {
            shelf.select(index);
        }
        shelf
    }

    /// Re-reads the folder, keeping the current pick when it is still there.
    fn rescan(&mut self) {
        let current = self.selected_path().map(Path::to_path_buf);
        self.files = list_question_files(&self.dir).unwrap_or_else(|e| {
            log::error!("could not list quizzes: {e}");
            Vec::new()
        });
        self.selected = current.and_then(|path| {
            // a file picked from outside the folder stays on offer
            match self.files.iter().position(|f| *f == path) {
                Some(index) => Some(index),
                None if path.is_file() => {
                    self.files.push(path);
                    Some(self.files.len() - 1)
                }
                None => None,
            }
        });
        if self.selected.is_none() {
            self.questions.clear();
        }
    }

    fn select(&mut self, index: usize) {
        let Some(path) = self.files.get(index) else {
            return;
        };
        self.selected = Some(index);
        self.questions = load_questions(path).unwrap_or_else(|e| {
            log::error!("could not load questions: {e}");
            Vec::new()
        });
    }

    fn selected_path(&self) -> Option<&Path> {
        self.selected
            .and_then(|i| self.files.get(i))
            .map(PathBuf::as_path)
    }

    fn names(&self) -> Vec<String> {
        self.files
            .iter()
            .map(|f| {
                f.file_name()
                    .map_or_else(|| f.display().to_string(), |n| n.to_string_lossy().into_owned())
            })
            .collect()
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    a == b
        || std::fs::canonicalize(a)
            .ok()
            .zip(std::fs::canonicalize(b).ok())
            .is_some_and(|(a, b)| a == b)
}

struct Game {
    session: Session,
    sprites: graphics::Sprites,
}

enum Screen {
    Menu,
    Settings,
    Playing(Box<Game>),
    Finished {
        kind: GameKind,
        phase: Phase,
        score: u32,
    },
}

fn window_conf() -> Conf {
    Conf {
        window_title: "Quiz Arcade".to_owned(),
        window_width: FIELD_WIDTH as i32,
        window_height: FIELD_HEIGHT as i32,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    log::debug!("args: {args:?}");

    let mut settings = Settings::load(&args.settings);
    let mut quizzes = QuizShelf::open(args.quiz_dir.clone(), args.questions.clone());
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut ::rand::rng()),
    };
    let mut status: Option<String> = None;

    let mut screen = match args.game {
        Some(kind) => {
            start_game(kind, &quizzes.questions, &settings, &args.assets, &mut rng).await
        }
        None => Screen::Menu,
    };

    loop {
        let mut next: Option<Screen> = None;

        match &mut screen {
            Screen::Menu => match ui::draw_menu(
                &quizzes.names(),
                quizzes.selected,
                quizzes.questions.len(),
                status.as_deref(),
            ) {
                Some(ui::MenuAction::Play(kind)) => {
                    status = None;
                    next = Some(
                        start_game(kind, &quizzes.questions, &settings, &args.assets, &mut rng)
                            .await,
                    );
                }
                Some(ui::MenuAction::PickQuiz(index)) => {
                    status = None;
                    quizzes.select(index);
                }
                Some(ui::MenuAction::Rescan) => quizzes.rescan(),
                Some(ui::MenuAction::Settings) => {
                    status = None;
                    next = Some(Screen::Settings);
                }
                None => {}
            },
            Screen::Settings => match ui::draw_settings(&mut settings) {
                Some(ui::SettingsAction::Save) => {
                    status = Some(match settings.save(&args.settings) {
                        Ok(()) => "Settings saved".to_string(),
                        Err(e) => {
                            log::error!("{e}");
                            format!("Could not save settings: {e}")
                        }
                    });
                    next = Some(Screen::Menu);
                }
                Some(ui::SettingsAction::Back) => next = Some(Screen::Menu),
                None => {}
            },
            Screen::Playing(game) => {
                if is_key_pressed(KeyCode::Escape) {
                    next = Some(Screen::Menu);
                } else {
                    play_frame(game);
                    let session = &game.session;
                    if session.is_over() {
                        next = Some(Screen::Finished {
                            kind: session.ruleset().kind,
                            phase: session.phase(),
                            score: session.score(),
                        });
                    }
                }
            }
            Screen::Finished { kind, phase, score } => {
                graphics::draw_finished(*kind, *phase, *score);
                if is_key_pressed(KeyCode::R) {
                    let kind = *kind;
                    next = Some(
                        start_game(kind, &quizzes.questions, &settings, &args.assets, &mut rng)
                            .await,
                    );
                } else if is_key_pressed(KeyCode::Enter) {
                    next = Some(Screen::Menu);
                }
            }
        }

        if let Some(next) = next {
            screen = next;
        }
        next_frame().await;
    }
}

async fn start_game(
    kind: GameKind,
    questions: &[Question],
    settings: &Settings,
    assets_dir: &Path,
    rng: &mut StdRng,
) -> Screen {
    let manifest_path = assets_dir.join(kind.slug()).join(MANIFEST_FILE);
    let manifest = match AssetManifest::load(&manifest_path) {
        Ok(manifest) => Some(manifest),
        Err(e) => {
            log::warn!("drawing {} with shapes: {e}", kind.title());
            None
        }
    };
    let sprites = graphics::Sprites::load(manifest.as_ref()).await;

    let session = Session::new(
        Ruleset::for_kind(kind),
        questions.to_vec(),
        settings,
        Params::default(),
        StdRng::from_rng(rng),
    );
    Screen::Playing(Box::new(Game { session, sprites }))
}

fn play_frame(game: &mut Game) {
    let dt = get_frame_time().min(MAX_FRAME_TIME);
    let session = &mut game.session;

    let right = is_key_down(KeyCode::Right) || is_key_down(KeyCode::D);
    let left = is_key_down(KeyCode::Left) || is_key_down(KeyCode::A);
    let direction = f32::from(i8::from(right) - i8::from(left));
    if direction.abs() > 0.0 {
        session.move_aim(direction, dt);
    }

    let keys = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3, KeyCode::Key4];
    if let Some(choice) = keys.iter().position(|k| is_key_pressed(*k)) {
        session.answer(choice);
    }

    session.step(dt);
    for event in session.take_events() {
        log::trace!("{event:?}");
    }

    graphics::draw_session(session, &game.sprites);
    if let Some(choice) = ui::draw_play_ui(session) {
        session.answer(choice);
    }
}
