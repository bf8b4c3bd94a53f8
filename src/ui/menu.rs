use egui_macroquad::egui;
use macroquad::prelude::*;
use quiz_arcade::simulation::ruleset::GameKind;

/// What the player picked on the menu.
pub enum MenuAction {
    Play(GameKind),
    /// Load the quiz at this index of the listed files.
    PickQuiz(usize),
    /// List the quiz folder again.
    Rescan,
    Settings,
}

/// Game picker shown at start-up and after every run.
pub fn draw_menu(
    quizzes: &[String],
    selected: Option<usize>,
    question_count: usize,
    status: Option<&str>,
) -> Option<MenuAction> {
    clear_background(LIGHTGRAY);

    let mut action = None;

    egui_macroquad::ui(|egui_ctx| {
        egui::CentralPanel::default().show(egui_ctx, |ui| {
            ui.heading("Quiz Arcade");
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                let current = selected
                    .and_then(|i| quizzes.get(i))
                    .map_or("none", String::as_str);
                egui::ComboBox::from_label("Quiz")
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for (i, name) in quizzes.iter().enumerate() {
                            if ui.selectable_label(selected == Some(i), name).clicked() {
                                action = Some(MenuAction::PickQuiz(i));
                            }
                        }
                    });
                if ui.button("Refresh").clicked() {
                    action = Some(MenuAction::Rescan);
                }
            });

            if quizzes.is_empty() {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 120, 120),
                    "No CSV files found. Point --quiz-dir at a folder of quizzes.",
                );
            } else if question_count == 0 {
                ui.colored_label(
                    egui::Color32::from_rgb(255, 120, 120),
                    "This quiz has no usable questions.",
                );
            } else {
                ui.label(format!("{question_count} questions loaded"));
            }
            ui.add_space(10.0);

            for kind in GameKind::ALL {
                ui.group(|ui| {
                    ui.horizontal(|ui| {
                        let play = ui.add_enabled(
                            question_count > 0,
                            egui::Button::new(kind.title()).min_size(egui::vec2(160.0, 32.0)),
                        );
                        if play.clicked() {
                            action = Some(MenuAction::Play(kind));
                        }
                        ui.label(kind.blurb());
                    });
                });
            }

            ui.add_space(20.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui.button("Settings").clicked() {
                    action = Some(MenuAction::Settings);
                }
                if let Some(status) = status {
                    ui.label(status);
                }
            });

            ui.add_space(10.0);
            ui.label("In game: 1-4 or click to answer, arrows to aim, Esc for the menu");
        });
    });

    egui_macroquad::draw();

    action
}
