use egui_macroquad::egui;
use macroquad::prelude::*;
use quiz_arcade::quiz::deck::{QuestionMode, QuestionOrder};
use quiz_arcade::settings::Settings;

/// Button pressed on the settings screen.
pub enum SettingsAction {
    Save,
    Back,
}

const ENEMY_SPEEDS: [f32; 3] = [0.75, 1.0, 1.5];

/// Edits `settings` in place.
pub fn draw_settings(settings: &mut Settings) -> Option<SettingsAction> {
    clear_background(LIGHTGRAY);

    let mut action = None;

    egui_macroquad::ui(|egui_ctx| {
        egui::CentralPanel::default().show(egui_ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Settings");
                ui.add_space(10.0);

                ui.collapsing("Questions", |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Order:");
                        ui.radio_value(&mut settings.question_order, QuestionOrder::Top, "Top");
                        ui.radio_value(
                            &mut settings.question_order,
                            QuestionOrder::Bottom,
                            "Bottom",
                        );
                        ui.radio_value(
                            &mut settings.question_order,
                            QuestionOrder::Random,
                            "Random",
                        );
                    });
                    ui.horizontal(|ui| {
                        ui.label("Mode:");
                        ui.radio_value(&mut settings.question_mode, QuestionMode::Loop, "Loop");
                        ui.radio_value(
                            &mut settings.question_mode,
                            QuestionMode::OneEach,
                            "Each once",
                        );
                    });
                });

                ui.collapsing("Timers and lives", |ui| {
                    optional_value(
                        ui,
                        "Time per question (s)",
                        &mut settings.time_between_questions,
                        10.0,
                        1.0..=600.0,
                    );
                    optional_value(
                        ui,
                        "Session time (s)",
                        &mut settings.total_time,
                        300.0,
                        10.0..=7200.0,
                    );

                    ui.horizontal(|ui| {
                        let mut limited = settings.lives.is_some();
                        ui.checkbox(&mut limited, "Lives");
                        if limited {
                            let lives = settings.lives.get_or_insert(3);
                            ui.add(egui::Slider::new(lives, 1..=10));
                        } else {
                            settings.lives = None;
                            ui.label("unlimited");
                        }
                    });
                });

                ui.collapsing("Gameplay", |ui| {
                    egui::ComboBox::from_label("Enemy speed")
                        .selected_text(format!("{}x", settings.enemy_speed_multiplier))
                        .show_ui(ui, |ui| {
                            for speed in ENEMY_SPEEDS {
                                ui.selectable_value(
                                    &mut settings.enemy_speed_multiplier,
                                    speed,
                                    format!("{speed}x"),
                                );
                            }
                        });
                    ui.checkbox(&mut settings.muzzle_flash, "Muzzle flash");
                });

                ui.collapsing("Sound", |ui| {
                    ui.checkbox(&mut settings.sfx, "Sound effects");
                    ui.checkbox(&mut settings.music, "Music");
                    ui.horizontal(|ui| {
                        ui.label("Music file:");
                        ui.text_edit_singleline(&mut settings.music_choice);
                    });
                });

                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        action = Some(SettingsAction::Save);
                    }
                    if ui.button("Back").clicked() {
                        action = Some(SettingsAction::Back);
                    }
                });
            });
        });
    });

    egui_macroquad::draw();

    action
}

/// Checkbox plus slider for a setting where `None` means unlimited.
fn optional_value(
    ui: &mut egui::Ui,
    label: &str,
    value: &mut Option<f32>,
    default: f32,
    range: std::ops::RangeInclusive<f32>,
) {
    ui.horizontal(|ui| {
        let mut limited = value.is_some();
        ui.checkbox(&mut limited, label);
        if limited {
            let seconds = value.get_or_insert(default);
            ui.add(egui::Slider::new(seconds, range));
        } else {
            *value = None;
            ui.label("unlimited");
        }
    });
}
