use egui_macroquad::egui;
use quiz_arcade::simulation::session::{Phase, Session};

/// Draws the current question with one button per choice.
///
/// Returns the index of the clicked choice, if any.
pub(super) fn draw_question_window(egui_ctx: &egui::Context, session: &Session) -> Option<usize> {
    let round = session.round()?;
    let screen = egui_ctx.screen_rect();
    let accepting = session.accepts_answers();
    let mut picked = None;

    egui::Window::new("Question")
        .title_bar(false)
        .resizable(false)
        .collapsible(false)
        .fixed_pos(egui::pos2(screen.width() / 2.0 - 220.0, screen.height() - 190.0))
        .fixed_size(egui::vec2(440.0, 150.0))
        .frame(
            egui::Frame::window(&egui_ctx.style())
                .fill(egui::Color32::from_rgba_premultiplied(20, 20, 30, 220))
                .stroke(egui::Stroke::new(
                    1.0,
                    egui::Color32::from_rgb(100, 100, 120),
                )),
        )
        .show(egui_ctx, |ui| {
            ui.label(
                egui::RichText::new(&round.question.prompt)
                    .color(egui::Color32::WHITE)
                    .size(16.0)
                    .strong(),
            );
            ui.add_space(6.0);

            egui::Grid::new("choices")
                .num_columns(2)
                .spacing(egui::vec2(8.0, 6.0))
                .show(ui, |ui| {
                    for (i, choice) in session.current_choices().iter().enumerate() {
                        let button = egui::Button::new(format!("{}. {choice}", i + 1))
                            .min_size(egui::vec2(205.0, 28.0));
                        if ui.add_enabled(accepting, button).clicked() {
                            picked = Some(i);
                        }
                        if i % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });

            if session.phase() == Phase::Resolving {
                ui.label(
                    egui::RichText::new("Resolving...")
                        .color(egui::Color32::from_rgb(180, 180, 200))
                        .size(11.0),
                );
            }
        });

    picked
}
