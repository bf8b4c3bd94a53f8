use egui_macroquad::egui;
use quiz_arcade::simulation::event_log::EventColor;
use quiz_arcade::simulation::session::Session;

use super::overlay::draw_question_window;

/// Draws the HUD, the recent-events panel and the question overlay.
///
/// Returns the choice clicked in the overlay, if any.
pub fn draw_play_ui(session: &Session) -> Option<usize> {
    let mut picked = None;

    egui_macroquad::ui(|egui_ctx| {
        draw_status_bar(egui_ctx, session);
        draw_events_panel(egui_ctx, session);
        picked = draw_question_window(egui_ctx, session);
    });

    egui_macroquad::draw();

    picked
}

fn draw_status_bar(egui_ctx: &egui::Context, session: &Session) {
    egui::TopBottomPanel::top("hud")
        .frame(egui::Frame::default().fill(egui::Color32::from_rgba_premultiplied(0, 0, 0, 150)))
        .show(egui_ctx, |ui| {
            ui.horizontal(|ui| {
                let text = |s: String| egui::RichText::new(s).color(egui::Color32::WHITE).size(14.0);

                ui.label(text(format!("Score: {}", session.score())));
                ui.separator();
                ui.label(text(match session.lives() {
                    Some(lives) => format!("Lives: {lives}"),
                    None => "Lives: unlimited".to_string(),
                }));
                if let Some(left) = session.question_time_left() {
                    ui.separator();
                    ui.label(text(format!("Question: {left:.0}s")));
                }
                if let Some(left) = session.session_time_left() {
                    ui.separator();
                    ui.label(text(format!("Time: {left:.0}s")));
                }
            });
        });
}

/// Transparent panel listing recent events, newest first.
fn draw_events_panel(egui_ctx: &egui::Context, session: &Session) {
    let screen = egui_ctx.screen_rect();
    let panel_height = 180.0;

    egui::Window::new("Recent Events")
        .fixed_pos(egui::pos2(screen.width() - 230.0, screen.height() - panel_height - 10.0))
        .fixed_size(egui::vec2(220.0, panel_height))
        .frame(
            egui::Frame::window(&egui_ctx.style())
                .fill(egui::Color32::from_rgba_premultiplied(20, 20, 30, 200))
                .stroke(egui::Stroke::new(
                    1.0,
                    egui::Color32::from_rgb(100, 100, 120),
                )),
        )
        .show(egui_ctx, |ui| {
            ui.spacing_mut().item_spacing.y = 4.0;

            let events = session.event_log().events();
            if events.is_empty() {
                ui.label(
                    egui::RichText::new("No events yet...")
                        .color(egui::Color32::from_rgb(150, 150, 150))
                        .size(12.0),
                );
                return;
            }

            for event in events {
                let color = match event.color {
                    EventColor::Hit => egui::Color32::from_rgb(100, 255, 100),
                    EventColor::Miss => egui::Color32::from_rgb(150, 150, 150),
                    EventColor::Damage => egui::Color32::from_rgb(255, 100, 100),
                    EventColor::Quiz => egui::Color32::from_rgb(100, 200, 255),
                    EventColor::Outcome => egui::Color32::from_rgb(255, 200, 100),
                };

                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("[{:.1}s]", event.time))
                            .color(egui::Color32::from_rgb(180, 180, 200))
                            .size(11.0)
                            .monospace(),
                    );
                    ui.label(egui::RichText::new(&event.description).color(color).size(11.0));
                });
            }
        });
}
