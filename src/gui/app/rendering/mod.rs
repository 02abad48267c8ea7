// --- RENDERING MODULE ---
// Main window painting: title, controls, and the output panel.

mod controls;
mod output;

use super::EduSongApp;
use crate::gui::{C_DARK, C_LIGHT, TITLE_SIZE, WINDOW_WIDTH};
use eframe::egui;

impl EduSongApp {
    /// Everything is painted at fixed window coordinates; the panel frame
    /// has no margin so the ui origin is the window origin.
    pub(crate) fn render_main_layout(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(C_LIGHT))
            .show(ctx, |ui| {
                ui.painter().text(
                    egui::pos2(WINDOW_WIDTH / 2.0, 35.0),
                    egui::Align2::CENTER_CENTER,
                    format!("🎓 {} Generator", self.mode.label()),
                    egui::FontId::proportional(TITLE_SIZE),
                    C_DARK,
                );

                self.render_mode_buttons(ui);
                self.render_topic_input(ui);
                self.render_output_panel(ui);
            });
    }
}
