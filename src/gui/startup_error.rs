// --- STARTUP ERROR WINDOW ---
// Shown instead of the main window when the app cannot start, so the reason
// is visible even without a console.

use super::{C_DARK, C_ERROR, C_LIGHT, LABEL_SIZE, OUTPUT_SIZE};
use anyhow::Result;
use eframe::egui;

const ERROR_WINDOW_SIZE: [f32; 2] = [560.0, 240.0];

struct StartupErrorApp {
    message: String,
}

impl eframe::App for StartupErrorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(C_LIGHT).inner_margin(egui::Margin::same(16)))
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("⚠ Cannot start")
                        .size(LABEL_SIZE + 4.0)
                        .color(C_ERROR)
                        .strong(),
                );
                ui.add_space(10.0);
                ui.add(
                    egui::Label::new(
                        egui::RichText::new(&self.message)
                            .size(OUTPUT_SIZE)
                            .color(C_DARK),
                    )
                    .selectable(true)
                    .wrap(),
                );
                ui.add_space(16.0);
                if ui.button("Close").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });
    }
}

/// Block on a small window showing `message` until the user closes it.
pub fn show_startup_error(title: &str, message: &str) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(ERROR_WINDOW_SIZE)
            .with_resizable(false)
            .with_title(title),
        ..Default::default()
    };

    let message = message.to_string();
    eframe::run_native(
        title,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(StartupErrorApp { message }))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Window error: {e}"))
}
