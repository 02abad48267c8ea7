// --- CONTROLS RENDERING ---
// Mode buttons and the topic input box.

use super::super::EduSongApp;
use crate::config::{save_default_mode, Mode};
use crate::gui::{
    BUTTON_GAP, BUTTON_SIZE, BUTTON_Y, C_BLUE, C_BLUE_HOVER, C_DARK, C_GRAY, C_WHITE, INPUT_RECT,
    INPUT_SIZE, LABEL_POS, LABEL_SIZE, TEXT_PADDING, WINDOW_WIDTH,
};
use eframe::egui;

const TOPIC_HINT: &str = "Enter a topic (e.g. Gravity, Photosynthesis):";

impl EduSongApp {
    pub(super) fn render_mode_buttons(&mut self, ui: &mut egui::Ui) {
        let painter = ui.painter().clone();
        let row_width = BUTTON_SIZE.x * Mode::ALL.len() as f32 + BUTTON_GAP;
        let left = (WINDOW_WIDTH - row_width) / 2.0;

        for (i, mode) in Mode::ALL.into_iter().enumerate() {
            let min = egui::pos2(left + i as f32 * (BUTTON_SIZE.x + BUTTON_GAP), BUTTON_Y);
            let rect = egui::Rect::from_min_size(min, BUTTON_SIZE);
            let response = ui.interact(rect, ui.id().with(("mode_button", i)), egui::Sense::click());

            let fill = if self.mode == mode {
                C_DARK
            } else if response.hovered() {
                C_BLUE_HOVER
            } else {
                C_BLUE
            };
            painter.rect_filled(rect, 8.0, fill);
            painter.text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                mode.label(),
                egui::FontId::proportional(LABEL_SIZE),
                C_WHITE,
            );

            if response.clicked() && self.select_mode(mode) {
                save_default_mode(mode);
            }
        }
    }

    pub(super) fn render_topic_input(&mut self, ui: &mut egui::Ui) {
        let painter = ui.painter().clone();
        painter.text(
            LABEL_POS,
            egui::Align2::LEFT_TOP,
            TOPIC_HINT,
            egui::FontId::proportional(LABEL_SIZE),
            C_DARK,
        );

        let response = ui.interact(INPUT_RECT, ui.id().with("topic_input"), egui::Sense::click());
        let now = ui.input(|i| i.time);
        if response.clicked() {
            self.topic.focus(now);
        } else if response.clicked_elsewhere() {
            self.topic.blur();
        }

        let border = if self.topic.focused { C_BLUE } else { C_GRAY };
        painter.rect_filled(INPUT_RECT, 8.0, border);
        painter.rect_filled(INPUT_RECT.shrink(2.0), 6.0, C_WHITE);

        let clipped = painter.with_clip_rect(INPUT_RECT.shrink(4.0));
        let anchor = egui::pos2(INPUT_RECT.left() + TEXT_PADDING, INPUT_RECT.center().y);
        let text_rect = clipped.text(
            anchor,
            egui::Align2::LEFT_CENTER,
            &self.topic.text,
            egui::FontId::proportional(INPUT_SIZE),
            C_DARK,
        );

        if self.topic.caret_visible(now) {
            let x = text_rect.right() + 1.0;
            let half = INPUT_SIZE * 0.6;
            clipped.line_segment(
                [egui::pos2(x, anchor.y - half), egui::pos2(x, anchor.y + half)],
                egui::Stroke::new(2.0, C_DARK),
            );
        }
    }
}
