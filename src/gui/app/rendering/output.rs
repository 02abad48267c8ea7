// --- OUTPUT PANEL RENDERING ---
// Spinner while loading, otherwise the wrapped verse (or error) with scrolling.

use super::super::EduSongApp;
use crate::gui::state::Spinner;
use crate::gui::wrap::{layout_rows, wrap_text};
use crate::gui::{
    C_BLUE, C_DARK, C_ERROR, C_WHITE, LINE_HEIGHT, OUTPUT_RECT, OUTPUT_SIZE, SPINNER_DOT_RADIUS,
    SPINNER_RADIUS, TEXT_PADDING, VIEWPORT_HEIGHT,
};
use eframe::egui;

impl EduSongApp {
    pub(super) fn render_output_panel(&mut self, ui: &mut egui::Ui) {
        let painter = ui.painter().clone();
        painter.rect_filled(OUTPUT_RECT, 12.0, C_WHITE);

        let text_area = egui::Rect::from_min_size(
            OUTPUT_RECT.min + egui::vec2(TEXT_PADDING, TEXT_PADDING),
            egui::vec2(OUTPUT_RECT.width() - 2.0 * TEXT_PADDING, VIEWPORT_HEIGHT),
        );

        if self.verse.loading {
            paint_spinner(&painter, text_area.center(), &self.spinner);
            return;
        }

        let font = egui::FontId::proportional(OUTPUT_SIZE);
        let measure = |s: &str| {
            painter
                .layout_no_wrap(s.to_owned(), font.clone(), C_DARK)
                .size()
                .x
        };

        let (rows, color) = match &self.verse.error {
            Some(error) => (wrap_text(error, measure, text_area.width()), C_ERROR),
            None => (layout_rows(&self.verse.lines, measure, text_area.width()), C_DARK),
        };
        self.scroll
            .set_content_height(rows.len() as f32 * LINE_HEIGHT);

        let clipped = painter.with_clip_rect(text_area);
        for (i, row) in rows.iter().enumerate() {
            let y = text_area.top() + self.scroll.offset() + i as f32 * LINE_HEIGHT;
            if y + LINE_HEIGHT < text_area.top() || y > text_area.bottom() {
                continue;
            }
            clipped.text(
                egui::pos2(text_area.left(), y),
                egui::Align2::LEFT_TOP,
                row,
                font.clone(),
                color,
            );
        }
    }
}

fn paint_spinner(painter: &egui::Painter, center: egui::Pos2, spinner: &Spinner) {
    for (angle, alpha) in spinner.dots() {
        let pos = center + egui::vec2(angle.cos(), angle.sin()) * SPINNER_RADIUS;
        let color = egui::Color32::from_rgba_unmultiplied(C_BLUE.r(), C_BLUE.g(), C_BLUE.b(), alpha);
        painter.circle_filled(pos, SPINNER_DOT_RADIUS, color);
    }
}
