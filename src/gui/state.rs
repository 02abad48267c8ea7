//! Per-frame UI state that does not depend on egui: topic input, scroll
//! offset, caret blink and spinner.

use super::{CARET_BLINK_SECS, SCROLL_STEP, SPINNER_STEP};

// --- TOPIC INPUT ---

#[derive(Debug, Default)]
pub struct TopicInput {
    pub text: String,
    pub focused: bool,
    /// Time focus was gained, so the caret starts visible
    pub focused_at: f64,
}

impl TopicInput {
    pub fn focus(&mut self, now: f64) {
        if !self.focused {
            self.focused = true;
            self.focused_at = now;
        }
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    pub fn insert(&mut self, typed: &str) {
        self.text.extend(typed.chars().filter(|c| !c.is_control()));
    }

    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Return the topic and clear the box.
    pub fn take(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    pub fn caret_visible(&self, now: f64) -> bool {
        self.focused && caret_phase_visible(now - self.focused_at)
    }
}

/// Caret toggles every `CARET_BLINK_SECS` of wall-clock time, whatever the frame rate.
pub fn caret_phase_visible(elapsed_secs: f64) -> bool {
    let phase = (elapsed_secs.max(0.0) / CARET_BLINK_SECS).floor() as u64;
    phase % 2 == 0
}

// --- SCROLL ---

/// Vertical offset of the output text. Always in `[min_offset(), 0]`;
/// negative values move content up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    offset: f32,
    content_height: f32,
    viewport_height: f32,
}

impl ScrollState {
    pub fn new(viewport_height: f32) -> Self {
        Self {
            offset: 0.0,
            content_height: 0.0,
            viewport_height,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn min_offset(&self) -> f32 {
        (self.viewport_height - self.content_height).min(0.0)
    }

    pub fn set_content_height(&mut self, height: f32) {
        self.content_height = height.max(0.0);
        self.clamp();
    }

    pub fn scroll_by(&mut self, delta: f32) {
        if delta.is_finite() {
            self.offset += delta;
        }
        self.clamp();
    }

    /// Arrow up: reveal earlier lines
    pub fn step_up(&mut self) {
        self.scroll_by(SCROLL_STEP);
    }

    pub fn step_down(&mut self) {
        self.scroll_by(-SCROLL_STEP);
    }

    /// Mouse wheel; positive notches scroll towards the top
    pub fn wheel(&mut self, notches: f32) {
        self.scroll_by(notches * SCROLL_STEP);
    }

    pub fn reset(&mut self) {
        self.offset = 0.0;
    }

    fn clamp(&mut self) {
        self.offset = self.offset.clamp(self.min_offset(), 0.0);
    }
}

// --- SPINNER ---

/// Loading spinner; the angle advances a fixed step per frame.
#[derive(Debug, Default, Clone, Copy)]
pub struct Spinner {
    pub angle: f32,
}

impl Spinner {
    pub const DOTS: usize = 8;

    pub fn advance(&mut self) {
        self.angle = (self.angle + SPINNER_STEP) % std::f32::consts::TAU;
    }

    /// (angle, alpha) for each dot, leading dot fully opaque.
    pub fn dots(&self) -> [(f32, u8); Self::DOTS] {
        let fade_step = 255 / Self::DOTS;
        let mut dots = [(0.0, 0); Self::DOTS];
        for (i, dot) in dots.iter_mut().enumerate() {
            *dot = (
                self.angle - std::f32::consts::TAU / Self::DOTS as f32 * i as f32,
                (255 - fade_step * i) as u8,
            );
        }
        dots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_clamped_for_any_sequence() {
        let mut scroll = ScrollState::new(280.0);
        scroll.set_content_height(26.0 * 30.0);
        let moves: [f32; 12] = [-30.0, -500.0, 90.0, 1e6, -1e6, 3.0, -2.5, 30.0, -30.0, f32::NAN, 0.0, -45.0];
        for delta in moves {
            scroll.scroll_by(delta);
            assert!(scroll.offset() <= 0.0);
            assert!(scroll.offset() >= scroll.min_offset());
        }
        for _ in 0..100 {
            scroll.step_down();
        }
        assert_eq!(scroll.offset(), 280.0 - 780.0);
        for _ in 0..100 {
            scroll.wheel(1.0);
        }
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn test_short_content_cannot_scroll() {
        let mut scroll = ScrollState::new(280.0);
        scroll.set_content_height(100.0);
        scroll.step_down();
        scroll.wheel(-3.0);
        assert_eq!(scroll.offset(), 0.0);
        assert_eq!(scroll.min_offset(), 0.0);
    }

    #[test]
    fn test_shrinking_content_reclamps() {
        let mut scroll = ScrollState::new(280.0);
        scroll.set_content_height(1000.0);
        scroll.scroll_by(-600.0);
        assert_eq!(scroll.offset(), -600.0);
        scroll.set_content_height(400.0);
        assert_eq!(scroll.offset(), -120.0);
    }

    #[test]
    fn test_arrow_steps_are_thirty_pixels() {
        let mut scroll = ScrollState::new(280.0);
        scroll.set_content_height(1000.0);
        scroll.step_down();
        assert_eq!(scroll.offset(), -30.0);
        scroll.step_up();
        assert_eq!(scroll.offset(), 0.0);
    }

    #[test]
    fn test_caret_toggles_on_wall_clock() {
        assert!(caret_phase_visible(0.0));
        assert!(caret_phase_visible(0.49));
        assert!(!caret_phase_visible(0.5));
        assert!(!caret_phase_visible(0.99));
        assert!(caret_phase_visible(1.0));
    }

    #[test]
    fn test_caret_hidden_without_focus() {
        let mut input = TopicInput::default();
        assert!(!input.caret_visible(10.0));
        input.focus(10.0);
        assert!(input.caret_visible(10.1));
        assert!(!input.caret_visible(10.6));
    }

    #[test]
    fn test_topic_editing() {
        let mut input = TopicInput::default();
        input.insert("Grav");
        input.insert("ity\u{8}\n");
        assert_eq!(input.text, "Gravity");
        input.backspace();
        assert_eq!(input.text, "Gravit");
        assert!(!input.is_blank());
        assert_eq!(input.take(), "Gravit");
        assert!(input.is_blank());
        input.backspace();
        assert_eq!(input.text, "");
    }

    #[test]
    fn test_spinner_advances_fixed_step() {
        let mut spinner = Spinner::default();
        spinner.advance();
        spinner.advance();
        assert!((spinner.angle - 0.2).abs() < 1e-6);
        let dots = spinner.dots();
        assert_eq!(dots[0].1, 255);
        assert!(dots.windows(2).all(|w| w[0].1 > w[1].1));
    }
}
