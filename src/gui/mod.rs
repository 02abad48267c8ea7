// --- GUI MODULE ---
// Single-window song generator: mode buttons, topic input, output panel.

pub mod app;
pub mod state;
mod startup_error;
pub mod wrap;

pub use app::EduSongApp;
pub use startup_error::show_startup_error;

use eframe::egui::{Color32, Pos2, Rect, Vec2};

// --- WINDOW ---
pub const WINDOW_WIDTH: f32 = 720.0;
pub const WINDOW_HEIGHT: f32 = 540.0;
pub const TARGET_FPS: f32 = 60.0;

// --- PALETTE ---
pub const C_WHITE: Color32 = Color32::from_rgb(250, 250, 250);
pub const C_LIGHT: Color32 = Color32::from_rgb(240, 240, 240);
pub const C_DARK: Color32 = Color32::from_rgb(40, 40, 40);
pub const C_GRAY: Color32 = Color32::from_rgb(200, 200, 200);
pub const C_BLUE: Color32 = Color32::from_rgb(100, 149, 237);
pub const C_BLUE_HOVER: Color32 = Color32::from_rgb(70, 110, 200);
pub const C_ERROR: Color32 = Color32::from_rgb(190, 50, 50);

// --- TYPOGRAPHY ---
pub const TITLE_SIZE: f32 = 30.0;
pub const LABEL_SIZE: f32 = 18.0;
pub const INPUT_SIZE: f32 = 20.0;
pub const OUTPUT_SIZE: f32 = 16.0;

// --- LAYOUT (window coordinates) ---
pub const BUTTON_SIZE: Vec2 = Vec2::new(200.0, 40.0);
pub const BUTTON_GAP: f32 = 10.0;
pub const BUTTON_Y: f32 = 70.0;
pub const LABEL_POS: Pos2 = Pos2::new(60.0, 122.0);
pub const INPUT_RECT: Rect = Rect::from_min_max(Pos2::new(60.0, 148.0), Pos2::new(660.0, 193.0));
pub const OUTPUT_RECT: Rect = Rect::from_min_max(Pos2::new(60.0, 205.0), Pos2::new(660.0, 500.0));
/// Visible text area inside the output panel; scrolling is clamped against it
pub const VIEWPORT_HEIGHT: f32 = 280.0;
pub const TEXT_PADDING: f32 = 10.0;
pub const LINE_HEIGHT: f32 = 26.0;

// --- BEHAVIOUR ---
pub const SCROLL_STEP: f32 = 30.0;
pub const CARET_BLINK_SECS: f64 = 0.5;
pub const SPINNER_STEP: f32 = 0.1;
pub const SPINNER_RADIUS: f32 = 30.0;
pub const SPINNER_DOT_RADIUS: f32 = 6.0;
