#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod config;
mod debug_log;
mod dispatch;
mod gui;
mod initialization;

use anyhow::{anyhow, Result};
use api::{GeminiClient, SpeechQueue};
use config::load_config;
use dispatch::Dispatcher;
use gui::{WINDOW_HEIGHT, WINDOW_WIDTH};
use std::sync::Arc;

const WINDOW_TITLE: &str = "Educational Song Generator";

fn main() {
    if let Err(e) = run() {
        crate::log_error!("Fatal: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    crate::log_info!("========================================");
    crate::log_info!("{} v{} STARTUP", WINDOW_TITLE, env!("CARGO_PKG_VERSION"));
    crate::log_info!("========================================");

    // Set up crash handler
    initialization::setup_crash_handler();

    // Without a key only the error window opens
    let config = load_config();
    let api_key = match config.require_api_key() {
        Ok(key) => key.to_string(),
        Err(e) => {
            let message = format!("{e:#}");
            crate::log_error!("Startup: {}", message);
            if let Err(window_err) = gui::show_startup_error(WINDOW_TITLE, &message) {
                crate::log_error!("Startup: could not show error window: {:#}", window_err);
            }
            return Err(e);
        }
    };

    // Cleanup temp files
    initialization::cleanup_temporary_files();

    // Initialize TTS
    let speech = Arc::new(SpeechQueue::new());
    let _speech_worker = api::tts::init_tts(speech.clone(), &config)?;

    let generator = Arc::new(GeminiClient::new(api_key, config.model.clone()));
    crate::log_info!(
        "Startup: model {}, speech via {:?}, mode {}",
        config.model,
        config.tts_backend,
        config.default_mode.label()
    );
    let dispatcher = Dispatcher::new(generator, speech.clone());

    // Window setup
    let viewport_builder = eframe::egui::ViewportBuilder::default()
        .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
        .with_resizable(false)
        .with_title(WINDOW_TITLE);

    let options = eframe::NativeOptions {
        viewport: viewport_builder,
        ..Default::default()
    };

    let initial_mode = config.default_mode;
    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(eframe::egui::Visuals::light());

            Ok(Box::new(gui::EduSongApp::new(
                dispatcher.with_repaint(cc.egui_ctx.clone()),
                speech,
                initial_mode,
            )))
        }),
    )
    .map_err(|e| anyhow!("Window error: {e}"))
}
