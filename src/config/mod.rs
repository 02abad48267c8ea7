//! Configuration module for edu-song-generator.
//!
//! - `types`: generation modes, TTS backends and defaults
//! - `config_struct`: Config struct definition and the API key check
//! - `io`: config loading, saving, and `.env` / environment key resolution

mod config_struct;
mod io;
mod types;

pub use config_struct::Config;
pub use io::{get_config_path, load_config, save_default_mode};
pub use types::{Mode, TtsBackend};
