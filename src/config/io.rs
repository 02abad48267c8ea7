//! Config I/O operations: load, save, and API key resolution.

use std::path::{Path, PathBuf};

use super::config_struct::Config;
use super::types::{Mode, API_KEY_ENV};

pub fn get_config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_default()
        .join("edu-song-generator");
    let _ = std::fs::create_dir_all(&config_dir);
    config_dir.join("config.json")
}

/// Config exactly as stored on disk, without environment overrides.
fn read_config_file(path: &Path) -> Config {
    if path.exists() {
        let data = std::fs::read_to_string(path).unwrap_or_default();
        serde_json::from_str(&data).unwrap_or_else(|e| {
            crate::log_error!("Config: ignoring malformed {}: {}", path.display(), e);
            Config::default()
        })
    } else {
        Config::default()
    }
}

/// Load the config file and resolve the API key.
///
/// Precedence for the key: process environment, then `.env` in the working
/// directory, then the config file.
pub fn load_config() -> Config {
    let mut config = read_config_file(&get_config_path());

    let dotenv_key = std::fs::read_to_string(".env")
        .ok()
        .and_then(|contents| parse_dotenv_value(&contents, API_KEY_ENV));
    let env_key = std::env::var(API_KEY_ENV).ok();

    if let Some(key) = resolve_api_key(env_key, dotenv_key) {
        config.gemini_api_key = key;
    }
    config
}

fn resolve_api_key(env_key: Option<String>, dotenv_key: Option<String>) -> Option<String> {
    env_key
        .filter(|k| !k.trim().is_empty())
        .or(dotenv_key.filter(|k| !k.trim().is_empty()))
}

/// Minimal `KEY=value` lookup for `.env` files. Supports `export`, comments
/// and single/double quotes around the value.
pub fn parse_dotenv_value(contents: &str, key: &str) -> Option<String> {
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((name, value)) = line.split_once('=') else {
            continue;
        };
        if name.trim() != key {
            continue;
        }
        let value = value.trim();
        let unquoted = value
            .strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(value);
        return Some(unquoted.to_string());
    }
    None
}

pub fn save_config(config: &Config) {
    let path = get_config_path();
    match serde_json::to_string_pretty(config) {
        Ok(data) => {
            if let Err(e) = std::fs::write(&path, data) {
                crate::log_error!("Config: failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => crate::log_error!("Config: failed to serialize: {}", e),
    }
}

/// Persist the last selected mode. Only the on-disk config is touched so a
/// key taken from the environment never lands in the file.
pub fn save_default_mode(mode: Mode) {
    let mut on_disk = read_config_file(&get_config_path());
    if on_disk.default_mode != mode {
        on_disk.default_mode = mode;
        save_config(&on_disk);
    }
}
