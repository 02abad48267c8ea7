use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

lazy_static::lazy_static! {
    static ref LOG_MUTEX: std::sync::Mutex<()> = std::sync::Mutex::new(());
}

/// Location of the session log: `<data_local_dir>/EduSongGenerator/logs/session.log`
pub fn log_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("EduSongGenerator");
    path.push("logs");
    path.push("session.log");
    path
}

pub fn log_debug(level: &str, msg: &str) {
    // A poisoned lock only means another thread panicked mid-write; keep logging.
    let _lock = LOG_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let path = log_path();
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }

    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(file, "[{}] {:<5} {}", timestamp, level, msg);
    }
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        {
            let msg = format!($($arg)*);
            println!("{}", msg);
            $crate::debug_log::log_debug("INFO", &msg);
        }
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        {
            let msg = format!($($arg)*);
            eprintln!("{}", msg);
            $crate::debug_log::log_debug("ERROR", &msg);
        }
    };
}
