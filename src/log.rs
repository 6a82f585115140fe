//! File logging for mealprep.
//!
//! Everything goes to `~/.mealprep/mealprep.log`, never to stdout, so the
//! kitchen transcript on the console stays exactly as announced.
//!
//! INFO is the default threshold. `--debug` or `MEALPREP_DEBUG=1` lowers it
//! to DEBUG; `set_level` can go further down to TRACE.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::OnceLock;

const DEBUG_ENV: &str = "MEALPREP_DEBUG";

static LOG_FILE: OnceLock<PathBuf> = OnceLock::new();
static THRESHOLD: AtomicU8 = AtomicU8::new(LogLevel::Info as u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

fn env_debug() -> bool {
    std::env::var(DEBUG_ENV)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Point the logger at `~/.mealprep/mealprep.log` and pick the threshold.
///
/// The file is truncated so each run starts with a fresh log. Failing to
/// create it silently disables logging.
pub fn init_with_debug(debug: bool) {
    let level = if debug || env_debug() {
        LogLevel::Debug
    } else {
        LogLevel::Info
    };
    set_level(level);

    if let Some(dir) = dirs::home_dir().map(|h| h.join(".mealprep")) {
        let _ = std::fs::create_dir_all(&dir);
        let path = dir.join("mealprep.log");
        let _ = std::fs::write(&path, "");
        LOG_FILE.set(path).ok();
    }
}

pub fn is_debug() -> bool {
    level() >= LogLevel::Debug
}

pub fn set_level(level: LogLevel) {
    THRESHOLD.store(level as u8, Ordering::SeqCst);
}

pub fn level() -> LogLevel {
    LogLevel::from_u8(THRESHOLD.load(Ordering::Relaxed))
}

fn format_line(stamp: &str, level: LogLevel, msg: &str) -> String {
    format!("[{}] [{}] {}", stamp, level.as_str(), msg)
}

pub fn log_at(level: LogLevel, msg: &str) {
    if level > self::level() {
        return;
    }
    let Some(path) = LOG_FILE.get() else {
        return;
    };
    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) {
        let stamp = chrono::Local::now().format("%H:%M:%S%.3f").to_string();
        let _ = writeln!(file, "{}", format_line(&stamp, level, msg));
    }
}

#[macro_export]
macro_rules! mlog {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! mlog_error {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Error, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! mlog_warn {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Warn, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! mlog_debug {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Debug, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! mlog_trace {
    ($($arg:tt)*) => {
        $crate::log::log_at($crate::log::LogLevel::Trace, &format!($($arg)*))
    };
}
