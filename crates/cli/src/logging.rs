use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use tagmark_core::config::ResolvedConfig;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

static LOG_GUARD: Mutex<Option<WorkerGuard>> = Mutex::new(None);

/// Install the global subscriber: stderr at `logging.level` (debug with
/// `verbose`), plus `logging.file` at `logging.file_level` when configured.
pub fn init(cfg: &ResolvedConfig, verbose: bool) {
    let stderr_level = if verbose {
        LevelFilter::DEBUG
    } else {
        parse_level(&cfg.logging.level).unwrap_or(LevelFilter::INFO)
    };

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(env_filter(stderr_level));

    let file_level = cfg.logging.file_level.as_deref().unwrap_or(&cfg.logging.level);
    let file_layer = cfg.logging.file.as_deref().and_then(open_log_file).map(|writer| {
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_file(true)
            .with_line_number(true)
            .with_filter(env_filter(parse_level(file_level).unwrap_or(LevelFilter::DEBUG)))
    });

    // Keep a subscriber installed earlier in the process
    let _ = tracing_subscriber::registry().with(stderr_layer).with(file_layer).try_init();
}

/// Non-blocking writer for the log file; the worker guard lives until exit.
fn open_log_file(path: &Path) -> Option<NonBlocking> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    let file = match File::create(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("warning: cannot open log file {}: {e}", path.display());
            return None;
        }
    };

    let (writer, guard) = tracing_appender::non_blocking(file);
    if let Ok(mut slot) = LOG_GUARD.lock() {
        *slot = Some(guard);
    }
    Some(writer)
}

fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::builder().with_default_directive(level.into()).from_env_lossy()
}

fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.to_lowercase().as_str() {
        "error" => Some(LevelFilter::ERROR),
        "warn" => Some(LevelFilter::WARN),
        "info" => Some(LevelFilter::INFO),
        "debug" => Some(LevelFilter::DEBUG),
        "trace" => Some(LevelFilter::TRACE),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("error"), Some(LevelFilter::ERROR));
        assert_eq!(parse_level("WARN"), Some(LevelFilter::WARN));
        assert_eq!(parse_level("Info"), Some(LevelFilter::INFO));
        assert_eq!(parse_level("debug"), Some(LevelFilter::DEBUG));
        assert_eq!(parse_level("trace"), Some(LevelFilter::TRACE));
        assert_eq!(parse_level("invalid"), None);
        assert_eq!(parse_level(""), None);
    }
}
