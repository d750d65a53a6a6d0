// Logging
// Per-session log files plus an optional stderr console layer

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing::info;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_PREFIX: &str = "newslens_";
const LOG_SUFFIX: &str = ".log";
const KEEP_SESSION_LOGS: usize = 30;

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub file_logging: bool,
    pub prune_old_logs: bool,
    pub dir: PathBuf,
}

impl LogSettings {
    /// Read `NEWSLENS_DISABLE_FILE_LOG`, `NEWSLENS_DISABLE_LOG_CLEANUP` and `NEWSLENS_LOG_DIR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let flag = |key: &str| matches!(lookup(key).as_deref(), Some("1") | Some("true") | Some("TRUE"));
        let dir = lookup("NEWSLENS_LOG_DIR")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        Self {
            file_logging: !flag("NEWSLENS_DISABLE_FILE_LOG"),
            prune_old_logs: !flag("NEWSLENS_DISABLE_LOG_CLEANUP"),
            dir,
        }
    }
}

fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("newslens").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

fn open_session_log(dir: &Path) -> io::Result<(NonBlocking, PathBuf)> {
    fs::create_dir_all(dir)?;
    let file_name = format!("{}{}{}", LOG_PREFIX, chrono::Local::now().format("%Y%m%d_%H%M%S"), LOG_SUFFIX);
    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(dir, &file_name));
    let _ = LOG_GUARD.set(guard);
    Ok((writer, dir.join(file_name)))
}

/// Install the global subscriber. Console output goes to stderr so stdout stays
/// reserved for the report; it is on in debug builds or when no log file could be opened.
pub fn init_logging(settings: &LogSettings) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let mut session_log = None;
    let file_layer = if settings.file_logging {
        match open_session_log(&settings.dir) {
            Ok((writer, path)) => {
                session_log = Some(path);
                Some(
                    fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_file(true)
                        .with_line_number(true),
                )
            }
            Err(e) => {
                eprintln!("newslens: file logging unavailable in {}: {}", settings.dir.display(), e);
                None
            }
        }
    } else {
        None
    };

    let console_layer = (cfg!(debug_assertions) || file_layer.is_none())
        .then(|| fmt::layer().with_writer(io::stderr).with_ansi(cfg!(debug_assertions)));

    // A subscriber may already be installed (tests, embedding); keep it.
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init();

    match &session_log {
        Some(path) => info!(log_file = %path.display(), version = env!("CARGO_PKG_VERSION"), "logging.initialized"),
        None => info!(version = env!("CARGO_PKG_VERSION"), "logging.console_only"),
    }

    if session_log.is_some() && settings.prune_old_logs {
        let dir = settings.dir.clone();
        std::thread::spawn(move || prune_session_logs(&dir, KEEP_SESSION_LOGS));
    }
}

/// Delete all but the newest `keep` session logs; returns how many were removed.
/// Session file names embed their start time, so name order is age order.
pub fn prune_session_logs(dir: &Path, keep: usize) -> usize {
    let Ok(read_dir) = fs::read_dir(dir) else {
        return 0;
    };
    let mut names: Vec<String> = read_dir
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(LOG_PREFIX) && name.ends_with(LOG_SUFFIX))
        .collect();
    names.sort();

    let excess = names.len().saturating_sub(keep);
    names
        .iter()
        .take(excess)
        .filter(|name| fs::remove_file(dir.join(name)).is_ok())
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> LogSettings {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        LogSettings::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_settings_defaults() {
        let settings = settings_from(&[]);
        assert!(settings.file_logging);
        assert!(settings.prune_old_logs);
    }

    #[test]
    fn test_settings_flags_and_dir() {
        let settings = settings_from(&[
            ("NEWSLENS_DISABLE_FILE_LOG", "true"),
            ("NEWSLENS_DISABLE_LOG_CLEANUP", "1"),
            ("NEWSLENS_LOG_DIR", "/tmp/newslens-logs"),
        ]);
        assert!(!settings.file_logging);
        assert!(!settings.prune_old_logs);
        assert_eq!(settings.dir, PathBuf::from("/tmp/newslens-logs"));

        let blank_dir = settings_from(&[("NEWSLENS_LOG_DIR", "  "), ("NEWSLENS_DISABLE_FILE_LOG", "no")]);
        assert!(blank_dir.file_logging);
        assert_ne!(blank_dir.dir, PathBuf::from("  "));
    }

    #[test]
    fn test_prune_keeps_newest_session_logs() {
        let tmp = tempfile::tempdir().unwrap();
        for ts in ["20260101_000000", "20260102_000000", "20260103_000000"] {
            fs::write(tmp.path().join(format!("newslens_{}.log", ts)), "x").unwrap();
        }
        fs::write(tmp.path().join("other.log"), "x").unwrap();

        assert_eq!(prune_session_logs(tmp.path(), 2), 1);
        assert!(!tmp.path().join("newslens_20260101_000000.log").exists());
        assert!(tmp.path().join("newslens_20260103_000000.log").exists());
        assert!(tmp.path().join("other.log").exists());
        assert_eq!(prune_session_logs(tmp.path(), 2), 0);
    }

    #[test]
    fn test_prune_missing_dir_is_noop() {
        assert_eq!(prune_session_logs(Path::new("/nonexistent/newslens-logs"), 1), 0);
    }
}
