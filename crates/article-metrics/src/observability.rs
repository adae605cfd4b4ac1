//! Logging setup: compact stderr output plus an optional JSONL file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Explicit log file path.
const LOG_PATH_ENV: &str = "ARTICLE_METRICS_LOG_PATH";
/// Directory for daily-rotated log files.
const LOG_DIR_ENV: &str = "ARTICLE_METRICS_LOG_DIR";
/// File name prefix inside a log directory.
const LOG_FILE_PREFIX: &str = "article-metrics.jsonl";

/// Where file logs go, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Single log file, never rotated.
    pub log_path: Option<PathBuf>,
    /// Directory of daily-rotated log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Read the environment, falling back to `config_log_dir` for the
    /// directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::from_values(
            std::env::var_os(LOG_PATH_ENV).map(PathBuf::from),
            std::env::var_os(LOG_DIR_ENV).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn from_values(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let non_empty = |p: &PathBuf| !p.as_os_str().is_empty();
        Self {
            log_path: env_path.filter(non_empty),
            log_dir: env_dir.filter(non_empty).or(config_dir),
        }
    }

    fn file_target(&self) -> Option<(PathBuf, FileMode)> {
        if let Some(path) = &self.log_path {
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            let name: PathBuf = path.file_name()?.into();
            return Some((dir, FileMode::Single(name)));
        }
        self.log_dir.clone().map(|dir| (dir, FileMode::Daily))
    }
}

enum FileMode {
    Single(PathBuf),
    Daily,
}

/// Build the event filter.
///
/// `-q` wins over `-v`; `-v` is debug and `-vv` or more is trace. Without
/// either flag `RUST_LOG` applies, then `default_level`.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if quiet {
        return EnvFilter::new("error");
    }
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop; keep it alive until
/// the program exits.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match config.file_target() {
        Some((dir, mode)) => {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            let appender = match mode {
                FileMode::Single(name) => tracing_appender::rolling::never(&dir, name),
                FileMode::Daily => tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_beats_verbose() {
        assert_eq!(env_filter(true, 2, "info").to_string(), "error");
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(env_filter(false, 1, "info").to_string(), "debug");
        assert_eq!(env_filter(false, 3, "info").to_string(), "trace");
    }

    #[test]
    fn env_dir_overrides_config_dir() {
        let cfg = ObservabilityConfig::from_values(
            None,
            Some(PathBuf::from("/env/logs")),
            Some(PathBuf::from("/config/logs")),
        );
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/env/logs")));
    }

    #[test]
    fn empty_env_values_ignored() {
        let cfg = ObservabilityConfig::from_values(
            Some(PathBuf::new()),
            Some(PathBuf::new()),
            Some(PathBuf::from("/config/logs")),
        );
        assert_eq!(cfg.log_path, None);
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/config/logs")));
    }

    #[test]
    fn explicit_path_wins_over_dir() {
        let cfg = ObservabilityConfig::from_values(
            Some(PathBuf::from("run.jsonl")),
            Some(PathBuf::from("/env/logs")),
            None,
        );
        let (dir, mode) = cfg.file_target().unwrap();
        assert_eq!(dir, PathBuf::from("."));
        assert!(matches!(mode, FileMode::Single(name) if name == Path::new("run.jsonl")));
    }

    #[test]
    fn no_file_target_by_default() {
        assert!(ObservabilityConfig::default().file_target().is_none());
    }
}
