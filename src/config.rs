use std::path::PathBuf;
use std::time::Duration;

use crate::cognition::{ConfigError, EngineConfig};

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Directory for the rolling session log; `None` keeps logs on stderr only.
    pub log_dir: Option<PathBuf>,
    pub tick_interval_ms: u64,
    pub sample_file: Option<PathBuf>,
    pub engine: EngineConfig,
}

impl Config {
    pub fn from_env() -> Self {
        let tick_interval_ms = std::env::var("COGSTATE_TICK_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(5000);

        let sample_file = std::env::var("COGSTATE_SAMPLE_FILE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_dir = file_log_dir(
            std::env::var("ENABLE_FILE_LOGS").ok().as_deref(),
            std::env::var("LOG_DIR").ok(),
        );

        Self {
            log_level,
            log_dir,
            tick_interval_ms,
            sample_file,
            engine: EngineConfig::from_env(),
        }
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::TickInterval);
        }
        self.engine.validate()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
            tick_interval_ms: 5000,
            sample_file: None,
            engine: EngineConfig::default(),
        }
    }
}

fn file_log_dir(enabled: Option<&str>, dir: Option<String>) -> Option<PathBuf> {
    if !matches!(enabled, Some("true") | Some("1")) {
        return None;
    }
    let dir = dir
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "./logs".to_string());
    Some(PathBuf::from(dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logs_are_opt_in() {
        assert_eq!(file_log_dir(None, Some("/var/log/cogstate".into())), None);
        assert_eq!(file_log_dir(Some("false"), None), None);
        assert_eq!(file_log_dir(Some("1"), None), Some(PathBuf::from("./logs")));
        assert_eq!(
            file_log_dir(Some("true"), Some("/var/log/cogstate".into())),
            Some(PathBuf::from("/var/log/cogstate"))
        );
    }

    #[test]
    fn zero_tick_interval_is_rejected() {
        let config = Config {
            tick_interval_ms: 0,
            ..Config::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::TickInterval));
    }

    #[test]
    fn default_tick_is_five_seconds() {
        assert_eq!(Config::default().tick_interval(), Duration::from_secs(5));
    }
}
