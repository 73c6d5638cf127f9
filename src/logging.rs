use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SESSION_LOG_PREFIX: &str = "cogstate-session.log";

/// Keeps the background file writer alive; drop it only at shutdown.
pub struct SessionLogGuard {
    _guard: WorkerGuard,
}

/// Installs the global subscriber. Console output goes to stderr because
/// stdout carries the snapshot stream. With `log_dir` set, a daily-rotating
/// file copy is written there as well.
pub fn init_tracing(log_level: &str, log_dir: Option<&Path>) -> Option<SessionLogGuard> {
    let env_filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(true);

    let file_writer = log_dir.and_then(|dir| match std::fs::create_dir_all(dir) {
        Ok(()) => Some(tracing_appender::non_blocking(RollingFileAppender::new(
            Rotation::DAILY,
            dir,
            SESSION_LOG_PREFIX,
        ))),
        Err(err) => {
            eprintln!("failed to create log directory {}: {err}", dir.display());
            None
        }
    });

    match file_writer {
        Some((writer, guard)) => {
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true);
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            if let Some(dir) = log_dir {
                tracing::debug!(dir = %dir.display(), "session file logging enabled");
            }
            Some(SessionLogGuard { _guard: guard })
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}
