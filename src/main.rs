use cogstate_engine::cognition::CognitiveEngine;
use cogstate_engine::config::Config;
use cogstate_engine::logging::init_tracing;
use cogstate_engine::runtime;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = init_tracing(&config.log_level, config.log_dir.as_deref());

    if let Err(err) = config.validate() {
        tracing::error!(error = %err, "invalid configuration");
        std::process::exit(2);
    }

    let source = match runtime::open_source(config.sample_file.as_deref()).await {
        Ok(source) => source,
        Err(err) => {
            tracing::error!(error = %err, "failed to open sample source");
            std::process::exit(1);
        }
    };

    let mut engine = CognitiveEngine::new(config.engine.clone());
    let mut stdout = tokio::io::stdout();

    tracing::info!(tick_ms = config.tick_interval_ms, "cognitive session started");

    match runtime::drive(
        source,
        &mut stdout,
        &mut engine,
        config.tick_interval(),
        shutdown_signal(),
    )
    .await
    {
        Ok(summary) => {
            tracing::info!(
                samples = summary.samples,
                ticks = summary.ticks,
                skipped = summary.skipped_lines,
                final_recommendation = summary.final_snapshot.metrics.recommendation.as_str(),
                "cognitive session finished"
            );
        }
        Err(err) => {
            tracing::error!(error = %err, "session stream failed");
            std::process::exit(1);
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
