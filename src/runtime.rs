//! Event loop for one learning session.
//!
//! Two triggers feed the engine: JSON-lines biometric samples from an async
//! reader, and a fixed-interval timer. Every trigger emits one snapshot line
//! on the writer. Ticks are stamped on the sample clock, not wall time.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::{Instant, MissedTickBehavior};

use crate::cognition::{BiometricSample, CognitiveEngine, Recommendation, SessionSnapshot};

#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    #[error("stream I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Sample,
    Tick,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutputLine<'a> {
    trigger: Trigger,
    snapshot: &'a SessionSnapshot,
}

#[derive(Debug, Clone)]
pub struct DriveSummary {
    pub samples: u64,
    pub ticks: u64,
    pub skipped_lines: u64,
    pub final_snapshot: SessionSnapshot,
}

pub type SampleSource = Box<dyn AsyncBufRead + Unpin + Send>;

/// Session time in sample milliseconds: the last stamped sample plus the
/// time elapsed since it arrived.
#[derive(Debug, Clone, Copy)]
struct SampleClock {
    base: i64,
    marked_at: Instant,
}

impl SampleClock {
    fn new(base: i64) -> Self {
        Self {
            base,
            marked_at: Instant::now(),
        }
    }

    fn mark(&mut self, timestamp: i64) {
        self.base = timestamp;
        self.marked_at = Instant::now();
    }

    fn now(&self) -> i64 {
        let elapsed = i64::try_from(self.marked_at.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.base.saturating_add(elapsed)
    }
}

/// Opens the sample file when given, stdin otherwise.
pub async fn open_source(path: Option<&Path>) -> Result<SampleSource, StreamError> {
    match path {
        Some(path) => {
            let file = tokio::fs::File::open(path).await?;
            tracing::info!(path = %path.display(), "reading samples from file");
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            tracing::info!("reading samples from stdin");
            Ok(Box::new(BufReader::new(tokio::io::stdin())))
        }
    }
}

pub async fn drive<R, W, S>(
    reader: R,
    writer: &mut W,
    engine: &mut CognitiveEngine,
    tick: Duration,
    shutdown: S,
) -> Result<DriveSummary, StreamError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    let mut lines = reader.lines();
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    interval.tick().await;
    tokio::pin!(shutdown);

    let mut samples = 0u64;
    let mut ticks = 0u64;
    let mut skipped_lines = 0u64;
    let mut last_recommendation = Recommendation::Continue;
    let mut clock = SampleClock::new(engine.state().timestamp);

    loop {
        let trigger = tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    tracing::info!(samples, "sample stream ended");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match serde_json::from_str::<BiometricSample>(&line) {
                    Ok(sample) => {
                        let state = engine.analyze(sample);
                        clock.mark(state.timestamp);
                        samples += 1;
                        Trigger::Sample
                    }
                    Err(err) => {
                        skipped_lines += 1;
                        tracing::warn!(error = %err, "skipping undecodable sample line");
                        continue;
                    }
                }
            }
            _ = interval.tick() => {
                engine.tick(clock.now());
                ticks += 1;
                Trigger::Tick
            }
            _ = &mut shutdown => {
                tracing::info!("shutdown requested, stopping session");
                break;
            }
        };

        let snapshot = engine.snapshot();
        if snapshot.metrics.recommendation != last_recommendation {
            tracing::info!(
                from = last_recommendation.as_str(),
                to = snapshot.metrics.recommendation.as_str(),
                load = snapshot.metrics.current_load,
                trend = snapshot.metrics.trend.as_str(),
                "recommendation changed"
            );
            last_recommendation = snapshot.metrics.recommendation;
        }
        emit(writer, trigger, &snapshot).await?;
    }

    writer.flush().await?;

    Ok(DriveSummary {
        samples,
        ticks,
        skipped_lines,
        final_snapshot: engine.snapshot(),
    })
}

async fn emit<W>(writer: &mut W, trigger: Trigger, snapshot: &SessionSnapshot) -> Result<(), StreamError>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_vec(&OutputLine { trigger, snapshot })?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}
