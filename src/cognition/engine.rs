use crate::cognition::adaptation::AdaptationDispatcher;
use crate::cognition::config::EngineConfig;
use crate::cognition::history::HistoryTracker;
use crate::cognition::modeling::{CognitiveScorer, FeatureScores};
use crate::cognition::policy::RecommendationPolicy;
use crate::cognition::sanitize::sanitize_sample;
use crate::cognition::types::*;

/// Per-session inference engine. Sample arrivals and timer ticks both go
/// through `recompute`; only sample arrivals extend the load history.
pub struct CognitiveEngine {
    config: EngineConfig,
    scorer: CognitiveScorer,
    tracker: HistoryTracker,
    policy: RecommendationPolicy,
    dispatcher: AdaptationDispatcher,
    last_sample: Option<BiometricSample>,
    last_features: Option<FeatureScores>,
    last_timestamp: Option<i64>,
    samples_seen: u64,
}

impl CognitiveEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            scorer: CognitiveScorer::new(&config),
            tracker: HistoryTracker::new(
                config.history_capacity,
                config.trend_window,
                config.average_window,
            ),
            policy: RecommendationPolicy::new(config.thresholds.clone()),
            dispatcher: AdaptationDispatcher::new(
                config.thresholds.clone(),
                config.adaptation.clone(),
            ),
            config,
            last_sample: None,
            last_features: None,
            last_timestamp: None,
            samples_seen: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn analyze(&mut self, sample: BiometricSample) -> CognitiveState {
        let (sample, discarded) = sanitize_sample(sample);
        if discarded > 0 {
            tracing::warn!(discarded, timestamp = sample.timestamp, "discarded invalid sensor values");
        }

        let timestamp = match self.last_timestamp {
            Some(last) if sample.timestamp < last => {
                tracing::warn!(
                    sample_ts = sample.timestamp,
                    last_ts = last,
                    "out-of-order sample, keeping last timestamp"
                );
                last
            }
            _ => sample.timestamp,
        };

        let state = self.recompute(&sample, timestamp);
        self.tracker.record_state(state.clone());
        self.last_timestamp = Some(timestamp);
        self.last_sample = Some(sample);
        self.samples_seen += 1;

        state
    }

    /// Timer trigger: re-scores the last sample at `now` and refreshes metrics.
    /// The tick stamp becomes the floor for later samples.
    pub fn tick(&mut self, now: i64) -> CognitiveLoadMetrics {
        if let Some(sample) = self.last_sample.take() {
            let timestamp = self.last_timestamp.map_or(now, |last| now.max(last));
            let state = self.recompute(&sample, timestamp);
            self.tracker.replace_state(state);
            self.last_timestamp = Some(timestamp);
            self.last_sample = Some(sample);
        }
        self.metrics()
    }

    fn recompute(&mut self, sample: &BiometricSample, timestamp: i64) -> CognitiveState {
        let (state, features) = self.scorer.score_detailed(sample, timestamp);
        self.last_features = Some(features);
        state
    }

    pub fn metrics(&self) -> CognitiveLoadMetrics {
        let state = self.tracker.state();
        let summary = self.tracker.summarize(state);
        self.policy.metrics(summary, state)
    }

    pub fn adapt(&self, base: TutorResponse) -> AdaptedResponse {
        self.dispatcher.adapt(base, self.tracker.state())
    }

    pub fn suggestions(&self) -> Vec<Suggestion> {
        self.policy.suggestions(self.tracker.state())
    }

    pub fn is_optimal_learning_state(&self) -> bool {
        self.policy.is_optimal_learning_state(self.tracker.state())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.tracker.state().clone(),
            metrics: self.metrics(),
            suggestions: self.suggestions(),
            optimal: self.is_optimal_learning_state(),
            history_len: self.tracker.len(),
            samples_seen: self.samples_seen,
        }
    }

    pub fn reset(&mut self) {
        let timestamp = self.last_timestamp.unwrap_or(0);
        self.tracker.reset(timestamp);
        self.last_sample = None;
        self.last_features = None;
        tracing::info!(samples_seen = self.samples_seen, "cognitive session reset");
        self.samples_seen = 0;
    }

    pub fn state(&self) -> &CognitiveState {
        self.tracker.state()
    }

    pub fn history(&self) -> &HistoryTracker {
        &self.tracker
    }

    pub fn last_features(&self) -> Option<&FeatureScores> {
        self.last_features.as_ref()
    }

    pub fn samples_seen(&self) -> u64 {
        self.samples_seen
    }
}

impl Default for CognitiveEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
