use crate::cognition::config::{EngineConfig, ReadinessWeights};
use crate::cognition::modeling::emotion::infer_emotion;
use crate::cognition::modeling::normalizer::{FeatureNormalizer, FeatureScores};
use crate::cognition::types::{BiometricSample, CognitiveState, EmotionalState};

const OPTIMAL_ENGAGEMENT_LOAD: f64 = 0.6;
const OPTIMAL_COMPREHENSION_LOAD: f64 = 0.5;
const ENGAGEMENT_LOAD_WEIGHT: f64 = 0.4;
const ENGAGEMENT_ATTENTION_WEIGHT: f64 = 0.6;
const COMPREHENSION_FOCUS_WEIGHT: f64 = 0.6;
const FATIGUE_BLINK_CEILING: f64 = 30.0;
const DEFAULT_FATIGUE: f64 = 0.3;

/// Derives the full six-score state from one sample. Pure: identical
/// samples always produce identical states.
pub struct CognitiveScorer {
    normalizer: FeatureNormalizer,
    readiness: ReadinessWeights,
    eeg_weight: f64,
    min_expression_confidence: f64,
}

impl CognitiveScorer {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            normalizer: FeatureNormalizer::new(config.normalizer.clone()),
            readiness: config.readiness.clone(),
            eeg_weight: config.normalizer.eeg_weight,
            min_expression_confidence: config.min_expression_confidence,
        }
    }

    pub fn score(&self, sample: &BiometricSample, timestamp: i64) -> CognitiveState {
        self.score_detailed(sample, timestamp).0
    }

    pub fn score_detailed(
        &self,
        sample: &BiometricSample,
        timestamp: i64,
    ) -> (CognitiveState, FeatureScores) {
        let features = self.normalizer.normalize(sample);

        let focus = features.attention;
        let cognitive_load = match features.eeg_activity {
            Some(activity) => features.effort * (1.0 - self.eeg_weight) + activity * self.eeg_weight,
            None => features.effort,
        }
        .clamp(0.0, 1.0);

        let emotional_state = infer_emotion(sample, self.min_expression_confidence);

        let state = CognitiveState {
            focus,
            cognitive_load,
            comprehension: comprehension(focus, cognitive_load),
            engagement: engagement(cognitive_load, sample.attention_level),
            fatigue: fatigue(sample.blink_rate),
            learning_readiness: self.readiness(focus, cognitive_load, emotional_state),
            emotional_state,
            timestamp,
        }
        .clamped();

        tracing::debug!(
            focus = state.focus,
            load = state.cognitive_load,
            readiness = state.learning_readiness,
            emotion = state.emotional_state.as_str(),
            "sample scored"
        );

        (state, features)
    }

    pub fn readiness(&self, focus: f64, cognitive_load: f64, emotion: EmotionalState) -> f64 {
        let w = &self.readiness;
        let load_fit = 1.0 - (cognitive_load - OPTIMAL_ENGAGEMENT_LOAD).abs();
        (focus * w.focus + load_fit * w.load + emotion.positivity() * w.emotion).clamp(0.0, 1.0)
    }
}

impl Default for CognitiveScorer {
    fn default() -> Self {
        Self::new(&EngineConfig::default())
    }
}

/// Peaks at moderate load; blended with reported attention when available.
pub fn engagement(cognitive_load: f64, attention_level: Option<f64>) -> f64 {
    let optimal = 1.0 - (cognitive_load - OPTIMAL_ENGAGEMENT_LOAD).abs() * 2.0;
    let value = match attention_level {
        Some(attention) => {
            optimal * ENGAGEMENT_LOAD_WEIGHT + attention.clamp(0.0, 1.0) * ENGAGEMENT_ATTENTION_WEIGHT
        }
        None => optimal,
    };
    value.clamp(0.0, 1.0)
}

pub fn comprehension(focus: f64, cognitive_load: f64) -> f64 {
    let load_penalty = 1.0 - (cognitive_load - OPTIMAL_COMPREHENSION_LOAD).abs() * 2.0;
    (focus * COMPREHENSION_FOCUS_WEIGHT * load_penalty).clamp(0.0, 1.0)
}

pub fn fatigue(blink_rate: Option<f64>) -> f64 {
    match blink_rate {
        Some(rate) => (rate / FATIGUE_BLINK_CEILING).clamp(0.0, 1.0),
        None => DEFAULT_FATIGUE,
    }
}
