use crate::cognition::types::{BiometricSample, EmotionalState};

const EXCITED_HEART_RATE: f64 = 100.0;
const CALM_HEART_RATE: f64 = 60.0;
const STRESSED_LEVEL: f64 = 0.7;
const RELAXED_LEVEL: f64 = 0.3;

/// Facial label first; otherwise a coarse guess from heart rate, then stress.
pub fn infer_emotion(sample: &BiometricSample, min_confidence: f64) -> EmotionalState {
    if let Some(expr) = sample.facial_expression.as_ref() {
        if expr.confidence >= min_confidence {
            let parsed = EmotionalState::parse(&expr.emotion);
            if parsed == EmotionalState::Neutral && !expr.emotion.eq_ignore_ascii_case("neutral") {
                tracing::debug!(label = %expr.emotion, "unrecognized facial emotion label");
            }
            return parsed;
        }
    }

    if let Some(hr) = sample.heart_rate {
        if hr > EXCITED_HEART_RATE {
            return EmotionalState::Excited;
        }
        if hr < CALM_HEART_RATE {
            return EmotionalState::Calm;
        }
    }

    if let Some(stress) = sample.stress_level {
        if stress > STRESSED_LEVEL {
            return EmotionalState::Stressed;
        }
        if stress < RELAXED_LEVEL {
            return EmotionalState::Relaxed;
        }
    }

    EmotionalState::Neutral
}
