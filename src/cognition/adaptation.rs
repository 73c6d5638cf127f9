use crate::cognition::config::{AdaptationParams, Thresholds};
use crate::cognition::types::{
    AdaptationKind, AdaptedResponse, CognitiveState, Modality, TutorResponse,
};

/// Applies the focus, load and readiness rules, in that order, to a tutor
/// response. Every rule sees the same input state; difficulty deltas stack.
pub struct AdaptationDispatcher {
    thresholds: Thresholds,
    params: AdaptationParams,
}

impl AdaptationDispatcher {
    pub fn new(thresholds: Thresholds, params: AdaptationParams) -> Self {
        Self { thresholds, params }
    }

    pub fn adapt(&self, base: TutorResponse, state: &CognitiveState) -> AdaptedResponse {
        let mut response = base;
        let mut applied = Vec::new();

        if state.focus < self.thresholds.low_focus {
            if self.params.switch_modality_on_low_focus {
                response.modality = Modality::Interactive;
            }
            applied.push(AdaptationKind::AttentionPrompt);
        }

        if state.cognitive_load > self.thresholds.high_load {
            response.difficulty = (response.difficulty - self.params.difficulty_step).clamp(0.0, 1.0);
            applied.push(AdaptationKind::Simplification);
        }

        if state.learning_readiness > self.thresholds.high_readiness {
            response.difficulty = (response.difficulty + self.params.difficulty_step).clamp(0.0, 1.0);
            applied.push(AdaptationKind::Challenge);
        }

        for kind in &applied {
            response.follow_up_actions.push(kind.follow_up().to_string());
        }

        if !applied.is_empty() {
            tracing::debug!(
                adaptations = ?applied,
                difficulty = response.difficulty,
                "tutor response adapted"
            );
        }

        AdaptedResponse { response, applied }
    }
}

impl Default for AdaptationDispatcher {
    fn default() -> Self {
        Self::new(Thresholds::default(), AdaptationParams::default())
    }
}
