use crate::cognition::config::Thresholds;
use crate::cognition::history::LoadSummary;
use crate::cognition::types::{
    CognitiveLoadMetrics, CognitiveState, EmotionalState, Recommendation, Suggestion,
};

pub struct RecommendationPolicy {
    thresholds: Thresholds,
}

impl RecommendationPolicy {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn recommend(&self, current_load: f64, state: &CognitiveState) -> Recommendation {
        let t = &self.thresholds;

        if current_load > t.high_load {
            if state.focus > t.simplify_focus {
                Recommendation::Simplify
            } else {
                Recommendation::Break
            }
        } else if current_load < t.low_load && state.learning_readiness > t.high_readiness {
            Recommendation::Challenge
        } else {
            Recommendation::Continue
        }
    }

    pub fn metrics(&self, summary: LoadSummary, state: &CognitiveState) -> CognitiveLoadMetrics {
        CognitiveLoadMetrics {
            current_load: summary.current_load,
            trend: summary.trend,
            peak: summary.peak,
            average: summary.average,
            recommendation: self.recommend(summary.current_load, state),
        }
    }

    /// All applicable hints, not just the highest-priority one.
    pub fn suggestions(&self, state: &CognitiveState) -> Vec<Suggestion> {
        let t = &self.thresholds;
        let mut suggestions = Vec::new();

        if state.cognitive_load > t.high_load {
            suggestions.extend([
                Suggestion::TakeBreak,
                Suggestion::SwitchToVisual,
                Suggestion::ReduceComplexity,
            ]);
        }

        if state.focus < t.suggestion_focus {
            suggestions.extend([
                Suggestion::MinimizeDistractions,
                Suggestion::AddInteractivity,
                Suggestion::TryAudio,
            ]);
        }

        if state.learning_readiness > t.high_readiness {
            suggestions.extend([Suggestion::IncreaseDifficulty, Suggestion::AddChallenge]);
        }

        if state.emotional_state == EmotionalState::Frustrated {
            suggestions.extend([Suggestion::Encouragement, Suggestion::ReviewBasics]);
        }

        suggestions
    }

    pub fn is_optimal_learning_state(&self, state: &CognitiveState) -> bool {
        let t = &self.thresholds;
        state.focus > t.medium_focus
            && state.cognitive_load > t.low_load
            && state.cognitive_load < t.high_load
            && state.learning_readiness > t.medium_readiness
    }
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}
