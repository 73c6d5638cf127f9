use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacialExpression {
    pub emotion: String,
    pub confidence: f64,
}

/// One observation from the sensor layer. Every channel may be missing in a given cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BiometricSample {
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heart_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pupil_dilation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blink_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attention_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facial_expression: Option<FacialExpression>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eeg_band_powers: Option<Vec<f64>>,
}

impl BiometricSample {
    pub fn at(timestamp: i64) -> Self {
        Self {
            timestamp,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum EmotionalState {
    #[default]
    Neutral,
    Happy,
    Excited,
    Confident,
    Focused,
    Calm,
    Relaxed,
    Surprised,
    Sad,
    Angry,
    Fearful,
    Disgusted,
    Frustrated,
    Confused,
    Bored,
    Stressed,
    Tired,
}

impl EmotionalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "neutral",
            Self::Happy => "happy",
            Self::Excited => "excited",
            Self::Confident => "confident",
            Self::Focused => "focused",
            Self::Calm => "calm",
            Self::Relaxed => "relaxed",
            Self::Surprised => "surprised",
            Self::Sad => "sad",
            Self::Angry => "angry",
            Self::Fearful => "fearful",
            Self::Disgusted => "disgusted",
            Self::Frustrated => "frustrated",
            Self::Confused => "confused",
            Self::Bored => "bored",
            Self::Stressed => "stressed",
            Self::Tired => "tired",
        }
    }

    /// Unknown labels fall back to `Neutral`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "happy" => Self::Happy,
            "excited" => Self::Excited,
            "confident" => Self::Confident,
            "focused" => Self::Focused,
            "calm" => Self::Calm,
            "relaxed" => Self::Relaxed,
            "surprised" => Self::Surprised,
            "sad" => Self::Sad,
            "angry" => Self::Angry,
            "fearful" => Self::Fearful,
            "disgusted" => Self::Disgusted,
            "frustrated" => Self::Frustrated,
            "confused" => Self::Confused,
            "bored" => Self::Bored,
            "stressed" => Self::Stressed,
            "tired" => Self::Tired,
            _ => Self::Neutral,
        }
    }

    /// Affect valence used by the readiness score.
    pub fn positivity(&self) -> f64 {
        match self {
            Self::Happy | Self::Excited | Self::Confident | Self::Focused | Self::Calm => 0.8,
            Self::Frustrated | Self::Confused | Self::Bored | Self::Stressed | Self::Tired => 0.3,
            _ => 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveState {
    pub focus: f64,
    pub cognitive_load: f64,
    pub comprehension: f64,
    pub engagement: f64,
    pub fatigue: f64,
    pub learning_readiness: f64,
    pub emotional_state: EmotionalState,
    pub timestamp: i64,
}

impl CognitiveState {
    pub fn neutral(timestamp: i64) -> Self {
        Self {
            focus: 0.5,
            cognitive_load: 0.5,
            comprehension: 0.5,
            engagement: 0.5,
            fatigue: 0.3,
            learning_readiness: 0.5,
            emotional_state: EmotionalState::Neutral,
            timestamp,
        }
    }

    pub fn clamped(mut self) -> Self {
        self.focus = self.focus.clamp(0.0, 1.0);
        self.cognitive_load = self.cognitive_load.clamp(0.0, 1.0);
        self.comprehension = self.comprehension.clamp(0.0, 1.0);
        self.engagement = self.engagement.clamp(0.0, 1.0);
        self.fatigue = self.fatigue.clamp(0.0, 1.0);
        self.learning_readiness = self.learning_readiness.clamp(0.0, 1.0);
        self
    }
}

impl Default for CognitiveState {
    fn default() -> Self {
        Self::neutral(0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LoadTrend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

impl LoadTrend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Recommendation {
    #[default]
    Continue,
    Break,
    Simplify,
    Challenge,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Continue => "continue",
            Self::Break => "break",
            Self::Simplify => "simplify",
            Self::Challenge => "challenge",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CognitiveLoadMetrics {
    pub current_load: f64,
    pub trend: LoadTrend,
    pub peak: f64,
    pub average: f64,
    pub recommendation: Recommendation,
}

/// Free-text hints surfaced alongside a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suggestion {
    TakeBreak,
    SwitchToVisual,
    ReduceComplexity,
    MinimizeDistractions,
    AddInteractivity,
    TryAudio,
    IncreaseDifficulty,
    AddChallenge,
    Encouragement,
    ReviewBasics,
}

impl Suggestion {
    pub fn message(&self) -> &'static str {
        match self {
            Self::TakeBreak => "Take a short 5-minute break",
            Self::SwitchToVisual => "Switch to a visual learning mode",
            Self::ReduceComplexity => "Reduce the complexity of the current material",
            Self::MinimizeDistractions => "Minimize distractions in your environment",
            Self::AddInteractivity => "Try a more interactive exercise",
            Self::TryAudio => "Switch to audio-based content",
            Self::IncreaseDifficulty => "Increase the difficulty level",
            Self::AddChallenge => "Try a more challenging problem",
            Self::Encouragement => "You are making progress, keep going",
            Self::ReviewBasics => "Review the previous material before moving on",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum Modality {
    #[default]
    Text,
    Visual,
    Audio,
    Interactive,
}

/// Tutoring content before or after adaptation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TutorResponse {
    pub content: String,
    pub modality: Modality,
    pub difficulty: f64,
    #[serde(default)]
    pub follow_up_actions: Vec<String>,
}

impl TutorResponse {
    pub fn new(content: impl Into<String>, difficulty: f64) -> Self {
        Self {
            content: content.into(),
            modality: Modality::Text,
            difficulty,
            follow_up_actions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationKind {
    AttentionPrompt,
    Simplification,
    Challenge,
}

impl AdaptationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AttentionPrompt => "attention_prompt",
            Self::Simplification => "simplification",
            Self::Challenge => "challenge",
        }
    }

    pub fn follow_up(&self) -> &'static str {
        match self {
            Self::AttentionPrompt => "Quick check: can you summarize the last idea in one sentence?",
            Self::Simplification => "Let's break this down into smaller steps.",
            Self::Challenge => "Ready for a harder variation of this problem?",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdaptedResponse {
    pub response: TutorResponse,
    pub applied: Vec<AdaptationKind>,
}

/// Read-only view handed to consumers outside the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub state: CognitiveState,
    pub metrics: CognitiveLoadMetrics,
    pub suggestions: Vec<Suggestion>,
    pub optimal: bool,
    pub history_len: usize,
    pub samples_seen: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emotion_parse_is_case_insensitive() {
        assert_eq!(EmotionalState::parse("Happy"), EmotionalState::Happy);
        assert_eq!(EmotionalState::parse(" FRUSTRATED "), EmotionalState::Frustrated);
        assert_eq!(EmotionalState::parse("melancholic"), EmotionalState::Neutral);
    }

    #[test]
    fn positivity_table() {
        for e in ["happy", "excited", "confident", "focused", "calm"] {
            assert_eq!(EmotionalState::parse(e).positivity(), 0.8, "{e}");
        }
        for e in ["frustrated", "confused", "bored", "stressed", "tired"] {
            assert_eq!(EmotionalState::parse(e).positivity(), 0.3, "{e}");
        }
        for e in ["neutral", "relaxed", "sad", "surprised"] {
            assert_eq!(EmotionalState::parse(e).positivity(), 0.5, "{e}");
        }
    }

    #[test]
    fn sample_deserializes_from_camel_case_with_missing_fields() {
        let sample: BiometricSample = serde_json::from_str(
            r#"{"timestamp":1000,"heartRate":72.0,"facialExpression":{"emotion":"happy","confidence":0.9}}"#,
        )
        .unwrap();
        assert_eq!(sample.timestamp, 1000);
        assert_eq!(sample.heart_rate, Some(72.0));
        assert!(sample.blink_rate.is_none());
        assert_eq!(sample.facial_expression.unwrap().emotion, "happy");
    }

    #[test]
    fn state_serializes_emotion_as_label() {
        let json = serde_json::to_value(CognitiveState::neutral(5)).unwrap();
        assert_eq!(json["emotionalState"], "neutral");
        assert_eq!(json["cognitiveLoad"], 0.5);
    }

    #[test]
    fn clamped_bounds_every_field() {
        let state = CognitiveState {
            focus: 1.7,
            cognitive_load: -0.2,
            comprehension: 2.0,
            engagement: -1.0,
            fatigue: 3.0,
            learning_readiness: -0.01,
            emotional_state: EmotionalState::Calm,
            timestamp: 1,
        }
        .clamped();
        assert_eq!(state.focus, 1.0);
        assert_eq!(state.cognitive_load, 0.0);
        assert_eq!(state.comprehension, 1.0);
        assert_eq!(state.engagement, 0.0);
        assert_eq!(state.fatigue, 1.0);
        assert_eq!(state.learning_readiness, 0.0);
    }
}
