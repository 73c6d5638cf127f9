use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("readiness weights must sum to 1.0, got {0}")]
    ReadinessWeights(f64),
    #[error("{name} must be within [0, 1], got {value}")]
    OutOfRange { name: &'static str, value: f64 },
    #[error("{low} must be lower than {high}")]
    Ordering { low: &'static str, high: &'static str },
    #[error("history capacity must be at least 1")]
    HistoryCapacity,
    #[error("tick interval must be positive")]
    TickInterval,
}

/// Calibration for turning raw sensor readings into [0,1] proxies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizerParams {
    pub default_attention: f64,
    pub attention_weight: f64,
    pub blink_weight: f64,
    pub blink_baseline: f64,
    pub blink_range: f64,
    pub base_effort: f64,
    pub pupil_gain: f64,
    pub heart_rate_weight: f64,
    pub heart_rate_rest: f64,
    pub heart_rate_span: f64,
    pub eeg_weight: f64,
}

impl Default for NormalizerParams {
    fn default() -> Self {
        Self {
            default_attention: 0.5,
            attention_weight: 0.7,
            blink_weight: 0.3,
            blink_baseline: 10.0,
            blink_range: 20.0,
            base_effort: 0.5,
            pupil_gain: 0.4,
            heart_rate_weight: 0.3,
            heart_rate_rest: 60.0,
            heart_rate_span: 60.0,
            eeg_weight: 0.2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessWeights {
    pub focus: f64,
    pub load: f64,
    pub emotion: f64,
}

impl Default for ReadinessWeights {
    fn default() -> Self {
        Self {
            focus: 0.4,
            load: 0.3,
            emotion: 0.3,
        }
    }
}

impl ReadinessWeights {
    pub fn total(&self) -> f64 {
        self.focus + self.load + self.emotion
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thresholds {
    pub low_load: f64,
    pub medium_load: f64,
    pub high_load: f64,
    pub low_focus: f64,
    pub medium_focus: f64,
    pub high_focus: f64,
    pub low_readiness: f64,
    pub medium_readiness: f64,
    pub high_readiness: f64,
    /// Focus above which an overloaded learner is asked to simplify rather than rest.
    pub simplify_focus: f64,
    pub suggestion_focus: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            low_load: 0.2,
            medium_load: 0.5,
            high_load: 0.8,
            low_focus: 0.3,
            medium_focus: 0.5,
            high_focus: 0.8,
            low_readiness: 0.3,
            medium_readiness: 0.5,
            high_readiness: 0.8,
            simplify_focus: 0.7,
            suggestion_focus: 0.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptationParams {
    pub difficulty_step: f64,
    pub switch_modality_on_low_focus: bool,
}

impl Default for AdaptationParams {
    fn default() -> Self {
        Self {
            difficulty_step: 0.2,
            switch_modality_on_low_focus: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    pub normalizer: NormalizerParams,
    pub readiness: ReadinessWeights,
    pub thresholds: Thresholds,
    pub adaptation: AdaptationParams,
    pub history_capacity: usize,
    pub trend_window: usize,
    pub average_window: usize,
    pub min_expression_confidence: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            normalizer: NormalizerParams::default(),
            readiness: ReadinessWeights::default(),
            thresholds: Thresholds::default(),
            adaptation: AdaptationParams::default(),
            history_capacity: 20,
            trend_window: 3,
            average_window: 5,
            min_expression_confidence: 0.0,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(val) = env_f64("COGSTATE_HIGH_LOAD") {
            config.thresholds.high_load = val;
        }
        if let Some(val) = env_f64("COGSTATE_LOW_LOAD") {
            config.thresholds.low_load = val;
        }
        if let Some(val) = env_f64("COGSTATE_LOW_FOCUS") {
            config.thresholds.low_focus = val;
        }
        if let Some(val) = env_f64("COGSTATE_HIGH_READINESS") {
            config.thresholds.high_readiness = val;
        }
        if let Ok(val) = std::env::var("COGSTATE_HISTORY_CAPACITY") {
            config.history_capacity = val.parse().unwrap_or(config.history_capacity);
        }

        config
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let r = &self.readiness;
        let t = &self.thresholds;
        let bounded = [
            ("readiness.focus", r.focus),
            ("readiness.load", r.load),
            ("readiness.emotion", r.emotion),
            ("low_load", t.low_load),
            ("medium_load", t.medium_load),
            ("high_load", t.high_load),
            ("low_focus", t.low_focus),
            ("medium_focus", t.medium_focus),
            ("high_focus", t.high_focus),
            ("low_readiness", t.low_readiness),
            ("medium_readiness", t.medium_readiness),
            ("high_readiness", t.high_readiness),
            ("simplify_focus", t.simplify_focus),
            ("suggestion_focus", t.suggestion_focus),
            ("difficulty_step", self.adaptation.difficulty_step),
            ("min_expression_confidence", self.min_expression_confidence),
        ];
        for (name, value) in bounded {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }

        let total = r.total();
        if (total - 1.0).abs() > 1e-6 {
            return Err(ConfigError::ReadinessWeights(total));
        }

        let ordered = [
            ("low_load", t.low_load, "medium_load", t.medium_load),
            ("medium_load", t.medium_load, "high_load", t.high_load),
            ("low_focus", t.low_focus, "medium_focus", t.medium_focus),
            ("medium_focus", t.medium_focus, "high_focus", t.high_focus),
            ("low_readiness", t.low_readiness, "medium_readiness", t.medium_readiness),
            ("medium_readiness", t.medium_readiness, "high_readiness", t.high_readiness),
        ];
        for (low, low_value, high, high_value) in ordered {
            if low_value >= high_value {
                return Err(ConfigError::Ordering { low, high });
            }
        }

        if self.history_capacity == 0 || self.trend_window == 0 || self.average_window == 0 {
            return Err(ConfigError::HistoryCapacity);
        }

        Ok(())
    }
}

fn env_f64(key: &str) -> Option<f64> {
    std::env::var(key).ok().and_then(|v| v.parse::<f64>().ok())
}
