use serde::{Deserialize, Serialize};

use crate::cognition::config::NormalizerParams;
use crate::cognition::types::BiometricSample;

/// Bounded proxies derived from whichever channels a sample carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureScores {
    pub attention: f64,
    pub effort: f64,
    pub arousal: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eeg_activity: Option<f64>,
}

impl Default for FeatureScores {
    fn default() -> Self {
        Self {
            attention: 0.5,
            effort: 0.5,
            arousal: 0.5,
            eeg_activity: None,
        }
    }
}

pub struct FeatureNormalizer {
    params: NormalizerParams,
}

impl FeatureNormalizer {
    pub fn new(params: NormalizerParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &NormalizerParams {
        &self.params
    }

    pub fn normalize(&self, sample: &BiometricSample) -> FeatureScores {
        FeatureScores {
            attention: self.attention(sample),
            effort: self.effort(sample),
            arousal: self.arousal(sample),
            eeg_activity: eeg_activity(sample.eeg_band_powers.as_deref()),
        }
    }

    pub fn attention(&self, sample: &BiometricSample) -> f64 {
        let p = &self.params;
        let mut attention = sample.attention_level.unwrap_or(p.default_attention);

        if let Some(blink_rate) = sample.blink_rate {
            let blink_factor = self.blink_factor(blink_rate);
            attention = attention * p.attention_weight + blink_factor * p.blink_weight;
        }

        attention.clamp(0.0, 1.0)
    }

    /// 1.0 at or below the resting blink rate, falling to 0 across `blink_range`.
    pub fn blink_factor(&self, blink_rate: f64) -> f64 {
        let range = self.params.blink_range.max(1e-6);
        (1.0 - (blink_rate - self.params.blink_baseline) / range).clamp(0.0, 1.0)
    }

    pub fn effort(&self, sample: &BiometricSample) -> f64 {
        let p = &self.params;
        let mut load = p.base_effort;

        if let Some(dilation) = sample.pupil_dilation {
            load += (dilation - 0.5) * p.pupil_gain;
        }

        if let Some(hr) = sample.heart_rate {
            let hr_norm = self.heart_rate_norm(hr);
            load = load * (1.0 - p.heart_rate_weight) + hr_norm * p.heart_rate_weight;
        }

        load.clamp(0.0, 1.0)
    }

    pub fn heart_rate_norm(&self, heart_rate: f64) -> f64 {
        let span = self.params.heart_rate_span.max(1e-6);
        ((heart_rate - self.params.heart_rate_rest) / span).clamp(0.0, 1.0)
    }

    pub fn arousal(&self, sample: &BiometricSample) -> f64 {
        if let Some(stress) = sample.stress_level {
            return stress.clamp(0.0, 1.0);
        }
        match sample.heart_rate {
            Some(hr) => self.heart_rate_norm(hr),
            None => 0.5,
        }
    }
}

impl Default for FeatureNormalizer {
    fn default() -> Self {
        Self::new(NormalizerParams::default())
    }
}

/// Mean band power as a generic activity signal; `None` for an empty list.
pub fn eeg_activity(powers: Option<&[f64]>) -> Option<f64> {
    let powers = powers?;
    if powers.is_empty() {
        return None;
    }
    let mean = powers.iter().sum::<f64>() / powers.len() as f64;
    Some(mean.clamp(0.0, 1.0))
}
