//! Input sanitation
//!
//! Sensor channels that carry NaN, infinities or physically impossible
//! readings are dropped to `None` so the normalizer falls back to its
//! defaults instead of propagating garbage.

use crate::cognition::types::BiometricSample;

fn finite(value: Option<f64>) -> (Option<f64>, usize) {
    match value {
        Some(v) if v.is_finite() => (Some(v), 0),
        Some(_) => (None, 1),
        None => (None, 0),
    }
}

/// Returns the cleaned sample and how many channels or entries were discarded.
pub fn sanitize_sample(mut sample: BiometricSample) -> (BiometricSample, usize) {
    let mut discarded = 0;

    let (heart_rate, n) = finite(sample.heart_rate);
    discarded += n;
    sample.heart_rate = match heart_rate {
        Some(hr) if hr <= 0.0 => {
            discarded += 1;
            None
        }
        other => other,
    };

    let (blink_rate, n) = finite(sample.blink_rate);
    discarded += n;
    sample.blink_rate = match blink_rate {
        Some(br) if br < 0.0 => {
            discarded += 1;
            None
        }
        other => other,
    };

    let (pupil, n) = finite(sample.pupil_dilation);
    discarded += n;
    sample.pupil_dilation = pupil;

    let (attention, n) = finite(sample.attention_level);
    discarded += n;
    sample.attention_level = attention;

    let (stress, n) = finite(sample.stress_level);
    discarded += n;
    sample.stress_level = stress;

    if let Some(expr) = sample.facial_expression.as_ref() {
        if !expr.confidence.is_finite() {
            sample.facial_expression = None;
            discarded += 1;
        }
    }

    if let Some(powers) = sample.eeg_band_powers.take() {
        let before = powers.len();
        let kept: Vec<f64> = powers.into_iter().filter(|p| p.is_finite()).collect();
        discarded += before - kept.len();
        sample.eeg_band_powers = if kept.is_empty() { None } else { Some(kept) };
    }

    (sample, discarded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cognition::types::FacialExpression;

    #[test]
    fn clean_sample_is_untouched() {
        let sample = BiometricSample {
            heart_rate: Some(70.0),
            blink_rate: Some(12.0),
            eeg_band_powers: Some(vec![0.2, 0.4]),
            ..BiometricSample::at(10)
        };
        let (out, discarded) = sanitize_sample(sample.clone());
        assert_eq!(out, sample);
        assert_eq!(discarded, 0);
    }

    #[test]
    fn non_finite_and_impossible_values_are_dropped() {
        let sample = BiometricSample {
            heart_rate: Some(-5.0),
            blink_rate: Some(f64::NAN),
            pupil_dilation: Some(f64::INFINITY),
            attention_level: Some(0.6),
            facial_expression: Some(FacialExpression {
                emotion: "happy".into(),
                confidence: f64::NAN,
            }),
            eeg_band_powers: Some(vec![f64::NAN, 0.5]),
            ..BiometricSample::at(10)
        };
        let (out, discarded) = sanitize_sample(sample);
        assert!(out.heart_rate.is_none());
        assert!(out.blink_rate.is_none());
        assert!(out.pupil_dilation.is_none());
        assert!(out.facial_expression.is_none());
        assert_eq!(out.attention_level, Some(0.6));
        assert_eq!(out.eeg_band_powers, Some(vec![0.5]));
        assert_eq!(discarded, 5);
    }

    #[test]
    fn all_invalid_eeg_becomes_absent() {
        let sample = BiometricSample {
            eeg_band_powers: Some(vec![f64::NAN, f64::NEG_INFINITY]),
            ..BiometricSample::at(0)
        };
        let (out, discarded) = sanitize_sample(sample);
        assert!(out.eeg_band_powers.is_none());
        assert_eq!(discarded, 2);
    }
}
