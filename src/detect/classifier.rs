use rand::Rng;

use super::types::{AudioFeatures, Classification};

/// Heuristic placeholder scoring, kept bit-for-bit with its original
/// thresholds. This is not a trained model and is not meant to be accurate.
const LOW_VARIANCE_THRESHOLD: f64 = 2000.0;
const LOW_VARIANCE_BONUS: f64 = 0.3;
const MID_RATE_BONUS: f64 = 0.2;
const OUTLIER_RATE_BONUS: f64 = 0.4;
const RATE_DIVISOR: f64 = 1000.0;
const PERTURBATION: f64 = 0.15;

/// Deterministic part of the score, before the random perturbation.
///
/// Note the rate gap: rates in [0.25, 0.3] receive neither bonus. The
/// boundary is preserved as observed, not smoothed over.
pub fn base_score(features: &AudioFeatures) -> f64 {
    let mut score = 0.0;

    if features.variance < LOW_VARIANCE_THRESHOLD {
        score += LOW_VARIANCE_BONUS;
    }

    let rate = features.zero_crossings as f64 / RATE_DIVISOR;
    if rate > 0.15 && rate < 0.25 {
        score += MID_RATE_BONUS;
    } else if rate < 0.15 || rate > 0.3 {
        score += OUTLIER_RATE_BONUS;
    }

    score
}

/// Label plus confidence, both derived from the perturbed, clamped score.
/// Repeated calls on the same features may disagree; that is intentional.
pub fn classify(features: &AudioFeatures, rng: &mut impl Rng) -> (Classification, f64) {
    let mut ai_score = base_score(features);
    ai_score += rng.random_range(-PERTURBATION..=PERTURBATION);
    ai_score = ai_score.clamp(0.0, 1.0);

    let classification = if ai_score > 0.5 {
        Classification::AiGenerated
    } else {
        Classification::Human
    };

    let confidence = match classification {
        Classification::AiGenerated => ai_score,
        Classification::Human => 1.0 - ai_score,
    };

    (classification, round2(confidence))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
