use super::types::AudioFeatures;

/// Only the first 1000 bytes feed the statistics; longer payloads are
/// deliberately not scanned in full.
pub const FEATURE_PREFIX_LEN: usize = 1000;

const MIDPOINT: i16 = 128;

/// Deterministic byte statistics over the feature prefix.
///
/// Empty input yields the all-zero feature set rather than dividing by
/// zero; `size` always reports the full decoded length.
pub fn extract(audio: &[u8]) -> AudioFeatures {
    let prefix = &audio[..audio.len().min(FEATURE_PREFIX_LEN)];

    if prefix.is_empty() {
        return AudioFeatures {
            size: audio.len(),
            ..AudioFeatures::default()
        };
    }

    let len = prefix.len() as f64;
    let mean = prefix.iter().map(|&b| b as f64).sum::<f64>() / len;
    let variance = prefix
        .iter()
        .map(|&b| {
            let d = b as f64 - mean;
            d * d
        })
        .sum::<f64>()
        / len;

    let zero_crossings = prefix
        .windows(2)
        .filter(|pair| {
            let prev = pair[0] as i16 - MIDPOINT;
            let cur = pair[1] as i16 - MIDPOINT;
            (prev as i32) * (cur as i32) < 0
        })
        .count();

    AudioFeatures {
        mean,
        variance,
        zero_crossings,
        size: audio.len(),
    }
}
