use std::sync::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod classifier;
pub mod decode;
pub mod error;
pub mod explain;
pub mod features;
pub mod types;

pub use error::DetectError;
pub use types::{AudioFeatures, Classification, DetectionRequest, Language, RawDetectionRequest};

#[derive(Debug)]
pub struct DetectionOutcome {
    pub classification: Classification,
    pub confidence: f64,
    pub explanation: &'static str,
}

/// Runs the per-request pipeline: decode -> features -> classify -> explain.
///
/// Holds the perturbation RNG so tests can seed it; everything else in the
/// pipeline is deterministic.
pub struct Detector {
    rng: Mutex<StdRng>,
}

impl Detector {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng: Mutex::new(rng) }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    pub fn detect(&self, req: &DetectionRequest) -> Result<DetectionOutcome, DetectError> {
        let audio = decode::decode_audio(&req.audio_base64)?;
        let feats = features::extract(&audio);

        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        let (classification, confidence) = classifier::classify(&feats, &mut *rng);
        let explanation = explain::explanation(classification, &mut *rng);

        Ok(DetectionOutcome {
            classification,
            confidence,
            explanation,
        })
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}
