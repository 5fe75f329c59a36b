use rand::Rng;

use super::types::Classification;

/// Canned rationale strings. Cosmetic only: they carry no information
/// beyond the label and must not be parsed downstream.
const AI_EXPLANATIONS: [&str; 5] = [
    "Synthetic spectral patterns detected",
    "Unnatural pitch consistency and robotic speech patterns detected",
    "Uniform energy distribution typical of generated audio",
    "Overly regular phoneme timing suggests synthesis",
    "Absence of natural breathing and micro-pauses detected",
];

const HUMAN_EXPLANATIONS: [&str; 5] = [
    "Natural human voice characteristics detected",
    "Organic pitch variation consistent with human speech",
    "Natural breathing patterns and micro-pauses present",
    "Irregular energy contour typical of live recordings",
    "Background acoustics consistent with a real environment",
];

pub fn explanation(label: Classification, rng: &mut impl Rng) -> &'static str {
    let pool = match label {
        Classification::AiGenerated => &AI_EXPLANATIONS,
        Classification::Human => &HUMAN_EXPLANATIONS,
    };
    pool[rng.random_range(0..pool.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_explanation_comes_from_label_pool() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..50 {
            let ai = explanation(Classification::AiGenerated, &mut rng);
            assert!(AI_EXPLANATIONS.contains(&ai));

            let human = explanation(Classification::Human, &mut rng);
            assert!(HUMAN_EXPLANATIONS.contains(&human));
        }
    }

    #[test]
    fn test_explanation_varies() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..100 {
            seen.insert(explanation(Classification::Human, &mut rng));
        }
        assert!(seen.len() > 1);
    }
}
