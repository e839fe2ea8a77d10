// src/emotion/encoder.rs
use super::Emotion;
use crate::core::aura_constants::{DEFAULT_CELLS, ENCODER_SPREAD};
use rand::Rng;
use rand_distr::StandardNormal;
use serde::Serialize;
use std::ops::Deref;

/// One parameter per cell, each in `[0, 1]`.
///
/// Serializes as a plain JSON array.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterVector(Vec<f64>);

impl ParameterVector {
    /// Wraps raw values without range checks; binding rejects non-finite
    /// values later.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }

    /// Arithmetic mean, `0.0` when empty.
    pub fn mean(&self) -> f64 {
        if self.0.is_empty() {
            0.0
        } else {
            self.0.iter().sum::<f64>() / self.0.len() as f64
        }
    }
}

impl Deref for ParameterVector {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

/// Maps `(emotion, intensity)` to a noisy parameter vector.
///
/// Each entry is drawn from `N(base * intensity, spread^2)` and clipped to
/// `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoder {
    cells: usize,
    spread: f64,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(DEFAULT_CELLS)
    }
}

impl Encoder {
    pub fn new(cells: usize) -> Self {
        Self { cells, spread: ENCODER_SPREAD }
    }

    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Encodes a label. Unknown labels use the neutral base silently.
    pub fn encode<R: Rng + ?Sized>(&self, label: &str, intensity: f64, rng: &mut R) -> ParameterVector {
        self.encode_base(Emotion::base_for_label(label), intensity, rng)
    }

    /// Encodes a known emotion.
    pub fn encode_emotion<R: Rng + ?Sized>(
        &self,
        emotion: Emotion,
        intensity: f64,
        rng: &mut R,
    ) -> ParameterVector {
        self.encode_base(emotion.base(), intensity, rng)
    }

    /// Encodes around an explicit base value.
    pub fn encode_base<R: Rng + ?Sized>(&self, base: f64, intensity: f64, rng: &mut R) -> ParameterVector {
        let mean = base * intensity;
        let values = (0..self.cells)
            .map(|_| {
                let z: f64 = rng.sample(StandardNormal);
                (mean + self.spread * z).clamp(0.0, 1.0)
            })
            .collect();
        ParameterVector(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::aura_constants::NEUTRAL_BASE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_length_and_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let encoder = Encoder::default();
        for label in ["joy", "sadness", "ANGER", "unknown"] {
            for intensity in [0.0, 0.5, 1.0] {
                let params = encoder.encode(label, intensity, &mut rng);
                assert_eq!(params.len(), DEFAULT_CELLS);
                assert!(params.iter().all(|p| (0.0..=1.0).contains(p)), "{label} {intensity}");
            }
        }
    }

    #[test]
    fn test_unknown_label_matches_neutral_base() {
        let encoder = Encoder::new(16);
        let unknown = encoder.encode("melancholy", 0.8, &mut StdRng::seed_from_u64(42));
        let neutral = encoder.encode_base(NEUTRAL_BASE, 0.8, &mut StdRng::seed_from_u64(42));
        assert_eq!(unknown, neutral);
    }

    #[test]
    fn test_joy_at_full_intensity_stays_near_base() {
        // mean 0.9, sd 0.05: every entry within 3 sd of the mean
        let encoder = Encoder::new(4);
        let params = encoder.encode_emotion(Emotion::Joy, 1.0, &mut StdRng::seed_from_u64(3));
        assert_eq!(params.len(), 4);
        assert!(params.iter().all(|p| (0.75..=1.0).contains(p)), "{:?}", params);
    }

    #[test]
    fn test_zero_intensity_clips_at_zero() {
        let params = Encoder::new(64).encode("joy", 0.0, &mut StdRng::seed_from_u64(1));
        assert!(params.iter().any(|p| *p == 0.0));
        assert!(params.mean() < 0.1);
    }

    #[test]
    fn test_serializes_as_array() {
        let params = ParameterVector::from_values(vec![0.25, 0.5]);
        assert_eq!(serde_json::to_string(&params).unwrap(), "[0.25,0.5]");
    }
}
