// src/emotion/state.rs
use super::{EMOTION_COUNT, Emotion};
use crate::core::AuraError;
use crate::core::aura_constants::STATE_NOISE_SCALE;
use rand::Rng;
use rand_distr::{Dirichlet, Distribution};
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// Probability distribution over the eight emotions.
///
/// Entries are non-negative and sum to 1, in [`Emotion::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionState([f64; EMOTION_COUNT]);

impl EmotionState {
    /// Draws a fresh state: uniform `[0, 1)` entries, renormalized.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Result<Self, AuraError> {
        let mut raw = [0.0; EMOTION_COUNT];
        for entry in raw.iter_mut() {
            *entry = rng.random::<f64>();
        }
        normalize_or_resample(raw, rng).map(Self)
    }

    /// Blends `drive` into a new state: negative entries are clamped to 0,
    /// `uniform[0,1) * 0.1` noise is added to each, then the vector is
    /// renormalized. A degenerate sum falls back to a `Dirichlet(1, ..., 1)`
    /// draw.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        drive: &[f64; EMOTION_COUNT],
        rng: &mut R,
    ) -> Result<(), AuraError> {
        let mut raw = [0.0; EMOTION_COUNT];
        for (entry, base) in raw.iter_mut().zip(drive) {
            *entry = base.max(0.0) + rng.random::<f64>() * STATE_NOISE_SCALE;
        }
        self.0 = normalize_or_resample(raw, rng)?;
        Ok(())
    }

    pub fn probabilities(&self) -> &[f64; EMOTION_COUNT] {
        &self.0
    }

    pub fn get(&self, emotion: Emotion) -> f64 {
        self.0[emotion.index()]
    }

    /// Emotion carrying the most weight; the first one wins ties.
    pub fn dominant(&self) -> Emotion {
        dominant_of(&self.0)
    }
}

/// Emotion with the largest entry of `values`; the first one wins ties.
pub fn dominant_of(values: &[f64; EMOTION_COUNT]) -> Emotion {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    Emotion::ALL[best]
}

fn normalize_or_resample<R: Rng + ?Sized>(
    mut raw: [f64; EMOTION_COUNT],
    rng: &mut R,
) -> Result<[f64; EMOTION_COUNT], AuraError> {
    let sum: f64 = raw.iter().sum();
    if sum > 0.0 && sum.is_finite() {
        for entry in raw.iter_mut() {
            *entry /= sum;
        }
        return Ok(raw);
    }
    let dirichlet = Dirichlet::new([1.0; EMOTION_COUNT])
        .map_err(|e| AuraError::internal(format!("dirichlet fallback unavailable: {}", e)))?;
    Ok(dirichlet.sample(rng))
}

impl Serialize for EmotionState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(EMOTION_COUNT))?;
        for emotion in Emotion::ALL {
            map.serialize_entry(emotion.name(), &self.0[emotion.index()])?;
        }
        map.end()
    }
}

impl fmt::Display for EmotionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, emotion) in Emotion::ALL.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}={:.3}", emotion, self.0[i])?;
        }
        Ok(())
    }
}
