// src/emotion/mod.rs

//! The eight named emotions, their base values, the encoder that turns a
//! felt emotion into circuit parameters, and the probability distribution
//! over emotions that evolves every cycle.

pub mod encoder;
pub mod state;

use crate::core::AuraError;
use crate::core::aura_constants::NEUTRAL_BASE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use encoder::{Encoder, ParameterVector};
pub use state::EmotionState;

/// Number of named emotions, and the length of every emotion vector.
pub const EMOTION_COUNT: usize = 8;

/// A named emotion. The declaration order is the index order of
/// [`EmotionState`] entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Joy,
    Fear,
    Anger,
    Sadness,
    Surprise,
    Disgust,
    Trust,
    Anticipation,
}

impl Emotion {
    /// Every emotion, in index order.
    pub const ALL: [Emotion; EMOTION_COUNT] = [
        Emotion::Joy,
        Emotion::Fear,
        Emotion::Anger,
        Emotion::Sadness,
        Emotion::Surprise,
        Emotion::Disgust,
        Emotion::Trust,
        Emotion::Anticipation,
    ];

    /// Fixed base value in `[0, 1]` the encoder centres its noise on.
    pub fn base(&self) -> f64 {
        match self {
            Emotion::Joy => 0.9,
            Emotion::Fear => 0.2,
            Emotion::Anger => 0.3,
            Emotion::Sadness => 0.1,
            Emotion::Surprise => 0.8,
            Emotion::Disgust => 0.15,
            Emotion::Trust => 0.7,
            Emotion::Anticipation => 0.6,
        }
    }

    /// Position in an emotion vector.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Lowercase label.
    pub fn name(&self) -> &'static str {
        match self {
            Emotion::Joy => "joy",
            Emotion::Fear => "fear",
            Emotion::Anger => "anger",
            Emotion::Sadness => "sadness",
            Emotion::Surprise => "surprise",
            Emotion::Disgust => "disgust",
            Emotion::Trust => "trust",
            Emotion::Anticipation => "anticipation",
        }
    }

    /// Dashboard colour associated with the emotion.
    pub fn color(&self) -> &'static str {
        match self {
            Emotion::Joy => "#FFD700",
            Emotion::Fear => "#4682B4",
            Emotion::Anger => "#DC143C",
            Emotion::Sadness => "#4169E1",
            Emotion::Surprise => "#FF8C00",
            Emotion::Disgust => "#228B22",
            Emotion::Trust => "#20B2AA",
            Emotion::Anticipation => "#FF69B4",
        }
    }

    /// Case-insensitive lookup; `None` for unknown labels.
    pub fn from_label(label: &str) -> Option<Emotion> {
        let label = label.trim();
        Emotion::ALL.into_iter().find(|e| e.name().eq_ignore_ascii_case(label))
    }

    /// Base value for any label, [`NEUTRAL_BASE`] when it is not recognized.
    pub fn base_for_label(label: &str) -> f64 {
        Emotion::from_label(label).map(|e| e.base()).unwrap_or(NEUTRAL_BASE)
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Emotion {
    type Err = AuraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::from_label(s)
            .ok_or_else(|| AuraError::invalid_input(format!("emotion '{}' is not recognized", s)))
    }
}

/// One row of the emotion catalogue, as listed to users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmotionInfo {
    pub name: &'static str,
    pub base: f64,
    pub color: &'static str,
}

/// The catalogue of supported emotions.
pub fn catalogue() -> Vec<EmotionInfo> {
    Emotion::ALL
        .iter()
        .map(|e| EmotionInfo { name: e.name(), base: e.base(), color: e.color() })
        .collect()
}
