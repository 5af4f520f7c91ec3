#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The settings for symmetric k-nearest neighbor matching.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MatchSettings {
    /// The number of neighbors that vote when classifying a descriptor
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_k"))]
    pub k: usize,
    /// The score `Σ 1 / (1 + distance)` a match must exceed to be kept
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_threshold"))]
    pub threshold: f64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            k: default_k(),
            threshold: default_threshold(),
        }
    }
}

fn default_k() -> usize {
    5
}

fn default_threshold() -> f64 {
    0.01
}
