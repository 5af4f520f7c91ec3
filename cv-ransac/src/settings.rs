use crate::{Error, Result};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// The stopping criteria of the RANSAC loop.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RansacSettings {
    /// The desired probability that at least one drawn sample is free of outliers
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_probability"))]
    pub probability: f64,
    /// The maximum number of hypotheses evaluated, regardless of the estimate
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_max_evaluations"))]
    pub max_evaluations: usize,
    /// The maximum number of samples drawn while looking for a non-degenerate one
    #[cfg_attr(feature = "serde-serialize", serde(default = "default_max_samplings"))]
    pub max_samplings: usize,
}

impl RansacSettings {
    pub fn validate(&self) -> Result<()> {
        if !(self.probability > 0.0 && self.probability < 1.0) {
            return Err(Error::InvalidProbability(self.probability));
        }
        if self.max_evaluations == 0 {
            return Err(Error::ZeroEvaluations);
        }
        if self.max_samplings == 0 {
            return Err(Error::ZeroSamplings);
        }
        Ok(())
    }
}

impl Default for RansacSettings {
    fn default() -> Self {
        Self {
            probability: default_probability(),
            max_evaluations: default_max_evaluations(),
            max_samplings: default_max_samplings(),
        }
    }
}

fn default_probability() -> f64 {
    0.99
}

fn default_max_evaluations() -> usize {
    1000
}

fn default_max_samplings() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(RansacSettings::default().validate(), Ok(()));
    }

    #[test]
    fn invalid_settings() {
        let settings = RansacSettings::default();
        for probability in [0.0, 1.0, -0.5, f64::NAN] {
            let invalid = RansacSettings {
                probability,
                ..settings
            };
            assert!(matches!(
                invalid.validate(),
                Err(Error::InvalidProbability(_))
            ));
        }
        let invalid = RansacSettings {
            max_evaluations: 0,
            ..settings
        };
        assert_eq!(invalid.validate(), Err(Error::ZeroEvaluations));
        let invalid = RansacSettings {
            max_samplings: 0,
            ..settings
        };
        assert_eq!(invalid.validate(), Err(Error::ZeroSamplings));
    }
}
