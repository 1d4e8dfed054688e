//! Efficacy estimation
//!
//! A two-input, two-label classifier consulted once per candidate
//! treatment. Only the interface is a contract; the statistics behind the
//! forest are placeholder.

pub mod forest;

pub use forest::ForestEstimator;

use crate::config::{EstimatorConfig, EstimatorKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EstimatorError {
    #[error("Prediction failed: {0}")]
    Prediction(String),

    #[error("Training failed: {0}")]
    Training(String),
}

/// Binary efficacy label, serialized as the integer 0 or 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Efficacy {
    Low = 0,
    High = 1,
}

impl Efficacy {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl From<Efficacy> for u8 {
    fn from(e: Efficacy) -> Self {
        e.as_u8()
    }
}

impl TryFrom<u8> for Efficacy {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Efficacy::Low),
            1 => Ok(Efficacy::High),
            other => Err(format!("efficacy must be 0 or 1, got {}", other)),
        }
    }
}

impl fmt::Display for Efficacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Scores one (treatment, patient) pair
pub trait EfficacyEstimator: Send + Sync {
    fn predict(&self, treatment: &str, patient: &str) -> Result<Efficacy, EstimatorError>;
}

/// Always answers with one configured label
#[derive(Debug, Clone, Copy)]
pub struct FixedEstimator {
    label: Efficacy,
}

impl FixedEstimator {
    pub fn new(label: Efficacy) -> Self {
        Self { label }
    }
}

impl EfficacyEstimator for FixedEstimator {
    fn predict(&self, _treatment: &str, _patient: &str) -> Result<Efficacy, EstimatorError> {
        Ok(self.label)
    }
}

/// Build the configured estimator. The forest trains here, once.
pub fn from_config(config: &EstimatorConfig) -> Result<Arc<dyn EfficacyEstimator>, EstimatorError> {
    match config.kind {
        EstimatorKind::Forest => Ok(Arc::new(ForestEstimator::train(config)?)),
        EstimatorKind::Fixed => Ok(Arc::new(FixedEstimator::new(config.fixed_label))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_efficacy_serializes_as_integer() {
        assert_eq!(serde_json::to_string(&Efficacy::High).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Efficacy::Low).unwrap(), "0");
        assert_eq!(serde_json::from_str::<Efficacy>("1").unwrap(), Efficacy::High);
        assert!(serde_json::from_str::<Efficacy>("2").is_err());
        assert_eq!(Efficacy::High.to_string(), "1");
    }

    #[test]
    fn test_fixed_estimator() {
        let estimator = FixedEstimator::new(Efficacy::Low);
        assert_eq!(estimator.predict("Paracetamol", "Rohit"), Ok(Efficacy::Low));
    }

    #[test]
    fn test_from_config_fixed() {
        let config = EstimatorConfig {
            kind: EstimatorKind::Fixed,
            fixed_label: Efficacy::High,
            ..EstimatorConfig::default()
        };
        let estimator = from_config(&config).unwrap();
        assert_eq!(estimator.predict("Yoga", "Tanya"), Ok(Efficacy::High));
    }
}
