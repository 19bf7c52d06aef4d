use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

/// Architecture of the regression model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelSpec {
    /// A single affine layer, no nonlinearity.
    Linear,
    /// Fully-connected stack: ReLU on every hidden layer, one linear output
    /// unit at the end.
    Mlp { hidden: Vec<NonZeroUsize> },
}

/// The specification for the optimizer driving the epoch loop.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerSpec {
    GradientDescent {
        learning_rate: f32,
    },
    Adam {
        learning_rate: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
    },
}

/// Granularity the denormalized prediction is rounded to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoundingSpec {
    unit: f64,
}

impl RoundingSpec {
    /// Creates a new `RoundingSpec`.
    ///
    /// # Panics
    /// If `unit` is not strictly positive.
    pub fn new(unit: f64) -> Self {
        assert!(unit > 0.0, "rounding unit must be positive");
        Self { unit }
    }

    pub fn unit(&self) -> f64 {
        self.unit
    }

    /// Rounds `value` to the nearest multiple of the unit.
    pub fn apply(&self, value: f64) -> f64 {
        (value / self.unit).round() * self.unit
    }
}

/// Full configuration of one training-and-inference pipeline.
///
/// Feature order is significant: inputs are assembled in exactly this order
/// at training and prediction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    pub features: Vec<String>,
    pub target: String,
    pub model: ModelSpec,
    pub optimizer: OptimizerSpec,
    pub epochs: NonZeroUsize,
    pub rounding: RoundingSpec,
    /// Optional seed for deterministic parameter initialization.
    pub seed: Option<u64>,
}

impl PipelineSpec {
    /// Preset for the package-cost estimator: three raw dimensions, one
    /// affine layer, cost rounded to the nearest 100.
    pub fn cost() -> Self {
        Self {
            features: vec!["Height".into(), "Width".into(), "Weight".into()],
            target: "Cost".into(),
            model: ModelSpec::Linear,
            optimizer: OptimizerSpec::GradientDescent {
                learning_rate: 0.01,
            },
            epochs: NonZeroUsize::new(100).unwrap(),
            rounding: RoundingSpec::new(100.0),
            seed: None,
        }
    }

    /// Preset for the route-rate estimator: resolved distance plus four
    /// package dimensions, two ReLU hidden layers, rate rounded to the
    /// nearest integer.
    pub fn rate() -> Self {
        Self {
            features: vec![
                "Distance".into(),
                "Length".into(),
                "Width".into(),
                "Height".into(),
                "Weight".into(),
            ],
            target: "Rate".into(),
            model: ModelSpec::Mlp {
                hidden: vec![NonZeroUsize::new(64).unwrap(), NonZeroUsize::new(32).unwrap()],
            },
            optimizer: OptimizerSpec::Adam {
                learning_rate: 0.001,
                beta1: 0.9,
                beta2: 0.999,
                epsilon: 1e-8,
            },
            epochs: NonZeroUsize::new(400).unwrap(),
            rounding: RoundingSpec::new(1.0),
            seed: None,
        }
    }
}
