use std::collections::BTreeMap;

use ndarray::Array2;

use regression::Sequential;

use crate::config::RoundingSpec;
use crate::features::{FeatureSet, ScalingFactors};
use crate::{PipelineErr, Result};

/// The output of training: the architecture, its final parameters, and the
/// frozen context (feature order, scaling factors, rounding unit) needed to
/// reproduce predictions.
///
/// Instances live for one session. They are never persisted and never shared
/// across sessions, because the scaling factors are corpus-dependent.
pub struct FittedModel {
    arch: Sequential,
    params: Vec<f32>,
    features: FeatureSet,
    factors: ScalingFactors,
    rounding: RoundingSpec,
}

impl FittedModel {
    pub(crate) fn new(
        arch: Sequential,
        params: Vec<f32>,
        features: FeatureSet,
        factors: ScalingFactors,
        rounding: RoundingSpec,
    ) -> Self {
        Self {
            arch,
            params,
            features,
            factors,
            rounding,
        }
    }

    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    pub fn factors(&self) -> &ScalingFactors {
        &self.factors
    }

    pub fn params(&self) -> &[f32] {
        &self.params
    }

    /// Predicts from raw, unnormalized inputs.
    ///
    /// Inputs are normalized with the factors frozen at training time and
    /// assembled in the feature set's order, the same order the model was
    /// trained with.
    ///
    /// # Errors
    /// `InvalidInput` for non-finite values, `MissingFeature` when a
    /// required feature is absent, `PredictionNan` when the forward pass
    /// degenerates. All three are per-call failures; the model stays usable.
    pub fn predict(&self, inputs: &BTreeMap<String, f64>) -> Result<f64> {
        for (feature, value) in inputs {
            if !value.is_finite() {
                return Err(PipelineErr::InvalidInput {
                    feature: feature.clone(),
                });
            }
        }

        let mut scaled = Vec::with_capacity(self.features.len());
        for (i, name) in self.features.names().iter().enumerate() {
            let raw = inputs.get(name).ok_or_else(|| PipelineErr::MissingFeature {
                feature: name.clone(),
            })?;
            scaled.push((raw / self.factors.factor(i)) as f32);
        }

        let x = Array2::from_shape_vec((1, self.features.len()), scaled).unwrap();
        let y = self.arch.infer(&self.params, x.view())?;

        let out = y[[0, 0]] as f64;
        if out.is_nan() {
            return Err(PipelineErr::PredictionNan);
        }

        Ok(self.rounding.apply(out))
    }
}

#[cfg(test)]
mod tests {
    use regression::arch::layers::Dense;

    use super::*;

    /// Affine model with distinct per-feature weights (1 and 10), zero bias,
    /// unit factors.
    fn hand_model(order: [&str; 2], params: Vec<f32>) -> FittedModel {
        FittedModel::new(
            Sequential::new([Dense::new((2, 1), None)]),
            params,
            FeatureSet::new(order, "Y"),
            ScalingFactors::new(vec![1.0, 1.0]),
            RoundingSpec::new(1.0),
        )
    }

    fn inputs(a: f64, b: f64) -> BTreeMap<String, f64> {
        BTreeMap::from([("A".to_string(), a), ("B".to_string(), b)])
    }

    #[test]
    fn feature_order_changes_the_prediction() {
        let weights = vec![1.0, 10.0, 0.0];
        let ab = hand_model(["A", "B"], weights.clone());
        let ba = hand_model(["B", "A"], weights);

        let forward = ab.predict(&inputs(1.0, 2.0)).unwrap();
        let permuted = ba.predict(&inputs(1.0, 2.0)).unwrap();

        assert_eq!(forward, 21.0);
        assert_eq!(permuted, 12.0);
        assert_ne!(forward, permuted);
    }

    #[test]
    fn normalization_uses_frozen_factors() {
        let model = FittedModel::new(
            Sequential::new([Dense::new((2, 1), None)]),
            vec![1.0, 1.0, 0.0],
            FeatureSet::new(["A", "B"], "Y"),
            ScalingFactors::new(vec![4.0, 2.0]),
            RoundingSpec::new(1.0),
        );

        // (8 / 4) + (2 / 2)
        assert_eq!(model.predict(&inputs(8.0, 2.0)).unwrap(), 3.0);
    }

    #[test]
    fn non_finite_input_is_rejected() {
        let model = hand_model(["A", "B"], vec![1.0, 10.0, 0.0]);

        let err = model.predict(&inputs(f64::NAN, 2.0)).unwrap_err();
        assert!(matches!(err, PipelineErr::InvalidInput { feature } if feature == "A"));

        let err = model.predict(&inputs(1.0, f64::INFINITY)).unwrap_err();
        assert!(matches!(err, PipelineErr::InvalidInput { feature } if feature == "B"));
    }

    #[test]
    fn absent_feature_is_rejected() {
        let model = hand_model(["A", "B"], vec![1.0, 10.0, 0.0]);
        let partial = BTreeMap::from([("A".to_string(), 1.0)]);

        let err = model.predict(&partial).unwrap_err();
        assert!(matches!(err, PipelineErr::MissingFeature { feature } if feature == "B"));
    }

    #[test]
    fn nan_forward_pass_is_a_typed_error() {
        // Diverged training leaves NaN parameters behind.
        let model = hand_model(["A", "B"], vec![f32::NAN, f32::NAN, f32::NAN]);

        let err = model.predict(&inputs(1.0, 2.0)).unwrap_err();
        assert!(matches!(err, PipelineErr::PredictionNan));
    }

    #[test]
    fn model_survives_a_rejected_call() {
        let model = hand_model(["A", "B"], vec![1.0, 10.0, 0.0]);

        assert!(model.predict(&inputs(f64::NAN, 2.0)).is_err());
        assert_eq!(model.predict(&inputs(1.0, 2.0)).unwrap(), 21.0);
    }
}
