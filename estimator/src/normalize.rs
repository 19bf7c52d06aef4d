use log::debug;

use ingest::Record;

use crate::features::{FeatureSet, NormalizedRow, ScalingFactors};
use crate::{PipelineErr, Result};

/// Filters and rescales the raw corpus.
///
/// Records missing any feature or the target are dropped; each surviving
/// feature column is divided by its maximum over the *filtered* corpus, with
/// 1.0 substituted when that maximum is zero or non-finite so all-zero
/// columns pass through unscaled. Targets are never rescaled. The source
/// slice is left untouched.
///
/// # Errors
/// `PipelineErr::EmptyDataset` when no record survives filtering.
pub fn normalize(
    records: &[Record],
    features: &FeatureSet,
) -> Result<(Vec<NormalizedRow>, ScalingFactors)> {
    let mut kept: Vec<(Vec<f64>, f64)> = Vec::with_capacity(records.len());
    for record in records {
        if let Some(row) = features.project(record) {
            kept.push(row);
        }
    }

    if kept.is_empty() {
        return Err(PipelineErr::EmptyDataset);
    }
    debug!(kept = kept.len(), dropped = records.len() - kept.len(); "corpus filtered");

    let mut factors = vec![f64::NEG_INFINITY; features.len()];
    for (values, _) in &kept {
        for (factor, value) in factors.iter_mut().zip(values) {
            *factor = factor.max(*value);
        }
    }
    for factor in &mut factors {
        if !factor.is_finite() || *factor <= 0.0 {
            *factor = 1.0;
        }
    }
    let factors = ScalingFactors::new(factors);

    let rows = kept
        .into_iter()
        .map(|(values, target)| NormalizedRow {
            features: values
                .iter()
                .enumerate()
                .map(|(i, v)| (v / factors.factor(i)) as f32)
                .collect(),
            target: target as f32,
        })
        .collect();

    Ok((rows, factors))
}
