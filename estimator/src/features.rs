use ingest::Record;

/// Ordered feature descriptor, resolved once when a pipeline is built.
///
/// The order of `names` is the assembly order of model inputs at both
/// training and prediction time; permuting it changes what a fitted model
/// computes, so the set is immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    names: Vec<String>,
    target: String,
}

impl FeatureSet {
    /// Creates a new `FeatureSet`.
    ///
    /// # Panics
    /// If `names` is empty.
    pub fn new<I, S>(names: I, target: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        assert!(!names.is_empty(), "feature set must name at least one feature");

        Self {
            names,
            target: target.into(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Projects a record onto the feature order.
    ///
    /// Returns the feature values and the target, or `None` when any needed
    /// field is missing, null, or non-numeric; such records are dropped
    /// before normalization.
    pub fn project(&self, record: &Record) -> Option<(Vec<f64>, f64)> {
        let mut values = Vec::with_capacity(self.names.len());
        for name in &self.names {
            values.push(record.numeric(name)?);
        }

        let target = record.numeric(&self.target)?;
        Some((values, target))
    }
}

/// Per-feature divisors frozen at normalization time, aligned with the
/// owning `FeatureSet`'s order.
///
/// Factors are computed once from the filtered corpus and reused verbatim at
/// prediction time; recomputing them against a different corpus would change
/// what the fitted parameters mean.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingFactors {
    factors: Vec<f64>,
}

impl ScalingFactors {
    pub(crate) fn new(factors: Vec<f64>) -> Self {
        Self { factors }
    }

    pub fn factor(&self, index: usize) -> f64 {
        self.factors[index]
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.factors
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

/// One record after normalization: features divided by their factors, the
/// target carried through unscaled.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    pub features: Vec<f32>,
    pub target: f32,
}
