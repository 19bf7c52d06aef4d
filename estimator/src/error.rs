use std::{
    error::Error,
    fmt::{self, Display},
};

use ingest::IngestErr;
use regression::RegressionErr;

/// The result type used across the estimator crate.
pub type Result<T> = std::result::Result<T, PipelineErr>;

/// Pipeline failures.
///
/// Training-side variants (`EmptyDataset`, `TrainingData`, upstream wrappers)
/// are fatal to that training attempt and leave the session not ready.
/// Prediction-side variants (`InvalidInput`, `MissingFeature`,
/// `PredictionNan`) are rejected per call and keep the fitted model usable.
#[derive(Debug)]
pub enum PipelineErr {
    /// No usable records survived filtering.
    EmptyDataset,

    /// The split produced an empty training partition.
    TrainingData,

    /// A prediction input was not a finite number.
    InvalidInput { feature: String },

    /// A required feature was absent from the prediction request.
    MissingFeature { feature: String },

    /// The forward pass produced NaN; callers substitute a fallback.
    PredictionNan,

    /// Prediction was attempted before a model was trained.
    ModelNotReady,

    /// The record collection could not be fetched.
    UpstreamFetch(IngestErr),

    /// The distance endpoint failed or returned unusable text.
    UpstreamDistance(IngestErr),

    /// An invariant was violated inside the numeric core.
    Regression(RegressionErr),
}

impl Display for PipelineErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineErr::EmptyDataset => write!(f, "no valid records to train on"),
            PipelineErr::TrainingData => write!(f, "training partition is empty"),
            PipelineErr::InvalidInput { feature } => {
                write!(f, "input for {feature:?} is not a finite number")
            }
            PipelineErr::MissingFeature { feature } => {
                write!(f, "prediction request is missing feature {feature:?}")
            }
            PipelineErr::PredictionNan => write!(f, "prediction produced NaN"),
            PipelineErr::ModelNotReady => write!(f, "model is not trained yet"),
            PipelineErr::UpstreamFetch(e) => write!(f, "record fetch failed: {e}"),
            PipelineErr::UpstreamDistance(e) => write!(f, "distance resolution failed: {e}"),
            PipelineErr::Regression(e) => write!(f, "regression core error: {e}"),
        }
    }
}

impl Error for PipelineErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineErr::UpstreamFetch(e) | PipelineErr::UpstreamDistance(e) => Some(e),
            PipelineErr::Regression(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RegressionErr> for PipelineErr {
    fn from(value: RegressionErr) -> Self {
        Self::Regression(value)
    }
}
