pub mod config;
pub mod error;
pub mod features;
pub mod model;
pub mod normalize;
pub mod session;
pub mod split;
pub mod train;

pub use config::{ModelSpec, OptimizerSpec, PipelineSpec, RoundingSpec};
pub use error::{PipelineErr, Result};
pub use features::{FeatureSet, NormalizedRow, ScalingFactors};
pub use model::FittedModel;
pub use session::PipelineSession;
pub use split::TrainSplit;
