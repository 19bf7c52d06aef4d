use std::collections::BTreeMap;

use log::{info, warn};

use ingest::{DistanceClient, Record, RecordClient, TravelMode, parse_magnitude};

use crate::config::PipelineSpec;
use crate::features::FeatureSet;
use crate::model::FittedModel;
use crate::normalize::normalize;
use crate::split::split;
use crate::train::fit;
use crate::{PipelineErr, Result};

/// One client session's pipeline state.
///
/// The session owns the (eventual) fitted model and the last user-facing
/// error message; every mutation goes through its methods. Until training
/// succeeds the session is not ready and predictions fail fast instead of
/// running a forward pass against nothing.
pub struct PipelineSession {
    spec: PipelineSpec,
    features: FeatureSet,
    model: Option<FittedModel>,
    last_error: Option<String>,
}

impl PipelineSession {
    /// Creates a new, not-yet-trained session. The feature descriptor is
    /// resolved from the spec once, here.
    pub fn new(spec: PipelineSpec) -> Self {
        let features = FeatureSet::new(spec.features.clone(), spec.target.clone());

        Self {
            spec,
            features,
            model: None,
            last_error: None,
        }
    }

    pub fn ready(&self) -> bool {
        self.model.is_some()
    }

    pub fn model(&self) -> Option<&FittedModel> {
        self.model.as_ref()
    }

    /// The message recorded for the most recent failure, if the last
    /// operation failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Fetches the historical corpus and trains on it.
    ///
    /// Any failure (fetch, filtering, split, fitting) is funneled into the
    /// recorded error message and leaves the session not ready. There is no
    /// automatic retry.
    pub async fn initialize(&mut self, records: &RecordClient) -> Result<()> {
        let records = match records.fetch().await {
            Ok(records) => records,
            Err(e) => return self.fail(PipelineErr::UpstreamFetch(e)),
        };

        self.train_on(&records)
    }

    /// Runs normalize → split → fit on an already-loaded corpus.
    pub fn train_on(&mut self, records: &[Record]) -> Result<()> {
        self.model = None;

        match self.run_training(records) {
            Ok(model) => {
                self.last_error = None;
                self.model = Some(model);
                info!("pipeline ready");
                Ok(())
            }
            Err(e) => self.fail(e),
        }
    }

    fn run_training(&self, records: &[Record]) -> Result<FittedModel> {
        let (rows, factors) = normalize(records, &self.features)?;
        let partition = split(rows);
        fit(&self.spec, &self.features, factors, &partition)
    }

    /// Predicts from raw inputs.
    ///
    /// Fails fast with `ModelNotReady` until training has succeeded.
    /// Recoverable per-call failures are recorded but leave the fitted model
    /// usable for the next call.
    pub fn predict(&mut self, inputs: &BTreeMap<String, f64>) -> Result<f64> {
        let Some(model) = &self.model else {
            self.last_error = Some(PipelineErr::ModelNotReady.to_string());
            return Err(PipelineErr::ModelNotReady);
        };

        match model.predict(inputs) {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(e) => {
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Resolves a route into the numeric distance feature the rate model
    /// consumes: endpoint call, then magnitude parse of the display text.
    pub async fn resolve_distance(
        &mut self,
        client: &DistanceClient,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<f64> {
        let report = match client.resolve(origin, destination, mode).await {
            Ok(report) => report,
            Err(e) => return self.fail(PipelineErr::UpstreamDistance(e)),
        };

        match parse_magnitude(&report.distance) {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(e) => self.fail(PipelineErr::UpstreamDistance(e)),
        }
    }

    fn fail<T>(&mut self, err: PipelineErr) -> Result<T> {
        warn!("pipeline error: {err}");
        self.last_error = Some(err.to_string());
        Err(err)
    }
}
