use std::time::Duration;

use log::{debug, info};

use crate::record::Record;
use crate::{IngestErr, Result};

/// Async client for a record-collection endpoint.
///
/// The endpoint returns the entire collection as one JSON array; there is no
/// pagination, so the whole corpus is loaded into memory.
pub struct RecordClient {
    http: reqwest::Client,
    endpoint: String,
}

impl RecordClient {
    /// Creates a new `RecordClient`.
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the collection endpoint.
    /// * `timeout` - Per-request deadline; a dead endpoint surfaces an error
    ///   instead of hanging the pipeline.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Fetches the full collection.
    ///
    /// # Errors
    /// `IngestErr::Http` on transport failures, `IngestErr::Status` when the
    /// endpoint answers with a non-success code.
    pub async fn fetch(&self) -> Result<Vec<Record>> {
        debug!("fetching records from {}", self.endpoint);

        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IngestErr::Status {
                code: status.as_u16(),
            });
        }

        let records = response.json::<Vec<Record>>().await?;
        info!(count = records.len(); "record collection loaded");
        Ok(records)
    }
}
