use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{IngestErr, Result};

/// Travel mode forwarded to the distance endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
    Bicycling,
    Transit,
}

#[derive(Debug, Serialize)]
struct DistanceQuery<'a> {
    origin: &'a str,
    destination: &'a str,
    mode: TravelMode,
}

/// Response payload of the distance endpoint, passed through verbatim from
/// the upstream mapping provider. `distance` and `duration` are display
/// strings such as "1,234 km"; see [`parse_magnitude`].
#[derive(Debug, Clone, Deserialize)]
pub struct DistanceReport {
    pub origin: String,
    pub destination: String,
    pub mode: String,
    pub distance: String,
    pub duration: String,
    pub status: String,
}

/// Async client for the distance-resolution endpoint.
pub struct DistanceClient {
    http: reqwest::Client,
    endpoint: String,
}

impl DistanceClient {
    /// Creates a new `DistanceClient`.
    ///
    /// # Arguments
    /// * `endpoint` - Full URL of the distance endpoint.
    /// * `timeout` - Per-request deadline.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Resolves the route between two cities.
    ///
    /// # Errors
    /// `IngestErr::Http` on transport failures; `IngestErr::Status` for the
    /// endpoint's 400 (missing parameters) and 500 (upstream failure)
    /// answers.
    pub async fn resolve(
        &self,
        origin: &str,
        destination: &str,
        mode: TravelMode,
    ) -> Result<DistanceReport> {
        debug!("resolving distance {origin} -> {destination}");

        let body = DistanceQuery {
            origin,
            destination,
            mode,
        };
        let response = self.http.post(&self.endpoint).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(IngestErr::Status {
                code: status.as_u16(),
            });
        }

        Ok(response.json::<DistanceReport>().await?)
    }
}

/// Parses the numeric magnitude out of a distance or duration string,
/// dropping thousands separators and the unit suffix: "1,234 km" -> 1234.0.
pub fn parse_magnitude(text: &str) -> Result<f64> {
    let numeric: String = text
        .trim_start()
        .chars()
        .filter(|c| *c != ',')
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    numeric
        .parse::<f64>()
        .map_err(|_| IngestErr::DistanceFormat {
            text: text.to_string(),
        })
}
