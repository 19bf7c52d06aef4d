use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used across the ingest crate.
pub type Result<T> = std::result::Result<T, IngestErr>;

/// Failures at the remote-endpoint boundary.
#[derive(Debug)]
pub enum IngestErr {
    /// Transport-level failure (connection, timeout, malformed body).
    Http(reqwest::Error),

    /// The endpoint answered with a non-success status code.
    Status { code: u16 },

    /// A distance string carried no parsable magnitude.
    DistanceFormat { text: String },
}

impl Display for IngestErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestErr::Http(e) => write!(f, "http error: {e}"),
            IngestErr::Status { code } => write!(f, "endpoint returned status {code}"),
            IngestErr::DistanceFormat { text } => {
                write!(f, "no numeric magnitude in distance text {text:?}")
            }
        }
    }
}

impl Error for IngestErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            IngestErr::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for IngestErr {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value)
    }
}
