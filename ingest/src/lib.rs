pub mod distance;
pub mod error;
pub mod fetch;
pub mod record;

pub use distance::{DistanceClient, DistanceReport, TravelMode, parse_magnitude};
pub use error::{IngestErr, Result};
pub use fetch::RecordClient;
pub use record::Record;
