use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used across the regression crate.
pub type Result<T> = std::result::Result<T, RegressionErr>;

/// Failures raised by the numeric core when an invariant is violated.
#[derive(Debug)]
pub enum RegressionErr {
    /// A slice or matrix did not have the expected extent.
    ShapeMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },

    /// A batch with zero rows was fed to a pass that needs data.
    EmptyBatch,

    /// A weight-initialization range could not be constructed.
    InvalidInit { what: &'static str },
}

impl Display for RegressionErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionErr::ShapeMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "shape mismatch for {what}: got {got}, expected {expected}"
            ),
            RegressionErr::EmptyBatch => write!(f, "batch has zero rows"),
            RegressionErr::InvalidInit { what } => {
                write!(f, "invalid initialization range for {what}")
            }
        }
    }
}

impl Error for RegressionErr {}
