use std::error::Error;
use std::fmt;

/// Errors raised by the delay model core.
///
/// The core raises these typed errors and never converts them to transport
/// status codes itself; that mapping belongs to the serving boundary.
#[derive(Debug)]
pub enum DelayError {
    /// Caller input failed field-level validation (month range, flight type).
    Validation(String),
    /// A departure timestamp could not be parsed during label derivation.
    Parse(String),
    /// A training label set contained no delayed examples, so the
    /// positive-class weight is undefined.
    Imbalance,
    /// Predict was requested with no model ever trained or persisted.
    ModelNotReady,
    /// Saving or loading persisted model state failed.
    Persistence(String),
}

impl fmt::Display for DelayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DelayError::Validation(msg) => write!(f, "{}", msg),
            DelayError::Parse(msg) => write!(f, "invalid departure timestamp: {}", msg),
            DelayError::Imbalance => write!(
                f,
                "training labels contain no delayed flights; positive-class weight is undefined"
            ),
            DelayError::ModelNotReady => write!(
                f,
                "no trained model available; train one or provide a persisted model"
            ),
            DelayError::Persistence(msg) => write!(f, "model persistence failed: {}", msg),
        }
    }
}

impl Error for DelayError {}
