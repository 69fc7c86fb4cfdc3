use thiserror::Error;

/// Errors raised by function construction, tabulated point edits and
/// (de)serialization.
#[derive(Debug, Error)]
pub enum FunctionError {
    #[error("index {index} is out of range for {count} points")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("a point with x = {0} already exists")]
    DuplicatePoint(f64),

    #[error("x = {x} at index {index} overlaps a neighbouring point")]
    OverlapViolation { index: usize, x: f64 },

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
}

impl FunctionError {
    pub fn invalid_argument(message: impl Into<String>) -> FunctionError {
        FunctionError::InvalidArgument(message.into())
    }

    pub fn invariant_violation(message: impl Into<String>) -> FunctionError {
        FunctionError::InvariantViolation(message.into())
    }

    pub fn malformed_input(message: impl Into<String>) -> FunctionError {
        FunctionError::MalformedInput(message.into())
    }
}
