use thiserror::Error;

/// Error depicting errors that occur while classifying days, generating or labelling prices
///
#[derive(Debug, Error, PartialEq)]
pub enum PriceError {
    #[error("InvalidArgument: {0}")]
    InvalidArgument(String),
    #[error("LengthMismatch: expected {expected} prices, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}
