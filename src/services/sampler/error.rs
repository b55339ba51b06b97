use thiserror::Error;

pub type Result<T> = std::result::Result<T, SamplerError>;

#[derive(Debug, Error, PartialEq)]
pub enum SamplerError {
    #[error("Invalid request: `{field}` must be between 1 and {max}, got {value}")]
    InvalidRequest { field: &'static str, value: i64, max: i64 },
    #[error("Sampling batch was cancelled")]
    Cancelled,
    #[error("Sampling batch finished with {received} of {expected} samples")]
    Incomplete { expected: usize, received: usize },
    #[error("Sampling worker failed: {0}")]
    WorkerFailed(String),
}
