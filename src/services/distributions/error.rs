use thiserror::Error;

pub type Result<T> = std::result::Result<T, DistributionError>;

#[derive(Debug, Error, PartialEq)]
pub enum DistributionError {
    #[error("Invalid distribution parameters: {0}")]
    InvalidParameters(String),
}
