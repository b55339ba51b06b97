use axum::{response::{IntoResponse, Response}, http::StatusCode};
use log::error;
use thiserror::Error;

use crate::services::{distributions::error::DistributionError, sampler::error::SamplerError};

pub type Result<T> = std::result::Result<T, ModelingServiceError>;

#[derive(Debug, Error)]
pub enum ModelingServiceError {
    #[error("{0}")]
    SamplerError(SamplerError),
    #[error("An internal server error occured")]
    DistributionError(DistributionError),
    #[error("An internal server error occured")]
    TaskFailed(String),
}

impl From<SamplerError> for ModelingServiceError {
    fn from(e: SamplerError) -> Self {
        ModelingServiceError::SamplerError(e)
    }
}

impl From<DistributionError> for ModelingServiceError {
    fn from(e: DistributionError) -> Self {
        ModelingServiceError::DistributionError(e)
    }
}

impl IntoResponse for ModelingServiceError {
    fn into_response(self) -> Response {
        match self {
            ModelingServiceError::SamplerError(SamplerError::InvalidRequest { .. }) => {
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            },
            ModelingServiceError::SamplerError(SamplerError::Cancelled) => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string()).into_response()
            },
            _ => {
                error!("{:?}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal server error occured").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let invalid: ModelingServiceError = SamplerError::InvalidRequest { field: "trials", value: 0, max: 10 }.into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let cancelled: ModelingServiceError = SamplerError::Cancelled.into();
        assert_eq!(cancelled.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);

        let incomplete: ModelingServiceError = SamplerError::Incomplete { expected: 4, received: 3 }.into();
        assert_eq!(incomplete.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);

        let dist: ModelingServiceError = DistributionError::InvalidParameters("sigma".into()).into();
        assert_eq!(dist.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
