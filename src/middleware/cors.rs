use axum::http::{HeaderValue, Method};
use tower_http::cors::CorsLayer;

use crate::settings::{CorsSettings, Result, SettingsError};

///
/// Builds the cross-origin policy from settings. Fails on any origin or
/// method that is not a valid header value.
///
pub fn cors_layer(settings: &CorsSettings) -> Result<CorsLayer> {
    let origins = settings
        .allow_origins
        .iter()
        .map(|o| o.parse::<HeaderValue>().map_err(|_| SettingsError::InvalidCors(o.clone())))
        .collect::<Result<Vec<_>>>()?;
    let methods = settings
        .allow_methods
        .iter()
        .map(|m| m.parse::<Method>().map_err(|_| SettingsError::InvalidCors(m.clone())))
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new().allow_origin(origins).allow_methods(methods))
}
