use std::sync::Arc;

use axum::Router;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::{self, TraceLayer}};
use tracing::Level;

use crate::{routes::modeling_routes, services::modeling_service::ModelingService};

///
/// Builds the served router: the modeling routes nested under `api_path`,
/// wrapped in panic recovery, request tracing and the cross-origin policy.
/// A handler that panics answers 500 and the server keeps serving.
///
pub fn app(api_path: &str, modeling_service: Arc<dyn ModelingService>, cors: CorsLayer) -> Router {
    Router::new()
        // Routes
        .nest(api_path, modeling_routes::routes(modeling_service))
        // Panic recovery
        .layer(CatchPanicLayer::new())
        // Logging
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(trace::DefaultMakeSpan::new().level(Level::INFO))
                .on_response(trace::DefaultOnResponse::new().level(Level::INFO))
        )
        // Cross-origin policy
        .layer(cors)
}
