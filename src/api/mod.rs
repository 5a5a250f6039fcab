mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::BridgeConfig;

pub use handlers::{ErrorBody, FileQuery, ProjectQuery};

/// Largest export request accepted; a full place can carry a lot of source.
pub const MAX_EXPORT_BODY: usize = 64 * 1024 * 1024;

pub fn create_router(config: BridgeConfig) -> Router {
    Router::new()
        .route(
            "/export",
            post(handlers::export_scripts).fallback(handlers::export_wrong_method),
        )
        .route("/manifest", get(handlers::get_manifest))
        .route("/file", get(handlers::get_file))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(DefaultBodyLimit::max(MAX_EXPORT_BODY)),
        )
        .with_state(config)
}
