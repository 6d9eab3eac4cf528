//! imghost — minimal image hosting service.
//!
//! Authenticated uploads are content-sniffed, renamed to random URL-safe
//! tokens, and stored in a flat directory; files are served back directly
//! or wrapped in an HTML embed page.
//!
//! This library exposes internals for integration testing. The entry point
//! for running the server is the `imghost` binary.

pub mod audit;
pub mod config;
pub mod error;
pub mod image;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use state::AppState;

/// Build the application router.
///
/// Only the upload endpoint sits behind the API key gate; file serving and
/// the embed page are public.
pub fn app(state: AppState) -> Router {
    let uploads = routes::upload::router().route_layer(axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::require_api_key,
    ));

    Router::new()
        .merge(uploads)
        .merge(routes::files::router())
        .merge(routes::embed::router())
        .merge(routes::health::router())
        .layer(DefaultBodyLimit::max(state.config().max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
