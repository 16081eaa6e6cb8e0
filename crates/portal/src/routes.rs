//! Route definitions and router construction.

use std::path::Path;

use axum::Router;
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers::{self, AppState};

/// API routes, mounted under `/api`.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/servers", get(handlers::servers::list))
        .route("/servers/{id}", get(handlers::servers::get))
        .route("/servers/{id}/readme", get(handlers::servers::readme))
        .route("/servers/{id}/snippets", get(handlers::servers::snippets))
}

/// Create the portal router: the JSON API plus the static front end.
///
/// Anything outside `/api` is looked up in `public_dir`; `/` serves its
/// `index.html`.
pub fn create_router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .nest("/api", api_routes().with_state(state))
        .fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
