// Route path constants and router assembly

use axum::{routing::get, Router};
use reqwest::Url;
use tower_http::trace::TraceLayer;

use crate::handlers::{file_service, index_handler};
use crate::state::AppState;

pub const ROOT: &str = "/";

/// Build the router: the index on `/` plus one file service per route
///
/// Every file service owns its own copy of the route's file path. Paths that
/// match no file fall through to the index handler.
pub fn router(state: AppState) -> Router {
    // File names such as `:id.json` or `*.json` are literal paths here
    let mut router = Router::new()
        .without_v07_checks()
        .route(ROOT, get(index_handler));

    for route in state.routes.iter() {
        let path = request_path(&route.url_path);
        tracing::debug!("registering {} -> {}", path, route.file_path);
        router = router.route_service(&path, file_service(route));
    }

    router
        .fallback(index_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Percent-encode a route's URL path the way clients will request it
pub fn request_path(url_path: &str) -> String {
    let name = url_path.trim_start_matches('/');
    let Ok(mut url) = Url::parse("http://localhost/") else {
        return url_path.to_string();
    };

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.clear().push(name);
    }

    url.path().to_string()
}
