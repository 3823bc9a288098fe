use crate::csp;
use crate::handlers::{details, pages};
use crate::state::AppState;
use axum::Router;
use axum::middleware;
use axum::routing::get;
use docsite_domain::constants::MODULE_URL_PREFIX;
use docsite_kernel::server::router::system_router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub(crate) fn init(state: AppState) -> Router {
    let static_dir = state.config.templates.static_dir.clone();

    Router::new()
        .merge(system_router())
        .route("/", get(pages::index))
        .route("/license-policy", get(pages::license_policy))
        .route(&format!("/{MODULE_URL_PREFIX}/{{*path}}"), get(details::module_page))
        .route_service("/favicon.ico", ServeFile::new(static_dir.join("favicon.ico")))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(details::package_page)
        .layer(middleware::from_fn(csp::content_security_policy))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
