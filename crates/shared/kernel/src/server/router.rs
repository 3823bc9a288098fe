use super::health;
use axum::Router;
use axum::routing::get;

/// Routes every deployment exposes regardless of its state type.
pub fn system_router<S>() -> Router<S>
where
    S: Send + Sync + Clone + 'static,
{
    Router::<S>::new().route("/health", get(health::health_handler))
}
