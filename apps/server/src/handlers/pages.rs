use super::{PageQuery, reload_templates, render};
use crate::csp::Nonce;
use crate::state::AppState;
use axum::Extension;
use axum::extract::State;
use axum::response::Response;
use docsite_render::BasicPage;
use docsite_render::pages::{INDEX_PAGE, LICENSE_POLICY_PAGE};

pub(crate) async fn index(
    State(state): State<AppState>,
    Extension(nonce): Extension<Nonce>,
    query: PageQuery,
) -> Response {
    reload_templates(&state).await;
    render(&state, INDEX_PAGE, &BasicPage { base: query.base("Docsite", &nonce) })
}

pub(crate) async fn license_policy(
    State(state): State<AppState>,
    Extension(nonce): Extension<Nonce>,
    query: PageQuery,
) -> Response {
    reload_templates(&state).await;
    render(&state, LICENSE_POLICY_PAGE, &BasicPage { base: query.base("License Policy", &nonce) })
}
