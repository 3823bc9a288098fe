pub(crate) mod details;
pub(crate) mod error;
pub(crate) mod pages;

use crate::csp::Nonce;
use crate::state::AppState;
use axum::extract::{FromRequestParts, Query};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Response};
use docsite_domain::constants::{SEARCH_QUERY_PARAM, TAB_QUERY_PARAM};
use docsite_render::BasePage;
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, warn};

/// Query parameters every page understands.
///
/// Extraction never rejects: a repeated key keeps its first value and an undecodable query
/// string reads as empty, so pages fall back to their defaults instead of answering 400.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct PageQuery {
    pub(crate) tab: Option<String>,
    /// Search box echo.
    pub(crate) q: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for PageQuery {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let pairs = match Query::<Vec<(String, String)>>::try_from_uri(&parts.uri) {
            Ok(Query(pairs)) => pairs,
            Err(err) => {
                debug!(error = %err, "ignoring undecodable query string");
                Vec::new()
            }
        };
        Ok(Self::from_pairs(pairs))
    }
}

impl PageQuery {
    fn from_pairs(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                TAB_QUERY_PARAM => &mut query.tab,
                SEARCH_QUERY_PARAM => &mut query.q,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        query
    }

    pub(crate) fn base(&self, html_title: impl Into<String>, nonce: &Nonce) -> BasePage {
        BasePage {
            html_title: html_title.into(),
            query: self.q.clone().unwrap_or_default(),
            nonce: nonce.0.clone(),
        }
    }
}

/// Recompiles templates in development mode; a failed compile keeps serving the last good set.
///
/// The compile reads from disk, so it runs on the blocking pool.
pub(crate) async fn reload_templates(state: &AppState) {
    if !state.renderer.reload_enabled() {
        return;
    }
    let renderer = Arc::clone(&state.renderer);
    match tokio::task::spawn_blocking(move || renderer.reload_if_configured()).await {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!(error = %err, "serving previously compiled templates"),
        Err(err) => warn!(error = %err, "template reload task failed"),
    }
}

/// Renders a page, answering 500 with the fallback page when rendering fails.
pub(crate) fn render<T: Serialize>(state: &AppState, page: &str, data: &T) -> Response {
    let rendered = state.renderer.render_or_fallback(page, data);
    let status = if rendered.is_fallback { StatusCode::INTERNAL_SERVER_ERROR } else { StatusCode::OK };
    (status, Html(rendered.body)).into_response()
}
