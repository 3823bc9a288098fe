use crate::request::MalformedPath;
use crate::state::AppState;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use docsite_details::{DataSourceError, DetailsError};
use docsite_render::BasePage;
use tracing::{debug, error};

/// A failed page request: the status to answer with and an optional user-facing detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HttpError {
    pub(crate) status: StatusCode,
    pub(crate) detail: Option<String>,
    /// Logged, never shown.
    pub(crate) cause: String,
}

impl HttpError {
    fn new(status: StatusCode, detail: Option<String>, cause: impl ToString) -> Self {
        Self { status, detail, cause: cause.to_string() }
    }

    pub(crate) fn internal(cause: impl ToString) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, None, cause)
    }
}

impl From<DataSourceError> for HttpError {
    fn from(err: DataSourceError) -> Self {
        match &err {
            DataSourceError::NotFound { message, .. } => {
                Self::new(StatusCode::NOT_FOUND, Some(format!("{message} could not be found")), &err)
            }
            DataSourceError::InvalidArgument { message, .. } => {
                Self::new(StatusCode::BAD_REQUEST, Some(message.clone().into_owned()), &err)
            }
            DataSourceError::Unavailable { .. } | DataSourceError::Internal { .. } => {
                Self::internal(&err)
            }
        }
    }
}

impl From<DetailsError> for HttpError {
    fn from(err: DetailsError) -> Self {
        match err {
            DetailsError::DataSource { source, .. } => source.into(),
            DetailsError::Unsupported { ref message, .. } => {
                Self::new(StatusCode::FAILED_DEPENDENCY, Some(message.clone().into_owned()), &err)
            }
            DetailsError::UnknownTab { .. } | DetailsError::Internal { .. } => Self::internal(&err),
        }
    }
}

impl From<MalformedPath> for HttpError {
    fn from(err: MalformedPath) -> Self {
        Self::new(StatusCode::BAD_REQUEST, Some(err.message().to_owned()), err.message())
    }
}

/// Renders the error page for `err`. When even that fails the fallback page goes out with 500.
pub(crate) fn error_response(state: &AppState, base: BasePage, err: HttpError) -> Response {
    if err.status.is_server_error() {
        error!(status = %err.status, cause = %err.cause, "request failed");
    } else {
        debug!(status = %err.status, cause = %err.cause, "request rejected");
    }

    let rendered = state.renderer.render_error_page(err.status, err.detail.as_deref(), base);
    let status = if rendered.is_fallback { StatusCode::INTERNAL_SERVER_ERROR } else { err.status };
    (status, Html(rendered.body)).into_response()
}
