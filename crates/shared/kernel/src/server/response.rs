use crate::domain::constants::PROBLEM_JSON_CONTENT_TYPE;
use crate::problem::{ProblemDetails, ProblemMapper, ProblemSource};
use axum::body::Body;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::fmt;
use std::sync::Arc;
use tracing::error;

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = self
            .status
            .and_then(|s| StatusCode::from_u16(s).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        match serde_json::to_vec(&self) {
            Ok(body) => (
                status,
                [(header::CONTENT_TYPE, HeaderValue::from_static(PROBLEM_JSON_CONTENT_TYPE))],
                body,
            )
                .into_response(),
            Err(err) => {
                error!(error = %err, "Failed to serialize problem details");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

/// Handler error carrying any [`ProblemSource`].
///
/// Rendering is deferred: the response only holds the error in its extensions
/// until [`super::problem_details_middleware`] turns it into problem details.
/// Without the middleware the response is an empty body with the mapped status.
#[derive(Clone)]
pub struct ProblemError(Arc<dyn ProblemSource>);

impl ProblemError {
    pub fn new(source: impl ProblemSource + 'static) -> Self {
        Self(Arc::new(source))
    }

    #[must_use]
    pub fn source(&self) -> &dyn ProblemSource {
        self.0.as_ref()
    }
}

impl fmt::Debug for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProblemError").field(&self.0).finish()
    }
}

impl<E: ProblemSource + 'static> From<E> for ProblemError {
    fn from(source: E) -> Self {
        Self::new(source)
    }
}

impl IntoResponse for ProblemError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(ProblemMapper::new().map_status_code(self.source()))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = Response::new(Body::empty());
        *response.status_mut() = status;
        response.extensions_mut().insert(self);
        response
    }
}
