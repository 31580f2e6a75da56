use super::ProblemError;
use crate::domain::constants::RESPONSE_TIME_HEADER;
use crate::problem::{
    ProblemDetails, ProblemMapper, apply_defaults, detail_for_status,
    internal_server_error_problem,
};
use axum::extract::{Request, State};
use axum::http::{HeaderValue, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use std::any::Any;
use std::time::Instant;
use tracing::error;

/// Shared, immutable state of the problem middleware.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProblemContext {
    pub mapper: ProblemMapper,
    /// Adds stack traces to responses when set.
    pub is_development: bool,
}

impl ProblemContext {
    #[must_use]
    pub const fn new(is_development: bool) -> Self {
        Self { mapper: ProblemMapper::new(), is_development }
    }
}

/// Renders failed responses as `application/problem+json`.
///
/// Responses carrying a [`ProblemError`] are logged and mapped through the
/// [`ProblemMapper`]. Bodiless error responses (router 404/405 and the like)
/// become the defaulted problem for their status.
pub async fn problem_details_middleware(
    State(ctx): State<ProblemContext>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let instance = request
        .uri()
        .path_and_query()
        .map_or_else(|| request.uri().path().to_owned(), ToString::to_string);

    let mut response = next.run(request).await;

    if let Some(err) = response.extensions_mut().remove::<ProblemError>() {
        let source = err.source();
        error!(
            %method,
            path = %instance,
            message = source.message().as_deref().unwrap_or("Unknown error"),
            stack = source.stack_trace().as_deref(),
            "Request failed"
        );
        return ctx.mapper.resolve(source, &instance, ctx.is_development).into_response();
    }

    let status = response.status();
    if (status.is_client_error() || status.is_server_error())
        && !response.headers().contains_key(header::CONTENT_TYPE)
    {
        let code = status.as_u16();
        let problem = apply_defaults(
            ProblemDetails::new().with_detail(detail_for_status(code)).with_instance(instance),
            Some(code),
        );
        let allow = response.headers_mut().remove(header::ALLOW);
        let mut rendered = problem.into_response();
        if let Some(allow) = allow {
            rendered.headers_mut().insert(header::ALLOW, allow);
        }
        return rendered;
    }

    response
}

/// `CatchPanicLayer::custom` handler: a panicking handler yields a 500 problem.
#[allow(clippy::needless_pass_by_value)]
pub fn panic_problem_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let reason = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic payload");
    error!(panic = reason, "Request handler panicked");

    apply_defaults(internal_server_error_problem(None), None).into_response()
}

/// Adds the handling time in milliseconds as `x-response-time`.
pub async fn response_time_middleware(request: Request, next: Next) -> Response {
    let started = Instant::now();
    let mut response = next.run(request).await;
    let elapsed = started.elapsed().as_secs_f64() * 1000.0;

    if let Ok(value) = HeaderValue::from_str(&format!("{elapsed:.3}ms")) {
        response.headers_mut().insert(RESPONSE_TIME_HEADER, value);
    }
    response
}
