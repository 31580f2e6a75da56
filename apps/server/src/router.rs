use crate::docs;
use crate::state::AppState;
use crate::versioning::{VersionGuard, header_version_middleware};
use axum::extract::State;
use axum::http::{HeaderName, HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::get;
use axum::{Json, Router};
use catalog_domain::constants::SERVICE_TAG;
use catalog_domain::options::CorsOptions;
use catalog_kernel::problem::ProblemDetails;
use catalog_kernel::server::{
    ProblemContext, panic_problem_response, problem_details_middleware, response_time_middleware,
    system_router,
};
use serde::Serialize;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use utoipa::{OpenApi, ToSchema};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Response headers added unless a handler already set them.
const SECURITY_HEADERS: [(&str, &str); 7] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "SAMEORIGIN"),
    ("referrer-policy", "no-referrer"),
    ("cross-origin-opener-policy", "same-origin"),
    ("cross-origin-resource-policy", "same-origin"),
    ("x-dns-prefetch-control", "off"),
    ("strict-transport-security", "max-age=31536000; includeSubDomains"),
];

#[derive(OpenApi)]
#[openapi(components(schemas(ProblemDetails)))]
struct ApiDoc;

/// Service identity exposed under the versioned API.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct ServiceInfo {
    service_name: String,
    version: String,
    environment: String,
}

#[utoipa::path(
    get,
    path = "/info",
    responses(
        (status = OK, description = "Service name, version and environment", body = ServiceInfo),
        (status = NOT_FOUND, description = "Unsupported API version", body = ProblemDetails,
            content_type = "application/problem+json"),
        (status = INTERNAL_SERVER_ERROR, description = "Unexpected failure", body = ProblemDetails,
            content_type = "application/problem+json"),
    ),
    tag = SERVICE_TAG,
)]
#[allow(clippy::unused_async)]
async fn service_info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        service_name: state.app.service_name.clone(),
        version: state.app.version.clone().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_owned()),
        environment: state.config.environment().to_string(),
    })
}

#[allow(clippy::unused_async)]
async fn service_name(State(state): State<AppState>) -> String {
    state.app.service_name.clone()
}

fn api_router(guard: Option<VersionGuard>) -> OpenApiRouter<AppState> {
    let router = OpenApiRouter::new().routes(routes!(service_info));
    match guard {
        Some(guard) => router.layer(from_fn_with_state(guard, header_version_middleware)),
        None => router,
    }
}

pub(crate) fn init(state: AppState, guard: Option<VersionGuard>) -> Router {
    let problems = ProblemContext::new(state.config.environment().is_development());
    let base = state.api_base();

    let router = OpenApiRouter::with_openapi(ApiDoc::openapi()).merge(system_router());
    let router = if base.is_empty() {
        router.merge(api_router(guard))
    } else {
        router.nest(&base, api_router(guard))
    };
    let (router, api) = router.split_for_parts();

    let mut router = router.route("/", get(service_name));
    if let Some(swagger) = &state.swagger {
        info!(path = swagger.docs_path(), versions = ?swagger.versions, "Serving API reference");
        router = router.merge(docs::routes(&api, swagger));
    }

    let mut router = router
        .layer(CatchPanicLayer::custom(panic_problem_response))
        .layer(from_fn_with_state(problems, problem_details_middleware))
        .layer(from_fn(response_time_middleware));

    if let Some(cors) = cors_layer(&state.cors) {
        router = router.layer(cors);
    }
    for (name, value) in SECURITY_HEADERS {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ));
    }

    router
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `None` when no origins are configured.
fn cors_layer(options: &CorsOptions) -> Option<CorsLayer> {
    if options.allowed_origins.is_empty() {
        return None;
    }

    let wildcard = options.allowed_origins.iter().any(|origin| origin == "*");
    let origin = match (wildcard, options.use_credentials) {
        // Credentials forbid a literal `*`; echo the caller's origin instead.
        (true, true) => AllowOrigin::mirror_request(),
        (true, false) => AllowOrigin::from(Any),
        (false, _) => AllowOrigin::list(parse_all(&options.allowed_origins, "origin", |o| {
            HeaderValue::from_str(o).ok()
        })),
    };

    let mut layer = CorsLayer::new().allow_origin(origin).allow_credentials(options.use_credentials);

    if !options.allowed_methods.is_empty() {
        layer = layer.allow_methods(parse_all(&options.allowed_methods, "method", |m| {
            Method::from_bytes(m.to_ascii_uppercase().as_bytes()).ok()
        }));
    }
    if !options.allowed_headers.is_empty() {
        layer = layer.allow_headers(parse_all(&options.allowed_headers, "header", |h| {
            HeaderName::from_bytes(h.as_bytes()).ok()
        }));
    }

    Some(layer)
}

fn parse_all<T>(values: &[String], what: &str, parse: impl Fn(&str) -> Option<T>) -> Vec<T> {
    values
        .iter()
        .filter_map(|value| {
            let parsed = parse(value.trim());
            if parsed.is_none() {
                warn!(value = %value, kind = what, "Ignoring invalid CORS entry");
            }
            parsed
        })
        .collect()
}
