use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::response::Response;
use axum::routing::get;
use catalog_kernel::domain::constants::{PROBLEM_JSON_CONTENT_TYPE, RESPONSE_TIME_HEADER};
use catalog_kernel::problem::AppError;
use catalog_kernel::server::{
    ProblemContext, ProblemError, panic_problem_response, problem_details_middleware,
    response_time_middleware, system_router,
};
use serde_json::{Value, json};
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;

fn load_products() -> Result<&'static str, AppError> {
    Err(AppError::unclassified("boom"))
}

async fn failing() -> Result<&'static str, ProblemError> {
    Ok(load_products()?)
}

async fn missing_product() -> Result<&'static str, ProblemError> {
    Err(AppError::not_found("Product '42' not found").into())
}

async fn invalid_product() -> Result<&'static str, ProblemError> {
    Err(AppError::validation("Invalid product", ["name cannot be empty."]).into())
}

#[allow(clippy::unused_async)]
async fn panicking() -> &'static str {
    panic!("handler exploded")
}

fn app(is_development: bool) -> Router {
    Router::new()
        .route("/api/v1/products", get(failing))
        .route("/api/v1/products/42", get(missing_product))
        .route("/api/v1/invalid", get(invalid_product))
        .route("/api/v1/panic", get(panicking))
        .merge(system_router::<()>().split_for_parts().0)
        .layer(CatchPanicLayer::custom(panic_problem_response))
        .layer(from_fn_with_state(ProblemContext::new(is_development), problem_details_middleware))
        .layer(from_fn(response_time_middleware))
}

async fn send(router: Router, uri: &str) -> (Response, Value) {
    let response = router.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (Response::from_parts(parts, Body::empty()), value)
}

#[tokio::test]
async fn unclassified_error_renders_problem_json() {
    let (response, body) = send(app(false), "/api/v1/products").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.headers()[header::CONTENT_TYPE], PROBLEM_JSON_CONTENT_TYPE);
    assert_eq!(
        body,
        json!({
            "status": 500,
            "type": "https://tools.ietf.org/html/rfc9110#section-15.6.1",
            "title": "Error",
            "detail": "boom",
            "instance": "/api/v1/products"
        })
    );
}

#[tokio::test]
async fn development_responses_carry_the_stack() {
    let (response, body) = send(app(true), "/api/v1/products").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "boom");
    assert!(body["stackTrace"].as_str().is_some_and(|stack| !stack.is_empty()));
}

#[tokio::test]
async fn not_found_error_uses_its_kind() {
    let (response, body) = send(app(false), "/api/v1/products/42?expand=true").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "NotFound");
    assert_eq!(body["instance"], "/api/v1/products/42?expand=true");
}

#[tokio::test]
async fn validation_error_lists_errors() {
    let (response, body) = send(app(false), "/api/v1/invalid").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"], json!(["name cannot be empty."]));
}

#[tokio::test]
async fn unknown_route_becomes_default_problem() {
    let (response, body) = send(app(false), "/nowhere").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body["title"], "Not Found");
    assert_eq!(body["type"], "https://tools.ietf.org/html/rfc9110#section-15.5.5");
    assert_eq!(body["instance"], "/nowhere");
}

#[tokio::test]
async fn panics_become_internal_server_errors() {
    let (response, body) = send(app(true), "/api/v1/panic").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["title"], "Internal Server Error");
}

#[tokio::test]
async fn successful_responses_pass_through_with_timing() {
    let (response, body) = send(app(false), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body["status"], "up");
    assert!(response.headers().contains_key(RESPONSE_TIME_HEADER));
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store, no-cache, must-revalidate");
}

#[test]
fn system_routes_are_documented() {
    let (_, api) = system_router::<()>().split_for_parts();
    assert!(api.paths.paths.contains_key("/health"));
}
