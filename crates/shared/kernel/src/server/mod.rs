//! Axum integration: problem responses, error middleware and system routes.

mod health;
mod middleware;
mod response;

pub use health::{HealthResponse, health_handler};
pub use middleware::{
    ProblemContext, panic_problem_response, problem_details_middleware, response_time_middleware,
};
pub use response::ProblemError;

use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes every service exposes outside the versioned API.
pub fn system_router<S>() -> OpenApiRouter<S>
where
    S: Send + Sync + Clone + 'static,
{
    OpenApiRouter::<S>::new().routes(routes!(health::health_handler))
}
