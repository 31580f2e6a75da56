//! Error-to-HTTP problem details mapping.
//!
//! Errors declare an [`ErrorKind`] through [`ProblemSource`]; the [`ProblemMapper`]
//! turns them into a [`ProblemDetails`] body which [`apply_defaults`] completes
//! from the per-status defaults table.

mod defaults;
mod error;
mod kind;
mod mapper;
mod utils;

pub use defaults::{
    ABOUT_BLANK, ProblemDefaults, available_status_codes, default_problem_details,
    detail_for_status, fallback_problem_details, has_default_problem_details, title_for_status,
    type_for_status,
};
pub use error::{AppError, set_stack_capture, stack_capture_enabled};
pub use kind::ErrorKind;
pub use mapper::{ProblemMapper, ProblemSource};
pub use utils::{
    apply_defaults, forbidden_problem, internal_server_error_problem, is_server_error,
    is_validation_problem, merge_problems, not_found_problem, unauthorized_problem,
    validation_problem,
};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Extension key holding the stack trace in development responses.
pub const STACK_TRACE_KEY: &str = "stackTrace";

/// RFC 9457 problem details body.
///
/// Every field is optional until [`apply_defaults`] fills `status`, `type` and `title`.
/// Unknown members round-trip through `extensions`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ProblemDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
    /// Field-level validation messages.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "server", schema(value_type = Option<Vec<Object>>))]
    pub errors: Option<Vec<Value>>,
    #[serde(flatten)]
    #[cfg_attr(feature = "server", schema(ignore))]
    pub extensions: Map<String, Value>,
}

impl ProblemDetails {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_type(mut self, type_uri: impl Into<String>) -> Self {
        self.type_uri = Some(type_uri.into());
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    #[must_use]
    pub fn with_errors<I, E>(mut self, errors: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Value>,
    {
        self.errors = Some(errors.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_extension(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extensions.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn stack_trace(&self) -> Option<&str> {
        self.extensions.get(STACK_TRACE_KEY).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_type_and_flattened_extensions() {
        let problem = ProblemDetails::new()
            .with_status(404)
            .with_type("https://example.com/not-found")
            .with_title("Not Found")
            .with_extension("traceId", "abc");

        let value = serde_json::to_value(&problem).expect("serializes");

        assert_eq!(
            value,
            json!({
                "status": 404,
                "type": "https://example.com/not-found",
                "title": "Not Found",
                "traceId": "abc"
            })
        );
    }

    #[test]
    fn unknown_members_land_in_extensions() {
        let problem: ProblemDetails = serde_json::from_value(json!({
            "status": 400,
            "errors": ["name must not be empty"],
            "stackTrace": "at main"
        }))
        .expect("deserializes");

        assert_eq!(problem.status, Some(400));
        assert_eq!(problem.errors, Some(vec![json!("name must not be empty")]));
        assert_eq!(problem.stack_trace(), Some("at main"));
    }
}
