//! Normalization helpers and canned problems.

use super::{ProblemDetails, default_problem_details, fallback_problem_details};
use serde_json::Value;

const SERVER_TYPE_MARKERS: [&str; 5] = ["server", "database", "internal", "infrastructure", "timeout"];

/// Fills `status`, `type` and `title` where they are absent.
///
/// Status comes from the problem itself, then `fallback_status`, then the shape of
/// the problem (validation errors mean 400, everything else 500). Existing values
/// are never overwritten, so applying twice is the same as applying once.
#[must_use]
pub fn apply_defaults(mut problem: ProblemDetails, fallback_status: Option<u16>) -> ProblemDetails {
    let status = problem
        .status
        .or(fallback_status)
        .unwrap_or_else(|| derive_status(&problem));
    problem.status = Some(status);

    let defaults = default_problem_details(status).unwrap_or_else(|| fallback_problem_details(status));
    problem.type_uri.get_or_insert_with(|| defaults.type_uri.into_owned());
    problem.title.get_or_insert_with(|| defaults.title.into_owned());

    problem
}

fn derive_status(problem: &ProblemDetails) -> u16 {
    if is_validation_problem(problem) { 400 } else { 500 }
}

#[must_use]
pub fn is_validation_problem(problem: &ProblemDetails) -> bool {
    problem.errors.is_some()
}

/// `true` when the problem `type` names a server-side failure.
#[must_use]
pub fn is_server_error(problem: &ProblemDetails) -> bool {
    problem.type_uri.as_deref().is_some_and(|type_uri| {
        let type_uri = type_uri.to_lowercase();
        SERVER_TYPE_MARKERS.iter().any(|marker| type_uri.contains(marker))
    })
}

#[must_use]
pub fn validation_problem<I>(errors: I, detail: Option<&str>) -> ProblemDetails
where
    I: IntoIterator,
    I::Item: Into<Value>,
{
    ProblemDetails::new()
        .with_status(400)
        .with_type("https://tools.ietf.org/html/rfc9110#section-15.5.1")
        .with_title("Validation Error")
        .with_detail(detail.unwrap_or("One or more validation errors occurred"))
        .with_errors(errors)
}

#[must_use]
pub fn not_found_problem(resource: &str, id: Option<&str>) -> ProblemDetails {
    let detail = match id {
        Some(id) if !id.is_empty() => format!("The {resource} with ID '{id}' was not found."),
        _ => format!("The requested {resource} was not found."),
    };

    ProblemDetails::new()
        .with_status(404)
        .with_type("https://tools.ietf.org/html/rfc9110#section-15.5.5")
        .with_title("Not Found")
        .with_detail(detail)
}

#[must_use]
pub fn unauthorized_problem(detail: Option<&str>) -> ProblemDetails {
    ProblemDetails::new()
        .with_status(401)
        .with_type("https://tools.ietf.org/html/rfc9110#section-15.5.2")
        .with_title("Unauthorized")
        .with_detail(detail.unwrap_or("Authentication is required to access this resource."))
}

#[must_use]
pub fn forbidden_problem(detail: Option<&str>) -> ProblemDetails {
    ProblemDetails::new()
        .with_status(403)
        .with_type("https://tools.ietf.org/html/rfc9110#section-15.5.4")
        .with_title("Forbidden")
        .with_detail(detail.unwrap_or("You do not have permission to access this resource."))
}

#[must_use]
pub fn internal_server_error_problem(detail: Option<&str>) -> ProblemDetails {
    let detail = detail
        .filter(|d| !d.is_empty())
        .unwrap_or("An unexpected error occurred while processing your request.");

    ProblemDetails::new()
        .with_status(500)
        .with_type("https://tools.ietf.org/html/rfc9110#section-15.6.1")
        .with_title("Internal Server Error")
        .with_detail(detail)
}

/// Folds partial problems into one, later parts winning.
///
/// Starts at status 500; a later status replaces it only when it is an error
/// status (>= 400).
#[must_use]
pub fn merge_problems<I>(partials: I) -> ProblemDetails
where
    I: IntoIterator<Item = ProblemDetails>,
{
    let mut result = ProblemDetails::new().with_status(500);

    for partial in partials {
        if let Some(status) = partial.status.filter(|s| *s >= 400) {
            result.status = Some(status);
        }
        if partial.type_uri.is_some() {
            result.type_uri = partial.type_uri;
        }
        if partial.title.is_some() {
            result.title = partial.title;
        }
        if partial.detail.is_some() {
            result.detail = partial.detail;
        }
        if partial.instance.is_some() {
            result.instance = partial.instance;
        }
        if partial.errors.is_some() {
            result.errors = partial.errors;
        }
        result.extensions.extend(partial.extensions);
    }

    apply_defaults(result, None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_status_from_shape() {
        let validation = apply_defaults(ProblemDetails::new().with_errors(["x"]), None);
        assert_eq!(validation.status, Some(400));
        assert_eq!(validation.title.as_deref(), Some("Bad Request"));

        let server = apply_defaults(ProblemDetails::new().with_type("https://err/database"), None);
        assert_eq!(server.status, Some(500));
        assert_eq!(server.type_uri.as_deref(), Some("https://err/database"));
        assert_eq!(server.title.as_deref(), Some("Internal Server Error"));
    }

    #[test]
    fn fallback_status_is_used_only_when_absent() {
        let problem = apply_defaults(ProblemDetails::new().with_status(404), Some(500));
        assert_eq!(problem.status, Some(404));
        assert_eq!(problem.title.as_deref(), Some("Not Found"));
    }

    #[test]
    fn non_error_status_gets_about_blank() {
        let problem = apply_defaults(ProblemDetails::new(), Some(302));
        assert_eq!(problem.type_uri.as_deref(), Some("about:blank"));
        assert_eq!(problem.title.as_deref(), Some("Unknown Error"));
    }

    #[test]
    fn server_error_markers_are_case_insensitive() {
        assert!(is_server_error(&ProblemDetails::new().with_type("urn:Infrastructure:outage")));
        assert!(is_server_error(&ProblemDetails::new().with_type("https://x/TIMEOUT")));
        assert!(!is_server_error(&ProblemDetails::new().with_type("https://x/validation")));
        assert!(!is_server_error(&ProblemDetails::new()));
    }

    #[test]
    fn canned_constructors() {
        let problem = validation_problem(["email is invalid"], None);
        assert!(is_validation_problem(&problem));
        assert_eq!(problem.detail.as_deref(), Some("One or more validation errors occurred"));

        assert_eq!(
            not_found_problem("product", None).detail.as_deref(),
            Some("The requested product was not found.")
        );
        assert_eq!(unauthorized_problem(Some("Token expired")).detail.as_deref(), Some("Token expired"));
        assert_eq!(forbidden_problem(None).status, Some(403));
        assert_eq!(
            internal_server_error_problem(Some("")).detail.as_deref(),
            Some("An unexpected error occurred while processing your request.")
        );
    }

    #[test]
    fn merge_ignores_non_error_status() {
        let merged = merge_problems([ProblemDetails::new().with_status(200).with_detail("ok?")]);
        assert_eq!(merged.status, Some(500));
        assert_eq!(merged.detail.as_deref(), Some("ok?"));
        assert_eq!(merged.title.as_deref(), Some("Internal Server Error"));
    }
}
